use once_cell::sync::Lazy;

#[allow(dead_code)]
pub fn init_tracing() {
    Lazy::force(&benchplot::tracing::TEST_TRACING);
}
