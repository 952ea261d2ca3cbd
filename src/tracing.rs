use once_cell::sync::Lazy;
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let filter = if std::env::var("TEST_LOG").is_ok() { "trace" } else { "" };
    let subscriber = get_subscriber("test", filter);
    init_subscriber(subscriber);
});

/// Compose the env-filter and bunyan formatting layers into a subscriber.
///
/// The return type is `impl Subscriber` since the composed registry type is
/// unwieldy to spell out; `Send + Sync` are called out so the value can be
/// handed to `init_subscriber`.
pub fn get_subscriber(name: impl Into<String>, env_filter: impl AsRef<str>) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), std::io::stdout);

    Registry::default().with(env_filter).with(JsonStorageLayer).with(formatting_layer)
}

/// Register a subscriber as global default to process span data.
///
/// It should be only called once!
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) {
    LogTracer::init().expect("Failed to set logger");
    set_global_default(subscriber).expect("Failed to set subscriber");
}
