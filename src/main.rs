use clap::Parser;

use benchplot::settings::CliOptions;
use benchplot::source::BenchmarkSource;
use benchplot::tracing::{get_subscriber, init_subscriber};
use benchplot::{chart, BenchplotResult};

fn main() {
    let subscriber = get_subscriber("benchplot", "info");
    init_subscriber(subscriber);

    let options = match CliOptions::try_parse() {
        Ok(options) => options,
        Err(err) => {
            // clap renders its own usage text; exit status 1 is part of the
            // CLI contract for bad invocations.
            let _ = err.print();
            std::process::exit(1);
        },
    };

    if let Err(err) = run(&options) {
        tracing::error!(error = ?err, "benchmark chart rendering failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[tracing::instrument(level = "info", skip(options), fields(input = %options.input.display()))]
fn run(options: &CliOptions) -> BenchplotResult<()> {
    let source = BenchmarkSource::from_path(&options.input)?;
    let data = source.load()?;

    let out = options.output_path();
    chart::render(&data, &out)?;
    tracing::info!(chart = %out.display(), "chart rendered");
    println!("wrote {}", out.display());
    Ok(())
}
