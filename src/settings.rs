use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "render scatter and regression charts from autoscaler benchmark CSVs")]
pub struct CliOptions {
    /// path to a semicolon-delimited benchmark CSV named `<test_phase>_<metric>_results.csv`
    pub input: PathBuf,

    /// override where the rendered SVG chart is written.
    /// Default behavior is to place it next to the input with an `.svg` extension.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CliOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.input.with_extension("svg"))
    }
}
