use std::fmt;
use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which quantity a benchmark CSV reports. Decoded from the second-to-last
/// `_` token of the file name.
#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[strum(serialize = "cpu")]
    Cpu,

    #[strum(serialize = "memory")]
    Memory,

    #[strum(serialize = "api")]
    Api,
}

impl Metric {
    /// Columns parsed from the CSV for this metric.
    pub const fn columns(&self) -> &'static [Column] {
        match self {
            Self::Cpu | Self::Memory => {
                &[Column::Operator, Column::Admission, Column::Recommender, Column::Updater]
            },
            Self::Api => &[Column::ApiPerformance, Column::Webhook, Column::RequestLatency],
        }
    }

    /// Columns that get a scatter series and a trend line. `Operator` is
    /// normalized but never charted since it does not scale linearly.
    pub const fn plotted_columns(&self) -> &'static [Column] {
        match self {
            Self::Cpu | Self::Memory => &[Column::Admission, Column::Recommender, Column::Updater],
            Self::Api => &[Column::ApiPerformance, Column::Webhook, Column::RequestLatency],
        }
    }

    pub const fn unit_for(&self, column: Column) -> Unit {
        match (self, column) {
            (Self::Cpu, _) => Unit::Millicores,
            (Self::Memory, _) => Unit::Mebibytes,
            (Self::Api, Column::ApiPerformance) => Unit::RequestsPerSecond,
            (Self::Api, _) => Unit::MillisPerRequest,
        }
    }

    pub const fn y_label(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU Usage (m)",
            Self::Memory => "Memory Usage (MiB)",
            Self::Api => "API Performance",
        }
    }

    /// Chart title with the phase noun spliced in, e.g.
    /// `CPU Usage Over Pods (m) (interpolated)`.
    pub fn chart_title(&self, noun: &str) -> String {
        match self {
            Self::Cpu => format!("CPU Usage Over {noun} (m) (interpolated)"),
            Self::Memory => format!("Memory Usage Over {noun} (MiB) (interpolated)"),
            Self::Api => format!("API Performance Over {noun} (interpolated)"),
        }
    }
}

/// A measured autoscaler component or API quantity, one CSV column each.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Operator,
    Admission,
    Recommender,
    Updater,
    ApiPerformance,
    Webhook,
    RequestLatency,
}

impl Column {
    /// Header under which this column appears in the CSV.
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Operator => "Operator",
            Self::Admission => "Admission",
            Self::Recommender => "Recommender",
            Self::Updater => "Updater",
            Self::ApiPerformance => "APIPerformance",
            Self::Webhook => "Webhook",
            Self::RequestLatency => "RequestLatency",
        }
    }

    /// Name under which the series appears in chart legends.
    pub const fn series_name(&self) -> &'static str {
        match self {
            Self::Operator => "Operator",
            Self::Admission => "Admission",
            Self::Recommender => "Recommender",
            Self::Updater => "Updater",
            Self::ApiPerformance => "API Performance",
            Self::Webhook => "Webhook",
            Self::RequestLatency => "API Request Latency",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Unit suffix attached to raw benchmark cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Millicores,
    Mebibytes,
    RequestsPerSecond,
    MillisPerRequest,
}

impl Unit {
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Millicores => "m",
            Self::Mebibytes => "MiB",
            Self::RequestsPerSecond => "req/s",
            Self::MillisPerRequest => "ms/req",
        }
    }

    /// Strip the unit suffix from a raw cell and parse the remainder as a
    /// float. Surrounding whitespace is tolerated and a bare number passes
    /// through unchanged.
    pub fn parse(&self, cell: &str) -> Result<f64, ParseFloatError> {
        let trimmed = cell.trim();
        let bare = trimmed.strip_suffix(self.suffix()).unwrap_or(trimmed);
        bare.trim().parse()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
