pub use palette::{for_group, scatter_marker, sweep_marker, Marker, Palette};

mod palette;

use std::fmt;
use std::ops::Range;
use std::path::Path;

use anyhow::anyhow;
use plotters::chart::SeriesAnno;
use plotters::coord::types::{RangedCoordf64, RangedCoordi64};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::elements::{BenchmarkData, Column, LinearFit, Metric, TestPhase};
use crate::error::ChartError;
use crate::workloads::{self, WorkloadGroup, WorkloadPlan};

pub const CHART_SIZE: (u32, u32) = (1000, 600);

const MARKER_SIZE: i32 = 5;
const CAPTION_FONT: (&str, i32) = ("sans-serif", 28);

type BenchChart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordi64, RangedCoordf64>>;

/// Render the chart for a normalized benchmark table as an SVG at `out`.
///
/// Rate-limiter sweeps get a plain line chart against categorical step
/// labels; every other phase gets scatter series with trend line overlays
/// per workload group.
#[tracing::instrument(
    level = "info",
    skip(data),
    fields(metric = %data.metric, phase = %data.test_phase, out = %out.display()),
)]
pub fn render(data: &BenchmarkData, out: &Path) -> Result<(), ChartError> {
    let root = SVGBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    match workloads::plan(data)? {
        WorkloadPlan::Categorical { labels } => draw_sweep_chart(data, &labels, &root)?,
        WorkloadPlan::Groups(groups) => draw_regression_chart(data, &groups, &root)?,
    }

    root.present().map_err(render_err)?;
    tracing::debug!("chart presented");
    Ok(())
}

/// One scatter series with its optional trend line, ready to draw.
#[derive(Debug, Clone)]
struct PlottedSeries {
    color: RGBColor,
    marker: Marker,
    points: Vec<(i64, f64)>,
    scatter_label: String,
    trend: Option<(Vec<(i64, f64)>, String)>,
}

fn draw_regression_chart(
    data: &BenchmarkData, groups: &[WorkloadGroup], root: &DrawingArea<SVGBackend<'_>, Shift>,
) -> Result<(), ChartError> {
    let plotted = regression_series(data, groups);
    let (x_range, y_range) = axis_ranges(&plotted);

    let mut chart = ChartBuilder::on(root)
        .caption(standard_title(data), CAPTION_FONT)
        .margin(12)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(data.test_phase.x_label().unwrap_or_default())
        .y_desc(data.metric.y_label())
        .x_labels(12)
        .draw()
        .map_err(render_err)?;

    for series in &plotted {
        plot_markers(&mut chart, &series.points, series.marker, series.color, true)?
            .label(series.scatter_label.as_str())
            .legend(legend_glyph_fn(series.marker, series.color));

        if let Some((line, label)) = &series.trend {
            let style = series.color.stroke_width(2);
            chart
                .draw_series(DashedLineSeries::new(line.iter().copied(), 6, 4, style))
                .map_err(render_err)?
                .label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], style));
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

fn draw_sweep_chart(
    data: &BenchmarkData, labels: &[String], root: &DrawingArea<SVGBackend<'_>, Shift>,
) -> Result<(), ChartError> {
    let columns = data.metric.plotted_columns();
    let y_range = sweep_value_range(data);
    let x_max = (labels.len().saturating_sub(1)).max(1) as i64;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("Rate Limiter Configurations testing {}", data.metric), CAPTION_FONT)
        .margin(12)
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(0..x_max, y_range)
        .map_err(render_err)?;

    let step_label = |index: &i64| labels.get(*index as usize).cloned().unwrap_or_default();
    chart
        .configure_mesh()
        .x_labels(labels.len().max(2))
        .x_label_formatter(&step_label)
        .y_desc(data.metric.y_label())
        .draw()
        .map_err(render_err)?;

    let colors = for_group("").colors();
    for (slot, column) in columns.iter().enumerate() {
        let series = match data.series_for(*column) {
            Some(series) => series,
            None => continue,
        };
        let color = colors[slot];
        let style = color.stroke_width(2);
        let points: Vec<(i64, f64)> =
            series.values.iter().enumerate().map(|(index, value)| (index as i64, *value)).collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))
            .map_err(render_err)?
            .label(sweep_label(data.metric, *column))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], style));
        plot_markers(&mut chart, &points, sweep_marker(data.metric, *column), color, false)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    Ok(())
}

fn regression_series(data: &BenchmarkData, groups: &[WorkloadGroup]) -> Vec<PlottedSeries> {
    let mut plotted = Vec::new();
    for group in groups {
        let colors = for_group(&group.label).colors();
        for (slot, column) in data.metric.plotted_columns().iter().enumerate() {
            let series = match group.series_for(*column) {
                Some(series) => series,
                None => continue,
            };
            let points: Vec<(i64, f64)> =
                group.steps.iter().copied().zip(series.values.iter().copied()).collect();

            let trend = match LinearFit::from_series(&group.steps, &series.values) {
                Ok(fit) => {
                    tracing::debug!(
                        column = %column, group = %group.label,
                        correlation = fit.correlation_coefficient,
                        "fitted trend line"
                    );
                    let line: Vec<(i64, f64)> =
                        points.iter().map(|(x, _)| (*x, fit.at(*x as f64))).collect();
                    Some((line, trend_label(data.metric, *column, &group.label, &fit)))
                },
                Err(err) => {
                    tracing::warn!(column = %column, group = %group.label, error = %err, "skipping trend line");
                    None
                },
            };

            plotted.push(PlottedSeries {
                color: colors[slot],
                marker: scatter_marker(*column),
                scatter_label: join_label(&[column.series_name(), &group.label]),
                points,
                trend,
            });
        }
    }

    plotted
}

fn standard_title(data: &BenchmarkData) -> String {
    match data.test_phase {
        TestPhase::Idle => "Idle Performance".to_string(),
        phase => data.metric.chart_title(phase.title_noun().unwrap_or_default()),
    }
}

fn sweep_label(metric: Metric, column: Column) -> String {
    match metric {
        Metric::Api => match column {
            Column::ApiPerformance => "API Performance (req/s)".to_string(),
            Column::Webhook => "Webhook (ms/req)".to_string(),
            _ => "API Request Latency (ms)".to_string(),
        },
        _ => column.series_name().to_string(),
    }
}

fn trend_label(metric: Metric, column: Column, group: &str, fit: &LinearFit) -> String {
    let name = match (metric, column) {
        (Metric::Api, Column::ApiPerformance) => "API Performance Regression".to_string(),
        (Metric::Api, Column::Webhook) => "Webhook Regression".to_string(),
        (Metric::Api, _) => "Request Latency Regression".to_string(),
        (_, column) => format!("{} eq", column.series_name()),
    };
    join_label(&[&name, group, &fit.to_string()])
}

fn join_label(parts: &[&str]) -> String {
    parts.iter().copied().filter(|part| !part.is_empty()).collect::<Vec<_>>().join(" ")
}

fn axis_ranges(plotted: &[PlottedSeries]) -> (Range<i64>, Range<f64>) {
    let mut x_min = i64::MAX;
    let mut x_max = i64::MIN;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    let all_points = plotted
        .iter()
        .flat_map(|series| {
            let trend_points = series.trend.iter().flat_map(|(line, _)| line.iter());
            series.points.iter().chain(trend_points)
        });
    for (x, y) in all_points {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }

    if x_min > x_max {
        return (0..1, 0.0..1.0);
    }
    if x_min == x_max {
        x_min -= 1;
        x_max += 1;
    }

    let pad = ((y_max - y_min) * 0.05).max(f64::EPSILON);
    let pad = if pad.is_finite() && pad > f64::EPSILON { pad } else { 1.0 };
    (x_min..x_max, (y_min - pad)..(y_max + pad))
}

fn sweep_value_range(data: &BenchmarkData) -> Range<f64> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for column in data.metric.plotted_columns() {
        if let Some(series) = data.series_for(*column) {
            for value in &series.values {
                y_min = y_min.min(*value);
                y_max = y_max.max(*value);
            }
        }
    }

    if y_min > y_max {
        return 0.0..1.0;
    }
    let pad = (y_max - y_min) * 0.05;
    let pad = if pad > f64::EPSILON { pad } else { 1.0 };
    (y_min - pad)..(y_max + pad)
}

fn plot_markers<'c, 'a, 'b>(
    chart: &'c mut BenchChart<'a, 'b>, points: &[(i64, f64)], marker: Marker, color: RGBColor,
    edged: bool,
) -> Result<&'c mut SeriesAnno<'a, SVGBackend<'b>>, ChartError> {
    let fill = color.filled();
    let edge = if edged { BLACK.stroke_width(1) } else { color.stroke_width(1) };
    let reach = MARKER_SIZE + 1;

    let anno = match marker {
        Marker::Circle => chart.draw_series(points.iter().map(|&point| {
            EmptyElement::at(point)
                + Circle::new((0, 0), MARKER_SIZE, fill)
                + Circle::new((0, 0), MARKER_SIZE, edge)
        })),
        Marker::Square => chart.draw_series(points.iter().map(|&point| {
            EmptyElement::at(point)
                + Rectangle::new([(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)], fill)
                + Rectangle::new([(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)], edge)
        })),
        Marker::Diamond => chart.draw_series(points.iter().map(|&point| {
            EmptyElement::at(point)
                + Polygon::new(vec![(0, -reach), (reach, 0), (0, reach), (-reach, 0)], fill)
                + PathElement::new(vec![(0, -reach), (reach, 0), (0, reach), (-reach, 0), (0, -reach)], edge)
        })),
        Marker::Cross => chart.draw_series(
            points
                .iter()
                .map(|&point| EmptyElement::at(point) + Cross::new((0, 0), MARKER_SIZE, color.stroke_width(2))),
        ),
    };

    anno.map_err(render_err)
}

fn legend_glyph_fn<DB: DrawingBackend>(
    marker: Marker, color: RGBColor,
) -> impl Fn((i32, i32)) -> DynElement<'static, DB, (i32, i32)> {
    move |(x, y)| {
        let style = color.filled();
        match marker {
            Marker::Circle => Circle::new((x + 9, y), 4, style).into_dyn(),
            Marker::Square => Rectangle::new([(x + 5, y - 4), (x + 13, y + 4)], style).into_dyn(),
            Marker::Diamond => {
                Polygon::new(vec![(x + 9, y - 5), (x + 14, y), (x + 9, y + 5), (x + 4, y)], style).into_dyn()
            },
            Marker::Cross => Cross::new((x + 9, y), 4, color.stroke_width(2)).into_dyn(),
        }
    }
}

fn render_err(err: impl fmt::Display) -> ChartError {
    ChartError::Render(anyhow!("{err}"))
}
