use crate::db::{ScenarioSpec, Values};
use crate::fmt::LabelFmt;
use crate::metrics::Metric;
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use std::collections::HashSet;
use std::path::PathBuf;

// results files written by the benchmark, one per workload
const UNIFORM_RESULTS: &str = "results_uniform.json";
const HOTSPOT_RESULTS: &str = "results_hotspot.json";

// resolution of publication figures
const PAPER_DPI: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One bar per scenario, grouped per scenario when plotting more than
    /// one metric.
    Bar,
    /// One line per metric across the scenarios.
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub metrics: Vec<Metric>,
    pub x_label: Option<String>,
    pub y_label: String,
    pub label_fmt: LabelFmt,
    /// Fixed upper bound of the y axis; `None` lets the backend autoscale.
    pub y_max: Option<f64>,
    /// Vertical gap between a bar (or point) and its value label, in data
    /// units.
    pub label_offset: f64,
    /// Overrides the default palette.
    pub colors: Option<Vec<String>>,
}

impl ChartSpec {
    pub fn new(
        title: &str,
        kind: ChartKind,
        metric: Metric,
        y_label: &str,
        label_fmt: &str,
    ) -> Result<Self, Report> {
        let label_fmt = LabelFmt::parse(label_fmt)
            .wrap_err_with(|| format!("label format of chart {:?}", title))?;
        Ok(Self {
            title: title.to_string(),
            kind,
            metrics: vec![metric],
            x_label: None,
            y_label: y_label.to_string(),
            label_fmt,
            y_max: None,
            label_offset: 0.0,
            colors: None,
        })
    }

    pub fn metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn x_label(mut self, label: &str) -> Self {
        self.x_label = Some(label.to_string());
        self
    }

    /// Sets the y axis upper bound; value labels are placed 1% of the bound
    /// above their bar.
    pub fn y_max(mut self, y_max: f64) -> Self {
        self.y_max = Some(y_max);
        self.label_offset = y_max * 0.01;
        self
    }

    pub fn label_offset(mut self, offset: f64) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    fn validate(&self) -> Result<(), Report> {
        eyre::ensure!(!self.metrics.is_empty(), "no metrics to plot");
        let mut metrics = HashSet::new();
        for metric in self.metrics.iter() {
            eyre::ensure!(metrics.insert(metric), "metric {} repeated", metric);
        }
        if let Some(y_max) = self.y_max {
            eyre::ensure!(
                y_max.is_finite() && y_max > 0.0,
                "y axis bound must be positive, got {}",
                y_max
            );
        }
        eyre::ensure!(
            self.label_offset.is_finite() && self.label_offset >= 0.0,
            "label offset must be non-negative, got {}",
            self.label_offset
        );
        if let Some(colors) = &self.colors {
            eyre::ensure!(!colors.is_empty(), "empty color list");
        }
        Ok(())
    }
}

/// One image, with its charts drawn side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub output: PathBuf,
    /// `None` keeps the backend's default resolution.
    pub dpi: Option<u32>,
    /// Width and height in inches.
    pub size: (f64, f64),
    pub charts: Vec<ChartSpec>,
}

impl FigureSpec {
    pub fn new(output: impl Into<PathBuf>, charts: Vec<ChartSpec>) -> Self {
        // 6 inches of width per chart
        let width = 6.0 * charts.len().max(1) as f64;
        Self {
            output: output.into(),
            dpi: None,
            size: (width, 5.0),
            charts,
        }
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }

    fn validate(&self) -> Result<(), Report> {
        eyre::ensure!(!self.charts.is_empty(), "figure has no charts");
        eyre::ensure!(
            self.size.0 > 0.0 && self.size.1 > 0.0,
            "figure size must be positive, got {:?}",
            self.size
        );
        if let Some(dpi) = self.dpi {
            eyre::ensure!(dpi > 0, "dpi must be positive");
        }
        for chart in self.charts.iter() {
            chart
                .validate()
                .wrap_err_with(|| format!("chart {:?}", chart.title))?;
        }
        Ok(())
    }
}

/// A set of scenarios and the figures drawn from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub scenarios: Vec<ScenarioSpec>,
    pub figures: Vec<FigureSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub sections: Vec<Section>,
}

impl ReportConfig {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn validate(&self) -> Result<(), Report> {
        let mut outputs = HashSet::new();
        for section in self.sections.iter() {
            eyre::ensure!(!section.figures.is_empty(), "section has no figures");

            let mut labels = HashSet::new();
            for scenario in section.scenarios.iter() {
                eyre::ensure!(
                    labels.insert(scenario.label.as_str()),
                    "duplicate scenario {:?}",
                    scenario.label
                );
            }

            for figure in section.figures.iter() {
                eyre::ensure!(
                    outputs.insert(figure.output.as_path()),
                    "output {} used by more than one figure",
                    figure.output.display()
                );
                figure.validate().wrap_err_with(|| {
                    format!("figure {}", figure.output.display())
                })?;
            }
        }
        Ok(())
    }

    /// Throughput and abort rate of both workloads, read from the benchmark's
    /// results files.
    pub fn benchmark_results() -> Result<Self, Report> {
        let scenarios = vec![
            ScenarioSpec::file("Uniform", UNIFORM_RESULTS),
            ScenarioSpec::file("Hot-Spot", HOTSPOT_RESULTS),
        ];
        let charts = vec![
            ChartSpec::new(
                "System Throughput",
                ChartKind::Bar,
                Metric::Throughput,
                "Transactions Per Second (TPS)",
                "%.0f",
            )?
            .label_offset(5.0),
            ChartSpec::new(
                "Transaction Abort Rate",
                ChartKind::Bar,
                Metric::AbortRate,
                "Abort Rate (%)",
                "%.1f%%",
            )?
            .y_max(100.0),
        ];
        let figure = FigureSpec::new("benchmark_results.png", charts)
            .size(12.0, 5.0)
            .dpi(PAPER_DPI);
        Ok(Self::new(vec![Section {
            scenarios,
            figures: vec![figure],
        }]))
    }

    /// The latency, abort rate and scalability figures of the write-up, from
    /// recorded numbers.
    pub fn paper_figures() -> Result<Self, Report> {
        let latency = ChartSpec::new(
            "p95 Latency",
            ChartKind::Bar,
            Metric::P95Latency,
            "p95 Latency (ms)",
            "%.1f ms",
        )?
        .y_max(60.0);
        let abort = ChartSpec::new(
            "Transaction Abort Rate",
            ChartKind::Bar,
            Metric::AbortRate,
            "Abort Rate (%)",
            "%.1f%%",
        )?
        .y_max(100.0);
        let workloads = Section {
            scenarios: recorded_workloads(),
            figures: vec![
                FigureSpec::new("fig06_latency.png", vec![latency])
                    .dpi(PAPER_DPI),
                FigureSpec::new("fig07_abort.png", vec![abort]).dpi(PAPER_DPI),
            ],
        };

        let throughput = ChartSpec::new(
            "Throughput Scalability (Uniform)",
            ChartKind::Line,
            Metric::Throughput,
            "Transactions Per Second (TPS)",
            "%.0f",
        )?
        .x_label("Concurrent Workers")
        .y_max(500.0);
        let scalability = Section {
            scenarios: recorded_scalability(),
            figures: vec![FigureSpec::new(
                "fig08_throughput.png",
                vec![throughput],
            )
            .dpi(PAPER_DPI)],
        };

        Ok(Self::new(vec![workloads, scalability]))
    }

    /// All three metrics of both workloads in a single figure, from recorded
    /// numbers.
    pub fn summary() -> Result<Self, Report> {
        let charts = vec![
            ChartSpec::new(
                "System Throughput",
                ChartKind::Bar,
                Metric::Throughput,
                "Transactions Per Second (TPS)",
                "%.0f",
            )?
            .y_max(700.0),
            ChartSpec::new(
                "p95 Latency",
                ChartKind::Bar,
                Metric::P95Latency,
                "Latency (ms)",
                "%.1f",
            )?
            .y_max(60.0),
            ChartSpec::new(
                "Transaction Abort Rate",
                ChartKind::Bar,
                Metric::AbortRate,
                "Abort Rate (%)",
                "%.1f%%",
            )?
            .y_max(100.0),
        ];
        Ok(Self::new(vec![Section {
            scenarios: recorded_workloads(),
            figures: vec![FigureSpec::new("benchmark_summary.png", charts)],
        }]))
    }
}

// numbers from the 30s, 10 worker runs of each workload
fn recorded_workloads() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::embedded(
            "Uniform",
            Values {
                throughput: Some(326.5),
                p95_latency_ms: Some(41.3),
                abort_rate_pct: Some(1.79),
            },
        ),
        ScenarioSpec::embedded(
            "Hot-Spot",
            Values {
                throughput: Some(527.2),
                p95_latency_ms: Some(23.8),
                abort_rate_pct: Some(87.40),
            },
        ),
    ]
}

// uniform workload with an increasing number of workers
fn recorded_scalability() -> Vec<ScenarioSpec> {
    [(1, 48.7), (5, 201.3), (10, 326.5), (25, 402.9), (50, 418.2)]
        .into_iter()
        .map(|(workers, throughput)| {
            let values = Values {
                throughput: Some(throughput),
                ..Values::default()
            };
            ScenarioSpec::embedded(workers.to_string(), values)
        })
        .collect()
}
