use crate::config::{ChartKind, ChartSpec, FigureSpec};
use crate::fmt::PlotFmt;
use crate::metrics::{Metric, ScenarioSet};
use std::path::PathBuf;

// share of the space given to each scenario that its bars occupy
const BAR_GROUP_WIDTH: f64 = 0.8;

/// Everything a backend needs to draw a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub output: PathBuf,
    pub dpi: Option<u32>,
    pub size: (f64, f64),
    pub charts: Vec<ChartLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: String,
    pub y_max: Option<f64>,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
    pub legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Bars {
        label: String,
        x: Vec<f64>,
        heights: Vec<f64>,
        width: f64,
        colors: Vec<String>,
    },
    Line {
        label: String,
        x: Vec<f64>,
        y: Vec<f64>,
        color: String,
    },
}

impl Series {
    /// Number of bars or points in this series.
    pub fn len(&self) -> usize {
        match self {
            Series::Bars { x, .. } | Series::Line { x, .. } => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A value label, centred horizontally at `x` with its bottom at `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl FigureLayout {
    pub fn new(figure: &FigureSpec, scenarios: &ScenarioSet) -> Self {
        let charts = figure
            .charts
            .iter()
            .map(|chart| ChartLayout::new(chart, scenarios))
            .collect();
        Self {
            output: figure.output.clone(),
            dpi: figure.dpi,
            size: figure.size,
            charts,
        }
    }
}

impl ChartLayout {
    pub fn new(chart: &ChartSpec, scenarios: &ScenarioSet) -> Self {
        // each scenario is centred at its index
        let ticks: Vec<_> = (0..scenarios.len()).map(|i| i as f64).collect();
        let tick_labels = scenarios
            .labels()
            .into_iter()
            .map(String::from)
            .collect();

        let metric_count = chart.metrics.len() as f64;
        let bar_width = BAR_GROUP_WIDTH / metric_count;
        // shift all to the left by half of the number of metrics and then half
        // a bar to the right
        let shift_left = metric_count / 2f64;
        let shift_right = 0.5;

        let mut series = Vec::with_capacity(chart.metrics.len());
        let mut annotations = Vec::new();
        for (index, metric) in chart.metrics.iter().enumerate() {
            // (x, value) of each scenario that has this metric
            let points: Vec<_> = scenarios
                .iter()
                .zip(ticks.iter())
                .filter_map(|(record, &x)| record.get(*metric).map(|v| (x, v)))
                .collect();

            let shift = match chart.kind {
                ChartKind::Bar => {
                    (index as f64 - shift_left + shift_right) * bar_width
                }
                ChartKind::Line => 0.0,
            };
            let (x, y): (Vec<_>, Vec<_>) =
                points.into_iter().map(|(x, v)| (x + shift, v)).unzip();

            annotations.extend(x.iter().zip(y.iter()).map(|(&x, &value)| {
                Annotation {
                    x,
                    y: value + chart.label_offset,
                    text: chart.label_fmt.format(value),
                }
            }));

            series.push(Self::build_series(
                chart, scenarios, *metric, index, x, y,
            ));
        }

        let legend = chart.metrics.len() > 1;
        Self {
            title: chart.title.clone(),
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            y_max: chart.y_max,
            ticks,
            tick_labels,
            series,
            annotations,
            legend,
        }
    }

    fn build_series(
        chart: &ChartSpec,
        scenarios: &ScenarioSet,
        metric: Metric,
        index: usize,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Series {
        let color = |i: usize| match &chart.colors {
            Some(colors) => colors[i % colors.len()].clone(),
            None => PlotFmt::color(i).to_string(),
        };
        let label = metric.name().to_string();
        match chart.kind {
            ChartKind::Bar => {
                let colors = if chart.metrics.len() == 1 {
                    // a single metric: color each bar after its scenario
                    scenarios
                        .iter()
                        .enumerate()
                        .filter(|(_, record)| record.get(metric).is_some())
                        .map(|(i, _)| color(i))
                        .collect()
                } else {
                    vec![color(index); x.len()]
                };
                Series::Bars {
                    label,
                    x,
                    heights: y,
                    width: BAR_GROUP_WIDTH / chart.metrics.len() as f64,
                    colors,
                }
            }
            ChartKind::Line => Series::Line {
                label,
                x,
                y,
                color: color(index),
            },
        }
    }

    /// Total number of bars and points drawn.
    pub fn element_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }
}
