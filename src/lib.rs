#![deny(rust_2018_idioms)]

// This module contains the definition of `Metric`, `MetricRecord` and
// `ScenarioSet`.
pub mod metrics;

// This module contains the loading of scenarios from results files.
pub mod db;

// This module contains value label formats and the color palette.
pub mod fmt;

// This module contains the definition of `ReportConfig` and its presets.
pub mod config;

// This module contains the computation of what is drawn in each chart.
pub mod layout;

// This module contains the `Backend` trait and the matplotlib backend.
pub mod plot;

// This module contains the report pipeline.
pub mod report;

// Re-exports.
pub use config::{ChartKind, ChartSpec, FigureSpec, ReportConfig, Section};
pub use db::{ResultsFile, ScenarioSpec, Source, Values};
pub use fmt::{LabelFmt, PlotFmt};
pub use layout::{Annotation, ChartLayout, FigureLayout, Series};
pub use metrics::{Loaded, Metric, MetricRecord, ScenarioSet};
pub use plot::Backend;
pub use report::run;

#[cfg(feature = "pyo3")]
pub use plot::Matplotlib;

/// Unwraps a `PyResult`; on error, prints the python traceback and returns a
/// `Report` from the enclosing function.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pytry {
    ($py:expr, $e:expr) => {{
        match $e {
            Ok(value) => value,
            Err(e) => {
                e.print($py);
                color_eyre::eyre::bail!("python error: {:?}", e)
            }
        }
    }};
}

/// Creates a `PyDict` from `(key, value)` pairs, returning a `PyResult`.
#[cfg(feature = "pyo3")]
#[macro_export]
macro_rules! pydict {
    ($py:expr, $($tup:expr),* $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        let mut result: pyo3::PyResult<&pyo3::types::PyDict> = Ok(dict);
        $(
            let (key, value) = $tup;
            if let Err(e) = dict.set_item(key, value) {
                result = Err(e);
            }
        )*
        result
    }};
}

/// Sets up the `tracing` subscriber used by the binaries; the level is
/// taken from `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
