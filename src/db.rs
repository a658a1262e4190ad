use crate::metrics::{Loaded, MetricRecord};
use color_eyre::eyre::WrapErr;
use color_eyre::Report;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the metrics of a scenario come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A results file written by the benchmark.
    File(PathBuf),
    /// Values embedded in the report itself.
    Embedded(Values),
}

/// Embedded metric values; the scenario label comes from the `ScenarioSpec`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Values {
    pub throughput: Option<f64>,
    pub p95_latency_ms: Option<f64>,
    pub abort_rate_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioSpec {
    pub label: String,
    pub source: Source,
}

impl ScenarioSpec {
    pub fn file<L, P>(label: L, path: P) -> Self
    where
        L: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            label: label.into(),
            source: Source::File(path.into()),
        }
    }

    pub fn embedded<L: Into<String>>(label: L, values: Values) -> Self {
        Self {
            label: label.into(),
            source: Source::Embedded(values),
        }
    }
}

/// Summary the benchmark writes at the end of a run (`results_<workload>.json`).
/// Every key is optional and defaults to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsFile {
    pub workload: String,
    pub duration_sec: f64,
    pub total_requests: u64,
    pub throughput_tps: f64,
    pub success_created: u64,
    pub success_replay: u64,
    pub aborts_conflict: u64,
    pub abort_rate_pct: f64,
    pub errors: u64,
    pub p95_latency_ms: Option<f64>,
}

impl ResultsFile {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Report> {
        let path = path.as_ref();
        // open the file in read-only; it's closed when `buf` goes out of scope
        let file = std::fs::File::open(path).wrap_err_with(|| {
            format!("open results file {}", path.display())
        })?;
        let buf = std::io::BufReader::new(file);
        let results = serde_json::from_reader(buf).wrap_err_with(|| {
            format!("parse results file {}", path.display())
        })?;
        Ok(results)
    }

    pub fn into_record(self, scenario: impl Into<String>) -> MetricRecord {
        MetricRecord {
            scenario: scenario.into(),
            throughput: Some(self.throughput_tps),
            p95_latency_ms: Some(self.p95_latency_ms.unwrap_or_default()),
            abort_rate_pct: Some(self.abort_rate_pct),
        }
    }
}

/// Loads a single scenario. A results file that does not exist is reported
/// as `Loaded::Absent`; one that exists but can't be parsed is an error.
pub fn load_scenario(spec: &ScenarioSpec) -> Result<Loaded, Report> {
    let record = match &spec.source {
        Source::Embedded(values) => MetricRecord {
            scenario: spec.label.clone(),
            throughput: values.throughput,
            p95_latency_ms: values.p95_latency_ms,
            abort_rate_pct: values.abort_rate_pct,
        },
        Source::File(path) => {
            if !path.exists() {
                tracing::warn!(
                    scenario = %spec.label,
                    path = %path.display(),
                    "results file not found"
                );
                return Ok(Loaded::Absent(path.clone()));
            }
            let results = ResultsFile::read(path)?;
            tracing::debug!(
                scenario = %spec.label,
                workload = %results.workload,
                duration_sec = results.duration_sec,
                total_requests = results.total_requests,
                success_created = results.success_created,
                success_replay = results.success_replay,
                aborts_conflict = results.aborts_conflict,
                errors = results.errors,
                "loaded results file"
            );
            results.into_record(spec.label.clone())
        }
    };
    record
        .validate()
        .wrap_err_with(|| format!("invalid metrics for {:?}", spec.label))?;
    Ok(Loaded::Found(record))
}

/// Loads all scenarios, in order.
pub fn load(specs: &[ScenarioSpec]) -> Result<Vec<Loaded>, Report> {
    specs.iter().map(load_scenario).collect()
}
