use color_eyre::eyre;
use color_eyre::Report;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Throughput,
    P95Latency,
    AbortRate,
}

impl Metric {
    pub fn all() -> [Metric; 3] {
        [Metric::Throughput, Metric::P95Latency, Metric::AbortRate]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput",
            Metric::P95Latency => "p95 Latency",
            Metric::AbortRate => "Abort Rate",
        }
    }

    // Returns the inclusive upper bound for this metric's values, if any.
    fn max(&self) -> Option<f64> {
        match self {
            Metric::Throughput | Metric::P95Latency => None,
            Metric::AbortRate => Some(100.0),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Throughput => write!(f, "throughput"),
            Metric::P95Latency => write!(f, "p95_latency_ms"),
            Metric::AbortRate => write!(f, "abort_rate_pct"),
        }
    }
}

/// Metrics observed for a single scenario. Every field is optional since not
/// every report supplies every metric.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricRecord {
    pub scenario: String,
    pub throughput: Option<f64>,
    pub p95_latency_ms: Option<f64>,
    pub abort_rate_pct: Option<f64>,
}

impl MetricRecord {
    pub fn new<S: Into<String>>(scenario: S) -> Self {
        Self {
            scenario: scenario.into(),
            ..Self::default()
        }
    }

    pub fn throughput(mut self, value: f64) -> Self {
        self.throughput = Some(value);
        self
    }

    pub fn p95_latency_ms(mut self, value: f64) -> Self {
        self.p95_latency_ms = Some(value);
        self
    }

    pub fn abort_rate_pct(mut self, value: f64) -> Self {
        self.abort_rate_pct = Some(value);
        self
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Throughput => self.throughput,
            Metric::P95Latency => self.p95_latency_ms,
            Metric::AbortRate => self.abort_rate_pct,
        }
    }

    /// Checks that every present value is finite, non-negative and within
    /// the metric's range.
    pub fn validate(&self) -> Result<(), Report> {
        for metric in Metric::all() {
            let value = match self.get(metric) {
                Some(value) => value,
                None => continue,
            };
            eyre::ensure!(
                value.is_finite() && value >= 0.0,
                "scenario {:?}: {} must be a non-negative number, got {}",
                self.scenario,
                metric,
                value
            );
            if let Some(max) = metric.max() {
                eyre::ensure!(
                    value <= max,
                    "scenario {:?}: {} must be at most {}, got {}",
                    self.scenario,
                    metric,
                    max,
                    value
                );
            }
        }
        Ok(())
    }
}

/// Outcome of loading a single scenario: either its record, or the source
/// that could not be found.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    Found(MetricRecord),
    Absent(PathBuf),
}

/// Ordered, immutable sequence of scenario records. The order is the
/// left-to-right order in which scenarios are drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioSet {
    records: Vec<MetricRecord>,
}

impl ScenarioSet {
    pub fn new(records: Vec<MetricRecord>) -> Result<Self, Report> {
        let mut labels = HashSet::with_capacity(records.len());
        for record in records.iter() {
            if !labels.insert(record.scenario.as_str()) {
                eyre::bail!("duplicate scenario {:?}", record.scenario);
            }
            record.validate()?;
        }
        Ok(Self { records })
    }

    /// Keeps the found records (in input order) and returns the absent
    /// sources separately.
    pub fn from_loaded(
        loaded: Vec<Loaded>,
    ) -> Result<(Self, Vec<PathBuf>), Report> {
        let mut records = Vec::with_capacity(loaded.len());
        let mut absent = Vec::new();
        for entry in loaded {
            match entry {
                Loaded::Found(record) => records.push(record),
                Loaded::Absent(path) => absent.push(path),
            }
        }
        let set = Self::new(records)?;
        Ok((set, absent))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricRecord> {
        self.records.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.scenario.as_str())
            .collect()
    }

    pub fn get(&self, scenario: &str) -> Option<&MetricRecord> {
        self.records
            .iter()
            .find(|record| record.scenario == scenario)
    }
}
