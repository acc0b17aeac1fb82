use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single analyzer stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one overlay run.
///
/// Stages that ran concurrently overlap, so their sum may exceed `total_ms`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn extend(&mut self, stages: impl IntoIterator<Item = StageTiming>) {
        self.stages.extend(stages);
    }
}

/// Run `f`, returning its output and the wall time under `label`.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> (T, StageTiming) {
    let start = Instant::now();
    let out = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (out, StageTiming::new(label, elapsed_ms))
}
