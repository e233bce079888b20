//! Prediction instrumentation.
//!
//! The matcher reports into one process-wide recorder slot. It starts empty,
//! in which case predictions skip reporting entirely.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::types::KnnError;

type Recorder = Arc<dyn KnnMetrics>;

static RECORDER: Lazy<RwLock<Option<Recorder>>> = Lazy::new(|| RwLock::new(None));

/// Metrics observer for predictions.
pub trait KnnMetrics: Send + Sync {
    /// Record the outcome of one prediction.
    ///
    /// `candidates` is the size of the labeled set that was compared and
    /// `result` carries the error when the prediction was rejected.
    fn record_predict(&self, latency: Duration, candidates: usize, result: Result<(), &KnnError>);
}

pub(crate) fn metrics_recorder() -> Option<Recorder> {
    RECORDER
        .read()
        .map(|slot| slot.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
}

/// Install or clear the global prediction metrics recorder.
///
/// Call this once during startup, before matchers are shared across threads.
/// The slot is global, so every `KnnMatcher` in the process reports to the
/// same recorder, and passing `None` turns reporting off again.
pub fn set_knn_metrics(recorder: Option<Arc<dyn KnnMetrics>>) {
    let mut slot = RECORDER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = recorder;
}
