use std::time::Instant;

use features::FeatureVector;
use rayon::prelude::*;
use tracing::{debug, warn, Level};

use crate::distance::euclidean_distance;
use crate::history::PredictionHistory;
use crate::metrics::metrics_recorder;
use crate::types::{KnnConfig, KnnError, LabeledFeature, Neighbor, Prediction};

/// Nearest-neighbor matcher over labeled preference vectors.
///
/// The matcher is stateless apart from its configuration, so one instance can
/// be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct KnnMatcher {
    cfg: KnnConfig,
}

impl KnnMatcher {
    /// Construct a matcher from a validated configuration.
    pub fn new(cfg: KnnConfig) -> Result<Self, KnnError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &KnnConfig {
        &self.cfg
    }

    /// Every candidate ordered by ascending distance to `target`.
    ///
    /// The sort is stable: candidates at equal distance keep their input order.
    /// A NaN distance, which only hand-built vectors can produce, ranks after
    /// every finite one.
    pub fn rank(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
    ) -> Result<Vec<Neighbor>, KnnError> {
        if set.is_empty() {
            return Err(KnnError::EmptyComparisonSet { k: 0, available: 0 });
        }
        check_dimensions(set, target)?;

        let target = target.as_slice();
        let distances: Vec<f64> = if self.cfg.use_parallel {
            set.par_iter()
                .map(|candidate| euclidean_distance(target, candidate.features.as_slice()))
                .collect::<Result<Vec<f64>, KnnError>>()?
        } else {
            set.iter()
                .map(|candidate| euclidean_distance(target, candidate.features.as_slice()))
                .collect::<Result<Vec<f64>, KnnError>>()?
        };

        let mut neighbors: Vec<Neighbor> = set
            .iter()
            .zip(distances)
            .enumerate()
            .map(|(position, (candidate, distance))| Neighbor {
                user_id: candidate.user_id.clone(),
                distance,
                position,
            })
            .collect();
        neighbors.sort_by(|a, b| sort_key(a.distance).total_cmp(&sort_key(b.distance)));
        Ok(neighbors)
    }

    /// The `n` closest candidates, closest first.
    pub fn nearest(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
        n: usize,
    ) -> Result<Vec<Neighbor>, KnnError> {
        let mut neighbors = self.rank(set, target)?;
        neighbors.truncate(n);
        Ok(neighbors)
    }

    /// Predict the similar user for `target` using the configured `k`.
    pub fn predict(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
    ) -> Result<Prediction, KnnError> {
        self.predict_with_k(set, target, self.cfg.k)
    }

    /// Predict the similar user for `target`.
    ///
    /// Returns the candidate at zero-based position `k` in distance order, so
    /// with `k = 1` this is the second-closest candidate. Requires
    /// `k < set.len()`.
    pub fn predict_with_k(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
        k: usize,
    ) -> Result<Prediction, KnnError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "knn.predict", candidates = set.len(), k);
        let _guard = span.enter();

        let result = self.predict_inner(set, target, k);

        if let Some(recorder) = metrics_recorder() {
            recorder.record_predict(start.elapsed(), set.len(), result.as_ref().map(|_| ()));
        }
        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(prediction) => debug!(
                user_id = %prediction.user_id,
                distance = prediction.distance,
                rank = prediction.rank,
                elapsed_micros,
                "knn_predict_success"
            ),
            Err(err) => warn!(error = %err, elapsed_micros, "knn_predict_failure"),
        }
        result
    }

    /// [`KnnMatcher::predict`], additionally appending the result to `history`.
    pub fn predict_recorded(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
        history: &mut PredictionHistory,
    ) -> Result<Prediction, KnnError> {
        let prediction = self.predict(set, target)?;
        history.record(prediction.clone());
        Ok(prediction)
    }

    fn predict_inner(
        &self,
        set: &[LabeledFeature],
        target: &FeatureVector,
        k: usize,
    ) -> Result<Prediction, KnnError> {
        check_dimensions(set, target)?;
        let position = neighbor_position(k);
        if position >= set.len() {
            return Err(KnnError::EmptyComparisonSet {
                k,
                available: set.len(),
            });
        }

        let neighbors = self.rank(set, target)?;
        let candidates = neighbors.len();
        let selected = neighbors
            .into_iter()
            .nth(position)
            .ok_or(KnnError::EmptyComparisonSet {
                k,
                available: candidates,
            })?;

        Ok(Prediction {
            user_id: selected.user_id,
            distance: selected.distance,
            rank: position,
            k,
            candidates,
        })
    }
}

/// Predict with a default matcher; see [`KnnMatcher::predict_with_k`].
pub fn predict(
    set: &[LabeledFeature],
    target: &FeatureVector,
    k: usize,
) -> Result<Prediction, KnnError> {
    KnnMatcher::default().predict_with_k(set, target, k)
}

/// Sorted position returned for a given `k`.
///
/// Existing callers depend on receiving the entry at index `k` rather than the
/// nearest one (or a vote over the nearest `k`). Changing the selection rule
/// only requires changing this function.
fn neighbor_position(k: usize) -> usize {
    k
}

// `total_cmp` orders a sign-bit NaN before -inf, so NaN is folded to +inf.
fn sort_key(distance: f64) -> f64 {
    if distance.is_nan() {
        f64::INFINITY
    } else {
        distance
    }
}

fn check_dimensions(set: &[LabeledFeature], target: &FeatureVector) -> Result<(), KnnError> {
    match set.iter().find(|c| c.features.len() != target.len()) {
        Some(candidate) => Err(KnnError::DimensionMismatch {
            expected: target.len(),
            actual: candidate.features.len(),
        }),
        None => Ok(()),
    }
}
