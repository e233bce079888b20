//! # brewmatch Nearest-Neighbor Matching (`knn`)
//!
//! ## Purpose
//!
//! `knn` compares one user's preference vector (produced by the `features`
//! crate) against a labeled set of other users' vectors and picks a similar
//! user by Euclidean distance. The result feeds the recommendation layer in
//! the root `brewmatch` crate.
//!
//! ## Core Types
//!
//! - [`LabeledFeature`]: another user's identifier and vector.
//! - [`KnnConfig`]: the `k` used by `predict` and whether to compute
//!   distances in parallel.
//! - [`KnnMatcher`]: ranks candidates and selects the predicted user.
//! - [`Prediction`]: the selected user, its distance, and its rank.
//! - [`PredictionHistory`]: optional caller-owned log of past predictions.
//!
//! ## Neighbor selection
//!
//! [`KnnMatcher::predict`] returns the candidate at zero-based position `k`
//! of the distance ordering, not the nearest one: with the default `k = 1`
//! the second-closest user is selected. Use [`KnnMatcher::nearest`] for a
//! plain closest-first lookup.
//!
//! ## Example Usage
//!
//! ```
//! use features::FeatureVector;
//! use knn::{KnnMatcher, LabeledFeature};
//!
//! let set = vec![
//!     LabeledFeature::new("ana", vec![0.9, 0.1]),
//!     LabeledFeature::new("ben", vec![0.5, 0.5]),
//!     LabeledFeature::new("cho", vec![0.0, 1.0]),
//! ];
//! let me = FeatureVector::from(vec![0.8, 0.2]);
//!
//! let prediction = KnnMatcher::default().predict(&set, &me).unwrap();
//! assert_eq!(prediction.user_id, "ben");
//! ```
//!
//! ## Observability
//!
//! Install a [`KnnMetrics`] implementation via [`set_knn_metrics`] to record
//! per-prediction latency and candidate counts.

pub mod distance;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod types;

pub use crate::distance::euclidean_distance;
pub use crate::engine::{predict, KnnMatcher};
pub use crate::history::PredictionHistory;
pub use crate::metrics::{set_knn_metrics, KnnMetrics};
pub use crate::types::{
    KnnConfig, KnnError, LabeledFeature, LabeledFeatureSet, Neighbor, Prediction,
};
