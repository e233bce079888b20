//! Workspace umbrella crate for brewmatch.
//!
//! This crate stitches feature encoding and nearest-neighbor matching together
//! so the recommendation layer of the coffee journal can ask one question:
//! "which other user tastes most like this one?"
//!
//! ```
//! use brewmatch::{
//!     find_similar_user, BrewMethod, Origin, Rating, RecommendConfig, Taste, TastingRecord,
//!     UserHistory,
//! };
//!
//! let espresso = TastingRecord::new(Origin::Brazil, BrewMethod::Espresso, Taste::Nutty, Rating::Five);
//! let filter = TastingRecord::new(Origin::Kenya, BrewMethod::PourOver, Taste::Citrus, Rating::Four);
//!
//! let others = vec![
//!     UserHistory::new("twin", vec![espresso.clone()]),
//!     UserHistory::new("close", vec![espresso.clone(), filter.clone()]),
//!     UserHistory::new("far", vec![filter.clone()]),
//! ];
//!
//! let prediction = find_similar_user(&[espresso], &others, &RecommendConfig::default()).unwrap();
//! assert_eq!(prediction.user_id, "close");
//! ```

pub mod config;

pub use features::{
    BrewMethod, Category, FEATURE_SCHEMA_VERSION, FeatureError, FeatureLayout, FeatureSegments,
    FeatureVector, Origin, Rating, Taste, TastingRecord, encode, histogram, mean_rating,
};
pub use knn::{
    KnnConfig, KnnError, KnnMatcher, KnnMetrics, LabeledFeature, LabeledFeatureSet, Neighbor,
    Prediction, PredictionHistory, euclidean_distance, predict, set_knn_metrics,
};

pub use crate::config::{BrewmatchConfig, ConfigLoadError};

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, info, warn};

/// Errors that can occur while finding a similar user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecommendError {
    #[error("feature encoding failed for current user: {0}")]
    Features(#[from] FeatureError),
    #[error("feature encoding failed for user {user_id}: {source}")]
    OtherUser {
        user_id: String,
        #[source]
        source: FeatureError,
    },
    #[error("matching failed: {0}")]
    Knn(#[from] KnnError),
}

impl RecommendError {
    /// Text suitable for showing to the end user instead of the raw error.
    pub fn user_message(&self) -> &'static str {
        match self {
            RecommendError::Features(FeatureError::InsufficientData) => {
                "not enough history to personalize"
            }
            RecommendError::Knn(KnnError::EmptyComparisonSet { .. }) => "no comparable users",
            RecommendError::OtherUser { .. }
            | RecommendError::Knn(KnnError::DimensionMismatch { .. })
            | RecommendError::Knn(KnnError::InvalidConfig(_)) => {
                "recommendations are unavailable right now"
            }
        }
    }
}

/// Settings for the recommendation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendConfig {
    #[serde(default)]
    pub knn: KnnConfig,
    /// Skip other users that have no records instead of failing the batch.
    #[serde(default = "RecommendConfig::default_skip_empty_histories")]
    pub skip_empty_histories: bool,
    /// User id to drop from the comparison set, normally the requesting user.
    #[serde(default)]
    pub exclude_user_id: Option<String>,
}

impl RecommendConfig {
    pub(crate) fn default_skip_empty_histories() -> bool {
        true
    }

    pub fn with_knn(mut self, knn: KnnConfig) -> Self {
        self.knn = knn;
        self
    }

    pub fn with_exclude_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.exclude_user_id = Some(user_id.into());
        self
    }

    pub fn with_skip_empty_histories(mut self, skip: bool) -> Self {
        self.skip_empty_histories = skip;
        self
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            knn: KnnConfig::default(),
            skip_empty_histories: Self::default_skip_empty_histories(),
            exclude_user_id: None,
        }
    }
}

/// One user's identifier and tasting records, as loaded from the journey store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    pub user_id: String,
    #[serde(default)]
    pub records: Vec<TastingRecord>,
}

impl UserHistory {
    pub fn new(user_id: impl Into<String>, records: Vec<TastingRecord>) -> Self {
        Self {
            user_id: user_id.into(),
            records,
        }
    }
}

/// Encode every other user into a labeled comparison set.
pub fn build_labeled_set(
    others: &[UserHistory],
    cfg: &RecommendConfig,
) -> Result<LabeledFeatureSet, RecommendError> {
    let mut set = Vec::with_capacity(others.len());
    for user in others {
        if cfg.exclude_user_id.as_deref() == Some(user.user_id.as_str()) {
            continue;
        }
        match encode(&user.records) {
            Ok(features) => set.push(LabeledFeature {
                user_id: user.user_id.clone(),
                features,
            }),
            Err(FeatureError::InsufficientData) if cfg.skip_empty_histories => {
                warn!(user_id = %user.user_id, "skipping user without tasting history");
            }
            Err(source) => {
                return Err(RecommendError::OtherUser {
                    user_id: user.user_id.clone(),
                    source,
                });
            }
        }
    }
    Ok(set)
}

/// Find the other user whose tasting history is most similar to `current`.
pub fn find_similar_user(
    current: &[TastingRecord],
    others: &[UserHistory],
    cfg: &RecommendConfig,
) -> Result<Prediction, RecommendError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "brewmatch.find_similar_user",
        records = current.len(),
        others = others.len()
    );
    let _guard = span.enter();

    let result = find_similar_user_inner(current, others, cfg);
    let elapsed_micros = start.elapsed().as_micros();
    match &result {
        Ok(prediction) => info!(
            user_id = %prediction.user_id,
            distance = prediction.distance,
            candidates = prediction.candidates,
            elapsed_micros,
            "similar_user_found"
        ),
        Err(err) => warn!(error = %err, elapsed_micros, "similar_user_failure"),
    }
    result
}

fn find_similar_user_inner(
    current: &[TastingRecord],
    others: &[UserHistory],
    cfg: &RecommendConfig,
) -> Result<Prediction, RecommendError> {
    let target = encode(current)?;
    let set = build_labeled_set(others, cfg)?;
    let matcher = KnnMatcher::new(cfg.knn.clone())?;
    Ok(matcher.predict(&set, &target)?)
}
