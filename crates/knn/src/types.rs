use features::FeatureVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a [`crate::KnnMatcher`].
///
/// Cheap to clone and serde-friendly so it can be embedded in higher-level
/// configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnnConfig {
    /// Configuration schema version.
    #[serde(default = "KnnConfig::default_version")]
    pub version: u32,
    /// Neighbor position selector passed to `predict`.
    #[serde(default = "KnnConfig::default_k")]
    pub k: usize,
    /// Compute candidate distances on the rayon thread pool.
    #[serde(default)]
    pub use_parallel: bool,
}

impl KnnConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_k() -> usize {
        1
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.version < 1 {
            return Err(KnnError::InvalidConfig(
                "knn.version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            k: Self::default_k(),
            use_parallel: false,
        }
    }
}

/// One comparison candidate: another user's vector and identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledFeature {
    pub user_id: String,
    pub features: FeatureVector,
}

impl LabeledFeature {
    pub fn new(user_id: impl Into<String>, features: impl Into<FeatureVector>) -> Self {
        Self {
            user_id: user_id.into(),
            features: features.into(),
        }
    }
}

/// Candidates compared in one `predict` call.
pub type LabeledFeatureSet = Vec<LabeledFeature>;

/// A candidate with its distance to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub user_id: String,
    pub distance: f64,
    /// Index of the candidate in the input set.
    pub position: usize,
}

/// Result of a `predict` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Identifier of the selected similar user.
    pub user_id: String,
    /// Distance from the target to the selected user.
    pub distance: f64,
    /// Zero-based position of the selected user in distance order.
    pub rank: usize,
    /// `k` the prediction was made with.
    pub k: usize,
    /// Number of candidates that were compared.
    pub candidates: usize,
}

/// Errors raised by the matcher.
///
/// None of these are transient; each reports a violated precondition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KnnError {
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("no comparable users: need more than {k} candidates, got {available}")]
    EmptyComparisonSet { k: usize, available: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
