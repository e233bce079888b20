use thiserror::Error;

/// Errors that can occur while encoding tasting records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// No records were supplied, so no distribution can be computed.
    #[error("insufficient data: at least one tasting record is required")]
    InsufficientData,
}
