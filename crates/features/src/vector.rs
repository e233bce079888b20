//! Feature vector representation and its segment layout.
//!
//! A vector is the concatenation of three normalized histograms followed by
//! one scalar:
//!
//! ```text
//! [ origin buckets | brew-method buckets | taste buckets | mean rating / 5 ]
//! ```
//!
//! The layout is derived from the category enumerations, so every vector
//! produced by one build of this crate has the same length.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::category::{BrewMethod, Category, Origin, Taste};

/// Segment lengths of a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLayout {
    pub origin: usize,
    pub brew_method: usize,
    pub taste: usize,
    pub rating: usize,
}

impl FeatureLayout {
    /// Layout for the enumerations compiled into this crate.
    pub const CURRENT: FeatureLayout = FeatureLayout {
        origin: Origin::BUCKETS.len(),
        brew_method: BrewMethod::BUCKETS.len(),
        taste: Taste::BUCKETS.len(),
        rating: 1,
    };

    /// Total number of components.
    pub const fn len(&self) -> usize {
        self.origin + self.brew_method + self.taste + self.rating
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn origin_range(&self) -> Range<usize> {
        0..self.origin
    }

    pub fn brew_range(&self) -> Range<usize> {
        let start = self.origin;
        start..start + self.brew_method
    }

    pub fn taste_range(&self) -> Range<usize> {
        let start = self.origin + self.brew_method;
        start..start + self.taste
    }

    /// Position of the mean-rating scalar.
    pub fn rating_index(&self) -> usize {
        self.origin + self.brew_method + self.taste
    }
}

/// Fixed-length numeric summary of one user's tasting history.
///
/// Vectors are derived snapshots: they are recomputed from records on demand
/// and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Borrow the vector split into its segments.
    ///
    /// Returns `None` when the length does not match [`FeatureLayout::CURRENT`],
    /// which happens for hand-built fixtures or vectors from another schema
    /// version.
    pub fn segments(&self) -> Option<FeatureSegments<'_>> {
        let layout = FeatureLayout::CURRENT;
        if self.0.len() != layout.len() {
            return None;
        }
        Some(FeatureSegments {
            origin: &self.0[layout.origin_range()],
            brew_method: &self.0[layout.brew_range()],
            taste: &self.0[layout.taste_range()],
            rating: self.0[layout.rating_index()],
        })
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        FeatureVector(values)
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Borrowed view over the segments of a [`FeatureVector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSegments<'a> {
    pub origin: &'a [f64],
    pub brew_method: &'a [f64],
    pub taste: &'a [f64],
    /// Mean rating normalized to `[0, 1]`.
    pub rating: f64,
}
