//! # brewmatch Feature Encoding
//!
//! This crate turns a user's tasting history into a fixed-length numeric
//! [`FeatureVector`] that summarizes their preferences. The vectors are the
//! input to the `knn` crate, which compares users by Euclidean distance.
//!
//! ## Contract
//!
//! - [`encode`] is a pure function of the record slice: no I/O, no clocks, no
//!   global state. The same records in the same order always produce a
//!   bit-identical vector.
//! - Vector length is fixed by [`FeatureLayout::CURRENT`] and does not depend
//!   on how many records were supplied.
//! - An empty record slice is rejected with [`FeatureError::InsufficientData`]
//!   rather than producing `NaN` components.
//!
//! ## Encoding
//!
//! 1.  **Histograms**: for origin, brew method and taste, each non-default
//!     category value gets one bucket holding `count / total_records`. Records
//!     whose attribute is the `Default` sentinel add to the denominator only,
//!     so a segment sums to less than `1.0` in proportion to unset values.
//!
//! 2.  **Mean rating**: each rating tier is mapped to its star value (`Default`
//!     counts as `0.0`), averaged over all records and divided by `5.0`.
//!
//! ## Example Usage
//!
//! ```
//! use features::{encode, BrewMethod, FeatureLayout, Origin, Rating, Taste, TastingRecord};
//!
//! let records = vec![
//!     TastingRecord::new(Origin::Kenya, BrewMethod::PourOver, Taste::Citrus, Rating::Five),
//!     TastingRecord::new(Origin::Kenya, BrewMethod::Espresso, Taste::Fruity, Rating::Four),
//! ];
//!
//! let vector = encode(&records).unwrap();
//! assert_eq!(vector.len(), FeatureLayout::CURRENT.len());
//! assert_eq!(vector.segments().unwrap().rating, 0.9);
//! ```
//!
pub mod category;
mod error;
pub mod record;
pub mod vector;

pub use crate::category::{BrewMethod, Category, Origin, Rating, Taste};
pub use crate::error::FeatureError;
pub use crate::record::TastingRecord;
pub use crate::vector::{FeatureLayout, FeatureSegments, FeatureVector};

use tracing::debug;

/// Encoding schema version.
///
/// Bumped whenever category order or the encoding itself changes, since
/// either makes previously stored vectors incomparable with new ones.
pub const FEATURE_SCHEMA_VERSION: u16 = 1;

/// Encode one user's tasting records into a [`FeatureVector`].
pub fn encode(records: &[TastingRecord]) -> Result<FeatureVector, FeatureError> {
    if records.is_empty() {
        return Err(FeatureError::InsufficientData);
    }

    let layout = FeatureLayout::CURRENT;
    let mut values = Vec::with_capacity(layout.len());
    values.extend(histogram(records.iter().map(|r| r.origin))?);
    values.extend(histogram(records.iter().map(|r| r.brew_method))?);
    values.extend(histogram(records.iter().map(|r| r.taste))?);
    values.push(mean_rating(records)?);

    debug!(
        records = records.len(),
        dimensions = values.len(),
        "features.encode"
    );
    Ok(FeatureVector::from(values))
}

/// Normalized histogram over the non-default members of `C`.
///
/// The result has exactly `C::BUCKETS.len()` entries. Sentinel values count
/// toward the total but fill no bucket.
pub fn histogram<C, I>(values: I) -> Result<Vec<f64>, FeatureError>
where
    C: Category,
    I: IntoIterator<Item = C>,
{
    let mut counts = vec![0usize; C::BUCKETS.len()];
    let mut total = 0usize;
    for value in values {
        total += 1;
        if let Some(bucket) = value.bucket_index() {
            counts[bucket] += 1;
        }
    }
    if total == 0 {
        return Err(FeatureError::InsufficientData);
    }

    let total = total as f64;
    Ok(counts.into_iter().map(|c| c as f64 / total).collect())
}

/// Mean star rating across `records`, normalized to `[0, 1]`.
pub fn mean_rating(records: &[TastingRecord]) -> Result<f64, FeatureError> {
    if records.is_empty() {
        return Err(FeatureError::InsufficientData);
    }
    let sum: f64 = records.iter().map(|r| r.rating.value()).sum();
    Ok(sum / records.len() as f64 / Rating::MAX_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn record(origin: Origin, brew: BrewMethod, taste: Taste, rating: Rating) -> TastingRecord {
        TastingRecord::new(origin, brew, taste, rating)
    }

    fn costa_rica_fixture() -> Vec<TastingRecord> {
        vec![
            record(Origin::CostaRica, BrewMethod::ColdBrew, Taste::Fruity, Rating::Five),
            record(Origin::CostaRica, BrewMethod::ColdBrew, Taste::Nutty, Rating::Five),
            record(Origin::CostaRica, BrewMethod::ColdBrew, Taste::Fruity, Rating::Five),
            record(Origin::CostaRica, BrewMethod::ColdBrew, Taste::Chocolatey, Rating::Five),
            record(Origin::Kenya, BrewMethod::Espresso, Taste::Citrus, Rating::Two),
        ]
    }

    #[test]
    fn empty_input_is_insufficient_data() {
        assert_eq!(encode(&[]), Err(FeatureError::InsufficientData));
        assert_eq!(mean_rating(&[]), Err(FeatureError::InsufficientData));
        assert_eq!(
            histogram(std::iter::empty::<Origin>()),
            Err(FeatureError::InsufficientData)
        );
    }

    #[test]
    fn length_is_independent_of_record_count() {
        let one = encode(&costa_rica_fixture()[..1]).unwrap();
        let five = encode(&costa_rica_fixture()).unwrap();
        assert_eq!(one.len(), FeatureLayout::CURRENT.len());
        assert_eq!(five.len(), FeatureLayout::CURRENT.len());
    }

    #[test]
    fn costa_rica_fixture_encodes_expected_vector() {
        let vector = encode(&costa_rica_fixture()).unwrap();
        let mut expected = vec![0.0; 32];
        // origin: COSTA_RICA x4, KENYA x1
        expected[2] = 0.8;
        expected[8] = 0.2;
        // brew: ESPRESSO x1, COLD_BREW x4
        expected[13] = 0.2;
        expected[13 + 3] = 0.8;
        // taste: FRUITY x2, NUTTY x1, CHOCOLATEY x1, CITRUS x1
        expected[22] = 0.4;
        expected[22 + 2] = 0.2;
        expected[22 + 3] = 0.2;
        expected[22 + 7] = 0.2;
        // (5 + 5 + 5 + 5 + 2) / 5 / 5
        expected[31] = 0.88;

        for (i, (got, want)) in vector.as_slice().iter().zip(&expected).enumerate() {
            assert!((got - want).abs() < EPS, "component {i}: got {got}, want {want}");
        }
    }

    #[test]
    fn segments_sum_to_one_without_defaults() {
        let vector = encode(&costa_rica_fixture()).unwrap();
        let segments = vector.segments().unwrap();
        for segment in [segments.origin, segments.brew_method, segments.taste] {
            let sum: f64 = segment.iter().sum();
            assert!((sum - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn default_values_shrink_segment_mass() {
        let records = vec![
            record(Origin::Brazil, BrewMethod::Default, Taste::Default, Rating::Four),
            record(Origin::Default, BrewMethod::Default, Taste::Caramel, Rating::Four),
            record(Origin::Default, BrewMethod::Moka, Taste::Default, Rating::Four),
            record(Origin::Default, BrewMethod::Default, Taste::Default, Rating::Four),
        ];
        let vector = encode(&records).unwrap();
        let segments = vector.segments().unwrap();

        let origin_sum: f64 = segments.origin.iter().sum();
        let brew_sum: f64 = segments.brew_method.iter().sum();
        let taste_sum: f64 = segments.taste.iter().sum();
        assert!((origin_sum - 0.25).abs() < EPS);
        assert!((brew_sum - 0.25).abs() < EPS);
        assert!((taste_sum - 0.25).abs() < EPS);
        assert!((segments.rating - 0.8).abs() < EPS);
    }

    #[test]
    fn default_rating_counts_as_zero_in_mean() {
        let records = vec![
            record(Origin::Peru, BrewMethod::Drip, Taste::Earthy, Rating::Five),
            record(Origin::Peru, BrewMethod::Drip, Taste::Earthy, Rating::Default),
        ];
        assert!((mean_rating(&records).unwrap() - 0.5).abs() < EPS);
    }

    #[test]
    fn mean_rating_for_five_and_four_mix() {
        let mut records = vec![record(Origin::Yemen, BrewMethod::Turkish, Taste::Spicy, Rating::Five); 4];
        records.push(record(Origin::Yemen, BrewMethod::Turkish, Taste::Spicy, Rating::Four));
        // (5 * 4 + 4) / 5 / 5
        assert!((mean_rating(&records).unwrap() - 0.96).abs() < EPS);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = encode(&costa_rica_fixture()).unwrap();
        let b = encode(&costa_rica_fixture()).unwrap();
        assert_eq!(a, b);
    }
}
