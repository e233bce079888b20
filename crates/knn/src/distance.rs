//! Distance metric used to compare preference vectors.

use crate::types::KnnError;

/// Euclidean (L2) distance between two equal-length vectors.
///
/// Two empty vectors are at distance `0.0`. Vectors of different length are a
/// data error and yield [`KnnError::DimensionMismatch`].
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64, KnnError> {
    if a.len() != b.len() {
        return Err(KnnError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}
