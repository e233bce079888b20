//! Caller-owned record of past predictions.
//!
//! The matcher itself keeps no state between calls. Callers that want to look
//! up the most recent result later pass a [`PredictionHistory`] to
//! [`crate::KnnMatcher::predict_recorded`].

use std::collections::VecDeque;

use crate::types::Prediction;

/// Bounded, oldest-first log of predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionHistory {
    entries: VecDeque<Prediction>,
    capacity: usize,
}

impl PredictionHistory {
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Create a history that keeps at most `capacity` predictions.
    ///
    /// A capacity of zero is raised to one so `last` stays meaningful.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a prediction, evicting the oldest one when full.
    pub fn record(&mut self, prediction: Prediction) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(prediction);
    }

    /// Most recent prediction.
    pub fn last(&self) -> Option<&Prediction> {
        self.entries.back()
    }

    /// Identifier of the most recent prediction.
    pub fn last_user_id(&self) -> Option<&str> {
        self.last().map(|p| p.user_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Predictions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for PredictionHistory {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(user_id: &str) -> Prediction {
        Prediction {
            user_id: user_id.into(),
            distance: 0.0,
            rank: 1,
            k: 1,
            candidates: 2,
        }
    }

    #[test]
    fn last_tracks_most_recent() {
        let mut history = PredictionHistory::default();
        assert!(history.last().is_none());
        history.record(prediction("a"));
        history.record(prediction("b"));
        assert_eq!(history.last_user_id(), Some("b"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = PredictionHistory::with_capacity(2);
        for id in ["a", "b", "c"] {
            history.record(prediction(id));
        }
        let ids: Vec<&str> = history.iter().map(|p| p.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut history = PredictionHistory::with_capacity(0);
        assert_eq!(history.capacity(), 1);
        history.record(prediction("a"));
        history.record(prediction("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.last_user_id(), Some("b"));
    }
}
