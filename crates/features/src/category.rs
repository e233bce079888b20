//! Closed category enumerations for tasting records.
//!
//! Declaration order is part of the public contract: a category's position in
//! [`Category::BUCKETS`] is the index of its histogram bucket inside a
//! [`crate::FeatureVector`]. Reordering, inserting, or removing a member
//! changes the meaning of every stored vector and must be accompanied by a
//! bump of [`crate::FEATURE_SCHEMA_VERSION`].
//!
//! Every enumeration carries a sentinel `Default` member for records where the
//! user left the field unset. `Default` never gets a histogram bucket.

use serde::{Deserialize, Serialize};

/// Shared surface of the categorical attributes that are histogrammed.
pub trait Category: Copy + Eq + 'static {
    /// The unset sentinel.
    const DEFAULT: Self;

    /// Non-default members in bucket order.
    const BUCKETS: &'static [Self];

    /// `true` for the unset sentinel.
    fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Histogram bucket for this value, `None` for the sentinel.
    fn bucket_index(self) -> Option<usize> {
        Self::BUCKETS.iter().position(|member| *member == self)
    }
}

/// Coffee-growing region of the beans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    #[default]
    Default,
    Brazil,
    Colombia,
    CostaRica,
    Ethiopia,
    Guatemala,
    Honduras,
    Indonesia,
    Jamaica,
    Kenya,
    Mexico,
    Peru,
    Vietnam,
    Yemen,
}

impl Category for Origin {
    const DEFAULT: Self = Origin::Default;
    const BUCKETS: &'static [Self] = &[
        Origin::Brazil,
        Origin::Colombia,
        Origin::CostaRica,
        Origin::Ethiopia,
        Origin::Guatemala,
        Origin::Honduras,
        Origin::Indonesia,
        Origin::Jamaica,
        Origin::Kenya,
        Origin::Mexico,
        Origin::Peru,
        Origin::Vietnam,
        Origin::Yemen,
    ];
}

/// Brewing technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrewMethod {
    #[default]
    Default,
    Espresso,
    PourOver,
    FrenchPress,
    ColdBrew,
    AeroPress,
    Moka,
    Drip,
    Siphon,
    Turkish,
}

impl Category for BrewMethod {
    const DEFAULT: Self = BrewMethod::Default;
    const BUCKETS: &'static [Self] = &[
        BrewMethod::Espresso,
        BrewMethod::PourOver,
        BrewMethod::FrenchPress,
        BrewMethod::ColdBrew,
        BrewMethod::AeroPress,
        BrewMethod::Moka,
        BrewMethod::Drip,
        BrewMethod::Siphon,
        BrewMethod::Turkish,
    ];
}

/// Dominant flavor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Taste {
    #[default]
    Default,
    Fruity,
    Floral,
    Nutty,
    Chocolatey,
    Caramel,
    Spicy,
    Earthy,
    Citrus,
    Bitter,
}

impl Category for Taste {
    const DEFAULT: Self = Taste::Default;
    const BUCKETS: &'static [Self] = &[
        Taste::Fruity,
        Taste::Floral,
        Taste::Nutty,
        Taste::Chocolatey,
        Taste::Caramel,
        Taste::Spicy,
        Taste::Earthy,
        Taste::Citrus,
        Taste::Bitter,
    ];
}

/// Half-star rating tier.
///
/// Ratings are not histogrammed; they contribute through [`Rating::value`] to
/// the mean-rating scalar, where `Default` counts as `0.0` instead of being
/// skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    #[default]
    Default,
    One,
    OneHalf,
    Two,
    TwoHalf,
    Three,
    ThreeHalf,
    Four,
    FourHalf,
    Five,
}

impl Rating {
    /// Highest value any tier maps to.
    pub const MAX_VALUE: f64 = 5.0;

    /// Tiers in ascending order, sentinel first.
    pub const ALL: [Rating; 10] = [
        Rating::Default,
        Rating::One,
        Rating::OneHalf,
        Rating::Two,
        Rating::TwoHalf,
        Rating::Three,
        Rating::ThreeHalf,
        Rating::Four,
        Rating::FourHalf,
        Rating::Five,
    ];

    /// Star value of this tier: `Default` is `0.0`, `One` is `1.0`, and each
    /// following tier adds half a star up to `Five` at `5.0`.
    pub fn value(self) -> f64 {
        match self {
            Rating::Default => 0.0,
            Rating::One => 1.0,
            Rating::OneHalf => 1.5,
            Rating::Two => 2.0,
            Rating::TwoHalf => 2.5,
            Rating::Three => 3.0,
            Rating::ThreeHalf => 3.5,
            Rating::Four => 4.0,
            Rating::FourHalf => 4.5,
            Rating::Five => 5.0,
        }
    }

    /// Inverse of [`Rating::value`] for documents that store a numeric star
    /// count. Values that do not land exactly on a tier return `None`.
    pub fn from_value(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.value() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_exclude_default() {
        assert!(!Origin::BUCKETS.contains(&Origin::Default));
        assert!(!BrewMethod::BUCKETS.contains(&BrewMethod::Default));
        assert!(!Taste::BUCKETS.contains(&Taste::Default));
        assert_eq!(Origin::Default.bucket_index(), None);
        assert!(Taste::DEFAULT.is_default());
    }

    #[test]
    fn bucket_index_follows_declaration_order() {
        assert_eq!(Origin::Brazil.bucket_index(), Some(0));
        assert_eq!(Origin::CostaRica.bucket_index(), Some(2));
        assert_eq!(Origin::Yemen.bucket_index(), Some(12));
        assert_eq!(BrewMethod::ColdBrew.bucket_index(), Some(3));
        assert_eq!(Taste::Bitter.bucket_index(), Some(8));
    }

    #[test]
    fn rating_values_step_by_half_star() {
        assert_eq!(Rating::Default.value(), 0.0);
        assert_eq!(Rating::One.value(), 1.0);
        assert_eq!(Rating::Five.value(), Rating::MAX_VALUE);
        for pair in Rating::ALL[1..].windows(2) {
            assert_eq!(pair[1].value() - pair[0].value(), 0.5);
        }
    }

    #[test]
    fn rating_from_value_round_trips_tiers() {
        for tier in Rating::ALL {
            assert_eq!(Rating::from_value(tier.value()), Some(tier));
        }
        assert_eq!(Rating::from_value(0.5), None);
        assert_eq!(Rating::from_value(5.5), None);
    }

    #[test]
    fn serde_uses_document_spelling() {
        assert_eq!(
            serde_json::to_string(&Origin::CostaRica).unwrap(),
            "\"COSTA_RICA\""
        );
        assert_eq!(
            serde_json::to_string(&BrewMethod::ColdBrew).unwrap(),
            "\"COLD_BREW\""
        );
        let rating: Rating = serde_json::from_str("\"ONE_HALF\"").unwrap();
        assert_eq!(rating, Rating::OneHalf);
    }
}
