//! Tasting record type consumed by the encoder.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::{BrewMethod, Origin, Rating, Taste};

/// One logged coffee experience ("journey").
///
/// Only the four categorical fields feed the encoder. The remaining fields
/// are carried so full journey documents deserialize without loss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TastingRecord {
    #[serde(default)]
    pub origin: Origin,
    #[serde(default)]
    pub brew_method: BrewMethod,
    #[serde(default)]
    pub taste: Taste,
    /// Accepts the tier name (`"FOUR_HALF"`) or a numeric star count (`4.5`).
    #[serde(default, deserialize_with = "deserialize_rating")]
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TastingRecord {
    /// Build a record from its categorical fields.
    pub fn new(origin: Origin, brew_method: BrewMethod, taste: Taste, rating: Rating) -> Self {
        Self {
            origin,
            brew_method,
            taste,
            rating,
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_shop_name(mut self, shop_name: impl Into<String>) -> Self {
        self.shop_name = Some(shop_name.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatingRepr {
    Tier(Rating),
    Stars(f64),
}

fn deserialize_rating<'de, D>(deserializer: D) -> Result<Rating, D::Error>
where
    D: Deserializer<'de>,
{
    match RatingRepr::deserialize(deserializer)? {
        RatingRepr::Tier(rating) => Ok(rating),
        RatingRepr::Stars(stars) => Rating::from_value(stars)
            .ok_or_else(|| D::Error::custom(format!("unsupported star rating {stars}"))),
    }
}
