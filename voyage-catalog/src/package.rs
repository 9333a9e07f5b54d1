use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable travel package.
///
/// Immutable from the booking flow's perspective; only read at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Gallery image URLs, in display order.
    pub images: Vec<String>,
    /// Price in major currency units, always > 0.
    pub price: Decimal,
    pub duration_days: i32,
    /// Selling points, in display order.
    pub highlights: Vec<String>,
    pub destination_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
