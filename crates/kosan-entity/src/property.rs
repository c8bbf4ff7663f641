//! Property and room entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use kosan_core::types::{PropertyId, RoomId, UserId};

use crate::pricing::{PriceTable, PricingPlan};

/// A listed property (a kos building) owned by a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Property {
    /// Property identifier.
    pub id: PropertyId,
    /// Partner who owns the listing.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// City used for search.
    pub city: String,
    /// Street address.
    pub address: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
}

/// A bookable room within a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Room identifier.
    pub id: RoomId,
    /// Owning property.
    pub property_id: PropertyId,
    /// Display name, e.g. `"Kamar 2A"`.
    pub name: String,
    /// Prices per duration key.
    pub pricing_plan: Json<PricingPlan>,
    /// Whether the room accepts bookings.
    pub is_active: bool,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// The room's prices as a single key → entry table.
    pub fn price_table(&self) -> PriceTable {
        self.pricing_plan.price_table()
    }
}

/// A property together with its rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyWithRooms {
    /// The property.
    #[serde(flatten)]
    pub property: Property,
    /// Its rooms, active or not.
    pub rooms: Vec<Room>,
}
