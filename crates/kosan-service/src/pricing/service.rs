//! Room pricing service.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use kosan_core::error::AppError;
use kosan_core::result::AppResult;
use kosan_core::types::{RoomId, Rupiah};
use kosan_database::store::PropertyStore;
use kosan_entity::duration::{DurationCatalog, DurationOption};
use kosan_entity::pricing::{PriceEntry, PriceTable};
use kosan_entity::property::Room;

use crate::context::RequestContext;

/// A catalog duration that can be booked on a particular room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookableDuration {
    /// The catalog option.
    #[serde(flatten)]
    pub option: DurationOption,
    /// Price for this room.
    pub price: Rupiah,
    /// Price formatted for display, e.g. `Rp 45.000`.
    pub formatted_price: String,
}

/// Catalog options with an active, positive price in `prices`, in catalog order.
pub fn bookable_durations(catalog: &DurationCatalog, prices: &PriceTable) -> Vec<BookableDuration> {
    catalog
        .iter()
        .filter_map(|option| {
            prices.bookable_price(&option.key).map(|price| BookableDuration {
                option: option.clone(),
                price,
                formatted_price: price.to_string(),
            })
        })
        .collect()
}

/// Reads and edits per-room price tables.
#[derive(Clone)]
pub struct PricingService {
    /// Duration catalog.
    catalog: Arc<DurationCatalog>,
    /// Property and room store.
    properties: Arc<dyn PropertyStore>,
}

impl PricingService {
    /// Creates a new pricing service.
    pub fn new(catalog: Arc<DurationCatalog>, properties: Arc<dyn PropertyStore>) -> Self {
        Self {
            catalog,
            properties,
        }
    }

    /// The durations a guest can pick for this room.
    pub async fn bookable_durations(&self, room_id: RoomId) -> AppResult<Vec<BookableDuration>> {
        let room = self.room(room_id).await?;
        Ok(bookable_durations(&self.catalog, &room.price_table()))
    }

    /// Set the price of one duration on a room the current user owns.
    ///
    /// A price of zero, or `active == false`, takes the duration off sale.
    pub async fn set_price(
        &self,
        ctx: &RequestContext,
        room_id: RoomId,
        key: &str,
        price: i64,
        active: bool,
    ) -> AppResult<Room> {
        let option = self
            .catalog
            .get(key)
            .ok_or_else(|| AppError::validation(format!("Unknown duration key '{key}'")))?;
        if price < 0 {
            return Err(AppError::validation("Price must not be negative"));
        }

        let room = self.room(room_id).await?;
        let property = self
            .properties
            .find_property(room.property_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Property {} not found", room.property_id))
            })?;
        if property.owner_id != ctx.user_id {
            return Err(AppError::forbidden("Only the property owner can edit prices"));
        }

        let mut plan = room.pricing_plan.0.clone();
        let entry = PriceEntry {
            price: Rupiah(price),
            active,
        };
        plan.set_entry(option.kind, key, entry);

        let updated = self
            .properties
            .update_pricing_plan(room_id, &plan)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;

        info!(
            room_id = %room_id,
            key = key,
            price = %entry.price,
            active = active,
            "Room price updated"
        );
        Ok(updated)
    }

    async fn room(&self, room_id: RoomId) -> AppResult<Room> {
        self.properties
            .find_room(room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))
    }
}
