//! In-memory property and room store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

use kosan_core::result::AppResult;
use kosan_core::types::{PageRequest, PageResponse, PropertyId, RoomId};
use kosan_entity::pricing::PricingPlan;
use kosan_entity::property::{Property, Room};

use crate::store::{PropertyQuery, PropertyStore};

#[derive(Debug, Default)]
struct Listings {
    properties: HashMap<PropertyId, Property>,
    rooms: HashMap<RoomId, Room>,
}

/// Property store held in process memory, seeded through [`Self::add_property`]
/// and [`Self::add_room`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertyStore {
    listings: Arc<RwLock<Listings>>,
}

impl MemoryPropertyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property.
    pub async fn add_property(&self, property: Property) {
        self.listings
            .write()
            .await
            .properties
            .insert(property.id, property);
    }

    /// Insert or replace a room.
    pub async fn add_room(&self, room: Room) {
        self.listings.write().await.rooms.insert(room.id, room);
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn find_property(&self, id: PropertyId) -> AppResult<Option<Property>> {
        Ok(self.listings.read().await.properties.get(&id).cloned())
    }

    async fn search_properties(
        &self,
        query: &PropertyQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Property>> {
        let listings = self.listings.read().await;
        let mut found: Vec<Property> = listings
            .properties
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(PageResponse::from_vec(found, page))
    }

    async fn find_rooms(&self, property_id: PropertyId) -> AppResult<Vec<Room>> {
        let listings = self.listings.read().await;
        let mut rooms: Vec<Room> = listings
            .rooms
            .values()
            .filter(|r| r.property_id == property_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rooms)
    }

    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        Ok(self.listings.read().await.rooms.get(&id).cloned())
    }

    async fn update_pricing_plan(
        &self,
        room_id: RoomId,
        plan: &PricingPlan,
    ) -> AppResult<Option<Room>> {
        let mut listings = self.listings.write().await;
        Ok(listings.rooms.get_mut(&room_id).map(|room| {
            room.pricing_plan = Json(plan.clone());
            room.clone()
        }))
    }
}
