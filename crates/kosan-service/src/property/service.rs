//! Property listing service.

use std::sync::Arc;

use kosan_core::error::AppError;
use kosan_core::result::AppResult;
use kosan_core::types::{PageRequest, PageResponse, PropertyId};
use kosan_database::store::{PropertyQuery, PropertyStore};
use kosan_entity::property::{Property, PropertyWithRooms};

/// Read-only access to listed properties.
#[derive(Clone)]
pub struct PropertyService {
    properties: Arc<dyn PropertyStore>,
}

impl PropertyService {
    /// Creates a new property service.
    pub fn new(properties: Arc<dyn PropertyStore>) -> Self {
        Self { properties }
    }

    /// Search properties by city and name fragment. Blank filters are ignored.
    pub async fn search(
        &self,
        query: PropertyQuery,
        page: PageRequest,
    ) -> AppResult<PageResponse<Property>> {
        let query = PropertyQuery {
            city: non_blank(query.city),
            text: non_blank(query.text),
        };
        self.properties.search_properties(&query, &page).await
    }

    /// A property with all of its rooms.
    pub async fn get_with_rooms(&self, id: PropertyId) -> AppResult<PropertyWithRooms> {
        let property = self
            .properties
            .find_property(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Property {id} not found")))?;
        let rooms = self.properties.find_rooms(id).await?;
        Ok(PropertyWithRooms { property, rooms })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
