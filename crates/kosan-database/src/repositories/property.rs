//! Property and room repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use kosan_core::error::{AppError, ErrorKind};
use kosan_core::result::AppResult;
use kosan_core::types::{PageRequest, PageResponse, PropertyId, RoomId};
use kosan_entity::pricing::PricingPlan;
use kosan_entity::property::{Property, Room};

use crate::store::{PropertyQuery, PropertyStore};

/// Repository for property and room rows.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    /// Creates a new property repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyStore for PropertyRepository {
    async fn find_property(&self, id: PropertyId) -> AppResult<Option<Property>> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find property", e))
    }

    async fn search_properties(
        &self,
        query: &PropertyQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Property>> {
        let filter = "WHERE ($1::text IS NULL OR LOWER(city) = LOWER($1)) \
                      AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM properties {filter}"))
            .bind(query.city.as_deref())
            .bind(query.text.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count properties", e)
            })?;

        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT * FROM properties {filter} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(query.city.as_deref())
        .bind(query.text.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search properties", e))?;

        Ok(PageResponse::new(
            properties,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn find_rooms(&self, property_id: PropertyId) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE property_id = $1 ORDER BY name")
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))
    }

    async fn find_room(&self, id: RoomId) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    async fn update_pricing_plan(
        &self,
        room_id: RoomId,
        plan: &PricingPlan,
    ) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("UPDATE rooms SET pricing_plan = $2 WHERE id = $1 RETURNING *")
            .bind(room_id)
            .bind(Json(plan))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update pricing plan", e)
            })
    }
}
