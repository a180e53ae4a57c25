//! Location service - Handles location use cases and the nearby search.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Location, LocationChanges, NearQuery, NewLocation};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Location service trait for dependency injection.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// List all locations
    async fn list_locations(&self) -> AppResult<Vec<Location>>;

    /// Get location by ID
    async fn get_location(&self, id: i64) -> AppResult<Location>;

    /// Create a location for an existing character
    async fn create_location(&self, data: NewLocation) -> AppResult<Location>;

    /// Replace every field of a location
    async fn replace_location(&self, id: i64, data: NewLocation) -> AppResult<Location>;

    /// Update only the given fields
    async fn update_location(&self, id: i64, changes: LocationChanges) -> AppResult<Location>;

    /// Delete location by ID
    async fn delete_location(&self, id: i64) -> AppResult<()>;

    /// Locations within a radius, sorted by distance
    async fn near(&self, query: NearQuery) -> AppResult<Vec<Location>>;
}

/// Concrete implementation of LocationService using Unit of Work.
pub struct LocationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LocationManager<U> {
    /// Create new location service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Reject references to characters that do not exist
    async fn ensure_character(&self, character_id: i64) -> AppResult<()> {
        if self.uow.characters().exists(character_id).await? {
            Ok(())
        } else {
            Err(AppError::field(
                "character",
                format!("Invalid pk \"{}\" - object does not exist.", character_id),
            ))
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> LocationService for LocationManager<U> {
    async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.uow.locations().list(None).await
    }

    async fn get_location(&self, id: i64) -> AppResult<Location> {
        self.uow.locations().find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_location(&self, data: NewLocation) -> AppResult<Location> {
        self.ensure_character(data.character_id).await?;
        let location = self.uow.locations().create(data).await?;
        tracing::debug!(id = location.id, character = location.character_id, "Location created");
        Ok(location)
    }

    async fn replace_location(&self, id: i64, data: NewLocation) -> AppResult<Location> {
        let repo = self.uow.locations();
        repo.find_by_id(id).await?.ok_or_not_found()?;
        self.ensure_character(data.character_id).await?;

        repo.save(Location {
            id,
            character_id: data.character_id,
            timestamp: data.timestamp,
            lat: data.lat,
            lon: data.lon,
        })
        .await
    }

    async fn update_location(&self, id: i64, changes: LocationChanges) -> AppResult<Location> {
        let repo = self.uow.locations();
        let mut location = repo.find_by_id(id).await?.ok_or_not_found()?;
        if let Some(character_id) = changes.character_id {
            self.ensure_character(character_id).await?;
        }
        location.apply(changes);
        repo.save(location).await
    }

    async fn delete_location(&self, id: i64) -> AppResult<()> {
        self.uow.locations().delete(id).await
    }

    async fn near(&self, query: NearQuery) -> AppResult<Vec<Location>> {
        let candidates = self.uow.locations().list(query.character_id).await?;
        let total = candidates.len();
        let hits = query.select(candidates);
        tracing::debug!(
            candidates = total,
            hits = hits.len(),
            max_distance = query.max_distance,
            "Nearby search"
        );
        Ok(hits)
    }
}
