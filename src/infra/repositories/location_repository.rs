//! Location repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::location::{self, ActiveModel, Entity as LocationEntity};
use crate::domain::{Location, NewLocation};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Location repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Find location by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Location>>;

    /// List locations in id order, optionally restricted to one character
    async fn list(&self, character_id: Option<i64>) -> AppResult<Vec<Location>>;

    /// Insert a new location
    async fn create(&self, data: NewLocation) -> AppResult<Location>;

    /// Persist every field of an existing location
    async fn save(&self, location: Location) -> AppResult<Location>;

    /// Delete location by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of LocationRepository
pub struct LocationStore {
    db: DatabaseConnection,
}

impl LocationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationRepository for LocationStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Location>> {
        let result = LocationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Location::from))
    }

    async fn list(&self, character_id: Option<i64>) -> AppResult<Vec<Location>> {
        let mut query = LocationEntity::find();
        if let Some(character_id) = character_id {
            query = query.filter(location::Column::CharacterId.eq(character_id));
        }

        let models = query
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Location::from).collect())
    }

    async fn create(&self, data: NewLocation) -> AppResult<Location> {
        let active_model = ActiveModel {
            id: NotSet,
            character_id: Set(data.character_id),
            timestamp: Set(data.timestamp),
            lat: Set(data.lat.degrees()),
            lon: Set(data.lon.degrees()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Location::from(model))
    }

    async fn save(&self, location: Location) -> AppResult<Location> {
        let active_model = ActiveModel {
            id: Set(location.id),
            character_id: Set(location.character_id),
            timestamp: Set(location.timestamp),
            lat: Set(location.lat.degrees()),
            lon: Set(location.lon.degrees()),
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        })?;
        Ok(Location::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = LocationEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
