//! Unit of Work - centralized repository access.
//!
//! Services reach every repository through one handle so that they can be
//! wired against a live database or against mocks in tests.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{CharacterRepository, CharacterStore, LocationRepository, LocationStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get character repository
    fn characters(&self) -> Arc<dyn CharacterRepository>;

    /// Get location repository
    fn locations(&self) -> Arc<dyn LocationRepository>;
}

/// Concrete implementation of UnitOfWork backed by SeaORM stores
pub struct Persistence {
    character_repo: Arc<CharacterStore>,
    location_repo: Arc<LocationStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            character_repo: Arc::new(CharacterStore::new(db.clone())),
            location_repo: Arc::new(LocationStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn characters(&self) -> Arc<dyn CharacterRepository> {
        self.character_repo.clone()
    }

    fn locations(&self) -> Arc<dyn LocationRepository> {
        self.location_repo.clone()
    }
}
