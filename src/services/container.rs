//! Service Container - Centralized service access.
//!
//! Builds every application service once over a shared Unit of Work and
//! hands out cheap `Arc` clones.

use std::sync::Arc;

use super::{CharacterManager, CharacterService, LocationManager, LocationService};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get character service
    fn characters(&self) -> Arc<dyn CharacterService>;

    /// Get location service
    fn locations(&self) -> Arc<dyn LocationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    character_service: Arc<dyn CharacterService>,
    location_service: Arc<dyn LocationService>,
}

impl Services {
    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            character_service: Arc::new(CharacterManager::new(uow.clone())),
            location_service: Arc::new(LocationManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn characters(&self) -> Arc<dyn CharacterService> {
        self.character_service.clone()
    }

    fn locations(&self) -> Arc<dyn LocationService> {
        self.location_service.clone()
    }
}
