//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{CharacterService, LocationService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Character service
    pub character_service: Arc<dyn CharacterService>,
    /// Location service
    pub location_service: Arc<dyn LocationService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database.
    ///
    /// Services are built through the [`Services`] container over a shared
    /// Unit of Work.
    pub fn from_database(database: Arc<Database>) -> Self {
        let container = Services::from_connection(database.get_connection());

        Self {
            character_service: container.characters(),
            location_service: container.locations(),
            database,
        }
    }
}
