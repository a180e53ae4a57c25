//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod character_repository;
pub(crate) mod entities;
mod location_repository;

pub use character_repository::{CharacterRepository, CharacterStore};
pub use location_repository::{LocationRepository, LocationStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use character_repository::MockCharacterRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use location_repository::MockLocationRepository;
