//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and reach repositories through the Unit of Work.

mod character_service;
pub mod container;
mod location_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use character_service::{CharacterManager, CharacterService};
pub use location_service::{LocationManager, LocationService};
