//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! Contains: Entities, Value Objects, query objects and geographic math.

pub mod character;
pub mod coordinate;
pub mod geo;
pub mod location;
pub mod timestamp;

pub use character::{
    Character, CharacterChanges, CharacterFilter, CharacterOrderField, CharacterOrdering,
    NewCharacter,
};
pub use coordinate::{Coordinate, CoordinateError};
pub use geo::GeoPoint;
pub use location::{Location, LocationChanges, NearQuery, NewLocation};
