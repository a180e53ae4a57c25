//! HTTP request handlers.

pub mod character_handler;
mod fields;
pub mod location_handler;

pub use character_handler::character_routes;
pub use location_handler::location_routes;
