//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{character_handler, location_handler};
use crate::domain::{Character, Location};

/// OpenAPI documentation for the Breaking Bad API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Breaking Bad API",
        version = "0.1.0",
        description = "Characters of the Breaking Bad universe and where they have been seen",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Character endpoints
        character_handler::list_characters,
        character_handler::create_character,
        character_handler::get_character,
        character_handler::replace_character,
        character_handler::update_character,
        character_handler::delete_character,
        // Location endpoints
        location_handler::list_locations,
        location_handler::create_location,
        location_handler::near_locations,
        location_handler::get_location,
        location_handler::replace_location,
        location_handler::update_location,
        location_handler::delete_location,
    ),
    components(
        schemas(
            // Domain types
            Character,
            Location,
            // Request types
            character_handler::CharacterFields,
            location_handler::LocationFields,
        )
    ),
    tags(
        (name = "Characters", description = "Character management and search"),
        (name = "Locations", description = "Character sightings and nearby search")
    )
)]
pub struct ApiDoc;
