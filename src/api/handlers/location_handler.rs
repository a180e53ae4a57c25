//! Location handlers, including the nearby search.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

use super::fields::{check, present};
use crate::api::extractors::{collect_field_errors, ResourceId, ValidatedJson};
use crate::api::AppState;
use crate::config::{MSG_INVALID_DATETIME, MSG_INVALID_INTEGER, MSG_INVALID_NUMBER, MSG_NULL};
use crate::domain::{
    timestamp::parse_timestamp, Coordinate, Location, LocationChanges, NearQuery, NewLocation,
};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Raw location fields as sent by the client
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LocationFields {
    /// Id of an existing character
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i64>, example = 1)]
    pub character: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "2023-01-01T18:59:00.618Z")]
    pub timestamp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "35.084385")]
    pub lat: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "-106.650421")]
    pub lon: Option<Value>,
}

/// Location create/replace request; every field is required
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct LocationRequest(pub LocationFields);

/// Location partial update request
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct LocationPatchRequest(pub LocationFields);

/// Nearby search query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearQueryParams {
    /// `latitude,longitude` of the search origin (required)
    pub coordinates: Option<String>,
    /// Maximum distance in meters (required)
    pub distance: Option<String>,
    /// `1` (default) nearest first, anything else farthest first
    pub ascending: Option<String>,
    /// Only locations of this character
    pub character: Option<String>,
    /// Inclusive `start,end` timestamp range
    pub date_range: Option<String>,
}

fn parse_character(value: &Value) -> Result<i64, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) if s.trim().is_empty() => Err(MSG_NULL.to_string()),
        Value::Number(n) => n.as_i64().ok_or_else(|| MSG_INVALID_INTEGER.to_string()),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| MSG_INVALID_INTEGER.to_string()),
        _ => Err(MSG_INVALID_INTEGER.to_string()),
    }
}

fn parse_coordinate(value: &Value) -> Result<Coordinate, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => s.parse().map_err(|e| format!("{}", e)),
        Value::Number(n) => n.to_string().parse().map_err(|e| format!("{}", e)),
        _ => Err(MSG_INVALID_NUMBER.to_string()),
    }
}

fn parse_datetime(value: &Value) -> Result<chrono::DateTime<chrono::Utc>, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => parse_timestamp(s).ok_or_else(|| MSG_INVALID_DATETIME.to_string()),
        _ => Err(MSG_INVALID_DATETIME.to_string()),
    }
}

impl LocationFields {
    /// Parse every provided field, collecting one message per bad field.
    ///
    /// Unless `partial`, absent fields are reported as required.
    fn parse(&self, partial: bool) -> Result<LocationChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let changes = LocationChanges {
            character_id: check(
                &mut errors,
                "character",
                self.character.as_ref(),
                partial,
                parse_character,
            ),
            timestamp: check(
                &mut errors,
                "timestamp",
                self.timestamp.as_ref(),
                partial,
                parse_datetime,
            ),
            lat: check(&mut errors, "lat", self.lat.as_ref(), partial, parse_coordinate),
            lon: check(&mut errors, "lon", self.lon.as_ref(), partial, parse_coordinate),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    fn into_changes(self, partial: bool) -> AppResult<LocationChanges> {
        self.parse(partial)
            .map_err(|e| AppError::Fields(collect_field_errors(&e)))
    }
}

impl Validate for LocationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.parse(false).map(|_| ())
    }
}

impl Validate for LocationPatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.parse(true).map(|_| ())
    }
}

impl LocationRequest {
    fn into_new_location(self) -> AppResult<NewLocation> {
        match self.0.into_changes(false)? {
            LocationChanges {
                character_id: Some(character_id),
                timestamp: Some(timestamp),
                lat: Some(lat),
                lon: Some(lon),
            } => Ok(NewLocation {
                character_id,
                timestamp,
                lat,
                lon,
            }),
            _ => Err(AppError::internal("location request passed validation incomplete")),
        }
    }
}

/// Create location routes
pub fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/", get(list_locations).post(create_location))
        .route("/locations/near", get(near_locations))
        .route("/locations/near/", get(near_locations))
        .route(
            "/locations/:id",
            get(get_location)
                .put(replace_location)
                .patch(update_location)
                .delete(delete_location),
        )
        .route(
            "/locations/:id/",
            get(get_location)
                .put(replace_location)
                .patch(update_location)
                .delete(delete_location),
        )
}

/// List all locations
#[utoipa::path(
    get,
    path = "/locations/",
    tag = "Locations",
    responses(
        (status = 200, description = "All locations ordered by id", body = Vec<Location>)
    )
)]
pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let locations = state.location_service.list_locations().await?;
    Ok(Json(locations))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/locations/",
    tag = "Locations",
    request_body = LocationFields,
    responses(
        (status = 201, description = "Location created", body = Location),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_location(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LocationRequest>,
) -> AppResult<Created<Location>> {
    let location = state
        .location_service
        .create_location(payload.into_new_location()?)
        .await?;
    Ok(Created(location))
}

/// Locations within `distance` meters of `coordinates`
///
/// Distances use the spherical law of cosines.
#[utoipa::path(
    get,
    path = "/locations/near/",
    tag = "Locations",
    params(NearQueryParams),
    responses(
        (status = 200, description = "Locations sorted by distance", body = Vec<Location>),
        (status = 400, description = "Missing or invalid search parameters")
    )
)]
pub async fn near_locations(
    State(state): State<AppState>,
    Query(params): Query<NearQueryParams>,
) -> AppResult<Json<Vec<Location>>> {
    let query = NearQuery::from_query(
        params.coordinates.as_deref(),
        params.distance.as_deref(),
        params.ascending.as_deref(),
        params.character.as_deref(),
        params.date_range.as_deref(),
    )?;

    let locations = state.location_service.near(query).await?;
    Ok(Json(locations))
}

/// Get location by ID
#[utoipa::path(
    get,
    path = "/locations/{id}/",
    tag = "Locations",
    params(("id" = i64, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location", body = Location),
        (status = 404, description = "Location not found")
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<Location>> {
    let location = state.location_service.get_location(id).await?;
    Ok(Json(location))
}

/// Replace a location
#[utoipa::path(
    put,
    path = "/locations/{id}/",
    tag = "Locations",
    params(("id" = i64, Path, description = "Location ID")),
    request_body = LocationFields,
    responses(
        (status = 200, description = "Location replaced", body = Location),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn replace_location(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<LocationRequest>,
) -> AppResult<Json<Location>> {
    let location = state
        .location_service
        .replace_location(id, payload.into_new_location()?)
        .await?;
    Ok(Json(location))
}

/// Partially update a location
#[utoipa::path(
    patch,
    path = "/locations/{id}/",
    tag = "Locations",
    params(("id" = i64, Path, description = "Location ID")),
    request_body = LocationFields,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn update_location(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<LocationPatchRequest>,
) -> AppResult<Json<Location>> {
    let location = state
        .location_service
        .update_location(id, payload.0.into_changes(true)?)
        .await?;
    Ok(Json(location))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/locations/{id}/",
    tag = "Locations",
    params(("id" = i64, Path, description = "Location ID")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "Location not found")
    )
)]
pub async fn delete_location(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<NoContent> {
    state.location_service.delete_location(id).await?;
    Ok(NoContent)
}
