//! Character handlers.

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

use super::fields::{check, parse_bool, parse_text, present};
use crate::api::extractors::{collect_field_errors, ResourceId, ValidatedJson};
use crate::api::AppState;
use crate::config::{MSG_INVALID_DATE, MSG_NULL};
use crate::domain::{
    timestamp::parse_date, Character, CharacterChanges, CharacterFilter, CharacterOrdering,
    NewCharacter,
};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Raw character fields as sent by the client
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CharacterFields {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Walter White", max_length = 255)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, format = Date, example = "1958-09-07")]
    pub date_of_birth: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "Chemistry teacher", max_length = 255)]
    pub occupation: Option<Value>,
    /// Defaults to false when omitted from a create or replace
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>, example = false)]
    pub is_suspect: Option<Value>,
}

/// Character create/replace request
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CharacterRequest(pub CharacterFields);

/// Character partial update request
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CharacterPatchRequest(pub CharacterFields);

/// Character listing query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCharactersQuery {
    /// `name` or `date_of_birth` (required)
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    /// `1` ascending, `0` descending (required)
    pub ascending: Option<String>,
    /// Case-insensitive partial match on name
    pub name: Option<String>,
    /// `true` to match suspects
    pub suspect: Option<String>,
    /// Case-insensitive partial match on occupation
    pub occupation: Option<String>,
}

fn parse_birth_date(value: &Value) -> Result<chrono::NaiveDate, String> {
    match value {
        Value::Null => Err(MSG_NULL.to_string()),
        Value::String(s) => parse_date(s).ok_or_else(|| MSG_INVALID_DATE.to_string()),
        _ => Err(MSG_INVALID_DATE.to_string()),
    }
}

impl CharacterFields {
    /// Parse every provided field, collecting one message per bad field.
    ///
    /// `is_suspect` is optional even when not `partial`.
    fn parse(&self, partial: bool) -> Result<CharacterChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let changes = CharacterChanges {
            name: check(&mut errors, "name", self.name.as_ref(), partial, parse_text),
            date_of_birth: check(
                &mut errors,
                "date_of_birth",
                self.date_of_birth.as_ref(),
                partial,
                parse_birth_date,
            ),
            occupation: check(
                &mut errors,
                "occupation",
                self.occupation.as_ref(),
                partial,
                parse_text,
            ),
            is_suspect: check(
                &mut errors,
                "is_suspect",
                self.is_suspect.as_ref(),
                true,
                parse_bool,
            ),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }

    fn into_changes(self, partial: bool) -> AppResult<CharacterChanges> {
        self.parse(partial)
            .map_err(|e| AppError::Fields(collect_field_errors(&e)))
    }
}

impl Validate for CharacterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.parse(false).map(|_| ())
    }
}

impl Validate for CharacterPatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.0.parse(true).map(|_| ())
    }
}

impl CharacterRequest {
    fn into_new_character(self) -> AppResult<NewCharacter> {
        match self.0.into_changes(false)? {
            CharacterChanges {
                name: Some(name),
                date_of_birth: Some(date_of_birth),
                occupation: Some(occupation),
                is_suspect,
            } => Ok(NewCharacter {
                name,
                date_of_birth,
                occupation,
                is_suspect: is_suspect.unwrap_or(false),
            }),
            _ => Err(AppError::internal("character request passed validation incomplete")),
        }
    }
}

/// Create character routes
pub fn character_routes() -> Router<AppState> {
    Router::new()
        .route("/characters", get(list_characters).post(create_character))
        .route("/characters/", get(list_characters).post(create_character))
        .route(
            "/characters/:id",
            get(get_character)
                .put(replace_character)
                .patch(update_character)
                .delete(delete_character),
        )
        .route(
            "/characters/:id/",
            get(get_character)
                .put(replace_character)
                .patch(update_character)
                .delete(delete_character),
        )
}

/// List characters, optionally filtered and always ordered
///
/// Filters are combined with OR and match partially and case-insensitively.
#[utoipa::path(
    get,
    path = "/characters/",
    tag = "Characters",
    params(ListCharactersQuery),
    responses(
        (status = 200, description = "Matching characters", body = Vec<Character>),
        (status = 422, description = "Missing or invalid `orderBy`/`ascending`")
    )
)]
pub async fn list_characters(
    State(state): State<AppState>,
    Query(query): Query<ListCharactersQuery>,
) -> AppResult<Json<Vec<Character>>> {
    let ordering =
        CharacterOrdering::from_query(query.order_by.as_deref(), query.ascending.as_deref())?;
    let filter = CharacterFilter::from_query(
        query.name.as_deref(),
        query.suspect.as_deref(),
        query.occupation.as_deref(),
    );

    let characters = state
        .character_service
        .list_characters(filter, ordering)
        .await?;
    Ok(Json(characters))
}

/// Create a character
#[utoipa::path(
    post,
    path = "/characters/",
    tag = "Characters",
    request_body = CharacterFields,
    responses(
        (status = 201, description = "Character created", body = Character),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_character(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CharacterRequest>,
) -> AppResult<Created<Character>> {
    let character = state
        .character_service
        .create_character(payload.into_new_character()?)
        .await?;
    Ok(Created(character))
}

/// Get character by ID
#[utoipa::path(
    get,
    path = "/characters/{id}/",
    tag = "Characters",
    params(("id" = i64, Path, description = "Character ID")),
    responses(
        (status = 200, description = "Character", body = Character),
        (status = 404, description = "Character not found")
    )
)]
pub async fn get_character(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<Character>> {
    let character = state.character_service.get_character(id).await?;
    Ok(Json(character))
}

/// Replace a character
#[utoipa::path(
    put,
    path = "/characters/{id}/",
    tag = "Characters",
    params(("id" = i64, Path, description = "Character ID")),
    request_body = CharacterFields,
    responses(
        (status = 200, description = "Character replaced", body = Character),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Character not found")
    )
)]
pub async fn replace_character(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<CharacterRequest>,
) -> AppResult<Json<Character>> {
    let character = state
        .character_service
        .replace_character(id, payload.into_new_character()?)
        .await?;
    Ok(Json(character))
}

/// Partially update a character
#[utoipa::path(
    patch,
    path = "/characters/{id}/",
    tag = "Characters",
    params(("id" = i64, Path, description = "Character ID")),
    request_body = CharacterFields,
    responses(
        (status = 200, description = "Character updated", body = Character),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Character not found")
    )
)]
pub async fn update_character(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedJson(payload): ValidatedJson<CharacterPatchRequest>,
) -> AppResult<Json<Character>> {
    let character = state
        .character_service
        .update_character(id, payload.0.into_changes(true)?)
        .await?;
    Ok(Json(character))
}

/// Delete a character and its locations
#[utoipa::path(
    delete,
    path = "/characters/{id}/",
    tag = "Characters",
    params(("id" = i64, Path, description = "Character ID")),
    responses(
        (status = 204, description = "Character deleted"),
        (status = 404, description = "Character not found")
    )
)]
pub async fn delete_character(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<NoContent> {
    state.character_service.delete_character(id).await?;
    Ok(NoContent)
}
