//! Integration tests for API endpoints.
//!
//! Every test drives the real router against its own in-memory SQLite
//! database, so the full stack from extractors to SQL is exercised.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use breakingbad_api::api::{create_router, AppState};
use breakingbad_api::config::{Config, MSG_NEAR_PARAMS, MSG_ORDERING_PARAMS};
use breakingbad_api::infra::Database;

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> Router {
    let config = Config::with_database_url("sqlite::memory:");
    let database = Database::connect(&config)
        .await
        .expect("in-memory database");
    create_router(AppState::from_database(Arc::new(database)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn create_character(
    app: &Router,
    name: &str,
    born: &str,
    occupation: &str,
    suspect: bool,
) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": name,
            "date_of_birth": born,
            "occupation": occupation,
            "is_suspect": suspect
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_location(app: &Router, character: i64, lat: &str, lon: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/locations/",
        Some(json!({
            "character": character,
            "timestamp": "2023-01-01T18:59:00.618Z",
            "lat": lat,
            "lon": lon
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn seed_characters(app: &Router) {
    create_character(app, "Walter White", "1958-09-07", "Chemistry teacher", true).await;
    create_character(app, "Jesse Pinkman", "1984-09-24", "Student", false).await;
    create_character(app, "Skyler White", "1970-08-11", "Accountant", false).await;
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Service Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let app = test_app().await;
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Breaking Bad"));
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app().await;
    let (status, body) = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/locations/near/"].is_object());
}

// =============================================================================
// Characters
// =============================================================================

#[tokio::test]
async fn test_create_character() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/characters",
        Some(json!({
            "name": "Gustavo Fring",
            "date_of_birth": "1958-04-26",
            "occupation": "Restaurateur"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Gustavo Fring",
            "date_of_birth": "1958-04-26",
            "occupation": "Restaurateur",
            "is_suspect": false
        })
    );
}

#[tokio::test]
async fn test_create_character_field_errors() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": "   ",
            "date_of_birth": "07/09/1958",
            "is_suspect": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field may not be blank."]));
    assert_eq!(body["occupation"], json!(["This field is required."]));
    assert!(body["date_of_birth"][0]
        .as_str()
        .unwrap()
        .starts_with("Date has wrong format."));
}

#[tokio::test]
async fn test_name_longer_than_255_rejected() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": "x".repeat(256),
            "date_of_birth": "1958-09-07",
            "occupation": "Cook"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["name"],
        json!(["Ensure this field has no more than 255 characters."])
    );
}

#[tokio::test]
async fn test_list_requires_ordering_parameters() {
    let app = test_app().await;

    for uri in [
        "/characters/",
        "/characters/?orderBy=name",
        "/characters/?ascending=1",
        "/characters/?orderBy=occupation&ascending=1",
        "/characters/?orderBy=name&ascending=yes",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["detail"], MSG_ORDERING_PARAMS);
    }
}

#[tokio::test]
async fn test_list_ordering() {
    let app = test_app().await;
    seed_characters(&app).await;

    let (status, body) = get(&app, "/characters/?orderBy=name&ascending=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Jesse Pinkman", "Skyler White", "Walter White"]);

    let (_, body) = get(&app, "/characters?orderBy=date_of_birth&ascending=0").await;
    assert_eq!(names(&body), ["Jesse Pinkman", "Skyler White", "Walter White"]);

    let (_, body) = get(&app, "/characters/?orderBy=date_of_birth&ascending=1").await;
    assert_eq!(names(&body), ["Walter White", "Skyler White", "Jesse Pinkman"]);
}

#[tokio::test]
async fn test_list_filters_are_case_insensitive_and_or_combined() {
    let app = test_app().await;
    seed_characters(&app).await;

    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&name=WHITE").await;
    assert_eq!(names(&body), ["Skyler White", "Walter White"]);

    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&suspect=True").await;
    assert_eq!(names(&body), ["Walter White"]);

    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&suspect=false").await;
    assert_eq!(names(&body), ["Jesse Pinkman", "Skyler White"]);

    let (_, body) = get(
        &app,
        "/characters/?orderBy=name&ascending=1&name=walter&occupation=stud",
    )
    .await;
    assert_eq!(names(&body), ["Jesse Pinkman", "Walter White"]);

    // Empty filters are ignored
    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&name=&occupation=").await;
    assert_eq!(names(&body).len(), 3);
}

#[tokio::test]
async fn test_retrieve_unknown_or_malformed_id() {
    let app = test_app().await;

    for uri in ["/characters/42/", "/characters/abc", "/locations/7"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["detail"], "Not found.");
    }
}

#[tokio::test]
async fn test_replace_and_patch_character() {
    let app = test_app().await;
    let id = create_character(&app, "Walter White", "1958-09-07", "Teacher", true).await;
    let uri = format!("/characters/{id}/");

    // Missing is_suspect resets to false on a full replace
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "name": "Heisenberg",
            "date_of_birth": "1958-09-07",
            "occupation": "Cook"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Heisenberg");
    assert_eq!(body["is_suspect"], false);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"is_suspect": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Heisenberg");
    assert_eq!(body["is_suspect"], true);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"occupation": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["occupation"], json!(["This field may not be blank."]));

    let (status, _) = send(
        &app,
        Method::PUT,
        "/characters/99",
        Some(json!({
            "name": "Nobody",
            "date_of_birth": "1958-09-07",
            "occupation": "None"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_character_removes_its_locations() {
    let app = test_app().await;
    let id = create_character(&app, "Hank Schrader", "1966-03-14", "DEA agent", false).await;
    let location = create_location(&app, id, "35.084385", "-106.650421").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/characters/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = get(&app, &format!("/locations/{location}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/characters/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_null_fields_are_rejected() {
    let app = test_app().await;
    let id = create_character(&app, "Walter White", "1958-09-07", "Teacher", true).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/characters/{id}/"),
        Some(json!({"name": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["This field may not be null."]}));

    let (status, body) = send(
        &app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": null,
            "date_of_birth": "1958-09-07",
            "occupation": "Teacher"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"name": ["This field may not be null."]}));
}

#[tokio::test]
async fn test_character_type_mismatches() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": "Saul Goodman",
            "date_of_birth": "1960-11-12",
            "occupation": "Lawyer",
            "is_suspect": "true"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["is_suspect"], true);

    let (status, body) = send(
        &app,
        Method::POST,
        "/characters/",
        Some(json!({
            "name": ["Mike"],
            "date_of_birth": "1945-01-01",
            "occupation": "Fixer",
            "is_suspect": "sometimes"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["Not a valid string."],
            "is_suspect": ["Must be a valid boolean."]
        })
    );
}

#[tokio::test]
async fn test_name_filter_matches_non_ascii_as_written() {
    let app = test_app().await;
    create_character(&app, "ÁLVARO Vargas", "1970-01-01", "Chemist", false).await;
    seed_characters(&app).await;

    // ?name=Álvaro
    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&name=%C3%81lvaro").await;
    assert_eq!(names(&body), ["ÁLVARO Vargas"]);

    let (_, body) = get(&app, "/characters/?orderBy=name&ascending=1&name=vargas").await;
    assert_eq!(names(&body), ["ÁLVARO Vargas"]);
}

// =============================================================================
// Locations
// =============================================================================

#[tokio::test]
async fn test_location_wire_format() {
    let app = test_app().await;
    let character = create_character(&app, "Saul Goodman", "1960-11-12", "Lawyer", true).await;
    let id = create_location(&app, character, "35.084385", "-106.650421").await;

    let (status, body) = get(&app, &format!("/locations/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "character": character,
            "timestamp": "2023-01-01T18:59:00.618000Z",
            "lat": "35.084385",
            "lon": "-106.650421"
        })
    );

    let (_, body) = get(&app, "/locations/").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_location_field_errors() {
    let app = test_app().await;
    create_character(&app, "Mike Ehrmantraut", "1945-06-01", "Security", true).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/locations/",
        Some(json!({
            "character": null,
            "timestamp": "yesterday",
            "lat": "1.1234567",
            "lon": "1234.5"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["character"], json!(["This field may not be null."]));
    assert!(body["timestamp"][0]
        .as_str()
        .unwrap()
        .starts_with("Datetime has wrong format."));
    assert_eq!(
        body["lat"],
        json!(["Ensure that there are no more than 6 decimal places."])
    );
    assert_eq!(
        body["lon"],
        json!(["Ensure that there are no more than 3 digits before the decimal point."])
    );

    let (status, body) = send(&app, Method::POST, "/locations/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    for field in ["character", "timestamp", "lat", "lon"] {
        assert_eq!(body[field], json!(["This field is required."]), "{field}");
    }
}

#[tokio::test]
async fn test_location_requires_existing_character() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/locations/",
        Some(json!({
            "character": 999,
            "timestamp": "2023-01-01T00:00:00Z",
            "lat": "1",
            "lon": "1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["character"],
        json!(["Invalid pk \"999\" - object does not exist."])
    );
}

#[tokio::test]
async fn test_patch_and_delete_location() {
    let app = test_app().await;
    let character =
        create_character(&app, "Tuco Salamanca", "1970-01-01", "Distributor", true).await;
    let id = create_location(&app, character, "10", "10").await;
    let uri = format!("/locations/{id}/");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"lat": 20.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lat"], "20.500000");
    assert_eq!(body["lon"], "10.000000");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(json!({"character": 2}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["character"], json!(["Invalid pk \"2\" - object does not exist."]));

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Nearby Search
// =============================================================================

#[tokio::test]
async fn test_near_requires_coordinates_and_distance() {
    let app = test_app().await;

    for uri in [
        "/locations/near/",
        "/locations/near/?coordinates=10,10",
        "/locations/near/?distance=100",
        "/locations/near/?coordinates=10&distance=100",
        "/locations/near/?coordinates=10,10&distance=-5",
        "/locations/near?coordinates=10,10&distance=1.5",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["detail"], MSG_NEAR_PARAMS);
    }
}

#[tokio::test]
async fn test_near_filters_and_sorts_by_distance() {
    let app = test_app().await;
    let walter = create_character(&app, "Walter White", "1958-09-07", "Teacher", true).await;
    let jesse = create_character(&app, "Jesse Pinkman", "1984-09-24", "Student", false).await;

    let far = create_location(&app, walter, "20", "20").await;
    // About 109 m east of the origin
    let close = create_location(&app, jesse, "10", "10.001").await;
    let origin = create_location(&app, walter, "10", "10").await;

    let ids = |body: &Value| -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|l| l["id"].as_i64().unwrap())
            .collect()
    };

    let (status, body) = get(&app, "/locations/near/?coordinates=10,10&distance=200").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [origin, close]);

    let (_, body) = get(&app, "/locations/near/?coordinates=10,10&distance=200&ascending=0").await;
    assert_eq!(ids(&body), [close, origin]);

    let (_, body) = get(&app, "/locations/near/?coordinates=10,10&distance=100").await;
    assert_eq!(ids(&body), [origin]);

    let (_, body) = get(
        &app,
        &format!("/locations/near/?coordinates=10,10&distance=200&character={jesse}"),
    )
    .await;
    assert_eq!(ids(&body), [close]);

    let (_, body) = get(&app, "/locations/near/?coordinates=10,10&distance=10000000").await;
    assert!(ids(&body).contains(&far));

    let (_, body) = get(
        &app,
        "/locations/near/?coordinates=10,10&distance=200&date_range=2024-01-01T00:00:00Z,2024-12-31T00:00:00Z",
    )
    .await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn test_near_origin_accepts_any_precision() {
    let app = test_app().await;
    let walter = create_character(&app, "Walter White", "1958-09-07", "Teacher", true).await;
    let home = create_location(&app, walter, "35.084385", "-106.650421").await;

    let (status, body) = get(
        &app,
        "/locations/near/?coordinates=35.0843851,-106.6504211&distance=100",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body[0]["id"], home);
}

#[tokio::test]
async fn test_near_accepts_oversized_distance() {
    let app = test_app().await;
    let walter = create_character(&app, "Walter White", "1958-09-07", "Teacher", true).await;
    let far = create_location(&app, walter, "-80", "179").await;

    let (status, body) = get(
        &app,
        "/locations/near/?coordinates=10,10&distance=99999999999999999999999",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body[0]["id"], far);
}
