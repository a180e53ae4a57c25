//! Location domain entity and the nearby-search query.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::timestamp::{parse_timestamp, serialize_timestamp};
use super::{Coordinate, GeoPoint};
use crate::config::MSG_NEAR_PARAMS;
use crate::errors::{AppError, AppResult};

/// A timestamped sighting of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Location {
    #[schema(example = 1)]
    pub id: i64,
    /// Id of the character seen at this location
    #[serde(rename = "character")]
    #[schema(example = 1)]
    pub character_id: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime, example = "2023-01-01T18:59:00.618000Z")]
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = String, example = "35.084385")]
    pub lat: Coordinate,
    #[schema(value_type = String, example = "-106.650421")]
    pub lon: Coordinate,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat.degrees(), self.lon.degrees())
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, changes: LocationChanges) {
        if let Some(character_id) = changes.character_id {
            self.character_id = character_id;
        }
        if let Some(timestamp) = changes.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(lat) = changes.lat {
            self.lat = lat;
        }
        if let Some(lon) = changes.lon {
            self.lon = lon;
        }
    }
}

/// Validated data for creating or fully replacing a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLocation {
    pub character_id: i64,
    pub timestamp: DateTime<Utc>,
    pub lat: Coordinate,
    pub lon: Coordinate,
}

/// Validated partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationChanges {
    pub character_id: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub lat: Option<Coordinate>,
    pub lon: Option<Coordinate>,
}

/// Search for locations within a radius of a point
#[derive(Debug, Clone, PartialEq)]
pub struct NearQuery {
    pub origin: GeoPoint,
    /// Maximum distance in meters (inclusive)
    pub max_distance: f64,
    pub ascending: bool,
    pub character_id: Option<i64>,
    /// Inclusive timestamp range
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl NearQuery {
    /// Parse raw query values.
    ///
    /// `coordinates` must be a `lat,lon` pair of finite decimal degrees of any
    /// precision and `distance` a run of ASCII digits; `ascending` sorts
    /// nearest-first only when it is `1` or absent.
    pub fn from_query(
        coordinates: Option<&str>,
        distance: Option<&str>,
        ascending: Option<&str>,
        character: Option<&str>,
        date_range: Option<&str>,
    ) -> AppResult<Self> {
        let invalid = || AppError::validation(MSG_NEAR_PARAMS);

        let (lat, lon) = coordinates
            .and_then(|c| c.split_once(','))
            .ok_or_else(invalid)?;
        let degrees = |value: &str| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite())
                .ok_or_else(invalid)
        };
        let origin = GeoPoint::new(degrees(lat)?, degrees(lon)?);

        let distance = distance.unwrap_or_default();
        if distance.is_empty() || !distance.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        // Digits only, so this never fails; huge values just widen the radius
        let max_distance = distance.parse::<f64>().map_err(|_| invalid())?;

        let character_id = character
            .map(|c| {
                c.trim().parse::<i64>().map_err(|_| {
                    AppError::validation("The query parameter `character` must be a character id")
                })
            })
            .transpose()?;

        let date_range = date_range.map(parse_date_range).transpose()?;

        Ok(Self {
            origin,
            max_distance,
            ascending: ascending.unwrap_or("1") == "1",
            character_id,
            date_range,
        })
    }

    /// Whether a location passes the character and date filters
    pub fn admits(&self, location: &Location) -> bool {
        let character_ok = self
            .character_id
            .map_or(true, |id| location.character_id == id);
        let date_ok = self
            .date_range
            .map_or(true, |(start, end)| {
                location.timestamp >= start && location.timestamp <= end
            });
        character_ok && date_ok
    }

    /// Filter by radius and sort by distance.
    ///
    /// Candidates are expected in id order; ties keep that order.
    pub fn select(&self, candidates: Vec<Location>) -> Vec<Location> {
        let mut hits: Vec<(f64, Location)> = candidates
            .into_iter()
            .filter(|l| self.admits(l))
            .map(|l| (self.origin.distance_to(&l.point()), l))
            .filter(|(d, _)| *d <= self.max_distance)
            .collect();

        if self.ascending {
            hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        } else {
            hits.sort_by(|a, b| b.0.total_cmp(&a.0));
        }

        hits.into_iter().map(|(_, l)| l).collect()
    }
}

fn parse_date_range(value: &str) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let invalid = || {
        AppError::validation(
            "The query parameter `date_range` accepts a `start,end` pair of ISO-8601 datetimes",
        )
    };
    let (start, end) = value.split_once(',').ok_or_else(invalid)?;
    Ok((
        parse_timestamp(start).ok_or_else(invalid)?,
        parse_timestamp(end).ok_or_else(invalid)?,
    ))
}
