//! Character domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{MSG_ORDERING_PARAMS, ORDER_BY_DATE_OF_BIRTH, ORDER_BY_NAME};
use crate::errors::{AppError, AppResult};

/// Character domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Character {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Walter White")]
    pub name: String,
    #[schema(value_type = String, format = Date, example = "1958-09-07")]
    pub date_of_birth: NaiveDate,
    #[schema(example = "Chemistry teacher")]
    pub occupation: String,
    #[schema(example = false)]
    pub is_suspect: bool,
}

/// Validated data for creating or fully replacing a character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCharacter {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub occupation: String,
    pub is_suspect: bool,
}

/// Validated partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterChanges {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub occupation: Option<String>,
    pub is_suspect: Option<bool>,
}

impl Character {
    /// Apply a partial update in place
    pub fn apply(&mut self, changes: CharacterChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(occupation) = changes.occupation {
            self.occupation = occupation;
        }
        if let Some(is_suspect) = changes.is_suspect {
            self.is_suspect = is_suspect;
        }
    }
}

/// Listing filters. Every present filter widens the result (logical OR).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Exact suspect flag
    pub is_suspect: Option<bool>,
    /// Case-insensitive substring of the occupation
    pub occupation: Option<String>,
}

impl CharacterFilter {
    /// Build from raw query values, ignoring empty strings
    pub fn from_query(
        name: Option<&str>,
        suspect: Option<&str>,
        occupation: Option<&str>,
    ) -> Self {
        let non_empty = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            name: non_empty(name),
            is_suspect: suspect
                .filter(|s| !s.is_empty())
                .map(|s| s.eq_ignore_ascii_case("true")),
            occupation: non_empty(occupation),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_suspect.is_none() && self.occupation.is_none()
    }
}

/// Column a character listing is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterOrderField {
    Name,
    DateOfBirth,
}

/// Mandatory ordering of a character listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterOrdering {
    pub field: CharacterOrderField,
    pub ascending: bool,
}

impl CharacterOrdering {
    /// Parse `orderBy` and `ascending`; both are required.
    pub fn from_query(order_by: Option<&str>, ascending: Option<&str>) -> AppResult<Self> {
        let field = match order_by {
            Some(ORDER_BY_NAME) => CharacterOrderField::Name,
            Some(ORDER_BY_DATE_OF_BIRTH) => CharacterOrderField::DateOfBirth,
            _ => return Err(AppError::unprocessable(MSG_ORDERING_PARAMS)),
        };
        let ascending = match ascending {
            Some("1") => true,
            Some("0") => false,
            _ => return Err(AppError::unprocessable(MSG_ORDERING_PARAMS)),
        };

        Ok(Self { field, ascending })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walter() -> Character {
        Character {
            id: 1,
            name: "Walter White".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1958, 9, 7).unwrap(),
            occupation: "Chemistry Teacher".to_string(),
            is_suspect: true,
        }
    }

    #[test]
    fn test_ordering_requires_both_params() {
        assert!(CharacterOrdering::from_query(Some("name"), Some("1")).is_ok());
        assert!(matches!(
            CharacterOrdering::from_query(None, Some("1")),
            Err(AppError::Unprocessable(_))
        ));
        assert!(CharacterOrdering::from_query(Some("name"), None).is_err());
        assert!(CharacterOrdering::from_query(Some("occupation"), Some("1")).is_err());
        assert!(CharacterOrdering::from_query(Some("name"), Some("true")).is_err());
    }

    #[test]
    fn test_ordering_direction() {
        let ordering = CharacterOrdering::from_query(Some("date_of_birth"), Some("0")).unwrap();
        assert_eq!(ordering.field, CharacterOrderField::DateOfBirth);
        assert!(!ordering.ascending);
    }

    #[test]
    fn test_filter_ignores_empty_values() {
        let filter = CharacterFilter::from_query(Some(""), None, Some(""));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter_suspect_parsing() {
        assert_eq!(
            CharacterFilter::from_query(None, Some("TRUE"), None).is_suspect,
            Some(true)
        );
        assert_eq!(
            CharacterFilter::from_query(None, Some("nope"), None).is_suspect,
            Some(false)
        );
    }

    #[test]
    fn test_apply_changes() {
        let mut character = walter();
        character.apply(CharacterChanges {
            occupation: Some("Cook".to_string()),
            ..Default::default()
        });
        assert_eq!(character.occupation, "Cook");
        assert_eq!(character.name, "Walter White");
    }
}
