//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address (all interfaces)
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file, created on demand)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://breakingbad.sqlite3?mode=rwc";

/// Default dotenv file consulted when no `--env-file` is given
pub const DEFAULT_ENV_FILE: &str = ".env";

// =============================================================================
// Bootstrap Pipeline
// =============================================================================

/// Directory whose presence means the development build already exists
pub const DEFAULT_MARKER_DIR: &str = "target/debug";

/// Development-mode install command
pub const DEFAULT_INSTALL_COMMAND: &str = "cargo build";

/// Test suite command
pub const DEFAULT_TEST_COMMAND: &str = "cargo test";

/// Exit code reported when an external command cannot be spawned at all
pub const EXIT_CODE_SPAWN_FAILURE: i32 = 127;

/// Exit code for in-process failures
pub const EXIT_CODE_FAILURE: i32 = 1;

// =============================================================================
// Characters
// =============================================================================

/// Maximum length of character name and occupation
pub const MAX_TEXT_FIELD_LENGTH: u64 = 255;

/// Fields a character listing may be ordered by
pub const ORDER_BY_NAME: &str = "name";
pub const ORDER_BY_DATE_OF_BIRTH: &str = "date_of_birth";

// =============================================================================
// Locations & Geography
// =============================================================================

/// Mean Earth radius in meters used by the spherical law of cosines
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Decimal places kept for coordinates
pub const COORDINATE_DECIMAL_PLACES: u32 = 6;

/// Total significant digits allowed for coordinates
pub const COORDINATE_MAX_DIGITS: u32 = 9;

/// Decimal places kept for computed distances
pub const DISTANCE_DECIMAL_PLACES: i32 = 6;

// =============================================================================
// Client-facing Messages
// =============================================================================

pub const MSG_NOT_FOUND: &str = "Not found.";
pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_INVALID_NUMBER: &str = "A valid number is required.";
pub const MSG_INVALID_INTEGER: &str = "Incorrect type. Expected pk value.";
pub const MSG_INVALID_STRING: &str = "Not a valid string.";
pub const MSG_INVALID_BOOLEAN: &str = "Must be a valid boolean.";
pub const MSG_TOO_LONG: &str = "Ensure this field has no more than 255 characters.";
pub const MSG_INVALID_DATE: &str =
    "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const MSG_INVALID_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

pub const MSG_ORDERING_PARAMS: &str = "The query parameters `orderBy` and `ascending` are obligatory. `orderBy` only accepts `name` and `date_of_birth`. `ascending` only accepts 0 or 1";
pub const MSG_NEAR_PARAMS: &str = "The query parameters `coordinates` and `distance` are obligatory. `coordinates` accepts a `latitude,longitude` pair. `distance` accepts any value >= 0";
