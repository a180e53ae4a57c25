//! Fixed-point coordinate value object.
//!
//! Coordinates are decimals with at most 9 digits, 6 of them after the
//! decimal point. They are held as integer micro-degrees so that parsing and
//! formatting are exact.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::config::{COORDINATE_DECIMAL_PLACES, COORDINATE_MAX_DIGITS};

const SCALE: i64 = 10_i64.pow(COORDINATE_DECIMAL_PLACES);

/// Reasons a textual coordinate is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    NotANumber,
    TooManyDecimalPlaces,
    TooManyWholeDigits,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateError::NotANumber => write!(f, "A valid number is required."),
            CoordinateError::TooManyDecimalPlaces => write!(
                f,
                "Ensure that there are no more than {} decimal places.",
                COORDINATE_DECIMAL_PLACES
            ),
            CoordinateError::TooManyWholeDigits => write!(
                f,
                "Ensure that there are no more than {} digits before the decimal point.",
                COORDINATE_MAX_DIGITS - COORDINATE_DECIMAL_PLACES
            ),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Latitude or longitude in micro-degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate(i64);

impl Coordinate {
    /// Build from a micro-degree count
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Build from floating degrees, rounding to the nearest micro-degree
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees * SCALE as f64).round() as i64)
    }

    pub fn micros(&self) -> i64 {
        self.0
    }

    pub fn degrees(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(CoordinateError::NotANumber);
        }

        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > COORDINATE_DECIMAL_PLACES as usize {
            return Err(CoordinateError::TooManyDecimalPlaces);
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > (COORDINATE_MAX_DIGITS - COORDINATE_DECIMAL_PLACES) as usize {
            return Err(CoordinateError::TooManyWholeDigits);
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| CoordinateError::NotANumber)?
        };
        let fraction_value: i64 = format!(
            "{:0<width$}",
            fraction,
            width = COORDINATE_DECIMAL_PLACES as usize
        )
        .parse()
        .map_err(|_| CoordinateError::NotANumber)?;

        let micros = whole_value * SCALE + fraction_value;
        Ok(Self(if negative { -micros } else { micros }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64,
            width = COORDINATE_DECIMAL_PLACES as usize
        )
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
