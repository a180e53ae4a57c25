//! Great-circle distance between two coordinates.

use crate::config::{DISTANCE_DECIMAL_PLACES, EARTH_RADIUS_METERS};

/// A latitude/longitude pair in decimal degrees
///
/// Unlike stored coordinates, a point carries no precision limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Distance in meters using the spherical law of cosines.
    ///
    /// The cosine term is clamped to 1.0 so identical points yield 0 instead
    /// of NaN; the result is rounded to 6 decimal places.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lon = other.lon.to_radians() - self.lon.to_radians();

        let cosine = (lat1.cos() * lat2.cos() * delta_lon.cos() + lat1.sin() * lat2.sin()).min(1.0);
        round_to(cosine.acos() * EARTH_RADIUS_METERS, DISTANCE_DECIMAL_PLACES)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    #[test]
    fn test_same_point_is_zero() {
        let p = point(0.0, 0.0);
        assert_eq!(p.distance_to(&p), 0.0);

        // Rounding leaves a few centimetres away from the equator
        let p = point(35.084385, -106.650421);
        assert!(p.distance_to(&p) < 1.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = point(0.0, 0.0);
        let b = point(1.0, 0.0);
        let expected = EARTH_RADIUS_METERS.to_radians() * 1.0;
        assert!((a.distance_to(&b) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let albuquerque = point(35.084385, -106.650421);
        let santa_fe = point(35.686975, -105.937799);
        let there = albuquerque.distance_to(&santa_fe);
        let back = santa_fe.distance_to(&albuquerque);
        assert!((there - back).abs() < 1e-6);
        // Roughly 93 km apart
        assert!(there > 90_000.0 && there < 96_000.0);
    }

    #[test]
    fn test_sub_micro_degree_origin() {
        let origin = point(35.0843851, -106.6504211);
        let stored = point(35.084385, -106.650421);
        assert!(origin.distance_to(&stored) < 1.0);
    }
}
