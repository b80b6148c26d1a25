//! Geographic coordinates and the Web Mercator planar conversion.

use bevy::math::DVec2;
use std::f64::consts::PI;

/// Spherical Web Mercator radius in meters.
const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

#[derive(Debug)]
pub struct CoordError {
    pub msg: String,
}

/// A geographic position: degrees plus height above ground in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub height_m: f64,
}

impl GeoPoint {
    pub fn new(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Result<Self, CoordError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(CoordError {
                msg: format!("Invalid latitude: {latitude_deg}"),
            });
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(CoordError {
                msg: format!("Invalid longitude: {longitude_deg}"),
            });
        }
        if !height_m.is_finite() {
            return Err(CoordError {
                msg: format!("Invalid height: {height_m}"),
            });
        }
        Ok(GeoPoint {
            longitude_deg,
            latitude_deg,
            height_m,
        })
    }

    #[allow(dead_code)]
    pub fn with_height(self, height_m: f64) -> Self {
        GeoPoint { height_m, ..self }
    }
}

/// Longitude/latitude in degrees to planar Web Mercator meters.
pub fn lng_lat_to_xy(longitude_deg: f64, latitude_deg: f64) -> DVec2 {
    let x = MERCATOR_RADIUS_M * longitude_deg.to_radians();
    let y = MERCATOR_RADIUS_M * (PI / 4.0 + latitude_deg.to_radians() / 2.0).tan().ln();
    DVec2::new(x, y)
}

/// Planar Web Mercator meters back to longitude/latitude degrees.
pub fn xy_to_lng_lat(xy: DVec2) -> (f64, f64) {
    let longitude = (xy.x / MERCATOR_RADIUS_M).to_degrees();
    let latitude = (2.0 * (xy.y / MERCATOR_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    (longitude, latitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_geo_point_valid() {
        let geo = GeoPoint::new(116.4074, 39.9042, 100.0).unwrap();
        assert!((geo.longitude_deg - 116.4074).abs() < EPSILON);
        assert!((geo.latitude_deg - 39.9042).abs() < EPSILON);
        assert!((geo.height_m - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_geo_point_boundary_values() {
        assert!(GeoPoint::new(180.0, 90.0, 0.0).is_ok());
        assert!(GeoPoint::new(-180.0, -90.0, 0.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_geo_point_invalid_latitude() {
        assert!(GeoPoint::new(0.0, 91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -91.0, 0.0).is_err());
    }

    #[test]
    fn test_geo_point_invalid_longitude() {
        assert!(GeoPoint::new(181.0, 0.0, 0.0).is_err());
        assert!(GeoPoint::new(-181.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_geo_point_invalid_height() {
        assert!(GeoPoint::new(0.0, 0.0, f64::NAN).is_err());
        assert!(GeoPoint::new(0.0, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_geo_point_with_height() {
        let geo = GeoPoint::new(10.0, 20.0, 0.0)
            .unwrap()
            .with_height(200_000.0);
        assert!((geo.height_m - 200_000.0).abs() < EPSILON);
        assert!((geo.longitude_deg - 10.0).abs() < EPSILON);
    }

    #[test]
    fn test_mercator_origin() {
        let xy = lng_lat_to_xy(0.0, 0.0);
        assert!(xy.x.abs() < EPSILON);
        assert!(xy.y.abs() < EPSILON);
    }

    #[test]
    fn test_mercator_axis_directions() {
        // x grows east, y grows north
        assert!(lng_lat_to_xy(10.0, 0.0).x > 0.0);
        assert!(lng_lat_to_xy(-10.0, 0.0).x < 0.0);
        assert!(lng_lat_to_xy(0.0, 10.0).y > 0.0);
        assert!(lng_lat_to_xy(0.0, -10.0).y < 0.0);
    }

    #[test]
    fn test_mercator_known_value() {
        // 180 degrees east maps to pi * R
        let xy = lng_lat_to_xy(180.0, 0.0);
        assert!((xy.x - PI * MERCATOR_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn test_mercator_roundtrip() {
        let xy = lng_lat_to_xy(116.4074, 39.9042);
        let (lon, lat) = xy_to_lng_lat(xy);
        assert!((lon - 116.4074).abs() < 1e-9);
        assert!((lat - 39.9042).abs() < 1e-9);
    }
}
