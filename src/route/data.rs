//! Route table: the coordinate table plus the index pairs that form routes.

use anyhow::{Context, Result, anyhow, bail};
use bevy::prelude::*;
use serde::Deserialize;

use crate::coord::GeoPoint;

/// Arc endpoints sit just above the surface.
pub const ENDPOINT_HEIGHT_M: f64 = 100.0;

/// The arc midpoint is lifted well above the endpoints to bow the curve.
pub const ARC_APEX_HEIGHT_M: f64 = 200_000.0;

/// Route records: `coordinates[i]` is `[longitude, latitude]` in degrees,
/// each route is a pair of indices into that table.
#[derive(Debug, Clone, Resource, Deserialize)]
pub struct RouteTable {
    pub coordinates: Vec<[f64; 2]>,
    pub routes: Vec<[usize; 2]>,
}

impl RouteTable {
    /// Parse and validate a route table from a JSON document of the shape
    /// `{ "coordinates": [[lon, lat], ...], "routes": [[i, j], ...] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: RouteTable = serde_json::from_str(json).context("parsing route table")?;
        table.validate()?;
        Ok(table)
    }

    /// A malformed table is a configuration error caught at load time.
    pub fn validate(&self) -> Result<()> {
        for (i, [longitude, latitude]) in self.coordinates.iter().enumerate() {
            GeoPoint::new(*longitude, *latitude, 0.0)
                .map_err(|e| anyhow!("coordinate {i}: {}", e.msg))?;
        }
        for (i, route) in self.routes.iter().enumerate() {
            for &index in route {
                if index >= self.coordinates.len() {
                    bail!(
                        "route {i} references coordinate {index}, table has {}",
                        self.coordinates.len()
                    );
                }
            }
        }
        Ok(())
    }

    /// Start and end of a route, lifted to [`ENDPOINT_HEIGHT_M`].
    /// Indices are assumed validated; a bad index panics.
    pub fn endpoints(&self, route: [usize; 2]) -> (GeoPoint, GeoPoint) {
        let [start, end] = route.map(|index| {
            let [longitude, latitude] = self.coordinates[index];
            GeoPoint {
                longitude_deg: longitude,
                latitude_deg: latitude,
                height_m: ENDPOINT_HEIGHT_M,
            }
        });
        (start, end)
    }

    /// Resolve the table for this run: a JSON document named by the
    /// `SKYROUTES_ROUTES` environment variable, or the built-in demo set.
    pub fn load() -> Self {
        let Ok(path) = std::env::var("SKYROUTES_ROUTES") else {
            return RouteTable::default();
        };
        let result = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|json| RouteTable::from_json(&json));
        match result {
            Ok(table) => {
                info!("Loaded {} routes from {path}", table.routes.len());
                table
            }
            Err(e) => {
                warn!("Failed to load route table from {path}: {e:#}");
                RouteTable::default()
            }
        }
    }

    /// Geographic midpoint of a route: arithmetic mean of the endpoint
    /// longitudes/latitudes, lifted to [`ARC_APEX_HEIGHT_M`].
    pub fn midpoint(start: &GeoPoint, end: &GeoPoint) -> GeoPoint {
        GeoPoint {
            longitude_deg: (start.longitude_deg + end.longitude_deg) / 2.0,
            latitude_deg: (start.latitude_deg + end.latitude_deg) / 2.0,
            height_m: ARC_APEX_HEIGHT_M,
        }
    }
}

impl Default for RouteTable {
    /// Built-in demo routes between major cities.
    fn default() -> Self {
        let table = RouteTable {
            coordinates: vec![
                [116.4074, 39.9042],  // Beijing
                [-0.1278, 51.5074],   // London
                [-74.0060, 40.7128],  // New York
                [151.2093, -33.8688], // Sydney
                [139.6503, 35.6762],  // Tokyo
                [-46.6333, -23.5505], // Sao Paulo
                [31.2357, 30.0444],   // Cairo
                [37.6173, 55.7558],   // Moscow
            ],
            routes: vec![
                [0, 1],
                [0, 3],
                [0, 4],
                [1, 2],
                [1, 6],
                [2, 5],
                [4, 3],
                [7, 0],
            ],
        };
        debug_assert!(table.validate().is_ok());
        table
    }
}
