//! Animated air-route arcs: curve construction, per-route animation state
//! and the systems that orchestrate them over the globe.

use bevy::prelude::*;

pub mod components;
pub mod curve;
pub mod data;
pub mod systems;

pub use components::{AirRoute, RouteColorSource};
pub use data::RouteTable;

use crate::view::{ViewResolution, sync_view_resolution};
use systems::{advance_routes, draw_routes, spawn_routes, sync_markers};

/// Plugin that owns the route scene: builds all routes at startup and, each
/// frame, syncs the camera-derived view resolution before any route update,
/// then draws paths and markers.
pub struct AirRoutePlugin;

impl Plugin for AirRoutePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RouteTable::load())
            .init_resource::<RouteColorSource>()
            .init_resource::<ViewResolution>()
            .add_systems(Startup, spawn_routes)
            .add_systems(
                Update,
                (
                    sync_view_resolution,
                    advance_routes.after(sync_view_resolution),
                    draw_routes.after(advance_routes),
                    sync_markers.after(advance_routes),
                ),
            );
    }
}
