//! The host-view side of the transform pipeline: mapping geographic points
//! into local render space and tracking meters-per-pixel at the globe.

use bevy::math::{DMat4, DVec2, DVec3};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::coord::{self, GeoPoint};
use crate::earth::EARTH_RADIUS_KM;

/// Kilometers per screen pixel at the globe surface, refreshed from the
/// camera each frame. Destination markers scale by it so they keep a
/// constant apparent size while zooming.
#[derive(Resource, Deref, DerefMut)]
pub struct ViewResolution(pub f32);

impl Default for ViewResolution {
    fn default() -> Self {
        // Matches the initial camera distance before the first sync runs.
        Self(25.0)
    }
}

/// The render view's spatial state: a sphere of `radius_km` centered at the
/// origin, Y up. Geographic input arrives as planar Web Mercator meters and
/// leaves as a local-space transform.
#[derive(Debug, Clone, Copy)]
pub struct GlobeView {
    pub radius_km: f64,
}

impl Default for GlobeView {
    fn default() -> Self {
        Self {
            radius_km: EARTH_RADIUS_KM as f64,
        }
    }
}

impl GlobeView {
    /// The local-space transform at a planar position and height: an
    /// east-north-up frame whose translation column is the surface point
    /// pushed outward by `height_m`. Kilometers, f64.
    pub fn render_transform_at(&self, planar: DVec2, height_m: f64) -> DMat4 {
        let (longitude_deg, latitude_deg) = coord::xy_to_lng_lat(planar);
        let longitude = longitude_deg.to_radians();
        let latitude = latitude_deg.to_radians();

        // Same sphere mapping the globe mesh uses: Y up, +Z at lon 0.
        let up = DVec3::new(
            longitude.sin() * latitude.cos(),
            latitude.sin(),
            longitude.cos() * latitude.cos(),
        );
        let east = DVec3::new(longitude.cos(), 0.0, -longitude.sin());
        let north = up.cross(east);
        let translation = up * (self.radius_km + height_m / 1000.0);

        DMat4::from_cols(
            east.extend(0.0),
            north.extend(0.0),
            up.extend(0.0),
            translation.extend(1.0),
        )
    }

    /// Map a geographic point into local render space: convert to the
    /// planar system, take the render transform at that position, extract
    /// its translation. Pure for a fixed view; called once per control
    /// point at setup.
    pub fn point_transform(&self, geo: &GeoPoint) -> Vec3 {
        let planar = coord::lng_lat_to_xy(geo.longitude_deg, geo.latitude_deg);
        let transform = self.render_transform_at(planar, geo.height_m);
        transform.w_axis.truncate().as_vec3()
    }
}

/// System: derive [`ViewResolution`] from the camera pose, projection and
/// window height. Runs before any route update in the same frame.
pub fn sync_view_resolution(
    mut resolution: ResMut<ViewResolution>,
    camera: Query<(&Transform, &Projection), With<Camera3d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok((transform, projection)) = camera.single() else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let distance = (transform.translation.length() - EARTH_RADIUS_KM).max(1.0);
    **resolution = 2.0 * distance * (perspective.fov * 0.5).tan() / window.height();
}
