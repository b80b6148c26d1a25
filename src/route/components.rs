//! Air route components and per-route animation state.

use bevy::color::Srgba;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use crate::route::curve::{DEFAULT_DIVISIONS, sample_curve};

/// Minimum elapsed time between animation steps. The pulse speed depends on
/// this interval, not on the render frame rate.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Destination disk radius in view-resolution units (constant apparent size
/// of roughly 30 pixels on screen).
pub const MARKER_RADIUS_FACTOR: f32 = 30.0;

/// The dim full-path line color; the traveling pulse reads against it.
pub const PATH_COLOR: Srgba = Srgba::new(1.0, 1.0, 0.0, 0.6);

/// Route colors, drawn at random per route.
pub const ROUTE_PALETTE: [Srgba; 4] = [
    Srgba::new(1.0, 1.0, 0.0, 1.0),
    Srgba::new(0.0, 1.0, 0.886, 1.0),
    Srgba::new(0.596, 0.0, 1.0, 1.0),
    Srgba::new(1.0, 0.404, 0.404, 1.0),
];

/// Source of route colors. Seedable so tests get a reproducible draw.
#[derive(Resource)]
pub struct RouteColorSource(pub StdRng);

impl Default for RouteColorSource {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl RouteColorSource {
    #[allow(dead_code)]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn next_color(&mut self) -> Color {
        ROUTE_PALETTE[self.0.gen_range(0..ROUTE_PALETTE.len())].into()
    }
}

/// Animation state of the destination disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerState {
    /// Hidden until the first sweep completes at the destination.
    pub visible: bool,
    pub opacity: f32,
    pub scale: f32,
}

impl Default for MarkerState {
    fn default() -> Self {
        Self {
            visible: false,
            opacity: 1.0,
            scale: 0.0,
        }
    }
}

/// One animated arc: the sampled curve, the highlight cursor and the
/// destination marker state. The owning entity also carries the marker's
/// mesh, material and transform.
#[derive(Component)]
pub struct AirRoute {
    pub color: Color,
    pub marker: MarkerState,
    samples: Vec<Vec3>,
    divisions: usize,
    color_index: usize,
    elapsed: Duration,
}

impl AirRoute {
    pub fn new(start: Vec3, center: Vec3, end: Vec3, color: Color) -> Self {
        Self::with_divisions(start, center, end, color, DEFAULT_DIVISIONS)
    }

    pub fn with_divisions(
        start: Vec3,
        center: Vec3,
        end: Vec3,
        color: Color,
        divisions: usize,
    ) -> Self {
        debug_assert!(divisions >= 3, "highlight window needs three samples");
        Self {
            color,
            marker: MarkerState::default(),
            samples: sample_curve(&[start, center, end], divisions),
            divisions,
            color_index: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    pub fn destination(&self) -> Vec3 {
        self.samples[self.divisions]
    }

    /// The three consecutive samples currently rendered as the bright pulse.
    pub fn highlight_window(&self) -> &[Vec3] {
        &self.samples[self.color_index..self.color_index + 3]
    }

    #[allow(dead_code)]
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Advance the animation by `delta`. A step fires once the accumulated
    /// time reaches [`TICK_INTERVAL`]; smaller deltas are a no-op. Returns
    /// whether a step fired.
    pub fn update(&mut self, delta: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed < TICK_INTERVAL {
            return false;
        }
        self.elapsed = Duration::ZERO;
        self.step();
        true
    }

    /// One animation step: fade/grow the marker from the cursor position,
    /// then move the cursor, wrapping when the highlight window would run
    /// off the end of the curve.
    fn step(&mut self) {
        let ratio = self.color_index as f32 / self.samples.len() as f32;
        self.marker.opacity = (1.0 - 2.0 * ratio).max(0.0);
        self.marker.scale = 2.0 * ratio;
        if ratio >= 0.5 {
            self.marker.visible = false;
        }
        self.color_index += 1;
        if self.color_index > self.divisions - 3 {
            self.marker.visible = true;
            self.color_index = 0;
        }
    }
}

/// Orientation that lays a flat disk (object-space normal +Z) tangent to the
/// sphere at `end`, facing outward: tilt about X onto the destination's
/// meridian plane, tilt about Z for its offset from that plane, then align
/// the disk normal with the outward radial. `atan2` covers the `y == 0`
/// plane with the limiting angles instead of dividing by zero.
pub fn marker_rotation(end: Vec3) -> Quat {
    let tilt_x = end.z.atan2(end.y);
    let tilt_z = -end.x.atan2((end.y * end.y + end.z * end.z).sqrt());
    Quat::from_rotation_x(tilt_x) * Quat::from_rotation_z(tilt_z) * Quat::from_rotation_x(-FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn test_route() -> AirRoute {
        AirRoute::new(
            Vec3::new(6371.0, 0.0, 0.0),
            Vec3::new(4600.0, 4600.0, 0.0),
            Vec3::new(0.0, 6371.0, 0.0),
            Color::WHITE,
        )
    }

    fn tick(route: &mut AirRoute) {
        assert!(route.update(TICK_INTERVAL));
    }

    #[test]
    fn test_sub_interval_updates_are_noop() {
        let mut route = test_route();
        assert!(!route.update(Duration::from_millis(10)));
        assert!(!route.update(Duration::from_millis(10)));
        assert_eq!(route.color_index(), 0);
        assert_eq!(route.marker, MarkerState::default());
        // Third 10ms delta crosses the 30ms threshold.
        assert!(route.update(Duration::from_millis(10)));
        assert_eq!(route.color_index(), 1);
    }

    #[test]
    fn test_highlight_window_tracks_cursor() {
        let mut route = test_route();
        assert_eq!(route.highlight_window(), &route.samples()[0..3]);
        tick(&mut route);
        tick(&mut route);
        assert_eq!(route.color_index(), 2);
        assert_eq!(route.highlight_window(), &route.samples()[2..5]);
    }

    #[test]
    fn test_cursor_cycles_after_divisions_minus_two_ticks() {
        let mut route = test_route();
        let period = DEFAULT_DIVISIONS - 2;
        for step in 0..period - 1 {
            tick(&mut route);
            assert_eq!(route.color_index(), step + 1);
        }
        assert!(!route.marker.visible);
        // The reset tick wraps the cursor and flips the marker visible.
        tick(&mut route);
        assert_eq!(route.color_index(), 0);
        assert!(route.marker.visible);
    }

    #[test]
    fn test_marker_fades_and_grows_monotonically() {
        let mut route = test_route();
        let mut last_opacity = f32::INFINITY;
        let mut last_scale = -1.0;
        for _ in 0..DEFAULT_DIVISIONS / 2 {
            tick(&mut route);
            assert!(route.marker.opacity <= last_opacity);
            assert!(route.marker.scale >= last_scale);
            assert!((0.0..=1.0).contains(&route.marker.opacity));
            last_opacity = route.marker.opacity;
            last_scale = route.marker.scale;
        }
    }

    #[test]
    fn test_marker_hides_when_pulse_passes_halfway() {
        let mut route = test_route();
        route.marker.visible = true;
        let total_samples = DEFAULT_DIVISIONS + 1;
        let mut hidden_at = None;
        for step in 1..=DEFAULT_DIVISIONS - 2 {
            tick(&mut route);
            if !route.marker.visible {
                hidden_at = Some(step);
                break;
            }
        }
        // A step evaluates the cursor before advancing it, so the cursor
        // first reaching ratio >= 0.5 hides the marker one step later.
        let threshold_cursor = (0..total_samples)
            .find(|i| *i as f32 / total_samples as f32 >= 0.5)
            .unwrap();
        assert_eq!(hidden_at, Some(threshold_cursor + 1));
    }

    #[test]
    fn test_marker_stays_hidden_until_reset() {
        let mut route = test_route();
        route.marker.visible = true;
        // Run until the halfway fade-out.
        while route.marker.visible {
            tick(&mut route);
        }
        // Hidden for the rest of the sweep, visible again exactly at wrap.
        while route.color_index() != 0 {
            assert!(!route.marker.visible);
            tick(&mut route);
        }
        assert!(route.marker.visible);
    }

    #[test]
    fn test_seeded_color_source_is_reproducible() {
        let mut a = RouteColorSource::seeded(7);
        let mut b = RouteColorSource::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_palette_only_colors() {
        let mut source = RouteColorSource::seeded(42);
        for _ in 0..32 {
            let color = source.next_color();
            assert!(ROUTE_PALETTE.iter().any(|c| Color::from(*c) == color));
        }
    }

    #[test]
    fn test_marker_rotation_positive_y_axis() {
        let rotation = marker_rotation(Vec3::new(0.0, 6371.0, 0.0));
        let normal = rotation * Vec3::Z;
        assert!(normal.distance(Vec3::Y) < EPSILON);
    }

    #[test]
    fn test_marker_rotation_negative_y_axis() {
        // The lower hemisphere takes the pi branch of the arctangent.
        let rotation = marker_rotation(Vec3::new(0.0, -6371.0, 0.0));
        let normal = rotation * Vec3::Z;
        assert!(normal.distance(Vec3::NEG_Y) < EPSILON);
    }

    #[test]
    fn test_marker_rotation_equatorial_axes() {
        // y == 0 must resolve to the limiting angles, not NaN.
        for (end, outward) in [
            (Vec3::new(6371.0, 0.0, 0.0), Vec3::X),
            (Vec3::new(-6371.0, 0.0, 0.0), Vec3::NEG_X),
            (Vec3::new(0.0, 0.0, 6371.0), Vec3::Z),
            (Vec3::new(0.0, 0.0, -6371.0), Vec3::NEG_Z),
        ] {
            let normal = marker_rotation(end) * Vec3::Z;
            assert!(
                normal.distance(outward) < EPSILON,
                "normal {normal} for destination {end}"
            );
        }
    }

    #[test]
    fn test_marker_rotation_general_point() {
        let end = Vec3::new(1000.0, 2000.0, 2000.0);
        let normal = marker_rotation(end) * Vec3::Z;
        assert!(normal.distance(end.normalize()) < 1e-4);
    }

    #[test]
    fn test_marker_rotation_lower_hemisphere_general_point() {
        let end = Vec3::new(-1500.0, -3000.0, 2500.0);
        let normal = marker_rotation(end) * Vec3::Z;
        assert!(normal.distance(end.normalize()) < 1e-4);
    }
}
