//! Centripetal Catmull-Rom sampling for route arcs.
//!
//! Interpolates a smooth open curve through the given control points.
//! Boundary tangents come from reflecting the end control points, so the
//! curve passes exactly through the first and last point.

use bevy::prelude::Vec3;

/// Default number of curve segments; sampling yields `divisions + 1` points.
pub const DEFAULT_DIVISIONS: usize = 60;

/// Knot spacing exponent: 0.25 is the centripetal parameterization.
const CENTRIPETAL_POW: f32 = 0.25;

/// Segments with nearly coincident control points get a unit knot interval
/// instead of dividing by zero.
const MIN_DT: f32 = 1e-4;

/// Sample an open centripetal Catmull-Rom curve through `control` at
/// `divisions + 1` uniformly spaced parameter values in [0, 1].
///
/// Pure function of its inputs. Requires at least two control points.
pub fn sample_curve(control: &[Vec3], divisions: usize) -> Vec<Vec3> {
    debug_assert!(control.len() >= 2, "need at least two control points");
    let mut samples = Vec::with_capacity(divisions + 1);
    for step in 0..=divisions {
        samples.push(curve_point(control, step as f32 / divisions as f32));
    }
    samples
}

/// Evaluate the curve at parameter `t` in [0, 1].
pub fn curve_point(control: &[Vec3], t: f32) -> Vec3 {
    let len = control.len();
    let scaled = (len - 1) as f32 * t;
    let mut segment = scaled.floor() as usize;
    let mut weight = scaled - segment as f32;
    if segment >= len - 1 {
        // t == 1 lands on the final knot; evaluate the last segment at 1
        segment = len - 2;
        weight = 1.0;
    }

    // Interior points use their neighbors; boundaries extrapolate by
    // reflection so the tangent is defined at the curve ends.
    let p0 = if segment > 0 {
        control[segment - 1]
    } else {
        control[0] * 2.0 - control[1]
    };
    let p1 = control[segment];
    let p2 = control[segment + 1];
    let p3 = if segment + 2 < len {
        control[segment + 2]
    } else {
        control[len - 1] * 2.0 - control[len - 2]
    };

    let mut dt0 = p0.distance_squared(p1).powf(CENTRIPETAL_POW);
    let mut dt1 = p1.distance_squared(p2).powf(CENTRIPETAL_POW);
    let mut dt2 = p2.distance_squared(p3).powf(CENTRIPETAL_POW);
    if dt1 < MIN_DT {
        dt1 = 1.0;
    }
    if dt0 < MIN_DT {
        dt0 = dt1;
    }
    if dt2 < MIN_DT {
        dt2 = dt1;
    }

    // Non-uniform Catmull-Rom tangents, then a cubic Hermite segment.
    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt2;

    let c0 = p1;
    let c1 = t1;
    let c2 = (p2 - p1) * 3.0 - t1 * 2.0 - t2;
    let c3 = (p1 - p2) * 2.0 + t1 + t2;

    c0 + (c1 + (c2 + c3 * weight) * weight) * weight
}
