//! Systems that build air routes at startup and drive them every frame.

use bevy::color::Alpha;
use bevy::prelude::*;

use crate::route::components::{
    AirRoute, MARKER_RADIUS_FACTOR, PATH_COLOR, RouteColorSource, marker_rotation,
};
use crate::route::data::RouteTable;
use crate::view::{GlobeView, ViewResolution};

/// Startup system: transform each route's control points into local space
/// and spawn one [`AirRoute`] entity carrying its destination disk.
pub fn spawn_routes(
    mut commands: Commands,
    table: Res<RouteTable>,
    mut colors: ResMut<RouteColorSource>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let view = GlobeView::default();
    // Unit disk, scaled per tick to view resolution and marker state.
    let disk_mesh = meshes.add(Circle::new(1.0));

    for &route in &table.routes {
        let (start_geo, end_geo) = table.endpoints(route);
        let mid_geo = RouteTable::midpoint(&start_geo, &end_geo);

        let start = view.point_transform(&start_geo);
        let center = view.point_transform(&mid_geo);
        let end = view.point_transform(&end_geo);

        let color = colors.next_color();
        let material = materials.add(StandardMaterial {
            base_color: color,
            unlit: true,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        let route = AirRoute::new(start, center, end, color);
        let destination = route.destination();
        commands.spawn((
            route,
            Mesh3d(disk_mesh.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(destination)
                .with_rotation(marker_rotation(destination))
                .with_scale(Vec3::ZERO),
            Visibility::Hidden,
        ));
    }
    info!("Spawned {} air routes", table.routes.len());
}

/// System: advance every route's animation by the frame delta. Routes are
/// independent; order among them does not matter.
pub fn advance_routes(time: Res<Time>, mut routes: Query<&mut AirRoute>) {
    let delta = time.delta();
    for mut route in routes.iter_mut() {
        route.update(delta);
    }
}

/// System: draw the dim full path and the bright three-sample pulse.
/// The pulse endpoints carry the route color, its midpoint is white.
pub fn draw_routes(mut gizmos: Gizmos, routes: Query<&AirRoute>) {
    for route in routes.iter() {
        for pair in route.samples().windows(2) {
            gizmos.line(pair[0], pair[1], PATH_COLOR);
        }
        let window = route.highlight_window();
        gizmos.line_gradient(window[0], window[1], route.color, Color::WHITE);
        gizmos.line_gradient(window[1], window[2], Color::WHITE, route.color);
    }
}

/// System: push marker animation state into the disk's transform,
/// visibility and material alpha. The disk radius tracks the current view
/// resolution so its apparent size stays constant while zooming.
pub fn sync_markers(
    resolution: Res<ViewResolution>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut markers: Query<(
        &AirRoute,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial3d<StandardMaterial>,
    )>,
) {
    let radius_km = **resolution * MARKER_RADIUS_FACTOR;
    for (route, mut transform, mut visibility, material_handle) in markers.iter_mut() {
        transform.scale = Vec3::splat(route.marker.scale * radius_km);
        *visibility = if route.marker.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color.set_alpha(route.marker.opacity);
        }
    }
}
