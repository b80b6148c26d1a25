//! The globe the arcs render over.

use bevy::prelude::*;

pub const EARTH_RADIUS_KM: f32 = 6371.0;

/// Plugin that spawns the earth sphere.
pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_globe);
    }
}

fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let sphere = meshes.add(Sphere::new(EARTH_RADIUS_KM).mesh().ico(4).unwrap());
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.1, 0.18),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(sphere),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.0, 0.0),
        Name::new("Earth"),
    ));
}
