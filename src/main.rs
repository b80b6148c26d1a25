use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod axes;
mod coord;
mod earth;
mod route;
mod view;

use axes::{AxesPlugin, ShowAxes};
use earth::EarthPlugin;
use route::AirRoutePlugin;

// Setup scene and camera
fn setup(mut commands: Commands) {
    // Configure PanOrbitCamera for our scene scale (Earth radius = 6371 km)
    let initial_distance = 25_000.0; // ~4x Earth's radius

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,              // Look at Earth's center
        radius: Some(initial_distance), // Initial distance from focus point
        yaw: Some(0.0),
        pitch: Some(0.0),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            // World units are kilometers; default far plane is too small and clips the globe.
            near: 1.0,
            far: 250_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        Transform::from_xyz(0.0, 0.0, initial_distance).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Axes marker at the origin
    commands.spawn((Transform::default(), ShowAxes));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Sky Routes".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(EarthPlugin);
    app.add_plugins(AxesPlugin);
    app.add_plugins(AirRoutePlugin);
    app.add_systems(Startup, setup);

    app.run();
}
