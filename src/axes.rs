//! Axes gizmo for orienting the local render frame.

use bevy::prelude::*;

/// Component marker for entities that should display axes
#[derive(Component)]
pub struct ShowAxes;

#[derive(Resource)]
pub struct AxesConfig {
    pub enabled: bool,
    pub length_km: f32,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            length_km: 10_000.0,
        }
    }
}

pub struct AxesPlugin;

impl Plugin for AxesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AxesConfig>()
            .add_systems(Update, draw_axes);
    }
}

/// System to draw axes for entities with the ShowAxes component
fn draw_axes(mut gizmos: Gizmos, query: Query<&Transform, With<ShowAxes>>, config: Res<AxesConfig>) {
    if !config.enabled {
        return;
    }
    for &transform in &query {
        gizmos.axes(transform, config.length_km);
    }
}
