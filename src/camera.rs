use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;

use crate::terrain::TerrainState;

#[derive(Component)]
pub struct OrbitCamera;

#[derive(Component)]
pub struct CameraController {
    pub focus: Vec3,
    pub distance: f32,
    pub look_sensitivity: f32,
    pub zoom_speed: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 300.0,
            look_sensitivity: 0.005,
            zoom_speed: 0.1,
            pitch: -0.6,
            yaw: 0.8,
        }
    }
}

impl CameraController {
    pub const MIN_DISTANCE: f32 = 5.0;
    pub const MAX_DISTANCE: f32 = 2000.0;

    /// Frames a terrain footprint of the given size, looking at its center.
    pub fn framing(length: f32, width: f32) -> Self {
        Self {
            focus: Vec3::new(length * 0.5 + 1.0, 0.0, width * 0.5 + 1.0),
            distance: length.max(width).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            ..default()
        }
    }

    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
        let translation = self.focus + rotation * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(translation).looking_at(self.focus, Vec3::Y)
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
        })
        .add_systems(Startup, setup_camera)
        .add_systems(Update, (camera_orbit, camera_zoom));
    }
}

fn setup_camera(mut commands: Commands, terrain: Option<Res<TerrainState>>) {
    let controller = match terrain {
        Some(state) => {
            let config = state.generator.config();
            CameraController::framing(config.terrain_length as f32, config.terrain_width as f32)
        }
        None => {
            warn!("Terrain state missing at camera setup, using default framing");
            CameraController::default()
        }
    };

    info!(
        "Spawning orbit camera around {:?} at distance {}",
        controller.focus, controller.distance
    );

    commands.spawn((
        Camera3dBundle {
            transform: controller.transform(),
            projection: PerspectiveProjection {
                near: 0.1,
                far: 5000.0,
                fov: 60.0_f32.to_radians(),
                ..default()
            }
            .into(),
            ..default()
        },
        OrbitCamera,
        controller,
    ));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
        ..default()
    });
}

/// Orbits while the right mouse button is held.
fn camera_orbit(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut query: Query<(&mut Transform, &mut CameraController), With<OrbitCamera>>,
) {
    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if !buttons.pressed(MouseButton::Right) || delta.length_squared() == 0.0 {
        return;
    }

    let Ok((mut transform, mut controller)) = query.get_single_mut() else {
        return;
    };

    controller.yaw -= delta.x * controller.look_sensitivity;
    controller.pitch -= delta.y * controller.look_sensitivity;
    controller.pitch = controller.pitch.clamp(-1.5, -0.05);

    *transform = controller.transform();
}

fn camera_zoom(
    mut wheel_events: EventReader<MouseWheel>,
    mut query: Query<(&mut Transform, &mut CameraController), With<OrbitCamera>>,
) {
    let scroll: f32 = wheel_events.read().map(|event| event.y).sum();
    if scroll == 0.0 {
        return;
    }

    let Ok((mut transform, mut controller)) = query.get_single_mut() else {
        return;
    };

    let factor = 1.0 - scroll * controller.zoom_speed;
    controller.distance = (controller.distance * factor)
        .clamp(CameraController::MIN_DISTANCE, CameraController::MAX_DISTANCE);

    *transform = controller.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_looks_at_terrain_center() {
        let controller = CameraController::framing(250.0, 100.0);
        assert_eq!(controller.focus, Vec3::new(126.0, 0.0, 51.0));
        assert_eq!(controller.distance, 250.0);

        let transform = controller.transform();
        let to_focus = (controller.focus - transform.translation).normalize();
        assert!(transform.forward().dot(to_focus) > 0.999);
        assert!((transform.translation.distance(controller.focus) - 250.0).abs() < 1e-3);
    }

    #[test]
    fn framing_clamps_tiny_terrain() {
        let controller = CameraController::framing(1.0, 1.0);
        assert_eq!(controller.distance, CameraController::MIN_DISTANCE);
    }
}
