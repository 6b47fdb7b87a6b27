pub mod plane;

use bevy::prelude::*;

pub use plane::WaterPlaneBuilder;

use crate::terrain::{TerrainRegenerated, TerrainRegenerationSet};

#[derive(Component)]
pub struct WaterSurface;

pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_water_surface).add_systems(
            Update,
            apply_water_plane.after(TerrainRegenerationSet),
        );
    }
}

fn spawn_water_surface(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let placeholder = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.1,
        metallic: 0.0,
        reflectance: 0.5,
        alpha_mode: AlphaMode::Blend,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        PbrBundle {
            mesh: placeholder,
            material,
            visibility: Visibility::Hidden,
            ..default()
        },
        WaterSurface,
    ));
}

/// Uploads the newest water plane, hiding the surface while water is disabled.
fn apply_water_plane(
    mut regenerated: EventReader<TerrainRegenerated>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surfaces: Query<(&Handle<Mesh>, &mut Visibility), With<WaterSurface>>,
) {
    let Some(latest) = regenerated.read().last() else {
        return;
    };

    for (handle, mut visibility) in surfaces.iter_mut() {
        if latest.water.is_empty() {
            if *visibility != Visibility::Hidden {
                debug!("Water plane disabled");
            }
            *visibility = Visibility::Hidden;
            continue;
        }

        if let Some(mesh) = meshes.get_mut(handle) {
            *mesh = latest.water.to_mesh();
            *visibility = Visibility::Visible;
        }
    }
}
