pub mod config;
pub mod defaults;
pub mod generator;
pub mod gradient;
pub mod heightfield;
pub mod mesh;
pub mod noise_layers;
pub mod presets;

use std::path::PathBuf;

use bevy::prelude::*;

pub use config::{FlowSettings, NoiseLayerSettings, TerrainConfig, TerrainConfigError};
pub use generator::{TerrainFrame, TerrainGenerator};
pub use gradient::ColorGradient;
pub use heightfield::{ElevationStats, Heightfield, HeightfieldSynthesizer, NoiseOffset};
pub use mesh::{MeshData, TerrainMeshBuilder};
pub use presets::{LandscapePreset, TerrainCommand};

use crate::preview;

/// Live generator shared by the regeneration and overlay systems.
#[derive(Resource)]
pub struct TerrainState {
    pub generator: TerrainGenerator,
}

/// Sent after every successful regeneration with the tick's water plane.
#[derive(Event)]
pub struct TerrainRegenerated {
    pub water: MeshData,
}

#[derive(Component)]
pub struct TerrainSurface;

/// Pending one-shot preview export, taken by the first successful tick.
#[derive(Resource, Default)]
struct PreviewRequest {
    path: Option<PathBuf>,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerrainRegenerationSet;

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TerrainCommand>()
            .add_event::<TerrainRegenerated>()
            .init_resource::<PreviewRequest>()
            .add_systems(PreStartup, setup_terrain_generator)
            .add_systems(Startup, spawn_terrain_surface)
            .add_systems(
                Update,
                (queue_terrain_commands, regenerate_terrain)
                    .chain()
                    .in_set(TerrainRegenerationSet),
            );
    }
}

fn load_terrain_config() -> TerrainConfig {
    let Some(path) = std::env::var("TERRAIN_CONFIG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(|value| PathBuf::from(value.trim()))
    else {
        return TerrainConfig::default();
    };

    match TerrainConfig::load_from_file(&path) {
        Ok(config) => {
            info!("Loaded terrain config from {:?}", path);
            config
        }
        Err(error) => {
            warn!(
                "Failed to load terrain config {:?}: {}. Using defaults.",
                path, error
            );
            TerrainConfig::default()
        }
    }
}

fn setup_terrain_generator(mut commands: Commands, mut preview: ResMut<PreviewRequest>) {
    let config = load_terrain_config();
    info!(
        "Terrain grid {}x{} (seed {})",
        config.terrain_length, config.terrain_width, config.seed
    );

    if let Ok(env_value) = std::env::var("TERRAIN_EXPORT_PREVIEW") {
        preview.path = Some(if env_value.trim().is_empty() {
            PathBuf::from("target/terrain_preview.png")
        } else {
            PathBuf::from(env_value.trim())
        });
    }

    commands.insert_resource(TerrainState {
        generator: TerrainGenerator::new(config),
    });
}

fn spawn_terrain_surface(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let placeholder = meshes.add(Plane3d::default().mesh().size(1.0, 1.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        metallic: 0.0,
        reflectance: 0.1,
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
        TerrainSurface,
    ));
}

fn queue_terrain_commands(
    mut requests: EventReader<TerrainCommand>,
    mut state: ResMut<TerrainState>,
) {
    for command in requests.read() {
        state.generator.submit(*command);
    }
}

fn regenerate_terrain(
    time: Res<Time>,
    mut state: ResMut<TerrainState>,
    mut preview: ResMut<PreviewRequest>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut surfaces: Query<(&Handle<Mesh>, &mut Visibility), With<TerrainSurface>>,
    mut regenerated: EventWriter<TerrainRegenerated>,
) {
    let frame = match state.generator.regenerate(time.delta_seconds()) {
        Ok(frame) => frame,
        Err(error) => {
            warn!("Skipping terrain regeneration: {}", error);
            return;
        }
    };

    for (handle, mut visibility) in surfaces.iter_mut() {
        if let Some(mesh) = meshes.get_mut(handle) {
            *mesh = frame.terrain.to_mesh();
            *visibility = Visibility::Visible;
        }
    }

    if let Some(path) = preview.path.take() {
        match preview::export_heightfield_preview(
            &frame.heightfield,
            &state.generator.config().gradient,
            frame.gradient_bounds,
            &path,
        ) {
            Ok(()) => info!("Exported terrain preview image to {:?}", path),
            Err(error) => warn!("Failed to export terrain preview to {:?}: {}", path, error),
        }
    }

    regenerated.send(TerrainRegenerated {
        water: frame.water,
    });
}
