use bevy::prelude::*;

use crate::terrain::{TerrainGenerator, TerrainState};

#[derive(Resource, Default)]
pub struct DebugOverlayState {
    pub enabled: bool,
}

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugOverlayState>()
            .add_systems(Startup, setup_debug_overlay)
            .add_systems(Update, (toggle_debug_overlay, update_debug_text));
    }
}

#[derive(Component)]
struct DebugText;

fn setup_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_sections([
            TextSection::new(
                "",
                TextStyle {
                    font_size: 20.0,
                    color: Color::srgb(1.0, 1.0, 0.0), // Yellow
                    ..default()
                },
            ),
            TextSection::new(
                "",
                TextStyle {
                    font_size: 16.0,
                    color: Color::srgb(1.0, 1.0, 1.0),
                    ..default()
                },
            ),
        ])
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        }),
        DebugText,
    ));
}

fn toggle_debug_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugOverlayState>,
) {
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.enabled = !debug_state.enabled;
        info!(
            "Debug overlay {}",
            if debug_state.enabled {
                "ENABLED (F3)"
            } else {
                "DISABLED (F3)"
            }
        );
    }
}

fn update_debug_text(
    mut text_query: Query<&mut Text, With<DebugText>>,
    terrain: Option<Res<TerrainState>>,
    debug_state: Res<DebugOverlayState>,
) {
    let Some(terrain) = terrain else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    if debug_state.enabled {
        text.sections[0].value = "TERRAIN DEBUG (F3 to toggle)\n".to_string();
        text.sections[1].value = terrain_details(&terrain.generator);
    } else {
        text.sections[0].value = String::new();
        text.sections[1].value = terrain_summary(&terrain.generator);
    }
}

fn format_elevation(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{:.2}", value))
}

fn terrain_summary(generator: &TerrainGenerator) -> String {
    let config = generator.config();
    let preset = generator
        .active_preset()
        .map_or_else(|| "custom".to_string(), |preset| preset.to_string());

    format!(
        "Preset: {}\n\
         Flow: x {} / z {}\n\
         M mountains, I islands, X/Z flow, G/L relock, [ ] water",
        preset,
        if config.flow.move_x { "on" } else { "off" },
        if config.flow.move_z { "on" } else { "off" },
    )
}

fn terrain_details(generator: &TerrainGenerator) -> String {
    let config = generator.config();
    let offset = generator.offset();
    let (gradient_min, gradient_max) = generator.gradient_bounds();
    let (water_min, water_max) = generator.water_bounds();

    format!(
        "{}\n\
         \n\
         Grid: {} x {} (seed {})\n\
         Elevation: {} .. {}\n\
         Gradient bounds: {:.2} .. {:.2}\n\
         Water bounds: {:.2} .. {:.2}\n\
         Relative water height: {:.3}\n\
         Noise offset: x={:.3}, z={:.3}\n\
         Height variety: {:.2}, power: {:.2}, density: {:.3}",
        terrain_summary(generator),
        config.terrain_length,
        config.terrain_width,
        config.seed,
        format_elevation(generator.min_elevation()),
        format_elevation(generator.max_elevation()),
        gradient_min,
        gradient_max,
        water_min,
        water_max,
        config.relative_water_height,
        offset.x,
        offset.z,
        config.height_variety,
        config.noise_power,
        config.height_density,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{LandscapePreset, TerrainCommand, TerrainConfig};

    #[test]
    fn details_show_placeholders_before_first_pass() {
        let generator = TerrainGenerator::new(TerrainConfig::default());
        let details = terrain_details(&generator);
        assert!(details.contains("Elevation: - .. -"));
        assert!(details.contains("Preset: custom"));
    }

    #[test]
    fn summary_names_active_preset() {
        let mut generator = TerrainGenerator::new(TerrainConfig {
            terrain_length: 8,
            terrain_width: 8,
            ..TerrainConfig::default()
        });
        generator.submit(TerrainCommand::ApplyPreset(LandscapePreset::Islands));
        generator.regenerate(0.0).expect("valid config");
        assert!(terrain_summary(&generator).starts_with("Preset: islands"));
    }
}
