use bevy::prelude::*;
use bevy::window::PresentMode;

use terrain_flow::camera::CameraPlugin;
use terrain_flow::input::InputPlugin;
use terrain_flow::terrain::TerrainPlugin;
use terrain_flow::ui::UIPlugin;
use terrain_flow::water::WaterPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Terrain Flow".into(),
                resolution: (1280., 720.).into(),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            TerrainPlugin, // Inserts TerrainState before anything reads it
            WaterPlugin,
            CameraPlugin,
            InputPlugin,
            UIPlugin,
        ))
        .run();
}
