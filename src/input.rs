use bevy::prelude::*;

use crate::terrain::defaults::WATER_HEIGHT_STEP;
use crate::terrain::{LandscapePreset, TerrainCommand, TerrainRegenerationSet};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (terrain_command_system.before(TerrainRegenerationSet), exit_system),
        );
    }
}

/// Maps a key pressed this frame to its terrain command.
pub fn command_for_key(key: KeyCode) -> Option<TerrainCommand> {
    match key {
        KeyCode::KeyM => Some(TerrainCommand::ApplyPreset(LandscapePreset::Mountains)),
        KeyCode::KeyI => Some(TerrainCommand::ApplyPreset(LandscapePreset::Islands)),
        KeyCode::KeyX => Some(TerrainCommand::ToggleFlowX),
        KeyCode::KeyZ => Some(TerrainCommand::ToggleFlowZ),
        KeyCode::KeyG => Some(TerrainCommand::LockGradient),
        KeyCode::KeyL => Some(TerrainCommand::LockWaterPlane),
        KeyCode::BracketLeft => Some(TerrainCommand::AdjustWaterHeight(-WATER_HEIGHT_STEP)),
        KeyCode::BracketRight => Some(TerrainCommand::AdjustWaterHeight(WATER_HEIGHT_STEP)),
        _ => None,
    }
}

fn terrain_command_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<TerrainCommand>,
) {
    if keyboard.pressed(KeyCode::ControlLeft) {
        return;
    }

    for key in keyboard.get_just_pressed() {
        if let Some(command) = command_for_key(*key) {
            debug!("{:?} -> {:?}", key, command);
            commands.send(command);
        }
    }
}

fn exit_system(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.pressed(KeyCode::ControlLeft) && keyboard.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_keys_map_to_presets() {
        assert_eq!(
            command_for_key(KeyCode::KeyM),
            Some(TerrainCommand::ApplyPreset(LandscapePreset::Mountains))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyI),
            Some(TerrainCommand::ApplyPreset(LandscapePreset::Islands))
        );
    }

    #[test]
    fn bracket_keys_step_water_height() {
        assert_eq!(
            command_for_key(KeyCode::BracketLeft),
            Some(TerrainCommand::AdjustWaterHeight(-WATER_HEIGHT_STEP))
        );
        assert_eq!(
            command_for_key(KeyCode::BracketRight),
            Some(TerrainCommand::AdjustWaterHeight(WATER_HEIGHT_STEP))
        );
        assert_eq!(command_for_key(KeyCode::KeyQ), None);
    }
}
