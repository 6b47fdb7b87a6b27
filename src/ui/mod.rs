mod debug_overlay;

use bevy::prelude::*;
use debug_overlay::DebugOverlayPlugin;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DebugOverlayPlugin);
    }
}
