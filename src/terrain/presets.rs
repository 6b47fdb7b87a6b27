use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::Event;

use super::config::{NoiseLayerSettings, TerrainConfig};
use super::defaults::{islands, mountains};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandscapePreset {
    Mountains,
    Islands,
}

impl fmt::Display for LandscapePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LandscapePreset::Mountains => write!(f, "mountains"),
            LandscapePreset::Islands => write!(f, "islands"),
        }
    }
}

impl LandscapePreset {
    /// Overwrites the preset's parameter bundle. Callers also lock gradient and water bounds.
    pub fn apply(&self, config: &mut TerrainConfig) {
        match self {
            LandscapePreset::Mountains => {
                config.height_density = mountains::HEIGHT_DENSITY;
                config.height_variety = mountains::HEIGHT_VARIETY;
                config.noise_power = mountains::NOISE_POWER;
                config.lower_layer = NoiseLayerSettings {
                    height_variety: mountains::LOWER_LAYER_HEIGHT_VARIETY,
                    density: mountains::LOWER_LAYER_DENSITY,
                };
                config.upper_height_percent = mountains::UPPER_HEIGHT_PERCENT;
                config.upper_layer = NoiseLayerSettings {
                    height_variety: mountains::UPPER_LAYER_HEIGHT_VARIETY,
                    density: mountains::UPPER_LAYER_DENSITY,
                };
                config.relative_water_height = mountains::RELATIVE_WATER_HEIGHT;
                config.gradient = config.mountain_gradient.clone();
            }
            LandscapePreset::Islands => {
                config.height_density = islands::HEIGHT_DENSITY;
                config.height_variety = islands::HEIGHT_VARIETY;
                config.noise_power = islands::NOISE_POWER;
                config.lower_layer = NoiseLayerSettings {
                    height_variety: islands::LOWER_LAYER_HEIGHT_VARIETY,
                    density: islands::LOWER_LAYER_DENSITY,
                };
                config.upper_height_percent = islands::UPPER_HEIGHT_PERCENT;
                config.upper_layer = NoiseLayerSettings {
                    height_variety: islands::UPPER_LAYER_HEIGHT_VARIETY,
                    density: islands::UPPER_LAYER_DENSITY,
                };
                config.relative_water_height = islands::RELATIVE_WATER_HEIGHT;
                config.gradient = config.island_gradient.clone();
            }
        }
    }
}

/// One-shot request consumed by the next regeneration tick.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum TerrainCommand {
    ApplyPreset(LandscapePreset),
    LockGradient,
    LockWaterPlane,
    ToggleFlowX,
    ToggleFlowZ,
    AdjustWaterHeight(f32),
}

#[derive(Default, Debug)]
pub struct CommandQueue {
    pending: VecDeque<TerrainCommand>,
}

impl CommandQueue {
    pub fn push(&mut self, command: TerrainCommand) {
        self.pending.push_back(command);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = TerrainCommand> + '_ {
        self.pending.drain(..)
    }
}
