use std::fmt;
use std::path::Path;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use super::defaults;
use super::gradient::ColorGradient;

#[derive(Debug)]
pub enum TerrainConfigError {
    EmptyGrid,
    GridTooLarge { length: u32, width: u32 },
    DensityOutOfRange(f32),
    FractionOutOfRange { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    NegativeNoisePower(f32),
    EmptyGradient,
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for TerrainConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerrainConfigError::EmptyGrid => {
                write!(f, "terrain length and width must both be at least 1")
            }
            TerrainConfigError::GridTooLarge { length, width } => write!(
                f,
                "terrain grid {length}x{width} exceeds the 32-bit vertex index range"
            ),
            TerrainConfigError::DensityOutOfRange(value) => write!(
                f,
                "height density {} is outside 0..={}",
                value,
                defaults::MAX_HEIGHT_DENSITY
            ),
            TerrainConfigError::FractionOutOfRange { field, value } => {
                write!(f, "{field} must lie in 0..=1, got {value}")
            }
            TerrainConfigError::NonFinite { field } => write!(f, "{field} is not a finite number"),
            TerrainConfigError::NegativeNoisePower(value) => {
                write!(f, "noise power must not be negative, got {value}")
            }
            TerrainConfigError::EmptyGradient => write!(f, "color gradient has no keys"),
            TerrainConfigError::Io(err) => write!(f, "failed to read terrain config: {err}"),
            TerrainConfigError::Parse(err) => write!(f, "failed to parse terrain config: {err}"),
        }
    }
}

impl std::error::Error for TerrainConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerrainConfigError::Io(err) => Some(err),
            TerrainConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TerrainConfigError {
    fn from(err: std::io::Error) -> Self {
        TerrainConfigError::Io(err)
    }
}

impl From<serde_json::Error> for TerrainConfigError {
    fn from(err: serde_json::Error) -> Self {
        TerrainConfigError::Parse(err)
    }
}

/// Roughness of one elevation band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayerSettings {
    pub height_variety: f32,
    pub density: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    pub move_x: bool,
    pub move_z: bool,
    pub speed: f32,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            move_x: false,
            move_z: false,
            speed: defaults::FLOW_SPEED,
        }
    }
}

impl FlowSettings {
    pub fn velocity(&self) -> (f32, f32) {
        let speed_x = if self.move_x { self.speed } else { 0.0 };
        let speed_z = if self.move_z { self.speed } else { 0.0 };
        (speed_x, speed_z)
    }
}

#[derive(Resource, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    pub terrain_length: u32,
    pub terrain_width: u32,
    pub seed: u32,
    pub height_variety: f32,
    pub noise_power: f32,
    pub height_density: f32,
    pub relative_water_height: f32,
    pub lock_gradient_on_current_heights: bool,
    pub lock_water_plane_on_current_heights: bool,
    pub lower_layer: NoiseLayerSettings,
    /// Fraction of the elevation range, from the top, that uses `upper_layer`. 0 disables it.
    pub upper_height_percent: f32,
    pub upper_layer: NoiseLayerSettings,
    pub flow: FlowSettings,
    pub noise_offset_x: f32,
    pub noise_offset_z: f32,
    pub gradient: ColorGradient,
    pub water_color: [f32; 4],
    pub mountain_gradient: ColorGradient,
    pub island_gradient: ColorGradient,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        use defaults::colors::*;
        use defaults::*;

        Self {
            terrain_length: TERRAIN_LENGTH,
            terrain_width: TERRAIN_WIDTH,
            seed: SEED,
            height_variety: HEIGHT_VARIETY,
            noise_power: NOISE_POWER,
            height_density: HEIGHT_DENSITY,
            relative_water_height: RELATIVE_WATER_HEIGHT,
            lock_gradient_on_current_heights: true,
            lock_water_plane_on_current_heights: false,
            lower_layer: NoiseLayerSettings {
                height_variety: LOWER_LAYER_HEIGHT_VARIETY,
                density: LOWER_LAYER_DENSITY,
            },
            upper_height_percent: UPPER_HEIGHT_PERCENT,
            upper_layer: NoiseLayerSettings {
                height_variety: UPPER_LAYER_HEIGHT_VARIETY,
                density: UPPER_LAYER_DENSITY,
            },
            flow: FlowSettings::default(),
            noise_offset_x: 0.0,
            noise_offset_z: 0.0,
            gradient: ColorGradient::new(TERRAIN_GRADIENT),
            water_color: WATER_COLOR,
            mountain_gradient: ColorGradient::new(MOUNTAIN_GRADIENT),
            island_gradient: ColorGradient::new(ISLAND_GRADIENT),
        }
    }
}

/// Vertex count `(L+3)(W+3)` and index count `(L+2)(W+2)*6` must both fit in `u32`.
fn grid_fits_u32_indices(length: u32, width: u32) -> bool {
    let vertices = length
        .checked_add(3)
        .zip(width.checked_add(3))
        .and_then(|(l, w)| l.checked_mul(w));
    let indices = length
        .checked_add(2)
        .zip(width.checked_add(2))
        .and_then(|(l, w)| l.checked_mul(w))
        .and_then(|cells| cells.checked_mul(6));
    vertices.is_some() && indices.is_some()
}

impl TerrainConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TerrainConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TerrainConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid node count along x, including the one-node rim on each side.
    pub fn mesh_length(&self) -> u32 {
        self.terrain_length + 2
    }

    pub fn mesh_width(&self) -> u32 {
        self.terrain_width + 2
    }

    pub fn validate(&self) -> Result<(), TerrainConfigError> {
        if self.terrain_length == 0 || self.terrain_width == 0 {
            return Err(TerrainConfigError::EmptyGrid);
        }
        if !grid_fits_u32_indices(self.terrain_length, self.terrain_width) {
            return Err(TerrainConfigError::GridTooLarge {
                length: self.terrain_length,
                width: self.terrain_width,
            });
        }

        let finite_fields = [
            ("height_variety", self.height_variety),
            ("noise_power", self.noise_power),
            ("height_density", self.height_density),
            ("relative_water_height", self.relative_water_height),
            ("upper_height_percent", self.upper_height_percent),
            ("flow.speed", self.flow.speed),
            ("noise_offset_x", self.noise_offset_x),
            ("noise_offset_z", self.noise_offset_z),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(TerrainConfigError::NonFinite { field });
            }
        }

        if !(0.0..=defaults::MAX_HEIGHT_DENSITY).contains(&self.height_density) {
            return Err(TerrainConfigError::DensityOutOfRange(self.height_density));
        }
        if self.noise_power < 0.0 {
            return Err(TerrainConfigError::NegativeNoisePower(self.noise_power));
        }

        let fractions = [
            ("relative_water_height", self.relative_water_height),
            ("upper_height_percent", self.upper_height_percent),
            ("lower_layer.height_variety", self.lower_layer.height_variety),
            ("lower_layer.density", self.lower_layer.density),
            ("upper_layer.height_variety", self.upper_layer.height_variety),
            ("upper_layer.density", self.upper_layer.density),
        ];
        for (field, value) in fractions {
            if !value.is_finite() {
                return Err(TerrainConfigError::NonFinite { field });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(TerrainConfigError::FractionOutOfRange { field, value });
            }
        }

        if self.gradient.is_empty() {
            return Err(TerrainConfigError::EmptyGradient);
        }

        Ok(())
    }
}
