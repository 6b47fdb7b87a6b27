pub mod base {
    pub const TERRAIN_LENGTH: u32 = 100;
    pub const TERRAIN_WIDTH: u32 = 100;
    pub const SEED: u32 = 0;
}
pub mod height {
    pub const HEIGHT_VARIETY: f32 = 10.0;
    pub const NOISE_POWER: f32 = 1.0;
    pub const HEIGHT_DENSITY: f32 = 0.05;
    pub const MAX_HEIGHT_DENSITY: f32 = 0.5;
    pub const RELATIVE_WATER_HEIGHT: f32 = 0.0;
    /// Relative water height change per adjustment key press.
    pub const WATER_HEIGHT_STEP: f32 = 0.01;
}
pub mod layers {
    pub const LOWER_LAYER_HEIGHT_VARIETY: f32 = 0.2;
    pub const LOWER_LAYER_DENSITY: f32 = 0.2;
    pub const UPPER_HEIGHT_PERCENT: f32 = 0.0;
    pub const UPPER_LAYER_HEIGHT_VARIETY: f32 = 0.2;
    pub const UPPER_LAYER_DENSITY: f32 = 0.2;

    /// Phase offsets keeping the detail octaves decorrelated from the base noise.
    pub const OCTAVE_ONE_PHASE: (f64, f64) = (5.3, 9.1);
    pub const OCTAVE_TWO_PHASE: (f64, f64) = (17.8, 23.5);
}
pub mod flow {
    pub const FLOW_SPEED: f32 = 0.4;
}
pub mod mountains {
    pub const HEIGHT_DENSITY: f32 = 0.045;
    pub const HEIGHT_VARIETY: f32 = 25.0;
    pub const NOISE_POWER: f32 = 2.0;
    pub const LOWER_LAYER_HEIGHT_VARIETY: f32 = 0.15;
    pub const LOWER_LAYER_DENSITY: f32 = 0.1;
    pub const UPPER_HEIGHT_PERCENT: f32 = 0.5;
    pub const UPPER_LAYER_HEIGHT_VARIETY: f32 = 0.2;
    pub const UPPER_LAYER_DENSITY: f32 = 0.2;
    pub const RELATIVE_WATER_HEIGHT: f32 = 0.09;
}
pub mod islands {
    pub const HEIGHT_DENSITY: f32 = 0.035;
    pub const HEIGHT_VARIETY: f32 = 10.0;
    pub const NOISE_POWER: f32 = 1.5;
    pub const LOWER_LAYER_HEIGHT_VARIETY: f32 = 0.2;
    pub const LOWER_LAYER_DENSITY: f32 = 0.15;
    pub const UPPER_HEIGHT_PERCENT: f32 = 0.341;
    pub const UPPER_LAYER_HEIGHT_VARIETY: f32 = 0.2;
    pub const UPPER_LAYER_DENSITY: f32 = 0.3;
    pub const RELATIVE_WATER_HEIGHT: f32 = 0.434;
}
pub mod colors {
    pub const WATER_COLOR: [f32; 4] = [0.09, 0.32, 0.62, 0.8];

    pub const TERRAIN_GRADIENT: [(f32, [f32; 4]); 4] = [
        (0.0, [0.76, 0.70, 0.50, 1.0]),
        (0.3, [0.27, 0.55, 0.24, 1.0]),
        (0.7, [0.42, 0.38, 0.33, 1.0]),
        (1.0, [0.95, 0.95, 0.97, 1.0]),
    ];

    pub const MOUNTAIN_GRADIENT: [(f32, [f32; 4]); 5] = [
        (0.0, [0.20, 0.36, 0.18, 1.0]),
        (0.25, [0.31, 0.47, 0.22, 1.0]),
        (0.55, [0.45, 0.41, 0.36, 1.0]),
        (0.8, [0.58, 0.56, 0.54, 1.0]),
        (0.9, [0.96, 0.96, 0.98, 1.0]),
    ];

    pub const ISLAND_GRADIENT: [(f32, [f32; 4]); 5] = [
        (0.0, [0.05, 0.18, 0.35, 1.0]),
        (0.42, [0.86, 0.80, 0.58, 1.0]),
        (0.5, [0.47, 0.66, 0.29, 1.0]),
        (0.75, [0.18, 0.42, 0.16, 1.0]),
        (1.0, [0.40, 0.35, 0.30, 1.0]),
    ];
}
pub use base::*;
pub use flow::*;
pub use height::*;
pub use layers::*;
