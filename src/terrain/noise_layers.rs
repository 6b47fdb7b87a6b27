use noise::{NoiseFn, Perlin};

use super::config::NoiseLayerSettings;
use super::defaults::{OCTAVE_ONE_PHASE, OCTAVE_TWO_PHASE};

/// Perlin noise remapped to `[0, 1]`. Pure function of its seed and coordinates.
#[derive(Clone)]
pub struct CoherentNoise {
    perlin: Perlin,
    seed: u32,
}

impl CoherentNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample_2d(&self, x: f64, z: f64) -> f32 {
        let raw = self.perlin.get([x, z]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

/// Grid node and scroll offset a layer blend samples at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSample {
    pub x: f64,
    pub z: f64,
    pub offset_x: f64,
    pub offset_z: f64,
}

/// Adds two detail octaves to `height` and renormalizes so the result keeps the base scale.
///
/// The second octave runs at twice the density and half the weight of the first.
pub fn blend_layers(
    noise: &CoherentNoise,
    height: f32,
    layer: NoiseLayerSettings,
    sample: LayerSample,
) -> f32 {
    let variety = layer.height_variety;
    let density = layer.density as f64;

    let octave_one = noise.sample_2d(
        sample.x * density + sample.offset_x + OCTAVE_ONE_PHASE.0,
        sample.z * density + sample.offset_z + OCTAVE_ONE_PHASE.1,
    );
    let octave_two = noise.sample_2d(
        sample.x * density * 2.0 + sample.offset_x + OCTAVE_TWO_PHASE.0,
        sample.z * density * 2.0 + sample.offset_z + OCTAVE_TWO_PHASE.1,
    );

    let blended = height + variety * octave_one + variety / 2.0 * octave_two;
    blended / (1.0 + variety + variety / 2.0)
}
