use super::config::{NoiseLayerSettings, TerrainConfig};
use super::gradient::lerp_f32;
use super::noise_layers::{blend_layers, CoherentNoise, LayerSample};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElevationStats {
    pub min: f32,
    pub max: f32,
}

impl ElevationStats {
    pub fn range(&self) -> f32 {
        self.max - self.min
    }

    /// Elevation above which nodes are blended with the upper layer.
    pub fn upper_band_start(&self, upper_height_percent: f32) -> f32 {
        let height_difference = self.range();
        let upper_range = height_difference * upper_height_percent;
        self.min + (height_difference - upper_range)
    }
}

/// Shape parameters of one synthesis pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParameters {
    pub height_density: f32,
    pub height_variety: f32,
    pub noise_power: f32,
    pub upper_height_percent: f32,
    pub lower_layer: NoiseLayerSettings,
    pub upper_layer: NoiseLayerSettings,
}

impl NoiseParameters {
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self {
            height_density: config.height_density,
            height_variety: config.height_variety,
            noise_power: config.noise_power,
            upper_height_percent: config.upper_height_percent,
            lower_layer: config.lower_layer,
            upper_layer: config.upper_layer,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseOffset {
    pub x: f32,
    pub z: f32,
}

/// Grid of `(mesh_length + 1) * (mesh_width + 1)` vertices, z-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightfield {
    mesh_length: u32,
    mesh_width: u32,
    vertices: Vec<[f32; 3]>,
    stats: ElevationStats,
}

impl Heightfield {
    pub fn mesh_length(&self) -> u32 {
        self.mesh_length
    }

    pub fn mesh_width(&self) -> u32 {
        self.mesh_width
    }

    pub fn row_stride(&self) -> usize {
        self.mesh_length as usize + 1
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn stats(&self) -> ElevationStats {
        self.stats
    }

    #[inline]
    pub fn linear_index(&self, x: u32, z: u32) -> usize {
        debug_assert!(x <= self.mesh_length && z <= self.mesh_width);
        z as usize * self.row_stride() + x as usize
    }

    /// Grid node a vertex was generated for, independent of where edge closing moved it.
    #[inline]
    pub fn grid_coords(&self, index: usize) -> (u32, u32) {
        let stride = self.row_stride();
        ((index % stride) as u32, (index / stride) as u32)
    }

    pub fn is_rim(&self, x: u32, z: u32) -> bool {
        x == 0 || x == self.mesh_length || z == 0 || z == self.mesh_width
    }

    /// Pulls every rim node one unit inward and drops it to the pass minimum.
    ///
    /// Rules run x-first then z, so corners end where the z rule puts them. Targets depend only on
    /// grid coordinates, which makes repeated calls leave the vertices unchanged.
    pub fn close_edges(&mut self) {
        let length = self.mesh_length as f32;
        let width = self.mesh_width as f32;
        let floor = self.stats.min;

        for index in 0..self.vertices.len() {
            let (grid_x, grid_z) = self.grid_coords(index);
            if !self.is_rim(grid_x, grid_z) {
                continue;
            }

            let x = grid_x as f32;
            let z = grid_z as f32;
            let mut position = self.vertices[index];

            if grid_x == 0 {
                position = [x + 1.0, floor, z];
            }
            if grid_x == self.mesh_length {
                position = [x - 1.0, floor, z];
            }
            if grid_z == 0 {
                position = [x.clamp(0.0, length - 1.0), floor, z + 1.0];
            }
            if grid_z == self.mesh_width {
                position = [x.clamp(1.0, length), floor, z - 1.0];
            }

            debug_assert!(position[2] >= 0.0 && position[2] <= width);
            self.vertices[index] = position;
        }
    }
}

/// Turns layered coherent noise into elevations over a padded grid.
#[derive(Clone)]
pub struct HeightfieldSynthesizer {
    noise: CoherentNoise,
}

impl HeightfieldSynthesizer {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: CoherentNoise::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Samples every node of the grid.
    ///
    /// `previous` are the statistics of the last pass; they place the lower/upper band split.
    /// Before any pass they are `0..0`, which sends every node to the lower band.
    pub fn synthesize(
        &self,
        mesh_length: u32,
        mesh_width: u32,
        params: &NoiseParameters,
        offset: NoiseOffset,
        previous: ElevationStats,
    ) -> Heightfield {
        assert!(
            mesh_length > 0 && mesh_width > 0,
            "heightfield needs at least one cell per axis"
        );

        let stride = mesh_length as usize + 1;
        let mut vertices = Vec::with_capacity(stride * (mesh_width as usize + 1));
        let mut stats = ElevationStats::default();

        let density = params.height_density as f64;
        let offset_x = offset.x as f64;
        let offset_z = offset.z as f64;
        let upper_band_start = previous.upper_band_start(params.upper_height_percent);

        for z in 0..=mesh_width {
            for x in 0..=mesh_length {
                let base = self.noise.sample_2d(
                    x as f64 * density + offset_x,
                    z as f64 * density + offset_z,
                );

                let layer = if lerp_f32(previous.min, previous.max, base) <= upper_band_start {
                    params.lower_layer
                } else {
                    params.upper_layer
                };
                let sample = LayerSample {
                    x: x as f64,
                    z: z as f64,
                    offset_x,
                    offset_z,
                };
                let blended = blend_layers(&self.noise, base, layer, sample).max(0.0);
                let height = blended.powf(params.noise_power) * params.height_variety;

                if vertices.is_empty() {
                    stats = ElevationStats {
                        min: height,
                        max: height,
                    };
                } else {
                    stats.min = stats.min.min(height);
                    stats.max = stats.max.max(height);
                }

                vertices.push([x as f32, height, z as f32]);
            }
        }

        Heightfield {
            mesh_length,
            mesh_width,
            vertices,
            stats,
        }
    }
}
