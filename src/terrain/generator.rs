use bevy::log::{debug, info};

use super::config::{TerrainConfig, TerrainConfigError};
use super::defaults::WATER_HEIGHT_STEP;
use super::heightfield::{
    ElevationStats, Heightfield, HeightfieldSynthesizer, NoiseOffset, NoiseParameters,
};
use super::mesh::{MeshData, TerrainMeshBuilder};
use super::presets::{CommandQueue, LandscapePreset, TerrainCommand};
use crate::water::WaterPlaneBuilder;

/// Output of one regeneration tick. Every field replaces the previous tick's wholesale.
#[derive(Clone, Debug)]
pub struct TerrainFrame {
    pub heightfield: Heightfield,
    pub terrain: MeshData,
    pub water: MeshData,
    pub stats: ElevationStats,
    pub gradient_bounds: (f32, f32),
}

/// Runs presets, synthesis, terrain meshing, the water plane and flow, in that order.
pub struct TerrainGenerator {
    config: TerrainConfig,
    synthesizer: HeightfieldSynthesizer,
    terrain_builder: TerrainMeshBuilder,
    water_builder: WaterPlaneBuilder,
    commands: CommandQueue,
    active_preset: Option<LandscapePreset>,
    /// Statistics of the last pass; they place the next pass's band split.
    previous: ElevationStats,
    generated: bool,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        let synthesizer = HeightfieldSynthesizer::new(config.seed);
        let terrain_builder = TerrainMeshBuilder::new(config.lock_gradient_on_current_heights);
        let water_builder = WaterPlaneBuilder::new(config.lock_water_plane_on_current_heights);

        Self {
            config,
            synthesizer,
            terrain_builder,
            water_builder,
            commands: CommandQueue::default(),
            active_preset: None,
            previous: ElevationStats::default(),
            generated: false,
        }
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TerrainConfig {
        &mut self.config
    }

    pub fn submit(&mut self, command: TerrainCommand) {
        self.commands.push(command);
    }

    pub fn active_preset(&self) -> Option<LandscapePreset> {
        self.active_preset
    }

    pub fn offset(&self) -> NoiseOffset {
        NoiseOffset {
            x: self.config.noise_offset_x,
            z: self.config.noise_offset_z,
        }
    }

    /// `None` until the first pass has run.
    pub fn stats(&self) -> Option<ElevationStats> {
        self.generated.then_some(self.previous)
    }

    pub fn min_elevation(&self) -> Option<f32> {
        self.stats().map(|stats| stats.min)
    }

    pub fn max_elevation(&self) -> Option<f32> {
        self.stats().map(|stats| stats.max)
    }

    pub fn gradient_bounds(&self) -> (f32, f32) {
        self.terrain_builder.gradient_latch().bounds()
    }

    pub fn water_bounds(&self) -> (f32, f32) {
        self.water_builder.water_latch().bounds()
    }

    /// One tick. An invalid configuration is rejected before any state changes except consumed commands.
    pub fn regenerate(&mut self, dt: f32) -> Result<TerrainFrame, TerrainConfigError> {
        self.apply_commands();
        self.config.validate()?;

        if self.synthesizer.seed() != self.config.seed {
            info!("Reseeding terrain noise with seed {}", self.config.seed);
            self.synthesizer = HeightfieldSynthesizer::new(self.config.seed);
        }

        let params = NoiseParameters::from_config(&self.config);
        let mut heightfield = self.synthesizer.synthesize(
            self.config.mesh_length(),
            self.config.mesh_width(),
            &params,
            self.offset(),
            self.previous,
        );
        heightfield.close_edges();

        let stats = heightfield.stats();
        self.previous = stats;
        self.generated = true;

        let terrain = self.terrain_builder.build(&heightfield, &self.config.gradient);
        let water = self.water_builder.build(
            self.config.relative_water_height,
            stats,
            self.config.terrain_length,
            self.config.terrain_width,
            self.config.water_color,
        );

        self.advance_flow(dt);

        debug!(
            "Regenerated terrain: {} vertices, {} indices, elevation {:.3}..{:.3}, water {}",
            terrain.vertex_count(),
            terrain.indices.len(),
            stats.min,
            stats.max,
            if water.is_empty() { "off" } else { "on" }
        );

        Ok(TerrainFrame {
            heightfield,
            terrain,
            water,
            stats,
            gradient_bounds: self.gradient_bounds(),
        })
    }

    fn apply_commands(&mut self) {
        let pending: Vec<TerrainCommand> = self.commands.drain().collect();
        for command in pending {
            match command {
                TerrainCommand::ApplyPreset(preset) => {
                    preset.apply(&mut self.config);
                    self.terrain_builder.lock_gradient();
                    self.water_builder.lock_water();
                    if let Some(previous) = self.active_preset.replace(preset) {
                        if previous != preset {
                            info!("Landscape preset {} replaces {}", preset, previous);
                        }
                    }
                    info!("Applied {} landscape preset", preset);
                }
                TerrainCommand::LockGradient => self.terrain_builder.lock_gradient(),
                TerrainCommand::LockWaterPlane => self.water_builder.lock_water(),
                TerrainCommand::ToggleFlowX => self.config.flow.move_x = !self.config.flow.move_x,
                TerrainCommand::ToggleFlowZ => self.config.flow.move_z = !self.config.flow.move_z,
                TerrainCommand::AdjustWaterHeight(delta) => {
                    let height = (self.config.relative_water_height + delta).clamp(0.0, 1.0);
                    // stepping down must land on exactly zero, which disables the plane
                    self.config.relative_water_height =
                        if height < WATER_HEIGHT_STEP * 0.5 { 0.0 } else { height };
                }
            }
        }
    }

    fn advance_flow(&mut self, dt: f32) {
        let (speed_x, speed_z) = self.config.flow.velocity();
        self.config.noise_offset_x += dt * speed_x;
        self.config.noise_offset_z += dt * speed_z;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::NoiseLayerSettings;
    use crate::terrain::gradient::LatchState;

    fn small_config() -> TerrainConfig {
        let flat_layer = NoiseLayerSettings {
            height_variety: 0.0,
            density: 0.2,
        };
        TerrainConfig {
            terrain_length: 4,
            terrain_width: 4,
            height_density: 0.05,
            height_variety: 10.0,
            noise_power: 1.0,
            lower_layer: flat_layer,
            upper_layer: flat_layer,
            noise_offset_x: 0.0,
            noise_offset_z: 0.0,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn small_grid_end_to_end() {
        let mut generator = TerrainGenerator::new(small_config());
        assert_eq!(generator.min_elevation(), None);

        let frame = generator.regenerate(0.016).expect("valid config");

        assert_eq!(frame.terrain.vertex_count(), 7 * 7);
        assert_eq!(frame.terrain.indices.len(), 6 * 6 * 6);
        assert!(frame.stats.min <= frame.stats.max);
        assert!(frame.stats.max <= 10.0);
        assert_eq!(generator.min_elevation(), Some(frame.stats.min));
        assert_eq!(generator.max_elevation(), Some(frame.stats.max));

        for (index, position) in frame.terrain.positions.iter().enumerate() {
            let (x, z) = frame.heightfield.grid_coords(index);
            if frame.heightfield.is_rim(x, z) {
                assert_eq!(position[1], frame.stats.min);
            }
        }
        assert!(frame.water.is_empty());
    }

    #[test]
    fn regeneration_is_reproducible() {
        let mut a = TerrainGenerator::new(small_config());
        let mut b = TerrainGenerator::new(small_config());
        for _ in 0..3 {
            let frame_a = a.regenerate(0.1).expect("valid config");
            let frame_b = b.regenerate(0.1).expect("valid config");
            assert_eq!(frame_a.terrain, frame_b.terrain);
        }
    }

    #[test]
    fn gradient_locks_on_first_pass_and_holds() {
        let mut config = small_config();
        config.flow.move_x = true;
        config.flow.speed = 20.0;
        let mut generator = TerrainGenerator::new(config);

        let first = generator.regenerate(1.0).expect("valid config");
        assert_eq!(first.gradient_bounds, (first.stats.min, first.stats.max));

        let second = generator.regenerate(1.0).expect("valid config");
        assert_ne!(second.stats, first.stats);
        assert_eq!(second.gradient_bounds, first.gradient_bounds);

        generator.submit(TerrainCommand::LockGradient);
        let third = generator.regenerate(1.0).expect("valid config");
        assert_eq!(third.gradient_bounds, (third.stats.min, third.stats.max));
    }

    #[test]
    fn flow_advances_offsets_after_the_tick() {
        let mut config = small_config();
        config.flow.move_x = true;
        config.flow.speed = 0.4;
        let mut generator = TerrainGenerator::new(config.clone());

        let moving = generator.regenerate(0.5).expect("valid config");
        let offset = generator.offset();
        assert!((offset.x - 0.2).abs() < 1e-6);
        assert_eq!(offset.z, 0.0);

        config.flow.move_x = false;
        let still = TerrainGenerator::new(config)
            .regenerate(0.5)
            .expect("valid config");
        assert_eq!(moving.terrain.positions, still.terrain.positions);
    }

    #[test]
    fn toggles_and_water_adjustments_apply_on_next_tick() {
        let mut generator = TerrainGenerator::new(small_config());
        generator.submit(TerrainCommand::ToggleFlowZ);
        generator.submit(TerrainCommand::AdjustWaterHeight(0.3));
        generator.submit(TerrainCommand::AdjustWaterHeight(0.9));
        assert!(!generator.config().flow.move_z);

        generator.regenerate(0.0).expect("valid config");
        assert!(generator.config().flow.move_z);
        assert_eq!(generator.config().relative_water_height, 1.0);
    }

    #[test]
    fn stepping_water_down_reaches_exact_zero() {
        let mut generator = TerrainGenerator::new(TerrainConfig {
            relative_water_height: 0.09,
            ..small_config()
        });
        for _ in 0..9 {
            generator.submit(TerrainCommand::AdjustWaterHeight(-WATER_HEIGHT_STEP));
        }
        let frame = generator.regenerate(0.0).expect("valid config");
        assert_eq!(generator.config().relative_water_height, 0.0);
        assert!(frame.water.is_empty());

        generator.submit(TerrainCommand::AdjustWaterHeight(WATER_HEIGHT_STEP));
        let frame = generator.regenerate(0.0).expect("valid config");
        assert_eq!(generator.config().relative_water_height, WATER_HEIGHT_STEP);
        assert!(!frame.water.is_empty());
    }

    #[test]
    fn later_preset_in_one_tick_wins() {
        let mut generator = TerrainGenerator::new(small_config());
        generator.submit(TerrainCommand::ApplyPreset(LandscapePreset::Islands));
        generator.submit(TerrainCommand::ApplyPreset(LandscapePreset::Mountains));
        generator.regenerate(0.0).expect("valid config");

        assert_eq!(generator.active_preset(), Some(LandscapePreset::Mountains));
        let config = generator.config();
        assert_eq!(config.height_variety, 25.0);
        assert_eq!(config.noise_power, 2.0);
        assert_eq!(config.gradient, config.mountain_gradient);
    }

    #[test]
    fn mountains_preset_overrides_islands_and_locks_bounds() {
        let mut generator = TerrainGenerator::new(small_config());
        generator.submit(TerrainCommand::ApplyPreset(LandscapePreset::Islands));
        generator.regenerate(0.0).expect("valid config");
        assert_eq!(generator.active_preset(), Some(LandscapePreset::Islands));

        generator.submit(TerrainCommand::ApplyPreset(LandscapePreset::Mountains));
        let frame = generator.regenerate(0.0).expect("valid config");

        assert_eq!(generator.active_preset(), Some(LandscapePreset::Mountains));
        let config = generator.config();
        assert_eq!(config.height_variety, 25.0);
        assert_eq!(config.noise_power, 2.0);
        assert_eq!(config.relative_water_height, 0.09);

        let bounds = (frame.stats.min, frame.stats.max);
        assert_eq!(generator.gradient_bounds(), bounds);
        assert_eq!(generator.water_bounds(), bounds);
        assert_eq!(
            generator.water_builder.water_latch().state(),
            LatchState::Applied
        );
        assert!(!frame.water.is_empty());
    }

    #[test]
    fn invalid_config_fails_fast_without_a_pass() {
        let mut generator = TerrainGenerator::new(TerrainConfig {
            terrain_length: 0,
            ..small_config()
        });
        assert!(matches!(
            generator.regenerate(0.1),
            Err(TerrainConfigError::EmptyGrid)
        ));
        assert_eq!(generator.stats(), None);
    }

    #[test]
    fn seed_change_takes_effect_next_tick() {
        let mut generator = TerrainGenerator::new(small_config());
        let first = generator.regenerate(0.0).expect("valid config");
        generator.config_mut().seed = 99;
        let reseeded = generator.regenerate(0.0).expect("valid config");
        assert_ne!(first.terrain.positions, reseeded.terrain.positions);
    }
}
