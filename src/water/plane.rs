use crate::terrain::gradient::{lerp_f32, BoundsLatch};
use crate::terrain::heightfield::ElevationStats;
use crate::terrain::mesh::{compute_normals, MeshData};

const WATER_INDICES: [u32; 6] = [2, 1, 0, 3, 1, 2];

/// Flat quad over the terrain footprint at a height relative to latched elevation bounds.
#[derive(Clone, Debug)]
pub struct WaterPlaneBuilder {
    water_latch: BoundsLatch,
}

impl WaterPlaneBuilder {
    pub fn new(lock_water: bool) -> Self {
        Self {
            water_latch: BoundsLatch::new("water plane", lock_water),
        }
    }

    pub fn lock_water(&mut self) {
        self.water_latch.arm();
    }

    pub fn water_latch(&self) -> &BoundsLatch {
        &self.water_latch
    }

    /// Returns an empty mesh when `relative_height` is exactly zero.
    pub fn build(
        &mut self,
        relative_height: f32,
        stats: ElevationStats,
        footprint_x: u32,
        footprint_z: u32,
        color: [f32; 4],
    ) -> MeshData {
        let (water_min, water_max) = self.water_latch.resolve(stats);

        if relative_height == 0.0 {
            return MeshData::default();
        }

        let height = lerp_f32(water_min, water_max, relative_height);
        let far_x = footprint_x as f32 + 1.0;
        let far_z = footprint_z as f32 + 1.0;

        let positions = vec![
            [1.0, height, 1.0],
            [far_x, height, 1.0],
            [1.0, height, far_z],
            [far_x, height, far_z],
        ];
        let indices = WATER_INDICES.to_vec();
        let normals = compute_normals(&positions, &indices);

        MeshData {
            positions,
            normals,
            colors: vec![color; 4],
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: [f32; 4] = [0.0, 0.2, 0.8, 0.7];

    fn stats(min: f32, max: f32) -> ElevationStats {
        ElevationStats { min, max }
    }

    #[test]
    fn zero_relative_height_disables_plane() {
        let mut builder = WaterPlaneBuilder::new(true);
        let mesh = builder.build(0.0, stats(1.0, 9.0), 10, 10, BLUE);
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn tiny_relative_height_still_builds_plane() {
        let mut builder = WaterPlaneBuilder::new(true);
        let mesh = builder.build(1e-6, stats(1.0, 9.0), 10, 10, BLUE);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn plane_spans_footprint_at_lerped_height() {
        let mut builder = WaterPlaneBuilder::new(true);
        let mesh = builder.build(0.25, stats(2.0, 10.0), 12, 7, BLUE);

        assert_eq!(
            mesh.positions,
            vec![
                [1.0, 4.0, 1.0],
                [13.0, 4.0, 1.0],
                [1.0, 4.0, 8.0],
                [13.0, 4.0, 8.0],
            ]
        );
        assert_eq!(mesh.indices, vec![2, 1, 0, 3, 1, 2]);
        assert!(mesh.colors.iter().all(|c| *c == BLUE));
        for normal in &mesh.normals {
            assert!((normal[1] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn water_bounds_stay_latched_until_relocked() {
        let mut builder = WaterPlaneBuilder::new(true);
        builder.build(0.5, stats(0.0, 10.0), 4, 4, BLUE);

        let mesh = builder.build(0.5, stats(-20.0, 40.0), 4, 4, BLUE);
        assert_eq!(mesh.positions[0][1], 5.0);

        builder.lock_water();
        let mesh = builder.build(0.5, stats(-20.0, 40.0), 4, 4, BLUE);
        assert_eq!(mesh.positions[0][1], 10.0);
    }

    #[test]
    fn latch_fires_even_while_water_is_disabled() {
        let mut builder = WaterPlaneBuilder::new(true);
        builder.build(0.0, stats(3.0, 6.0), 4, 4, BLUE);
        assert_eq!(builder.water_latch().bounds(), (3.0, 6.0));
    }
}
