use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::gradient::{inverse_lerp, BoundsLatch, ColorGradient};
use super::heightfield::Heightfield;

/// Engine-independent triangle list with per-vertex attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        );

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));

        mesh
    }
}

/// Two triangles per grid cell, wound so faces point up (+Y).
pub fn triangulate_grid(mesh_length: u32, mesh_width: u32) -> Vec<u32> {
    let row_stride = mesh_length + 1;
    let mut indices = Vec::with_capacity((mesh_length * mesh_width * 6) as usize);

    for z in 0..mesh_width {
        for x in 0..mesh_length {
            let vertex = z * row_stride + x;
            indices.extend_from_slice(&[
                vertex,
                vertex + row_stride,
                vertex + 1,
                vertex + 1,
                vertex + row_stride,
                vertex + row_stride + 1,
            ]);
        }
    }

    indices
}

/// Smooth normals from area-weighted face normals. Vertices without usable faces point up.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let pa = Vec3::from(positions[a]);
        let pb = Vec3::from(positions[b]);
        let pc = Vec3::from(positions[c]);
        let face = (pb - pa).cross(pc - pa);

        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated
        .into_iter()
        .map(|normal| normal.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// Builds the colored terrain mesh from a closed heightfield.
#[derive(Clone, Debug)]
pub struct TerrainMeshBuilder {
    gradient_latch: BoundsLatch,
}

impl TerrainMeshBuilder {
    pub fn new(lock_gradient: bool) -> Self {
        Self {
            gradient_latch: BoundsLatch::new("gradient", lock_gradient),
        }
    }

    /// Requests that the next build freezes gradient bounds to that pass's statistics.
    pub fn lock_gradient(&mut self) {
        self.gradient_latch.arm();
    }

    pub fn gradient_latch(&self) -> &BoundsLatch {
        &self.gradient_latch
    }

    pub fn build(&mut self, heightfield: &Heightfield, gradient: &ColorGradient) -> MeshData {
        let positions = heightfield.vertices().to_vec();
        let indices = triangulate_grid(heightfield.mesh_length(), heightfield.mesh_width());

        let (gradient_min, gradient_max) = self.gradient_latch.resolve(heightfield.stats());
        let colors = positions
            .iter()
            .map(|position| gradient.evaluate(inverse_lerp(gradient_min, gradient_max, position[1])))
            .collect();

        let normals = compute_normals(&positions, &indices);

        MeshData {
            positions,
            normals,
            colors,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::NoiseLayerSettings;
    use crate::terrain::gradient::LatchState;
    use crate::terrain::heightfield::{
        ElevationStats, HeightfieldSynthesizer, NoiseOffset, NoiseParameters,
    };

    fn heightfield(length: u32, width: u32, offset: NoiseOffset) -> Heightfield {
        let layer = NoiseLayerSettings {
            height_variety: 0.2,
            density: 0.2,
        };
        let params = NoiseParameters {
            height_density: 0.08,
            height_variety: 10.0,
            noise_power: 1.0,
            upper_height_percent: 0.0,
            lower_layer: layer,
            upper_layer: layer,
        };
        let mut field = HeightfieldSynthesizer::new(0).synthesize(
            length + 2,
            width + 2,
            &params,
            offset,
            ElevationStats::default(),
        );
        field.close_edges();
        field
    }

    fn black_to_white() -> ColorGradient {
        ColorGradient::new([(0.0, [0.0, 0.0, 0.0, 1.0]), (1.0, [1.0, 1.0, 1.0, 1.0])])
    }

    #[test]
    fn index_count_and_first_cell_winding() {
        let indices = triangulate_grid(3, 2);
        assert_eq!(indices.len(), 3 * 2 * 6);
        assert_eq!(&indices[..6], &[0, 4, 1, 1, 4, 5]);
        assert_eq!(&indices[6..12], &[1, 5, 2, 2, 5, 6]);
        // second row starts on the next vertex row
        assert_eq!(&indices[18..24], &[4, 8, 5, 5, 8, 9]);
        assert!(indices.iter().all(|&i| i < 4 * 3));
    }

    #[test]
    fn mesh_sizes_follow_grid_dimensions() {
        for (length, width) in [(1, 1), (4, 4), (6, 2)] {
            let field = heightfield(length, width, NoiseOffset::default());
            let mesh = TerrainMeshBuilder::new(true).build(&field, &black_to_white());
            assert_eq!(mesh.vertex_count(), ((length + 3) * (width + 3)) as usize);
            assert_eq!(mesh.indices.len(), ((length + 2) * (width + 2) * 6) as usize);
            assert_eq!(mesh.colors.len(), mesh.vertex_count());
            assert_eq!(mesh.normals.len(), mesh.vertex_count());
        }
    }

    #[test]
    fn flat_grid_normals_point_up() {
        let positions: Vec<[f32; 3]> = (0..3)
            .flat_map(|z| (0..3).map(move |x| [x as f32, 2.0, z as f32]))
            .collect();
        let normals = compute_normals(&positions, &triangulate_grid(2, 2));
        for normal in normals {
            assert!((Vec3::from(normal) - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn colors_span_gradient_when_bounds_are_locked_to_current_pass() {
        let field = heightfield(8, 8, NoiseOffset::default());
        let mut builder = TerrainMeshBuilder::new(true);
        let mesh = builder.build(&field, &black_to_white());
        let stats = field.stats();

        assert_eq!(builder.gradient_latch().bounds(), (stats.min, stats.max));
        assert_eq!(builder.gradient_latch().state(), LatchState::Applied);

        for (position, color) in mesh.positions.iter().zip(&mesh.colors) {
            let expected = inverse_lerp(stats.min, stats.max, position[1]);
            assert!((color[0] - expected).abs() < 1e-5);
        }
        assert!(mesh.colors.iter().any(|c| c[0] == 0.0));
    }

    #[test]
    fn locked_gradient_bounds_survive_new_passes() {
        let mut builder = TerrainMeshBuilder::new(true);
        let first = heightfield(6, 6, NoiseOffset::default());
        builder.build(&first, &black_to_white());
        let frozen = builder.gradient_latch().bounds();

        let moved = heightfield(6, 6, NoiseOffset { x: 40.0, z: 13.0 });
        assert_ne!(moved.stats(), first.stats());
        builder.build(&moved, &black_to_white());
        assert_eq!(builder.gradient_latch().bounds(), frozen);

        builder.lock_gradient();
        builder.build(&moved, &black_to_white());
        let stats = moved.stats();
        assert_eq!(builder.gradient_latch().bounds(), (stats.min, stats.max));
    }
}
