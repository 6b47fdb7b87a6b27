use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::terrain::gradient::{inverse_lerp, ColorGradient};
use crate::terrain::heightfield::Heightfield;

/// Top-down image of a heightfield, one pixel per grid node, colored like the terrain mesh.
pub fn render_heightfield_preview(
    heightfield: &Heightfield,
    gradient: &ColorGradient,
    (gradient_min, gradient_max): (f32, f32),
) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
    let width = heightfield.mesh_length() + 1;
    let height = heightfield.mesh_width() + 1;

    ImageBuffer::from_fn(width, height, |x, y| {
        // image rows run top-down, grid z runs away from the viewer
        let z = height - 1 - y;
        let elevation = heightfield.vertices()[heightfield.linear_index(x, z)][1];
        let color = gradient.evaluate(inverse_lerp(gradient_min, gradient_max, elevation));
        Rgba(color.map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8))
    })
}

pub fn export_heightfield_preview<P: AsRef<Path>>(
    heightfield: &Heightfield,
    gradient: &ColorGradient,
    gradient_bounds: (f32, f32),
    path: P,
) -> image::ImageResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    render_heightfield_preview(heightfield, gradient, gradient_bounds).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::config::NoiseLayerSettings;
    use crate::terrain::heightfield::{
        ElevationStats, HeightfieldSynthesizer, NoiseOffset, NoiseParameters,
    };

    #[test]
    fn preview_has_one_pixel_per_node_and_darkest_rim() {
        let layer = NoiseLayerSettings {
            height_variety: 0.2,
            density: 0.2,
        };
        let params = NoiseParameters {
            height_density: 0.1,
            height_variety: 10.0,
            noise_power: 1.0,
            upper_height_percent: 0.0,
            lower_layer: layer,
            upper_layer: layer,
        };
        let mut field = HeightfieldSynthesizer::new(0).synthesize(
            6,
            4,
            &params,
            NoiseOffset::default(),
            ElevationStats::default(),
        );
        field.close_edges();
        let stats = field.stats();
        let gradient =
            ColorGradient::new([(0.0, [0.0, 0.0, 0.0, 1.0]), (1.0, [1.0, 1.0, 1.0, 1.0])]);

        let image = render_heightfield_preview(&field, &gradient, (stats.min, stats.max));
        assert_eq!(image.dimensions(), (7, 5));
        assert_eq!(*image.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*image.get_pixel(6, 4), Rgba([0, 0, 0, 255]));
    }
}
