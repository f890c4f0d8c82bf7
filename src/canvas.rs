//! Rendering surface: rasterises a generator into an RGB image.

use crate::color::Color;
use crate::generators::{Generator, Uv};
use crate::params::RenderParameters;
use image::RgbImage;
use rayon::prelude::*;
use sha2::{Digest, Sha256};

/// Final opaque colour at `uv`: the generator's output clamped and
/// composited over the background.
pub fn pixel_color(generator: &dyn Generator, uv: Uv, params: &RenderParameters) -> Color {
    generator
        .color_at(uv, params)
        .clamped()
        .over(params.background)
}

/// Centre of pixel `(x, y)` in uv space. Row 0 is the top of the image.
pub fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> Uv {
    Uv::new(
        (x as f64 + 0.5) / width as f64,
        1.0 - (y as f64 + 0.5) / height as f64,
    )
}

/// Evaluate `generator` once per pixel of a `width` x `height` surface.
///
/// Rows are filled in parallel; each pixel only reads `params` and its own
/// coordinate.
pub fn rasterize(
    generator: &dyn Generator,
    params: &RenderParameters,
    width: u32,
    height: u32,
) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    if width == 0 || height == 0 {
        return image;
    }

    let stride = width as usize * 3;
    image
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let uv = pixel_uv(x as u32, y as u32, width, height);
                px.copy_from_slice(&pixel_color(generator, uv, params).to_rgb8());
            }
        });

    tracing::debug!(
        generator = generator.name(),
        width,
        height,
        "rasterized surface"
    );
    image
}

/// SHA-256 of the raw pixel buffer, hex encoded.
pub fn digest(image: &RgbImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_le_bytes());
    hasher.update(image.height().to_le_bytes());
    hasher.update(image.as_raw());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::CellGenerator;
    use crate::params::CellGrid;
    use pretty_assertions::assert_eq;

    fn reference_params() -> RenderParameters {
        RenderParameters {
            mod1: 0.5,
            mod2: 0.5,
            seed: 0.052645421121269464,
            grid: CellGrid {
                modulus: 6.0,
                wrap: 25.0,
            },
            background: "#0b0b10".parse().unwrap(),
        }
    }

    /// Paints a solid half-transparent white.
    struct Veil;

    impl Generator for Veil {
        fn name(&self) -> &'static str {
            "veil"
        }

        fn color_at(&self, _uv: Uv, _params: &RenderParameters) -> Color {
            Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.5,
            }
        }
    }

    #[test]
    fn pixel_centres_flip_vertically() {
        assert_eq!(pixel_uv(0, 0, 2, 2), Uv::new(0.25, 0.75));
        assert_eq!(pixel_uv(1, 1, 2, 2), Uv::new(0.75, 0.25));
    }

    #[test]
    fn top_left_pixel_of_reference_block() {
        let params = reference_params();
        let uv = pixel_uv(0, 0, 512, 512);
        let c = pixel_color(&CellGenerator::default(), uv, &params);
        assert!(c.r.abs() < 1e-6);
        assert!((c.g - 0.6545084971874737).abs() < 1e-6);
        assert!((c.b - 1.0).abs() < 1e-6);

        let image = rasterize(&CellGenerator::default(), &params, 512, 512);
        assert_eq!(image.get_pixel(0, 0).0, [0, 167, 255]);
    }

    #[test]
    fn translucent_output_blends_with_background() {
        let mut params = reference_params();
        params.background = Color::BLACK;
        let image = rasterize(&Veil, &params, 3, 2);
        assert_eq!(image.get_pixel(2, 1).0, [128, 128, 128]);
    }

    #[test]
    fn zero_sized_surface_is_empty() {
        let image = rasterize(&CellGenerator::default(), &reference_params(), 0, 16);
        assert_eq!(image.as_raw().len(), 0);
    }

    #[test]
    fn digest_is_stable_and_content_sensitive() {
        let gen = CellGenerator::default();
        let a = rasterize(&gen, &reference_params(), 64, 64);
        let b = rasterize(&gen, &reference_params(), 64, 64);
        assert_eq!(digest(&a), digest(&b));
        assert_eq!(digest(&a).len(), 64);

        let mut other = reference_params();
        other.mod2 = 0.1;
        let c = rasterize(&gen, &other, 64, 64);
        assert_ne!(digest(&a), digest(&c));
    }
}
