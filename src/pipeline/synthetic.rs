//! Procedural slice phantom for demos and end-to-end tests
//!
//! An elliptical tissue body with faint smoothed texture, a brighter inner
//! ellipse, and one injected hyperintense disk.

use crate::findings::BoundingBox;
use crate::morphology::smoothing::gaussian_filter;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

const TISSUE_SEMI_AXES: (f64, f64) = (0.7, 0.85);
const TISSUE_LEVEL: f64 = 0.5;
const TEXTURE_SIGMA: f64 = 10.0;
const TEXTURE_AMPLITUDE: f64 = 0.05;
const INNER_SEMI_AXES: (f64, f64) = (0.4, 0.5);
const INNER_BOOST: f64 = 0.15;

/// Center of the injected disk in normalized (x, y) coordinates
pub const LESION_CENTER: (f64, f64) = (0.25, -0.15);
/// Radius of the injected disk in normalized units
pub const LESION_RADIUS: f64 = 0.12;
/// Intensity added inside the injected disk
pub const LESION_BOOST: f64 = 0.35;

/// Generated slice and the ground-truth location of its lesion
#[derive(Debug, Clone)]
pub struct Phantom {
    /// Unit-range image, `size x size`
    pub image: Array2<f64>,
    /// Pixel bounding box of the injected disk
    pub lesion: Option<BoundingBox>,
}

fn inside_ellipse(x: f64, y: f64, (a, b): (f64, f64)) -> bool {
    (x / a).powi(2) + (y / b).powi(2) < 1.0
}

fn inside_lesion(x: f64, y: f64) -> bool {
    (x - LESION_CENTER.0).powi(2) + (y - LESION_CENTER.1).powi(2) < LESION_RADIUS.powi(2)
}

// Evenly spaced samples over [-1, 1], endpoints included
fn coordinate(index: usize, size: usize) -> f64 {
    if size < 2 {
        return -1.0;
    }
    2.0f64.mul_add(index as f64 / (size - 1) as f64, -1.0)
}

// Box-Muller transform; 1 - u keeps the logarithm finite
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Build a `size x size` phantom with texture drawn from `seed`
pub fn synthetic_phantom(size: usize, seed: u64) -> Phantom {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Array2::from_shape_simple_fn((size, size), || standard_normal(&mut rng));
    let texture = gaussian_filter(&noise, TEXTURE_SIGMA);

    let mut lesion_pixels = Vec::new();
    let image = Array2::from_shape_fn((size, size), |(row, col)| {
        let x = coordinate(col, size);
        let y = coordinate(row, size);
        let mut value = 0.0;

        if inside_ellipse(x, y, TISSUE_SEMI_AXES) {
            let grain = texture.get([row, col]).copied().unwrap_or(0.0);
            value += TEXTURE_AMPLITUDE.mul_add(grain, TISSUE_LEVEL);
        }
        if inside_ellipse(x, y, INNER_SEMI_AXES) {
            value += INNER_BOOST;
        }
        if inside_lesion(x, y) {
            value += LESION_BOOST;
            lesion_pixels.push([row, col]);
        }

        f64::clamp(value, 0.0, 1.0)
    });

    Phantom {
        image,
        lesion: BoundingBox::enclosing(&lesion_pixels),
    }
}
