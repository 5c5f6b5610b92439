//! Snow and flea particle effects.
//!
//! Both effects scatter particles on a transparent layer the size of the base
//! and composite it full-frame. Particles come from a seeded `StdRng`, so the
//! same seed, density and base dimensions always give the same image.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::blend::overlay_full_frame_within;
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::config::Limits;
use crate::error::Result;

/// Snow flakes per pixel at density 1.0.
const SNOW_PER_PIXEL: f32 = 0.02;

/// Flea specks per pixel at density 1.0.
const FLEA_PER_PIXEL: f32 = 0.05;

/// Kind of particle layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Particles {
    /// Soft white flakes of random size and opacity.
    Snow,
    /// Opaque single-pixel specks of random color.
    Flea,
}

/// Clamp density into `[0, 1]`. NaN becomes 0.
pub fn clamp_density(density: f32) -> f32 {
    if density.is_nan() {
        return 0.0;
    }
    density.clamp(0.0, 1.0)
}

/// Sprinkle snow over `base`.
pub fn snow(base: &PixelBuffer, density: f32, seed: u64) -> Result<PixelBuffer> {
    particles_within(base, Particles::Snow, density, seed, &Limits::default())
}

/// Sprinkle flea noise over `base`.
pub fn flea(base: &PixelBuffer, density: f32, seed: u64) -> Result<PixelBuffer> {
    particles_within(base, Particles::Flea, density, seed, &Limits::default())
}

pub(crate) fn particles_within(
    base: &PixelBuffer,
    kind: Particles,
    density: f32,
    seed: u64,
    limits: &Limits,
) -> Result<PixelBuffer> {
    let density_clamped = clamp_density(density);
    if density_clamped != density {
        log::debug!("particle density {} clamped to {}", density, density_clamped);
    }

    let (w, h) = base.dimensions();
    let mut layer = PixelBuffer::blank(w, h, limits)?.into_pixels();
    let mut rng = StdRng::seed_from_u64(seed);

    let per_pixel = match kind {
        Particles::Snow => SNOW_PER_PIXEL,
        Particles::Flea => FLEA_PER_PIXEL,
    };
    let count = (base.pixel_count() as f64 * (per_pixel * density_clamped) as f64).round() as usize;
    log::debug!("{:?}: {} particles on {}x{}", kind, count, w, h);

    let mut put = |x: i64, y: i64, color: [u8; 4]| {
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            return;
        }
        let idx = (y as usize * w as usize + x as usize) * CHANNELS;
        // Overlapping flakes keep the most opaque sample
        if layer[idx + 3] < color[3] {
            layer[idx..idx + CHANNELS].copy_from_slice(&color);
        }
    };

    for _ in 0..count {
        let x = rng.gen_range(0..w) as i64;
        let y = rng.gen_range(0..h) as i64;
        match kind {
            Particles::Snow => {
                let opacity: u8 = rng.gen_range(128..=255);
                let radius: i64 = rng.gen_range(0..=1);
                let flake = [255, 255, 255, opacity];
                put(x, y, flake);
                if radius > 0 {
                    let edge = [255, 255, 255, opacity / 2];
                    put(x - 1, y, edge);
                    put(x + 1, y, edge);
                    put(x, y - 1, edge);
                    put(x, y + 1, edge);
                }
            }
            Particles::Flea => {
                let color = [rng.gen(), rng.gen(), rng.gen(), 255];
                put(x, y, color);
            }
        }
    }

    let layer = PixelBuffer::from_parts(w, h, layer);
    overlay_full_frame_within(base, &layer, limits)
}
