use super::{Filter, FilterError};
use crate::pixel_buffer::PixelBuffer;

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashSet;

impl Filter {
    /// Add `brightness` to every colour sample, saturating at 0 and 255.
    /// Alpha is left alone.
    pub fn adjust_brightness(img: &mut PixelBuffer, brightness: i32) {
        let channels = img.channels();
        let skip_alpha = img.has_alpha();
        for (i, sample) in img.data_mut().iter_mut().enumerate() {
            if skip_alpha && i % channels == 3 {
                continue;
            }
            *sample = (i32::from(*sample) + brightness).clamp(0, 255) as u8;
        }
    }

    /// Shift brightness so the mean colour sample lands on 128.
    pub fn auto_adjust_brightness(img: &mut PixelBuffer) {
        let channels = img.channels();
        let skip_alpha = img.has_alpha();
        let (total, count) = img
            .data()
            .iter()
            .enumerate()
            .filter(|(i, _)| !(skip_alpha && i % channels == 3))
            .fold((0u64, 0u64), |(total, count), (_, &v)| {
                (total + u64::from(v), count + 1)
            });
        let average = (total / count) as i32;
        debug!("Auto brightness: mean sample {average}, shifting by {}", 128 - average);
        Self::adjust_brightness(img, 128 - average);
    }

    /// Set `round(width * height * density)` distinct pixels to black or
    /// white at random, using an entropy-seeded generator.
    pub fn add_salt_and_pepper(img: &mut PixelBuffer, density: f32) -> Result<(), FilterError> {
        Self::add_salt_and_pepper_with_rng(img, density, &mut StdRng::from_entropy())
    }

    /// [`Filter::add_salt_and_pepper`] with a caller-supplied generator.
    ///
    /// Pixels are drawn uniformly with rejection of repeats, so exactly the
    /// requested number of pixels change. Colour channels of a chosen pixel
    /// all get the same value; alpha is untouched.
    pub fn add_salt_and_pepper_with_rng<R: Rng + ?Sized>(
        img: &mut PixelBuffer,
        density: f32,
        rng: &mut R,
    ) -> Result<(), FilterError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(FilterError::InvalidDensity(density));
        }
        let (width, height) = (img.width(), img.height());
        let channels = img.channels();
        let color_channels = img.color_channels();
        let num_pixels = width * height;
        let target = ((num_pixels as f64 * f64::from(density)).round() as usize).min(num_pixels);
        debug!("Salt and pepper: {target} of {num_pixels} pixels");

        let data = img.data_mut();
        let mut seen = HashSet::with_capacity(target);
        while seen.len() < target {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            let pixel_index = (y * width + x) * channels;
            if !seen.insert(pixel_index) {
                continue;
            }
            let value = if rng.gen_bool(0.5) { 255 } else { 0 };
            data[pixel_index..pixel_index + color_channels].fill(value);
        }
        Ok(())
    }
}
