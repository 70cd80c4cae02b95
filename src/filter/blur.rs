use super::{Filter, FilterError, clamp_index, mirror_index};
use crate::pixel_buffer::PixelBuffer;
use crate::selection;

use log::debug;

impl Filter {
    /// Replace every colour sample with the median of its `kernel_size`²
    /// neighbourhood, replicating edge pixels outside the image.
    pub fn median_blur(img: &mut PixelBuffer, kernel_size: usize) -> Result<(), FilterError> {
        Self::validate_kernel_size(kernel_size)?;
        let radius = (kernel_size / 2) as isize;
        let (width, height) = (img.width(), img.height());
        let channels = img.channels();
        let color_channels = img.color_channels();
        debug!("Median blur {width}x{height}x{channels}, kernel {kernel_size}");

        let source = img.data().to_vec();
        let data = img.data_mut();
        let mut neighbourhood = Vec::with_capacity(kernel_size * kernel_size);
        for y in 0..height {
            for x in 0..width {
                for c in 0..color_channels {
                    neighbourhood.clear();
                    for ky in -radius..=radius {
                        let ny = clamp_index(y, ky, height);
                        for kx in -radius..=radius {
                            let nx = clamp_index(x, kx, width);
                            neighbourhood.push(source[(ny * width + nx) * channels + c]);
                        }
                    }
                    data[(y * width + x) * channels + c] = selection::median(&mut neighbourhood);
                }
            }
        }
        Ok(())
    }

    /// Mean of the in-bounds part of each `kernel_size`² neighbourhood.
    ///
    /// Offsets falling outside the image are skipped, so border pixels
    /// average fewer samples. Alpha is copied from the centre pixel.
    pub fn box_blur(img: &mut PixelBuffer, kernel_size: usize) -> Result<(), FilterError> {
        Self::validate_kernel_size(kernel_size)?;
        let radius = (kernel_size / 2) as isize;
        let (width, height) = (img.width(), img.height());
        let channels = img.channels();
        let color_channels = img.color_channels();
        let has_alpha = img.has_alpha();
        debug!("Box blur {width}x{height}x{channels}, kernel {kernel_size}");

        let source = img.data();
        let mut blurred = vec![0u8; source.len()];
        let mut sum = vec![0u32; channels];
        for y in 0..height {
            for x in 0..width {
                sum.fill(0);
                let mut count = 0;
                for ky in -radius..=radius {
                    let ny = y as isize + ky;
                    if ny < 0 || ny >= height as isize {
                        continue;
                    }
                    for kx in -radius..=radius {
                        let nx = x as isize + kx;
                        if nx < 0 || nx >= width as isize {
                            continue;
                        }
                        let base = (ny as usize * width + nx as usize) * channels;
                        for (c, total) in sum.iter_mut().take(color_channels).enumerate() {
                            *total += u32::from(source[base + c]);
                        }
                        count += 1;
                    }
                }

                let base = (y * width + x) * channels;
                for c in 0..color_channels {
                    blurred[base + c] = (sum[c] / count) as u8;
                }
                if has_alpha {
                    blurred[base + 3] = source[base + 3];
                }
            }
        }
        img.replace_data(blurred, channels);
        Ok(())
    }

    /// Separable Gaussian blur: a horizontal then a vertical 1D pass.
    ///
    /// Offsets past an edge are mirrored around the current pixel. Only
    /// colour channels are filtered; the vertical pass writes back into the
    /// image's own buffer, so alpha keeps its value.
    pub fn gaussian_blur_2d(
        img: &mut PixelBuffer,
        kernel_size: usize,
        sigma: f64,
    ) -> Result<(), FilterError> {
        Self::validate_kernel_size(kernel_size)?;
        Self::validate_sigma(sigma)?;
        let kernel = Self::gaussian_kernel(kernel_size, sigma);
        let (width, height) = (img.width(), img.height());
        let channels = img.channels();
        let color_channels = img.color_channels();
        debug!("Gaussian blur {width}x{height}x{channels}, kernel {kernel_size}, sigma {sigma}");

        let mut horizontal = vec![0u8; img.data().len()];
        gauss_pass_x(img.data(), &mut horizontal, width, height, channels, color_channels, &kernel);
        gauss_pass_y(&horizontal, img.data_mut(), width, height, channels, color_channels, &kernel);
        Ok(())
    }

    /// Normalised 1D Gaussian weights of length `kernel_size`.
    pub(crate) fn gaussian_kernel(kernel_size: usize, sigma: f64) -> Vec<f64> {
        let center = (kernel_size / 2) as f64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut kernel: Vec<f64> = (0..kernel_size)
            .map(|i| {
                let d = i as f64 - center;
                (-(d * d) / two_sigma_sq).exp()
            })
            .collect();
        let sum: f64 = kernel.iter().sum();
        kernel.iter_mut().for_each(|w| *w /= sum);
        kernel
    }
}

#[inline]
fn to_sample(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

pub(super) fn gauss_pass_x(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    color_channels: usize,
    kernel: &[f64],
) {
    let radius = (kernel.len() / 2) as isize;
    for y in 0..height {
        for x in 0..width {
            let base = (y * width + x) * channels;
            for c in 0..color_channels {
                let mut sum = 0.0;
                for (k, weight) in (-radius..=radius).zip(kernel) {
                    let nx = mirror_index(x, k, width);
                    sum += f64::from(src[(y * width + nx) * channels + c]) * weight;
                }
                dst[base + c] = to_sample(sum);
            }
        }
    }
}

pub(super) fn gauss_pass_y(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    channels: usize,
    color_channels: usize,
    kernel: &[f64],
) {
    let radius = (kernel.len() / 2) as isize;
    for y in 0..height {
        for x in 0..width {
            let base = (y * width + x) * channels;
            for c in 0..color_channels {
                let mut sum = 0.0;
                for (k, weight) in (-radius..=radius).zip(kernel) {
                    let ny = mirror_index(y, k, height);
                    sum += f64::from(src[(ny * width + x) * channels + c]) * weight;
                }
                dst[base + c] = to_sample(sum);
            }
        }
    }
}
