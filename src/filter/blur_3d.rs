use super::blur::{gauss_pass_x, gauss_pass_y};
use super::{Filter, FilterError, clamp_index, mirror_index};
use crate::selection;
use crate::volume::Volume;

use log::debug;

impl Filter {
    /// 3D median over a `kernel_size`³ neighbourhood.
    ///
    /// In-plane offsets replicate the slice edges; along z the window is
    /// cut at the first and last slice. Each median comes from a 256-bin
    /// histogram of the window (lower median). Alpha is carried over.
    pub fn median_blur_3d(vol: &mut Volume, kernel_size: usize) -> Result<(), FilterError> {
        Self::validate_kernel_size(kernel_size)?;
        if vol.is_empty() {
            debug!("Median blur 3D on an empty volume, nothing to do");
            return Ok(());
        }
        let radius = kernel_size / 2;
        let signed_radius = radius as isize;
        let (depth, height, width) = vol.dim();
        let channels = vol.channels();
        let color_channels = vol.images()[0].color_channels();
        debug!("Median blur 3D {width}x{height}x{depth}, kernel {kernel_size}");

        let mut blurred: Vec<Vec<u8>> =
            vol.images().iter().map(|img| img.data().to_vec()).collect();
        let sources = vol.images();
        for (z, out) in blurred.iter_mut().enumerate() {
            let z_range = z.saturating_sub(radius)..=(z + radius).min(depth - 1);
            for y in 0..height {
                for x in 0..width {
                    for c in 0..color_channels {
                        let mut histogram = [0u32; 256];
                        let mut total = 0;
                        for zz in z_range.clone() {
                            let src = sources[zz].data();
                            for ky in -signed_radius..=signed_radius {
                                let ny = clamp_index(y, ky, height);
                                for kx in -signed_radius..=signed_radius {
                                    let nx = clamp_index(x, kx, width);
                                    let sample = src[(ny * width + nx) * channels + c];
                                    histogram[usize::from(sample)] += 1;
                                    total += 1;
                                }
                            }
                        }
                        out[(y * width + x) * channels + c] =
                            selection::histogram_median(&histogram, total);
                    }
                }
            }
        }

        for (img, data) in vol.images_mut().iter_mut().zip(blurred) {
            img.replace_data(data, channels);
        }
        Ok(())
    }

    /// 3D Gaussian blur: the 2D separable blur on every slice, then a 1D
    /// pass along z with the same mirrored boundary.
    ///
    /// The z pass reads from a snapshot of the in-plane result and
    /// truncates instead of rounding.
    pub fn gaussian_blur_3d(
        vol: &mut Volume,
        kernel_size: usize,
        sigma: f64,
    ) -> Result<(), FilterError> {
        Self::validate_kernel_size(kernel_size)?;
        Self::validate_sigma(sigma)?;
        if vol.is_empty() {
            debug!("Gaussian blur 3D on an empty volume, nothing to do");
            return Ok(());
        }
        let kernel = Self::gaussian_kernel(kernel_size, sigma);
        let radius = (kernel_size / 2) as isize;
        let (depth, height, width) = vol.dim();
        let channels = vol.channels();
        let color_channels = vol.images()[0].color_channels();
        debug!("Gaussian blur 3D {width}x{height}x{depth}, kernel {kernel_size}, sigma {sigma}");

        let mut horizontal = vec![0u8; width * height * channels];
        for img in vol.images_mut() {
            gauss_pass_x(
                img.data(),
                &mut horizontal,
                width,
                height,
                channels,
                color_channels,
                &kernel,
            );
            gauss_pass_y(
                &horizontal,
                img.data_mut(),
                width,
                height,
                channels,
                color_channels,
                &kernel,
            );
        }

        let planar: Vec<Vec<u8>> = vol.images().iter().map(|img| img.data().to_vec()).collect();
        for (z, img) in vol.images_mut().iter_mut().enumerate() {
            let data = img.data_mut();
            for pixel in 0..width * height {
                let base = pixel * channels;
                for c in 0..color_channels {
                    let mut sum = 0.0;
                    for (k, weight) in (-radius..=radius).zip(&kernel) {
                        let zz = mirror_index(z, k, depth);
                        sum += f64::from(planar[zz][base + c]) * weight;
                    }
                    data[base + c] = sum.clamp(0.0, 255.0) as u8;
                }
            }
        }
        Ok(())
    }
}
