//! 2D and 3D filters operating directly on [`PixelBuffer`] samples.
//!
//! Every filter is an associated function of [`Filter`]; the
//! implementations are split by concern across the submodules. Filters
//! validate their arguments before touching the image, so a rejected call
//! leaves its input unchanged.
//!
//! [`PixelBuffer`]: crate::pixel_buffer::PixelBuffer

mod blur;
mod blur_3d;
mod color;
mod edge;
mod histogram;
mod tone;

pub use edge::{
    Kernel3, PREWITT_HORIZONTAL, PREWITT_VERTICAL, SCHARR_HORIZONTAL, SCHARR_VERTICAL,
    SOBEL_HORIZONTAL, SOBEL_VERTICAL,
};

use crate::pixel_buffer::ImageError;
use thiserror::Error;

/// Kernel size used when a caller does not pick one.
pub const DEFAULT_KERNEL_SIZE: usize = 7;

/// Gaussian standard deviation used when a caller does not pick one.
pub const DEFAULT_SIGMA: f64 = 2.0;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Kernel size must be odd and at least 1, got {0}")]
    InvalidKernelSize(usize),

    #[error("Sigma must be a positive number, got {0}")]
    InvalidSigma(f64),

    #[error("Noise density must be within [0, 1], got {0}")]
    InvalidDensity(f32),

    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    #[error("Unsupported filter method: {0}")]
    UnknownFilterMethod(i32),

    #[error("Unsupported colour space: {0}")]
    UnknownColorSpace(i32),

    #[error("Image of {width} x {height} is too small for this operator")]
    ImageTooSmall { width: usize, height: usize },

    #[error("Volume contains no slices")]
    EmptyVolume,

    #[error("Index {index} out of range (bound {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub struct Filter;

impl Filter {
    /// Round an even kernel size down to the next odd one (never below 1).
    pub fn odd_kernel_size(kernel_size: usize) -> usize {
        match kernel_size {
            0 => 1,
            k if k % 2 == 0 => k - 1,
            k => k,
        }
    }

    fn validate_kernel_size(kernel_size: usize) -> Result<(), FilterError> {
        if kernel_size == 0 || kernel_size % 2 == 0 {
            return Err(FilterError::InvalidKernelSize(kernel_size));
        }
        Ok(())
    }

    fn validate_sigma(sigma: f64) -> Result<(), FilterError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidSigma(sigma));
        }
        Ok(())
    }
}

/// Clamp `index + offset` into `0..len` (replicate boundary).
#[inline]
fn clamp_index(index: usize, offset: isize, len: usize) -> usize {
    (index as isize + offset).clamp(0, len as isize - 1) as usize
}

/// Index of `index + offset`, mirrored to `index - offset` when that falls
/// outside `0..len`, then clamped into range for axes shorter than the
/// kernel radius.
#[inline]
fn mirror_index(index: usize, offset: isize, len: usize) -> usize {
    let last = len as isize - 1;
    let shifted = index as isize + offset;
    let mirrored = if shifted < 0 || shifted > last {
        index as isize - offset
    } else {
        shifted
    };
    mirrored.clamp(0, last) as usize
}
