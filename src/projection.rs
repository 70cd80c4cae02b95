use crate::enums::{ProjectionFilter, Reduction};
use crate::filter::{Filter, FilterError};
use crate::pixel_buffer::PixelBuffer;
use crate::volume::Volume;

use log::debug;

/// Reductions of a volume along z into a single image.
///
/// The optional 3D pre-filter runs over the whole volume in place, so the
/// caller's volume comes back filtered. Every channel, alpha included, is
/// reduced the same way.
pub struct Projection;

impl Projection {
    /// Maximum intensity projection.
    pub fn mip(vol: &mut Volume, filter: ProjectionFilter) -> Result<PixelBuffer, FilterError> {
        Self::project(vol, Reduction::Max, filter)
    }

    /// Minimum intensity projection.
    pub fn min_ip(vol: &mut Volume, filter: ProjectionFilter) -> Result<PixelBuffer, FilterError> {
        Self::project(vol, Reduction::Min, filter)
    }

    /// Average intensity projection (rounded mean).
    pub fn aip(vol: &mut Volume, filter: ProjectionFilter) -> Result<PixelBuffer, FilterError> {
        Self::project(vol, Reduction::Mean, filter)
    }

    pub fn project(
        vol: &mut Volume,
        reduction: Reduction,
        filter: ProjectionFilter,
    ) -> Result<PixelBuffer, FilterError> {
        if vol.is_empty() {
            return Err(FilterError::EmptyVolume);
        }
        match filter {
            ProjectionFilter::Gaussian { kernel_size, sigma } => {
                Filter::gaussian_blur_3d(vol, kernel_size, sigma)?
            }
            ProjectionFilter::Median { kernel_size } => Filter::median_blur_3d(vol, kernel_size)?,
            ProjectionFilter::None => {}
        }

        let (depth, height, width) = vol.dim();
        let channels = vol.channels();
        debug!("{reduction:?} projection over {depth} slices of {width} x {height}");

        let slices: Vec<&[u8]> = vol.images().iter().map(PixelBuffer::data).collect();
        let data: Vec<u8> = (0..width * height * channels)
            .map(|i| {
                let samples = slices.iter().map(|slice| slice[i]);
                match reduction {
                    Reduction::Max => samples.fold(0, u8::max),
                    Reduction::Min => samples.fold(255, u8::min),
                    Reduction::Mean => {
                        let sum: u32 = samples.map(u32::from).sum();
                        (f64::from(sum) / depth as f64).round() as u8
                    }
                }
            })
            .collect();

        Ok(PixelBuffer::new(data, width, height, channels)?)
    }
}
