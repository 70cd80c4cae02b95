use crate::enums::SliceType;
use crate::filter::FilterError;
use crate::pixel_buffer::PixelBuffer;
use crate::volume::Volume;

use ndarray::{Array3, s};

/// Orthogonal cross-sections of a volume.
pub struct Slice;

impl Slice {
    /// Cut the volume along the XZ or YZ plane.
    ///
    /// For [`SliceType::XZ`], `n` is a row index and the result is
    /// `width x depth`: row `z` is row `n` of slice `z`. For
    /// [`SliceType::YZ`], `n` is a column index and the result is
    /// `depth x height`: column `z` is column `n` of slice `z`.
    ///
    /// # Errors
    ///
    /// Returns error if the volume is empty or `n` is outside the axis it
    /// indexes.
    pub fn slice(
        volume: &Volume,
        n: usize,
        slice_type: SliceType,
    ) -> Result<PixelBuffer, FilterError> {
        if volume.is_empty() {
            return Err(FilterError::EmptyVolume);
        }
        let (depth, height, width) = volume.dim();
        let channels = volume.channels();
        if !volume.is_valid_index(n, slice_type) {
            let bound = match slice_type {
                SliceType::XZ => height,
                SliceType::YZ => width,
            };
            return Err(FilterError::IndexOutOfRange { index: n, bound });
        }

        let result = match slice_type {
            SliceType::XZ => {
                let mut out = Array3::<u8>::zeros((depth, width, channels));
                for (z, img) in volume.images().iter().enumerate() {
                    out.slice_mut(s![z, .., ..]).assign(&img.view()?.slice(s![n, .., ..]));
                }
                out
            }
            SliceType::YZ => {
                let mut out = Array3::<u8>::zeros((height, depth, channels));
                for (z, img) in volume.images().iter().enumerate() {
                    out.slice_mut(s![.., z, ..]).assign(&img.view()?.slice(s![.., n, ..]));
                }
                out
            }
        };
        Ok(PixelBuffer::from_array(&result)?)
    }
}
