use super::{Filter, FilterError};
use crate::enums::ColorSpace;
use crate::pixel_buffer::PixelBuffer;

use log::debug;

/// Index of the V (HSV) or L (HSL) sample within a converted pixel.
const INTENSITY: usize = 2;

fn cumulative(histogram: &[u64; 256]) -> [u64; 256] {
    let mut cdf = [0u64; 256];
    let mut running = 0;
    for (slot, &count) in cdf.iter_mut().zip(histogram) {
        running += count;
        *slot = running;
    }
    cdf
}

impl Filter {
    /// Histogram equalisation.
    ///
    /// Gray images are remapped through `round(255 * CDF[v] / N)`. Colour
    /// images are converted to `space`, only the V or L channel is
    /// equalised (normalised against `CDF[0]`), and the result converted
    /// back to RGB; hue, saturation and alpha are untouched.
    pub fn histogram_equalization(
        img: &mut PixelBuffer,
        space: ColorSpace,
    ) -> Result<(), FilterError> {
        let total = (img.width() * img.height()) as u64;
        match img.channels() {
            1 => {
                let mut histogram = [0u64; 256];
                for &v in img.data() {
                    histogram[usize::from(v)] += 1;
                }
                let cdf = cumulative(&histogram);
                for v in img.data_mut() {
                    *v = ((255 * cdf[usize::from(*v)] + total / 2) / total) as u8;
                }
                Ok(())
            }
            3 | 4 => {
                let channels = img.channels();
                Self::to_color_space(img, space)?;

                let mut histogram = [0u64; 256];
                for px in img.data().chunks_exact(channels) {
                    histogram[usize::from(px[INTENSITY])] += 1;
                }
                let cdf = cumulative(&histogram);
                let cdf_min = cdf[0];
                let denom = (total - cdf_min) as f64;
                debug!("Equalising {space:?} intensity, cdf_min {cdf_min} of {total}");
                let lut: Vec<u8> = cdf
                    .iter()
                    .map(|&c| {
                        if denom == 0.0 {
                            0
                        } else {
                            ((c - cdf_min) as f64 / denom * 255.0).round() as u8
                        }
                    })
                    .collect();
                for px in img.data_mut().chunks_exact_mut(channels) {
                    px[INTENSITY] = lut[usize::from(px[INTENSITY])];
                }

                Self::from_color_space(img, space)
            }
            other => Err(FilterError::UnsupportedChannels(other)),
        }
    }

    /// Binary threshold: samples strictly above `threshold` become 255,
    /// the rest 0.
    ///
    /// Gray images are thresholded in place. Colour images are converted
    /// to `space` and their V or L channel thresholded into a new
    /// single-channel image; there is no conversion back.
    pub fn threshold(
        img: &mut PixelBuffer,
        threshold: u8,
        space: ColorSpace,
    ) -> Result<(), FilterError> {
        let binarize = |v: u8| if v > threshold { 255 } else { 0 };
        match img.channels() {
            1 => {
                for v in img.data_mut() {
                    *v = binarize(*v);
                }
                Ok(())
            }
            3 | 4 => {
                let channels = img.channels();
                Self::to_color_space(img, space)?;
                let binary: Vec<u8> = img
                    .data()
                    .chunks_exact(channels)
                    .map(|px| binarize(px[INTENSITY]))
                    .collect();
                img.replace_data(binary, 1);
                Ok(())
            }
            other => Err(FilterError::UnsupportedChannels(other)),
        }
    }
}
