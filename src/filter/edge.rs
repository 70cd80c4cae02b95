use super::{Filter, FilterError, clamp_index};
use crate::enums::EdgeOperator;
use crate::pixel_buffer::PixelBuffer;

use log::debug;

pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_HORIZONTAL: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_VERTICAL: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

pub const PREWITT_HORIZONTAL: Kernel3 = [[-1, -1, -1], [0, 0, 0], [1, 1, 1]];
pub const PREWITT_VERTICAL: Kernel3 = [[-1, 0, 1], [-1, 0, 1], [-1, 0, 1]];

pub const SCHARR_HORIZONTAL: Kernel3 = [[-3, 0, 3], [-10, 0, 10], [-3, 0, 3]];
pub const SCHARR_VERTICAL: Kernel3 = [[-3, -10, -3], [0, 0, 0], [3, 10, 3]];

#[inline]
fn magnitude(gx: f64, gy: f64) -> u8 {
    (gx * gx + gy * gy).sqrt().min(255.0) as u8
}

impl Filter {
    /// Gradient magnitude `min(255, sqrt(gx² + gy²))` of a gray image for a
    /// pair of 3x3 kernels, replicating edge pixels.
    pub fn apply_edge_detection(
        img: &mut PixelBuffer,
        horizontal: &Kernel3,
        vertical: &Kernel3,
    ) -> Result<(), FilterError> {
        Self::require_gray(img)?;
        let (width, height) = (img.width(), img.height());
        let src = img.data();
        let mut edges = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for j in 0..3 {
                    let py = clamp_index(y, j as isize - 1, height);
                    for i in 0..3 {
                        let px = clamp_index(x, i as isize - 1, width);
                        let value = f64::from(src[py * width + px]);
                        gx += f64::from(horizontal[j][i]) * value;
                        gy += f64::from(vertical[j][i]) * value;
                    }
                }
                edges[y * width + x] = magnitude(gx, gy);
            }
        }
        img.replace_data(edges, 1);
        Ok(())
    }

    pub fn apply_sobel_edge_detection(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::apply_edge_detection(img, &SOBEL_HORIZONTAL, &SOBEL_VERTICAL)
    }

    pub fn apply_prewitt_edge_detection(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::apply_edge_detection(img, &PREWITT_HORIZONTAL, &PREWITT_VERTICAL)
    }

    pub fn apply_scharr_edge_detection(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::apply_edge_detection(img, &SCHARR_HORIZONTAL, &SCHARR_VERTICAL)
    }

    /// Roberts cross on a gray image.
    ///
    /// Interior pixels use the two diagonal differences. The last row,
    /// last column and bottom-right corner have their own formulas:
    ///
    /// * last row: `gx = I(x, h-1) - I(x+1, h-2)`, `gy = I(w-1, h-1) - I(x+1, h-1)`
    /// * last column: `gx = I(w-1, y) - I(w-1, y+1)`, `gy = -gx`
    /// * corner: `gx = -I(w-1, h-1)`, `gy = 0`
    pub fn apply_roberts_edge_detection(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::require_gray(img)?;
        let (width, height) = (img.width(), img.height());
        if width < 2 || height < 2 {
            return Err(FilterError::ImageTooSmall { width, height });
        }
        let src = img.data();
        let at = |x: usize, y: usize| i32::from(src[y * width + x]);
        let mut edges = vec![0u8; width * height];
        let last_x = width - 1;
        let last_y = height - 1;

        for y in 0..last_y {
            for x in 0..last_x {
                let gx = at(x, y) - at(x + 1, y + 1);
                let gy = at(x, y + 1) - at(x + 1, y);
                edges[y * width + x] = magnitude(f64::from(gx), f64::from(gy));
            }
        }
        for x in 0..last_x {
            let gx = at(x, last_y) - at(x + 1, last_y - 1);
            let gy = at(last_x, last_y) - at(x + 1, last_y);
            edges[last_y * width + x] = magnitude(f64::from(gx), f64::from(gy));
        }
        for y in 0..last_y {
            let gx = at(last_x, y) - at(last_x, y + 1);
            let gy = at(last_x, y + 1) - at(last_x, y);
            edges[y * width + last_x] = magnitude(f64::from(gx), f64::from(gy));
        }
        let gx = -at(last_x, last_y);
        edges[last_y * width + last_x] = magnitude(f64::from(gx), 0.0);

        img.replace_data(edges, 1);
        Ok(())
    }

    /// Run `operator` on `img`, reducing colour input to gray first.
    pub fn edge_detection(
        img: &mut PixelBuffer,
        operator: EdgeOperator,
    ) -> Result<(), FilterError> {
        if img.channels() != 1 {
            Self::rgb_to_gray(img)?;
        }
        debug!("Edge detection with {operator:?}");
        match operator {
            EdgeOperator::Sobel => Self::apply_sobel_edge_detection(img),
            EdgeOperator::Prewitt => Self::apply_prewitt_edge_detection(img),
            EdgeOperator::Scharr => Self::apply_scharr_edge_detection(img),
            EdgeOperator::Roberts => Self::apply_roberts_edge_detection(img),
        }
    }

    fn require_gray(img: &PixelBuffer) -> Result<(), FilterError> {
        match img.channels() {
            1 => Ok(()),
            other => Err(FilterError::UnsupportedChannels(other)),
        }
    }
}
