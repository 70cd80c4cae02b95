use crate::filter::{DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA, FilterError};

/// Plane of an orthogonal slice through a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceType {
    /// Fixed row; output is (volume width) x (slice count).
    XZ,
    /// Fixed column; output is (slice count) x (volume height).
    YZ,
}

/// Colour space used to pick the intensity channel of a colour image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Hsv,
    Hsl,
}

impl ColorSpace {
    /// Map the numeric codes used by menu-driven front ends (1 = HSV, 2 = HSL).
    pub fn from_code(code: i32) -> Result<Self, FilterError> {
        match code {
            1 => Ok(Self::Hsv),
            2 => Ok(Self::Hsl),
            other => Err(FilterError::UnknownColorSpace(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOperator {
    Sobel,
    Prewitt,
    Scharr,
    Roberts,
}

/// Reduction applied along z by a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Max,
    Min,
    Mean,
}

/// 3D filter run over the whole volume before projecting it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectionFilter {
    Gaussian {
        kernel_size: usize,
        sigma: f64,
    },
    Median {
        kernel_size: usize,
    },
    #[default]
    None,
}

impl ProjectionFilter {
    /// Map the numeric codes used by menu-driven front ends
    /// (1 = Gaussian, 2 = median, 3 = none).
    pub fn from_code(code: i32, kernel_size: usize, sigma: f64) -> Result<Self, FilterError> {
        match code {
            1 => Ok(Self::Gaussian { kernel_size, sigma }),
            2 => Ok(Self::Median { kernel_size }),
            3 => Ok(Self::None),
            other => Err(FilterError::UnknownFilterMethod(other)),
        }
    }

    pub fn gaussian() -> Self {
        Self::Gaussian {
            kernel_size: DEFAULT_KERNEL_SIZE,
            sigma: DEFAULT_SIGMA,
        }
    }

    pub fn median() -> Self {
        Self::Median {
            kernel_size: DEFAULT_KERNEL_SIZE,
        }
    }
}
