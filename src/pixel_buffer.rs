use image::{DynamicImage, ExtendedColorType};
use log::{debug, info};
use ndarray::{Array3, ArrayView3};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Buffer holds {actual} samples, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Unsupported number of channels: {0}")]
    UnsupportedChannels(usize),

    #[error("Image has zero area ({width} x {height})")]
    EmptyImage { width: usize, height: usize },
}

/// A decoded image: interleaved 8-bit samples, row-major, channel-minor.
///
/// The channel count is always 1 (gray), 3 (RGB) or 4 (RGBA) and the
/// buffer always holds exactly `width * height * channels` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap a raw sample buffer.
    ///
    /// # Errors
    ///
    /// Returns error if the channel count is not 1, 3 or 4, if the image has
    /// zero area or if `data` does not hold `width * height * channels`
    /// samples.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, ImageError> {
        Self::validate_channels(channels)?;
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage { width, height });
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image of the given shape with every sample set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        channels: usize,
        value: u8,
    ) -> Result<Self, ImageError> {
        Self::new(vec![value; width * height * channels], width, height, channels)
    }

    /// Decode an image file, keeping its own channel layout.
    ///
    /// Gray images decode to 1 channel, colour images to 3, and anything
    /// carrying alpha (gray-alpha included) to 4.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let decoded = Self::decode(path)?;
        let (width, height) = (decoded.width() as usize, decoded.height() as usize);
        let color = decoded.color();
        let (data, channels) = match (color.has_color(), color.has_alpha()) {
            (false, false) => (decoded.into_luma8().into_raw(), 1),
            (true, false) => (decoded.into_rgb8().into_raw(), 3),
            (_, true) => (decoded.into_rgba8().into_raw(), 4),
        };
        Self::from_decoded(path, data, width, height, channels)
    }

    /// Decode an image file and convert it to `channels` channels.
    pub fn open_with_channels(path: impl AsRef<Path>, channels: usize) -> Result<Self, ImageError> {
        Self::validate_channels(channels)?;
        let path = path.as_ref();
        let decoded = Self::decode(path)?;
        let (width, height) = (decoded.width() as usize, decoded.height() as usize);
        let data = match channels {
            1 => decoded.into_luma8().into_raw(),
            3 => decoded.into_rgb8().into_raw(),
            _ => decoded.into_rgba8().into_raw(),
        };
        Self::from_decoded(path, data, width, height, channels)
    }

    fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
        image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_decoded(
        path: &Path,
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, ImageError> {
        let buffer = Self::new(data, width, height, channels)?;
        info!(
            "Image loaded with size {} x {} with {} channel(s): {}",
            buffer.width,
            buffer.height,
            buffer.channels,
            path.display()
        );
        Ok(buffer)
    }

    /// Encode the image to `path`; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.data,
            self.width as u32,
            self.height as u32,
            self.color_type(),
        )
        .map_err(|source| ImageError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Image saved to {}", path.display());
        Ok(())
    }

    fn color_type(&self) -> ExtendedColorType {
        match self.channels {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            _ => ExtendedColorType::Rgba8,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Get the dimensions of the image (height, width, channels)
    pub fn dim(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Whether the last channel is an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of channels filters treat as colour (alpha excluded).
    pub fn color_channels(&self) -> usize {
        if self.has_alpha() { 3 } else { self.channels }
    }

    /// Install a new sample buffer and channel count in one step and hand
    /// back the buffer it displaced.
    pub(crate) fn replace_data(&mut self, data: Vec<u8>, channels: usize) -> Vec<u8> {
        debug_assert_eq!(data.len(), self.width * self.height * channels);
        debug!(
            "Replacing {}-channel buffer with {}-channel buffer",
            self.channels, channels
        );
        self.channels = channels;
        std::mem::replace(&mut self.data, data)
    }

    /// Borrow the samples as a (height, width, channels) array.
    pub fn view(&self) -> Result<ArrayView3<'_, u8>, ImageError> {
        ArrayView3::from_shape((self.height, self.width, self.channels), &self.data).map_err(
            |_| ImageError::BufferSize {
                expected: self.width * self.height * self.channels,
                actual: self.data.len(),
            },
        )
    }

    /// Build an image from a (height, width, channels) array.
    pub fn from_array(array: &Array3<u8>) -> Result<Self, ImageError> {
        let (height, width, channels) = array.dim();
        Self::new(array.iter().copied().collect(), width, height, channels)
    }

    pub(crate) fn validate_channels(channels: usize) -> Result<(), ImageError> {
        match channels {
            1 | 3 | 4 => Ok(()),
            other => Err(ImageError::UnsupportedChannels(other)),
        }
    }
}
