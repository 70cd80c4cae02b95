use crate::enums::SliceType;
use crate::pixel_buffer::PixelBuffer;
use crate::volume_loader::VolumeLoaderError;

use log::{info, warn};
use std::path::Path;

/// An ordered stack of equally sized images, one per z-slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Volume {
    images: Vec<PixelBuffer>,
}

impl Volume {
    /// Build a volume from slices in z order.
    ///
    /// # Errors
    ///
    /// Returns error if the slices do not all share width, height and
    /// channel count.
    pub fn new(images: Vec<PixelBuffer>) -> Result<Self, VolumeLoaderError> {
        Self::validate_dimensions(&images)?;
        Ok(Self { images })
    }

    fn validate_dimensions(images: &[PixelBuffer]) -> Result<(), VolumeLoaderError> {
        let Some(first) = images.first() else {
            return Ok(());
        };
        let first_dim = first.dim();
        if images.iter().any(|img| img.dim() != first_dim) {
            return Err(VolumeLoaderError::InconsistentDimensions);
        }
        Ok(())
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        match self.images.first() {
            Some(img) => (self.images.len(), img.height(), img.width()),
            None => (0, 0, 0),
        }
    }

    /// Channel count shared by every slice (0 for an empty volume).
    pub fn channels(&self) -> usize {
        self.images.first().map_or(0, PixelBuffer::channels)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Get a reference to the slices
    pub fn images(&self) -> &[PixelBuffer] {
        &self.images
    }

    // Mutable access stays in the crate so slice shapes cannot drift apart.
    pub(crate) fn images_mut(&mut self) -> &mut [PixelBuffer] {
        &mut self.images
    }

    pub fn get(&self, z: usize) -> Option<&PixelBuffer> {
        self.images.get(z)
    }

    pub fn into_images(self) -> Vec<PixelBuffer> {
        self.images
    }

    /// Whether `index` addresses a row (XZ) or column (YZ) of the slices.
    pub fn is_valid_index(&self, index: usize, slice_type: SliceType) -> bool {
        let (_, height, width) = self.dim();
        let max_index = match slice_type {
            SliceType::XZ => height,
            SliceType::YZ => width,
        };
        index < max_index
    }

    /// Write every slice to `directory` as `image{z}.png`.
    ///
    /// Slices that fail to encode are logged and skipped; the number of
    /// slices written is returned.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<usize, VolumeLoaderError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(VolumeLoaderError::NotADirectory(directory.to_path_buf()));
        }
        let mut saved = 0;
        for (z, img) in self.images.iter().enumerate() {
            let path = directory.join(format!("image{z}.png"));
            match img.save(&path) {
                Ok(()) => saved += 1,
                Err(err) => warn!("Failed to save slice {z}: {err}"),
            }
        }
        info!(
            "Saved {saved} of {} slices to {}",
            self.images.len(),
            directory.display()
        );
        Ok(saved)
    }
}
