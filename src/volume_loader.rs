use crate::{
    pixel_buffer::{ImageError, PixelBuffer},
    volume::Volume,
};

use log::{debug, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VolumeLoaderError {
    #[error("No valid images found")]
    NoValidImages,

    #[error("Inconsistent image dimensions")]
    InconsistentDimensions,

    #[error("Directory does not exist or is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid z range {z1}..={z2} for {count} entries")]
    InvalidRange { z1: usize, z2: usize, count: usize },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One directory entry considered for a volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub is_file: bool,
}

pub struct VolumeLoader;

impl VolumeLoader {
    /// List the entries of `directory`, sorted by raw file name.
    ///
    /// The order is a plain byte-wise comparison, so `img10.png` sorts
    /// before `img2.png` unless the numbers are zero-padded.
    pub fn file_entries(
        directory: impl AsRef<Path>,
    ) -> Result<Vec<DirectoryEntry>, VolumeLoaderError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(VolumeLoaderError::NotADirectory(directory.to_path_buf()));
        }
        let mut entries: Vec<_> = fs::read_dir(directory)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .collect();
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(entries
            .into_iter()
            .map(|path| DirectoryEntry {
                is_file: path.is_file(),
                path,
            })
            .collect())
    }

    /// Load every image file of `directory` as a volume, in file name order.
    ///
    /// Files that fail to decode are logged and skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - Folder holding one image per slice
    /// * `desired_channels` - Convert every slice to this channel count
    ///
    /// # Errors
    ///
    /// Returns error if `desired_channels` is not 1, 3 or 4, the directory
    /// is missing, no image could be loaded or the loaded images differ in
    /// shape
    pub fn load_from_directory(
        directory: impl AsRef<Path>,
        desired_channels: Option<usize>,
    ) -> Result<Volume, VolumeLoaderError> {
        Self::validate_desired_channels(desired_channels)?;
        let entries = Self::file_entries(directory)?;
        Self::load_entries(&entries, desired_channels)
    }

    /// Load the slab of entries `z1..=z2` (1-based, in file name order).
    ///
    /// The range is checked against all directory entries before any file
    /// is decoded.
    pub fn load_slab(
        directory: impl AsRef<Path>,
        z1: usize,
        z2: usize,
        desired_channels: Option<usize>,
    ) -> Result<Volume, VolumeLoaderError> {
        Self::validate_desired_channels(desired_channels)?;
        let entries = Self::file_entries(directory)?;
        let count = entries.len();
        if z1 < 1 || z2 > count || z1 > z2 {
            return Err(VolumeLoaderError::InvalidRange { z1, z2, count });
        }
        Self::load_entries(&entries[z1 - 1..z2], desired_channels)
    }

    /// Load a volume from file paths, keeping the given order.
    pub fn load_from_file_paths(
        paths: &[impl AsRef<Path>],
        desired_channels: Option<usize>,
    ) -> Result<Volume, VolumeLoaderError> {
        Self::validate_desired_channels(desired_channels)?;
        let entries: Vec<_> = paths
            .iter()
            .map(|path| DirectoryEntry {
                path: path.as_ref().to_path_buf(),
                is_file: path.as_ref().is_file(),
            })
            .collect();
        Self::load_entries(&entries, desired_channels)
    }

    fn validate_desired_channels(
        desired_channels: Option<usize>,
    ) -> Result<(), VolumeLoaderError> {
        if let Some(channels) = desired_channels {
            PixelBuffer::validate_channels(channels)?;
        }
        Ok(())
    }

    fn load_entries(
        entries: &[DirectoryEntry],
        desired_channels: Option<usize>,
    ) -> Result<Volume, VolumeLoaderError> {
        let mut images = Vec::with_capacity(entries.len());
        for entry in entries.iter().filter(|entry| entry.is_file) {
            let loaded = match desired_channels {
                Some(channels) => PixelBuffer::open_with_channels(&entry.path, channels),
                None => PixelBuffer::open(&entry.path),
            };
            match loaded {
                Ok(img) => {
                    images.push(img);
                    debug!("{} images loaded", images.len());
                }
                Err(err) => warn!("Failed to load image {}: {err}", entry.path.display()),
            }
        }

        if images.is_empty() {
            return Err(VolumeLoaderError::NoValidImages);
        }
        let volume = Volume::new(images)?;
        let (depth, height, width) = volume.dim();
        info!(
            "Volume loaded: {depth} slices of {width} x {height} with {} channel(s)",
            volume.channels()
        );
        Ok(volume)
    }
}
