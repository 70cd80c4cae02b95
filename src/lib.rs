//! # voxelkit
//!
//! This crate filters 2D images and image-stack volumes, and derives
//! projections and orthogonal slices from volumes.
//!
//! Images are held as [`PixelBuffer`]s: dense, interleaved 8-bit samples
//! with 1 (gray), 3 (RGB) or 4 (RGBA) channels. A [`Volume`] is an ordered
//! stack of equally sized images, loaded from a folder in file name order
//! by the [`VolumeLoader`], either whole or as a 1-based slab `z1..=z2`.
//!
//! The [`Filter`] engine covers:
//!  - Brightness (manual and automatic) and salt-and-pepper noise
//!  - Median, box and separable Gaussian blur, plus 3D median and Gaussian
//!  - Gray, HSV and HSL conversion, histogram equalisation, thresholding
//!  - Sobel, Prewitt, Scharr and Roberts edge detection
//!
//! [`Projection`] reduces a volume along z (maximum, minimum, mean) after an
//! optional 3D pre-filter, and [`Slice`] cuts it along the XZ or YZ plane.
//!
//! Everything runs single-threaded on in-memory buffers. Alpha handling
//! differs per filter and is documented on each one.
//!
//! # Examples
//!
//! ## Projecting a volume
//!
//! Load every image of the scans/ directory, blur the stack with a 5x5x5
//! Gaussian and save its maximum intensity projection.
//!
//! ```no_run
//! # use voxelkit::{Projection, ProjectionFilter, VolumeLoader};
//! let mut volume = VolumeLoader::load_from_directory("scans", None)
//!     .expect("should have loaded files from directory");
//! let image = Projection::mip(
//!     &mut volume,
//!     ProjectionFilter::Gaussian {
//!         kernel_size: 5,
//!         sigma: 2.0,
//!     },
//! )
//! .expect("should have projected a non-empty volume");
//! image.save("mip.png").expect("should have saved the projection");
//! ```
//!
//! ## Filtering an image
//!
//! ```no_run
//! # use voxelkit::{EdgeOperator, Filter, PixelBuffer};
//! let mut image = PixelBuffer::open("photo.png").expect("should have decoded the image");
//! Filter::median_blur(&mut image, 3).expect("3 is a valid kernel size");
//! Filter::edge_detection(&mut image, EdgeOperator::Sobel).expect("should have found edges");
//! image.save("edges.png").expect("should have saved the image");
//! ```

pub mod enums;
pub mod filter;
pub mod pixel_buffer;
pub mod projection;
mod selection;
pub mod slice;
pub mod volume;
pub mod volume_loader;

pub use enums::{ColorSpace, EdgeOperator, ProjectionFilter, Reduction, SliceType};
pub use filter::{DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA, Filter, FilterError};
pub use pixel_buffer::{ImageError, PixelBuffer};
pub use projection::Projection;
pub use slice::Slice;
pub use volume::Volume;
pub use volume_loader::{DirectoryEntry, VolumeLoader, VolumeLoaderError};
