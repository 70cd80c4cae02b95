#![allow(dead_code)]

use voxelkit::{PixelBuffer, Volume};

/// Gray image from row-major samples.
pub fn gray(width: usize, height: usize, samples: &[u8]) -> PixelBuffer {
    PixelBuffer::new(samples.to_vec(), width, height, 1).expect("valid gray image")
}

/// Gray image whose sample at (x, y) is `f(x, y)`.
pub fn gray_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> PixelBuffer {
    let samples: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    gray(width, height, &samples)
}

/// RGBA image whose pixel at (x, y) is `f(x, y)`.
pub fn rgba_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> [u8; 4],
) -> PixelBuffer {
    let samples: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| f(x, y))
        .collect();
    PixelBuffer::new(samples, width, height, 4).expect("valid rgba image")
}

/// RGB image whose pixel at (x, y) is `f(x, y)`.
pub fn rgb_from_fn(
    width: usize,
    height: usize,
    f: impl Fn(usize, usize) -> [u8; 3],
) -> PixelBuffer {
    let samples: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .flat_map(|(x, y)| f(x, y))
        .collect();
    PixelBuffer::new(samples, width, height, 3).expect("valid rgb image")
}

/// Deterministic pseudo-random noise, good enough for texture.
pub fn noise(width: usize, height: usize, seed: u32) -> PixelBuffer {
    gray_from_fn(width, height, |x, y| {
        let v = (x as u32 * 73 + y as u32 * 151 + seed * 31).wrapping_mul(2654435761);
        (v >> 24) as u8
    })
}

/// Volume of gray slices where slice `z` is `f(x, y, z)`.
pub fn gray_volume(
    width: usize,
    height: usize,
    depth: usize,
    f: impl Fn(usize, usize, usize) -> u8,
) -> Volume {
    let slices = (0..depth)
        .map(|z| gray_from_fn(width, height, |x, y| f(x, y, z)))
        .collect();
    Volume::new(slices).expect("consistent slices")
}

/// Fresh empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("voxelkit-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
