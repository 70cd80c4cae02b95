use super::{Filter, FilterError};
use crate::enums::ColorSpace;
use crate::pixel_buffer::PixelBuffer;

use log::debug;

// ITU-R BT.709 luma weights.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

impl Filter {
    /// Collapse an RGB or RGBA image to a single luma channel.
    pub fn rgb_to_gray(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::require_color(img)?;
        let channels = img.channels();
        let gray: Vec<u8> = img
            .data()
            .chunks_exact(channels)
            .map(|px| {
                let luma = LUMA_R * f64::from(px[0])
                    + LUMA_G * f64::from(px[1])
                    + LUMA_B * f64::from(px[2]);
                luma.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        img.replace_data(gray, 1);
        Ok(())
    }

    /// Convert RGB samples to HSV in place (H, S and V each scaled to 0..=255).
    pub fn rgb_to_hsv(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::map_color_pixels(img, rgb_to_hsv_pixel)
    }

    pub fn hsv_to_rgb(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::map_color_pixels(img, hsv_to_rgb_pixel)
    }

    /// Convert RGB samples to HSL in place (H, S and L each scaled to 0..=255).
    pub fn rgb_to_hsl(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::map_color_pixels(img, rgb_to_hsl_pixel)
    }

    pub fn hsl_to_rgb(img: &mut PixelBuffer) -> Result<(), FilterError> {
        Self::map_color_pixels(img, hsl_to_rgb_pixel)
    }

    pub(crate) fn to_color_space(
        img: &mut PixelBuffer,
        space: ColorSpace,
    ) -> Result<(), FilterError> {
        match space {
            ColorSpace::Hsv => Self::rgb_to_hsv(img),
            ColorSpace::Hsl => Self::rgb_to_hsl(img),
        }
    }

    pub(crate) fn from_color_space(
        img: &mut PixelBuffer,
        space: ColorSpace,
    ) -> Result<(), FilterError> {
        match space {
            ColorSpace::Hsv => Self::hsv_to_rgb(img),
            ColorSpace::Hsl => Self::hsl_to_rgb(img),
        }
    }

    fn require_color(img: &PixelBuffer) -> Result<(), FilterError> {
        match img.channels() {
            3 | 4 => Ok(()),
            other => Err(FilterError::UnsupportedChannels(other)),
        }
    }

    fn map_color_pixels(
        img: &mut PixelBuffer,
        convert: fn(u8, u8, u8) -> [u8; 3],
    ) -> Result<(), FilterError> {
        Self::require_color(img)?;
        let channels = img.channels();
        debug!("Colour conversion on {} pixels", img.width() * img.height());
        for px in img.data_mut().chunks_exact_mut(channels) {
            let converted = convert(px[0], px[1], px[2]);
            px[..3].copy_from_slice(&converted);
        }
        Ok(())
    }
}

#[inline]
fn quantize(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue in degrees from normalised RGB, `max` and `delta`; 0 for grays.
fn hue(r: f32, g: f32, b: f32, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 { h + 360.0 } else { h }
}

/// RGB components for a hue sector given chroma `c` and second component `x`.
fn sector(h: f32, c: f32, x: f32) -> (f32, f32, f32) {
    if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    }
}

fn normalise(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    (f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
}

pub(crate) fn rgb_to_hsv_pixel(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = normalise(r, g, b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let h = hue(r, g, b, max, delta);
    let s = if max == 0.0 { 0.0 } else { delta / max };
    [quantize(h / 360.0), quantize(s), quantize(max)]
}

pub(crate) fn hsv_to_rgb_pixel(h: u8, s: u8, v: u8) -> [u8; 3] {
    let h = f32::from(h) / 255.0 * 360.0;
    let s = f32::from(s) / 255.0;
    let v = f32::from(v) / 255.0;
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = sector(h, c, x);
    [quantize(r + m), quantize(g + m), quantize(b + m)]
}

pub(crate) fn rgb_to_hsl_pixel(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = normalise(r, g, b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    let h = hue(r, g, b, max, delta);
    [quantize(h / 360.0), quantize(s), quantize(l)]
}

pub(crate) fn hsl_to_rgb_pixel(h: u8, s: u8, l: u8) -> [u8; 3] {
    let h = f32::from(h) / 255.0 * 360.0;
    let s = f32::from(s) / 255.0;
    let l = f32::from(l) / 255.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = sector(h, c, x);
    [quantize(r + m), quantize(g + m), quantize(b + m)]
}
