//! Frame sampling and swatch rendering
//!
//! - Decode an encoded frame (PNG or JPEG)
//! - Read the center pixel, optionally after a vertical flip
//! - Render a solid swatch of a reference color as an indexed PNG

use crate::error::AppError;
use crate::palette::{Rgb, Sample};
use image::RgbImage;
use png::{BitDepth, ColorType, Encoder};
use serde::Deserialize;
use std::io::Cursor;
use utoipa::ToSchema;

/// Channel order of the decoded frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    /// Camera-style blue, green, red
    Bgr,
}

impl ChannelOrder {
    /// Reorder a raw pixel into RGB
    pub fn to_rgb(self, pixel: [u8; 3]) -> Rgb {
        match self {
            ChannelOrder::Rgb => Rgb::new(pixel[0], pixel[1], pixel[2]),
            ChannelOrder::Bgr => Rgb::new(pixel[2], pixel[1], pixel[0]),
        }
    }
}

/// Decode an encoded frame into RGB pixels
pub fn decode_frame(data: &[u8]) -> Result<RgbImage, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::ImageProcessing(format!("Failed to decode frame: {}", e)))?;
    Ok(img.to_rgb8())
}

/// Raw center pixel of a frame
///
/// With `flip_vertical` the frame is treated as mirrored top to bottom
/// first, which moves row `y` to `height - 1 - y`.
pub fn center_pixel(frame: &RgbImage, flip_vertical: bool) -> Result<[u8; 3], AppError> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(AppError::ImageProcessing(format!(
            "Empty frame: {}x{}",
            width, height
        )));
    }

    let x = width / 2;
    let y = if flip_vertical {
        height - 1 - height / 2
    } else {
        height / 2
    };

    Ok(frame.get_pixel(x, y).0)
}

/// Decode a frame and sample its center pixel as a query point
pub fn sample_frame(data: &[u8], flip_vertical: bool, order: ChannelOrder) -> Result<Sample, AppError> {
    let frame = decode_frame(data)?;
    let pixel = center_pixel(&frame, flip_vertical)?;
    Ok(order.to_rgb(pixel).into())
}

/// Render a `size`x`size` swatch filled with one color
pub fn render_swatch(color: Rgb, size: u32) -> Result<Vec<u8>, AppError> {
    let indexed = vec![0u8; (size * size) as usize];
    encode_indexed_png(&indexed, size, size, &[color])
}

/// Encode indexed pixel data as PNG with the given palette
fn encode_indexed_png(
    indexed: &[u8],
    width: u32,
    height: u32,
    palette: &[Rgb],
) -> Result<Vec<u8>, AppError> {
    let mut output = Vec::new();

    {
        let mut encoder = Encoder::new(Cursor::new(&mut output), width, height);
        encoder.set_color(ColorType::Indexed);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_palette(palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect::<Vec<u8>>());

        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::ImageProcessing(format!("PNG header error: {}", e)))?;

        writer
            .write_image_data(indexed)
            .map_err(|e| AppError::ImageProcessing(format!("PNG write error: {}", e)))?;
    }

    Ok(output)
}

/// Encode an RgbImage in the given format
#[cfg(test)]
pub(crate) fn encode_frame(img: &RgbImage, format: image::ImageFormat) -> Vec<u8> {
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), format).unwrap();
    out
}
