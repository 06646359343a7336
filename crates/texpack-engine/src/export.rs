//! Image loading and output encoding.
//!
//! PNG output goes through the deterministic writer in [`crate::png`]. JPEG
//! and OpenEXR output and all decoding use the `image` crate.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat, Rgba32FImage};
use texpack_spec::OutputFormat;

use crate::buffer::TextureBuffer;
use crate::color::Color;
use crate::error::PackError;
use crate::png::{write_rgba_to_vec_with_hash, PngConfig};

/// JPEG quality used for packed output.
pub const JPEG_QUALITY: u8 = 95;

/// Decode an image file into normalized RGBA.
///
/// 8-bit images map exactly to `n / 255`. Deeper and float images keep their
/// precision; float values are not clamped here.
pub fn load_texture(path: &Path) -> Result<TextureBuffer, PackError> {
    let image = image::open(path)?;
    let buffer = from_dynamic(&image);
    tracing::debug!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        buffer.width,
        buffer.height,
        image.color()
    );
    Ok(buffer)
}

/// Decode an in-memory image into normalized RGBA.
pub fn decode_texture(bytes: &[u8]) -> Result<TextureBuffer, PackError> {
    let image = image::load_from_memory(bytes)?;
    Ok(from_dynamic(&image))
}

fn from_dynamic(image: &DynamicImage) -> TextureBuffer {
    use image::ColorType;

    let (width, height) = (image.width(), image.height());
    match image.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
            let rgba = image.to_rgba8();
            let data = rgba.pixels().map(|p| Color::from_rgba8(p.0)).collect();
            TextureBuffer {
                width,
                height,
                data,
            }
        }
        _ => {
            let rgba = image.to_rgba32f();
            let data = rgba.pixels().map(|p| Color::from_rgba32f(p.0)).collect();
            TextureBuffer {
                width,
                height,
                data,
            }
        }
    }
}

/// Encode a packed texture in `format`.
pub fn encode(buffer: &TextureBuffer, format: OutputFormat) -> Result<Vec<u8>, PackError> {
    if buffer.is_empty() {
        return Err(PackError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            buffer.width, buffer.height
        )));
    }

    let out = match format {
        OutputFormat::Png => {
            let (bytes, hash) = write_rgba_to_vec_with_hash(buffer, &PngConfig::default())?;
            tracing::debug!("PNG content hash {}", hash);
            bytes
        }
        OutputFormat::Jpg => {
            let mut out = Vec::new();
            let rgb = buffer.to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            encoder.encode(&rgb, buffer.width, buffer.height, ExtendedColorType::Rgb8)?;
            out
        }
        OutputFormat::Exr => {
            let image = Rgba32FImage::from_raw(buffer.width, buffer.height, buffer.to_rgba32f())
                .ok_or_else(|| {
                    PackError::InvalidDimensions(format!(
                        "pixel data does not match {}x{}",
                        buffer.width, buffer.height
                    ))
                })?;
            let mut out = Vec::new();
            DynamicImage::ImageRgba32F(image)
                .write_to(&mut Cursor::new(&mut out), ImageFormat::OpenExr)?;
            out
        }
    };

    tracing::debug!(
        "Encoded {}x{} as {} ({} bytes)",
        buffer.width,
        buffer.height,
        format.extension(),
        out.len()
    );
    Ok(out)
}

/// Encode a packed texture and write it to `path`.
pub fn save(buffer: &TextureBuffer, path: &Path, format: OutputFormat) -> Result<(), PackError> {
    let bytes = encode(buffer, format)?;
    std::fs::write(path, &bytes)?;
    tracing::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
