//! RGBA pixel buffers and resampling.

use texpack_spec::SamplingFilter;

use crate::color::Color;

/// A 2D texture buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (RGBA, row-major).
    pub data: Vec<Color>,
}

impl TextureBuffer {
    /// Create a new texture buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create a new buffer with every component, alpha included, set to 0.
    pub fn new_transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, Color::transparent())
    }

    /// Create a buffer by evaluating `f` at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Create from tightly packed 8-bit RGBA bytes.
    ///
    /// Returns `None` if `bytes` is not `width * height * 4` long.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| Color::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Returns true if the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color;
    }

    /// Get a pixel with coordinates clamped to the edge.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> Color {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(cx, cy)
    }

    /// Sample the pixel of a `target_width` x `target_height` grid that lands
    /// on this buffer at output pixel `(x, y)`.
    ///
    /// Texel centres are aligned: output pixel `x` covers source coordinate
    /// `(x + 0.5) * width / target_width`. Coordinates outside the buffer clamp
    /// to the edge. When the target size equals the buffer size both filters
    /// return the stored pixel.
    ///
    /// Must not be called on an empty buffer.
    pub fn sample_scaled(
        &self,
        filter: SamplingFilter,
        x: u32,
        y: u32,
        target_width: u32,
        target_height: u32,
    ) -> Color {
        let sx = (x as f64 + 0.5) * self.width as f64 / target_width as f64;
        let sy = (y as f64 + 0.5) * self.height as f64 / target_height as f64;

        match filter {
            SamplingFilter::Nearest => self.get_clamped(sx.floor() as i64, sy.floor() as i64),
            SamplingFilter::Bilinear => self.sample_bilinear_texel(sx - 0.5, sy - 0.5),
        }
    }

    /// Bilinear sample at texel-space coordinates (texel `i` centred at `i`).
    pub fn sample_bilinear_texel(&self, x: f64, y: f64) -> Color {
        let x = x.clamp(0.0, (self.width - 1) as f64);
        let y = y.clamp(0.0, (self.height - 1) as f64);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let c00 = self.get(x0, y0);
        let c10 = self.get(x1, y0);
        let c01 = self.get(x0, y1);
        let c11 = self.get(x1, y1);

        let c0 = c00.lerp(&c10, fx);
        let c1 = c01.lerp(&c11, fx);
        c0.lerp(&c1, fy)
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Convert to 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    /// Convert to 32-bit float RGBA components.
    pub fn to_rgba32f(&self) -> Vec<f32> {
        let mut values = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            values.extend_from_slice(&color.to_rgba32f());
        }
        values
    }

    /// BLAKE3 hex digest of the exact pixel values.
    ///
    /// Two buffers have the same hash only if every component is bit-identical.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.width.to_le_bytes());
        hasher.update(&self.height.to_le_bytes());
        for color in &self.data {
            for component in color.to_array() {
                hasher.update(&component.to_bits().to_le_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
