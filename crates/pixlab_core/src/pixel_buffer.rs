//! CPU-side pixel storage shared by the rasterizer and the ray tracer.
//!
//! Pixels are stored row-major as `stride` floats each. Channel 3, when the
//! stride has one, doubles as the depth channel for triangle rasterization.

use glam::Vec3;
use thiserror::Error;

/// Index of the channel holding depth for depth-tested writes.
pub const DEPTH_CHANNEL: usize = 3;

/// Errors that can occur when allocating a pixel buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("Pixel stride must be at least one channel")]
    ZeroStride,

    #[error("Pixel buffer {width}x{height} with stride {stride} is too large")]
    TooLarge { width: u32, height: u32, stride: usize },
}

pub type PixelBufferResult<T> = Result<T, PixelBufferError>;

/// A flat array of floating-point pixel channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer of `width` × `height` pixels with `stride` channels each.
    pub fn new(width: u32, height: u32, stride: usize) -> PixelBufferResult<Self> {
        if stride == 0 {
            return Err(PixelBufferError::ZeroStride);
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(stride))
            .ok_or(PixelBufferError::TooLarge {
                width,
                height,
                stride,
            })?;

        Ok(Self {
            width,
            height,
            stride,
            data: vec![0.0; len],
        })
    }

    /// Allocate an RGBA buffer (stride 4).
    pub fn rgba(width: u32, height: u32) -> PixelBufferResult<Self> {
        Self::new(width, height, 4)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Floats per pixel.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Floats per row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.stride
    }

    /// Whether pixels carry a depth channel.
    pub fn has_depth(&self) -> bool {
        self.stride > DEPTH_CHANNEL
    }

    /// Whether (x, y) addresses a pixel of this buffer.
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Offset of the first channel of pixel (x, y), or `None` when out of bounds.
    #[inline]
    pub fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.stride)
    }

    /// The channel group of pixel (x, y).
    pub fn read(&self, x: i64, y: i64) -> Option<&[f32]> {
        let offset = self.offset(x, y)?;
        Some(&self.data[offset..offset + self.stride])
    }

    /// Mutable channel group of pixel (x, y).
    pub fn read_mut(&mut self, x: i64, y: i64) -> Option<&mut [f32]> {
        let offset = self.offset(x, y)?;
        Some(&mut self.data[offset..offset + self.stride])
    }

    /// Store up to `stride` leading channels of pixel (x, y).
    ///
    /// Extra values are ignored. Returns `false` without touching memory
    /// when (x, y) is out of bounds.
    pub fn write(&mut self, x: i64, y: i64, values: &[f32]) -> bool {
        match self.read_mut(x, y) {
            Some(pixel) => {
                let count = pixel.len().min(values.len());
                pixel[..count].copy_from_slice(&values[..count]);
                true
            }
            None => false,
        }
    }

    /// Store the RGB channels of pixel (x, y).
    pub fn write_rgb(&mut self, x: i64, y: i64, rgb: Vec3) -> bool {
        self.write(x, y, &rgb.to_array())
    }

    /// Stored depth of pixel (x, y).
    pub fn depth(&self, x: i64, y: i64) -> Option<f32> {
        if !self.has_depth() {
            return None;
        }
        self.read(x, y).map(|pixel| pixel[DEPTH_CHANNEL])
    }

    /// Closer-wins write of `(rgb, depth)` into pixel (x, y).
    ///
    /// The pixel is written only when `depth` is less than the stored depth.
    /// Returns whether the write happened.
    pub fn write_with_depth(&mut self, x: i64, y: i64, rgb: Vec3, depth: f32) -> bool {
        if !self.has_depth() {
            return false;
        }

        match self.read_mut(x, y) {
            Some(pixel) if depth < pixel[DEPTH_CHANNEL] => {
                pixel[..3].copy_from_slice(&rgb.to_array());
                pixel[DEPTH_CHANNEL] = depth;
                true
            }
            _ => false,
        }
    }

    /// Fill every pixel with `values` (missing channels are left untouched).
    pub fn clear(&mut self, values: &[f32]) {
        let count = self.stride.min(values.len());
        for pixel in self.data.chunks_exact_mut(self.stride) {
            pixel[..count].copy_from_slice(&values[..count]);
        }
    }

    /// Reset only the depth channel, typically to the 1.0 "far" sentinel.
    pub fn clear_depth(&mut self, depth: f32) {
        if !self.has_depth() {
            return;
        }
        for pixel in self.data.chunks_exact_mut(self.stride) {
            pixel[DEPTH_CHANNEL] = depth;
        }
    }

    /// Raw channel data for upload.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Raw channel data as bytes, native endian.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zero_filled() {
        let buffer = PixelBuffer::new(4, 3, 4).unwrap();
        assert_eq!(buffer.as_slice().len(), 4 * 3 * 4);
        assert!(buffer.as_slice().iter().all(|v| *v == 0.0));
        assert_eq!(buffer.row_len(), 16);
    }

    #[test]
    fn test_zero_stride_rejected() {
        assert_eq!(PixelBuffer::new(4, 4, 0), Err(PixelBufferError::ZeroStride));
    }

    #[test]
    fn test_oversized_rejected() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX, usize::MAX).unwrap_err();
        assert!(matches!(err, PixelBufferError::TooLarge { .. }));
    }

    #[test]
    fn test_write_uses_row_major_offset() {
        let mut buffer = PixelBuffer::new(5, 4, 3).unwrap();
        assert!(buffer.write(2, 1, &[0.1, 0.2, 0.3]));

        let offset = (5 + 2) * 3;
        assert_eq!(&buffer.as_slice()[offset..offset + 3], &[0.1, 0.2, 0.3]);
        assert_eq!(buffer.read(2, 1), Some(&[0.1, 0.2, 0.3][..]));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buffer = PixelBuffer::rgba(2, 2).unwrap();
        let before = buffer.clone();

        assert!(!buffer.write(-1, 0, &[1.0; 4]));
        assert!(!buffer.write(0, 2, &[1.0; 4]));
        assert!(!buffer.write(2, 0, &[1.0; 4]));
        assert!(buffer.read(5, 5).is_none());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_partial_write_keeps_other_channels() {
        let mut buffer = PixelBuffer::rgba(1, 1).unwrap();
        buffer.clear(&[0.0, 0.0, 0.0, 1.0]);
        buffer.write_rgb(0, 0, Vec3::new(0.5, 0.25, 0.125));
        assert_eq!(buffer.read(0, 0), Some(&[0.5, 0.25, 0.125, 1.0][..]));
    }

    #[test]
    fn test_depth_test_closer_wins() {
        let mut buffer = PixelBuffer::rgba(1, 1).unwrap();
        buffer.clear_depth(1.0);

        assert!(buffer.write_with_depth(0, 0, Vec3::X, 0.5));
        assert!(!buffer.write_with_depth(0, 0, Vec3::Y, 0.7));
        assert!(!buffer.write_with_depth(0, 0, Vec3::Y, 0.5));
        assert!(buffer.write_with_depth(0, 0, Vec3::Z, 0.2));

        assert_eq!(buffer.read(0, 0), Some(&[0.0, 0.0, 1.0, 0.2][..]));
    }

    #[test]
    fn test_no_depth_channel_without_stride() {
        let mut buffer = PixelBuffer::new(1, 1, 3).unwrap();
        assert!(!buffer.has_depth());
        assert_eq!(buffer.depth(0, 0), None);
        assert!(!buffer.write_with_depth(0, 0, Vec3::ONE, -10.0));
    }

    #[test]
    fn test_bytes_view_length() {
        let buffer = PixelBuffer::rgba(3, 2).unwrap();
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4 * std::mem::size_of::<f32>());
    }
}
