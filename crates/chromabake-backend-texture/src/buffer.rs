//! Pixel buffers.

use chromabake_spec::{validate_resolution, Channel, CodecError, ColorComponent, TargetSize};

use crate::color::Color;

fn checked_size(width: u32, height: u32, len: usize) -> Result<TargetSize, CodecError> {
    validate_resolution(width, height)?;
    let size = TargetSize::new(width, height)?;
    if len != size.pixel_count() {
        return Err(CodecError::invalid(format!(
            "expected {} samples for {}, got {}",
            size.pixel_count(),
            size,
            len
        )));
    }
    Ok(size)
}

/// Single-channel image with one `f32` sample per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelImage {
    size: TargetSize,
    data: Vec<f32>,
}

impl ChannelImage {
    /// Wrap row-major samples. The sample count must match the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> Result<Self, CodecError> {
        let size = checked_size(width, height, data.len())?;
        Ok(Self { size, data })
    }

    /// Image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, CodecError> {
        validate_resolution(width, height)?;
        let size = TargetSize::new(width, height)?;
        Ok(Self {
            size,
            data: vec![value; size.pixel_count()],
        })
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Get a sample.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y * self.size.width() + x) as usize]
    }

    /// Map every sample to `1 - s`.
    pub fn inverted(&self) -> ChannelImage {
        ChannelImage {
            size: self.size,
            data: self.data.iter().map(|&s| 1.0 - s).collect(),
        }
    }

    /// Greyscale view: the sample in R, G and B, alpha 1.
    pub fn to_texture_buffer(&self) -> TextureBuffer {
        TextureBuffer {
            size: self.size,
            data: self.data.iter().map(|&v| Color::gray(v)).collect(),
        }
    }

    pub(crate) fn from_parts(size: TargetSize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), size.pixel_count());
        Self { size, data }
    }
}

/// A 2D RGBA texture buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBuffer {
    size: TargetSize,
    data: Vec<Color>,
}

/// The output of packing: one RGBA image at the target size.
pub type PackedImage = TextureBuffer;

impl TextureBuffer {
    /// Create a new texture buffer filled with a color.
    pub fn new(size: TargetSize, fill: Color) -> Self {
        Self {
            size,
            data: vec![fill; size.pixel_count()],
        }
    }

    /// Wrap row-major pixels. The pixel count must match the dimensions.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Color>) -> Result<Self, CodecError> {
        let size = checked_size(width, height, data.len())?;
        Ok(Self { size, data })
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    pub fn size(&self) -> TargetSize {
        self.size
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.data[(y * self.size.width() + x) as usize]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = (y * self.size.width() + x) as usize;
        self.data[idx] = color;
    }

    /// Extract one channel.
    pub fn channel(&self, channel: Channel) -> ChannelImage {
        ChannelImage::from_parts(
            self.size,
            self.data.iter().map(|c| c.channel(channel)).collect(),
        )
    }

    /// Reduce to one channel through a component selector.
    pub fn component(&self, component: ColorComponent) -> ChannelImage {
        ChannelImage::from_parts(
            self.size,
            self.data.iter().map(|c| c.component(component)).collect(),
        )
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    pub(crate) fn from_parts(size: TargetSize, data: Vec<Color>) -> Self {
        debug_assert_eq!(data.len(), size.pixel_count());
        Self { size, data }
    }
}
