//! Channel packing types shared by the texture backend and the CLI.
//!
//! A pack request names up to four source images, one per output channel.
//! Each source is either a bare path or an extended reference that selects
//! which component of a full-color image to read and whether to invert it:
//!
//! ```text
//! channels = { "r": "ao.png", "g": { "path": "gloss.png", "invert": true } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// Edge lengths offered by the packer, smallest first.
pub const SIZE_PRESETS: [u32; 6] = [128, 256, 512, 1024, 2048, 4096];

/// One channel of an RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels in RGBA order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Position of the channel within an RGBA tuple.
    pub const fn index(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// Lowercase name used in output file names ("red", "green", ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }

    /// Value a packed channel takes when no source is supplied.
    ///
    /// Color channels default to black, alpha defaults to opaque.
    pub const fn default_value(&self) -> f32 {
        match self {
            Channel::Alpha => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which component of a multi-channel source image to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorComponent {
    /// Red channel (greyscale images store their value here).
    #[default]
    R,
    /// Green channel.
    G,
    /// Blue channel.
    B,
    /// Alpha channel.
    A,
    /// Rec. 709 luminance computed from RGB.
    Luminance,
}

impl FromStr for ColorComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(ColorComponent::R),
            "g" => Ok(ColorComponent::G),
            "b" => Ok(ColorComponent::B),
            "a" => Ok(ColorComponent::A),
            "luminance" => Ok(ColorComponent::Luminance),
            other => Err(format!(
                "unknown component '{}': expected r, g, b, a or luminance",
                other
            )),
        }
    }
}

/// A channel source: a path to an image, optionally with component
/// selection and inversion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChannelSource {
    /// Bare path; reads the default component, no inversion.
    Path(String),
    /// Extended reference with options.
    Extended {
        /// Path to the source image.
        path: String,
        /// Component to read (defaults to `r`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<ColorComponent>,
        /// Whether to invert the values (1.0 - value).
        #[serde(default)]
        invert: bool,
    },
}

impl ChannelSource {
    /// Creates a bare path source.
    pub fn path(path: impl Into<String>) -> Self {
        ChannelSource::Path(path.into())
    }

    /// Creates an extended source.
    pub fn extended(path: impl Into<String>, component: Option<ColorComponent>, invert: bool) -> Self {
        ChannelSource::Extended {
            path: path.into(),
            component,
            invert,
        }
    }

    /// Path of the referenced image.
    pub fn source_path(&self) -> &str {
        match self {
            ChannelSource::Path(path) => path,
            ChannelSource::Extended { path, .. } => path,
        }
    }

    /// Component to read from the image.
    pub fn component(&self) -> ColorComponent {
        match self {
            ChannelSource::Extended {
                component: Some(c), ..
            } => *c,
            _ => ColorComponent::default(),
        }
    }

    /// Returns true if the source is inverted.
    pub fn is_inverted(&self) -> bool {
        match self {
            ChannelSource::Extended { invert, .. } => *invert,
            ChannelSource::Path(_) => false,
        }
    }
}

/// Sources for each output channel of a pack. Every channel is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackedChannels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<ChannelSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<ChannelSource>,
}

impl PackedChannels {
    /// Source assigned to a channel, if any.
    pub fn get(&self, channel: Channel) -> Option<&ChannelSource> {
        match channel {
            Channel::Red => self.r.as_ref(),
            Channel::Green => self.g.as_ref(),
            Channel::Blue => self.b.as_ref(),
            Channel::Alpha => self.a.as_ref(),
        }
    }

    /// Assign a source to a channel.
    pub fn set(&mut self, channel: Channel, source: Option<ChannelSource>) {
        match channel {
            Channel::Red => self.r = source,
            Channel::Green => self.g = source,
            Channel::Blue => self.b = source,
            Channel::Alpha => self.a = source,
        }
    }

    /// Number of channels with a source.
    pub fn present_count(&self) -> usize {
        Channel::ALL.iter().filter(|c| self.get(**c).is_some()).count()
    }
}

/// Resampling filter used when a source differs from the target size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Nearest-neighbour sampling.
    Nearest,
    /// Bilinear interpolation when enlarging, area-weighted averaging when shrinking.
    #[default]
    Bilinear,
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(ResampleFilter::Nearest),
            "bilinear" => Ok(ResampleFilter::Bilinear),
            other => Err(format!(
                "unknown filter '{}': expected 'nearest' or 'bilinear'",
                other
            )),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleFilter::Nearest => f.write_str("nearest"),
            ResampleFilter::Bilinear => f.write_str("bilinear"),
        }
    }
}

/// Output resolution of a pack or unpack. Always at least 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct TargetSize {
    width: u32,
    height: u32,
}

impl TargetSize {
    /// Create a target size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::invalid(format!(
                "target size must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Square target size.
    pub fn square(edge: u32) -> Result<Self, CodecError> {
        Self::new(edge, edge)
    }

    /// Width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl TryFrom<[u32; 2]> for TargetSize {
    type Error = CodecError;

    fn try_from(v: [u32; 2]) -> Result<Self, Self::Error> {
        TargetSize::new(v[0], v[1])
    }
}

impl From<TargetSize> for [u32; 2] {
    fn from(s: TargetSize) -> Self {
        [s.width, s.height]
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pick a square preset size large enough for every given source.
///
/// Returns the smallest preset whose edge is at least the largest width or
/// height among `dimensions`. Sources larger than every preset get the
/// largest preset. With no sources the smallest preset is returned.
pub fn auto_select_size(dimensions: impl IntoIterator<Item = (u32, u32)>) -> TargetSize {
    let max = dimensions
        .into_iter()
        .map(|(w, h)| w.max(h))
        .max()
        .unwrap_or(0);

    let edge = SIZE_PRESETS
        .iter()
        .copied()
        .find(|&preset| preset >= max)
        .unwrap_or(SIZE_PRESETS[SIZE_PRESETS.len() - 1]);

    TargetSize {
        width: edge,
        height: edge,
    }
}
