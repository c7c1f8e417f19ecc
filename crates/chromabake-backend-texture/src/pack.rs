//! Packing up to four single-channel images into one RGBA image.

use chromabake_spec::{Channel, ResampleFilter, TargetSize};
use tracing::debug;

use crate::buffer::{ChannelImage, PackedImage};
use crate::color::Color;
use crate::resample::resample_channel;

/// One pack source: an image and whether to invert it.
#[derive(Debug, Clone, Copy)]
pub struct PackInput<'a> {
    pub image: &'a ChannelImage,
    pub invert: bool,
}

impl<'a> PackInput<'a> {
    /// Source used as-is.
    pub fn new(image: &'a ChannelImage) -> Self {
        Self {
            image,
            invert: false,
        }
    }

    /// Source stored as `1 - s`.
    pub fn inverted(image: &'a ChannelImage) -> Self {
        Self {
            image,
            invert: true,
        }
    }
}

/// Pack sources (in R, G, B, A order) into one image of exactly `size`.
///
/// Each present source is resampled to `size`, inverted if requested, and
/// written to its own channel. Absent sources leave their channel at
/// [`Channel::default_value`]: 0 for R, G and B, 1 for alpha. Any number of
/// sources, including none, is accepted.
pub fn pack(
    size: TargetSize,
    sources: [Option<PackInput<'_>>; 4],
    filter: ResampleFilter,
) -> PackedImage {
    let defaults = Color::rgba(
        Channel::Red.default_value(),
        Channel::Green.default_value(),
        Channel::Blue.default_value(),
        Channel::Alpha.default_value(),
    );
    let mut pixels = vec![defaults; size.pixel_count()];

    for (channel, source) in Channel::ALL.into_iter().zip(sources) {
        let Some(source) = source else {
            debug!(%channel, value = channel.default_value(), "channel has no source, using constant");
            continue;
        };

        let mut resampled = resample_channel(source.image, size, filter);
        if source.invert {
            resampled = resampled.inverted();
        }
        for (pixel, &sample) in pixels.iter_mut().zip(resampled.samples()) {
            pixel.set_channel(channel, sample);
        }
    }

    PackedImage::from_parts(size, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sources_is_defaults() {
        let size = TargetSize::new(3, 2).unwrap();
        let packed = pack(size, [None, None, None, None], ResampleFilter::Bilinear);
        assert_eq!(packed.size(), size);
        assert!(packed
            .pixels()
            .iter()
            .all(|&c| c == Color::rgba(0.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_channels_are_independent() {
        let size = TargetSize::new(1, 1).unwrap();
        let blue = ChannelImage::filled(1, 1, 0.7).unwrap();
        let packed = pack(
            size,
            [None, None, Some(PackInput::new(&blue)), None],
            ResampleFilter::Nearest,
        );
        assert_eq!(packed.get(0, 0), Color::rgba(0.0, 0.0, 0.7, 1.0));
    }

    #[test]
    fn test_invert_applies_after_resample() {
        let size = TargetSize::new(1, 1).unwrap();
        let src = ChannelImage::new(2, 1, vec![0.0, 0.5]).unwrap();
        let packed = pack(
            size,
            [None, None, None, Some(PackInput::inverted(&src))],
            ResampleFilter::Bilinear,
        );
        assert_eq!(packed.get(0, 0).a, 0.75);
    }

    #[test]
    fn test_sources_are_not_mutated() {
        let src = ChannelImage::new(2, 1, vec![0.1, 0.9]).unwrap();
        let before = src.clone();
        let _ = pack(
            TargetSize::new(4, 4).unwrap(),
            [Some(PackInput::inverted(&src)), None, None, None],
            ResampleFilter::Bilinear,
        );
        assert_eq!(src, before);
    }
}
