//! Splitting a packed image into four greyscale images.

use chromabake_spec::{Channel, ResampleFilter, TargetSize};

use crate::buffer::{ChannelImage, PackedImage, TextureBuffer};
use crate::resample::resample_texture;

/// The four images produced by [`unpack`].
///
/// Each is a greyscale RGBA image: the channel value in R, G and B, alpha 1.
#[derive(Debug, Clone, PartialEq)]
pub struct UnpackedChannels {
    pub red: TextureBuffer,
    pub green: TextureBuffer,
    pub blue: TextureBuffer,
    pub alpha: TextureBuffer,
}

impl UnpackedChannels {
    /// Image for one channel.
    pub fn get(&self, channel: Channel) -> &TextureBuffer {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Alpha => &self.alpha,
        }
    }

    /// Scalar samples of one channel.
    pub fn channel_image(&self, channel: Channel) -> ChannelImage {
        self.get(channel).channel(Channel::Red)
    }

    /// Channels paired with their images, in R, G, B, A order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &TextureBuffer)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Split `source` into four greyscale images of exactly `size`.
///
/// The source is resampled once (if its size differs), then each channel is
/// extracted. Unpacking at the size the image was packed at is lossless.
pub fn unpack(source: &PackedImage, size: TargetSize, filter: ResampleFilter) -> UnpackedChannels {
    let resampled = resample_texture(source, size, filter);
    let split = |channel| resampled.channel(channel).to_texture_buffer();

    UnpackedChannels {
        red: split(Channel::Red),
        green: split(Channel::Green),
        blue: split(Channel::Blue),
        alpha: split(Channel::Alpha),
    }
}
