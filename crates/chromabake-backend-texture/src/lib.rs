//! chromabake Texture Backend
//!
//! Channel packing for texture maps: up to four single-channel sources
//! (metallic, smoothness, occlusion, mask, ...) are resampled to one target
//! resolution and stored in the R, G, B and A channels of a single image.
//! Unpacking splits a packed image back into four greyscale images.
//!
//! [`pack`] and [`unpack`] are pure functions over in-memory buffers. The
//! [`png`] module decodes sources and writes results deterministically.
//!
//! Missing pack sources fill their channel with a constant: 0 for R, G and B,
//! 1 for alpha.
//!
//! # Example
//!
//! ```
//! use chromabake_backend_texture::{pack, unpack, ChannelImage, PackInput};
//! use chromabake_spec::{Channel, ResampleFilter, TargetSize};
//!
//! let mask = ChannelImage::filled(4, 4, 0.25).unwrap();
//! let size = TargetSize::new(2, 2).unwrap();
//! let packed = pack(size, [Some(PackInput::new(&mask)), None, None, None], ResampleFilter::Bilinear);
//!
//! let first = packed.get(0, 0);
//! assert_eq!((first.r, first.g, first.b, first.a), (0.25, 0.0, 0.0, 1.0));
//!
//! let split = unpack(&packed, size, ResampleFilter::Bilinear);
//! assert_eq!(split.get(Channel::Red).get(1, 1).g, 0.25);
//! ```

pub mod buffer;
pub mod color;
pub mod error;
pub mod pack;
pub mod png;
pub mod resample;
pub mod unpack;

pub use buffer::{ChannelImage, PackedImage, TextureBuffer};
pub use color::Color;
pub use error::TextureError;
pub use pack::{pack, PackInput};
pub use resample::{resample_channel, resample_texture};
pub use unpack::{unpack, UnpackedChannels};
