//! PNG decoding and deterministic PNG writing.
//!
//! Writing uses fixed compression and filter settings and no metadata chunks,
//! so the same image always encodes to the same bytes.

use std::io::{Read, Write};
use std::path::Path;

use ::png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use chromabake_spec::ColorComponent;
use tracing::debug;

use crate::buffer::{ChannelImage, TextureBuffer};
use crate::color::Color;
use crate::error::TextureError;

/// Decoder memory limit; a 16384x16384 RGBA16 image needs 2 GiB.
const DECODE_LIMIT_BYTES: usize = 1 << 31;

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write an RGBA texture buffer to a PNG file.
pub fn write_rgba(
    buffer: &TextureBuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), TextureError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_rgba_to_writer(buffer, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Write an RGBA texture buffer to any writer as 8-bit RGBA.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &TextureBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), TextureError> {
    let mut encoder = Encoder::new(writer, buffer.width(), buffer.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.to_rgba8())?;
    png_writer.finish()?;

    Ok(())
}

/// Encode to a `Vec<u8>` and return the bytes with their hash.
pub fn write_rgba_to_vec_with_hash(
    buffer: &TextureBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), TextureError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Decode a PNG into an RGBA texture with components in [0, 1].
///
/// Accepts 1- to 16-bit greyscale, greyscale+alpha, RGB, RGBA and indexed
/// images. Greyscale is replicated into R, G and B; images without alpha
/// (or a `tRNS` chunk) decode with alpha 1.
pub fn decode_texture<R: Read>(reader: R) -> Result<TextureBuffer, TextureError> {
    let mut limits = ::png::Limits::default();
    limits.bytes = DECODE_LIMIT_BYTES;
    let mut decoder = Decoder::new_with_limits(reader, limits);
    decoder.set_transformations(Transformations::EXPAND);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        bit_depth = ?info.bit_depth,
        "decoded PNG"
    );

    let pixels = expand_to_colors(&buf, info.color_type, info.bit_depth)?;
    Ok(TextureBuffer::from_pixels(info.width, info.height, pixels)?)
}

fn expand_to_colors(
    buf: &[u8],
    color_type: ColorType,
    bit_depth: BitDepth,
) -> Result<Vec<Color>, TextureError> {
    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(TextureError::UnsupportedFormat(
                "indexed PNG was not expanded to RGB".to_string(),
            ))
        }
    };

    let colors = match bit_depth {
        BitDepth::Eight => widen(buf, channels, u8::MAX)
            .map(Color::from_rgba8)
            .collect(),
        BitDepth::Sixteen => {
            let samples: Vec<u16> = buf
                .chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .collect();
            widen(&samples, channels, u16::MAX)
                .map(Color::from_rgba16)
                .collect()
        }
        other => {
            return Err(TextureError::UnsupportedFormat(format!(
                "unexpected output bit depth {:?}",
                other
            )))
        }
    };
    Ok(colors)
}

/// Widen grey, grey+alpha and RGB pixels to RGBA; missing alpha is `opaque`.
fn widen<T: Copy>(
    samples: &[T],
    channels: usize,
    opaque: T,
) -> impl Iterator<Item = [T; 4]> + '_ {
    samples.chunks_exact(channels).map(move |px| match *px {
        [v] => [v, v, v, opaque],
        [v, a] => [v, v, v, a],
        [r, g, b] => [r, g, b, opaque],
        [r, g, b, a] => [r, g, b, a],
        _ => [px[0], px[0], px[0], opaque],
    })
}

/// Decode a PNG held in memory.
pub fn decode_texture_slice(data: &[u8]) -> Result<TextureBuffer, TextureError> {
    decode_texture(std::io::Cursor::new(data))
}

/// Read a PNG file into an RGBA texture.
pub fn read_texture(path: &Path) -> Result<TextureBuffer, TextureError> {
    let file = std::fs::File::open(path)?;
    decode_texture(std::io::BufReader::new(file))
}

/// Read a PNG file and reduce it to one channel.
pub fn read_channel_image(
    path: &Path,
    component: ColorComponent,
) -> Result<ChannelImage, TextureError> {
    Ok(read_texture(path)?.component(component))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromabake_spec::TargetSize;

    fn encode_raw(data: &[u8], w: u32, h: u32, color: ColorType, depth: BitDepth) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, w, h);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_rgba_deterministic() {
        let mut buffer = TextureBuffer::new(TargetSize::new(16, 16).unwrap(), Color::black());
        for y in 0..16 {
            for x in 0..16 {
                buffer.set(x, y, Color::rgba(x as f32 / 15.0, y as f32 / 15.0, 0.5, 1.0));
            }
        }

        let config = PngConfig::default();
        let (data1, hash1) = write_rgba_to_vec_with_hash(&buffer, &config).unwrap();
        let (data2, hash2) = write_rgba_to_vec_with_hash(&buffer, &config).unwrap();
        assert_eq!(data1, data2);
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_rgba8_round_trip() {
        let pixels = vec![
            Color::from_rgba8([0, 64, 128, 255]),
            Color::from_rgba8([255, 32, 16, 0]),
        ];
        let buffer = TextureBuffer::from_pixels(2, 1, pixels).unwrap();
        let (data, _) = write_rgba_to_vec_with_hash(&buffer, &PngConfig::fast()).unwrap();
        let decoded = decode_texture_slice(&data).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_grayscale_decodes_replicated_opaque() {
        let data = encode_raw(&[0, 255], 2, 1, ColorType::Grayscale, BitDepth::Eight);
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(tex.get(0, 0), Color::rgba(0.0, 0.0, 0.0, 1.0));
        assert_eq!(tex.get(1, 0), Color::rgba(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_gray_alpha_decodes() {
        let data = encode_raw(&[255, 0], 1, 1, ColorType::GrayscaleAlpha, BitDepth::Eight);
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(tex.get(0, 0), Color::rgba(1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_sixteen_bit_decodes_full_range() {
        let data = encode_raw(
            &[0xff, 0xff, 0x00, 0x00],
            2,
            1,
            ColorType::Grayscale,
            BitDepth::Sixteen,
        );
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(tex.get(0, 0).r, 1.0);
        assert_eq!(tex.get(1, 0).r, 0.0);
    }

    #[test]
    fn test_sixteen_bit_rgba_keeps_precision() {
        // 0x8000 has no exact 8-bit counterpart.
        let data = encode_raw(
            &[0x80, 0x00, 0xff, 0xff, 0x00, 0x00, 0x40, 0x00],
            1,
            1,
            ColorType::Rgba,
            BitDepth::Sixteen,
        );
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(
            tex.get(0, 0),
            Color::from_rgba16([0x8000, 0xffff, 0x0000, 0x4000])
        );
        assert!((tex.get(0, 0).r - 0.500_007_6).abs() < 1e-6);
    }

    #[test]
    fn test_sixteen_bit_rgb_is_opaque() {
        let data = encode_raw(
            &[0x00, 0x00, 0x80, 0x00, 0xff, 0xff],
            1,
            1,
            ColorType::Rgb,
            BitDepth::Sixteen,
        );
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(tex.get(0, 0).a, 1.0);
        assert_eq!(tex.get(0, 0).b, 1.0);
    }

    #[test]
    fn test_rgb_component_selection() {
        let data = encode_raw(&[255, 0, 0], 1, 1, ColorType::Rgb, BitDepth::Eight);
        let tex = decode_texture_slice(&data).unwrap();
        assert_eq!(tex.component(ColorComponent::R).samples(), &[1.0]);
        assert_eq!(tex.component(ColorComponent::G).samples(), &[0.0]);
        assert_eq!(tex.component(ColorComponent::A).samples(), &[1.0]);
    }

    #[test]
    fn test_garbage_is_decoding_error() {
        let err = decode_texture_slice(b"definitely not a png").unwrap_err();
        assert!(matches!(err, TextureError::Decoding(_)));
    }

    #[test]
    fn test_write_and_read_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mask.png");
        let buffer = ChannelImage::new(2, 2, vec![0.0, 1.0, 1.0, 0.0])
            .unwrap()
            .to_texture_buffer();
        write_rgba(&buffer, &path, &PngConfig::default()).unwrap();

        let mask = read_channel_image(&path, ColorComponent::R).unwrap();
        assert_eq!(mask.samples(), &[0.0, 1.0, 1.0, 0.0]);
    }
}
