//! Resizing images to a target size.
//!
//! Both filters map destination pixel centers onto the source
//! (`sx = (dx + 0.5) * sw / dw - 0.5`), so up- and down-scaling stay
//! centered. Resampling to the source's own size is an exact copy.
//!
//! `Bilinear` is separable. Along an axis that grows (or keeps its length)
//! each output pixel blends the two nearest source texels; along an axis
//! that shrinks it averages every source texel its footprint covers,
//! weighted by overlap, so large reductions do not skip source rows.

use chromabake_spec::{ResampleFilter, TargetSize};
use tracing::debug;

use crate::buffer::{ChannelImage, TextureBuffer};
use crate::color::Color;

/// A pixel value that can be interpolated.
trait Texel: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Texel for f32 {
    #[inline]
    fn lerp(self, other: f32, t: f32) -> f32 {
        self + (other - self) * t
    }
}

impl Texel for Color {
    #[inline]
    fn lerp(self, other: Color, t: f32) -> Color {
        Color::lerp(&self, &other, t)
    }
}

/// One source texel contributing to an output pixel.
///
/// `blend` is the running-mean factor: the texel's weight divided by the
/// total weight up to and including it. The first tap's blend is unused.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    index: u32,
    blend: f32,
}

/// Source coordinate for destination pixel `d` along one axis.
#[inline]
fn source_coord(d: u32, src_len: u32, dst_len: u32) -> f32 {
    let scale = src_len as f64 / dst_len as f64;
    let s = (d as f64 + 0.5) * scale - 0.5;
    s.clamp(0.0, (src_len - 1) as f64) as f32
}

#[inline]
fn nearest_index(d: u32, src_len: u32, dst_len: u32) -> u32 {
    let s = ((d as u64 * 2 + 1) * src_len as u64) / (dst_len as u64 * 2);
    (s as u32).min(src_len - 1)
}

/// Two-texel linear taps for destination pixel `d`.
fn linear_taps(d: u32, src_len: u32, dst_len: u32) -> Vec<Tap> {
    let fx = source_coord(d, src_len, dst_len);
    let x0 = fx.floor() as u32;
    vec![
        Tap {
            index: x0,
            blend: 1.0,
        },
        Tap {
            index: (x0 + 1).min(src_len - 1),
            blend: fx - x0 as f32,
        },
    ]
}

/// Area taps: every source texel overlapping `[d, d + 1) * src / dst`.
fn box_taps(d: u32, src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = src_len as f64 / dst_len as f64;
    let start = d as f64 * scale;
    let end = ((d + 1) as f64 * scale).min(src_len as f64);

    let first = start.floor() as u32;
    let last = (end.ceil() as u32).min(src_len);
    let mut taps = Vec::with_capacity((last - first) as usize);
    let mut total = 0.0f64;
    for i in first..last {
        let weight = (end.min(i as f64 + 1.0) - start.max(i as f64)).max(0.0);
        if weight <= 0.0 {
            continue;
        }
        total += weight;
        taps.push(Tap {
            index: i,
            blend: (weight / total) as f32,
        });
    }
    taps
}

fn axis_taps(src_len: u32, dst_len: u32) -> Vec<Vec<Tap>> {
    (0..dst_len)
        .map(|d| {
            if src_len > dst_len {
                box_taps(d, src_len, dst_len)
            } else {
                linear_taps(d, src_len, dst_len)
            }
        })
        .collect()
}

/// Running weighted mean over `taps`. Equal inputs give that input exactly.
#[inline]
fn blend<T: Texel>(taps: &[Tap], at: impl Fn(u32) -> T) -> T {
    taps[1..]
        .iter()
        .fold(at(taps[0].index), |acc, tap| acc.lerp(at(tap.index), tap.blend))
}

fn resample_pixels<T: Texel>(
    src: &[T],
    src_size: TargetSize,
    dst_size: TargetSize,
    filter: ResampleFilter,
) -> Vec<T> {
    let (sw, sh) = (src_size.width(), src_size.height());
    let (dw, dh) = (dst_size.width(), dst_size.height());

    match filter {
        ResampleFilter::Nearest => {
            let at = |x: u32, y: u32| src[(y * sw + x) as usize];
            let xs: Vec<u32> = (0..dw).map(|x| nearest_index(x, sw, dw)).collect();
            let mut out = Vec::with_capacity(dst_size.pixel_count());
            for y in 0..dh {
                let sy = nearest_index(y, sh, dh);
                out.extend(xs.iter().map(|&sx| at(sx, sy)));
            }
            out
        }
        ResampleFilter::Bilinear => {
            let x_taps = axis_taps(sw, dw);
            let y_taps = axis_taps(sh, dh);

            // Horizontal pass: sw x sh -> dw x sh.
            let mut rows = Vec::with_capacity(dw as usize * sh as usize);
            for y in 0..sh {
                let row = &src[(y * sw) as usize..((y + 1) * sw) as usize];
                rows.extend(x_taps.iter().map(|taps| blend(taps, |i| row[i as usize])));
            }

            // Vertical pass: dw x sh -> dw x dh.
            let mut out = Vec::with_capacity(dst_size.pixel_count());
            for taps in &y_taps {
                for x in 0..dw {
                    out.push(blend(taps, |i| rows[(i * dw + x) as usize]));
                }
            }
            out
        }
    }
}

/// Resize a single-channel image.
pub fn resample_channel(
    image: &ChannelImage,
    size: TargetSize,
    filter: ResampleFilter,
) -> ChannelImage {
    if image.size() == size {
        return image.clone();
    }
    debug!(from = %image.size(), to = %size, %filter, "resampling channel");
    ChannelImage::from_parts(
        size,
        resample_pixels(image.samples(), image.size(), size, filter),
    )
}

/// Resize an RGBA image.
pub fn resample_texture(
    texture: &TextureBuffer,
    size: TargetSize,
    filter: ResampleFilter,
) -> TextureBuffer {
    if texture.size() == size {
        return texture.clone();
    }
    debug!(from = %texture.size(), to = %size, %filter, "resampling texture");
    TextureBuffer::from_parts(
        size,
        resample_pixels(texture.pixels(), texture.size(), size, filter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size(w: u32, h: u32) -> TargetSize {
        TargetSize::new(w, h).unwrap()
    }

    #[test]
    fn test_same_size_is_copy() {
        let img = ChannelImage::new(2, 2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        for filter in [ResampleFilter::Nearest, ResampleFilter::Bilinear] {
            assert_eq!(resample_channel(&img, size(2, 2), filter), img);
        }
    }

    #[test]
    fn test_output_dimensions() {
        let img = ChannelImage::filled(3, 5, 0.5).unwrap();
        let out = resample_channel(&img, size(8, 2), ResampleFilter::Bilinear);
        assert_eq!(out.width(), 8);
        assert_eq!(out.height(), 2);
        assert_eq!(out.samples().len(), 16);
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let img = ChannelImage::filled(3, 7, 0.3).unwrap();
        for filter in [ResampleFilter::Nearest, ResampleFilter::Bilinear] {
            let out = resample_channel(&img, size(16, 4), filter);
            assert!(out.samples().iter().all(|&s| s == 0.3));
        }
    }

    #[test]
    fn test_nearest_upscale_duplicates_pixels() {
        let img = ChannelImage::new(2, 1, vec![0.0, 1.0]).unwrap();
        let out = resample_channel(&img, size(4, 1), ResampleFilter::Nearest);
        assert_eq!(out.samples(), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_bilinear_downscale_averages() {
        let img = ChannelImage::new(2, 1, vec![0.0, 1.0]).unwrap();
        let out = resample_channel(&img, size(1, 1), ResampleFilter::Bilinear);
        assert_eq!(out.samples(), &[0.5]);
    }

    #[test]
    fn test_bilinear_upscale_interpolates_between_centers() {
        let img = ChannelImage::new(2, 1, vec![0.0, 1.0]).unwrap();
        let out = resample_channel(&img, size(4, 1), ResampleFilter::Bilinear);
        assert_eq!(out.samples(), &[0.0, 0.25, 0.75, 1.0]);
    }

    #[test]
    fn test_bilinear_downscale_covers_every_source_texel() {
        let img = ChannelImage::new(6, 1, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let out = resample_channel(&img, size(2, 1), ResampleFilter::Bilinear);
        for &s in out.samples() {
            assert!((s - 1.0 / 3.0).abs() < 1e-6, "got {}", s);
        }
    }

    #[test]
    fn test_bilinear_large_reduction_does_not_alias() {
        // One-texel checkerboard: any 2x2 sampling lands on a single phase.
        let data = (0..256u32 * 256)
            .map(|i| ((i % 256 + i / 256) % 2) as f32)
            .collect();
        let img = ChannelImage::new(256, 256, data).unwrap();
        let out = resample_channel(&img, size(8, 8), ResampleFilter::Bilinear);
        for &s in out.samples() {
            assert!((s - 0.5).abs() < 1e-4, "got {}", s);
        }
    }

    #[test]
    fn test_box_taps_fractional_footprint() {
        let taps = box_taps(0, 3, 2);
        assert_eq!(taps.len(), 2);
        assert_eq!(taps[0].index, 0);
        assert_eq!(taps[1].index, 1);
        // Weights 1.0 and 0.5: the second texel contributes a third.
        assert!((taps[1].blend - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_axes_keep_constant() {
        let tex = TextureBuffer::new(size(64, 2), Color::rgba(0.3, 0.6, 0.9, 0.1));
        let out = resample_texture(&tex, size(5, 9), ResampleFilter::Bilinear);
        assert!(out.pixels().iter().all(|&c| c == Color::rgba(0.3, 0.6, 0.9, 0.1)));
    }

    #[test]
    fn test_texture_resample() {
        let tex = TextureBuffer::new(size(4, 4), Color::rgba(0.2, 0.4, 0.6, 0.8));
        let out = resample_texture(&tex, size(2, 2), ResampleFilter::Bilinear);
        assert_eq!(out.size(), size(2, 2));
        assert_eq!(out.get(1, 1), Color::rgba(0.2, 0.4, 0.6, 0.8));
    }
}
