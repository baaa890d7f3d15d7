//! Batch conversion of interleaved 8/16-bit device buffers
//!
//! The per-pixel conversion is a closure, so the same loops serve a
//! calibrated profile and the uncalibrated fallback.

use multiversion::multiversion;

use crate::color::Xyz;
use crate::pipeline::MAX_CHANNELS;
use crate::uncalibrated::cmyk_to_rgb;

/// Convert interleaved 8-bit device pixels to XYZ
///
/// `src` holds `channels` bytes per pixel. Processes as many pixels as both
/// buffers have room for and returns that count.
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn device8_to_xyz_batch<F>(src: &[u8], channels: usize, dst: &mut [Xyz], convert: F) -> usize
where
    F: Fn(&[f64]) -> Xyz,
{
    let channels = channels.clamp(1, MAX_CHANNELS);
    let mut pixel = [0.0; MAX_CHANNELS];
    let mut count = 0;

    for (src_chunk, out) in src.chunks_exact(channels).zip(dst.iter_mut()) {
        for (p, &b) in pixel.iter_mut().zip(src_chunk) {
            *p = b as f64 / 255.0;
        }
        *out = convert(&pixel[..channels]);
        count += 1;
    }
    count
}

/// Convert interleaved 16-bit device pixels to XYZ
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn device16_to_xyz_batch<F>(src: &[u16], channels: usize, dst: &mut [Xyz], convert: F) -> usize
where
    F: Fn(&[f64]) -> Xyz,
{
    let channels = channels.clamp(1, MAX_CHANNELS);
    let mut pixel = [0.0; MAX_CHANNELS];
    let mut count = 0;

    for (src_chunk, out) in src.chunks_exact(channels).zip(dst.iter_mut()) {
        for (p, &v) in pixel.iter_mut().zip(src_chunk) {
            *p = v as f64 / 65535.0;
        }
        *out = convert(&pixel[..channels]);
        count += 1;
    }
    count
}

/// Naive CMYK8 → RGB8, returning the number of pixels written
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn cmyk8_to_rgb8_batch(src: &[u8], dst: &mut [u8]) -> usize {
    let mut count = 0;
    for (src_chunk, dst_chunk) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        let cmyk = [
            src_chunk[0] as f64 / 255.0,
            src_chunk[1] as f64 / 255.0,
            src_chunk[2] as f64 / 255.0,
            src_chunk[3] as f64 / 255.0,
        ];

        let rgb = cmyk_to_rgb(cmyk);

        dst_chunk[0] = (rgb[0].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        dst_chunk[1] = (rgb[1].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        dst_chunk[2] = (rgb[2].clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        count += 1;
    }
    count
}
