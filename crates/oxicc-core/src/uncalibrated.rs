//! Uncalibrated fallback
//!
//! Textbook CMYK <-> RGB with no colour management, used whenever no usable
//! profile exists. At the XYZ boundary the naive RGB is taken to be sRGB
//! (ICC sRGB primaries, Bradford adapted to D50). Nothing here can fail.

use crate::color::Xyz;
use crate::math::{SRGB_TO_XYZ_D50, XYZ_D50_TO_SRGB, srgb_gamma_decode, srgb_gamma_encode};

/// Naive CMYK → RGB: `R = (1 - C)(1 - K)` and so on
#[inline]
pub fn cmyk_to_rgb(cmyk: [f64; 4]) -> [f64; 3] {
    let [c, m, y, k] = cmyk.map(|v| v.clamp(0.0, 1.0));
    [(1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k)]
}

/// Naive RGB → CMYK with full black generation, `K = 1 - max(R, G, B)`
#[inline]
pub fn rgb_to_cmyk(rgb: [f64; 3]) -> [f64; 4] {
    let [r, g, b] = rgb.map(|v| v.clamp(0.0, 1.0));
    let k = 1.0 - r.max(g).max(b);
    if k >= 1.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let d = 1.0 - k;
    [(d - r) / d, (d - g) / d, (d - b) / d, k]
}

/// sRGB-encoded RGB → XYZ (D50)
pub fn rgb_to_xyz_d50(rgb: [f64; 3]) -> Xyz {
    let linear = rgb.map(|v| srgb_gamma_decode(v.clamp(0.0, 1.0)));
    Xyz::from_array(SRGB_TO_XYZ_D50.multiply_vec(linear))
}

/// XYZ (D50) → sRGB-encoded RGB, clipped to [0, 1]
pub fn xyz_d50_to_rgb(xyz: Xyz) -> [f64; 3] {
    let linear = XYZ_D50_TO_SRGB.multiply_vec(xyz.to_array());
    linear.map(|v| srgb_gamma_encode(v.clamp(0.0, 1.0)))
}

/// Any device vector → XYZ (D50)
///
/// 3 channels are RGB, 1 is gray, anything else is read as CMYK (missing
/// inks are 0, extra inks ignored).
pub fn to_xyz_d50(values: &[f64]) -> Xyz {
    let rgb = match values {
        [r, g, b] => [*r, *g, *b],
        [v] => [*v; 3],
        _ => {
            let mut cmyk = [0.0; 4];
            for (dst, src) in cmyk.iter_mut().zip(values) {
                *dst = *src;
            }
            cmyk_to_rgb(cmyk)
        }
    };
    rgb_to_xyz_d50(rgb)
}

/// XYZ (D50) → naive CMYK
pub fn from_xyz_d50(xyz: Xyz) -> [f64; 4] {
    rgb_to_cmyk(xyz_d50_to_rgb(xyz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::D50;

    #[test]
    fn test_cmyk_to_rgb() {
        assert_eq!(cmyk_to_rgb([0.0, 0.0, 0.0, 0.0]), [1.0, 1.0, 1.0]);
        assert_eq!(cmyk_to_rgb([0.0, 0.0, 0.0, 1.0]), [0.0, 0.0, 0.0]);
        assert_eq!(cmyk_to_rgb([1.0, 0.0, 0.0, 0.0]), [0.0, 1.0, 1.0]);
        assert_eq!(cmyk_to_rgb([0.5, 0.0, 0.0, 0.5]), [0.25, 0.5, 0.5]);
    }

    #[test]
    fn test_rgb_to_cmyk() {
        assert_eq!(rgb_to_cmyk([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb_to_cmyk([1.0, 1.0, 1.0]), [0.0, 0.0, 0.0, 0.0]);
        let cmyk = rgb_to_cmyk([0.25, 0.5, 0.5]);
        let back = cmyk_to_rgb(cmyk);
        for (a, b) in back.iter().zip([0.25, 0.5, 0.5]) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_white_is_d50() {
        let xyz = to_xyz_d50(&[0.0, 0.0, 0.0, 0.0]);
        assert!(xyz.approx_eq(&D50.xyz, 1e-3), "{xyz:?}");
        assert_eq!(from_xyz_d50(D50.xyz).map(|v| (v * 1e3).round()), [0.0; 4]);
    }

    #[test]
    fn test_channel_interpretation() {
        let gray = to_xyz_d50(&[0.5]);
        let rgb = to_xyz_d50(&[0.5, 0.5, 0.5]);
        assert!(gray.approx_eq(&rgb, 1e-12));
        let short = to_xyz_d50(&[0.3, 0.2]);
        let cmyk = to_xyz_d50(&[0.3, 0.2, 0.0, 0.0]);
        assert!(short.approx_eq(&cmyk, 1e-12));
    }

    #[test]
    fn test_xyz_round_trip() {
        let rgb = [0.2, 0.5, 0.8];
        let back = xyz_d50_to_rgb(rgb_to_xyz_d50(rgb));
        for (a, b) in back.iter().zip(rgb) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
