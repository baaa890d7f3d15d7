//! Synthetic profiles with analytically known transforms
//!
//! Every LUT here samples a function that is linear (or multilinear) between
//! grid nodes, with any clamping kinks placed exactly on nodes. Multilinear
//! interpolation therefore reproduces the function up to sample
//! quantization, which keeps test tolerances tight.

use oxicc_core::math::{SRGB_TO_XYZ_D50, XYZ_D50_TO_SRGB};

use crate::builder::{
    AbElements, ClutSamples, ProfileBuilder, curv_identity, desc_tag, lut8_tag, lut16_tag,
    lut_ab_tag, mluc_tag, mpet_tag, para_gamma, sf32_tag, text_tag, xyz_tag,
};

/// u1Fixed15 full scale of the XYZ PCS encoding
pub const XYZ_FULL_SCALE: f64 = 65535.0 / 32768.0;

/// Paper white of the press profile
pub const PRESS_MEDIA_WHITE: [f64; 3] = [0.9, 0.93, 0.76];

/// Paper black of the press profile
pub const PRESS_MEDIA_BLACK: [f64; 3] = [0.02, 0.021, 0.018];

const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Encoded PCS triplet the press profile produces for `cmyk` in a tag slot
///
/// Slots 0 and 1 share one model; slot 2 is a more saturated variant.
pub fn press_forward(cmyk: [f64; 4], slot: usize) -> [f64; 3] {
    let [c, m, y, k] = cmyk;
    let l = (1.0 - 0.75 * c) * (1.0 - 0.5 * k);
    match slot {
        2 => [l, 0.25 + 0.5 * m, 0.125 + 0.75 * y],
        _ => [l, 0.25 + 0.5 * m, 0.25 + 0.5 * y],
    }
}

/// Inverse of [`press_forward`] with K = 0, clamped to the device range
pub fn press_inverse(v: [f64; 3], slot: usize) -> [f64; 4] {
    let c = (1.0 - v[0]) / 0.75;
    let m = (v[1] - 0.25) / 0.5;
    let y = match slot {
        2 => (v[2] - 0.125) / 0.75,
        _ => (v[2] - 0.25) / 0.5,
    };
    [c.clamp(0.0, 1.0), m.clamp(0.0, 1.0), y.clamp(0.0, 1.0), 0.0]
}

fn press_a2b(slot: usize) -> Vec<u8> {
    let clut = ClutSamples::sample(vec![9; 4], 3, |n| {
        press_forward([n[0], n[1], n[2], n[3]], slot).to_vec()
    });
    lut16_tag(4, 3, IDENTITY, &clut)
}

fn press_b2a(slot: usize) -> Vec<u8> {
    let clut = ClutSamples::sample(vec![17; 3], 4, |n| {
        press_inverse([n[0], n[1], n[2]], slot).to_vec()
    });
    lut16_tag(3, 4, IDENTITY, &clut)
}

/// v2.1 CMYK output profile, Lab PCS, Lut16 tags for all three slots
pub fn press_cmyk() -> ProfileBuilder {
    ProfileBuilder::new(b"prtr", b"CMYK", b"Lab ")
        .version(2, 1, 0)
        .tag(b"desc", desc_tag("Synthetic Press CMYK"))
        .tag(b"cprt", text_tag("No copyright, use freely"))
        .tag(b"wtpt", xyz_tag(PRESS_MEDIA_WHITE))
        .tag(b"bkpt", xyz_tag(PRESS_MEDIA_BLACK))
        .tag(b"A2B0", press_a2b(0))
        .tag(b"A2B1", press_a2b(1))
        .tag(b"A2B2", press_a2b(2))
        .tag(b"B2A0", press_b2a(0))
        .tag(b"B2A1", press_b2a(1))
        .tag(b"B2A2", press_b2a(2))
}

/// v2.0 CMYK output profile with 8-bit `mft1` tags in the perceptual slot
///
/// Same model as [`press_cmyk`] slot 0, so expected values come from
/// [`press_forward`] and [`press_inverse`] within 8-bit quantization.
pub fn newsprint_cmyk() -> ProfileBuilder {
    let forward = ClutSamples::sample(vec![5; 4], 3, |n| {
        press_forward([n[0], n[1], n[2], n[3]], 0).to_vec()
    });
    let inverse = ClutSamples::sample(vec![9; 3], 4, |n| {
        press_inverse([n[0], n[1], n[2]], 0).to_vec()
    });

    ProfileBuilder::new(b"prtr", b"CMYK", b"Lab ")
        .version(2, 0, 0)
        .tag(b"desc", desc_tag("Synthetic Newsprint CMYK"))
        .tag(b"wtpt", xyz_tag(PRESS_MEDIA_WHITE))
        .tag(b"A2B0", lut8_tag(4, 3, IDENTITY, &forward))
        .tag(b"B2A0", lut8_tag(3, 4, IDENTITY, &inverse))
}

/// Forward model of the display profile: gamma 2.0 then sRGB primaries
pub fn display_forward(rgb: [f64; 3]) -> [f64; 3] {
    SRGB_TO_XYZ_D50.multiply_vec(rgb.map(|v| v * v))
}

fn matrix_element(m: [[f64; 3]; 3], scale: f64) -> [f64; 12] {
    let mut out = [0.0; 12];
    for (dst, src) in out.iter_mut().zip(m.iter().flatten()) {
        *dst = src * scale;
    }
    out
}

/// v4.3 RGB display profile, XYZ PCS, matrix/curve lutAToB and lutBToA
///
/// Only the perceptual slot is populated.
pub fn display_rgb() -> ProfileBuilder {
    let forward = AbElements {
        b: Some(vec![curv_identity(); 3]),
        matrix: Some(matrix_element(SRGB_TO_XYZ_D50.m, 1.0 / XYZ_FULL_SCALE)),
        m: Some(vec![para_gamma(2.0); 3]),
        ..Default::default()
    };
    let inverse = AbElements {
        b: Some(vec![curv_identity(); 3]),
        matrix: Some(matrix_element(XYZ_D50_TO_SRGB.m, XYZ_FULL_SCALE)),
        m: Some(vec![para_gamma(0.5); 3]),
        ..Default::default()
    };

    let mut id = [0u8; 16];
    id[0] = 0x5a;
    id[15] = 0xa5;

    ProfileBuilder::new(b"mntr", b"RGB ", b"XYZ ")
        .version(4, 3, 0)
        .profile_id(id)
        .tag(b"desc", mluc_tag("Synthetic Display RGB"))
        .tag(b"cprt", mluc_tag("Public domain"))
        .tag(b"wtpt", xyz_tag([0.9642, 1.0, 0.8249]))
        .tag(
            b"chad",
            sf32_tag(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]),
        )
        .tag(b"A2B0", lut_ab_tag(true, 3, 3, &forward))
        .tag(b"B2A0", lut_ab_tag(false, 3, 3, &inverse))
}

/// Encoded Lab triplet the seven-ink profile produces
pub fn seven_ink_forward(d: &[f64]) -> [f64; 3] {
    let mean = d.iter().take(7).sum::<f64>() / 7.0;
    [
        1.0 - 0.8 * mean,
        0.5 + 0.3 * (d[0] - d[1]),
        0.5 + 0.3 * (d[2] - d[3]),
    ]
}

/// One device vector per encoded Lab triplet, inverting [`seven_ink_forward`]
///
/// Solutions have the form `[s + p, s, s + q, s, s, s, s]`.
pub fn seven_ink_inverse(v: [f64; 3]) -> [f64; 7] {
    let p = (v[1] - 0.5) / 0.3;
    let q = (v[2] - 0.5) / 0.3;
    let total = (1.0 - v[0]) / 0.8 * 7.0;
    let s = (total - p - q) / 7.0;
    [s + p, s, s + q, s, s, s, s]
}

/// v4.2 seven-colour output profile, Lab PCS, relative colorimetric only
pub fn seven_ink() -> ProfileBuilder {
    let forward = AbElements {
        b: Some(vec![curv_identity(); 3]),
        clut: Some(ClutSamples::sample(vec![3; 7], 3, |n| {
            seven_ink_forward(n).to_vec()
        })),
        a: Some(vec![curv_identity(); 7]),
        ..Default::default()
    };
    let inverse = AbElements {
        b: Some(vec![curv_identity(); 3]),
        clut: Some(ClutSamples::sample(vec![9; 3], 7, |n| {
            seven_ink_inverse([n[0], n[1], n[2]]).to_vec()
        })),
        a: Some(vec![curv_identity(); 7]),
        ..Default::default()
    };

    ProfileBuilder::new(b"prtr", b"7CLR", b"Lab ")
        .version(4, 2, 0)
        .rendering_intent(1)
        .tag(b"desc", mluc_tag("Synthetic 7 Ink"))
        .tag(b"wtpt", xyz_tag([0.95, 0.98, 0.8]))
        .tag(b"A2B1", lut_ab_tag(true, 7, 3, &forward))
        .tag(b"B2A1", lut_ab_tag(false, 3, 7, &inverse))
}

/// CMYK profile whose device → PCS tag is a multiProcessElements tag
pub fn multiprocess_cmyk() -> ProfileBuilder {
    ProfileBuilder::new(b"prtr", b"CMYK", b"Lab ")
        .version(4, 4, 0)
        .tag(b"wtpt", xyz_tag([0.9642, 1.0, 0.8249]))
        .tag(b"A2B0", mpet_tag(4, 3))
        .tag(b"B2A0", press_b2a(0))
}

/// All named synthetic profiles with their builders
pub fn all() -> Vec<(&'static str, ProfileBuilder)> {
    vec![
        ("press_cmyk", press_cmyk()),
        ("newsprint_cmyk", newsprint_cmyk()),
        ("display_rgb", display_rgb()),
        ("seven_ink", seven_ink()),
        ("multiprocess_cmyk", multiprocess_cmyk()),
    ]
}
