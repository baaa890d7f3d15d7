//! PCS reference white
//!
//! ICC.1:2022 Section 7.2.16 fixes the PCS illuminant to D50 as encoded in
//! s15Fixed16Number: X = 0x0000F6D6, Y = 0x00010000, Z = 0x0000D32D.

use crate::color::Xyz;

/// A white point definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhitePoint {
    /// Name of the illuminant
    pub name: &'static str,
    /// CIE XYZ coordinates (Y normalized to 1.0)
    pub xyz: Xyz,
}

impl WhitePoint {
    pub const fn new(name: &'static str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name,
            xyz: Xyz::new(x, y, z),
        }
    }
}

/// ICC PCS illuminant, exactly as stored in a conforming header
pub const D50: WhitePoint = WhitePoint::new(
    "D50",
    63190.0 / 65536.0,
    1.0,
    54061.0 / 65536.0,
);
