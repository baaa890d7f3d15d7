//! ICC Profile Basic Types
//!
//! Big-endian primitive readers and the fixed-point number types of ICC.1.
//! Every reader is bounds-checked and fails with
//! [`DecodeError::OutOfRange`] instead of panicking.

use std::fmt;

use super::error::DecodeError;
use crate::color::Xyz;

/// Borrow `width` bytes at `offset`
#[inline]
fn bytes_at(data: &[u8], offset: usize, width: usize) -> Result<&[u8], DecodeError> {
    offset
        .checked_add(width)
        .and_then(|end| data.get(offset..end))
        .ok_or(DecodeError::OutOfRange {
            offset,
            width,
            len: data.len(),
        })
}

#[inline]
fn array_at<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], DecodeError> {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes_at(data, offset, N)?);
    Ok(out)
}

#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8, DecodeError> {
    Ok(array_at::<1>(data, offset)?[0])
}

#[inline]
pub fn read_u16(data: &[u8], offset: usize) -> Result<u16, DecodeError> {
    array_at(data, offset).map(u16::from_be_bytes)
}

#[inline]
pub fn read_u32(data: &[u8], offset: usize) -> Result<u32, DecodeError> {
    array_at(data, offset).map(u32::from_be_bytes)
}

#[inline]
pub fn read_u64(data: &[u8], offset: usize) -> Result<u64, DecodeError> {
    array_at(data, offset).map(u64::from_be_bytes)
}

/// s15Fixed16Number as f64
#[inline]
pub fn read_s15fixed16(data: &[u8], offset: usize) -> Result<f64, DecodeError> {
    array_at(data, offset).map(|b| S15Fixed16::from_be_bytes(b).to_f64())
}

/// u16Fixed16Number as f64
#[inline]
pub fn read_u16fixed16(data: &[u8], offset: usize) -> Result<f64, DecodeError> {
    array_at(data, offset).map(|b| U16Fixed16::from_be_bytes(b).to_f64())
}

/// u8Fixed8Number as f64
#[inline]
pub fn read_u8fixed8(data: &[u8], offset: usize) -> Result<f64, DecodeError> {
    array_at(data, offset).map(|b| U8Fixed8::from_be_bytes(b).to_f64())
}

/// Raw 4-byte signature
#[inline]
pub fn read_signature(data: &[u8], offset: usize) -> Result<u32, DecodeError> {
    read_u32(data, offset)
}

/// XYZNumber (3 × s15Fixed16)
pub fn read_xyz(data: &[u8], offset: usize) -> Result<XyzNumber, DecodeError> {
    XyzNumber::from_bytes(bytes_at(data, offset, 12)?).ok_or(DecodeError::OutOfRange {
        offset,
        width: 12,
        len: data.len(),
    })
}

/// dateTimeNumber (6 × u16)
pub fn read_date_time(data: &[u8], offset: usize) -> Result<DateTimeNumber, DecodeError> {
    DateTimeNumber::from_bytes(bytes_at(data, offset, 12)?).ok_or(DecodeError::OutOfRange {
        offset,
        width: 12,
        len: data.len(),
    })
}

/// Render a signature as ASCII with trailing spaces and NULs trimmed
pub fn signature_to_string(sig: u32) -> String {
    String::from_utf8_lossy(&sig.to_be_bytes())
        .trim_end_matches([' ', '\0'])
        .to_string()
}

/// ICC Tag Signature (4-byte ASCII code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagSignature(pub u32);

impl TagSignature {
    /// Create from 4 ASCII characters
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const A2B0: Self = Self::from_bytes(*b"A2B0");
    pub const A2B1: Self = Self::from_bytes(*b"A2B1");
    pub const A2B2: Self = Self::from_bytes(*b"A2B2");
    pub const B2A0: Self = Self::from_bytes(*b"B2A0");
    pub const B2A1: Self = Self::from_bytes(*b"B2A1");
    pub const B2A2: Self = Self::from_bytes(*b"B2A2");
    pub const COPYRIGHT: Self = Self::from_bytes(*b"cprt");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const MEDIA_WHITE: Self = Self::from_bytes(*b"wtpt");
    pub const MEDIA_BLACK: Self = Self::from_bytes(*b"bkpt");
    pub const CHROMATIC_ADAPTATION: Self = Self::from_bytes(*b"chad");

    /// All device <-> PCS LUT slots
    pub const LUT_SLOTS: [Self; 6] = [
        Self::A2B0,
        Self::A2B1,
        Self::A2B2,
        Self::B2A0,
        Self::B2A1,
        Self::B2A2,
    ];
}

impl fmt::Display for TagSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&signature_to_string(self.0))
    }
}

/// Type signatures for ICC tag data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSignature(pub u32);

impl TypeSignature {
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(b))
    }

    pub const XYZ: Self = Self::from_bytes(*b"XYZ ");
    pub const CURVE: Self = Self::from_bytes(*b"curv");
    pub const PARA: Self = Self::from_bytes(*b"para");
    pub const TEXT: Self = Self::from_bytes(*b"text");
    pub const DESC: Self = Self::from_bytes(*b"desc");
    pub const MLUC: Self = Self::from_bytes(*b"mluc");
    pub const LUT8: Self = Self::from_bytes(*b"mft1");
    pub const LUT16: Self = Self::from_bytes(*b"mft2");
    pub const LUTA2B: Self = Self::from_bytes(*b"mAB ");
    pub const LUTB2A: Self = Self::from_bytes(*b"mBA ");
    pub const MPET: Self = Self::from_bytes(*b"mpet");
    pub const SF32: Self = Self::from_bytes(*b"sf32");

    /// Container types accepted in AToB / BToA slots
    pub fn is_lut_container(self) -> bool {
        matches!(
            self,
            Self::LUT8 | Self::LUT16 | Self::LUTA2B | Self::LUTB2A | Self::MPET
        )
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&signature_to_string(self.0))
    }
}

/// s15Fixed16Number - 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct S15Fixed16(pub i32);

impl S15Fixed16 {
    /// Nearest representable value
    pub fn from_f64(val: f64) -> Self {
        Self((val * 65536.0).round() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_be_bytes(bytes))
    }
}

/// u16Fixed16Number - unsigned 16.16 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U16Fixed16(pub u32);

impl U16Fixed16 {
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }

    pub fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }
}

/// u8Fixed8Number - unsigned 8.8 fixed point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U8Fixed8(pub u16);

impl U8Fixed8 {
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 256.0
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// XYZNumber - ICC XYZ value (3 × s15Fixed16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XyzNumber {
    pub x: S15Fixed16,
    pub y: S15Fixed16,
    pub z: S15Fixed16,
}

impl XyzNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            x: S15Fixed16::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            y: S15Fixed16::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            z: S15Fixed16::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }

    pub fn to_xyz(&self) -> Xyz {
        Xyz::new(self.x.to_f64(), self.y.to_f64(), self.z.to_f64())
    }
}

/// dateTimeNumber - ICC date/time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeNumber {
    pub year: u16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl DateTimeNumber {
    /// Parse from 12 bytes (big-endian)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 12 {
            return None;
        }
        Some(Self {
            year: u16::from_be_bytes([bytes[0], bytes[1]]),
            month: u16::from_be_bytes([bytes[2], bytes[3]]),
            day: u16::from_be_bytes([bytes[4], bytes[5]]),
            hour: u16::from_be_bytes([bytes[6], bytes[7]]),
            minute: u16::from_be_bytes([bytes[8], bytes[9]]),
            second: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }

    /// Calendar timestamp, if the fields describe a real date and time
    ///
    /// Returns `(year, month, day, hour, minute, second)`.
    pub fn to_timestamp(&self) -> Option<(u16, u8, u8, u8, u8, u8)> {
        let days_in_month = match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => {
                let y = self.year;
                if (y % 4 == 0 && y % 100 != 0) || y % 400 == 0 {
                    29
                } else {
                    28
                }
            }
            _ => return None,
        };
        if self.day == 0 || self.day > days_in_month {
            return None;
        }
        if self.hour > 23 || self.minute > 59 || self.second > 59 {
            return None;
        }
        Some((
            self.year,
            self.month as u8,
            self.day as u8,
            self.hour as u8,
            self.minute as u8,
            self.second as u8,
        ))
    }
}
