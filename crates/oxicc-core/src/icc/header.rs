//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2022 Section 7.2.
//!
//! Parsing is deliberately tolerant of values this crate cannot evaluate
//! (unknown classes, colour spaces, a wrong file signature): those still
//! produce a [`Header`], and [`crate::Profile::error_if_unsupported`] rejects
//! them later. Only structural problems fail here.

use tracing::warn;

use super::types::{
    DateTimeNumber, XyzNumber, read_date_time, read_signature, read_u8, read_u32, read_u64,
    read_xyz, signature_to_string,
};
use crate::color::{D50, Xyz};
use crate::error::{IccError, Result};
use crate::pipeline::Intent;

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Minimum valid profile size (header only)
pub const HEADER_SIZE: usize = 128;

/// Allowed distance between the header illuminant and D50
pub const ILLUMINANT_TOLERANCE: f64 = 5e-6;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version
    pub version: ProfileVersion,
    /// Device class (display, input, output, etc.)
    pub device_class: ProfileClass,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    /// Date and time profile was created
    pub creation_date: DateTimeNumber,
    /// Profile file signature (should be 'acsp')
    pub signature: u32,
    /// Primary platform signature
    pub platform: u32,
    /// Profile flags
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes
    pub attributes: u64,
    /// Default rendering intent
    pub rendering_intent: Intent,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl Header {
    /// Parse the header from the full profile buffer
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::NotEnoughBytes {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let header = Self::decode(data).map_err(|e| e.into_not_enough_bytes())?;

        let declared = header.size as usize;
        if declared > data.len() {
            return Err(IccError::NotEnoughBytes {
                expected: declared,
                actual: data.len(),
            });
        }
        if declared < data.len() {
            return Err(IccError::not_parseable(format!(
                "header declares {} bytes, buffer holds {}",
                declared,
                data.len()
            )));
        }

        if !header.illuminant_is_d50() {
            let xyz = header.illuminant_xyz();
            warn!(
                x = xyz.x,
                y = xyz.y,
                z = xyz.z,
                "PCS illuminant is not D50"
            );
        }

        Ok(header)
    }

    fn decode(data: &[u8]) -> std::result::Result<Self, super::error::DecodeError> {
        let version_minor = read_u8(data, 9)?;
        let mut profile_id = [0u8; 16];
        for (i, byte) in profile_id.iter_mut().enumerate() {
            *byte = read_u8(data, 84 + i)?;
        }

        Ok(Self {
            size: read_u32(data, 0)?,
            cmm_type: read_signature(data, 4)?,
            version: ProfileVersion {
                major: read_u8(data, 8)?,
                minor: version_minor >> 4,
                patch: version_minor & 0x0F,
            },
            device_class: ProfileClass::from_u32(read_signature(data, 12)?),
            color_space: ColorSpace::from_u32(read_signature(data, 16)?),
            pcs: ColorSpace::from_u32(read_signature(data, 20)?),
            creation_date: read_date_time(data, 24)?,
            signature: read_signature(data, 36)?,
            platform: read_signature(data, 40)?,
            flags: read_u32(data, 44)?,
            manufacturer: read_signature(data, 48)?,
            model: read_signature(data, 52)?,
            attributes: read_u64(data, 56)?,
            rendering_intent: Intent::from_icc(read_u32(data, 64)? & 0xFFFF),
            illuminant: read_xyz(data, 68)?,
            creator: read_signature(data, 80)?,
            profile_id,
        })
    }

    /// Whether bytes 36..40 hold the 'acsp' magic
    pub fn signature_valid(&self) -> bool {
        self.signature == PROFILE_SIGNATURE
    }

    /// Whether the PCS illuminant is the ICC D50 white within tolerance
    pub fn illuminant_is_d50(&self) -> bool {
        self.illuminant
            .to_xyz()
            .approx_eq(&D50.xyz, ILLUMINANT_TOLERANCE + f64::EPSILON)
    }

    /// PCS illuminant as floating point XYZ
    pub fn illuminant_xyz(&self) -> Xyz {
        self.illuminant.to_xyz()
    }

    /// Get the version as a tuple (major, minor, patch)
    pub fn version_tuple(&self) -> (u8, u8, u8) {
        (self.version.major, self.version.minor, self.version.patch)
    }

    /// Preferred CMM as a trimmed string
    pub fn cmm_name(&self) -> String {
        signature_to_string(self.cmm_type)
    }

    /// Whether the embedded profile flag (bit 0) is set
    pub fn is_embedded(&self) -> bool {
        self.flags & 0x1 != 0
    }

    /// Whether the profile id is all zero (not computed)
    pub fn has_profile_id(&self) -> bool {
        self.profile_id.iter().any(|&b| b != 0)
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    /// Check if version is at least the specified version
    pub fn at_least(&self, major: u8, minor: u8) -> bool {
        self.major > major || (self.major == major && self.minor >= minor)
    }

    pub fn is_v4(&self) -> bool {
        self.major == 4
    }

    pub fn is_v2(&self) -> bool {
        self.major == 2
    }
}

/// ICC Profile Class (Device Class)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    /// Input device (scanner, camera)
    Input,
    /// Display device (monitor)
    Display,
    /// Output device (printer)
    Output,
    /// Device link
    DeviceLink,
    /// Color space conversion
    ColorSpace,
    /// Abstract profile
    Abstract,
    /// Named color profile
    NamedColor,
    /// Anything else
    Unknown(u32),
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Self {
        match &val.to_be_bytes() {
            b"scnr" => Self::Input,
            b"mntr" => Self::Display,
            b"prtr" => Self::Output,
            b"link" => Self::DeviceLink,
            b"spac" => Self::ColorSpace,
            b"abst" => Self::Abstract,
            b"nmcl" => Self::NamedColor,
            _ => Self::Unknown(val),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Input => u32::from_be_bytes(*b"scnr"),
            Self::Display => u32::from_be_bytes(*b"mntr"),
            Self::Output => u32::from_be_bytes(*b"prtr"),
            Self::DeviceLink => u32::from_be_bytes(*b"link"),
            Self::ColorSpace => u32::from_be_bytes(*b"spac"),
            Self::Abstract => u32::from_be_bytes(*b"abst"),
            Self::NamedColor => u32::from_be_bytes(*b"nmcl"),
            Self::Unknown(val) => *val,
        }
    }

    /// Classes whose AToB/BToA tags describe device <-> PCS transforms
    pub fn is_device_to_pcs(&self) -> bool {
        matches!(
            self,
            Self::Input | Self::Display | Self::Output | Self::ColorSpace
        )
    }
}

/// ICC Color Space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Lab,
    Luv,
    YCbCr,
    Yxy,
    Rgb,
    Gray,
    Hsv,
    Hls,
    Cmyk,
    Cmy,
    /// N-colour space, 2..=15 channels
    NColor(u8),
    /// Anything else
    Unknown(u32),
}

impl ColorSpace {
    pub fn from_u32(val: u32) -> Self {
        let bytes = val.to_be_bytes();
        match &bytes {
            b"XYZ " => Self::Xyz,
            b"Lab " => Self::Lab,
            b"Luv " => Self::Luv,
            b"YCbr" => Self::YCbCr,
            b"Yxy " => Self::Yxy,
            b"RGB " => Self::Rgb,
            b"GRAY" => Self::Gray,
            b"HSV " => Self::Hsv,
            b"HLS " => Self::Hls,
            b"CMYK" => Self::Cmyk,
            b"CMY " => Self::Cmy,
            [n, b'C', b'L', b'R'] => match n {
                b'2'..=b'9' => Self::NColor(n - b'0'),
                b'A'..=b'F' => Self::NColor(n - b'A' + 10),
                _ => Self::Unknown(val),
            },
            _ => Self::Unknown(val),
        }
    }

    pub fn to_u32(&self) -> u32 {
        match self {
            Self::Xyz => u32::from_be_bytes(*b"XYZ "),
            Self::Lab => u32::from_be_bytes(*b"Lab "),
            Self::Luv => u32::from_be_bytes(*b"Luv "),
            Self::YCbCr => u32::from_be_bytes(*b"YCbr"),
            Self::Yxy => u32::from_be_bytes(*b"Yxy "),
            Self::Rgb => u32::from_be_bytes(*b"RGB "),
            Self::Gray => u32::from_be_bytes(*b"GRAY"),
            Self::Hsv => u32::from_be_bytes(*b"HSV "),
            Self::Hls => u32::from_be_bytes(*b"HLS "),
            Self::Cmyk => u32::from_be_bytes(*b"CMYK"),
            Self::Cmy => u32::from_be_bytes(*b"CMY "),
            Self::NColor(n) => {
                let digit = if *n < 10 { b'0' + n } else { b'A' + n - 10 };
                u32::from_be_bytes([digit, b'C', b'L', b'R'])
            }
            Self::Unknown(val) => *val,
        }
    }

    /// Number of channels, 0 when unknown
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Xyz
            | Self::Lab
            | Self::Luv
            | Self::YCbCr
            | Self::Yxy
            | Self::Rgb
            | Self::Hsv
            | Self::Hls
            | Self::Cmy => 3,
            Self::Cmyk => 4,
            Self::NColor(n) => *n as usize,
            Self::Unknown(_) => 0,
        }
    }

    /// Whether this is a valid profile connection space
    pub fn is_pcs(&self) -> bool {
        matches!(self, Self::Xyz | Self::Lab)
    }
}
