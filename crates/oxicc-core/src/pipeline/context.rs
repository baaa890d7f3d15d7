//! Rendering intent and transform direction
//!
//! A profile carries up to three AToB and three BToA LUT tags. This module
//! decides which tag serves a given (direction, intent) request.

use crate::icc::TagSignature;

/// Rendering intent for color conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Intent {
    /// Perceptual - best for photos, maintains relative appearance
    Perceptual,
    /// Relative colorimetric - preserves in-gamut colors exactly
    RelativeColorimetric,
    /// Saturation - maintains saturation, good for business graphics
    Saturation,
    /// Absolute colorimetric - relative colorimetric scaled to the media white
    AbsoluteColorimetric,
    /// Defer to the profile header's default intent
    #[default]
    Unspecified,
}

impl Intent {
    /// The four concrete intents, in ICC order
    pub const ALL: [Intent; 4] = [
        Intent::Perceptual,
        Intent::RelativeColorimetric,
        Intent::Saturation,
        Intent::AbsoluteColorimetric,
    ];

    /// Convert from ICC rendering intent value
    pub fn from_icc(value: u32) -> Self {
        match value {
            0 => Self::Perceptual,
            1 => Self::RelativeColorimetric,
            2 => Self::Saturation,
            3 => Self::AbsoluteColorimetric,
            _ => Self::Unspecified,
        }
    }

    /// Convert to ICC rendering intent value
    pub fn to_icc(&self) -> Option<u32> {
        match self {
            Self::Perceptual => Some(0),
            Self::RelativeColorimetric => Some(1),
            Self::Saturation => Some(2),
            Self::AbsoluteColorimetric => Some(3),
            Self::Unspecified => None,
        }
    }

    /// Replace `Unspecified` with `default`, then with Perceptual
    pub fn resolve(self, default: Intent) -> Intent {
        match (self, default) {
            (Self::Unspecified, Self::Unspecified) => Self::Perceptual,
            (Self::Unspecified, default) => default,
            (intent, _) => intent,
        }
    }

    /// LUT tag slot serving this intent
    ///
    /// Absolute colorimetric shares slot 1 with relative colorimetric.
    /// Call on a resolved intent; `Unspecified` maps to slot 0.
    pub fn slot(self) -> usize {
        match self {
            Self::Perceptual | Self::Unspecified => 0,
            Self::RelativeColorimetric | Self::AbsoluteColorimetric => 1,
            Self::Saturation => 2,
        }
    }

    pub fn is_absolute(self) -> bool {
        self == Self::AbsoluteColorimetric
    }
}

/// Transform direction of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// AToB tags: device channels → PCS
    DeviceToPcs,
    /// BToA tags: PCS → device channels
    PcsToDevice,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::DeviceToPcs, Direction::PcsToDevice];

    /// Tag signature for a slot in this direction
    pub fn tag(self, slot: usize) -> TagSignature {
        match (self, slot) {
            (Self::DeviceToPcs, 0) => TagSignature::A2B0,
            (Self::DeviceToPcs, 1) => TagSignature::A2B1,
            (Self::DeviceToPcs, _) => TagSignature::A2B2,
            (Self::PcsToDevice, 0) => TagSignature::B2A0,
            (Self::PcsToDevice, 1) => TagSignature::B2A1,
            (Self::PcsToDevice, _) => TagSignature::B2A2,
        }
    }

    /// Direction implied by a LUT tag signature
    pub fn of_tag(sig: TagSignature) -> Option<Self> {
        match sig {
            TagSignature::A2B0 | TagSignature::A2B1 | TagSignature::A2B2 => {
                Some(Self::DeviceToPcs)
            }
            TagSignature::B2A0 | TagSignature::B2A1 | TagSignature::B2A2 => {
                Some(Self::PcsToDevice)
            }
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::DeviceToPcs => 0,
            Self::PcsToDevice => 1,
        }
    }
}
