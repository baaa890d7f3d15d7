//! Device channel vectors
//!
//! [`Channels`] pairs a device colour space with exactly as many values as
//! that space has channels. Input of the wrong length is normalized on
//! construction: missing channels become 0.0, extra channels are dropped.

use crate::icc::ColorSpace;

/// Device colour space of a channel vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceSpace {
    Gray,
    Rgb,
    #[default]
    Cmyk,
    /// N-colour device (2..=15 inks)
    NColor(u8),
    /// CMYK with no profile behind it
    UncalibratedCmyk,
}

impl DeviceSpace {
    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Cmyk | Self::UncalibratedCmyk => 4,
            Self::NColor(n) => n as usize,
        }
    }

    /// Device space for a header data colour space
    ///
    /// Returns `None` for spaces with unknown channel counts.
    pub fn from_color_space(space: ColorSpace) -> Option<Self> {
        match space {
            ColorSpace::Gray => Some(Self::Gray),
            ColorSpace::Rgb => Some(Self::Rgb),
            ColorSpace::Cmyk => Some(Self::Cmyk),
            ColorSpace::Unknown(_) => None,
            other => match other.channels() {
                0 => None,
                n => Some(Self::NColor(n as u8)),
            },
        }
    }

    pub fn is_calibrated(self) -> bool {
        self != Self::UncalibratedCmyk
    }

    /// Whether a profile with this data space can serve `other`
    pub fn matches(self, other: DeviceSpace) -> bool {
        match (self, other) {
            (Self::Cmyk | Self::UncalibratedCmyk, Self::Cmyk | Self::UncalibratedCmyk) => true,
            (a, b) => a == b,
        }
    }
}

/// A device colour value with its space
#[derive(Debug, Clone, PartialEq)]
pub struct Channels {
    space: DeviceSpace,
    values: Vec<f64>,
}

impl Channels {
    /// Normalize `values` to the channel count of `space`
    pub fn new(space: DeviceSpace, values: &[f64]) -> Self {
        let n = space.channels();
        let mut v = values[..values.len().min(n)].to_vec();
        v.resize(n, 0.0);
        Self { space, values: v }
    }

    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self::new(DeviceSpace::Cmyk, &[c, m, y, k])
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(DeviceSpace::Rgb, &[r, g, b])
    }

    pub fn space(&self) -> DeviceSpace {
        self.space
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for Channels {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_and_truncation() {
        let short = Channels::new(DeviceSpace::Cmyk, &[0.8]);
        assert_eq!(short.values(), &[0.8, 0.0, 0.0, 0.0]);
        assert_eq!(short, Channels::cmyk(0.8, 0.0, 0.0, 0.0));

        let long = Channels::new(DeviceSpace::Rgb, &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(long.values(), &[0.1, 0.2, 0.3]);

        let empty = Channels::new(DeviceSpace::Gray, &[]);
        assert_eq!(empty.values(), &[0.0]);
    }

    #[test]
    fn test_from_color_space() {
        assert_eq!(DeviceSpace::from_color_space(ColorSpace::Cmyk), Some(DeviceSpace::Cmyk));
        assert_eq!(
            DeviceSpace::from_color_space(ColorSpace::NColor(7)),
            Some(DeviceSpace::NColor(7))
        );
        assert_eq!(DeviceSpace::from_color_space(ColorSpace::Unknown(0)), None);
        assert_eq!(DeviceSpace::NColor(7).channels(), 7);
    }

    #[test]
    fn test_uncalibrated_matches_cmyk() {
        assert!(DeviceSpace::UncalibratedCmyk.matches(DeviceSpace::Cmyk));
        assert!(!DeviceSpace::Rgb.matches(DeviceSpace::Cmyk));
        assert!(!DeviceSpace::UncalibratedCmyk.is_calibrated());
    }
}
