//! Compatibility checks
//!
//! Pre-flight validation of a parsed profile for a rendering intent. The
//! checks run in a fixed order and stop at the first failure:
//!
//! 1. file signature (`acsp`)
//! 2. profile class, data colour space and PCS
//! 3. data colour space against the caller's expected device space
//! 4. presence of the LUT tag for the intent, and `wtpt` for absolute
//! 5. the LUT tag decodes into a supported pipeline

use crate::channels::DeviceSpace;
use crate::error::{IccError, Result};
use crate::icc::ProfileClass;
use crate::pipeline::{Direction, Intent, MAX_CHANNELS};
use crate::profile::Profile;

impl Profile {
    /// Fail unless both directions can be evaluated for `intent`
    pub fn error_if_unsupported(&self, intent: Intent) -> Result<()> {
        for direction in Direction::ALL {
            self.error_if_unsupported_in(direction, intent)?;
        }
        Ok(())
    }

    /// Fail unless `direction` can be evaluated for `intent`
    pub fn error_if_unsupported_in(&self, direction: Direction, intent: Intent) -> Result<()> {
        self.check_header()?;
        self.pipeline(direction, intent).map(|_| ())
    }

    /// As [`Profile::error_if_unsupported`], also requiring the profile to
    /// describe `space`
    pub fn error_if_unsupported_for(&self, intent: Intent, space: DeviceSpace) -> Result<()> {
        self.check_header()?;
        let profile_space = self.device_space();
        if !profile_space.is_some_and(|s| s.matches(space)) {
            return Err(IccError::UnsupportedHeader(format!(
                "profile colour space {:?} cannot serve {space:?} values",
                self.color_space()
            )));
        }
        self.error_if_unsupported(intent)
    }

    /// Signature and header combination checks
    pub fn check_header(&self) -> Result<()> {
        let header = self.header();
        if !header.signature_valid() {
            return Err(IccError::WrongSignature(header.signature));
        }

        if !matches!(
            header.device_class,
            ProfileClass::Input | ProfileClass::Display | ProfileClass::Output | ProfileClass::ColorSpace
        ) {
            return Err(IccError::UnsupportedHeader(format!(
                "{:?} profiles are not evaluated",
                header.device_class
            )));
        }

        if !header.pcs.is_pcs() {
            return Err(IccError::UnsupportedHeader(format!(
                "PCS {:?} is neither Lab nor XYZ",
                header.pcs
            )));
        }

        let channels = header.color_space.channels();
        if channels == 0 || channels >= MAX_CHANNELS {
            return Err(IccError::UnsupportedHeader(format!(
                "data colour space {:?}",
                header.color_space
            )));
        }
        Ok(())
    }

    /// Concrete intents that pass [`Profile::error_if_unsupported`]
    pub fn supported_intents(&self) -> Vec<Intent> {
        Intent::ALL
            .into_iter()
            .filter(|&intent| self.error_if_unsupported(intent).is_ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IccErrorKind;
    use test_log::test;

    /// Header plus an empty tag table
    fn bare_profile(class: &[u8; 4], space: &[u8; 4], pcs: &[u8; 4]) -> Profile {
        let mut data = vec![0u8; 132];
        data[0..4].copy_from_slice(&132u32.to_be_bytes());
        data[8] = 4;
        data[12..16].copy_from_slice(class);
        data[16..20].copy_from_slice(space);
        data[20..24].copy_from_slice(pcs);
        data[36..40].copy_from_slice(b"acsp");
        data[68..80].copy_from_slice(&[
            0x00, 0x00, 0xF6, 0xD6, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0xD3, 0x2D,
        ]);
        Profile::from_vec(data).unwrap()
    }

    #[test]
    fn test_header_checks() {
        assert!(bare_profile(b"prtr", b"CMYK", b"Lab ").check_header().is_ok());
        assert!(bare_profile(b"spac", b"FCLR", b"XYZ ").check_header().is_ok());

        for (class, space, pcs) in [
            (b"link", b"CMYK", b"Lab "),
            (b"prtr", b"CMYK", b"RGB "),
            (b"prtr", b"????", b"Lab "),
        ] {
            assert_eq!(
                bare_profile(class, space, pcs).check_header().map_err(|e| e.kind()),
                Err(IccErrorKind::UnsupportedHeader)
            );
        }
    }

    #[test]
    fn test_header_passes_but_no_tags() {
        let profile = bare_profile(b"prtr", b"CMYK", b"Lab ");
        assert_eq!(
            profile.error_if_unsupported(Intent::Perceptual).map_err(|e| e.kind()),
            Err(IccErrorKind::UnsupportedIntent)
        );
        assert!(profile.supported_intents().is_empty());
    }

    #[test]
    fn test_space_checked_before_tags() {
        let profile = bare_profile(b"mntr", b"RGB ", b"XYZ ");
        assert_eq!(
            profile
                .error_if_unsupported_for(Intent::Perceptual, DeviceSpace::Cmyk)
                .map_err(|e| e.kind()),
            Err(IccErrorKind::UnsupportedHeader)
        );
        assert_eq!(
            profile
                .error_if_unsupported_for(Intent::Perceptual, DeviceSpace::Rgb)
                .map_err(|e| e.kind()),
            Err(IccErrorKind::UnsupportedIntent)
        );
    }
}
