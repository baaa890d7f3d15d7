//! XYZ Tag Type
//!
//! The XYZType contains an array of XYZ values. Used for the media white
//! and black points. See ICC.1:2022 Section 10.31

use super::{element_err, expect_type};
use crate::color::Xyz;
use crate::error::{IccError, Result};
use crate::icc::types::{TypeSignature, XyzNumber, read_xyz};

/// XYZ tag data - one or more XYZ values
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTagData {
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    /// Parse a full `XYZ ` tag (type signature included)
    pub fn parse(tag: &[u8]) -> Result<Self> {
        expect_type(tag, TypeSignature::XYZ)?;

        let count = tag.len().saturating_sub(8) / 12;
        if count == 0 {
            return Err(IccError::not_parseable("XYZ tag holds no values"));
        }

        let values = (0..count)
            .map(|i| read_xyz(tag, 8 + i * 12).map_err(element_err("XYZ value")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { values })
    }

    /// First value as floating point XYZ
    pub fn to_xyz(&self) -> Option<Xyz> {
        self.values.first().map(|v| v.to_xyz())
    }
}
