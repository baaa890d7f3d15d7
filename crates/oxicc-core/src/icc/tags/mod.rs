//! ICC Tag Element Parsing
//!
//! Each tag starts with a 4-byte type signature and 4 reserved bytes,
//! followed by type-specific data. Parsers here take the whole tag slice
//! so that offsets stored inside a tag are resolved from its first byte.
//!
//! See ICC.1:2022 Section 10.

mod curves;
mod lut;
mod text;
mod xyz;

pub use curves::{parse_curve, parse_curve_set};
pub use lut::{LegacyLut, LutAb, LutTag};
pub use text::TextData;
pub use xyz::XyzTagData;

use super::error::DecodeError;
use super::types::{TypeSignature, read_s15fixed16, read_signature, signature_to_string};
use crate::error::{IccError, Result};
use crate::math::Matrix3x3;
use crate::pipeline::MatrixElement;

/// Map a primitive read failure inside an element payload to `NotParseable`
pub(crate) fn element_err(context: &'static str) -> impl Fn(DecodeError) -> IccError {
    move |e| e.into_not_parseable(context)
}

/// Fail with `NotParseable` unless the tag carries `expected`
pub(crate) fn expect_type(tag: &[u8], expected: TypeSignature) -> Result<()> {
    let found = read_signature(tag, 0).map_err(element_err("tag type"))?;
    if found != expected.0 {
        return Err(IccError::not_parseable(format!(
            "expected '{}' tag, found '{}'",
            signature_to_string(expected.0),
            signature_to_string(found)
        )));
    }
    Ok(())
}

/// Parse an `sf32` tag holding a 3x3 matrix, optionally followed by an offset
pub fn parse_s15_matrix(tag: &[u8]) -> Result<MatrixElement> {
    expect_type(tag, TypeSignature::SF32)?;
    let values = (8..tag.len().saturating_sub(3))
        .step_by(4)
        .map(|at| read_s15fixed16(tag, at).map_err(element_err("sf32 value")))
        .collect::<Result<Vec<_>>>()?;

    let offset = match values.len() {
        9 => None,
        12 => Some([values[9], values[10], values[11]]),
        n => {
            return Err(IccError::not_parseable(format!(
                "sf32 matrix with {n} values"
            )));
        }
    };
    let matrix = Matrix3x3::new([
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
        [values[6], values[7], values[8]],
    ]);
    Ok(MatrixElement::new(matrix, offset))
}
