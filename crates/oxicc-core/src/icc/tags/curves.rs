//! Curve Tag Types
//!
//! - curv: identity, single gamma, or sampled table
//! - para: parametric curve types 0-4
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para).
//! Offsets are relative to the enclosing tag so curves embedded in
//! lutAToB / lutBToA elements decode with the same code.

use super::element_err;
use crate::error::{IccError, Result};
use crate::icc::types::{
    TypeSignature, read_s15fixed16, read_signature, read_u16, read_u32, read_u8fixed8,
};
use crate::math::{ParametricCurve, ParametricCurveType};
use crate::pipeline::Curve;

/// Decode a `curv` or `para` element starting at `at`
///
/// Returns the curve and the number of bytes it occupies (unpadded).
pub fn parse_curve(tag: &[u8], at: usize) -> Result<(Curve, usize)> {
    let type_sig = TypeSignature(read_signature(tag, at).map_err(element_err("curve type"))?);

    match type_sig {
        TypeSignature::CURVE => {
            let count = read_u32(tag, at + 8).map_err(element_err("curv count"))? as usize;
            match count {
                0 => Ok((Curve::Identity, 12)),
                1 => {
                    let gamma = read_u8fixed8(tag, at + 12).map_err(element_err("curv gamma"))?;
                    Ok((Curve::Gamma(gamma), 14))
                }
                _ => {
                    let len = count
                        .checked_mul(2)
                        .and_then(|n| n.checked_add(12))
                        .filter(|&n| at.checked_add(n).is_some_and(|end| end <= tag.len()))
                        .ok_or_else(|| {
                            IccError::not_parseable(format!("curv table of {count} entries truncated"))
                        })?;
                    let mut table = Vec::with_capacity(count);
                    for i in 0..count {
                        table.push(
                            read_u16(tag, at + 12 + i * 2).map_err(element_err("curv table"))?,
                        );
                    }
                    Ok((Curve::from_u16_table(&table), len))
                }
            }
        }
        TypeSignature::PARA => {
            let function = read_u16(tag, at + 8).map_err(element_err("para function"))?;
            let curve_type = ParametricCurveType::from_icc(function).ok_or_else(|| {
                IccError::not_parseable(format!("unknown parametric curve type {function}"))
            })?;

            let count = curve_type.param_count();
            let mut params = [0.0f64; 7];
            for (i, p) in params.iter_mut().take(count).enumerate() {
                *p = read_s15fixed16(tag, at + 12 + i * 4).map_err(element_err("para params"))?;
            }
            let curve = ParametricCurve::from_params(curve_type, &params[..count])
                .ok_or_else(|| IccError::not_parseable("para parameter count"))?;
            Ok((Curve::Parametric(curve), 12 + count * 4))
        }
        other => Err(IccError::not_parseable(format!(
            "expected curv or para, found '{other}'"
        ))),
    }
}

/// Decode `count` consecutive curves starting at `at`, each 4-byte aligned
pub fn parse_curve_set(tag: &[u8], at: usize, count: usize) -> Result<Vec<Curve>> {
    let mut curves = Vec::with_capacity(count);
    let mut pos = at;
    for _ in 0..count {
        let (curve, len) = parse_curve(tag, pos)?;
        curves.push(curve);
        pos += (len + 3) & !3;
    }
    Ok(curves)
}
