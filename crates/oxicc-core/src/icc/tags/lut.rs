//! LUT Tag Types
//!
//! LUT tags hold the device <-> PCS transforms. Types:
//! - mft1 (Lut8Type): fixed structure, 8-bit tables and CLUT
//! - mft2 (Lut16Type): fixed structure, 16-bit tables and CLUT
//! - mAB (lutAToBType) / mBA (lutBToAType): self-describing element list,
//!   an element offset of zero means "absent"
//! - mpet (multiProcessElementsType): recognized, not decoded
//!
//! See ICC.1:2022 Sections 10.10-10.13. All offsets are relative to the
//! first byte of the tag.

use super::curves::parse_curve_set;
use super::element_err;
use crate::error::{IccError, Result};
use crate::icc::types::{TypeSignature, read_s15fixed16, read_signature, read_u8, read_u16, read_u32};
use crate::math::Matrix3x3;
use crate::pipeline::{Clut, Curve, MatrixElement, Precision};

/// Decoded LUT tag
#[derive(Debug, Clone, PartialEq)]
pub enum LutTag {
    /// mft1
    Lut8(LegacyLut),
    /// mft2
    Lut16(LegacyLut),
    /// mAB
    AToB(LutAb),
    /// mBA
    BToA(LutAb),
    /// mpet, channel counts only
    MultiProcess { inputs: usize, outputs: usize },
}

impl LutTag {
    /// Parse a full LUT tag (type signature included)
    pub fn parse(tag: &[u8]) -> Result<Self> {
        let type_sig = TypeSignature(read_signature(tag, 0).map_err(element_err("LUT type"))?);
        match type_sig {
            TypeSignature::LUT8 => LegacyLut::parse(tag, Precision::Bits8).map(Self::Lut8),
            TypeSignature::LUT16 => LegacyLut::parse(tag, Precision::Bits16).map(Self::Lut16),
            TypeSignature::LUTA2B => LutAb::parse(tag, true).map(Self::AToB),
            TypeSignature::LUTB2A => LutAb::parse(tag, false).map(Self::BToA),
            TypeSignature::MPET => Ok(Self::MultiProcess {
                inputs: read_u16(tag, 8).map_err(element_err("mpet header"))? as usize,
                outputs: read_u16(tag, 10).map_err(element_err("mpet header"))? as usize,
            }),
            other => Err(IccError::not_parseable(format!(
                "'{other}' is not a LUT type"
            ))),
        }
    }

    pub fn type_signature(&self) -> TypeSignature {
        match self {
            Self::Lut8(_) => TypeSignature::LUT8,
            Self::Lut16(_) => TypeSignature::LUT16,
            Self::AToB(_) => TypeSignature::LUTA2B,
            Self::BToA(_) => TypeSignature::LUTB2A,
            Self::MultiProcess { .. } => TypeSignature::MPET,
        }
    }

    pub fn input_channels(&self) -> usize {
        match self {
            Self::Lut8(l) | Self::Lut16(l) => l.inputs,
            Self::AToB(l) | Self::BToA(l) => l.inputs,
            Self::MultiProcess { inputs, .. } => *inputs,
        }
    }

    pub fn output_channels(&self) -> usize {
        match self {
            Self::Lut8(l) | Self::Lut16(l) => l.outputs,
            Self::AToB(l) | Self::BToA(l) => l.outputs,
            Self::MultiProcess { outputs, .. } => *outputs,
        }
    }
}

/// Lut8 / Lut16: matrix, input tables, CLUT, output tables
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyLut {
    pub inputs: usize,
    pub outputs: usize,
    pub matrix: Matrix3x3,
    pub input_curves: Vec<Curve>,
    pub clut: Clut,
    pub output_curves: Vec<Curve>,
}

impl LegacyLut {
    fn parse(tag: &[u8], precision: Precision) -> Result<Self> {
        let err = element_err("Lut8/Lut16 header");
        let inputs = read_u8(tag, 8).map_err(&err)? as usize;
        let outputs = read_u8(tag, 9).map_err(&err)? as usize;
        let grid_points = read_u8(tag, 10).map_err(&err)?;
        if inputs == 0 || outputs == 0 {
            return Err(IccError::not_parseable("LUT with zero channels"));
        }

        let matrix = read_matrix(tag, 12)?;

        let (input_entries, output_entries, mut pos) = match precision {
            Precision::Bits8 => (256, 256, 48),
            Precision::Bits16 => {
                let n = read_u16(tag, 48).map_err(&err)? as usize;
                let m = read_u16(tag, 50).map_err(&err)? as usize;
                if !(2..=4096).contains(&n) || !(2..=4096).contains(&m) {
                    return Err(IccError::not_parseable(format!(
                        "Lut16 table sizes {n}/{m} outside 2..=4096"
                    )));
                }
                (n, m, 52)
            }
        };

        let input_curves = read_tables(tag, &mut pos, inputs, input_entries, precision)?;

        let grid = vec![grid_points; inputs];
        let count = Clut::sample_count(&grid, outputs)?;
        let samples = read_samples(tag, pos, count, precision)?;
        pos += count * precision.bytes();
        let clut = Clut::new(grid, outputs, precision, samples)?;

        let output_curves = read_tables(tag, &mut pos, outputs, output_entries, precision)?;

        Ok(Self {
            inputs,
            outputs,
            matrix,
            input_curves,
            clut,
            output_curves,
        })
    }
}

/// lutAToB / lutBToA element set, in storage order
#[derive(Debug, Clone, PartialEq)]
pub struct LutAb {
    pub inputs: usize,
    pub outputs: usize,
    pub b_curves: Option<Vec<Curve>>,
    pub matrix: Option<MatrixElement>,
    pub m_curves: Option<Vec<Curve>>,
    pub clut: Option<Clut>,
    pub a_curves: Option<Vec<Curve>>,
}

impl LutAb {
    fn parse(tag: &[u8], a_to_b: bool) -> Result<Self> {
        let err = element_err("lutAToB/lutBToA header");
        let inputs = read_u8(tag, 8).map_err(&err)? as usize;
        let outputs = read_u8(tag, 9).map_err(&err)? as usize;
        if inputs == 0 || outputs == 0 {
            return Err(IccError::not_parseable("LUT with zero channels"));
        }

        let offset = |at: usize| -> Result<Option<usize>> {
            let off = read_u32(tag, at).map_err(&err)? as usize;
            Ok((off != 0).then_some(off))
        };
        let b_offset = offset(12)?;
        let matrix_offset = offset(16)?;
        let m_offset = offset(20)?;
        let clut_offset = offset(24)?;
        let a_offset = offset(28)?;

        // A side is the device side: inputs for mAB, outputs for mBA
        let (a_channels, pcs_channels) = if a_to_b {
            (inputs, outputs)
        } else {
            (outputs, inputs)
        };

        let b_curves = b_offset
            .map(|at| parse_curve_set(tag, at, pcs_channels))
            .transpose()?;
        let matrix = matrix_offset.map(|at| read_matrix_element(tag, at)).transpose()?;
        let m_curves = m_offset
            .map(|at| parse_curve_set(tag, at, pcs_channels))
            .transpose()?;
        let clut = clut_offset
            .map(|at| read_clut(tag, at, inputs, outputs))
            .transpose()?;
        let a_curves = a_offset
            .map(|at| parse_curve_set(tag, at, a_channels))
            .transpose()?;

        Ok(Self {
            inputs,
            outputs,
            b_curves,
            matrix,
            m_curves,
            clut,
            a_curves,
        })
    }
}

fn read_matrix(tag: &[u8], at: usize) -> Result<Matrix3x3> {
    let mut m = [[0.0; 3]; 3];
    for (i, v) in m.iter_mut().flatten().enumerate() {
        *v = read_s15fixed16(tag, at + i * 4).map_err(element_err("LUT matrix"))?;
    }
    Ok(Matrix3x3::new(m))
}

/// 3x3 matrix followed by a 3-element offset
fn read_matrix_element(tag: &[u8], at: usize) -> Result<MatrixElement> {
    let matrix = read_matrix(tag, at)?;
    let mut offset = [0.0; 3];
    for (i, v) in offset.iter_mut().enumerate() {
        *v = read_s15fixed16(tag, at + 36 + i * 4).map_err(element_err("LUT matrix offset"))?;
    }
    Ok(MatrixElement::new(matrix, Some(offset)))
}

/// CLUT element of mAB/mBA: 16 grid bytes, precision byte, 3 pad, samples
fn read_clut(tag: &[u8], at: usize, inputs: usize, outputs: usize) -> Result<Clut> {
    let err = element_err("CLUT header");
    if inputs > 16 {
        return Err(IccError::not_parseable(format!("CLUT with {inputs} inputs")));
    }
    let grid = (0..inputs)
        .map(|i| read_u8(tag, at + i).map_err(&err))
        .collect::<Result<Vec<_>>>()?;
    let precision_byte = read_u8(tag, at + 16).map_err(&err)?;
    let precision = Precision::from_bytes(precision_byte).ok_or_else(|| {
        IccError::not_parseable(format!("CLUT precision of {precision_byte} bytes"))
    })?;

    let count = Clut::sample_count(&grid, outputs)?;
    let samples = read_samples(tag, at + 20, count, precision)?;
    Clut::new(grid, outputs, precision, samples)
}

/// `count` samples normalized to [0, 1]
fn read_samples(tag: &[u8], at: usize, count: usize, precision: Precision) -> Result<Vec<f64>> {
    let width = precision.bytes();
    let bytes = count
        .checked_mul(width)
        .and_then(|len| at.checked_add(len))
        .and_then(|end| tag.get(at..end))
        .ok_or_else(|| {
            IccError::not_parseable(format!(
                "{count} samples at offset {at} exceed tag length {}",
                tag.len()
            ))
        })?;
    let max = precision.max_value();
    Ok(match precision {
        Precision::Bits8 => bytes.iter().map(|&b| b as f64 / max).collect(),
        Precision::Bits16 => bytes
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f64 / max)
            .collect(),
    })
}

/// `channels` consecutive tables of `entries` samples each, advancing `pos`
fn read_tables(
    tag: &[u8],
    pos: &mut usize,
    channels: usize,
    entries: usize,
    precision: Precision,
) -> Result<Vec<Curve>> {
    let mut curves = Vec::with_capacity(channels);
    for _ in 0..channels {
        let samples = read_samples(tag, *pos, entries, precision)?;
        *pos += entries * precision.bytes();
        curves.push(Curve::Sampled(samples));
    }
    Ok(curves)
}
