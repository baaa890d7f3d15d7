//! LUT Pipeline Assembly
//!
//! Turns a decoded [`LutTag`] into an ordered [`Pipeline`]. The stage order
//! is fixed per container type:
//!
//! - Lut8/Lut16: matrix → input curves → CLUT → output curves
//! - lutAToB: A curves → CLUT → M curves → matrix → B curves
//! - lutBToA: B curves → matrix → M curves → CLUT → A curves
//!
//! Only a fixed set of lutAToB/lutBToA element combinations is accepted.
//! Anything else is reported as [`IccError::UnsupportedLut`] rather than
//! evaluated with guessed semantics.

use tracing::debug;

use super::{Direction, LutKind, MAX_CHANNELS, PcsEncoding, Pipeline, Stage};
use crate::error::{IccError, Result};
use crate::icc::header::ColorSpace;
use crate::icc::tags::{LegacyLut, LutAb, LutTag};
use crate::icc::TagSignature;
use crate::pipeline::MatrixElement;

/// Build the pipeline for one LUT tag
///
/// `pcs` is the profile's connection space from the header; it selects the
/// [`PcsEncoding`] and decides whether a Lut8/Lut16 matrix applies.
pub fn assemble(
    lut: &LutTag,
    tag: TagSignature,
    direction: Direction,
    pcs: ColorSpace,
) -> Result<Pipeline> {
    let inputs = lut.input_channels();
    let outputs = lut.output_channels();
    if inputs > MAX_CHANNELS || outputs > MAX_CHANNELS {
        return Err(IccError::unsupported_lut(format!(
            "{inputs} → {outputs} channels exceeds the {MAX_CHANNELS} channel limit"
        )));
    }

    let pcs_channels = match direction {
        Direction::DeviceToPcs => outputs,
        Direction::PcsToDevice => inputs,
    };
    if pcs_channels != 3 {
        return Err(IccError::unsupported_lut(format!(
            "{tag} has {pcs_channels} PCS channels"
        )));
    }

    let (kind, stages) = match (lut, direction) {
        (LutTag::Lut8(l), _) => (LutKind::Lut8, legacy_stages(l, direction, pcs)),
        (LutTag::Lut16(l), _) => (LutKind::Lut16, legacy_stages(l, direction, pcs)),
        (LutTag::AToB(l), Direction::DeviceToPcs) => (LutKind::AToB, ab_stages(l, true)?),
        (LutTag::BToA(l), Direction::PcsToDevice) => (LutKind::BToA, ab_stages(l, false)?),
        (LutTag::AToB(_) | LutTag::BToA(_), _) => {
            return Err(IccError::unsupported_lut(format!(
                "'{}' container in a {direction:?} slot",
                lut.type_signature()
            )));
        }
        (LutTag::MultiProcess { .. }, _) => {
            return Err(IccError::unsupported_lut(
                "multiProcessElements tags are not evaluated",
            ));
        }
    };

    let pcs_encoding = match (pcs, kind) {
        (ColorSpace::Xyz, _) => PcsEncoding::Xyz,
        (ColorSpace::Lab, LutKind::Lut16) => PcsEncoding::LabV2Legacy,
        (ColorSpace::Lab, _) => PcsEncoding::LabV4,
        (other, _) => {
            return Err(IccError::UnsupportedHeader(format!(
                "{other:?} is not a connection space"
            )));
        }
    };

    let pipeline = Pipeline::new(
        tag,
        direction,
        kind,
        stages,
        inputs,
        outputs,
        pcs_encoding,
    )?;

    debug!(
        %tag,
        ?kind,
        ?pcs_encoding,
        stages = ?pipeline.stage_names(),
        "assembled pipeline"
    );
    Ok(pipeline)
}

fn legacy_stages(lut: &LegacyLut, direction: Direction, pcs: ColorSpace) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(4);

    // The matrix only operates on PCSXYZ input
    let xyz_input = pcs == ColorSpace::Xyz && direction == Direction::PcsToDevice;
    if xyz_input && lut.inputs == 3 && !lut.matrix.is_identity(1e-9) {
        stages.push(Stage::Matrix(MatrixElement::new(lut.matrix, None)));
    }

    stages.push(Stage::Curves(lut.input_curves.clone()));
    stages.push(Stage::Clut(lut.clut.clone()));
    stages.push(Stage::Curves(lut.output_curves.clone()));
    stages
}

/// Stages for the accepted lutAToB / lutBToA element sets
fn ab_stages(lut: &LutAb, a_to_b: bool) -> Result<Vec<Stage>> {
    let curves = |c: &Option<Vec<_>>| c.clone().map(Stage::Curves);
    let b = curves(&lut.b_curves);
    let m = curves(&lut.m_curves);
    let a = curves(&lut.a_curves);
    let matrix = lut.matrix.clone().map(Stage::Matrix);
    let clut = lut.clut.clone().map(Stage::Clut);

    let stages = match (b, matrix, m, clut, a) {
        (Some(b), None, None, None, None) => {
            if lut.inputs != lut.outputs {
                return Err(IccError::unsupported_lut(format!(
                    "B curves alone cannot map {} → {} channels",
                    lut.inputs, lut.outputs
                )));
            }
            vec![b]
        }
        (Some(b), Some(matrix), Some(m), None, None) => {
            if lut.inputs != 3 || lut.outputs != 3 {
                return Err(IccError::unsupported_lut(format!(
                    "matrix element on a {} → {} channel LUT",
                    lut.inputs, lut.outputs
                )));
            }
            if a_to_b {
                vec![m, matrix, b]
            } else {
                vec![b, matrix, m]
            }
        }
        (Some(b), None, None, Some(clut), Some(a)) => {
            if a_to_b {
                vec![a, clut, b]
            } else {
                vec![b, clut, a]
            }
        }
        (Some(b), Some(matrix), Some(m), Some(clut), Some(a)) => {
            if a_to_b {
                vec![a, clut, m, matrix, b]
            } else {
                vec![b, matrix, m, clut, a]
            }
        }
        _ => {
            return Err(IccError::unsupported_lut(format!(
                "element set [{}] is not a supported combination",
                present_elements(lut).join(", ")
            )));
        }
    };
    Ok(stages)
}

fn present_elements(lut: &LutAb) -> Vec<&'static str> {
    [
        ("B", lut.b_curves.is_some()),
        ("matrix", lut.matrix.is_some()),
        ("M", lut.m_curves.is_some()),
        ("CLUT", lut.clut.is_some()),
        ("A", lut.a_curves.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, present)| present.then_some(name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;
    use crate::math::Matrix3x3;
    use crate::pipeline::{Clut, Curve, Precision};

    fn identity_curves(n: usize) -> Option<Vec<Curve>> {
        Some(vec![Curve::Identity; n])
    }

    fn clut(inputs: usize, outputs: usize) -> Clut {
        let grid = vec![2u8; inputs];
        let count = Clut::sample_count(&grid, outputs).unwrap();
        Clut::new(grid, outputs, Precision::Bits16, vec![0.5; count]).unwrap()
    }

    fn lut_ab(inputs: usize, outputs: usize) -> LutAb {
        LutAb {
            inputs,
            outputs,
            b_curves: None,
            matrix: None,
            m_curves: None,
            clut: None,
            a_curves: None,
        }
    }

    #[test]
    fn test_atob_clut_order() {
        let mut lut = lut_ab(4, 3);
        lut.a_curves = identity_curves(4);
        lut.clut = Some(clut(4, 3));
        lut.b_curves = identity_curves(3);

        let p = assemble(
            &LutTag::AToB(lut),
            TagSignature::A2B0,
            Direction::DeviceToPcs,
            ColorSpace::Lab,
        )
        .unwrap();
        assert_eq!(p.stage_names(), ["curves", "clut", "curves"]);
        assert_eq!(p.stages()[0].input_channels(), 4);
        assert_eq!(p.pcs_encoding(), PcsEncoding::LabV4);
        assert_eq!(p.kind(), LutKind::AToB);
    }

    #[test]
    fn test_btoa_full_order() {
        let mut lut = lut_ab(3, 4);
        lut.b_curves = identity_curves(3);
        lut.matrix = Some(MatrixElement::new(Matrix3x3::identity(), Some([0.0; 3])));
        lut.m_curves = identity_curves(3);
        lut.clut = Some(clut(3, 4));
        lut.a_curves = identity_curves(4);

        let p = assemble(
            &LutTag::BToA(lut),
            TagSignature::B2A1,
            Direction::PcsToDevice,
            ColorSpace::Xyz,
        )
        .unwrap();
        assert_eq!(p.stage_names(), ["curves", "matrix", "curves", "clut", "curves"]);
        assert_eq!(p.pcs_encoding(), PcsEncoding::Xyz);
        assert_eq!(p.output_channels(), 4);
    }

    #[test]
    fn test_unsupported_element_set() {
        // CLUT without A curves
        let mut lut = lut_ab(4, 3);
        lut.clut = Some(clut(4, 3));
        lut.b_curves = identity_curves(3);
        let err = assemble(
            &LutTag::AToB(lut),
            TagSignature::A2B0,
            Direction::DeviceToPcs,
            ColorSpace::Lab,
        )
        .unwrap_err();
        assert!(matches!(err, IccError::UnsupportedLut(_)));
        assert!(err.to_string().contains("CLUT"));
    }

    #[test]
    fn test_b_only_requires_equal_channels() {
        let mut lut = lut_ab(3, 3);
        lut.b_curves = identity_curves(3);
        let p = assemble(
            &LutTag::AToB(lut),
            TagSignature::A2B0,
            Direction::DeviceToPcs,
            ColorSpace::Xyz,
        )
        .unwrap();
        assert_eq!(p.stage_names(), ["curves"]);
    }

    #[test]
    fn test_wrong_container_for_direction() {
        let mut lut = lut_ab(3, 3);
        lut.b_curves = identity_curves(3);
        assert!(matches!(
            assemble(
                &LutTag::AToB(lut),
                TagSignature::B2A0,
                Direction::PcsToDevice,
                ColorSpace::Lab,
            ),
            Err(IccError::UnsupportedLut(_))
        ));
    }

    #[test]
    fn test_multi_process_unsupported() {
        let lut = LutTag::MultiProcess {
            inputs: 4,
            outputs: 3,
        };
        assert!(matches!(
            assemble(&lut, TagSignature::A2B0, Direction::DeviceToPcs, ColorSpace::Lab),
            Err(IccError::UnsupportedLut(_))
        ));
    }

    fn legacy(inputs: usize, outputs: usize, matrix: Matrix3x3) -> LegacyLut {
        LegacyLut {
            inputs,
            outputs,
            matrix,
            input_curves: vec![Curve::Identity; inputs],
            clut: clut(inputs, outputs),
            output_curves: vec![Curve::Identity; outputs],
        }
    }

    #[test]
    fn test_lut16_order_and_encoding() {
        let lut = LutTag::Lut16(legacy(4, 3, Matrix3x3::identity()));
        let p = assemble(&lut, TagSignature::A2B0, Direction::DeviceToPcs, ColorSpace::Lab)
            .unwrap();
        assert_eq!(p.stage_names(), ["curves", "clut", "curves"]);
        assert_eq!(p.pcs_encoding(), PcsEncoding::LabV2Legacy);
    }

    #[test]
    fn test_lut16_matrix_only_for_xyz_input() {
        let scale = Matrix3x3::new([[0.5, 0.0, 0.0], [0.0, 0.5, 0.0], [0.0, 0.0, 0.5]]);

        let lut = LutTag::Lut16(legacy(3, 4, scale));
        let p = assemble(&lut, TagSignature::B2A0, Direction::PcsToDevice, ColorSpace::Xyz)
            .unwrap();
        assert_eq!(p.stage_names(), ["matrix", "curves", "clut", "curves"]);

        let p = assemble(&lut, TagSignature::B2A0, Direction::PcsToDevice, ColorSpace::Lab)
            .unwrap();
        assert_eq!(p.stage_names(), ["curves", "clut", "curves"]);
    }

    #[test]
    fn test_pcs_side_must_be_three_channels() {
        let lut = LutTag::Lut8(legacy(3, 4, Matrix3x3::identity()));
        assert!(matches!(
            assemble(&lut, TagSignature::A2B0, Direction::DeviceToPcs, ColorSpace::Lab),
            Err(IccError::UnsupportedLut(_))
        ));
    }
}
