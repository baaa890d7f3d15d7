//! Device <-> PCS Pipelines
//!
//! A [`Pipeline`] is the ordered stage list decoded from one AToB or BToA
//! tag. It is built once per (direction, slot) by the assembler in
//! [`lut`] and evaluated by [`crate::transform`].
//!
//! # Pipeline Architecture
//!
//! - Lut8 / Lut16: matrix (PCSXYZ input only) → input curves → CLUT → output curves
//! - lutAToB: A curves → CLUT → M curves → matrix → B curves
//! - lutBToA: B curves → matrix → M curves → CLUT → A curves
//!
//! Values at both ends are normalized to [0, 1]; [`PcsEncoding`] maps the
//! PCS end to and from Lab or XYZ.

mod context;
pub mod lut;
mod stages;

pub use context::{Direction, Intent};
pub use lut::assemble;
pub use stages::{Clut, Curve, MAX_CLUT_SAMPLES, MatrixElement, Precision, Stage};

use crate::color::{Lab, Xyz};
use crate::error::{IccError, Result};
use crate::icc::TagSignature;

/// Most channels any stage may carry
pub const MAX_CHANNELS: usize = 16;

/// Container type a pipeline was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LutKind {
    Lut8,
    Lut16,
    AToB,
    BToA,
}

/// How PCS values are normalized at the pipeline boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcsEncoding {
    /// CIELAB, v4 / 8-bit encoding: L = v·100, a/b = v·255 − 128
    LabV4,
    /// CIELAB, legacy 16-bit encoding (0xFF00 is L = 100)
    LabV2Legacy,
    /// CIEXYZ, u1Fixed15 (0x8000 is 1.0)
    Xyz,
}

/// Legacy-to-v4 Lab scale
const LAB_V2_SCALE: f64 = 65535.0 / 65280.0;

/// u1Fixed15 full scale
const XYZ_SCALE: f64 = 65535.0 / 32768.0;

impl PcsEncoding {
    /// Decode a normalized pipeline triplet
    pub fn decode(self, v: [f64; 3]) -> Pcs {
        match self {
            Self::LabV4 => Pcs::Lab(Lab::new(
                v[0] * 100.0,
                v[1] * 255.0 - 128.0,
                v[2] * 255.0 - 128.0,
            )),
            Self::LabV2Legacy => Self::LabV4.decode([
                v[0] * LAB_V2_SCALE,
                v[1] * LAB_V2_SCALE,
                v[2] * LAB_V2_SCALE,
            ]),
            Self::Xyz => Pcs::Xyz(Xyz::new(
                v[0] * XYZ_SCALE,
                v[1] * XYZ_SCALE,
                v[2] * XYZ_SCALE,
            )),
        }
    }

    /// Encode a D50 XYZ value as a normalized pipeline triplet
    pub fn encode(self, xyz: Xyz) -> [f64; 3] {
        match self {
            Self::LabV4 => {
                let lab = Lab::from_xyz(xyz);
                [lab.l / 100.0, (lab.a + 128.0) / 255.0, (lab.b + 128.0) / 255.0]
            }
            Self::LabV2Legacy => {
                let v = Self::LabV4.encode(xyz);
                [v[0] / LAB_V2_SCALE, v[1] / LAB_V2_SCALE, v[2] / LAB_V2_SCALE]
            }
            Self::Xyz => [xyz.x / XYZ_SCALE, xyz.y / XYZ_SCALE, xyz.z / XYZ_SCALE],
        }
    }
}

/// A PCS value as produced by a device → PCS pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pcs {
    Lab(Lab),
    Xyz(Xyz),
}

impl Pcs {
    /// XYZ relative to D50
    pub fn to_xyz(self) -> Xyz {
        match self {
            Pcs::Lab(lab) => lab.to_xyz(),
            Pcs::Xyz(xyz) => xyz,
        }
    }

    pub fn to_lab(self) -> Lab {
        match self {
            Pcs::Lab(lab) => lab,
            Pcs::Xyz(xyz) => Lab::from_xyz(xyz),
        }
    }
}

/// Ordered stages for one (direction, slot) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub(crate) tag: TagSignature,
    pub(crate) direction: Direction,
    pub(crate) kind: LutKind,
    pub(crate) stages: Vec<Stage>,
    pub(crate) input_channels: usize,
    pub(crate) output_channels: usize,
    pub(crate) pcs_encoding: PcsEncoding,
}

impl Pipeline {
    /// Build a pipeline, checking that adjacent stages agree on width
    pub(crate) fn new(
        tag: TagSignature,
        direction: Direction,
        kind: LutKind,
        stages: Vec<Stage>,
        input_channels: usize,
        output_channels: usize,
        pcs_encoding: PcsEncoding,
    ) -> Result<Self> {
        let mut width = input_channels;
        for stage in &stages {
            if stage.input_channels() != width {
                return Err(IccError::ShapeMismatch {
                    stage: stage.name(),
                    expected: width,
                    actual: stage.input_channels(),
                });
            }
            width = stage.output_channels();
        }
        if width != output_channels {
            return Err(IccError::ShapeMismatch {
                stage: stages.last().map_or("pipeline", Stage::name),
                expected: output_channels,
                actual: width,
            });
        }

        Ok(Self {
            tag,
            direction,
            kind,
            stages,
            input_channels,
            output_channels,
            pcs_encoding,
        })
    }

    /// Tag this pipeline was decoded from
    pub fn tag(&self) -> TagSignature {
        self.tag
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> LutKind {
        self.kind
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn input_channels(&self) -> usize {
        self.input_channels
    }

    pub fn output_channels(&self) -> usize {
        self.output_channels
    }

    pub fn pcs_encoding(&self) -> PcsEncoding {
        self.pcs_encoding
    }

    /// Stage names in order, e.g. `["curves", "clut", "curves"]`
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }
}
