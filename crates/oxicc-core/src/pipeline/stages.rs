//! Pipeline Stages
//!
//! The closed set of elements a LUT tag decodes into. All values flowing
//! between stages are normalized to [0, 1] (matrix stages may leave that
//! range; the next curve or CLUT clamps).

use crate::error::{IccError, Result};
use crate::math::{
    MAX_CLUT_INPUTS, Matrix3x3, ParametricCurve, lut1d_interp, parametric_curve_eval,
};

/// Largest CLUT accepted, in samples (grid nodes × outputs)
pub const MAX_CLUT_SAMPLES: usize = 16 * 1024 * 1024;

/// A one-dimensional curve
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Curve {
    /// Passthrough (`curv` with no entries)
    #[default]
    Identity,
    /// `v^γ` (`curv` with one u8Fixed8 entry)
    Gamma(f64),
    /// Piecewise-linear table, normalized to [0, 1]
    Sampled(Vec<f64>),
    /// ICC `para` curve
    Parametric(ParametricCurve),
}

impl Curve {
    /// Build a sampled curve from raw 8-bit entries
    pub fn from_u8_table(table: &[u8]) -> Self {
        Curve::Sampled(table.iter().map(|&v| v as f64 / 255.0).collect())
    }

    /// Build a sampled curve from raw 16-bit entries
    pub fn from_u16_table(table: &[u16]) -> Self {
        match table.len() {
            0 => Curve::Identity,
            _ => Curve::Sampled(table.iter().map(|&v| v as f64 / 65535.0).collect()),
        }
    }

    /// Evaluate the curve at `x`, clamped to [0, 1]
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Curve::Identity => x,
            Curve::Gamma(g) => x.powf(*g),
            Curve::Sampled(table) => lut1d_interp(table, x),
            Curve::Parametric(p) => parametric_curve_eval(p, x),
        }
    }

    /// Whether the curve maps every input to itself
    pub fn is_identity(&self) -> bool {
        match self {
            Curve::Identity => true,
            Curve::Gamma(g) => *g == 1.0,
            Curve::Sampled(table) => {
                table.len() >= 2
                    && table.iter().enumerate().all(|(i, &v)| {
                        (v - i as f64 / (table.len() - 1) as f64).abs() < 1e-9
                    })
            }
            Curve::Parametric(_) => false,
        }
    }
}

/// 3x3 matrix with optional offset: `M·v + offset`
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixElement {
    pub matrix: Matrix3x3,
    pub offset: Option<[f64; 3]>,
}

impl MatrixElement {
    pub fn new(matrix: Matrix3x3, offset: Option<[f64; 3]>) -> Self {
        Self { matrix, offset }
    }

    #[inline]
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let mut r = self.matrix.multiply_vec(v);
        if let Some(o) = self.offset {
            r[0] += o[0];
            r[1] += o[1];
            r[2] += o[2];
        }
        r
    }

    /// Identity matrix with no (or a zero) offset
    pub fn is_identity(&self) -> bool {
        self.matrix.is_identity(0.0) && self.offset.is_none_or(|o| o == [0.0; 3])
    }
}

/// Sample precision of a CLUT as stored in the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Bits8,
    Bits16,
}

impl Precision {
    pub fn from_bytes(bytes: u8) -> Option<Self> {
        match bytes {
            1 => Some(Self::Bits8),
            2 => Some(Self::Bits16),
            _ => None,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
        }
    }

    /// Divisor that normalizes a raw sample to [0, 1]
    pub fn max_value(self) -> f64 {
        match self {
            Self::Bits8 => 255.0,
            Self::Bits16 => 65535.0,
        }
    }
}

/// N-input, M-output colour lookup table
///
/// `data.len() == outputs × ∏ grid`, first input axis varying slowest,
/// outputs interleaved per node.
#[derive(Debug, Clone, PartialEq)]
pub struct Clut {
    grid: Vec<u8>,
    outputs: usize,
    precision: Precision,
    data: Vec<f64>,
}

impl Clut {
    /// Number of samples for a grid shape, if within [`MAX_CLUT_SAMPLES`]
    pub fn sample_count(grid: &[u8], outputs: usize) -> Result<usize> {
        if grid.is_empty() || grid.len() > MAX_CLUT_INPUTS {
            return Err(IccError::not_parseable(format!(
                "CLUT with {} input axes",
                grid.len()
            )));
        }
        if outputs == 0 {
            return Err(IccError::not_parseable("CLUT with no output channels"));
        }
        let mut count = outputs;
        for &g in grid {
            if g == 0 {
                return Err(IccError::not_parseable("CLUT grid dimension of 0"));
            }
            count = count
                .checked_mul(g as usize)
                .filter(|&c| c <= MAX_CLUT_SAMPLES)
                .ok_or_else(|| IccError::not_parseable("CLUT exceeds size limit"))?;
        }
        Ok(count)
    }

    /// Build a CLUT from normalized samples
    pub fn new(grid: Vec<u8>, outputs: usize, precision: Precision, data: Vec<f64>) -> Result<Self> {
        let expected = Self::sample_count(&grid, outputs)?;
        if data.len() != expected {
            return Err(IccError::not_parseable(format!(
                "CLUT holds {} samples, grid requires {}",
                data.len(),
                expected
            )));
        }
        Ok(Self {
            grid,
            outputs,
            precision,
            data,
        })
    }

    pub fn grid(&self) -> &[u8] {
        &self.grid
    }

    pub fn inputs(&self) -> usize {
        self.grid.len()
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// One element of a [`super::Pipeline`]
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// One curve per channel
    Curves(Vec<Curve>),
    /// 3 → 3 affine transform
    Matrix(MatrixElement),
    /// N → M lookup table
    Clut(Clut),
}

impl Stage {
    pub fn input_channels(&self) -> usize {
        match self {
            Stage::Curves(c) => c.len(),
            Stage::Matrix(_) => 3,
            Stage::Clut(clut) => clut.inputs(),
        }
    }

    pub fn output_channels(&self) -> usize {
        match self {
            Stage::Curves(c) => c.len(),
            Stage::Matrix(_) => 3,
            Stage::Clut(clut) => clut.outputs(),
        }
    }

    /// Short name used in shape errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Curves(_) => "curves",
            Stage::Matrix(_) => "matrix",
            Stage::Clut(_) => "clut",
        }
    }

    /// Curves stage that does nothing
    pub fn is_identity(&self) -> bool {
        match self {
            Stage::Curves(c) => c.iter().all(Curve::is_identity),
            Stage::Matrix(m) => m.is_identity(),
            Stage::Clut(_) => false,
        }
    }
}
