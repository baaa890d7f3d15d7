//! Pipeline Evaluation
//!
//! Runs a [`Pipeline`] on one channel vector. Intermediate values live in
//! two fixed-size stack buffers, so evaluation does not allocate and can be
//! called from any number of threads at once.

use crate::error::{IccError, Result};
use crate::math::multilinear_interp;
use crate::pipeline::{MAX_CHANNELS, Pipeline, Stage};

impl Pipeline {
    /// Evaluate the pipeline, returning `output_channels` values
    ///
    /// `input.len()` must equal [`Pipeline::input_channels`].
    pub fn eval(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut out = [0.0; MAX_CHANNELS];
        let n = self.eval_into(input, &mut out)?;
        Ok(out[..n].to_vec())
    }

    /// Evaluate into `out`, returning the number of values written
    pub fn eval_into(&self, input: &[f64], out: &mut [f64]) -> Result<usize> {
        if input.len() != self.input_channels {
            return Err(IccError::ShapeMismatch {
                stage: "input",
                expected: self.input_channels,
                actual: input.len(),
            });
        }
        if out.len() < self.output_channels {
            return Err(IccError::ShapeMismatch {
                stage: "output",
                expected: self.output_channels,
                actual: out.len(),
            });
        }

        let mut a = [0.0; MAX_CHANNELS];
        let mut b = [0.0; MAX_CHANNELS];
        a[..input.len()].copy_from_slice(input);
        let mut width = input.len();

        for stage in &self.stages {
            width = eval_stage(stage, &a[..width], &mut b)?;
            std::mem::swap(&mut a, &mut b);
        }

        out[..width].copy_from_slice(&a[..width]);
        Ok(width)
    }

    /// Evaluate a pipeline with three outputs, such as any device → PCS one
    pub fn eval_triplet(&self, input: &[f64]) -> Result<[f64; 3]> {
        let mut out = [0.0; MAX_CHANNELS];
        match self.eval_into(input, &mut out)? {
            3 => Ok([out[0], out[1], out[2]]),
            n => Err(IccError::ShapeMismatch {
                stage: "output",
                expected: 3,
                actual: n,
            }),
        }
    }
}

/// Apply one stage, returning the output width
pub fn eval_stage(stage: &Stage, input: &[f64], out: &mut [f64]) -> Result<usize> {
    let expected = stage.input_channels();
    if input.len() != expected {
        return Err(IccError::ShapeMismatch {
            stage: stage.name(),
            expected,
            actual: input.len(),
        });
    }

    match stage {
        Stage::Curves(curves) => {
            for ((o, &x), curve) in out.iter_mut().zip(input).zip(curves) {
                *o = curve.eval(x);
            }
            Ok(curves.len())
        }
        Stage::Matrix(m) => {
            let r = m.apply([input[0], input[1], input[2]]);
            out[..3].copy_from_slice(&r);
            Ok(3)
        }
        Stage::Clut(clut) => {
            multilinear_interp(clut.data(), clut.grid(), clut.outputs(), input, out);
            Ok(clut.outputs())
        }
    }
}
