//! Numeric building blocks for pipeline evaluation
//!
//! - 3x3 matrix operations for matrix stages and the sRGB boundary
//! - ICC parametric curves and the sRGB transfer function
//! - 1-D and N-dimensional multilinear interpolation for curves and CLUTs

pub mod gamma;
pub mod interpolation;
pub mod matrix;

pub use gamma::{
    ParametricCurve, ParametricCurveType, parametric_curve_eval, srgb_gamma_decode,
    srgb_gamma_encode,
};
pub use interpolation::{MAX_CLUT_INPUTS, lerp, lut1d_interp, multilinear_interp};
pub use matrix::{Matrix3x3, SRGB_TO_XYZ_D50, XYZ_D50_TO_SRGB};
