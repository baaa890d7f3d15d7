//! # icc-tests
//!
//! Integration test support for oxicc.
//!
//! Real-world profiles are large and carry licensing baggage, so the tests
//! here run against synthetic profiles written byte by byte. Each one samples
//! an analytic model, which makes expected results computable exactly.
//!
//! ## Test Categories
//!
//! 1. **Header and tag table**: fields decode to what the builder wrote
//! 2. **Pipelines**: stage order, PCS encoding, CLUT interpolation
//! 3. **Round trips**: device → XYZ → device per rendering intent
//! 4. **Degradation**: missing files, truncation, bad signatures, missing tags
//! 5. **Concurrency**: shared profiles under parallel first use

pub mod builder;
pub mod fixtures;
pub mod patterns;
pub mod synthetic;

pub use builder::ProfileBuilder;
pub use fixtures::{Manifest, load_profile};
pub use patterns::{DevicePattern, generate};

/// Largest per-component difference
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
