//! SIMD-Dispatched Batch Conversion
//!
//! Buffer-level loops over the per-pixel conversions, compiled for several
//! instruction sets with the `multiversion` crate and dispatched at runtime.
//!
//! Targets are AVX2 and SSE4.1 on x86-64 and NEON on aarch64, with the
//! scalar build as the fallback everywhere else.

mod batch;

pub use batch::{cmyk8_to_rgb8_batch, device8_to_xyz_batch, device16_to_xyz_batch};

/// Instruction set the batch loops dispatch to on this CPU
pub fn active_features() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            "AVX2"
        } else if is_x86_feature_detected!("sse4.1") {
            "SSE4.1"
        } else {
            "scalar"
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        "NEON"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "scalar"
    }
}
