//! Device value patterns
//!
//! Channel vectors for exercising pipelines: grid corners, ramps and
//! seeded random samples.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Device sample patterns
#[derive(Debug, Clone, Copy)]
pub enum DevicePattern {
    /// Every combination of 0 and 1 per channel
    Corners,
    /// All channels equal, `steps` values from 0 to 1
    Ramp(usize),
    /// `count` uniform samples in `[lo, hi]` with a fixed seed
    Random { seed: u64, count: usize, lo: f64, hi: f64 },
}

/// Generate `channels`-wide vectors for a pattern
pub fn generate(pattern: DevicePattern, channels: usize) -> Vec<Vec<f64>> {
    match pattern {
        DevicePattern::Corners => (0..1usize << channels)
            .map(|bits| {
                (0..channels)
                    .map(|c| ((bits >> c) & 1) as f64)
                    .collect()
            })
            .collect(),
        DevicePattern::Ramp(steps) => {
            let steps = steps.max(2);
            (0..steps)
                .map(|i| vec![i as f64 / (steps - 1) as f64; channels])
                .collect()
        }
        DevicePattern::Random { seed, count, lo, hi } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count)
                .map(|_| (0..channels).map(|_| rng.gen_range(lo..=hi)).collect())
                .collect()
        }
    }
}

/// CMY samples with K fixed at zero
pub fn cmy_only(seed: u64, count: usize) -> Vec<[f64; 4]> {
    generate(
        DevicePattern::Random {
            seed,
            count,
            lo: 0.0,
            hi: 1.0,
        },
        3,
    )
    .into_iter()
    .map(|v| [v[0], v[1], v[2], 0.0])
    .collect()
}
