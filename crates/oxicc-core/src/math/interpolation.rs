//! Interpolation functions for LUT evaluation
//!
//! - Linear interpolation (1D), used by sampled curves
//! - Multilinear interpolation over an N-dimensional CLUT grid

/// Largest number of CLUT input axes accepted by [`multilinear_interp`]
pub const MAX_CLUT_INPUTS: usize = 15;

/// Linear interpolation between two values
///
/// Returns a + t * (b - a) for t in [0, 1]
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Lookup in a 1D LUT with linear interpolation
///
/// Input is clamped to [0, 1]; an empty table is the identity.
pub fn lut1d_interp(lut: &[f64], input: f64) -> f64 {
    if lut.is_empty() {
        return input;
    }
    if lut.len() == 1 {
        return lut[0];
    }

    let max_idx = (lut.len() - 1) as f64;
    let pos = (input * max_idx).clamp(0.0, max_idx);

    let i0 = pos.floor() as usize;
    let i1 = (i0 + 1).min(lut.len() - 1);
    let t = pos - i0 as f64;

    lerp(lut[i0], lut[i1], t)
}

/// Multilinear interpolation in an N-dimensional grid
///
/// `data` holds `outputs` interleaved values per grid node, with the first
/// input axis varying slowest. Each input component is clamped to [0, 1] and
/// mapped onto `[0, grid[i] - 1]`. The `2^N` corners surrounding the sample
/// are blended with per-axis `(1 - frac)` / `frac` weights; corners with zero
/// weight are skipped, so a sample on a grid node returns the node exactly.
///
/// `grid.len()` must equal `input.len()`, be at most [`MAX_CLUT_INPUTS`],
/// and `out.len()` must be at least `outputs`.
pub fn multilinear_interp(
    data: &[f64],
    grid: &[u8],
    outputs: usize,
    input: &[f64],
    out: &mut [f64],
) {
    let n = grid.len().min(input.len()).min(MAX_CLUT_INPUTS);
    let out = &mut out[..outputs];
    out.fill(0.0);

    let mut stride = [0usize; MAX_CLUT_INPUTS];
    let mut acc = outputs;
    for axis in (0..n).rev() {
        stride[axis] = acc;
        acc *= grid[axis] as usize;
    }

    let mut base = 0usize;
    let mut frac = [0.0f64; MAX_CLUT_INPUTS];
    let mut step = [0usize; MAX_CLUT_INPUTS];
    for axis in 0..n {
        let g = grid[axis] as usize;
        if g <= 1 {
            continue;
        }
        let pos = input[axis].clamp(0.0, 1.0) * (g - 1) as f64;
        let mut idx = pos.floor() as usize;
        let mut t = pos - idx as f64;
        if idx >= g - 1 {
            idx = g - 2;
            t = 1.0;
        }
        base += idx * stride[axis];
        frac[axis] = t;
        step[axis] = stride[axis];
    }

    for corner in 0..(1usize << n) {
        let mut weight = 1.0;
        let mut offset = base;
        for axis in 0..n {
            if corner & (1 << (n - 1 - axis)) != 0 {
                weight *= frac[axis];
                offset += step[axis];
            } else {
                weight *= 1.0 - frac[axis];
            }
            if weight == 0.0 {
                break;
            }
        }
        if weight == 0.0 {
            continue;
        }
        for (o, value) in out.iter_mut().enumerate() {
            *value += weight * data[offset + o];
        }
    }
}
