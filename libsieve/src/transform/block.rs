//! Separable 2D transform over square row-major blocks

use std::ops::{Add, AddAssign};

use super::dct::Dct;

/// Reusable buffers for one worker's block transforms
pub struct BlockScratch {
    size: usize,
    plane: Vec<f64>,
    line_in: Vec<f64>,
    line_out: Vec<f64>,
}

impl BlockScratch {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            plane: vec![0.0; size * size],
            line_in: vec![0.0; size],
            line_out: vec![0.0; size],
        }
    }
}

/// Forward 2D DCT in place: every row, then every column
pub fn forward_2d(dct: &Dct, block: &mut [f64], scratch: &mut BlockScratch) {
    let n = dct.len();
    assert_eq!(block.len(), n * n, "block is not {}x{}", n, n);
    assert_eq!(scratch.size, n, "scratch sized for a different block");

    for (src, dst) in block.chunks_exact(n).zip(scratch.plane.chunks_exact_mut(n)) {
        dct.forward_into(src, dst);
    }

    for col in 0..n {
        for row in 0..n {
            scratch.line_in[row] = scratch.plane[row * n + col];
        }
        dct.forward_into(&scratch.line_in, &mut scratch.line_out);
        for row in 0..n {
            block[row * n + col] = scratch.line_out[row];
        }
    }
}

/// Inverse 2D DCT in place: every column, then every row
pub fn inverse_2d(dct: &Dct, block: &mut [f64], scratch: &mut BlockScratch) {
    let n = dct.len();
    assert_eq!(block.len(), n * n, "block is not {}x{}", n, n);
    assert_eq!(scratch.size, n, "scratch sized for a different block");

    for col in 0..n {
        for row in 0..n {
            scratch.line_in[row] = block[row * n + col];
        }
        dct.inverse_into(&scratch.line_in, &mut scratch.line_out);
        for row in 0..n {
            scratch.plane[row * n + col] = scratch.line_out[row];
        }
    }

    for (src, dst) in scratch.plane.chunks_exact(n).zip(block.chunks_exact_mut(n)) {
        dct.inverse_into(src, dst);
    }
}

/// How many coefficients survived a threshold pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdCount {
    pub kept: usize,
    pub zeroed: usize,
}

impl ThresholdCount {
    pub fn total(&self) -> usize {
        self.kept + self.zeroed
    }
}

impl Add for ThresholdCount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ThresholdCount {
            kept: self.kept + other.kept,
            zeroed: self.zeroed + other.zeroed,
        }
    }
}

impl AddAssign for ThresholdCount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Zero every coefficient whose magnitude is strictly below `cutoff`
pub fn threshold_absolute(coeffs: &mut [f64], cutoff: f64) -> ThresholdCount {
    let mut count = ThresholdCount::default();
    for c in coeffs.iter_mut() {
        if c.abs() < cutoff {
            *c = 0.0;
            count.zeroed += 1;
        } else {
            count.kept += 1;
        }
    }
    count
}
