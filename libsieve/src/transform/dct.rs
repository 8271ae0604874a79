//! Orthonormal DCT-II / DCT-III pair
//!
//! Forward: X[k] = s(k) * Σ x[i] * cos(π/N * (i + 0.5) * k)
//! Inverse: x[i] = Σ s(k) * X[k] * cos(π/N * (i + 0.5) * k)
//!
//! with s(0) = sqrt(1/N) and s(k) = sqrt(2/N) otherwise, so the two
//! transforms are exact inverses of each other.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

/// Longest length evaluated with the cosine table; longer ones go through FFT
pub const TABLE_MAX_LEN: usize = 64;

enum Kernel {
    /// basis[k * n + i] = s(k) * cos(π/N * (i + 0.5) * k)
    Table { basis: Vec<f64> },
    /// Makhoul's N-point FFT evaluation
    Fft {
        forward: Arc<dyn Fft<f64>>,
        inverse: Arc<dyn Fft<f64>>,
        /// e^(-iπk / 2N)
        twiddle: Vec<Complex<f64>>,
        /// s(k)
        scale: Vec<f64>,
    },
}

/// Planned DCT for one fixed length
///
/// Immutable once built, so a single instance can be shared by every worker
/// compressing blocks of the same size.
pub struct Dct {
    n: usize,
    kernel: Kernel,
}

#[allow(clippy::len_without_is_empty)]
impl Dct {
    /// Plan a transform of length `n` (must be at least 1)
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "DCT length must be at least 1");

        let kernel = if n <= TABLE_MAX_LEN {
            Kernel::Table {
                basis: Self::basis_table(n),
            }
        } else {
            let mut planner = FftPlanner::new();
            let twiddle = (0..n)
                .map(|k| {
                    let theta = -PI * k as f64 / (2.0 * n as f64);
                    Complex::new(theta.cos(), theta.sin())
                })
                .collect();
            Kernel::Fft {
                forward: planner.plan_fft_forward(n),
                inverse: planner.plan_fft_inverse(n),
                twiddle,
                scale: (0..n).map(|k| Self::scale(n, k)).collect(),
            }
        };

        Self { n, kernel }
    }

    /// Transform length
    pub fn len(&self) -> usize {
        self.n
    }

    fn scale(n: usize, k: usize) -> f64 {
        if k == 0 {
            (1.0 / n as f64).sqrt()
        } else {
            (2.0 / n as f64).sqrt()
        }
    }

    fn basis_table(n: usize) -> Vec<f64> {
        let mut basis = vec![0.0; n * n];
        for k in 0..n {
            let s = Self::scale(n, k);
            for i in 0..n {
                basis[k * n + i] = s * (PI / n as f64 * (i as f64 + 0.5) * k as f64).cos();
            }
        }
        basis
    }

    /// Forward DCT-II: N samples → N coefficients
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut output = vec![0.0; self.n];
        self.forward_into(input, &mut output);
        output
    }

    /// Inverse DCT (DCT-III): N coefficients → N samples
    pub fn inverse(&self, input: &[f64]) -> Vec<f64> {
        let mut output = vec![0.0; self.n];
        self.inverse_into(input, &mut output);
        output
    }

    /// Forward DCT-II into a caller-owned buffer
    pub fn forward_into(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        assert_eq!(input.len(), n, "input length does not match DCT plan");
        assert_eq!(output.len(), n, "output length does not match DCT plan");

        match &self.kernel {
            Kernel::Table { basis } => {
                for (k, out) in output.iter_mut().enumerate() {
                    let row = &basis[k * n..(k + 1) * n];
                    *out = row.iter().zip(input).map(|(b, x)| b * x).sum();
                }
            }
            Kernel::Fft {
                forward,
                twiddle,
                scale,
                ..
            } => {
                // Even samples ascending, odd samples descending
                let mut z = vec![Complex::new(0.0, 0.0); n];
                for (k, &x) in input.iter().step_by(2).enumerate() {
                    z[k].re = x;
                }
                for (k, &x) in input.iter().skip(1).step_by(2).enumerate() {
                    z[n - 1 - k].re = x;
                }

                forward.process(&mut z);

                for k in 0..n {
                    output[k] = (twiddle[k] * z[k]).re * scale[k];
                }
            }
        }
    }

    /// Inverse DCT (DCT-III) into a caller-owned buffer
    pub fn inverse_into(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        assert_eq!(input.len(), n, "input length does not match DCT plan");
        assert_eq!(output.len(), n, "output length does not match DCT plan");

        match &self.kernel {
            Kernel::Table { basis } => {
                output.fill(0.0);
                for (k, &coeff) in input.iter().enumerate() {
                    if coeff == 0.0 {
                        continue;
                    }
                    let row = &basis[k * n..(k + 1) * n];
                    for (out, b) in output.iter_mut().zip(row) {
                        *out += coeff * b;
                    }
                }
            }
            Kernel::Fft {
                inverse,
                twiddle,
                scale,
                ..
            } => {
                // V[k] = e^(iπk/2N) * (C[k] - i*C[N-k]) on unscaled coefficients
                let mut z: Vec<Complex<f64>> = (0..n)
                    .map(|k| {
                        let c = input[k] / scale[k];
                        let mirror = if k == 0 {
                            0.0
                        } else {
                            input[n - k] / scale[n - k]
                        };
                        twiddle[k].conj() * Complex::new(c, -mirror)
                    })
                    .collect();

                inverse.process(&mut z);

                let norm = 1.0 / n as f64;
                for (k, out) in output.iter_mut().step_by(2).enumerate() {
                    *out = z[k].re * norm;
                }
                for (k, out) in output.iter_mut().skip(1).step_by(2).enumerate() {
                    *out = z[n - 1 - k].re * norm;
                }
            }
        }
    }
}

/// One-shot forward DCT-II (orthonormal) of a whole vector
pub fn dct(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    Dct::new(input.len()).forward(input)
}

/// One-shot inverse DCT (orthonormal DCT-III) of a whole vector
pub fn idct(input: &[f64]) -> Vec<f64> {
    if input.is_empty() {
        return Vec::new();
    }
    Dct::new(input.len()).inverse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_rows_are_orthonormal() {
        let n = 8;
        let basis = Dct::basis_table(n);
        for a in 0..n {
            for b in 0..n {
                let dot: f64 = (0..n).map(|i| basis[a * n + i] * basis[b * n + i]).sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!((dot - expected).abs() < 1e-12, "rows {} and {}: {}", a, b, dot);
            }
        }
    }

    #[test]
    fn test_fft_kernel_selected_above_table_limit() {
        assert!(matches!(Dct::new(TABLE_MAX_LEN).kernel, Kernel::Table { .. }));
        assert!(matches!(Dct::new(TABLE_MAX_LEN + 1).kernel, Kernel::Fft { .. }));
    }
}
