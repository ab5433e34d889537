/// Pivots smaller than this are treated as zero.
const TINY: f64 = 1e-30;

/// LU factorization of a small dense matrix with partial pivoting.
#[derive(Debug, Clone, Copy)]
pub(super) struct Lu<const N: usize> {
    factors: [[f64; N]; N],
    pivot: [usize; N],
}

impl<const N: usize> Lu<N> {
    /// Factors `a`, or returns `None` if it is singular or not finite.
    pub(super) fn factor(mut a: [[f64; N]; N]) -> Option<Self> {
        let mut pivot: [usize; N] = std::array::from_fn(|i| i);

        for k in 0..N {
            let mut max_row = k;
            for i in (k + 1)..N {
                if a[i][k].abs() > a[max_row][k].abs() {
                    max_row = i;
                }
            }
            let max_val = a[max_row][k].abs();
            if max_val.is_nan() || max_val < TINY {
                return None;
            }
            if max_row != k {
                a.swap(k, max_row);
                pivot.swap(k, max_row);
            }

            let akk = a[k][k];
            for i in (k + 1)..N {
                a[i][k] /= akk;
                let lik = a[i][k];
                for j in (k + 1)..N {
                    a[i][j] -= lik * a[k][j];
                }
            }
        }

        Some(Self { factors: a, pivot })
    }

    /// Solves `A x = b` using the factorization.
    pub(super) fn solve(&self, b: &[f64; N]) -> [f64; N] {
        let a = &self.factors;
        let mut x: [f64; N] = std::array::from_fn(|i| b[self.pivot[i]]);

        for i in 0..N {
            for j in 0..i {
                x[i] -= a[i][j] * x[j];
            }
        }
        for i in (0..N).rev() {
            for j in (i + 1)..N {
                x[i] -= a[i][j] * x[j];
            }
            x[i] /= a[i][i];
        }

        x
    }
}
