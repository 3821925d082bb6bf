// src/approx/fourier.rs - Fourier-basis least-squares approximator
use nalgebra::{DMatrix, DVector};

/// Ridge added to the normal equations so underdetermined fits stay solvable.
const RIDGE: f64 = 1e-8;

/// Weighted sum of cosine basis terms `cos(j * pi * s)` for `j = 0..N`.
///
/// The domain is scaled time in `[0, 1]`; the `j = 0` term is the constant 1,
/// so an order-1 approximator degenerates to a plain offset. Cosines are
/// defined on the whole real line, so evaluation outside `[0, 1]`
/// extrapolates smoothly instead of failing.
#[derive(Debug, Clone)]
pub struct FourierApprox {
    weights: Vec<f64>,
}

impl FourierApprox {
    /// Fit `num_bases` weights to the given samples by least squares.
    ///
    /// Solves the ridge-regularized normal equations with a Cholesky
    /// factorization, falling back to SVD if the Gram matrix is not positive
    /// definite. Fewer samples than bases is accepted: the ridge keeps the
    /// system solvable, but the surplus weights are underdetermined and the
    /// fit quality is the caller's responsibility.
    pub fn fit(num_bases: usize, domain: &[f64], targets: &[f64]) -> Self {
        debug_assert_eq!(domain.len(), targets.len());
        let n_samples = domain.len();
        if num_bases == 0 || n_samples == 0 {
            return Self {
                weights: vec![0.0; num_bases],
            };
        }

        let basis = DMatrix::from_fn(n_samples, num_bases, |i, j| basis_term(j, domain[i]));
        let y = DVector::from_column_slice(targets);

        let gram = basis.transpose() * &basis + DMatrix::identity(num_bases, num_bases) * RIDGE;
        let rhs = basis.transpose() * &y;

        let weights = match gram.clone().cholesky() {
            Some(chol) => chol.solve(&rhs),
            None => gram
                .svd(true, true)
                .solve(&rhs, RIDGE)
                .unwrap_or_else(|_| DVector::zeros(num_bases)),
        };

        Self {
            weights: weights.iter().copied().collect(),
        }
    }

    /// Rebuild an evaluator directly from stored weights.
    pub fn from_weights(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Evaluate the weighted basis sum at any real `s`.
    pub fn eval_at(&self, s: f64) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(j, w)| w * basis_term(j, s))
            .sum()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn num_bases(&self) -> usize {
        self.weights.len()
    }
}

fn basis_term(j: usize, s: f64) -> f64 {
    (j as f64 * std::f64::consts::PI * s).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_signal_exact() {
        let domain: Vec<f64> = (0..20).map(|i| i as f64 / 19.0).collect();
        let targets = vec![3.25; 20];
        let approx = FourierApprox::fit(1, &domain, &targets);
        assert!((approx.eval_at(0.5) - 3.25).abs() < 1e-6);
        // Order-1 fit is constant everywhere, including off-domain.
        assert!((approx.eval_at(2.0) - 3.25).abs() < 1e-6);
    }

    #[test]
    fn test_fits_cosine_component_exactly() {
        // Target lies in the span of the basis, so the residual should vanish.
        let domain: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
        let targets: Vec<f64> = domain
            .iter()
            .map(|&s| 0.7 + 2.0 * (std::f64::consts::PI * s).cos())
            .collect();
        let approx = FourierApprox::fit(3, &domain, &targets);
        for (&s, &t) in domain.iter().zip(targets.iter()) {
            assert!((approx.eval_at(s) - t).abs() < 1e-5);
        }
        assert!((approx.weights()[0] - 0.7).abs() < 1e-5);
        assert!((approx.weights()[1] - 2.0).abs() < 1e-5);
        assert!(approx.weights()[2].abs() < 1e-5);
    }

    #[test]
    fn test_residual_shrinks_with_order() {
        let domain: Vec<f64> = (0..200).map(|i| i as f64 / 199.0).collect();
        let targets: Vec<f64> = domain.iter().map(|&s| (s - 0.3) * (s - 0.8) * s).collect();

        let sse = |order: usize| -> f64 {
            let approx = FourierApprox::fit(order, &domain, &targets);
            domain
                .iter()
                .zip(targets.iter())
                .map(|(&s, &t)| (approx.eval_at(s) - t).powi(2))
                .sum()
        };

        assert!(sse(8) < sse(4));
        assert!(sse(4) < sse(2));
    }

    #[test]
    fn test_underdetermined_fit_is_accepted() {
        // 2 samples, 5 bases: must not panic and must still be evaluable.
        let approx = FourierApprox::fit(5, &[0.0, 1.0], &[1.0, -1.0]);
        assert_eq!(approx.num_bases(), 5);
        assert!(approx.eval_at(0.5).is_finite());
        assert!(approx.eval_at(7.3).is_finite());
    }

    #[test]
    fn test_extrapolation_is_finite() {
        let domain: Vec<f64> = (0..10).map(|i| i as f64 / 9.0).collect();
        let targets: Vec<f64> = domain.iter().map(|&s| s).collect();
        let approx = FourierApprox::fit(4, &domain, &targets);
        for s in [-5.0, -1.0, 1.5, 10.0, 1e3] {
            assert!(approx.eval_at(s).is_finite());
        }
    }
}
