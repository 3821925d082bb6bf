// src/approx/mod.rs - Function approximators for the DMP forcing term

mod fourier;

pub use fourier::FourierApprox;

/// A 1-D function approximator over scaled time.
///
/// Modeled as a tagged enum rather than a trait object: the planner calls
/// `eval_at` once per substep per dimension, and a closed set of variants
/// keeps that call statically dispatched. Only the Fourier basis is
/// implemented today; new basis types slot in as further variants.
#[derive(Debug, Clone)]
pub enum FunctionApprox {
    Fourier(FourierApprox),
}

impl FunctionApprox {
    /// Fit a Fourier approximator of the given order to `(domain, targets)`
    /// samples. The domain is nominally `[0, 1]` (scaled time).
    pub fn fit_fourier(num_bases: usize, domain: &[f64], targets: &[f64]) -> Self {
        Self::Fourier(FourierApprox::fit(num_bases, domain, targets))
    }

    /// Rebuild an approximator from previously fitted weights, without
    /// refitting. Used when generating plans from a stored DMP set.
    pub fn from_fourier_weights(weights: Vec<f64>) -> Self {
        Self::Fourier(FourierApprox::from_weights(weights))
    }

    /// Evaluate the weighted basis sum at `s`. Values outside the training
    /// domain extrapolate rather than fail.
    pub fn eval_at(&self, s: f64) -> f64 {
        match self {
            Self::Fourier(f) => f.eval_at(s),
        }
    }

    /// The fitted weight vector.
    pub fn weights(&self) -> &[f64] {
        match self {
            Self::Fourier(f) => f.weights(),
        }
    }
}
