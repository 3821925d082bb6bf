// src/learn.rs - Learn a multi-dimensional DMP from a single demonstration
use serde::{Deserialize, Serialize};

use crate::approx::FunctionApprox;
use crate::error::{DmpError, Result};
use crate::phase::phase;
use crate::trajectory::Trajectory;

/// Lower bound on the phase divisor used when un-scaling forcing targets.
/// Within the demonstration window the phase never drops below 0.01, so this
/// only bites if a demo carries timestamps past its own final sample.
const PHASE_FLOOR: f64 = 1e-10;

/// Learned parameters for one dimension of a DMP.
///
/// Immutable once created. The fitted domain/target samples are retained for
/// introspection; replay only needs the weights and gains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmpParameters {
    /// Proportional gain of the spring-damper system.
    pub k_gain: f64,

    /// Derivative gain of the spring-damper system.
    pub d_gain: f64,

    /// Fourier weights of the forcing term, over scaled time in `[0, 1]`.
    pub weights: Vec<f64>,

    /// Domain samples (scaled time) the weights were fit against.
    pub f_domain: Vec<f64>,

    /// Forcing-term target samples the weights were fit against.
    pub f_targets: Vec<f64>,
}

/// Result of learning: one parameter set per dimension plus the shared time
/// scale, all linked by a single canonical phase system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedDmp {
    pub dmps: Vec<DmpParameters>,
    /// Timestamp of the demonstration's last sample.
    pub tau: f64,
}

impl LearnedDmp {
    pub fn dims(&self) -> usize {
        self.dmps.len()
    }
}

/// Learn a multi-dimensional DMP from one demonstrated trajectory.
///
/// Each dimension is fit independently against the shared phase system:
/// velocities and accelerations come from finite differences (piecewise
/// constant acceleration, `v[0] = a[0] = 0`), the forcing target inverts the
/// spring-damper dynamics at each sample, and a Fourier approximator of order
/// `num_bases` is fit over scaled time `t / tau`. Scaled time is used for the
/// fit domain instead of the phase itself because the phase compresses late
/// samples exponentially.
///
/// The raw target is divided by the phase at each sample (the generator
/// multiplies the approximator output by the phase, so the fit must undo
/// that). The divisor is clamped to a small floor; see `PHASE_FLOOR`.
pub fn learn_from_demo(
    demo: &Trajectory,
    k_gains: &[f64],
    d_gains: &[f64],
    num_bases: usize,
) -> Result<LearnedDmp> {
    let n_pts = demo.len();
    if n_pts < 1 {
        return Err(DmpError::EmptyDemonstration);
    }
    let dims = demo.dims();
    if k_gains.len() != dims {
        return Err(DmpError::dimension_mismatch(dims, k_gains.len(), "k_gains"));
    }
    if d_gains.len() != dims {
        return Err(DmpError::dimension_mismatch(dims, d_gains.len(), "d_gains"));
    }

    let tau = demo.times[n_pts - 1];
    let mut dmps = Vec::with_capacity(dims);

    // Per-dimension scratch, allocated once and reused.
    let mut x_demo = vec![0.0; n_pts];
    let mut v_demo = vec![0.0; n_pts];
    let mut v_dot_demo = vec![0.0; n_pts];
    let mut f_domain = vec![0.0; n_pts];
    let mut f_targets = vec![0.0; n_pts];

    for d in 0..dims {
        let curr_k = k_gains[d];
        let curr_d = d_gains[d];
        let x_0 = demo.points[0].positions[d];
        let goal = demo.points[n_pts - 1].positions[d];

        x_demo[0] = x_0;
        v_demo[0] = 0.0;
        v_dot_demo[0] = 0.0;

        // Finite-difference velocity and acceleration, assuming constant
        // acceleration across each sample interval.
        for i in 1..n_pts {
            x_demo[i] = demo.points[i].positions[d];
            let dx = x_demo[i] - x_demo[i - 1];
            let dt = demo.times[i] - demo.times[i - 1];
            v_demo[i] = dx / dt;
            v_dot_demo[i] = (v_demo[i] - v_demo[i - 1]) / dt;
        }

        // Invert the transformation system at every sample to get the forcing
        // targets the approximator must reproduce.
        for i in 0..n_pts {
            let s = phase(demo.times[i], tau);
            f_domain[i] = demo.times[i] / tau;
            let raw = ((tau * tau * v_dot_demo[i] + curr_d * tau * v_demo[i]) / curr_k)
                - (goal - x_demo[i])
                + (goal - x_0) * s;
            // The generator scales the approximator output by the phase, so
            // divide it back out here rather than at evaluation time.
            f_targets[i] = raw / s.max(PHASE_FLOOR);
        }

        let approx = FunctionApprox::fit_fourier(num_bases, &f_domain, &f_targets);

        dmps.push(DmpParameters {
            k_gain: curr_k,
            d_gain: curr_d,
            weights: approx.weights().to_vec(),
            f_domain: f_domain.clone(),
            f_targets: f_targets.clone(),
        });
    }

    tracing::debug!(dims, tau, num_bases, "learned DMP from demonstration");

    Ok(LearnedDmp { dmps, tau })
}
