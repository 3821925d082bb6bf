// src/planner.rs - Integrate a learned DMP forward in time toward a goal
use serde::{Deserialize, Serialize};

use crate::approx::FunctionApprox;
use crate::learn::DmpParameters;
use crate::obstacle::{CouplingCoefficients, Obstacle, potential_field_coupling};
use crate::phase::phase;
use crate::trajectory::{GeneratedPlan, Trajectory, TrajectoryPoint};

/// Hard cap on plan duration in seconds, in case overshoot or oscillation
/// keeps the state outside the goal thresholds indefinitely.
pub const MAX_PLAN_SECONDS: f64 = 1000.0;

/// Everything a single planning call needs besides the active DMP set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Starting position per dimension.
    pub x0: Vec<f64>,

    /// Starting instantaneous change in state per dimension.
    pub xdot0: Vec<f64>,

    /// Time offset in seconds at which the planned segment begins. Nonzero
    /// only for partial-segment plans that do not start at the beginning of
    /// the DMP.
    #[serde(default)]
    pub t0: f64,

    /// Goal position per dimension.
    pub goal: Vec<f64>,

    /// Convergence tolerance per dimension; entries <= 0 are not checked.
    pub goal_thresh: Vec<f64>,

    /// Length of the requested plan segment in seconds; <= 0 plans until the
    /// goal is reached.
    #[serde(default = "default_seg_length")]
    pub seg_length: f64,

    /// Time scaling constant: the desired length of the total DMP execution
    /// (not just this segment) in seconds.
    pub tau: f64,

    /// Time resolution of the emitted plan in seconds.
    pub dt: f64,

    /// Forward-Euler substeps per emitted waypoint.
    pub integrate_iter: usize,

    /// Obstacle to bias away from, if any.
    #[serde(default)]
    pub obstacle: Option<Obstacle>,

    /// Potential-field coefficients; all-zero by default.
    #[serde(default)]
    pub coupling: CouplingCoefficients,
}

fn default_seg_length() -> f64 {
    -1.0
}

/// Generate a plan from the given DMP set.
///
/// Plans for at least `tau - t0` seconds, then continues until every
/// dimension with a positive threshold is within it of the goal (`at_goal`),
/// until `MAX_PLAN_SECONDS` elapses, or until the requested segment length is
/// filled. Waypoint velocities are reported in physical units (`v / tau`).
///
/// The obstacle coupling is evaluated once per macro step from the previous
/// waypoint (the start state on the first step) and shared by all dimensions;
/// it applies only when the set has exactly 3 or 6 dimensions, and in the
/// 6-d case only the first three dimensions are coupled.
///
/// Deterministic: the same inputs always produce the same plan.
pub fn generate_plan(dmps: &[DmpParameters], req: &PlanRequest) -> GeneratedPlan {
    let dims = dmps.len();
    let integrate_iter = req.integrate_iter.max(1);
    let substep = req.dt / integrate_iter as f64;

    // One evaluator per dimension, rebuilt from the stored weights.
    let approxes: Vec<FunctionApprox> = dmps
        .iter()
        .map(|d| FunctionApprox::from_fourier_weights(d.weights.clone()))
        .collect();

    let mut x_vecs: Vec<Vec<f64>> = vec![Vec::new(); dims];
    let mut x_dot_vecs: Vec<Vec<f64>> = vec![Vec::new(); dims];
    let mut t_vec: Vec<f64> = Vec::new();

    let mut t = 0.0;
    let mut n_pts = 0usize;
    let mut at_goal = false;

    // Plan for at least tau seconds, then until goal_thresh is satisfied,
    // cutting off at the duration cap or at the end of a bounded segment.
    while (t + req.t0) < req.tau || (!at_goal && t < MAX_PLAN_SECONDS) {
        if req.seg_length > 0.0 && t + req.dt > req.seg_length {
            break;
        }

        // Potential-field coupling, computed once per macro step.
        let mut ct = vec![0.0; dims];
        if let Some(obstacle) = &req.obstacle {
            if dims == 3 || dims == 6 {
                let (x_avd, v_avd) = if n_pts == 0 {
                    (
                        [req.x0[0], req.x0[1], req.x0[2]],
                        [req.xdot0[0], req.xdot0[1], req.xdot0[2]],
                    )
                } else {
                    (
                        [x_vecs[0][n_pts - 1], x_vecs[1][n_pts - 1], x_vecs[2][n_pts - 1]],
                        [
                            x_dot_vecs[0][n_pts - 1] * req.tau,
                            x_dot_vecs[1][n_pts - 1] * req.tau,
                            x_dot_vecs[2][n_pts - 1] * req.tau,
                        ],
                    )
                };
                let coupled = potential_field_coupling(x_avd, v_avd, obstacle, &req.coupling);
                ct[..3].copy_from_slice(&coupled);
            }
        }

        // Plan in each dimension.
        for i in 0..dims {
            let (mut x, mut v) = if n_pts == 0 {
                (req.x0[i], req.xdot0[i])
            } else {
                (x_vecs[i][n_pts - 1], x_dot_vecs[i][n_pts - 1] * req.tau)
            };

            for iter in 0..integrate_iter {
                let s = phase((t + req.t0) + substep * iter as f64, req.tau);

                // The approximator is exhausted past the learned horizon.
                let scaled_time = (t + req.t0) / req.tau;
                let f_eval = if scaled_time >= 1.0 {
                    0.0
                } else {
                    approxes[i].eval_at(scaled_time) * s
                };

                let v_dot = (dmps[i].k_gain
                    * ((req.goal[i] - x) - (req.goal[i] - req.x0[i]) * s + f_eval)
                    - dmps[i].d_gain * v
                    + ct[i])
                    / req.tau;
                let x_dot = v / req.tau;

                v += v_dot * substep;
                x += x_dot * substep;
            }

            x_vecs[i].push(x);
            x_dot_vecs[i].push(v / req.tau);
        }

        t += req.dt;
        t_vec.push(t);
        n_pts += 1;

        // Once past the minimum length, check goal convergence.
        if (t + req.t0) >= req.tau {
            at_goal = true;
            for i in 0..dims {
                if req.goal_thresh[i] > 0.0
                    && (x_vecs[i][n_pts - 1] - req.goal[i]).abs() > req.goal_thresh[i]
                {
                    at_goal = false;
                }
            }
        }
    }

    let points = (0..n_pts)
        .map(|j| TrajectoryPoint {
            positions: (0..dims).map(|i| x_vecs[i][j]).collect(),
            velocities: (0..dims).map(|i| x_dot_vecs[i][j]).collect(),
        })
        .collect();

    tracing::debug!(
        dims,
        steps = n_pts,
        duration = t_vec.last().copied().unwrap_or(0.0),
        at_goal,
        "generated plan"
    );

    GeneratedPlan {
        trajectory: Trajectory::new(points, t_vec),
        at_goal,
    }
}
