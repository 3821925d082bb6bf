// src/service.rs - Shared active DMP set and the learn/set_active/plan surface
use std::sync::{Arc, RwLock};

use crate::error::{DmpError, Result};
use crate::learn::{DmpParameters, LearnedDmp, learn_from_demo};
use crate::planner::{PlanRequest, generate_plan};
use crate::trajectory::{GeneratedPlan, Trajectory};

/// A versioned, immutable snapshot of the DMP set plans are generated from.
///
/// Replaced as a whole by `DmpService::set_active`; never mutated in place.
#[derive(Debug, Default)]
pub struct ActiveDmpSet {
    pub dmps: Vec<DmpParameters>,
    /// Monotonically increasing activation counter, 0 while nothing has been
    /// activated yet.
    pub version: u64,
}

impl ActiveDmpSet {
    pub fn dims(&self) -> usize {
        self.dmps.len()
    }
}

/// The operation surface the surrounding service layer calls into.
///
/// Learning and planning are pure computations; the only shared state is the
/// active set, held as an `Arc` snapshot behind an `RwLock`. A planning call
/// clones the `Arc` once and works against that snapshot for its entire
/// duration, so replacing the set mid-plan never exposes a partial update,
/// and any number of plans can run concurrently against the same snapshot.
#[derive(Debug, Default)]
pub struct DmpService {
    active: RwLock<Arc<ActiveDmpSet>>,
}

impl DmpService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn a DMP from a demonstration. Does not activate the result.
    pub fn learn(
        &self,
        demo: &Trajectory,
        k_gains: &[f64],
        d_gains: &[f64],
        num_bases: usize,
    ) -> Result<LearnedDmp> {
        learn_from_demo(demo, k_gains, d_gains, num_bases)
    }

    /// Atomically replace the active DMP set. Returns the new version.
    pub fn set_active(&self, dmps: Vec<DmpParameters>) -> u64 {
        let mut guard = self.active.write().expect("active set lock poisoned");
        let version = guard.version + 1;
        tracing::info!(dims = dmps.len(), version, "activating DMP set");
        *guard = Arc::new(ActiveDmpSet { dmps, version });
        version
    }

    /// The current snapshot. Callers hold a consistent view for as long as
    /// they keep the `Arc`.
    pub fn active(&self) -> Arc<ActiveDmpSet> {
        self.active.read().expect("active set lock poisoned").clone()
    }

    /// Plan against the current active set.
    pub fn plan(&self, req: &PlanRequest) -> Result<GeneratedPlan> {
        let snapshot = self.active();
        if snapshot.dmps.is_empty() {
            return Err(DmpError::NoActiveDmp);
        }
        validate_request(&snapshot, req)?;
        Ok(generate_plan(&snapshot.dmps, req))
    }
}

fn validate_request(set: &ActiveDmpSet, req: &PlanRequest) -> Result<()> {
    let dims = set.dims();
    let check = |len: usize, context: &'static str| -> Result<()> {
        if len != dims {
            return Err(DmpError::dimension_mismatch(dims, len, context));
        }
        Ok(())
    };
    check(req.x0.len(), "x0")?;
    check(req.xdot0.len(), "xdot0")?;
    check(req.goal.len(), "goal")?;
    check(req.goal_thresh.len(), "goal_thresh")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TrajectoryPoint;

    fn ramp_demo() -> Trajectory {
        Trajectory::new(
            vec![
                TrajectoryPoint {
                    positions: vec![0.0],
                    velocities: vec![],
                },
                TrajectoryPoint {
                    positions: vec![0.5],
                    velocities: vec![],
                },
                TrajectoryPoint {
                    positions: vec![1.0],
                    velocities: vec![],
                },
            ],
            vec![0.0, 0.5, 1.0],
        )
    }

    fn ramp_request() -> PlanRequest {
        PlanRequest {
            x0: vec![0.0],
            xdot0: vec![0.0],
            t0: 0.0,
            goal: vec![1.0],
            goal_thresh: vec![0.01],
            seg_length: -1.0,
            tau: 1.0,
            dt: 0.01,
            integrate_iter: 10,
            obstacle: None,
            coupling: Default::default(),
        }
    }

    #[test]
    fn test_plan_without_active_set_fails() {
        let service = DmpService::new();
        let err = service.plan(&ramp_request()).unwrap_err();
        assert!(matches!(err, DmpError::NoActiveDmp));
    }

    #[test]
    fn test_learn_activate_plan() {
        let service = DmpService::new();
        let learned = service.learn(&ramp_demo(), &[25.0], &[10.0], 2).unwrap();
        assert_eq!(service.set_active(learned.dmps), 1);

        let plan = service.plan(&ramp_request()).unwrap();
        assert!(plan.at_goal);
    }

    #[test]
    fn test_version_increases_monotonically() {
        let service = DmpService::new();
        let learned = service.learn(&ramp_demo(), &[25.0], &[10.0], 2).unwrap();
        assert_eq!(service.active().version, 0);
        assert_eq!(service.set_active(learned.dmps.clone()), 1);
        assert_eq!(service.set_active(learned.dmps), 2);
        assert_eq!(service.active().version, 2);
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let service = DmpService::new();
        let learned = service.learn(&ramp_demo(), &[25.0], &[10.0], 2).unwrap();
        service.set_active(learned.dmps.clone());

        let snapshot = service.active();
        service.set_active(vec![]);

        // The held snapshot is unaffected by the swap.
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.dims(), 1);
        assert_eq!(service.active().version, 2);
        assert_eq!(service.active().dims(), 0);
    }

    #[test]
    fn test_mismatched_request_rejected() {
        let service = DmpService::new();
        let learned = service.learn(&ramp_demo(), &[25.0], &[10.0], 2).unwrap();
        service.set_active(learned.dmps);

        let mut req = ramp_request();
        req.goal = vec![1.0, 2.0];
        let err = service.plan(&req).unwrap_err();
        assert!(matches!(
            err,
            DmpError::DimensionMismatch { context: "goal", .. }
        ));
    }
}
