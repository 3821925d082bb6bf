// src/trajectory.rs - Trajectory and plan data model
use serde::{Deserialize, Serialize};

/// One sample of an n-dimensional trajectory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Position per dimension.
    pub positions: Vec<f64>,

    /// Velocity per dimension (physical units, may be empty on demo input).
    #[serde(default)]
    pub velocities: Vec<f64>,
}

/// An n-dimensional trajectory: points paired with a parallel time sequence.
///
/// Times are seconds from the start of the motion and must be strictly
/// increasing; every point carries the same number of dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    pub times: Vec<f64>,
}

impl Trajectory {
    pub fn new(points: Vec<TrajectoryPoint>, times: Vec<f64>) -> Self {
        Self { points, times }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension count, taken from the first sample (0 when empty).
    pub fn dims(&self) -> usize {
        self.points.first().map_or(0, |p| p.positions.len())
    }

    /// Check the structural invariants: parallel times, strictly increasing
    /// timestamps, constant dimension count.
    pub fn is_well_formed(&self) -> bool {
        if self.points.len() != self.times.len() {
            return false;
        }
        if self.times.windows(2).any(|w| w[1] <= w[0]) {
            return false;
        }
        let dims = self.dims();
        self.points.iter().all(|p| p.positions.len() == dims)
    }
}

/// Output of the trajectory generator: the planned waypoints plus whether the
/// plan ended within the goal thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub trajectory: Trajectory,
    pub at_goal: bool,
}

impl GeneratedPlan {
    /// Duration of the plan in seconds (0 for an empty plan).
    pub fn duration(&self) -> f64 {
        self.trajectory.times.last().copied().unwrap_or(0.0)
    }
}
