// src/lib.rs - Dynamic Movement Primitive learning and planning

//! Learn a compact, replayable representation of a demonstrated motion (a
//! Dynamic Movement Primitive) and generate new goal-directed trajectories
//! from it, optionally biased away from obstacles.
//!
//! A DMP models each dimension of a demonstration as a goal-attracting
//! spring-damper system plus a learned nonlinear forcing term, all
//! synchronized by one exponentially decaying phase signal. Learning fits the
//! forcing term by least squares over a Fourier basis; planning integrates
//! the differential equations forward toward an arbitrary goal and time
//! scale, adding an artificial-potential-field coupling when an obstacle is
//! present.
//!
//! # Quick start
//!
//! ```
//! use dmp_motion::{DmpService, PlanRequest, Trajectory, TrajectoryPoint};
//!
//! let demo = Trajectory::new(
//!     vec![
//!         TrajectoryPoint { positions: vec![0.0], velocities: vec![] },
//!         TrajectoryPoint { positions: vec![0.5], velocities: vec![] },
//!         TrajectoryPoint { positions: vec![1.0], velocities: vec![] },
//!     ],
//!     vec![0.0, 0.5, 1.0],
//! );
//!
//! let service = DmpService::new();
//! let learned = service.learn(&demo, &[25.0], &[10.0], 2)?;
//! let tau = learned.tau;
//! service.set_active(learned.dmps);
//!
//! let plan = service.plan(&PlanRequest {
//!     x0: vec![0.0],
//!     xdot0: vec![0.0],
//!     t0: 0.0,
//!     goal: vec![1.0],
//!     goal_thresh: vec![0.01],
//!     seg_length: -1.0,
//!     tau,
//!     dt: 0.01,
//!     integrate_iter: 10,
//!     obstacle: None,
//!     coupling: Default::default(),
//! })?;
//! assert!(plan.at_goal);
//! # Ok::<(), dmp_motion::DmpError>(())
//! ```

pub mod approx;
pub mod config;
pub mod error;
pub mod learn;
pub mod obstacle;
pub mod phase;
pub mod planner;
pub mod service;
pub mod trajectory;

pub use approx::{FourierApprox, FunctionApprox};
pub use config::{Config, load_config};
pub use error::{DmpError, Result};
pub use learn::{DmpParameters, LearnedDmp, learn_from_demo};
pub use obstacle::{CouplingCoefficients, Obstacle, potential_field_coupling};
pub use phase::phase;
pub use planner::{MAX_PLAN_SECONDS, PlanRequest, generate_plan};
pub use service::{ActiveDmpSet, DmpService};
pub use trajectory::{GeneratedPlan, Trajectory, TrajectoryPoint};
