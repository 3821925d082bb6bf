// src/main.rs - dmp-planner: learn a DMP from a demo file and plan with it
use clap::Parser;

use dmp_motion::config::{Config, load_config};
use dmp_motion::error::{DmpError, Result};
use dmp_motion::obstacle::{CouplingCoefficients, Obstacle};
use dmp_motion::planner::PlanRequest;
use dmp_motion::service::DmpService;
use dmp_motion::trajectory::Trajectory;

/// Learn a Dynamic Movement Primitive from a demonstrated trajectory and
/// generate a goal-directed plan from it.
#[derive(Debug, Parser)]
#[command(name = "dmp-planner", version)]
struct Args {
    /// Planner configuration (TOML).
    #[arg(short, long, default_value = "planner.toml")]
    config: String,

    /// Demonstrated trajectory (JSON).
    #[arg(short, long)]
    demo: String,

    /// Where to write the generated plan (JSON).
    #[arg(short, long, default_value = "plan.json")]
    output: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    tracing::info!("Loading configuration from: {}", args.config);
    let config = match load_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            Config::default()
        }
    };

    tracing::info!("Loading demonstration from: {}", args.demo);
    let demo: Trajectory = serde_json::from_str(&std::fs::read_to_string(&args.demo)?)?;
    if !demo.is_well_formed() {
        return Err(DmpError::config(format!(
            "demonstration in {} is malformed (ragged dimensions or non-increasing times)",
            args.demo
        )));
    }
    tracing::info!(
        "Demonstration: {} samples, {} dimensions, {:.3} s",
        demo.len(),
        demo.dims(),
        demo.times.last().copied().unwrap_or(0.0)
    );

    let service = DmpService::new();
    let learned = service.learn(
        &demo,
        &config.gains.k,
        &config.gains.d,
        config.gains.num_bases,
    )?;
    let learned_tau = learned.tau;
    service.set_active(learned.dmps);

    let request = build_request(&config, &demo, learned_tau)?;
    tracing::info!(
        "Planning: tau={:.3} dt={} seg_length={}",
        request.tau,
        request.dt,
        request.seg_length
    );

    let plan = service.plan(&request)?;
    tracing::info!(
        "Plan: {} waypoints over {:.3} s, at_goal={}",
        plan.trajectory.len(),
        plan.duration(),
        plan.at_goal
    );

    std::fs::write(&args.output, serde_json::to_string_pretty(&plan)?)?;
    tracing::info!("Plan written to: {}", args.output);
    Ok(())
}

/// Assemble the plan request from the config, falling back to the demo's own
/// goal and time scale where the config leaves them unset.
fn build_request(config: &Config, demo: &Trajectory, learned_tau: f64) -> Result<PlanRequest> {
    let dims = demo.dims();

    let goal = if config.plan.goal.is_empty() {
        demo.points
            .last()
            .map(|p| p.positions.clone())
            .unwrap_or_default()
    } else {
        config.plan.goal.clone()
    };

    let goal_thresh = if config.plan.goal_thresh.is_empty() {
        vec![config.plan.default_goal_thresh; dims]
    } else {
        config.plan.goal_thresh.clone()
    };

    let x0 = demo
        .points
        .first()
        .map(|p| p.positions.clone())
        .unwrap_or_default();

    Ok(PlanRequest {
        x0,
        xdot0: vec![0.0; dims],
        t0: config.plan.t0,
        goal,
        goal_thresh,
        seg_length: config.plan.seg_length,
        tau: if config.plan.tau > 0.0 {
            config.plan.tau
        } else {
            learned_tau
        },
        dt: config.plan.dt,
        integrate_iter: config.plan.integrate_iter,
        obstacle: Obstacle::from_flat(&config.obstacle.points)?,
        coupling: CouplingCoefficients {
            beta: config.obstacle.beta.clone(),
            gamma: config.obstacle.gamma.clone(),
            k: config.obstacle.k.clone(),
            scale_m: config.obstacle.scale_m,
            scale_n: config.obstacle.scale_n,
        },
    })
}
