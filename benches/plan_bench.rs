// Benchmark for DMP learning and plan generation performance
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use dmp_motion::{
    CouplingCoefficients, Obstacle, PlanRequest, Trajectory, TrajectoryPoint, generate_plan,
    learn_from_demo,
};

fn demo_3d(n: usize) -> Trajectory {
    let times: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64 * 2.0).collect();
    let points = times
        .iter()
        .map(|&t| TrajectoryPoint {
            positions: vec![(t * 0.8).sin(), t * 0.5, (t * 1.3).cos() - 1.0],
            velocities: vec![],
        })
        .collect();
    Trajectory::new(points, times)
}

fn request(obstacle: Option<Obstacle>) -> PlanRequest {
    PlanRequest {
        x0: vec![0.0, 0.0, 0.0],
        xdot0: vec![0.0; 3],
        t0: 0.0,
        goal: vec![1.0, 1.0, -0.5],
        goal_thresh: vec![0.01; 3],
        seg_length: -1.0,
        tau: 2.0,
        dt: 0.01,
        integrate_iter: 10,
        obstacle,
        coupling: CouplingCoefficients {
            beta: vec![2.0, 2.0],
            gamma: vec![20.0, 10.0, 1.0],
            k: vec![1.0, 1.0, 1.0],
            scale_m: 1.0,
            scale_n: 0.5,
        },
    }
}

fn bench_learn(c: &mut Criterion) {
    let demo = demo_3d(500);
    c.bench_function("learn 3-dim 500-sample demo, 10 bases", |b| {
        b.iter(|| {
            let learned = learn_from_demo(&demo, &[100.0; 3], &[20.0; 3], 10).unwrap();
            assert_eq!(learned.dims(), 3);
        });
    });
}

fn bench_plan(c: &mut Criterion) {
    let demo = demo_3d(500);
    let learned = learn_from_demo(&demo, &[100.0; 3], &[20.0; 3], 10).unwrap();
    let req = request(None);
    c.bench_function("plan 3-dim, dt=0.01, 10 substeps", |b| {
        b.iter(|| {
            let plan = generate_plan(&learned.dmps, &req);
            assert!(!plan.trajectory.is_empty());
        });
    });
}

fn bench_plan_with_obstacle(c: &mut Criterion) {
    let demo = demo_3d(500);
    let learned = learn_from_demo(&demo, &[100.0; 3], &[20.0; 3], 10).unwrap();
    let vertices: Vec<[f64; 3]> = (0..64)
        .map(|i| {
            let a = i as f64 * 0.1;
            [0.5 + 0.2 * a.cos(), 0.5 + 0.2 * a.sin(), 0.2]
        })
        .collect();
    let req = request(Some(Obstacle::Vertices(vertices)));
    c.bench_function("plan 3-dim around 64-vertex obstacle", |b| {
        b.iter(|| {
            let plan = generate_plan(&learned.dmps, &req);
            assert!(!plan.trajectory.is_empty());
        });
    });
}

criterion_group!(benches, bench_learn, bench_plan, bench_plan_with_obstacle);
criterion_main!(benches);
