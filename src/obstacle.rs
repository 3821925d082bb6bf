// src/obstacle.rs - Artificial-potential-field coupling for obstacle avoidance
use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{DmpError, Result};

/// Additive guard against zero-length vectors in angle denominators.
const EPSILON: f64 = 1e-10;

/// An obstacle the planner should bias trajectories away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    /// A single 3-d point.
    Point([f64; 3]),

    /// An ordered set of 3-d vertices outlining a point cloud or polytope
    /// boundary. At least two vertices.
    Vertices(Vec<[f64; 3]>),
}

impl Obstacle {
    /// Interpret a flat value list: exactly 3 values form a single point, a
    /// larger multiple of 3 is grouped into vertices, an empty list means no
    /// obstacle. Any other length is malformed.
    pub fn from_flat(values: &[f64]) -> Result<Option<Self>> {
        match values.len() {
            0 => Ok(None),
            3 => Ok(Some(Self::Point([values[0], values[1], values[2]]))),
            n if n % 3 == 0 => Ok(Some(Self::Vertices(
                values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
            ))),
            n => Err(DmpError::MalformedObstacle(n)),
        }
    }
}

/// Coefficients shaping the potential field.
///
/// `beta` weights the angular decay, `gamma` the field amplitude, and `k` the
/// distance decay; each vector is right-padded with zeros to the length the
/// obstacle shape requires. `scale_m` / `scale_n` control how the summed
/// vertex-set coupling grows with the obstacle's bounding box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouplingCoefficients {
    #[serde(default)]
    pub beta: Vec<f64>,
    #[serde(default)]
    pub gamma: Vec<f64>,
    #[serde(default)]
    pub k: Vec<f64>,
    #[serde(default)]
    pub scale_m: f64,
    #[serde(default)]
    pub scale_n: f64,
}

fn padded(values: &[f64], len: usize) -> Vec<f64> {
    let mut out = values.to_vec();
    out.resize(len.max(out.len()), 0.0);
    out
}

/// Rotation by `angle` about the direction of `axis`, or the identity when
/// the axis is numerically zero (the angle is zero in exactly that case).
fn rotation_about(axis: Vector3<f64>, angle: f64) -> Rotation3<f64> {
    match Unit::try_new(axis, EPSILON) {
        Some(unit) => Rotation3::from_axis_angle(&unit, angle),
        None => Rotation3::identity(),
    }
}

/// Compute the coupling acceleration steering the state `x` (moving at `v`)
/// around `obstacle`.
///
/// The field rotates the velocity away from the obstacle direction, with
/// influence decaying exponentially in both the approach angle and the
/// obstacle distance. Always returns a 3-vector; callers planning in 6
/// dimensions zero-pad the tail.
pub fn potential_field_coupling(
    x: [f64; 3],
    v: [f64; 3],
    obstacle: &Obstacle,
    coeffs: &CouplingCoefficients,
) -> [f64; 3] {
    let x_v = Vector3::from(x);
    let v_v = Vector3::from(v);

    let ct = match obstacle {
        Obstacle::Point(o) => {
            let beta = padded(&coeffs.beta, 1);
            let gamma = padded(&coeffs.gamma, 1);
            let k = padded(&coeffs.k, 1);
            point_coupling(x_v, v_v, Vector3::from(*o), beta[0], gamma[0], k[0]).1
        }
        Obstacle::Vertices(vertices) => {
            let beta = padded(&coeffs.beta, 2);
            let gamma = padded(&coeffs.gamma, 3);
            let k = padded(&coeffs.k, 3);

            let extents = bounding_box_extents(vertices);
            let centroid = centroid(vertices);
            let nearest = nearest_vertex(vertices, x_v);

            // Centroid-direction coupling defines the rotation used by every
            // contribution.
            let (rot, mut sum) = point_coupling(x_v, v_v, centroid, beta[0], gamma[0], k[0]);

            // Nearest-vertex angular term, reusing the centroid rotation (the
            // nearest-vertex direction is taken as colinear with it).
            let np_diff = nearest - x_v;
            let theta_p = (np_diff.dot(&v_v) / (np_diff.norm() * v_v.norm() + EPSILON)).acos();
            sum += gamma[1]
                * (rot * v_v)
                * theta_p
                * (-beta[1] * theta_p).exp()
                * (-k[1] * np_diff.norm()).exp();

            // Distance-only term, no angular factor.
            sum += gamma[2] * (rot * v_v) * (-k[2] * np_diff.norm()).exp();

            // Bounding-box scale; the z slot reuses the y extent (see
            // DESIGN.md, kept verbatim).
            let scale = Vector3::new(
                coeffs.scale_n + coeffs.scale_m * extents.x,
                coeffs.scale_n + coeffs.scale_m * extents.y,
                coeffs.scale_n + coeffs.scale_m * extents.y,
            );
            sum.component_mul(&scale)
        }
    };

    [ct.x, ct.y, ct.z]
}

/// Single-point field: returns the rotation it derived along with the
/// coupling vector so vertex-set obstacles can reuse the rotation.
fn point_coupling(
    x: Vector3<f64>,
    v: Vector3<f64>,
    o: Vector3<f64>,
    beta: f64,
    gamma: f64,
    k: f64,
) -> (Rotation3<f64>, Vector3<f64>) {
    let diff = o - x;
    let cross = diff.cross(&v);
    let r = 0.5 * std::f64::consts::PI * cross.norm();
    let rot = rotation_about(cross, r);
    let theta = (diff.dot(&v) / (diff.norm() * v.norm() + EPSILON)).acos();
    let ct = gamma * (rot * v) * theta * (-beta * theta).exp() * (-k * diff.norm()).exp();
    (rot, ct)
}

/// Axis-aligned bounding-box extents of a vertex set.
fn bounding_box_extents(vertices: &[[f64; 3]]) -> Vector3<f64> {
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for v in vertices {
        for i in 0..3 {
            min[i] = min[i].min(v[i]);
            max[i] = max[i].max(v[i]);
        }
    }
    Vector3::new(max[0] - min[0], max[1] - min[1], max[2] - min[2])
}

fn centroid(vertices: &[[f64; 3]]) -> Vector3<f64> {
    let mut c = Vector3::zeros();
    for v in vertices {
        c += Vector3::from(*v);
    }
    c / vertices.len() as f64
}

fn nearest_vertex(vertices: &[[f64; 3]], x: Vector3<f64>) -> Vector3<f64> {
    let mut best = Vector3::from(vertices[0]);
    let mut best_dist = (best - x).norm();
    for v in &vertices[1..] {
        let candidate = Vector3::from(*v);
        let dist = (candidate - x).norm();
        if dist < best_dist {
            best_dist = dist;
            best = candidate;
        }
    }
    best
}
