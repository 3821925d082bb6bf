// src/config.rs - TOML configuration for the dmp-planner binary
use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::{DmpError, Result};

/// Top-level planner configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub gains: GainsConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub obstacle: ObstacleConfig,
}

/// Gains used when learning from the demonstration. The gain vectors must
/// match the demo's dimension count.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GainsConfig {
    #[serde(default = "default_k_gains")]
    pub k: Vec<f64>,

    #[serde(default = "default_d_gains")]
    pub d: Vec<f64>,

    /// Order of the Fourier approximation per dimension.
    #[serde(default = "default_num_bases")]
    pub num_bases: usize,
}

/// Planning parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlanConfig {
    /// Start time offset in seconds (nonzero for partial segments).
    #[serde(default)]
    pub t0: f64,

    /// Time scaling constant; 0 means "use the learned tau".
    #[serde(default)]
    pub tau: f64,

    /// Plan time resolution (seconds).
    #[serde(default = "default_dt")]
    pub dt: f64,

    /// Euler substeps per plan step.
    #[serde(default = "default_integrate_iter")]
    pub integrate_iter: usize,

    /// Segment length in seconds; <= 0 plans until the goal.
    #[serde(default = "default_seg_length")]
    pub seg_length: f64,

    /// Goal override; empty means "use the demo's final point".
    #[serde(default)]
    pub goal: Vec<f64>,

    /// Per-dimension goal threshold; empty means the default threshold in
    /// every dimension.
    #[serde(default)]
    pub goal_thresh: Vec<f64>,

    /// Threshold used when `goal_thresh` is empty.
    #[serde(default = "default_goal_thresh")]
    pub default_goal_thresh: f64,
}

/// Obstacle and potential-field settings. An empty point list disables
/// avoidance entirely.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObstacleConfig {
    /// Flat coordinate list: 3 values for a point obstacle, 3n values for a
    /// vertex set.
    #[serde(default)]
    pub points: Vec<f64>,

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

fn default_k_gains() -> Vec<f64> {
    vec![100.0, 100.0, 100.0]
}

fn default_d_gains() -> Vec<f64> {
    vec![20.0, 20.0, 20.0]
}

fn default_num_bases() -> usize {
    6
}

fn default_dt() -> f64 {
    0.01
}

fn default_integrate_iter() -> usize {
    10
}

fn default_seg_length() -> f64 {
    -1.0
}

fn default_goal_thresh() -> f64 {
    0.01
}

impl Default for GainsConfig {
    fn default() -> Self {
        Self {
            k: default_k_gains(),
            d: default_d_gains(),
            num_bases: default_num_bases(),
        }
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            t0: 0.0,
            tau: 0.0,
            dt: default_dt(),
            integrate_iter: default_integrate_iter(),
            seg_length: default_seg_length(),
            goal: Vec::new(),
            goal_thresh: Vec::new(),
            default_goal_thresh: default_goal_thresh(),
        }
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &str) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| DmpError::config(format!("cannot read {path}: {e}")))?;
    toml::from_str(&content).map_err(|e| DmpError::config(format!("cannot parse {path}: {e}")))
}
