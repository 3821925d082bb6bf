// src/error.rs - Error types for DMP learning and planning
use thiserror::Error;

/// Main error type for DMP operations.
#[derive(Debug, Error)]
pub enum DmpError {
    /// Learning was requested on a trajectory with zero samples.
    #[error("Empty demonstration trajectory passed to learn")]
    EmptyDemonstration,

    /// Dimension counts disagree between a trajectory, gain vectors, or a plan
    /// request and the active DMP set.
    #[error("Dimension mismatch: expected {expected}, got {actual} ({context})")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: &'static str,
    },

    /// Plan was requested but no DMP set has been activated.
    #[error("No active DMP set; call set_active first")]
    NoActiveDmp,

    /// An obstacle value list whose length is not 3 or a multiple of 3.
    #[error("Obstacle list of {0} values is not a point (3) or vertex set (3n)")]
    MalformedObstacle(usize),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Trajectory or plan file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Trajectory or plan JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DmpError {
    pub const fn dimension_mismatch(
        expected: usize,
        actual: usize,
        context: &'static str,
    ) -> Self {
        Self::DimensionMismatch {
            expected,
            actual,
            context,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DmpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DmpError::dimension_mismatch(3, 2, "k_gains");
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("k_gains"));

        let err = DmpError::MalformedObstacle(4);
        assert!(err.to_string().contains("4"));
    }
}
