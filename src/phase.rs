// src/phase.rs - Canonical phase system shared by all DMP dimensions

/// Decay rate chosen so the phase reaches 0.01 at t = tau for any tau.
/// `ALPHA = -ln(0.01)`.
pub const ALPHA: f64 = 4.605170185988091;

/// Exponentially decaying phase from 1 toward 0.
///
/// The phase synchronizes every dimension of a multi-dimensional DMP and
/// gates the forcing term's influence: at `t = 0` it is exactly 1, and at
/// `t = tau` it has decayed to 0.01 regardless of the time scale.
///
/// # Arguments
/// * `curr_time` - Seconds since the start of DMP execution
/// * `tau` - Time scaling constant (total execution length in seconds)
pub fn phase(curr_time: f64, tau: f64) -> f64 {
    (-(ALPHA / tau) * curr_time).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_starts_at_one() {
        for tau in [0.1, 1.0, 5.0, 100.0] {
            assert_eq!(phase(0.0, tau), 1.0);
        }
    }

    #[test]
    fn test_phase_converges_at_tau() {
        for tau in [0.1, 1.0, 5.0, 100.0] {
            assert!((phase(tau, tau) - 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_phase_monotonically_decreasing() {
        let tau = 2.0;
        let mut prev = phase(0.0, tau);
        for i in 1..=100 {
            let s = phase(tau * (i as f64) / 100.0, tau);
            assert!(s < prev);
            prev = s;
        }
    }

    #[test]
    fn test_alpha_matches_definition() {
        assert!((ALPHA - (-(0.01_f64).ln())).abs() < 1e-12);
    }
}
