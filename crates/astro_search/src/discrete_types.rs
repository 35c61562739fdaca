//! Types for the discrete-event search engine.

/// Configuration for [`find_discrete`](crate::discrete::find_discrete).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Coarse sampling interval in days. Must be small enough that the
    /// classification function cannot change code twice within one
    /// step; transitions faster than this cadence are silently missed.
    pub step_size_days: f64,
    /// Bisection iteration cap.
    pub max_iterations: usize,
    /// Bisection convergence threshold in days.
    pub convergence_days: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step_size_days: 1.0,
            max_iterations: 50,
            // ~0.4 s, comfortably below the minute precision of output.
            convergence_days: 5.0e-6,
        }
    }
}

impl SearchConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !(self.step_size_days.is_finite() && self.step_size_days > 0.0) {
            return Err("step_size_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1");
        }
        if !(self.convergence_days.is_finite() && self.convergence_days > 0.0) {
            return Err("convergence_days must be positive");
        }
        Ok(())
    }
}

/// A refined code transition: the instant the classification function
/// first reports `code`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteEvent {
    pub jd_tdb: f64,
    pub code: i32,
}
