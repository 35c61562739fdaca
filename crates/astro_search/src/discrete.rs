//! Discrete-event search engine.
//!
//! Finds every instant in a span where an integer-valued classification
//! function changes value. Coarse scan at a fixed step, then bisection
//! on each bracketing sub-interval. This is root bracketing for step
//! functions: no derivative information, robust to non-differentiable
//! classifiers, and blind to any transition pair faster than the step.

use astro_time::TimeSpan;

use crate::discrete_types::{DiscreteEvent, SearchConfig};
use crate::error::SearchError;

/// Find all code transitions of `classify` within `span`.
///
/// Returns events in ascending order, one per detected transition,
/// each carrying the new code. A classifier that is constant over the
/// whole span yields an empty series.
pub fn find_discrete<F>(
    span: &TimeSpan,
    config: &SearchConfig,
    mut classify: F,
) -> Result<Vec<DiscreteEvent>, SearchError>
where
    F: FnMut(f64) -> Result<i32, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let start = span.start_jd_tdb();
    let end = span.end_jd_tdb();

    let mut events = Vec::new();
    let mut t_prev = start;
    let mut code_prev = classify(t_prev)?;

    while t_prev < end {
        let t_curr = (t_prev + config.step_size_days).min(end);
        let code_curr = classify(t_curr)?;

        if code_curr != code_prev {
            events.push(bisect_transition(
                t_prev, code_prev, t_curr, code_curr, config, &mut classify,
            )?);
        }

        t_prev = t_curr;
        code_prev = code_curr;
    }

    Ok(events)
}

/// Refine a bracketed transition to `convergence_days`.
///
/// Invariant: `classify(t_lo) == code_lo` and `classify(t_hi) != code_lo`
/// throughout. The reported instant is the bracket midpoint; the
/// reported code is the first code observed past the transition.
fn bisect_transition<F>(
    mut t_lo: f64,
    code_lo: i32,
    mut t_hi: f64,
    mut code_hi: i32,
    config: &SearchConfig,
    classify: &mut F,
) -> Result<DiscreteEvent, SearchError>
where
    F: FnMut(f64) -> Result<i32, SearchError>,
{
    for _ in 0..config.max_iterations {
        if (t_hi - t_lo) < config.convergence_days {
            break;
        }
        let t_mid = 0.5 * (t_lo + t_hi);
        let code_mid = classify(t_mid)?;
        if code_mid == code_lo {
            t_lo = t_mid;
        } else {
            t_hi = t_mid;
            code_hi = code_mid;
        }
    }

    Ok(DiscreteEvent {
        jd_tdb: 0.5 * (t_lo + t_hi),
        code: code_hi,
    })
}
