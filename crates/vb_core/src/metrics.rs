//! Derived metrics: a pure transform from raw counter rows to the three
//! computed columns. Never cached, never stored — every read recomputes from
//! the raw counters, which is what keeps percentages honest when the
//! underlying cells change.

use crate::counter::{Counter, CounterSet};
use serde::Serialize;

/// The three computed columns for one counter row, already rounded to their
/// display precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Attack efficiency: (kills - errors) / attempts, 3 decimals.
    pub atk_pct: f64,
    /// Serve efficiency: (attempts - errors) / attempts * 100, 1 decimal.
    pub srv_pct: f64,
    /// Serve-receive average: weighted pass grades over total passes,
    /// 2 decimals.
    pub srv_rev_avg: f64,
}

impl DerivedMetrics {
    pub fn atk_display(&self) -> String {
        format!("{:.3}", self.atk_pct)
    }

    pub fn srv_display(&self) -> String {
        format!("{:.1}", self.srv_pct)
    }

    pub fn srv_rev_display(&self) -> String {
        format!("{:.2}", self.srv_rev_avg)
    }
}

/// Compute the derived columns for one row of raw counters.
///
/// Zero denominators yield exactly 0 for the affected metric. Safe to call
/// on rows summed from multiple sets or players; always derive after
/// summing raw counters, never sum already-derived percentages.
pub fn derive(counters: &CounterSet) -> DerivedMetrics {
    let kills = counters.get(Counter::AtkKill);
    let atk_errs = counters.get(Counter::AtkErr);
    let atk_atm = counters.get(Counter::AtkAtm);

    let srv_atm = counters.get(Counter::SrvAtm);
    let srv_errs = counters.get(Counter::SrvErr);

    let pass0 = counters.get(Counter::SrvRevErr);
    let pass1 = counters.get(Counter::SrvRev1);
    let pass2 = counters.get(Counter::SrvRev2);
    let pass3 = counters.get(Counter::SrvRev3);

    DerivedMetrics {
        atk_pct: round_to(ratio(kills - atk_errs, atk_atm), 3),
        srv_pct: round_to(ratio(srv_atm - srv_errs, srv_atm) * 100.0, 1),
        srv_rev_avg: round_to(ratio(pass1 + 2 * pass2 + 3 * pass3, pass0 + pass1 + pass2 + pass3), 2),
    }
}

/// Element-wise sum of counter rows, for match totals and TEAM TOTAL rows.
pub fn sum_rows<'a, I>(rows: I) -> CounterSet
where
    I: IntoIterator<Item = &'a CounterSet>,
{
    let mut total = CounterSet::new();
    for row in rows {
        total.merge(row);
    }
    total
}

fn ratio(num: i64, den: i64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
