//! # vb_core - Volleyball Match Stat Ledger
//!
//! In-memory stat ledger and derived-metrics engine for manually scoring a
//! volleyball match: a roster of players, three sets of named counters per
//! player, and three computed columns (attack efficiency, serve efficiency,
//! serve-receive average).
//!
//! ## Features
//! - Two entry styles: trusted grid edits and a reversible tap-to-log
//!   event stream with attempt coupling and rally-score side effects
//! - Pure derivation: computed columns are never stored, always recomputed
//! - Read models for per-set and match-total tables, one-way CSV export
//!
//! The hosting UI layer owns all user interaction; this crate owns the
//! bookkeeping. One `MatchSession` per scoring session, created by the host
//! and discarded with it.

pub mod counter;
pub mod error;
pub mod export;
pub mod ledger;
pub mod metrics;
pub mod report;
pub mod roster;

pub use counter::{Counter, CounterSet, ScoringEffect};
pub use error::{ExportError, LedgerError, Result};
pub use export::{export_to_file, file_name, write_csv};
pub use ledger::{MatchSession, SetId, SetScore, TapEvent, SET_COUNT};
pub use metrics::{derive, sum_rows, DerivedMetrics};
pub use report::{match_totals_view, set_view, StatRow, TableView, TEAM_TOTAL_LABEL};
pub use roster::{Roster, DEFAULT_SQUAD};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
