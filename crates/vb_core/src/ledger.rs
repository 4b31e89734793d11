//! The stat ledger: one `MatchSession` per interactive scoring session.
//!
//! The session is an explicit context object owned by the host layer, with a
//! create/discard lifecycle. It holds a counter table per set, the rally
//! scoreboard, and the tap-mode event history. Two entry styles mutate it:
//!
//! - grid mode (`set_counter` / `set_cell`): trusted bulk edits, one cell at
//!   a time, no side effects and no history;
//! - tap mode (`increment` / `undo`): the authoritative live event log, with
//!   attempt coupling and rally-score side effects, each reversible.

use crate::counter::{Counter, CounterSet, ScoringEffect};
use crate::error::{LedgerError, Result};
use crate::roster::Roster;
use serde::{Deserialize, Serialize};

pub const SET_COUNT: usize = 3;

/// One scoring period of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetId {
    Set1,
    Set2,
    Set3,
}

impl SetId {
    pub const ALL: [SetId; SET_COUNT] = [SetId::Set1, SetId::Set2, SetId::Set3];

    pub fn label(&self) -> &'static str {
        match self {
            SetId::Set1 => "Set 1",
            SetId::Set2 => "Set 2",
            SetId::Set3 => "Set 3",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Rally score for one set. Moves only through tap-mode events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SetScore {
    pub team: u32,
    pub opponent: u32,
}

/// One applied tap-mode increment, recorded for undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TapEvent {
    pub set: SetId,
    pub player: usize,
    pub counter: Counter,
}

/// In-memory stat ledger for a single match session.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSession {
    roster: Roster,
    tables: Vec<Vec<CounterSet>>,
    scores: [SetScore; SET_COUNT],
    history: Vec<TapEvent>,
}

impl MatchSession {
    /// Create a session with all-zero counters for every roster player in
    /// every set.
    pub fn new(roster: Roster) -> Self {
        let tables = (0..SET_COUNT).map(|_| vec![CounterSet::new(); roster.len()]).collect();
        Self { roster, tables, scores: [SetScore::default(); SET_COUNT], history: Vec::new() }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Raw counter rows for one set, in roster order.
    pub fn table(&self, set: SetId) -> &[CounterSet] {
        &self.tables[set.index()]
    }

    pub fn score(&self, set: SetId) -> SetScore {
        self.scores[set.index()]
    }

    pub fn history(&self) -> &[TapEvent] {
        &self.history
    }

    pub fn counter(&self, set: SetId, player: &str, counter: Counter) -> Result<i64> {
        let idx = self.player_index(player)?;
        Ok(self.tables[set.index()][idx].get(counter))
    }

    /// Per-player counters summed across all sets. Derived columns are never
    /// part of this sum; callers recompute them from the summed rows.
    pub fn match_totals(&self) -> Vec<CounterSet> {
        let mut totals = vec![CounterSet::new(); self.roster.len()];
        for table in &self.tables {
            for (total, row) in totals.iter_mut().zip(table.iter()) {
                total.merge(row);
            }
        }
        totals
    }

    /// Grid-mode bulk edit: overwrite a single cell. No history entry, no
    /// score side effects, and no coupling — grid mode is a trusted importer
    /// and may freely desynchronize attempts from outcomes.
    pub fn set_counter(&mut self, set: SetId, player: &str, counter: Counter, value: i64) -> Result<()> {
        let idx = self.player_index(player)?;
        self.tables[set.index()][idx].set(counter, value.max(0));
        Ok(())
    }

    /// Grid-mode edit from an untyped host payload: the counter arrives as a
    /// display label and the value as whatever the edit widget produced.
    /// Non-numeric values are coerced to 0 — kept, not rejected, so a stray
    /// keystroke never aborts a bulk entry pass.
    pub fn set_cell(
        &mut self,
        set: SetId,
        player: &str,
        counter_label: &str,
        raw: &serde_json::Value,
    ) -> Result<()> {
        let counter: Counter = counter_label.parse()?;
        let value = coerce_cell_value(raw);
        self.set_counter(set, player, counter, value)
    }

    /// Tap-mode single event: advance the counter by one, couple attack
    /// outcomes to `Atk ATM`, move the rally score for scoring/conceding
    /// events, and record the event for undo. All in one transaction.
    pub fn increment(&mut self, set: SetId, player: &str, counter: Counter) -> Result<()> {
        let idx = self.player_index(player)?;
        let event = TapEvent { set, player: idx, counter };
        self.apply(event, 1);
        self.history.push(event);
        Ok(())
    }

    /// Reverse the most recent tap event, including its paired-counter and
    /// score side effects. No-op when the history is empty.
    pub fn undo(&mut self) -> Option<TapEvent> {
        let event = self.history.pop()?;
        self.apply(event, -1);
        Some(event)
    }

    /// Zero every counter and the score for one set, and clear the tap
    /// history. The whole history goes: undoing across a partially reset
    /// table would reverse events against cells that no longer reflect them.
    pub fn reset_set(&mut self, set: SetId) {
        for row in &mut self.tables[set.index()] {
            *row = CounterSet::new();
        }
        self.scores[set.index()] = SetScore::default();
        self.history.clear();
    }

    /// Zero everything: all sets, all scores, the full history.
    pub fn reset_all(&mut self) {
        for set in SetId::ALL {
            for row in &mut self.tables[set.index()] {
                *row = CounterSet::new();
            }
        }
        self.scores = [SetScore::default(); SET_COUNT];
        self.history.clear();
    }

    fn player_index(&self, key: &str) -> Result<usize> {
        self.roster.position(key).ok_or_else(|| LedgerError::UnknownPlayer(key.to_string()))
    }

    /// Apply a tap event forward (`delta = 1`) or in reverse (`delta = -1`).
    fn apply(&mut self, event: TapEvent, delta: i64) {
        let row = &mut self.tables[event.set.index()][event.player];
        row.add(event.counter, delta);
        if event.counter.is_attack_outcome() {
            row.add(Counter::AtkAtm, delta);
        }
        if let Some(effect) = event.counter.scoring_effect() {
            let score = &mut self.scores[event.set.index()];
            let side = match effect {
                ScoringEffect::TeamPoint => &mut score.team,
                ScoringEffect::OpponentPoint => &mut score.opponent,
            };
            if delta > 0 {
                *side += 1;
            } else {
                *side = side.saturating_sub(1);
            }
        }
    }
}

/// Coercion policy for raw grid-edit payloads: any numeric value is taken
/// (clamped below at 0 downstream), numeric strings are parsed, everything
/// else collapses to 0 with a diagnostic.
fn coerce_cell_value(raw: &serde_json::Value) -> i64 {
    match raw {
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                v
            } else if let Some(f) = n.as_f64() {
                f as i64
            } else {
                log::warn!("non-integer cell value {n} coerced to 0");
                0
            }
        }
        serde_json::Value::String(s) => s.trim().parse::<i64>().unwrap_or_else(|_| {
            log::warn!("malformed cell value {s:?} coerced to 0");
            0
        }),
        other => {
            log::warn!("non-numeric cell value {other} coerced to 0");
            0
        }
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    fn any_counter() -> impl Strategy<Value = Counter> {
        prop::sample::select(Counter::ALL.to_vec())
    }

    fn any_set() -> impl Strategy<Value = SetId> {
        prop::sample::select(SetId::ALL.to_vec())
    }

    proptest! {
        /// Attempts track outcomes after every tap event, and keep tracking
        /// them through any number of undos. A direct `Atk ATM` tap is an
        /// explicit neutral attempt and counts toward the expected total.
        #[test]
        fn attempts_equal_kills_plus_errors(
            events in prop::collection::vec((any_set(), 0usize..10, any_counter()), 0..60),
            undos in 0usize..80,
        ) {
            let mut s = MatchSession::new(Roster::default_squad());
            // Mirror of the live history, used to count neutral attempts.
            let mut applied: Vec<(SetId, usize, Counter)> = Vec::new();

            fn check(s: &MatchSession, applied: &[(SetId, usize, Counter)]) -> std::result::Result<(), TestCaseError> {
                for set in SetId::ALL {
                    for (idx, row) in s.table(set).iter().enumerate() {
                        let neutral = applied
                            .iter()
                            .filter(|(es, ep, ec)| *es == set && *ep == idx && *ec == Counter::AtkAtm)
                            .count() as i64;
                        prop_assert_eq!(
                            row.get(Counter::AtkAtm),
                            row.get(Counter::AtkKill) + row.get(Counter::AtkErr) + neutral
                        );
                    }
                }
                Ok(())
            }

            for (set, player_idx, counter) in events {
                let player = s.roster().get(player_idx).unwrap().to_string();
                s.increment(set, &player, counter).unwrap();
                applied.push((set, player_idx, counter));
                check(&s, &applied)?;
            }
            for _ in 0..undos {
                if s.undo().is_some() {
                    applied.pop();
                }
                check(&s, &applied)?;
            }
        }

        /// A full undo of any event sequence restores the zero state,
        /// including scores and history.
        #[test]
        fn full_undo_restores_initial_state(
            events in prop::collection::vec((any_set(), 0usize..10, any_counter()), 0..60),
        ) {
            let mut s = MatchSession::new(Roster::default_squad());
            let count = events.len();
            for (set, player_idx, counter) in events {
                let player = s.roster().get(player_idx).unwrap().to_string();
                s.increment(set, &player, counter).unwrap();
            }
            for _ in 0..count {
                prop_assert!(s.undo().is_some());
            }
            for set in SetId::ALL {
                prop_assert!(s.table(set).iter().all(|row| row.is_zero()));
                prop_assert_eq!(s.score(set), SetScore::default());
            }
            prop_assert!(s.history().is_empty());
            prop_assert!(s.undo().is_none());
        }

        /// Single-event round trip: increment then undo is the identity on
        /// the whole session.
        #[test]
        fn increment_undo_round_trip(
            start in prop::collection::vec((any_set(), 0usize..10, any_counter()), 0..20),
            set in any_set(),
            player_idx in 0usize..10,
            counter in any_counter(),
        ) {
            let mut s = MatchSession::new(Roster::default_squad());
            for (set, idx, counter) in start {
                let player = s.roster().get(idx).unwrap().to_string();
                s.increment(set, &player, counter).unwrap();
            }
            let before = s.clone();

            let player = s.roster().get(player_idx).unwrap().to_string();
            s.increment(set, &player, counter).unwrap();
            s.undo();

            for set in SetId::ALL {
                prop_assert_eq!(s.table(set), before.table(set));
                prop_assert_eq!(s.score(set), before.score(set));
            }
            prop_assert_eq!(s.history(), before.history());
        }
    }
}
