//! Canonical counter schema: the fixed set of per-player stat cells and
//! their event classification (attack-attempt coupling, rally scoring).

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One named stat cell in the per-player counter grid.
///
/// Declaration order is display order; `as usize` is the cell index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Counter {
    /// Sets the player appeared in
    Played,
    /// Attack attempts
    AtkAtm,
    /// Attack kills
    AtkKill,
    /// Attack errors
    AtkErr,
    /// Setting assists
    SetAst,
    /// Serve attempts
    SrvAtm,
    /// Service aces
    SrvAce,
    /// Service errors
    SrvErr,
    /// Successful digs
    Dig,
    /// Dig errors
    DigErr,
    /// Blocking errors
    BlkErr,
    /// Solo blocks
    BlkSolo,
    /// Block assists
    BlkAssist,
    /// Serve-receive error (pass grade 0)
    SrvRevErr,
    /// Pass grade 1
    SrvRev1,
    /// Pass grade 2
    SrvRev2,
    /// Pass grade 3 (perfect pass)
    SrvRev3,
}

/// Which side of the rally score a recorded event moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEffect {
    /// Point for our team (kill, ace, solo block)
    TeamPoint,
    /// Point conceded to the opponent (attack/serve/dig/block error)
    OpponentPoint,
}

impl Counter {
    pub const COUNT: usize = 17;

    /// All counters in display order.
    pub const ALL: [Counter; Counter::COUNT] = [
        Counter::Played,
        Counter::AtkAtm,
        Counter::AtkKill,
        Counter::AtkErr,
        Counter::SetAst,
        Counter::SrvAtm,
        Counter::SrvAce,
        Counter::SrvErr,
        Counter::Dig,
        Counter::DigErr,
        Counter::BlkErr,
        Counter::BlkSolo,
        Counter::BlkAssist,
        Counter::SrvRevErr,
        Counter::SrvRev1,
        Counter::SrvRev2,
        Counter::SrvRev3,
    ];

    /// Display and CSV header name.
    pub fn label(&self) -> &'static str {
        match self {
            Counter::Played => "Played",
            Counter::AtkAtm => "Atk ATM",
            Counter::AtkKill => "Atk K",
            Counter::AtkErr => "Atk ERR",
            Counter::SetAst => "Set AST",
            Counter::SrvAtm => "Srv ATM",
            Counter::SrvAce => "Srv ACE",
            Counter::SrvErr => "Srv ERR",
            Counter::Dig => "DIG",
            Counter::DigErr => "DIG ERR",
            Counter::BlkErr => "Blk ERR",
            Counter::BlkSolo => "Blk S",
            Counter::BlkAssist => "Blk AS",
            Counter::SrvRevErr => "SrvRev ERR",
            Counter::SrvRev1 => "SrvRev 1",
            Counter::SrvRev2 => "SrvRev 2",
            Counter::SrvRev3 => "SrvRev 3",
        }
    }

    /// Look up a counter by its display label. The inbound edit/tap
    /// interface speaks labels; unknown labels are rejected rather than
    /// creating new columns.
    pub fn from_label(label: &str) -> Option<Counter> {
        Counter::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Attack outcomes carry an implied attempt: recording a kill or an
    /// attack error also advances `Atk ATM` in the same transaction.
    pub fn is_attack_outcome(self) -> bool {
        matches!(self, Counter::AtkKill | Counter::AtkErr)
    }

    /// Rally-scoring classification for tap-mode events. `SrvRev ERR` is a
    /// pass grade, not a separately scored fault, so it stays score-neutral.
    pub fn scoring_effect(self) -> Option<ScoringEffect> {
        match self {
            Counter::AtkKill | Counter::SrvAce | Counter::BlkSolo => Some(ScoringEffect::TeamPoint),
            Counter::AtkErr | Counter::SrvErr | Counter::DigErr | Counter::BlkErr => {
                Some(ScoringEffect::OpponentPoint)
            }
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Counter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Counter::from_label(s).ok_or_else(|| LedgerError::UnknownCounter(s.to_string()))
    }
}

/// One player's row of raw counter cells.
///
/// Cells are `i64`: grid edits clamp at zero, but an undo that races an
/// external grid edit may legally drive a cell negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CounterSet {
    cells: [i64; Counter::COUNT],
}

impl CounterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, counter: Counter) -> i64 {
        self.cells[counter.index()]
    }

    pub fn set(&mut self, counter: Counter, value: i64) {
        self.cells[counter.index()] = value;
    }

    pub(crate) fn add(&mut self, counter: Counter, delta: i64) {
        self.cells[counter.index()] += delta;
    }

    /// Element-wise add, used when summing sets into match totals.
    pub fn merge(&mut self, other: &CounterSet) {
        for (cell, rhs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell += rhs;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }
}
