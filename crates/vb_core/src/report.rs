//! Tabular read model: roster-ordered rows of raw counters plus the three
//! derived columns, formatted for display and export. Views are built fresh
//! on every call; nothing here is cached.

use crate::counter::{Counter, CounterSet};
use crate::ledger::{MatchSession, SetId};
use crate::metrics::{derive, sum_rows, DerivedMetrics};
use serde::Serialize;

pub const PLAYER_COLUMN: &str = "Player";
pub const TEAM_TOTAL_LABEL: &str = "TEAM TOTAL";

/// One display column: the row label, a raw counter, or a derived metric.
/// Derived columns close their stat group, matching the dashboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Player,
    Raw(Counter),
    AtkPct,
    SrvPct,
    SrvRevAvg,
}

/// Fixed display order for every view and export.
pub const COLUMNS: [Column; 21] = [
    Column::Player,
    Column::Raw(Counter::Played),
    Column::Raw(Counter::AtkAtm),
    Column::Raw(Counter::AtkKill),
    Column::Raw(Counter::AtkErr),
    Column::AtkPct,
    Column::Raw(Counter::SetAst),
    Column::Raw(Counter::SrvAtm),
    Column::Raw(Counter::SrvAce),
    Column::Raw(Counter::SrvErr),
    Column::SrvPct,
    Column::Raw(Counter::Dig),
    Column::Raw(Counter::DigErr),
    Column::Raw(Counter::BlkErr),
    Column::Raw(Counter::BlkSolo),
    Column::Raw(Counter::BlkAssist),
    Column::Raw(Counter::SrvRevErr),
    Column::Raw(Counter::SrvRev1),
    Column::Raw(Counter::SrvRev2),
    Column::Raw(Counter::SrvRev3),
    Column::SrvRevAvg,
];

impl Column {
    pub fn header(&self) -> &'static str {
        match self {
            Column::Player => PLAYER_COLUMN,
            Column::Raw(counter) => counter.label(),
            Column::AtkPct => "Atk %",
            Column::SrvPct => "Srv %",
            Column::SrvRevAvg => "SrvRev Avg",
        }
    }
}

/// One rendered row: the raw counters it was built from and the derived
/// metrics recomputed from them.
#[derive(Debug, Clone, Serialize)]
pub struct StatRow {
    pub label: String,
    pub counters: CounterSet,
    pub metrics: DerivedMetrics,
}

impl StatRow {
    fn new(label: impl Into<String>, counters: CounterSet) -> Self {
        let metrics = derive(&counters);
        Self { label: label.into(), counters, metrics }
    }

    /// Formatted cell values in `COLUMNS` order.
    pub fn cells(&self) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|column| match column {
                Column::Player => self.label.clone(),
                Column::Raw(counter) => self.counters.get(*counter).to_string(),
                Column::AtkPct => self.metrics.atk_display(),
                Column::SrvPct => self.metrics.srv_display(),
                Column::SrvRevAvg => self.metrics.srv_rev_display(),
            })
            .collect()
    }
}

/// A complete rendered table for one set or for match totals.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub title: String,
    pub rows: Vec<StatRow>,
}

impl TableView {
    pub fn headers() -> Vec<&'static str> {
        COLUMNS.iter().map(|c| c.header()).collect()
    }
}

/// Build the view for one set, optionally closing with a TEAM TOTAL row
/// summed from the raw counters (derived columns recomputed from the sum).
pub fn set_view(session: &MatchSession, set: SetId, team_total: bool) -> TableView {
    build_view(session, set.label(), session.table(set).to_vec(), team_total)
}

/// Build the match-totals view: per-player counters summed across all sets.
pub fn match_totals_view(session: &MatchSession, team_total: bool) -> TableView {
    build_view(session, "Match Totals", session.match_totals(), team_total)
}

fn build_view(
    session: &MatchSession,
    title: &str,
    table: Vec<CounterSet>,
    team_total: bool,
) -> TableView {
    let mut rows: Vec<StatRow> = session
        .roster()
        .iter()
        .zip(table.iter())
        .map(|(player, counters)| StatRow::new(player, *counters))
        .collect();
    if team_total {
        rows.push(StatRow::new(TEAM_TOTAL_LABEL, sum_rows(table.iter())));
    }
    TableView { title: title.to_string(), rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn session() -> MatchSession {
        MatchSession::new(Roster::new(["7 - Ada", "9 - Mia"]).unwrap())
    }

    #[test]
    fn headers_follow_display_order() {
        let headers = TableView::headers();
        assert_eq!(headers.len(), 21);
        assert_eq!(headers[0], "Player");
        assert_eq!(
            &headers[1..6],
            ["Played", "Atk ATM", "Atk K", "Atk ERR", "Atk %"]
        );
        assert_eq!(headers[10], "Srv %");
        assert_eq!(headers[20], "SrvRev Avg");
    }

    #[test]
    fn set_view_renders_roster_order_with_derived_cells() {
        let mut s = session();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkKill, 3).unwrap();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkErr, 1).unwrap();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkAtm, 4).unwrap();

        let view = set_view(&s, SetId::Set1, false);
        assert_eq!(view.title, "Set 1");
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].label, "7 - Ada");

        let mia = view.rows[1].cells();
        assert_eq!(mia[0], "9 - Mia");
        assert_eq!(mia[3], "3"); // Atk K
        assert_eq!(mia[5], "0.500"); // Atk %
        assert_eq!(mia[10], "0.0"); // Srv % with no serves
    }

    #[test]
    fn team_total_row_sums_raw_and_rederives() {
        let mut s = session();
        s.set_counter(SetId::Set1, "7 - Ada", Counter::AtkKill, 2).unwrap();
        s.set_counter(SetId::Set1, "7 - Ada", Counter::AtkAtm, 2).unwrap();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkKill, 1).unwrap();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkErr, 1).unwrap();
        s.set_counter(SetId::Set1, "9 - Mia", Counter::AtkAtm, 2).unwrap();

        let view = set_view(&s, SetId::Set1, true);
        let total = view.rows.last().unwrap();
        assert_eq!(total.label, TEAM_TOTAL_LABEL);
        assert_eq!(total.counters.get(Counter::AtkKill), 3);
        assert_eq!(total.counters.get(Counter::AtkAtm), 4);
        // (3 - 1) / 4, recomputed from the summed raw counters rather than
        // averaging the per-player 1.000 and 0.000.
        assert_eq!(total.metrics.atk_pct, 0.5);
    }

    #[test]
    fn match_totals_view_spans_sets() {
        let mut s = session();
        s.set_counter(SetId::Set1, "7 - Ada", Counter::Dig, 2).unwrap();
        s.set_counter(SetId::Set2, "7 - Ada", Counter::Dig, 3).unwrap();
        s.set_counter(SetId::Set3, "7 - Ada", Counter::SrvAce, 1).unwrap();

        let view = match_totals_view(&s, false);
        assert_eq!(view.title, "Match Totals");
        assert_eq!(view.rows[0].counters.get(Counter::Dig), 5);
        assert_eq!(view.rows[0].counters.get(Counter::SrvAce), 1);
    }
}
