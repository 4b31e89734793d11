//! Player identity and roster ordering.

use crate::error::{LedgerError, Result};
use serde::Serialize;

/// Default squad used by hosts that do not supply their own roster.
pub const DEFAULT_SQUAD: [&str; 10] = [
    "20 - Hadyn",
    "30 - Zooey",
    "1 - Taytem",
    "2 - Ella",
    "3 - Aditi",
    "11 - Luna",
    "12 - Joy",
    "98 - Bria",
    "21 - Avery",
    "22 - Kannon",
];

/// An ordered list of unique player keys (jersey number + name).
///
/// Order is display order only; it carries no meaning for calculations.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    pub fn new<I, S>(players: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for player in players {
            let player = player.into();
            if out.contains(&player) {
                return Err(LedgerError::DuplicatePlayer(player));
            }
            out.push(player);
        }
        if out.is_empty() {
            return Err(LedgerError::EmptyRoster);
        }
        Ok(Self { players: out })
    }

    pub fn default_squad() -> Self {
        // DEFAULT_SQUAD has no duplicates
        Self { players: DEFAULT_SQUAD.iter().map(|p| p.to_string()).collect() }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.as_str())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(|p| p.as_str())
    }

    /// Roster position of a player key, if present.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.players.iter().position(|p| p == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_positions() {
        let roster = Roster::new(["7 - Ada", "9 - Mia", "3 - Kim"]).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(1), Some("9 - Mia"));
        assert_eq!(roster.position("3 - Kim"), Some(2));
        assert_eq!(roster.position("5 - Nobody"), None);
    }

    #[test]
    fn rejects_duplicates() {
        let err = Roster::new(["7 - Ada", "7 - Ada"]).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicatePlayer(p) if p == "7 - Ada"));
    }

    #[test]
    fn rejects_empty() {
        let err = Roster::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyRoster));
    }

    #[test]
    fn default_squad_is_valid() {
        let roster = Roster::default_squad();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster.position("20 - Hadyn"), Some(0));
    }
}
