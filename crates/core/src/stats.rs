//! Position statistics for a single player across submissions

use std::collections::BTreeMap;

use crate::models::{Player, PlayerStats, PositionCount};

/// Case-insensitive name comparison.
/// Names of different byte length never match, so e.g. the Kelvin sign
/// does not fold onto `k`.
pub fn names_match(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars()
            .flat_map(char::to_lowercase)
            .eq(b.chars().flat_map(char::to_lowercase))
}

/// Accumulates position counts one submission at a time
#[derive(Debug)]
pub struct StatsCollector {
    name: String,
    total: u32,
    positions: BTreeMap<i32, u32>,
}

impl StatsCollector {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: 0,
            positions: BTreeMap::new(),
        }
    }

    /// Count the first entry (in list order) matching the player's name.
    /// A submission contributes at most once.
    pub fn add(&mut self, players: &[Player]) {
        if let Some(player) = players.iter().find(|p| names_match(&p.name, &self.name)) {
            *self.positions.entry(player.position).or_insert(0) += 1;
            self.total += 1;
        }
    }

    /// `None` when no submission mentioned the player
    pub fn finish(self) -> Option<PlayerStats> {
        if self.total == 0 {
            return None;
        }

        Some(PlayerStats {
            player_name: self.name,
            total_submissions: self.total,
            position_breakdown: self
                .positions
                .into_iter()
                .map(|(position, count)| PositionCount { position, count })
                .collect(),
        })
    }
}
