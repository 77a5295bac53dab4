//! Shared constants

/// Number of players every submission must rank
pub const REQUIRED_PLAYERS: usize = 20;
