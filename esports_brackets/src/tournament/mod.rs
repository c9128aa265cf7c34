//! Tournament, team, and player lookup models.

pub mod models;

pub use models::{Game, Player, PlayerId, Team, TeamId, Tournament, TournamentId, TournamentStatus};
