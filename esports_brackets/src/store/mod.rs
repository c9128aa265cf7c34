//! Storage trait definitions for roster lookups and bracket persistence.
//!
//! This module provides trait-based abstractions over storage, enabling
//! dependency injection and testing without a live backend. The engine never
//! talks to a database directly; it only sees these traits. [`MemoryStore`]
//! is the in-process reference implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::bracket::{Bracket, BracketId};
use crate::tournament::{Game, Player, PlayerId, Team, TeamId, Tournament, TournamentId};

pub mod memory;

pub use memory::{MemoryStore, Roster};

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend failure (connection, I/O)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Stored data could not be decoded
    #[error("Corrupt stored data: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for tournament lookups
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Fetch a tournament by id
    async fn tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>>;
}

/// Trait for team lookups
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Fetch a team by id
    async fn team(&self, id: TeamId) -> StoreResult<Option<Team>>;

    /// Fetch the teams among `ids` that exist, in the order given
    async fn teams_by_ids(&self, ids: &[TeamId]) -> StoreResult<Vec<Team>>;
}

/// Trait for player lookups
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Fetch the players among `ids` that exist, in the order given
    async fn players_by_ids(&self, ids: &[PlayerId]) -> StoreResult<Vec<Player>>;
}

/// Trait for bracket persistence
///
/// Each call is atomic with respect to other calls on the same store; the
/// engine relies on that for its load-modify-save sequences but tolerates
/// interleaving between calls.
#[async_trait]
pub trait BracketRepository: Send + Sync {
    /// Store a newly created bracket
    async fn insert(&self, bracket: &Bracket) -> StoreResult<()>;

    /// Fetch a bracket by id
    async fn bracket(&self, id: BracketId) -> StoreResult<Option<Bracket>>;

    /// Fetch the bracket for a (tournament, game) pair, if one exists
    async fn by_tournament_and_game(
        &self,
        tournament_id: TournamentId,
        game: Game,
    ) -> StoreResult<Option<Bracket>>;

    /// List brackets, optionally filtered, newest first
    async fn list(
        &self,
        tournament_id: Option<TournamentId>,
        game: Option<Game>,
    ) -> StoreResult<Vec<Bracket>>;

    /// Persist the current state of a bracket as one atomic replacement
    async fn save(&self, bracket: &Bracket) -> StoreResult<()>;
}
