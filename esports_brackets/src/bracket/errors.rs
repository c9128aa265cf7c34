//! Bracket error types.

use thiserror::Error;

use super::models::{BracketFormat, BracketId, BracketStatus};
use crate::store::StoreError;
use crate::tournament::{Game, TournamentId, TournamentStatus};

/// Coarse classification used when mapping errors onto a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The addressed bracket, round, match, or tournament does not exist
    NotFound,
    /// The request is well-formed but violates a rule
    Validation,
    /// The caller is not allowed to perform this operation
    Permission,
    /// The storage backend failed
    Storage,
}

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// Bracket not found
    #[error("Bracket not found: {0}")]
    BracketNotFound(BracketId),

    /// Tournament not found
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Round not found within the bracket
    #[error("Round {0} does not exist")]
    RoundNotFound(u32),

    /// Match not found within the round
    #[error("Match {match_number} does not exist in round {round_number}")]
    MatchNotFound { round_number: u32, match_number: u32 },

    /// Bracket name missing or blank
    #[error("Bracket name must not be empty")]
    EmptyName,

    /// Game not hosted by the tournament
    #[error("Game {game} is not part of tournament {tournament_id}")]
    GameNotInTournament { tournament_id: TournamentId, game: Game },

    /// A bracket already exists for this tournament and game
    #[error("A {game} bracket already exists for tournament {tournament_id}")]
    DuplicateBracket { tournament_id: TournamentId, game: Game },

    /// Tournament is in the wrong lifecycle state for this operation
    #[error("Tournament not in correct state: expected {expected:?}, got {actual:?}")]
    InvalidTournamentState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },

    /// Bracket is in the wrong lifecycle state for this operation
    #[error("Bracket not in correct state: expected {expected:?}, got {actual:?}")]
    InvalidBracketState {
        expected: BracketStatus,
        actual: BracketStatus,
    },

    /// Too few entrants to generate a bracket
    #[error("Insufficient participants: need {needed}, have {current}")]
    InsufficientParticipants { needed: usize, current: usize },

    /// Format declared but not generatable by this engine
    #[error("Format {0:?} is not supported for generation")]
    UnsupportedFormat(BracketFormat),

    /// One or both slots of the match are unfilled
    #[error("Match is not ready for a result: both slots must be filled")]
    MatchNotReady,

    /// Submission lacked one or both scores
    #[error("Both scores are required")]
    MissingScores,

    /// Equal scores cannot decide an elimination match
    #[error("Tied scores cannot resolve an elimination match")]
    TiedEliminationMatch,

    /// Caller is neither an admin nor a captain of an involved team
    #[error("Not authorized to submit results for this match")]
    NotAuthorized,

    /// Caller lacks administrative rights
    #[error("Admin privileges required")]
    AdminRequired,

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl BracketError {
    /// Classify the error for transport mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::BracketNotFound(_)
            | BracketError::TournamentNotFound(_)
            | BracketError::RoundNotFound(_)
            | BracketError::MatchNotFound { .. } => ErrorKind::NotFound,
            BracketError::EmptyName
            | BracketError::GameNotInTournament { .. }
            | BracketError::DuplicateBracket { .. }
            | BracketError::InvalidTournamentState { .. }
            | BracketError::InvalidBracketState { .. }
            | BracketError::InsufficientParticipants { .. }
            | BracketError::UnsupportedFormat(_)
            | BracketError::MatchNotReady
            | BracketError::MissingScores
            | BracketError::TiedEliminationMatch => ErrorKind::Validation,
            BracketError::NotAuthorized | BracketError::AdminRequired => ErrorKind::Permission,
            BracketError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type BracketResult<T> = Result<T, BracketError>;
