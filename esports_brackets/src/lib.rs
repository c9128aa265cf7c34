//! # Esports Brackets
//!
//! Bracket generation and match progression for a regional e-sports
//! festival (CS2, LoL, Valorant, TFT).
//!
//! This library is the tournament-side engine behind the festival's
//! registration platform: it resolves entrants from tournament enrollment,
//! seeds them with an unbiased shuffle, lays out the rounds for each
//! supported format, and records match results, advancing winners through
//! the knockout tree.
//!
//! ## Architecture
//!
//! Generation is a pipeline of three pure stages driven by the
//! [`bracket::BracketManager`]:
//!
//! - **Resolve**: pick the entrants for the bracket's game out of the
//!   tournament's enrolled teams (or players, for individual-entry games)
//! - **Seed**: shuffle them with an injectable random source
//! - **Build**: lay out the rounds for the bracket's format
//!
//! Result submission validates the addressed match, authorizes the caller,
//! records both scores, and copies the winner into the next round where the
//! format has one.
//!
//! Storage and identity are collaborators, not parts of the engine: all
//! reads and writes go through the repository traits in [`store`], and
//! callers hand in an already-authenticated [`Identity`].
//!
//! ## Core Modules
//!
//! - [`bracket`]: models, seeding, round construction, match progression
//! - [`store`]: repository traits and the in-memory reference store
//! - [`tournament`]: tournament, team, and player lookup models
//! - [`auth`]: caller identity and roles
//!
//! ## Example
//!
//! ```
//! use esports_brackets::bracket::{BracketFormat, Participant, build_rounds};
//! use uuid::Uuid;
//!
//! let entrants: Vec<Participant> = (0..5)
//!     .map(|i| Participant::team(Uuid::from_u128(i + 1)))
//!     .collect();
//!
//! let rounds = build_rounds(BracketFormat::SingleElimination, &entrants).unwrap();
//! assert_eq!(rounds.len(), 3);
//! ```

/// Caller identity and roles.
pub mod auth;
pub use auth::{Identity, Role, UserId};

/// Tournament, team, and player lookup models.
pub mod tournament;
pub use tournament::{Game, Player, Team, Tournament, TournamentId, TournamentStatus};

/// Bracket engine: models, seeding, round construction, match progression.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketFormat, BracketId, BracketManager, BracketResult, BracketStatus,
    ErrorKind, NewBracket, ResultSubmission, Shuffler,
};

/// Storage traits and the in-memory reference store.
pub mod store;
pub use store::{MemoryStore, Roster, StoreError, StoreResult};
