//! Bracket module providing generation and match progression for festival
//! tournaments.
//!
//! This module implements:
//! - Entrant resolution from tournament enrollment (teams, or players for
//!   individual-entry games)
//! - Unbiased seeding with an injectable random source
//! - Round construction for single elimination, round robin, and groups
//! - Match result recording with winner advancement through the knockout
//!   tree
//!
//! ## Example
//!
//! ```no_run
//! use esports_brackets::bracket::{BracketFormat, BracketManager, NewBracket, Shuffler};
//! use esports_brackets::store::MemoryStore;
//! use esports_brackets::{Game, Identity, Role};
//! use std::path::Path;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::from_roster_file(Path::new("roster.json"))?);
//!     let manager = BracketManager::with_store(store, Shuffler::new());
//!
//!     let admin = Identity::new(Uuid::new_v4(), Role::Admin);
//!     let bracket = manager
//!         .create_bracket(
//!             &admin,
//!             NewBracket {
//!                 tournament_id: Uuid::new_v4(),
//!                 game: Game::Cs2,
//!                 name: "CS2 Main Bracket".to_string(),
//!                 format: BracketFormat::SingleElimination,
//!             },
//!         )
//!         .await?;
//!
//!     let generated = manager.generate(&admin, bracket.id).await?;
//!     println!("{} rounds generated", generated.rounds.len());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod errors;
pub mod manager;
pub mod models;
pub mod resolve;
pub mod seeding;

pub use builder::{GROUP_SIZE, MIN_PARTICIPANTS, build_rounds};
pub use errors::{BracketError, BracketResult, ErrorKind};
pub use manager::BracketManager;
pub use models::{
    Bracket, BracketFormat, BracketId, BracketStatus, Match, MatchSlot, MatchStatus, NewBracket,
    Participant, ParticipantKind, ResultMeta, ResultSubmission, Round,
};
pub use resolve::resolve_participants;
pub use seeding::Shuffler;
