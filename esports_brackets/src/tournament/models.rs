//! Tournament, team, and player lookup models.
//!
//! Registration and roster management happen elsewhere on the platform; the
//! bracket engine only reads these rows to resolve entrants and authorize
//! result submissions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::UserId;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Team ID type
pub type TeamId = Uuid;

/// Player ID type
pub type PlayerId = Uuid;

/// Game titles hosted by the festival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    #[serde(rename = "CS2")]
    Cs2,
    #[serde(rename = "LOL")]
    Lol,
    #[serde(rename = "Valorant")]
    Valorant,
    #[serde(rename = "TFT")]
    Tft,
}

impl Game {
    /// Whether entrants compete individually rather than as teams
    pub fn is_individual(self) -> bool {
        matches!(self, Game::Tft)
    }

    /// Wire name of the game
    pub fn as_str(self) -> &'static str {
        match self {
            Game::Cs2 => "CS2",
            Game::Lol => "LOL",
            Game::Valorant => "Valorant",
            Game::Tft => "TFT",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tournament lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Being set up, not yet visible
    Draft,
    /// Accepting team and player registrations
    Registration,
    /// Matches being played; brackets may be generated
    Ongoing,
    /// Finished
    Completed,
}

/// Tournament row as seen by the bracket engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Tournament ID
    pub id: TournamentId,
    /// Display name
    pub name: String,
    /// Games hosted by this tournament
    pub games: Vec<Game>,
    /// Lifecycle status
    pub status: TournamentStatus,
    /// Enrolled team ids
    pub teams: Vec<TeamId>,
    /// Enrolled player ids (individual-entry games)
    pub players: Vec<PlayerId>,
}

/// Team row as seen by the bracket engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    pub id: TeamId,
    /// Display name
    pub name: String,
    /// Game the team competes in
    pub game: Game,
    /// User ID of the team captain
    pub captain: UserId,
    /// User IDs of the team members, captain included
    pub members: Vec<UserId>,
}

/// Player row as seen by the bracket engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID
    pub id: PlayerId,
    /// Owning user account
    pub user_id: UserId,
    /// In-game nickname
    pub nickname: String,
    /// Game the player competes in
    pub game: Game,
}
