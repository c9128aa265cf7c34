//! Bracket data models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::UserId;
use crate::tournament::{Game, PlayerId, TeamId, TournamentId};

/// Bracket ID type
pub type BracketId = Uuid;

/// Kind of entrant occupying a bracket slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    /// A registered team
    Team,
    /// An individual player (individual-entry games)
    Player,
}

/// A bracket entrant: a team or an individual player
///
/// The kind and id always travel together; an id is meaningless without
/// knowing which roster it points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Whether `id` names a team or a player
    pub kind: ParticipantKind,
    /// Team or player id, per `kind`
    pub id: Uuid,
}

impl Participant {
    /// Create a team entrant
    pub fn team(id: TeamId) -> Self {
        Self {
            kind: ParticipantKind::Team,
            id,
        }
    }

    /// Create an individual-player entrant
    pub fn player(id: PlayerId) -> Self {
        Self {
            kind: ParticipantKind::Player,
            id,
        }
    }
}

/// A filled match slot: an entrant and their current score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSlot {
    /// The entrant occupying this slot
    pub participant: Participant,
    /// Score recorded for this slot
    pub score: u32,
}

impl MatchSlot {
    /// Seed a slot with an entrant at score zero
    pub fn seeded(participant: Participant) -> Self {
        Self {
            participant,
            score: 0,
        }
    }
}

/// Match progress states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Not yet played
    Pending,
    /// Currently being played
    InProgress,
    /// Result recorded
    Completed,
}

/// Bookkeeping recorded alongside a completed match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMeta {
    /// User who submitted the result
    pub submitted_by: UserId,
    /// When the result was submitted
    pub submitted_at: DateTime<Utc>,
    /// Free-form notes from the submitter
    pub notes: Option<String>,
}

/// A single match between two slots
///
/// A `None` slot is either a bye (first round) or a position still awaiting
/// the winner of an earlier match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match number, 1-based and stable within its round
    pub match_number: u32,
    /// First slot
    pub participant1: Option<MatchSlot>,
    /// Second slot
    pub participant2: Option<MatchSlot>,
    /// Winner, set once the match completes with a decisive score
    pub winner: Option<Participant>,
    /// Progress status
    pub status: MatchStatus,
    /// Result bookkeeping, set on completion
    pub result: Option<ResultMeta>,
}

impl Match {
    /// Create an empty placeholder match awaiting earlier winners
    pub fn empty(match_number: u32) -> Self {
        Self {
            match_number,
            participant1: None,
            participant2: None,
            winner: None,
            status: MatchStatus::Pending,
            result: None,
        }
    }

    /// Create a match seeded with entrants; a missing entrant is a bye
    pub fn seeded(
        match_number: u32,
        participant1: Option<Participant>,
        participant2: Option<Participant>,
    ) -> Self {
        Self {
            match_number,
            participant1: participant1.map(MatchSlot::seeded),
            participant2: participant2.map(MatchSlot::seeded),
            winner: None,
            status: MatchStatus::Pending,
            result: None,
        }
    }

    /// Whether both slots are filled and the match can take a result
    pub fn is_ready(&self) -> bool {
        self.participant1.is_some() && self.participant2.is_some()
    }
}

/// A bracket round
///
/// For the groups format each "round" is one group's complete pairing set
/// rather than a stage of elimination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round number, 1-based
    pub round_number: u32,
    /// Matches in this round
    pub matches: Vec<Match>,
}

/// Bracket formats offered by the festival
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketFormat {
    /// Knockout tree; losers are out
    SingleElimination,
    /// Declared but not yet generatable by this engine
    DoubleElimination,
    /// Everyone plays everyone once
    RoundRobin,
    /// Groups of four, round robin within each group
    Groups,
}

impl BracketFormat {
    /// Wire name, matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            BracketFormat::SingleElimination => "single_elimination",
            BracketFormat::DoubleElimination => "double_elimination",
            BracketFormat::RoundRobin => "round_robin",
            BracketFormat::Groups => "groups",
        }
    }
}

impl fmt::Display for BracketFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bracket lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketStatus {
    /// Created, rounds not yet generated
    Pending,
    /// Rounds generated, matches in play
    Active,
    /// Closed by an administrator
    Completed,
}

/// A bracket: the complete pairing structure for one game of a tournament
///
/// At most one bracket exists per (tournament, game) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Bracket ID
    pub id: BracketId,
    /// Owning tournament
    pub tournament_id: TournamentId,
    /// Game this bracket is played in
    pub game: Game,
    /// Display name
    pub name: String,
    /// Pairing format
    pub format: BracketFormat,
    /// Lifecycle status
    pub status: BracketStatus,
    /// Generated rounds, empty until generation
    pub rounds: Vec<Round>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Last modified timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bracket {
    /// Create a pending bracket shell with no rounds
    pub fn new(tournament_id: TournamentId, game: Game, name: String, format: BracketFormat) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            game,
            name,
            format,
            status: BracketStatus::Pending,
            rounds: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Find a round by its 1-based number
    pub fn round(&self, round_number: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == round_number)
    }

    /// Find a match by round and match number
    pub fn find_match(&self, round_number: u32, match_number: u32) -> Option<&Match> {
        self.round(round_number)?
            .matches
            .iter()
            .find(|m| m.match_number == match_number)
    }
}

/// Fields needed to create a bracket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBracket {
    /// Owning tournament
    pub tournament_id: TournamentId,
    /// Game the bracket is for
    pub game: Game,
    /// Display name
    pub name: String,
    /// Pairing format
    pub format: BracketFormat,
}

/// A match result as handed to the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSubmission {
    /// Score for the first slot
    pub score1: Option<u32>,
    /// Score for the second slot
    pub score2: Option<u32>,
    /// Free-form notes
    pub notes: Option<String>,
}

impl ResultSubmission {
    /// Submission with both scores present
    pub fn scores(score1: u32, score2: u32) -> Self {
        Self {
            score1: Some(score1),
            score2: Some(score2),
            notes: None,
        }
    }

    /// Attach notes to the submission
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
