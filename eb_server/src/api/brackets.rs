//! Bracket API handlers.
//!
//! This module provides the HTTP REST endpoints for bracket operations:
//! - Creating a bracket shell for one game of a tournament
//! - Listing brackets with optional tournament/game filters
//! - Fetching a full bracket with all rounds and matches
//! - Generating rounds from current enrollment
//! - Submitting match results
//! - Completing a bracket
//!
//! Mutating endpoints require the gateway identity headers; reads are open
//! to spectators.
//!
//! # Examples
//!
//! List CS2 brackets:
//! ```bash
//! curl 'http://localhost:3000/api/v1/brackets?game=CS2'
//! ```
//!
//! Submit a result as a team captain:
//! ```bash
//! curl -X PUT http://localhost:3000/api/v1/brackets/<id>/match/1/2 \
//!   -H "X-User-Id: 7d7f9f1e-8c7b-4a57-9e53-0e4c7a3b6f21" \
//!   -H "X-User-Role: captain" \
//!   -H "Content-Type: application/json" \
//!   -d '{"score1": 16, "score2": 9}'
//! ```

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use esports_brackets::auth::Identity;
use esports_brackets::bracket::{
    Bracket, BracketError, BracketFormat, BracketId, BracketStatus, ErrorKind, Match, NewBracket,
    ResultSubmission,
};
use esports_brackets::tournament::{Game, TournamentId};

use super::AppState;
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct CreateBracketRequest {
    pub tournament_id: TournamentId,
    pub game: Game,
    pub name: String,
    pub format: BracketFormat,
}

#[derive(Debug, Deserialize)]
pub struct ListBracketsQuery {
    pub tournament_id: Option<TournamentId>,
    pub game: Option<Game>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResultRequest {
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub notes: Option<String>,
}

/// One row of the bracket list; rounds are omitted to keep the listing light
#[derive(Debug, Serialize)]
pub struct BracketSummary {
    pub id: BracketId,
    pub tournament_id: TournamentId,
    pub game: Game,
    pub name: String,
    pub format: BracketFormat,
    pub status: BracketStatus,
    pub round_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<Bracket> for BracketSummary {
    fn from(bracket: Bracket) -> Self {
        BracketSummary {
            round_count: bracket.rounds.len(),
            id: bracket.id,
            tournament_id: bracket.tournament_id,
            game: bracket.game,
            name: bracket.name,
            format: bracket.format,
            status: bracket.status,
            created_at: bracket.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map an engine error onto an HTTP status and client-safe body.
///
/// Storage failures are logged in full but reported generically; their
/// messages can carry file paths and backend detail.
fn error_response(err: BracketError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Permission => StatusCode::FORBIDDEN,
        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "storage failure");
        "Internal server error".to_string()
    } else {
        err.to_string()
    };

    (status, Json(ErrorResponse { error: message }))
}

/// Create a bracket shell for one game of a tournament.
///
/// Requires an admin identity. The game must be hosted by the tournament and
/// not already have a bracket. The new bracket starts pending, with no
/// rounds until it is generated.
///
/// # Request Body
///
/// ```json
/// {
///   "tournament_id": "0b0f…",
///   "game": "CS2",
///   "name": "CS2 Main Bracket",
///   "format": "single_elimination"
/// }
/// ```
///
/// # Response
///
/// Returns `201 Created` with the full bracket.
///
/// # Errors
///
/// - `400 Bad Request`: Empty name, game not in tournament, or duplicate bracket
/// - `401 Unauthorized`: Missing or invalid identity headers
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: Tournament doesn't exist
pub async fn create_bracket(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<CreateBracketRequest>,
) -> Result<(StatusCode, Json<Bracket>), (StatusCode, Json<ErrorResponse>)> {
    let new = NewBracket {
        tournament_id: request.tournament_id,
        game: request.game,
        name: request.name,
        format: request.format,
    };

    match state.manager.create_bracket(&identity, new).await {
        Ok(bracket) => {
            metrics::brackets_created_total(bracket.game.as_str());
            Ok((StatusCode::CREATED, Json(bracket)))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// List brackets, newest first.
///
/// Supports optional `tournament_id` and `game` query filters. Open to
/// spectators; no identity headers required.
///
/// # Response
///
/// Returns `200 OK` with an array of bracket summaries:
/// ```json
/// [
///   {
///     "id": "7c4e…",
///     "tournament_id": "0b0f…",
///     "game": "CS2",
///     "name": "CS2 Main Bracket",
///     "format": "single_elimination",
///     "status": "active",
///     "round_count": 3,
///     "created_at": "2025-11-22T10:30:00Z"
///   }
/// ]
/// ```
pub async fn list_brackets(
    State(state): State<AppState>,
    Query(query): Query<ListBracketsQuery>,
) -> Result<Json<Vec<BracketSummary>>, (StatusCode, Json<ErrorResponse>)> {
    match state
        .manager
        .list_brackets(query.tournament_id, query.game)
        .await
    {
        Ok(brackets) => Ok(Json(
            brackets.into_iter().map(BracketSummary::from).collect(),
        )),
        Err(e) => Err(error_response(e)),
    }
}

/// Fetch a full bracket, rounds and matches included.
///
/// # Errors
///
/// - `404 Not Found`: Bracket doesn't exist
pub async fn get_bracket(
    State(state): State<AppState>,
    Path(bracket_id): Path<BracketId>,
) -> Result<Json<Bracket>, (StatusCode, Json<ErrorResponse>)> {
    match state.manager.bracket(bracket_id).await {
        Ok(bracket) => Ok(Json(bracket)),
        Err(e) => Err(error_response(e)),
    }
}

/// Generate the rounds of a bracket from current enrollment.
///
/// Requires an admin identity, and the owning tournament must be ongoing.
/// Entrants are shuffled and laid out by the bracket's format; regenerating
/// replaces any existing rounds wholesale.
///
/// # Errors
///
/// - `400 Bad Request`: Tournament not ongoing, too few entrants, or
///   unsupported format
/// - `401 Unauthorized`: Missing or invalid identity headers
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: Bracket doesn't exist
pub async fn generate_bracket(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(bracket_id): Path<BracketId>,
) -> Result<Json<Bracket>, (StatusCode, Json<ErrorResponse>)> {
    match state.manager.generate(&identity, bracket_id).await {
        Ok(bracket) => {
            metrics::brackets_generated_total(bracket.format.as_str());
            Ok(Json(bracket))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Submit the result of a match.
///
/// Admins may report any match; a captain may report a match their team is
/// playing in. In a single elimination bracket the winner advances to their
/// next-round slot, and a tie is rejected outright. Round robin and groups
/// matches accept ties, recorded as a completed match with no winner.
///
/// # Path Parameters
///
/// - `bracket_id`: Bracket ID (UUID)
/// - `round_number`: Round number, 1-based
/// - `match_number`: Match number, 1-based within the bracket's numbering
///
/// # Request Body
///
/// ```json
/// {"score1": 16, "score2": 9, "notes": "overtime"}
/// ```
///
/// Both scores are required; `notes` is optional.
///
/// # Response
///
/// Returns `200 OK` with the completed match.
///
/// # Errors
///
/// - `400 Bad Request`: Missing scores, match not ready, or tie in a
///   single elimination bracket
/// - `401 Unauthorized`: Missing or invalid identity headers
/// - `403 Forbidden`: Caller is neither an admin nor an involved captain
/// - `404 Not Found`: Bracket, round, or match doesn't exist
pub async fn submit_result(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path((bracket_id, round_number, match_number)): Path<(BracketId, u32, u32)>,
    Json(request): Json<SubmitResultRequest>,
) -> Result<Json<Match>, (StatusCode, Json<ErrorResponse>)> {
    let submission = ResultSubmission {
        score1: request.score1,
        score2: request.score2,
        notes: request.notes,
    };

    match state
        .manager
        .submit_result(&identity, bracket_id, round_number, match_number, submission)
        .await
    {
        Ok(completed) => {
            let outcome = if completed.winner.is_some() {
                "decided"
            } else {
                "tied"
            };
            metrics::results_submitted_total(outcome);
            Ok(Json(completed))
        }
        Err(e) => Err(error_response(e)),
    }
}

/// Close an active bracket.
///
/// Requires an admin identity. Completion is always explicit; the engine
/// never infers it from match states.
///
/// # Errors
///
/// - `400 Bad Request`: Bracket is not active
/// - `401 Unauthorized`: Missing or invalid identity headers
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: Bracket doesn't exist
pub async fn complete_bracket(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(bracket_id): Path<BracketId>,
) -> Result<Json<Bracket>, (StatusCode, Json<ErrorResponse>)> {
    match state.manager.complete(&identity, bracket_id).await {
        Ok(bracket) => {
            metrics::brackets_completed_total();
            Ok(Json(bracket))
        }
        Err(e) => Err(error_response(e)),
    }
}
