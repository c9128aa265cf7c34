//! Bracket manager: creation, generation, and match progression.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use super::builder;
use super::errors::{BracketError, BracketResult};
use super::models::{
    Bracket, BracketFormat, BracketId, BracketStatus, Match, MatchSlot, MatchStatus, NewBracket,
    Participant, ParticipantKind, ResultMeta, ResultSubmission, Round,
};
use super::resolve;
use super::seeding::Shuffler;
use crate::auth::{Identity, UserId};
use crate::store::{BracketRepository, PlayerRepository, TeamRepository, TournamentRepository};
use crate::tournament::{Game, TournamentId, TournamentStatus};

/// Bracket manager
///
/// Owns the full bracket lifecycle: creating the shell, generating rounds
/// from current enrollment, recording match results, and closing the
/// bracket. All storage goes through the repository traits; the manager
/// itself is cheap to clone and safe to share across request handlers.
#[derive(Clone)]
pub struct BracketManager {
    tournaments: Arc<dyn TournamentRepository>,
    teams: Arc<dyn TeamRepository>,
    players: Arc<dyn PlayerRepository>,
    brackets: Arc<dyn BracketRepository>,
    shuffler: Arc<Mutex<Shuffler>>,
}

impl BracketManager {
    /// Create a manager from individual repositories and a shuffler
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        teams: Arc<dyn TeamRepository>,
        players: Arc<dyn PlayerRepository>,
        brackets: Arc<dyn BracketRepository>,
        shuffler: Shuffler,
    ) -> Self {
        Self {
            tournaments,
            teams,
            players,
            brackets,
            shuffler: Arc::new(Mutex::new(shuffler)),
        }
    }

    /// Create a manager over a single store implementing every repository
    pub fn with_store<S>(store: Arc<S>, shuffler: Shuffler) -> Self
    where
        S: TournamentRepository
            + TeamRepository
            + PlayerRepository
            + BracketRepository
            + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            shuffler,
        )
    }

    /// Create a bracket shell for one game of a tournament
    ///
    /// Admin only. The game must be hosted by the tournament, and at most
    /// one bracket may exist per (tournament, game) pair. The new bracket
    /// is pending with no rounds until generated.
    pub async fn create_bracket(
        &self,
        identity: &Identity,
        new: NewBracket,
    ) -> BracketResult<Bracket> {
        if !identity.is_admin() {
            return Err(BracketError::AdminRequired);
        }
        if new.name.trim().is_empty() {
            return Err(BracketError::EmptyName);
        }

        let tournament = self
            .tournaments
            .tournament(new.tournament_id)
            .await?
            .ok_or(BracketError::TournamentNotFound(new.tournament_id))?;

        if !tournament.games.contains(&new.game) {
            return Err(BracketError::GameNotInTournament {
                tournament_id: tournament.id,
                game: new.game,
            });
        }

        if self
            .brackets
            .by_tournament_and_game(new.tournament_id, new.game)
            .await?
            .is_some()
        {
            return Err(BracketError::DuplicateBracket {
                tournament_id: new.tournament_id,
                game: new.game,
            });
        }

        let bracket = Bracket::new(new.tournament_id, new.game, new.name, new.format);
        self.brackets.insert(&bracket).await?;
        info!(bracket_id = %bracket.id, game = %bracket.game, "bracket created");
        Ok(bracket)
    }

    /// Fetch a bracket by id
    pub async fn bracket(&self, id: BracketId) -> BracketResult<Bracket> {
        self.brackets
            .bracket(id)
            .await?
            .ok_or(BracketError::BracketNotFound(id))
    }

    /// List brackets, optionally filtered by tournament and game, newest first
    pub async fn list_brackets(
        &self,
        tournament_id: Option<TournamentId>,
        game: Option<Game>,
    ) -> BracketResult<Vec<Bracket>> {
        Ok(self.brackets.list(tournament_id, game).await?)
    }

    /// Generate the rounds of a bracket from current enrollment
    ///
    /// Admin only, and the owning tournament must be ongoing. Entrants are
    /// resolved from enrollment, shuffled, and laid out by the bracket's
    /// format. Any previously generated rounds are replaced wholesale; an
    /// administrator may regenerate to reseed a bracket.
    pub async fn generate(
        &self,
        identity: &Identity,
        bracket_id: BracketId,
    ) -> BracketResult<Bracket> {
        if !identity.is_admin() {
            return Err(BracketError::AdminRequired);
        }

        let mut bracket = self.bracket(bracket_id).await?;
        let tournament = self
            .tournaments
            .tournament(bracket.tournament_id)
            .await?
            .ok_or(BracketError::TournamentNotFound(bracket.tournament_id))?;

        if tournament.status != TournamentStatus::Ongoing {
            return Err(BracketError::InvalidTournamentState {
                expected: TournamentStatus::Ongoing,
                actual: tournament.status,
            });
        }

        let teams = self.teams.teams_by_ids(&tournament.teams).await?;
        let players = self.players.players_by_ids(&tournament.players).await?;
        let mut participants = resolve::resolve_participants(bracket.game, &teams, &players);
        self.shuffler.lock().await.shuffle(&mut participants);

        bracket.rounds = builder::build_rounds(bracket.format, &participants)?;
        bracket.status = BracketStatus::Active;
        bracket.updated_at = Utc::now();
        self.brackets.save(&bracket).await?;
        info!(
            bracket_id = %bracket.id,
            participants = participants.len(),
            rounds = bracket.rounds.len(),
            "bracket generated"
        );
        Ok(bracket)
    }

    /// Record a match result, advancing the winner where the format calls
    /// for it
    ///
    /// The caller must be an admin or the captain of a team occupying one
    /// of the match's slots. Both slots must be filled; a bye or a slot
    /// still awaiting an earlier winner cannot be scored. In a single
    /// elimination bracket a tie is rejected outright, and the winner is
    /// copied into their next-round slot: match `m` feeds match
    /// `floor((m - 1) / 2) + 1`, odd match numbers into the first slot,
    /// even into the second. Round robin and groups matches are terminal,
    /// so ties stand there as a completed match with no winner.
    ///
    /// Returns the completed match.
    pub async fn submit_result(
        &self,
        identity: &Identity,
        bracket_id: BracketId,
        round_number: u32,
        match_number: u32,
        submission: ResultSubmission,
    ) -> BracketResult<Match> {
        let (score1, score2) = match (submission.score1, submission.score2) {
            (Some(score1), Some(score2)) => (score1, score2),
            _ => return Err(BracketError::MissingScores),
        };

        let mut bracket = self.bracket(bracket_id).await?;

        let round_idx = bracket
            .rounds
            .iter()
            .position(|r| r.round_number == round_number)
            .ok_or(BracketError::RoundNotFound(round_number))?;
        let match_idx = bracket.rounds[round_idx]
            .matches
            .iter()
            .position(|m| m.match_number == match_number)
            .ok_or(BracketError::MatchNotFound {
                round_number,
                match_number,
            })?;

        let target = &bracket.rounds[round_idx].matches[match_idx];
        let (Some(slot1), Some(slot2)) = (target.participant1, target.participant2) else {
            return Err(BracketError::MatchNotReady);
        };

        if !identity.is_admin()
            && !self
                .is_involved_captain(identity.user_id, slot1.participant, slot2.participant)
                .await?
        {
            return Err(BracketError::NotAuthorized);
        }

        let winner = if score1 > score2 {
            Some(slot1.participant)
        } else if score2 > score1 {
            Some(slot2.participant)
        } else if bracket.format == BracketFormat::SingleElimination {
            return Err(BracketError::TiedEliminationMatch);
        } else {
            None
        };

        let now = Utc::now();
        let target = &mut bracket.rounds[round_idx].matches[match_idx];
        target.participant1 = Some(MatchSlot {
            participant: slot1.participant,
            score: score1,
        });
        target.participant2 = Some(MatchSlot {
            participant: slot2.participant,
            score: score2,
        });
        target.winner = winner;
        target.status = MatchStatus::Completed;
        target.result = Some(ResultMeta {
            submitted_by: identity.user_id,
            submitted_at: now,
            notes: submission.notes,
        });
        let completed = target.clone();

        if bracket.format == BracketFormat::SingleElimination {
            if let Some(winner) = winner {
                advance_winner(&mut bracket.rounds, round_number, match_number, winner);
            }
        }

        bracket.updated_at = now;
        self.brackets.save(&bracket).await?;
        info!(
            bracket_id = %bracket.id,
            round = round_number,
            match_number = match_number,
            winner = ?completed.winner.map(|w| w.id),
            "match result recorded"
        );
        Ok(completed)
    }

    /// Close an active bracket
    ///
    /// Admin only. Completion is always an explicit call; the engine never
    /// infers it from match states.
    pub async fn complete(
        &self,
        identity: &Identity,
        bracket_id: BracketId,
    ) -> BracketResult<Bracket> {
        if !identity.is_admin() {
            return Err(BracketError::AdminRequired);
        }

        let mut bracket = self.bracket(bracket_id).await?;
        if bracket.status != BracketStatus::Active {
            return Err(BracketError::InvalidBracketState {
                expected: BracketStatus::Active,
                actual: bracket.status,
            });
        }

        bracket.status = BracketStatus::Completed;
        bracket.updated_at = Utc::now();
        self.brackets.save(&bracket).await?;
        info!(bracket_id = %bracket.id, "bracket completed");
        Ok(bracket)
    }

    /// Whether `user_id` captains a team occupying either slot
    ///
    /// Individual-player slots confer no submission rights; those results
    /// go through an admin.
    async fn is_involved_captain(
        &self,
        user_id: UserId,
        first: Participant,
        second: Participant,
    ) -> BracketResult<bool> {
        for participant in [first, second] {
            if participant.kind != ParticipantKind::Team {
                continue;
            }
            if let Some(team) = self.teams.team(participant.id).await? {
                if team.captain == user_id {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// Copy a winner into their slot in the following round, if there is one.
///
/// Match `m` of one round feeds match `floor((m - 1) / 2) + 1` of the next;
/// odd match numbers land in the first slot, even in the second. The winner
/// keeps their own kind and starts the next match at score zero.
fn advance_winner(rounds: &mut [Round], round_number: u32, match_number: u32, winner: Participant) {
    let Some(next_round) = rounds
        .iter_mut()
        .find(|r| r.round_number == round_number + 1)
    else {
        return;
    };
    let next_idx = ((match_number - 1) / 2) as usize;
    let Some(next_match) = next_round.matches.get_mut(next_idx) else {
        return;
    };

    let slot = Some(MatchSlot::seeded(winner));
    if match_number % 2 == 1 {
        next_match.participant1 = slot;
    } else {
        next_match.participant2 = slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::MemoryStore;
    use crate::tournament::{Player, Team, Tournament};
    use uuid::Uuid;

    /// Roster fixture: one tournament hosting CS2, LoL, and TFT, with a
    /// configurable number of CS2 teams, one lone LoL team, and three TFT
    /// players.
    struct Fixture {
        manager: BracketManager,
        store: Arc<MemoryStore>,
        admin: Identity,
        tournament_id: TournamentId,
        cs2_teams: Vec<Team>,
        player_ids: Vec<Uuid>,
    }

    fn fixture(status: TournamentStatus, seed: u64, cs2_team_count: usize) -> Fixture {
        let cs2_teams: Vec<Team> = (0..cs2_team_count)
            .map(|i| Team {
                id: Uuid::new_v4(),
                name: format!("CS2 Team {}", i + 1),
                game: Game::Cs2,
                captain: Uuid::new_v4(),
                members: vec![Uuid::new_v4(), Uuid::new_v4()],
            })
            .collect();
        let lol_team = Team {
            id: Uuid::new_v4(),
            name: "Lone LoL Team".to_string(),
            game: Game::Lol,
            captain: Uuid::new_v4(),
            members: Vec::new(),
        };
        let players: Vec<Player> = (0..3)
            .map(|i| Player {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                nickname: format!("tft_{i}"),
                game: Game::Tft,
            })
            .collect();

        let tournament = Tournament {
            id: Uuid::new_v4(),
            name: "Regional Festival".to_string(),
            games: vec![Game::Cs2, Game::Lol, Game::Tft],
            status,
            teams: cs2_teams
                .iter()
                .map(|t| t.id)
                .chain([lol_team.id])
                .collect(),
            players: players.iter().map(|p| p.id).collect(),
        };
        let tournament_id = tournament.id;
        let player_ids = players.iter().map(|p| p.id).collect();

        let mut store = MemoryStore::new().with_tournament(tournament);
        for team in cs2_teams.iter().cloned().chain([lol_team]) {
            store = store.with_team(team);
        }
        for player in players {
            store = store.with_player(player);
        }
        let store = Arc::new(store);

        Fixture {
            manager: BracketManager::with_store(store.clone(), Shuffler::from_seed(seed)),
            store,
            admin: Identity::new(Uuid::new_v4(), Role::Admin),
            tournament_id,
            cs2_teams,
            player_ids,
        }
    }

    fn new_bracket(fix: &Fixture, game: Game, format: BracketFormat) -> NewBracket {
        NewBracket {
            tournament_id: fix.tournament_id,
            game,
            name: format!("{game} Bracket"),
            format,
        }
    }

    /// Create and generate in one go, returning the generated bracket
    async fn generated(fix: &Fixture, game: Game, format: BracketFormat) -> Bracket {
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(fix, game, format))
            .await
            .expect("create bracket");
        fix.manager
            .generate(&fix.admin, bracket.id)
            .await
            .expect("generate bracket")
    }

    #[tokio::test]
    async fn test_create_bracket() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect("create bracket");

        assert_eq!(bracket.status, BracketStatus::Pending);
        assert!(bracket.rounds.is_empty());

        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        assert_eq!(stored.name, "CS2 Bracket");
        assert_eq!(stored.game, Game::Cs2);
    }

    #[tokio::test]
    async fn test_create_bracket_requires_admin() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let captain = Identity::new(Uuid::new_v4(), Role::Captain);

        let err = fix
            .manager
            .create_bracket(&captain, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect_err("not an admin");
        assert!(matches!(err, BracketError::AdminRequired));
    }

    #[tokio::test]
    async fn test_create_bracket_rejects_blank_name() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let mut new = new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination);
        new.name = "   ".to_string();

        let err = fix
            .manager
            .create_bracket(&fix.admin, new)
            .await
            .expect_err("blank name");
        assert!(matches!(err, BracketError::EmptyName));
    }

    #[tokio::test]
    async fn test_create_bracket_unknown_tournament() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let mut new = new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination);
        new.tournament_id = Uuid::new_v4();

        let err = fix
            .manager
            .create_bracket(&fix.admin, new)
            .await
            .expect_err("unknown tournament");
        assert!(matches!(err, BracketError::TournamentNotFound(_)));
    }

    #[tokio::test]
    async fn test_create_bracket_game_not_hosted() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);

        let err = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Valorant, BracketFormat::SingleElimination))
            .await
            .expect_err("game not hosted");
        assert!(matches!(
            err,
            BracketError::GameNotInTournament { game: Game::Valorant, .. }
        ));
    }

    #[tokio::test]
    async fn test_create_bracket_rejects_duplicate() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        fix.manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect("first bracket");

        let err = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::RoundRobin))
            .await
            .expect_err("second bracket for the same game");
        assert!(matches!(err, BracketError::DuplicateBracket { game: Game::Cs2, .. }));

        // A different game of the same tournament is fine.
        fix.manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Tft, BracketFormat::RoundRobin))
            .await
            .expect("bracket for another game");
    }

    #[tokio::test]
    async fn test_generate_requires_admin() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect("create bracket");

        let player = Identity::new(Uuid::new_v4(), Role::Player);
        let err = fix
            .manager
            .generate(&player, bracket.id)
            .await
            .expect_err("not an admin");
        assert!(matches!(err, BracketError::AdminRequired));
    }

    #[tokio::test]
    async fn test_generate_requires_ongoing_tournament() {
        let fix = fixture(TournamentStatus::Registration, 1, 5);
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect("create bracket");

        let err = fix
            .manager
            .generate(&fix.admin, bracket.id)
            .await
            .expect_err("tournament still registering");
        assert!(matches!(
            err,
            BracketError::InvalidTournamentState {
                expected: TournamentStatus::Ongoing,
                actual: TournamentStatus::Registration,
            }
        ));
    }

    #[tokio::test]
    async fn test_generate_single_elimination_layout_is_seed_deterministic() {
        let seed = 99;
        let fix = fixture(TournamentStatus::Ongoing, seed, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;

        assert_eq!(bracket.status, BracketStatus::Active);
        assert_eq!(bracket.rounds.len(), 3);
        assert_eq!(bracket.rounds[0].matches.len(), 4);

        // The LoL team is enrolled in the tournament but must not appear.
        let placed: Vec<Uuid> = bracket.rounds[0]
            .matches
            .iter()
            .flat_map(|m| [m.participant1, m.participant2])
            .flatten()
            .map(|s| s.participant.id)
            .collect();
        assert_eq!(placed.len(), 5);
        assert!(placed.iter().all(|id| fix.cs2_teams.iter().any(|t| t.id == *id)));

        // Same seed, same shuffle: the layout is reproducible.
        let mut expected: Vec<Participant> =
            fix.cs2_teams.iter().map(|t| Participant::team(t.id)).collect();
        Shuffler::from_seed(seed).shuffle(&mut expected);
        let expected_ids: Vec<Uuid> = expected.iter().map(|p| p.id).collect();
        assert_eq!(placed, expected_ids);
    }

    #[tokio::test]
    async fn test_generate_individual_game_uses_players() {
        let fix = fixture(TournamentStatus::Ongoing, 5, 5);
        let bracket = generated(&fix, Game::Tft, BracketFormat::SingleElimination).await;

        assert_eq!(bracket.rounds.len(), 2);
        let placed: Vec<Participant> = bracket.rounds[0]
            .matches
            .iter()
            .flat_map(|m| [m.participant1, m.participant2])
            .flatten()
            .map(|s| s.participant)
            .collect();
        assert_eq!(placed.len(), 3);
        assert!(placed.iter().all(|p| p.kind == ParticipantKind::Player));
        assert!(placed.iter().all(|p| fix.player_ids.contains(&p.id)));
    }

    #[tokio::test]
    async fn test_generate_too_few_participants() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Lol, BracketFormat::SingleElimination))
            .await
            .expect("create bracket");

        let err = fix
            .manager
            .generate(&fix.admin, bracket.id)
            .await
            .expect_err("only one LoL team enrolled");
        assert!(matches!(
            err,
            BracketError::InsufficientParticipants { needed: 2, current: 1 }
        ));
    }

    #[tokio::test]
    async fn test_generate_double_elimination_rejected_without_mutation() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let bracket = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::DoubleElimination))
            .await
            .expect("creation with a declared format is legal");

        let err = fix
            .manager
            .generate(&fix.admin, bracket.id)
            .await
            .expect_err("generation is not");
        assert!(matches!(
            err,
            BracketError::UnsupportedFormat(BracketFormat::DoubleElimination)
        ));

        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        assert_eq!(stored.status, BracketStatus::Pending);
        assert!(stored.rounds.is_empty());
    }

    #[tokio::test]
    async fn test_submit_result_records_scores_winner_and_meta() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;
        let first = bracket.find_match(1, 1).expect("round 1 match 1").clone();

        let completed = fix
            .manager
            .submit_result(
                &fix.admin,
                bracket.id,
                1,
                1,
                ResultSubmission::scores(16, 9).with_notes("map: inferno"),
            )
            .await
            .expect("submit result");

        let expected_winner = first.participant1.expect("slot 1").participant;
        assert_eq!(completed.status, MatchStatus::Completed);
        assert_eq!(completed.winner, Some(expected_winner));
        assert_eq!(completed.participant1.map(|s| s.score), Some(16));
        assert_eq!(completed.participant2.map(|s| s.score), Some(9));

        let meta = completed.result.expect("result meta");
        assert_eq!(meta.submitted_by, fix.admin.user_id);
        assert_eq!(meta.notes.as_deref(), Some("map: inferno"));

        // Odd match number: the winner lands in slot 1 of the next match,
        // kind intact and score reset.
        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        let next = stored.find_match(2, 1).expect("round 2 match 1");
        let advanced = next.participant1.expect("advanced slot");
        assert_eq!(advanced.participant, expected_winner);
        assert_eq!(advanced.participant.kind, ParticipantKind::Team);
        assert_eq!(advanced.score, 0);
        assert!(next.participant2.is_none());
        assert_eq!(next.status, MatchStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_result_captain_of_involved_team() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;
        let first = bracket.find_match(1, 1).expect("round 1 match 1");
        let team_id = first.participant2.expect("slot 2").participant.id;
        let captain_user = fix
            .cs2_teams
            .iter()
            .find(|t| t.id == team_id)
            .expect("team fixture")
            .captain;

        let captain = Identity::new(captain_user, Role::Captain);
        let completed = fix
            .manager
            .submit_result(&captain, bracket.id, 1, 1, ResultSubmission::scores(7, 13))
            .await
            .expect("captain of slot 2's team may submit");
        assert_eq!(
            completed.winner,
            first.participant2.map(|s| s.participant)
        );
    }

    #[tokio::test]
    async fn test_submit_result_uninvolved_captain_rejected() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;
        let first = bracket.find_match(1, 1).expect("round 1 match 1");
        let involved: Vec<Uuid> = [first.participant1, first.participant2]
            .into_iter()
            .flatten()
            .map(|s| s.participant.id)
            .collect();
        let outsider_user = fix
            .cs2_teams
            .iter()
            .find(|t| !involved.contains(&t.id))
            .expect("an uninvolved team exists")
            .captain;

        let outsider = Identity::new(outsider_user, Role::Captain);
        let err = fix
            .manager
            .submit_result(&outsider, bracket.id, 1, 1, ResultSubmission::scores(16, 2))
            .await
            .expect_err("captain of an uninvolved team");
        assert!(matches!(err, BracketError::NotAuthorized));

        // The match is untouched.
        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        let target = stored.find_match(1, 1).expect("round 1 match 1");
        assert_eq!(target.status, MatchStatus::Pending);
        assert!(target.winner.is_none());
        assert_eq!(target.participant1.map(|s| s.score), Some(0));
    }

    #[tokio::test]
    async fn test_submit_result_missing_score_rejected() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;

        let submission = ResultSubmission {
            score1: Some(16),
            score2: None,
            notes: None,
        };
        let err = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 1, 1, submission)
            .await
            .expect_err("one score missing");
        assert!(matches!(err, BracketError::MissingScores));
    }

    #[tokio::test]
    async fn test_submit_result_bye_match_not_ready() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;

        // With five entrants, round 1 match 3 holds the bye.
        let err = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 1, 3, ResultSubmission::scores(1, 0))
            .await
            .expect_err("bye match cannot take a result");
        assert!(matches!(err, BracketError::MatchNotReady));
    }

    #[tokio::test]
    async fn test_submit_result_bad_addresses() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;

        let err = fix
            .manager
            .submit_result(&fix.admin, Uuid::new_v4(), 1, 1, ResultSubmission::scores(1, 0))
            .await
            .expect_err("unknown bracket");
        assert!(matches!(err, BracketError::BracketNotFound(_)));

        let err = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 9, 1, ResultSubmission::scores(1, 0))
            .await
            .expect_err("unknown round");
        assert!(matches!(err, BracketError::RoundNotFound(9)));

        let err = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 1, 9, ResultSubmission::scores(1, 0))
            .await
            .expect_err("unknown match");
        assert!(matches!(
            err,
            BracketError::MatchNotFound { round_number: 1, match_number: 9 }
        ));
    }

    #[tokio::test]
    async fn test_submit_result_tie_rejected_in_single_elimination() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::SingleElimination).await;

        let err = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 1, 1, ResultSubmission::scores(7, 7))
            .await
            .expect_err("a knockout match cannot tie");
        assert!(matches!(err, BracketError::TiedEliminationMatch));

        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        let target = stored.find_match(1, 1).expect("round 1 match 1");
        assert_eq!(target.status, MatchStatus::Pending);
        assert_eq!(target.participant1.map(|s| s.score), Some(0));
        assert_eq!(target.participant2.map(|s| s.score), Some(0));
    }

    #[tokio::test]
    async fn test_submit_result_tie_stands_in_round_robin() {
        let fix = fixture(TournamentStatus::Ongoing, 3, 5);
        let bracket = generated(&fix, Game::Cs2, BracketFormat::RoundRobin).await;

        let completed = fix
            .manager
            .submit_result(&fix.admin, bracket.id, 1, 1, ResultSubmission::scores(1, 1))
            .await
            .expect("round robin matches may tie");

        assert_eq!(completed.status, MatchStatus::Completed);
        assert!(completed.winner.is_none());
        assert_eq!(completed.participant1.map(|s| s.score), Some(1));
        assert_eq!(completed.participant2.map(|s| s.score), Some(1));
    }

    #[tokio::test]
    async fn test_winner_kind_preserved_for_players() {
        let fix = fixture(TournamentStatus::Ongoing, 11, 5);
        let bracket = generated(&fix, Game::Tft, BracketFormat::SingleElimination).await;

        fix.manager
            .submit_result(&fix.admin, bracket.id, 1, 1, ResultSubmission::scores(3, 1))
            .await
            .expect("submit result");

        let stored = fix.manager.bracket(bracket.id).await.expect("fetch");
        let advanced = stored
            .find_match(2, 1)
            .expect("final")
            .participant1
            .expect("advanced winner");
        assert_eq!(advanced.participant.kind, ParticipantKind::Player);
    }

    #[tokio::test]
    async fn test_complete_bracket_lifecycle() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let pending = fix
            .manager
            .create_bracket(&fix.admin, new_bracket(&fix, Game::Cs2, BracketFormat::SingleElimination))
            .await
            .expect("create bracket");

        // Not generated yet: nothing to complete.
        let err = fix
            .manager
            .complete(&fix.admin, pending.id)
            .await
            .expect_err("pending bracket");
        assert!(matches!(
            err,
            BracketError::InvalidBracketState {
                expected: BracketStatus::Active,
                actual: BracketStatus::Pending,
            }
        ));

        fix.manager
            .generate(&fix.admin, pending.id)
            .await
            .expect("generate");

        let captain = Identity::new(Uuid::new_v4(), Role::Captain);
        let err = fix
            .manager
            .complete(&captain, pending.id)
            .await
            .expect_err("not an admin");
        assert!(matches!(err, BracketError::AdminRequired));

        let completed = fix
            .manager
            .complete(&fix.admin, pending.id)
            .await
            .expect("complete");
        assert_eq!(completed.status, BracketStatus::Completed);

        let err = fix
            .manager
            .complete(&fix.admin, pending.id)
            .await
            .expect_err("already completed");
        assert!(matches!(err, BracketError::InvalidBracketState { .. }));
    }

    #[tokio::test]
    async fn test_fetch_unknown_bracket() {
        let fix = fixture(TournamentStatus::Ongoing, 1, 5);
        let err = fix
            .manager
            .bracket(Uuid::new_v4())
            .await
            .expect_err("unknown bracket");
        assert!(matches!(err, BracketError::BracketNotFound(_)));

        // Stores are shared, so the same id resolves after an insert.
        let bracket = Bracket::new(
            fix.tournament_id,
            Game::Cs2,
            "CS2".to_string(),
            BracketFormat::SingleElimination,
        );
        fix.store.insert(&bracket).await.expect("insert");
        fix.manager.bracket(bracket.id).await.expect("fetch");
    }
}
