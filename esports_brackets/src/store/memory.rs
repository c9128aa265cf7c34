//! In-memory storage for rosters and brackets.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{
    BracketRepository, PlayerRepository, StoreError, StoreResult, TeamRepository,
    TournamentRepository,
};
use crate::bracket::{Bracket, BracketId};
use crate::tournament::{Game, Player, PlayerId, Team, TeamId, Tournament, TournamentId};

/// Roster file shape: the tournaments plus the teams and players they enroll
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Tournaments
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    /// Teams referenced by the tournaments
    #[serde(default)]
    pub teams: Vec<Team>,
    /// Players referenced by the tournaments
    #[serde(default)]
    pub players: Vec<Player>,
}

/// In-memory store implementing every repository trait
///
/// Rosters are loaded once at startup; brackets live in process memory for
/// the duration of the festival. Each repository call takes its lock exactly
/// once, so loads and saves are atomic with respect to each other.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    teams: RwLock<HashMap<TeamId, Team>>,
    players: RwLock<HashMap<PlayerId, Player>>,
    brackets: RwLock<HashMap<BracketId, Bracket>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an in-memory roster
    pub fn from_roster(roster: Roster) -> Self {
        let mut store = Self::new();
        for tournament in roster.tournaments {
            store = store.with_tournament(tournament);
        }
        for team in roster.teams {
            store = store.with_team(team);
        }
        for player in roster.players {
            store = store.with_player(player);
        }
        store
    }

    /// Load a store from a roster JSON file
    pub fn from_roster_file(path: &Path) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Backend(format!("{}: {e}", path.display())))?;
        let roster: Roster = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;
        Ok(Self::from_roster(roster))
    }

    /// Seed a tournament
    pub fn with_tournament(mut self, tournament: Tournament) -> Self {
        self.tournaments.get_mut().insert(tournament.id, tournament);
        self
    }

    /// Seed a team
    pub fn with_team(mut self, team: Team) -> Self {
        self.teams.get_mut().insert(team.id, team);
        self
    }

    /// Seed a player
    pub fn with_player(mut self, player: Player) -> Self {
        self.players.get_mut().insert(player.id, player);
        self
    }

    /// Number of seeded tournaments
    pub async fn tournament_count(&self) -> usize {
        self.tournaments.read().await.len()
    }
}

#[async_trait]
impl TournamentRepository for MemoryStore {
    async fn tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>> {
        Ok(self.tournaments.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn team(&self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.teams.read().await.get(&id).cloned())
    }

    async fn teams_by_ids(&self, ids: &[TeamId]) -> StoreResult<Vec<Team>> {
        let teams = self.teams.read().await;
        Ok(ids.iter().filter_map(|id| teams.get(id).cloned()).collect())
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn players_by_ids(&self, ids: &[PlayerId]) -> StoreResult<Vec<Player>> {
        let players = self.players.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| players.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl BracketRepository for MemoryStore {
    async fn insert(&self, bracket: &Bracket) -> StoreResult<()> {
        self.brackets
            .write()
            .await
            .insert(bracket.id, bracket.clone());
        Ok(())
    }

    async fn bracket(&self, id: BracketId) -> StoreResult<Option<Bracket>> {
        Ok(self.brackets.read().await.get(&id).cloned())
    }

    async fn by_tournament_and_game(
        &self,
        tournament_id: TournamentId,
        game: Game,
    ) -> StoreResult<Option<Bracket>> {
        Ok(self
            .brackets
            .read()
            .await
            .values()
            .find(|b| b.tournament_id == tournament_id && b.game == game)
            .cloned())
    }

    async fn list(
        &self,
        tournament_id: Option<TournamentId>,
        game: Option<Game>,
    ) -> StoreResult<Vec<Bracket>> {
        let mut brackets: Vec<Bracket> = self
            .brackets
            .read()
            .await
            .values()
            .filter(|b| tournament_id.is_none_or(|t| b.tournament_id == t))
            .filter(|b| game.is_none_or(|g| b.game == g))
            .cloned()
            .collect();
        brackets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(brackets)
    }

    async fn save(&self, bracket: &Bracket) -> StoreResult<()> {
        self.brackets
            .write()
            .await
            .insert(bracket.id, bracket.clone());
        Ok(())
    }
}
