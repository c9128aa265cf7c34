//! Participant resolution from tournament enrollment.

use super::models::Participant;
use crate::tournament::{Game, Player, Team};

/// Resolve the entrants for `game` from a tournament's enrolled rosters.
///
/// Individual-entry games draw from enrolled players; team games draw from
/// enrolled teams. Rows registered for other games are skipped. An empty
/// result is not itself an error; whether enough entrants exist is decided
/// at generation time.
pub fn resolve_participants(game: Game, teams: &[Team], players: &[Player]) -> Vec<Participant> {
    if game.is_individual() {
        players
            .iter()
            .filter(|p| p.game == game)
            .map(|p| Participant::player(p.id))
            .collect()
    } else {
        teams
            .iter()
            .filter(|t| t.game == game)
            .map(|t| Participant::team(t.id))
            .collect()
    }
}
