//! Round construction for each bracket format.
//!
//! Builders are pure: they take an already-seeded participant order and
//! return the full round structure, leaving persistence and status changes
//! to the manager.

use super::errors::{BracketError, BracketResult};
use super::models::{BracketFormat, Match, Participant, Round};

/// Entrants per group in the groups format; the last group may be smaller
pub const GROUP_SIZE: usize = 4;

/// Minimum entrants needed to generate any bracket
pub const MIN_PARTICIPANTS: usize = 2;

/// Build the full round structure for `format` from seeded participants.
///
/// Participants are paired in the order given; the caller shuffles first.
pub fn build_rounds(
    format: BracketFormat,
    participants: &[Participant],
) -> BracketResult<Vec<Round>> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(BracketError::InsufficientParticipants {
            needed: MIN_PARTICIPANTS,
            current: participants.len(),
        });
    }

    match format {
        BracketFormat::SingleElimination => Ok(single_elimination(participants)),
        BracketFormat::RoundRobin => Ok(vec![Round {
            round_number: 1,
            matches: round_robin_matches(participants),
        }]),
        BracketFormat::Groups => Ok(groups(participants)),
        BracketFormat::DoubleElimination => Err(BracketError::UnsupportedFormat(format)),
    }
}

/// Knockout tree sized to the next power of two.
///
/// With `n` entrants the tree has `ceil(log2(n))` rounds and
/// `2^(rounds - 1)` first-round matches. Pairs are taken off the seeded
/// order two at a time; a pair whose first index is still below `n` but
/// whose second is not becomes a bye, and pairs entirely past `n` become
/// empty placeholder matches. Later rounds are pre-built empty and fill as
/// winners advance.
fn single_elimination(participants: &[Participant]) -> Vec<Round> {
    let n = participants.len();
    let num_rounds = (n - 1).ilog2() + 1;
    let first_round_matches = 1usize << (num_rounds - 1);

    let mut rounds = Vec::with_capacity(num_rounds as usize);

    let mut matches = Vec::with_capacity(first_round_matches);
    for i in 0..first_round_matches {
        let number = (i + 1) as u32;
        if 2 * i < n {
            matches.push(Match::seeded(
                number,
                Some(participants[2 * i]),
                participants.get(2 * i + 1).copied(),
            ));
        } else {
            matches.push(Match::empty(number));
        }
    }
    rounds.push(Round {
        round_number: 1,
        matches,
    });

    for round_number in 2..=num_rounds {
        let count = 1usize << (num_rounds - round_number);
        rounds.push(Round {
            round_number,
            matches: (1..=count).map(|m| Match::empty(m as u32)).collect(),
        });
    }

    rounds
}

/// Every unordered pair once, numbered sequentially
fn round_robin_matches(participants: &[Participant]) -> Vec<Match> {
    let n = participants.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    let mut number = 1;
    for i in 0..n {
        for j in (i + 1)..n {
            matches.push(Match::seeded(
                number,
                Some(participants[i]),
                Some(participants[j]),
            ));
            number += 1;
        }
    }
    matches
}

/// Groups of [`GROUP_SIZE`] in seeded order, each playing an internal
/// round robin; group k is stored as round k+1
fn groups(participants: &[Participant]) -> Vec<Round> {
    participants
        .chunks(GROUP_SIZE)
        .enumerate()
        .map(|(idx, group)| Round {
            round_number: idx as u32 + 1,
            matches: round_robin_matches(group),
        })
        .collect()
}
