use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub type ParticipantId = String;

/// Shuffle attempts before the rotation fallback takes over. Each attempt
/// lands on a derangement with probability approaching 1/e, so the fallback
/// is effectively unreachable at this cap.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub giver: ParticipantId,
    pub recipient: ParticipantId,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("need at least 2 participants, got {0}")]
    InsufficientParticipants(usize),
    #[error("duplicate participant id {0}")]
    DuplicateParticipant(ParticipantId),
}

/// Assigns every participant a gift recipient: a random permutation of the
/// input with no participant mapped to themselves. Pairs come back in input
/// order by giver. The caller owns all storage and lifecycle; this is a pure
/// computation over `entities` and `rng`.
pub fn draw(
    entities: &[ParticipantId],
    rng: &mut impl Rng,
) -> Result<Vec<Assignment>, DrawError> {
    draw_with_attempts(entities, rng, DEFAULT_MAX_ATTEMPTS)
}

/// Same as [`draw`] with the shuffle retry budget as a parameter. Once the
/// budget is exhausted the input rotated left by one is used instead, so the
/// call still returns a valid derangement; that path trades uniformity for
/// guaranteed termination.
pub fn draw_with_attempts(
    entities: &[ParticipantId],
    rng: &mut impl Rng,
    max_attempts: usize,
) -> Result<Vec<Assignment>, DrawError> {
    if entities.len() < 2 {
        return Err(DrawError::InsufficientParticipants(entities.len()));
    }

    let mut seen = HashSet::with_capacity(entities.len());
    for id in entities {
        if !seen.insert(id) {
            return Err(DrawError::DuplicateParticipant(id.clone()));
        }
    }

    let mut recipients = entities.to_vec();
    let mut valid = false;
    for _ in 0..max_attempts {
        recipients.shuffle(rng);
        if is_derangement(entities, &recipients) {
            valid = true;
            break;
        }
    }

    if !valid {
        recipients = rotate_left(entities);
    }

    Ok(entities
        .iter()
        .cloned()
        .zip(recipients)
        .map(|(giver, recipient)| Assignment { giver, recipient })
        .collect())
}

fn is_derangement(givers: &[ParticipantId], recipients: &[ParticipantId]) -> bool {
    givers.iter().zip(recipients).all(|(g, r)| g != r)
}

// A one-step cyclic rotation has no fixed points for len >= 2.
fn rotate_left(entities: &[ParticipantId]) -> Vec<ParticipantId> {
    let mut rotated = entities[1..].to_vec();
    rotated.push(entities[0].clone());
    rotated
}
