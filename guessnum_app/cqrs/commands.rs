use uuid::Uuid;

use guessnum_types::{actor::Actor, player::PlayerChange};

use crate::cqrs::Command;

/// Registers a new player record at revision 0.
#[derive(Debug, Clone)]
pub struct CreatePlayer {
    pub id: Uuid,
    pub username: String,
    pub best_score: Option<u32>,
}

impl Command for CreatePlayer {}

#[derive(Debug, Clone)]
pub struct DeletePlayer {
    pub player_id: Uuid,
}

impl Command for DeletePlayer {}

/// Replaces or patches a player on behalf of `actor`.
///
/// Runs through `PlayerMutator` rather than a `CommandHandler`: every retry
/// needs its own transaction.
#[derive(Debug, Clone)]
pub struct UpdatePlayer {
    pub player_id: Uuid,
    pub actor: Actor,
    pub change: PlayerChange,
}

impl Command for UpdatePlayer {}
