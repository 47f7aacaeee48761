use uuid::Uuid;

use guessnum_types::player::Player;

use crate::cqrs::Query;

pub struct GetPlayerById {
    pub player_id: Uuid,
}

impl Query for GetPlayerById {
    type Output = Player;
}

pub struct GetPlayerByUsername {
    pub username: String,
}

impl Query for GetPlayerByUsername {
    type Output = Player;
}

pub struct ListPlayers;

impl Query for ListPlayers {
    type Output = Vec<Player>;
}

/// Players whose best score equals the lowest recorded one.
pub struct ListBestPlayers;

impl Query for ListBestPlayers {
    type Output = Vec<Player>;
}
