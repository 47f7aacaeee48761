use guessnum_types::player::Player;

use crate::models as db_models;

impl From<db_models::Player> for Player {
    fn from(player: db_models::Player) -> Self {
        Player {
            id: player.id,
            username: player.username,
            best_score: player.best_score.map(|score| score as u32),
            revision: player.revision as u32,
        }
    }
}
