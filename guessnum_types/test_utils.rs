use rand::Rng;
use uuid::Uuid;

use crate::player::Player;

#[derive(Default, Clone)]
pub struct PlayerFactoryOptions<'a> {
    pub id: Option<Uuid>,
    pub username: Option<&'a str>,
    pub best_score: Option<u32>,
    pub revision: Option<u32>,
}

pub fn player_factory(options: PlayerFactoryOptions) -> Player {
    let default_username: String = format!("user_{}", rand::thread_rng().r#gen::<u32>());
    Player {
        id: options.id.unwrap_or_else(Uuid::new_v4),
        username: options.username.map_or(default_username, |s| s.to_string()),
        best_score: options.best_score,
        revision: options.revision.unwrap_or(0),
    }
}
