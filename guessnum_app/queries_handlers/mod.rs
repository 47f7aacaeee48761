mod get_player_by_id;
mod get_player_by_username;
mod list_best_players;
mod list_players;

pub use get_player_by_id::GetPlayerByIdHandler;
pub use get_player_by_username::GetPlayerByUsernameHandler;
pub use list_best_players::ListBestPlayersHandler;
pub use list_players::ListPlayersHandler;
