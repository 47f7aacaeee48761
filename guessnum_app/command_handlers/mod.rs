mod create_player;
mod delete_player;

pub use create_player::CreatePlayerCommandHandler;
pub use delete_player::DeletePlayerCommandHandler;
