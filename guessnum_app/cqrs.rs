//! Commands write player state, queries read it. Both run inside a unit of
//! work owned by `AppBus`; `UpdatePlayer` is the exception and goes through
//! `PlayerMutator`, which manages one unit of work per attempt.

mod command;
mod query;

pub mod commands;
pub mod queries;

pub use command::{Command, CommandHandler};
pub use query::{Query, QueryHandler};
