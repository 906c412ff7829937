pub mod commands;
pub mod database;
pub mod display;
pub mod ranking;
pub mod session;

use commands::*;
use poise::command;

pub use commands::{debate_session, debates, leaderboard};

/// 🗣️ Log and manage debate results
#[command(
    slash_command,
    subcommands("add", "remove", "list"),
    guild_only,
    category = "Debates"
)]
pub async fn debate(_ctx: crate::Context<'_>) -> Result<(), crate::Error> {
    Ok(())
}
