//! Slash command implementations and the command registry.

/// The `hello_world` greeting command
pub mod general;

/// The `user-guard` role command
pub mod guard;

use crate::{bot::BotData, errors::Error};

pub use general::*;
pub use guard::*;

/// Every command the bot registers, built once at startup and handed to poise,
/// which dispatches interactions by exact command name.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![hello_world(), user_guard()]
}
