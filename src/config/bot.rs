//! Bot configuration module for loading the token and registration scope from the environment.
//!
//! The `.env` file is loaded by `main` before this runs, so values from it are visible here
//! like any other environment variable.

use crate::errors::{Error, Result};
use poise::serenity_prelude::GuildId;

/// Where slash commands get upserted at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRegistration {
    /// Replace the application's global command set.
    Global,
    /// Replace the command set of a single guild. Updates show up instantly, handy for development.
    Guild(GuildId),
}

/// Everything the bot needs to start.
#[derive(Clone)]
pub struct BotConfig {
    /// Bot authentication token
    pub token: String,
    /// Command registration scope
    pub registration: CommandRegistration,
}

// Keep the token out of logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("registration", &self.registration)
            .finish()
    }
}

/// Loads the bot configuration from the process environment.
///
/// Reads `BOT_TOKEN` (falling back to `DISCORD_BOT_TOKEN`) and the optional
/// `REGISTER_GUILD_ID`.
pub fn load_bot_config() -> Result<BotConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Builds a [`BotConfig`] from an arbitrary key lookup.
pub fn from_lookup<F>(lookup: F) -> Result<BotConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let token = lookup("BOT_TOKEN")
        .or_else(|| lookup("DISCORD_BOT_TOKEN"))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::Config {
            message: "BOT_TOKEN is not set".to_string(),
        })?;

    let registration = match lookup("REGISTER_GUILD_ID") {
        Some(raw) if !raw.trim().is_empty() => {
            CommandRegistration::Guild(parse_guild_id(raw.trim())?)
        }
        _ => CommandRegistration::Global,
    };

    tracing::debug!("Loaded bot configuration, registration: {:?}", registration);

    Ok(BotConfig {
        token,
        registration,
    })
}

fn parse_guild_id(raw: &str) -> Result<GuildId> {
    match raw.parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId::new(id)),
        _ => Err(Error::Config {
            message: format!("REGISTER_GUILD_ID is not a valid guild id: {raw}"),
        }),
    }
}
