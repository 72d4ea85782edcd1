//! Bot layer - Discord-specific interface and command handlers
//!
//! Builds the poise framework, registers the slash commands, and adapts serenity to the
//! capability traits the core logic runs against.

/// Slash command implementations and the command registry
pub mod commands;
/// Serenity-backed implementations of the core platform traits
pub mod platform;

use crate::{
    config::{BotConfig, CommandRegistration},
    core::locks::GuildLocks,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, instrument};

/// Shared data available to all bot commands.
#[derive(Debug, Default)]
pub struct BotData {
    /// Serializes role lookup and creation per guild
    pub guild_locks: GuildLocks,
}

impl BotData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Poise context with this bot's data and error types.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

#[allow(clippy::exit)]
async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            // Registration failed; nothing useful can run without commands.
            error!("Failed to start bot: {:?}", error);
            std::process::exit(1);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(format!("An error occurred: {error}"))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::UnknownInteraction { interaction, .. } => {
            debug!("Ignoring unknown command `{}`", interaction.data.name);
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

async fn register_commands(
    ctx: &serenity::Context,
    commands: &[poise::Command<BotData, Error>],
    registration: CommandRegistration,
) -> Result<()> {
    match registration {
        CommandRegistration::Global => {
            info!("Registering {} commands globally...", commands.len());
            poise::builtins::register_globally(ctx, commands).await?;
        }
        CommandRegistration::Guild(guild_id) => {
            info!("Registering {} commands in guild {}...", commands.len(), guild_id);
            poise::builtins::register_in_guild(ctx, commands, guild_id).await?;
        }
    }
    Ok(())
}

/// Builds the framework and runs the gateway client until it stops.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    let registration = config.registration;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("{} is ready!", ready.user.name);
                register_commands(ctx, &framework.options().commands, registration).await?;
                Ok(BotData::new())
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&config.token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|why| error!("Client error: {:?}", why))?;

    Ok(())
}
