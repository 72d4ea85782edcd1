//! General Discord commands - currently just the greeting.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, platform::ContextResponder},
        core::greeting,
        errors::Result,
    };
    use tracing::info;

    /// Replies with a greeting.
    #[poise::command(slash_command)]
    pub async fn hello_world(ctx: Context<'_>) -> Result<()> {
        info!("hello_world received from user: {}", ctx.author().name);
        greeting::run(&ContextResponder::new(ctx)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
