//! The `user-guard` command: hands out the `safeuser` role.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            platform::{InteractionResponder, SerenityPlatform},
        },
        core::role_guard,
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use std::sync::Arc;
    use tracing::info;

    /// Grants the safeuser role to the given user.
    ///
    /// Creates the role on first use in a server. Members who already hold it are left alone.
    #[poise::command(slash_command, rename = "user-guard")]
    pub async fn user_guard(
        ctx: Context<'_>,
        #[description = "User to grant the role to"] target: serenity::User,
    ) -> Result<()> {
        let poise::Context::Application(app_ctx) = ctx else {
            return Ok(());
        };

        // Acknowledge first so the creation notice and the final reply are both follow-ups.
        ctx.defer_ephemeral().await?;

        let http = Arc::clone(&ctx.serenity_context().http);
        let platform = SerenityPlatform::new(Arc::clone(&http));
        let responder = InteractionResponder::new(http, Arc::new(app_ctx.interaction.clone()));

        let outcome = role_guard::run(
            &platform,
            &responder,
            &ctx.data().guild_locks,
            ctx.guild_id(),
            target.id,
        )
        .await?;
        info!("user-guard for {} finished: {:?}", target.name, outcome);

        Ok(())
    }
}

pub use inner::*;
