//! Serenity-backed implementations of [`GuildPlatform`] and [`Responder`].

use crate::{
    bot::Context,
    core::platform::{GuildPlatform, GuildRole, Responder, RoleSpec},
    errors::PlatformError,
};
use poise::serenity_prelude::{
    CommandInteraction, CreateInteractionResponseFollowup, EditRole, GuildId, Http, RoleId,
    UserId,
};
use std::sync::Arc;
use tracing::warn;

/// Role and membership calls over the Discord HTTP API.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    #[must_use]
    pub const fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl GuildPlatform for SerenityPlatform {
    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, PlatformError> {
        let roles = guild_id.roles(&*self.http).await?;
        Ok(roles
            .into_values()
            .map(|role| GuildRole {
                id: role.id,
                name: role.name,
                colour: role.colour.0,
            })
            .collect())
    }

    async fn create_role(
        &self,
        guild_id: GuildId,
        spec: &RoleSpec,
    ) -> Result<GuildRole, PlatformError> {
        let builder = EditRole::new()
            .name(spec.name.clone())
            .colour(spec.colour)
            .audit_log_reason(&spec.audit_reason);
        let role = guild_id.create_role(&*self.http, builder).await?;
        Ok(GuildRole {
            id: role.id,
            name: role.name,
            colour: role.colour.0,
        })
    }

    async fn has_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<bool, PlatformError> {
        let member = guild_id.member(&*self.http, user_id).await?;
        Ok(member.roles.contains(&role_id))
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        audit_reason: &str,
    ) -> Result<(), PlatformError> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(audit_reason))
            .await?;
        Ok(())
    }
}

/// Sends ephemeral follow-ups to a deferred slash command interaction.
///
/// The interaction must already be acknowledged, so the primary reply and detached notices
/// are all follow-ups and can arrive in any order.
#[derive(Clone)]
pub struct InteractionResponder {
    http: Arc<Http>,
    interaction: Arc<CommandInteraction>,
}

impl InteractionResponder {
    #[must_use]
    pub const fn new(http: Arc<Http>, interaction: Arc<CommandInteraction>) -> Self {
        Self { http, interaction }
    }

    fn followup(content: String) -> CreateInteractionResponseFollowup {
        CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true)
    }
}

impl Responder for InteractionResponder {
    async fn reply(&self, content: String) -> Result<(), PlatformError> {
        self.interaction
            .create_followup(&*self.http, Self::followup(content))
            .await?;
        Ok(())
    }

    fn notify_detached(&self, content: String) {
        let http = Arc::clone(&self.http);
        let interaction = Arc::clone(&self.interaction);
        tokio::spawn(async move {
            if let Err(e) = interaction
                .create_followup(&*http, Self::followup(content))
                .await
            {
                warn!("Failed to send notice for `{}`: {}", interaction.data.name, e);
            }
        });
    }
}

/// Ephemeral reply carrying `content`.
#[must_use]
pub fn ephemeral_reply(content: String) -> poise::CreateReply {
    poise::CreateReply::default()
        .content(content)
        .ephemeral(true)
}

/// Answers through the poise context, so the primary reply is the interaction response
/// itself. For commands that do not defer.
#[derive(Clone, Copy)]
pub struct ContextResponder<'a> {
    ctx: Context<'a>,
}

impl<'a> ContextResponder<'a> {
    #[must_use]
    pub const fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

impl Responder for ContextResponder<'_> {
    async fn reply(&self, content: String) -> Result<(), PlatformError> {
        self.ctx.send(ephemeral_reply(content)).await?;
        Ok(())
    }

    fn notify_detached(&self, content: String) {
        match self.ctx {
            poise::Context::Application(app_ctx) => {
                let http = Arc::clone(&self.ctx.serenity_context().http);
                InteractionResponder::new(http, Arc::new(app_ctx.interaction.clone()))
                    .notify_detached(content);
            }
            poise::Context::Prefix(_) => {
                warn!("Dropping notice outside of an interaction: {}", content);
            }
        }
    }
}
