//! Capability surface consumed by the core commands.
//!
//! The bot layer implements these on top of serenity; tests implement them in memory.
//! Methods return `impl Future + Send` so generic callers can hand the futures to the
//! multi-threaded runtime.

use crate::errors::PlatformError;
use poise::serenity_prelude::{GuildId, RoleId, UserId};
use std::future::Future;

/// A guild role as far as the core logic cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildRole {
    pub id: RoleId,
    pub name: String,
    pub colour: u32,
}

/// Parameters for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: String,
    pub colour: u32,
    /// Shown in the guild's audit log
    pub audit_reason: String,
}

/// Guild role and membership calls.
pub trait GuildPlatform: Send + Sync {
    /// Lists every role of the guild, in no particular order.
    fn guild_roles(
        &self,
        guild_id: GuildId,
    ) -> impl Future<Output = Result<Vec<GuildRole>, PlatformError>> + Send;

    /// Creates a role and returns it with its new id.
    fn create_role(
        &self,
        guild_id: GuildId,
        spec: &RoleSpec,
    ) -> impl Future<Output = Result<GuildRole, PlatformError>> + Send;

    /// Whether `user_id` currently holds `role_id` in the guild.
    fn has_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> impl Future<Output = Result<bool, PlatformError>> + Send;

    /// Adds `role_id` to the member.
    fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        audit_reason: &str,
    ) -> impl Future<Output = Result<(), PlatformError>> + Send;
}

/// Sends ephemeral messages back to whoever invoked the interaction.
pub trait Responder: Send + Sync {
    /// Sends the primary reply and waits for it to be delivered.
    fn reply(&self, content: String) -> impl Future<Output = Result<(), PlatformError>> + Send;

    /// Sends an extra message without waiting on it. Delivery failures are only logged
    /// and ordering relative to [`Responder::reply`] is unspecified.
    fn notify_detached(&self, content: String);
}
