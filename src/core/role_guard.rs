//! `user-guard` business logic.
//!
//! Ensures the target member holds the `safeuser` role: the role is looked up by name,
//! created on first use in a guild, and only granted when the member does not already hold
//! it. Every path ends in exactly one primary ephemeral reply; role creation additionally
//! sends a detached notice.

use crate::{
    core::{
        locks::GuildLocks,
        platform::{GuildPlatform, GuildRole, Responder, RoleSpec},
    },
    errors::PlatformError,
};
use poise::serenity_prelude::{GuildId, UserId};
use tracing::{debug, error, info, instrument};

/// Name of the role this command manages.
pub const ROLE_NAME: &str = "safeuser";
/// Colour given to the role when it gets created (blue).
pub const ROLE_COLOUR: u32 = 0x0000_00FF;
/// Audit log reason attached to role creation.
pub const CREATE_REASON: &str = "Userguard role creation";
/// Audit log reason attached to the role grant.
pub const GRANT_REASON: &str = "Userguard role grant";

/// Reply sent when the command is used outside a guild.
pub const GUILD_ONLY_MESSAGE: &str = "このコマンドはサーバー内でのみ使用できます。";

/// Final state of one `user-guard` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The target already held the role, nothing was changed.
    AlreadyHeld { target: UserId, role_name: String },
    /// The role was added to the target.
    Granted { target: UserId, role_name: String },
    /// Validation or a platform call failed; the role may still have been created.
    Failed(PlatformError),
}

impl Outcome {
    /// Text of the primary reply for this outcome.
    #[must_use]
    pub fn reply_text(&self) -> String {
        match self {
            Self::AlreadyHeld { target, role_name } => {
                format!("<@{target}> には既に「{role_name}」ロールが付与されています。")
            }
            Self::Granted { target, role_name } => {
                format!("<@{target}> に「{role_name}」ロールを付与しました。")
            }
            Self::Failed(err) => failure_text(err),
        }
    }
}

fn failure_text(err: &PlatformError) -> String {
    match err {
        PlatformError::Validation(message) => message.clone(),
        PlatformError::NotFound(message) => {
            format!("ユーザーまたはロールが見つかりません: {message}")
        }
        PlatformError::RateLimited(message) => {
            format!("レート制限中です。しばらくしてから再度お試しください: {message}")
        }
        PlatformError::PermissionDenied(message) => {
            format!("ロールを管理する権限がありません: {message}")
        }
        PlatformError::Unknown(message) => {
            format!("コマンド実行中にエラーが発生しました: {message}")
        }
    }
}

/// Text of the detached notice sent after the role was created.
#[must_use]
pub fn created_notice(role_name: &str) -> String {
    format!("「{role_name}」ロールを作成しました。")
}

/// The role created on first use.
#[must_use]
pub fn role_spec() -> RoleSpec {
    RoleSpec {
        name: ROLE_NAME.to_string(),
        colour: ROLE_COLOUR,
        audit_reason: CREATE_REASON.to_string(),
    }
}

/// Picks the role named exactly `name`. With duplicates, the lowest id (oldest role) wins.
#[must_use]
pub fn find_role(roles: Vec<GuildRole>, name: &str) -> Option<GuildRole> {
    roles
        .into_iter()
        .filter(|role| role.name == name)
        .min_by_key(|role| role.id)
}

/// Runs the whole `user-guard` protocol and sends the primary reply.
///
/// Failures of the role and membership calls are caught here, logged, and turned into an
/// [`Outcome::Failed`] reply. Only a failure to deliver the primary reply is returned as `Err`.
#[instrument(skip(platform, responder, locks))]
pub async fn run<P, R>(
    platform: &P,
    responder: &R,
    locks: &GuildLocks,
    guild_id: Option<GuildId>,
    target: UserId,
) -> Result<Outcome, PlatformError>
where
    P: GuildPlatform,
    R: Responder,
{
    let outcome = match guild_id {
        None => {
            debug!("user-guard invoked outside of a guild");
            Outcome::Failed(PlatformError::Validation(GUILD_ONLY_MESSAGE.to_string()))
        }
        Some(guild_id) => match ensure_role(platform, responder, locks, guild_id, target).await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("user-guard failed in guild {}: {:?}", guild_id, err);
                Outcome::Failed(err)
            }
        },
    };

    responder.reply(outcome.reply_text()).await?;
    Ok(outcome)
}

async fn ensure_role<P, R>(
    platform: &P,
    responder: &R,
    locks: &GuildLocks,
    guild_id: GuildId,
    target: UserId,
) -> Result<Outcome, PlatformError>
where
    P: GuildPlatform,
    R: Responder,
{
    let role = {
        let _guard = locks.lock(guild_id).await;
        let roles = platform.guild_roles(guild_id).await?;
        match find_role(roles, ROLE_NAME) {
            Some(role) => role,
            None => {
                let role = platform.create_role(guild_id, &role_spec()).await?;
                info!("Created role {} ({}) in guild {}", role.name, role.id, guild_id);
                responder.notify_detached(created_notice(&role.name));
                role
            }
        }
    };

    if platform.has_role(guild_id, target, role.id).await? {
        debug!("{} already holds {}", target, role.name);
        return Ok(Outcome::AlreadyHeld {
            target,
            role_name: role.name,
        });
    }

    platform
        .add_role(guild_id, target, role.id, GRANT_REASON)
        .await?;
    info!("Granted {} to {} in guild {}", role.name, target, guild_id);

    Ok(Outcome::Granted {
        target,
        role_name: role.name,
    })
}
