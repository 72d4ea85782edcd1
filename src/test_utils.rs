//! Shared test utilities.
//!
//! In-memory stand-ins for Discord: [`MockPlatform`] keeps roles and memberships per guild
//! and logs every call, [`RecordingResponder`] keeps every message it was asked to send.

#![allow(clippy::unwrap_used)]

use crate::{
    core::platform::{GuildPlatform, GuildRole, Responder, RoleSpec},
    errors::PlatformError,
};
use poise::serenity_prelude::{GuildId, RoleId, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GuildRoles(GuildId),
    CreateRole(GuildId, RoleSpec),
    HasRole(GuildId, UserId, RoleId),
    AddRole(GuildId, UserId, RoleId, String),
}

#[derive(Debug, Default)]
struct State {
    roles: HashMap<GuildId, Vec<GuildRole>>,
    members: HashSet<(GuildId, UserId, RoleId)>,
    calls: Vec<Call>,
    next_role_id: u64,
}

/// In-memory guild platform.
#[derive(Debug, Default)]
pub struct MockPlatform {
    state: Mutex<State>,
    listing_error: Option<PlatformError>,
    grant_error: Option<PlatformError>,
    yield_on_list: bool,
}

impl MockPlatform {
    pub fn new() -> Self {
        let platform = Self::default();
        platform.state.lock().unwrap().next_role_id = 1000;
        platform
    }

    /// Seeds an existing role.
    pub fn with_role(self, guild_id: GuildId, role: GuildRole) -> Self {
        self.state
            .lock()
            .unwrap()
            .roles
            .entry(guild_id)
            .or_default()
            .push(role);
        self
    }

    /// Makes every `guild_roles` call fail.
    pub fn fail_listing_with(mut self, err: PlatformError) -> Self {
        self.listing_error = Some(err);
        self
    }

    /// Makes every `add_role` call fail.
    pub fn fail_grant_with(mut self, err: PlatformError) -> Self {
        self.grant_error = Some(err);
        self
    }

    /// Yields to the scheduler after `guild_roles` reads its snapshot, so concurrent callers
    /// can interleave between role lookup and role creation.
    pub fn yielding(mut self) -> Self {
        self.yield_on_list = true;
        self
    }

    /// Seeds a membership.
    pub fn give(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) {
        self.state
            .lock()
            .unwrap()
            .members
            .insert((guild_id, user_id, role_id));
    }

    pub fn member_has(&self, guild_id: GuildId, user_id: UserId, role_id: RoleId) -> bool {
        self.state
            .lock()
            .unwrap()
            .members
            .contains(&(guild_id, user_id, role_id))
    }

    pub fn roles_named(&self, guild_id: GuildId, name: &str) -> Vec<GuildRole> {
        self.state
            .lock()
            .unwrap()
            .roles
            .get(&guild_id)
            .map(|roles| roles.iter().filter(|r| r.name == name).cloned().collect())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateRole(..)))
            .count()
    }

    pub fn grant_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::AddRole(..)))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

impl GuildPlatform for MockPlatform {
    async fn guild_roles(&self, guild_id: GuildId) -> Result<Vec<GuildRole>, PlatformError> {
        self.record(Call::GuildRoles(guild_id));
        if let Some(err) = &self.listing_error {
            return Err(err.clone());
        }
        let roles = self
            .state
            .lock()
            .unwrap()
            .roles
            .get(&guild_id)
            .cloned()
            .unwrap_or_default();
        // Suspend between the snapshot and the caller's next call, like a network round trip.
        if self.yield_on_list {
            tokio::task::yield_now().await;
        }
        Ok(roles)
    }

    async fn create_role(
        &self,
        guild_id: GuildId,
        spec: &RoleSpec,
    ) -> Result<GuildRole, PlatformError> {
        self.record(Call::CreateRole(guild_id, spec.clone()));
        let mut state = self.state.lock().unwrap();
        state.next_role_id += 1;
        let role = GuildRole {
            id: RoleId::new(state.next_role_id),
            name: spec.name.clone(),
            colour: spec.colour,
        };
        state.roles.entry(guild_id).or_default().push(role.clone());
        Ok(role)
    }

    async fn has_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<bool, PlatformError> {
        self.record(Call::HasRole(guild_id, user_id, role_id));
        Ok(self.member_has(guild_id, user_id, role_id))
    }

    async fn add_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
        audit_reason: &str,
    ) -> Result<(), PlatformError> {
        self.record(Call::AddRole(
            guild_id,
            user_id,
            role_id,
            audit_reason.to_string(),
        ));
        if let Some(err) = &self.grant_error {
            return Err(err.clone());
        }
        self.give(guild_id, user_id, role_id);
        Ok(())
    }
}

/// Responder that remembers what it sent.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    fail_replies: bool,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A responder whose primary replies never get delivered.
    pub fn failing() -> Self {
        Self {
            fail_replies: true,
            ..Self::default()
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Responder for RecordingResponder {
    async fn reply(&self, content: String) -> Result<(), PlatformError> {
        if self.fail_replies {
            return Err(PlatformError::Unknown("Unknown interaction".to_string()));
        }
        self.replies.lock().unwrap().push(content);
        Ok(())
    }

    fn notify_detached(&self, content: String) {
        self.notices.lock().unwrap().push(content);
    }
}
