//! Core command logic - framework-agnostic, talks to Discord only through the traits in
//! [`platform`].

/// Fixed greeting text
pub mod greeting;
/// Per-guild serialization of role lookup and creation
pub mod locks;
/// Capability traits the bot layer implements against Discord
pub mod platform;
/// The `user-guard` protocol: resolve or create the role, then grant it once
pub mod role_guard;
