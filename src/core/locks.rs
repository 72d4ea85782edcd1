//! Guild-scoped async locks.
//!
//! Looking up a role by name and creating it when absent is not atomic on Discord's side,
//! so two concurrent first uses in one guild would both create a role. Holding the guild's
//! lock across lookup and creation closes that window within this process.

use poise::serenity_prelude::GuildId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of one async mutex per guild.
///
/// Entries are created on first use and never evicted, so the map grows with the number of
/// guilds the bot has served `user-guard` in, one small mutex each.
#[derive(Debug, Default)]
pub struct GuildLocks {
    inner: Mutex<HashMap<GuildId, Arc<AsyncMutex<()>>>>,
}

impl GuildLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock of `guild_id`. Released when the guard drops.
    pub async fn lock(&self, guild_id: GuildId) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(guild_id).or_default())
        };
        mutex.lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_guild_is_exclusive() {
        let locks = GuildLocks::new();
        let guild = GuildId::new(1);

        let guard = locks.lock(guild).await;
        let second = tokio::time::timeout(Duration::from_millis(20), locks.lock(guild)).await;
        assert!(second.is_err());

        drop(guard);
        let second = tokio::time::timeout(Duration::from_millis(20), locks.lock(guild)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_different_guilds_do_not_block() {
        let locks = GuildLocks::new();

        let _first = locks.lock(GuildId::new(1)).await;
        let second =
            tokio::time::timeout(Duration::from_millis(20), locks.lock(GuildId::new(2))).await;
        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_relocking_reuses_guild_entry() {
        let locks = GuildLocks::new();
        let guild = GuildId::new(1);

        drop(locks.lock(guild).await);
        drop(locks.lock(guild).await);
        assert_eq!(locks.len(), 1);
    }
}
