//! Per-conversation async locks.
//!
//! `ConversationStore::add_turn` requires at most one mutation in flight per
//! conversation id. Handlers take the id's lock for the whole request so a
//! slow reply generator cannot let two turns for one id interleave.
//!
//! Entries live only while someone holds or waits for them; the last
//! [`ConversationLease`] to drop removes its id from the registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::ConversationId;

type Registry = HashMap<ConversationId, Arc<Mutex<()>>>;

#[derive(Debug, Default)]
pub struct ConversationLocks {
    // Never held across an await, so a std mutex is enough and lets
    // `ConversationLease::drop` clean up synchronously.
    locks: Arc<StdMutex<Registry>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other request holds `id`. The lock is released when
    /// the lease drops.
    pub async fn acquire(&self, id: ConversationId) -> ConversationLease {
        let lock = {
            let mut registry = lock_registry(&self.locks);
            Arc::clone(registry.entry(id).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;
        ConversationLease {
            id,
            guard: Some(guard),
            lock,
            registry: Arc::clone(&self.locks),
        }
    }

    /// Number of ids currently held or waited on.
    pub fn tracked(&self) -> usize {
        lock_registry(&self.locks).len()
    }
}

fn lock_registry(registry: &StdMutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive hold on one conversation id.
#[derive(Debug)]
pub struct ConversationLease {
    id: ConversationId,
    guard: Option<OwnedMutexGuard<()>>,
    lock: Arc<Mutex<()>>,
    registry: Arc<StdMutex<Registry>>,
}

impl ConversationLease {
    pub fn id(&self) -> ConversationId {
        self.id
    }
}

impl Drop for ConversationLease {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Waiters clone the Arc under the registry lock, so two references
        // (registry + this lease) means nobody else is queued for the id.
        let mut registry = lock_registry(&self.registry);
        let idle = registry
            .get(&self.id)
            .map_or(false, |entry| Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(&self.lock) == 2);
        if idle {
            registry.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_id_is_exclusive() {
        let locks = ConversationLocks::new();
        let id = ConversationId::new();

        let guard = locks.acquire(id).await;
        let second = tokio::time::timeout(Duration::from_millis(20), locks.acquire(id)).await;
        assert!(second.is_err());

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(20), locks.acquire(id)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn different_ids_do_not_block() {
        let locks = ConversationLocks::new();
        let _a = locks.acquire(ConversationId::new()).await;
        let b = tokio::time::timeout(Duration::from_millis(20), locks.acquire(ConversationId::new())).await;

        assert!(b.is_ok());
        assert_eq!(locks.tracked(), 2);
    }

    #[tokio::test]
    async fn released_ids_leave_the_registry() {
        let locks = ConversationLocks::new();
        for _ in 0..200 {
            let lease = locks.acquire(ConversationId::new()).await;
            assert_eq!(locks.tracked(), 1);
            drop(lease);
        }

        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn entry_survives_while_someone_waits() {
        let locks = Arc::new(ConversationLocks::new());
        let id = ConversationId::new();
        let first = locks.acquire(id).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let lease = locks.acquire(id).await;
                lease.id()
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(first);
        assert_eq!(waiter.await.unwrap(), id);

        assert_eq!(locks.tracked(), 0);
    }
}
