//! Progress service: composes the scoring core with a progress store

pub mod catalog;
pub mod insights;
pub mod rewards;
pub mod sessions;
pub mod submission;

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use crate::models::Learner;
use crate::store::ProgressStore;

/// Entry point for every learner-facing operation.
///
/// Mutations for one learner (answers, session completion, reward claims)
/// run one at a time so mastery, XP and streak updates never interleave.
/// Different learners proceed in parallel.
pub struct ProgressService<S> {
    store: Arc<S>,
    config: ServiceConfig,
    locks: LearnerLocks,
}

impl<S: ProgressStore> ProgressService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            locks: LearnerLocks::default(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub(crate) async fn learner(&self, learner_id: Uuid) -> Result<Learner> {
        self.store
            .get_learner(learner_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Learner {}", learner_id)))
    }
}

/// One async mutex per learner. Entries exist only while a guard is held
/// or a caller is waiting for one.
#[derive(Default)]
struct LearnerLocks {
    inner: Arc<StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl LearnerLocks {
    async fn acquire(&self, learner_id: Uuid) -> LearnerGuard {
        let lock = self
            .entries()
            .entry(learner_id)
            .or_default()
            .clone();
        let guard = lock.clone().lock_owned().await;
        LearnerGuard {
            learner_id,
            lock,
            guard: Some(guard),
            locks: self.inner.clone(),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<Mutex<()>>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries().len()
    }
}

/// Held learner lock; releasing the last reference removes the map entry.
struct LearnerGuard {
    learner_id: Uuid,
    lock: Arc<Mutex<()>>,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl Drop for LearnerGuard {
    fn drop(&mut self) {
        let mut entries = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        self.guard.take();
        // The map and this guard are the only owners left: nobody is waiting.
        if Arc::strong_count(&self.lock) == 2 {
            entries.remove(&self.learner_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_locks_are_released_after_use() {
        let locks = LearnerLocks::default();
        for _ in 0..100 {
            let _guard = locks.acquire(Uuid::new_v4()).await;
        }
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_entry_kept_while_held() {
        let locks = LearnerLocks::default();
        let learner_id = Uuid::new_v4();

        let guard = locks.acquire(learner_id).await;
        assert_eq!(locks.len(), 1);
        drop(guard);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_contended_lock_is_cleaned_up() {
        let locks = Arc::new(LearnerLocks::default());
        let learner_id = Uuid::new_v4();
        let counter = Arc::new(StdMutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let locks = locks.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(learner_id).await;
                let value = *counter.lock().unwrap();
                tokio::task::yield_now().await;
                *counter.lock().unwrap() = value + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*counter.lock().unwrap(), 20);
        assert_eq!(locks.len(), 0);
    }
}
