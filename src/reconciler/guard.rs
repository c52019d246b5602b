//! Process-wide serialization guard.
//!
//! A string-keyed async mutex: holders of the same key serialize, holders
//! of different keys never block each other, and a holder locking a second
//! key cannot deadlock against itself. User create and delete serialize on
//! `cluster/<id>/users` so the remote user-management endpoints never see
//! interleaved writes for one cluster.
//!
//! In-process only: two controllers pointed at the same cluster are not
//! coordinated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard returned by [`KeyedMutex::lock`]; the key is released on drop.
pub type KeyedGuard = OwnedMutexGuard<()>;

#[derive(Default)]
pub struct KeyedMutex {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another holder has it.
    pub async fn lock(&self, key: &str) -> KeyedGuard {
        let mutex = {
            let mut locks = self.locks.lock().expect("keyed mutex map poisoned");
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        mutex.lock_owned().await
    }
}
