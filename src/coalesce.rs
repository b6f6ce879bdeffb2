//! Request Coalescing
//!
//! Collapses concurrent calls for the same key into one execution.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Completion slot shared by every caller of one wave.
type Pending<T> = watch::Receiver<Option<Result<T>>>;

// == Coalescer ==
/// Per-key in-flight call deduplication.
///
/// The first caller for a key starts the work on its own task; callers that
/// arrive while it runs wait on the same completion signal and receive a clone
/// of the same result. Once the result is published the key is forgotten, so
/// the next call starts a fresh wave.
pub struct Coalescer<T> {
    calls: Arc<Mutex<HashMap<String, Pending<T>>>>,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T> Coalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Runs `work` for `key` unless a call for it is already in flight, in
    /// which case the in-flight result is awaited instead.
    ///
    /// The work runs to completion even if every caller stops waiting.
    pub async fn run<F, Fut>(&self, key: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (mut pending, done) = {
            let mut calls = self.calls.lock();
            if let Some(pending) = calls.get(key) {
                debug!(key, "joining in-flight call");
                (pending.clone(), None)
            } else {
                let (done, pending) = watch::channel(None);
                calls.insert(key.to_string(), pending.clone());
                (pending, Some(done))
            }
        };

        if let Some(done) = done {
            let wave = Wave {
                calls: Arc::clone(&self.calls),
                key: key.to_string(),
                done,
            };
            let fut = work();
            tokio::spawn(async move {
                let result = fut.await;
                wave.finish(result);
            });
        }

        let result = match pending.wait_for(Option::is_some).await {
            Ok(result) => (*result)
                .clone()
                .unwrap_or_else(|| Err(CacheError::Internal("empty call result".to_string()))),
            Err(_) => Err(CacheError::Internal(format!(
                "in-flight call for {} ended without a result",
                key
            ))),
        };
        result
    }

    /// Number of keys with a call in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}

/// The running side of one wave.
///
/// Dropping it forgets the key before the sender goes away, so a panicking
/// call never leaves a dead entry behind for later callers to join.
struct Wave<T> {
    calls: Arc<Mutex<HashMap<String, Pending<T>>>>,
    key: String,
    done: watch::Sender<Option<Result<T>>>,
}

impl<T> Wave<T> {
    fn finish(self, result: Result<T>) {
        self.done.send_replace(Some(result));
    }
}

impl<T> Drop for Wave<T> {
    fn drop(&mut self) {
        self.calls.lock().remove(&self.key);
    }
}
