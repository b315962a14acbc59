//! Session management
//!
//! In-memory keyed store of conversation state. The map itself sits behind
//! a synchronous read-write lock that is only held for lookup, insert, and
//! removal; each session carries its own async mutex so concurrent turns
//! for the same session id serialize while distinct sessions run fully in
//! parallel. The map lock is never held across an await point.
//!
//! Sessions are evicted only for idleness, never for capacity. Reaping
//! runs on an explicit background interval rather than being attached
//! probabilistically to request handling.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use parking_lot::RwLock;
use tokio::sync::{watch, Mutex};

use lead_agent_core::ConversationState;

/// Handle to one session's state
pub type SessionHandle = Arc<Mutex<ConversationState>>;

/// In-memory session store
pub struct SessionManager {
    sessions: RwLock<HashMap<String, SessionHandle>>,
    /// Idle window after which a session is reaped
    max_idle: ChronoDuration,
    /// Interval between reaper sweeps
    cleanup_interval: Duration,
}

impl SessionManager {
    /// Store with a one-hour idle window and five-minute sweeps
    pub fn new() -> Self {
        Self::with_config(Duration::from_secs(3600), Duration::from_secs(300))
    }

    /// Store with custom idle window and sweep interval
    pub fn with_config(max_idle: Duration, cleanup_interval: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_idle: ChronoDuration::from_std(max_idle)
                .unwrap_or_else(|_| ChronoDuration::hours(1)),
            cleanup_interval,
        }
    }

    /// Get the session for an id, creating it on first use
    ///
    /// Calling this twice with the same id before any reap returns the same
    /// handle, with state accumulated across calls.
    pub fn get_or_create(&self, session_id: &str, client_id: &str) -> SessionHandle {
        if let Some(handle) = self.sessions.read().get(session_id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write();
        // Re-check under the write lock; another request may have created it.
        Arc::clone(sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::info!(session_id, client_id, "created session");
            Arc::new(Mutex::new(ConversationState::new(session_id, client_id)))
        }))
    }

    /// Look up an existing session
    pub fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Remove a session
    pub fn remove(&self, session_id: &str) {
        if self.sessions.write().remove(session_id).is_some() {
            tracing::info!(session_id, "removed session");
        }
    }

    /// Active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Session ids currently in the store
    pub fn list(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    /// Remove every session idle longer than the configured window
    ///
    /// A session whose turn lock is currently held is mid-request and
    /// therefore not idle; it is skipped and revisited on the next sweep.
    pub fn reap_expired(&self) -> usize {
        let expired: Vec<String> = {
            let sessions = self.sessions.read();
            sessions
                .iter()
                .filter_map(|(id, handle)| {
                    let state = handle.try_lock().ok()?;
                    state.is_expired(self.max_idle).then(|| id.clone())
                })
                .collect()
        };

        let mut removed = 0;
        if !expired.is_empty() {
            let mut sessions = self.sessions.write();
            for id in expired {
                if let Some(handle) = sessions.get(&id) {
                    // Re-check: the session may have been touched since the scan.
                    let still_expired = handle
                        .try_lock()
                        .map(|state| state.is_expired(self.max_idle))
                        .unwrap_or(false);
                    if still_expired {
                        sessions.remove(&id);
                        removed += 1;
                        tracing::info!(session_id = %id, "expired session reaped");
                    }
                }
            }
        }
        removed
    }

    /// Start the background reaper task
    ///
    /// Returns a shutdown sender; sending `true` stops the task.
    pub fn start_reaper(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = manager.reap_expired();
                        if removed > 0 {
                            tracing::info!(
                                removed,
                                remaining = manager.count(),
                                "session sweep complete"
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("session reaper shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let manager = SessionManager::new();
        let first = manager.get_or_create("s-1", "default");
        let second = manager.get_or_create("s-1", "default");

        // Same underlying state object.
        assert!(Arc::ptr_eq(&first, &second));

        first.lock().await.message_count += 1;
        assert_eq!(second.lock().await.message_count, 1);
        assert_eq!(manager.count(), 1);
    }

    #[tokio::test]
    async fn test_reap_removes_only_idle_sessions() {
        let manager = SessionManager::new();
        let stale = manager.get_or_create("stale", "default");
        manager.get_or_create("fresh", "default");

        stale.lock().await.last_activity = Utc::now() - ChronoDuration::hours(2);

        let removed = manager.reap_expired();
        assert_eq!(removed, 1);
        assert!(manager.get("stale").is_none());
        assert!(manager.get("fresh").is_some());
    }

    #[tokio::test]
    async fn test_locked_session_survives_sweep() {
        let manager = SessionManager::new();
        let handle = manager.get_or_create("busy", "default");
        handle.lock().await.last_activity = Utc::now() - ChronoDuration::hours(2);

        let guard = handle.lock().await;
        assert_eq!(manager.reap_expired(), 0);
        drop(guard);

        assert_eq!(manager.reap_expired(), 1);
    }

    #[tokio::test]
    async fn test_reaper_task_runs() {
        let manager = Arc::new(SessionManager::with_config(
            Duration::from_millis(10),
            Duration::from_millis(20),
        ));
        let handle = manager.get_or_create("s-1", "default");
        handle.lock().await.last_activity = Utc::now() - ChronoDuration::hours(1);

        let shutdown = manager.start_reaper();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(manager.count(), 0);

        let _ = shutdown.send(true);
    }
}
