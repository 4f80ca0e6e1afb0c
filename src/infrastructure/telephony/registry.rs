//! Session registry
//!
//! In-memory store of live provider sessions, keyed by session id. The
//! registry exclusively owns the session set; callers hold ids only. A
//! background sweep reclaims sessions whose TTL has passed. Readers run
//! concurrently, writers are exclusive, and no lock is ever held across
//! provider network I/O.

use crate::domain::shared::clock::{Clock, SystemClock};
use crate::domain::telephony::CallSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info};

/// Default interval between expiry sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Registry of active provider sessions
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, CallSession>>>,
    clock: Arc<dyn Clock>,
    stop_tx: watch::Sender<bool>,
}

impl SessionRegistry {
    /// Create a registry and start its expiry sweep
    pub fn new() -> Self {
        Self::with_options(DEFAULT_SWEEP_INTERVAL, Arc::new(SystemClock))
    }

    /// Create a registry with an explicit sweep interval and clock
    pub fn with_options(sweep_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        let sessions: Arc<RwLock<HashMap<String, CallSession>>> =
            Arc::new(RwLock::new(HashMap::new()));
        let (stop_tx, stop_rx) = watch::channel(false);

        Self::spawn_sweep(sessions.clone(), clock.clone(), sweep_interval, stop_rx);

        Self {
            sessions,
            clock,
            stop_tx,
        }
    }

    /// Insert a session, keyed by its id. Duplicate ids overwrite
    /// (last write wins); callers must not generate colliding ids.
    pub async fn add(&self, session: CallSession) {
        let session_id = session.session_id.clone();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), session);
        debug!(session_id = %session_id, "session added");
    }

    /// Point lookup; does not touch expiry
    pub async fn get(&self, session_id: &str) -> Option<CallSession> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Delete a session if present, returning it. Removing an absent id
    /// is not an error.
    pub async fn remove(&self, session_id: &str) -> Option<CallSession> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id);
        if removed.is_some() {
            debug!(session_id = %session_id, "session removed");
        }
        removed
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remove every session whose TTL has passed; returns the count removed.
    /// The background sweep calls this on its interval.
    pub async fn sweep_expired(&self) -> usize {
        Self::remove_expired(&self.sessions, self.clock.as_ref()).await
    }

    /// Stop the background sweep. Call exactly once at shutdown; the
    /// session set itself stays usable afterwards.
    pub fn close(&self) {
        let _ = self.stop_tx.send(true);
        info!("session registry closed");
    }

    async fn remove_expired(
        sessions: &RwLock<HashMap<String, CallSession>>,
        clock: &dyn Clock,
    ) -> usize {
        let now = clock.now();
        let mut sessions = sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        let expired = before - sessions.len();

        if expired > 0 {
            info!(count = expired, "expired sessions removed");
        }

        expired
    }

    fn spawn_sweep(
        sessions: Arc<RwLock<HashMap<String, CallSession>>>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        mut stop_rx: watch::Receiver<bool>,
    ) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        Self::remove_expired(&sessions, clock.as_ref()).await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            debug!("session registry sweep stopped");
                            return;
                        }
                    }
                }
            }
        });
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::clock::test_support::ManualClock;
    use crate::domain::telephony::SessionStatus;
    use chrono::{DateTime, Utc};

    fn session(id: &str, expires_at: DateTime<Utc>) -> CallSession {
        CallSession {
            session_id: id.to_string(),
            phone_number: "+491512345678".to_string(),
            sdp_offer: "v=0".to_string(),
            status: SessionStatus::Initialized,
            provider_call_id: None,
            created_at: expires_at - chrono::Duration::minutes(5),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_add_get_remove() {
        let registry = SessionRegistry::new();
        let expires = Utc::now() + chrono::Duration::minutes(5);

        registry.add(session("sess_1", expires)).await;
        assert_eq!(registry.len().await, 1);

        let found = registry.get("sess_1").await;
        assert!(found.is_some());
        assert_eq!(found.unwrap().phone_number, "+491512345678");

        let removed = registry.remove("sess_1").await;
        assert!(removed.is_some());
        assert!(registry.get("sess_1").await.is_none());
        assert!(registry.is_empty().await);

        registry.close();
    }

    #[tokio::test]
    async fn test_remove_absent_is_not_an_error() {
        let registry = SessionRegistry::new();
        assert!(registry.remove("no-such-session").await.is_none());
        registry.close();
    }

    #[tokio::test]
    async fn test_duplicate_add_overwrites() {
        let registry = SessionRegistry::new();
        let expires = Utc::now() + chrono::Duration::minutes(5);

        registry.add(session("sess_1", expires)).await;
        let mut replacement = session("sess_1", expires);
        replacement.phone_number = "+14155552671".to_string();
        registry.add(replacement).await;

        assert_eq!(registry.len().await, 1);
        assert_eq!(
            registry.get("sess_1").await.unwrap().phone_number,
            "+14155552671"
        );

        registry.close();
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let registry =
            SessionRegistry::with_options(Duration::from_secs(3600), clock.clone());

        registry
            .add(session("expiring", start + chrono::Duration::minutes(5)))
            .await;
        registry
            .add(session("fresh", start + chrono::Duration::minutes(30)))
            .await;

        // Nothing has expired yet
        assert_eq!(registry.sweep_expired().await, 0);

        clock.advance(chrono::Duration::minutes(6));
        assert_eq!(registry.sweep_expired().await, 1);

        assert!(registry.get("expiring").await.is_none());
        assert!(registry.get("fresh").await.is_some());

        registry.close();
    }

    #[tokio::test]
    async fn test_background_sweep_reclaims_expired_sessions() {
        let registry = SessionRegistry::with_options(
            Duration::from_millis(20),
            Arc::new(SystemClock),
        );

        // Already past its TTL when added
        registry
            .add(session("stale", Utc::now() - chrono::Duration::seconds(1)))
            .await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(registry.get("stale").await.is_none());
        registry.close();
    }

    #[tokio::test]
    async fn test_close_stops_sweep_but_keeps_operations() {
        let registry = SessionRegistry::with_options(
            Duration::from_millis(20),
            Arc::new(SystemClock),
        );
        registry.close();
        tokio::time::sleep(Duration::from_millis(40)).await;

        // The sweep is gone: an expired session stays put
        registry
            .add(session("stale", Utc::now() - chrono::Duration::seconds(1)))
            .await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(registry.get("stale").await.is_some());

        // Foreground operations still work after close
        assert_eq!(registry.len().await, 1);
        assert!(registry.remove("stale").await.is_some());
    }

    #[tokio::test]
    async fn test_close_with_no_sessions() {
        let registry = SessionRegistry::new();
        registry.close();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_operations_preserve_count() {
        let registry = Arc::new(SessionRegistry::new());
        let expires = Utc::now() + chrono::Duration::minutes(5);

        let mut handles = Vec::new();
        for task in 0..8 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..25 {
                    let id = format!("sess_{}_{}", task, i);
                    registry.add(session(&id, expires)).await;
                    registry.get(&id).await;
                    // Every other session is removed again
                    if i % 2 == 0 {
                        registry.remove(&id).await;
                    }
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // 8 tasks x 25 adds, 13 removes each (i = 0,2,..,24)
        assert_eq!(registry.len().await, 8 * (25 - 13));
        registry.close();
    }
}
