//! Per-session request serialization.
//!
//! The cart is read from the session, changed and written back. Two
//! mutations from the same browser running at once would both start from
//! the same snapshot and the later write would drop the earlier change.
//! This middleware sits outside the session layer and holds a per-session
//! lock for the whole request, including the layer's trailing save.
//!
//! Only mutating methods are serialized; `GET` and `HEAD` pass straight
//! through. Requests without a session cookie have no shared state yet and
//! are not locked.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, header},
    middleware::Next,
    response::Response,
};
use moka::future::Cache;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::session::SESSION_COOKIE_NAME;

/// Upper bound on tracked sessions.
const MAX_TRACKED_SESSIONS: u64 = 100_000;

/// Locks of sessions idle this long are dropped.
const LOCK_IDLE_SECONDS: u64 = 600;

/// Lock table keyed by session cookie value.
#[derive(Clone)]
pub struct SessionLocks {
    locks: Cache<String, Arc<Mutex<()>>>,
}

impl Default for SessionLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        let locks = Cache::builder()
            .max_capacity(MAX_TRACKED_SESSIONS)
            .time_to_idle(Duration::from_secs(LOCK_IDLE_SECONDS))
            .build();
        Self { locks }
    }

    /// Wait for exclusive access to a session.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .get_with(session_id.to_owned(), async { Arc::new(Mutex::new(())) })
            .await;
        lock.lock_owned().await
    }
}

/// Middleware that runs mutating requests of one session one at a time.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::GET || request.method() == Method::HEAD {
        return next.run(request).await;
    }

    let Some(session_id) = session_cookie(request.headers()) else {
        return next.run(request).await;
    };

    let _guard = locks.acquire(&session_id).await;
    next.run(request).await
}

/// Extract the session cookie value from the request headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.to_owned())
        .filter(|value| !value.is_empty())
}
