//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool (accounts, sessions, profiles), the live
//! in-memory campus, the optional chat model and the chat rate limiter.
//! Clone is required by Axum; all inner fields are Arc-wrapped or Clone.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::campus::Campus;
use crate::chat::{ChatError, GenerativeModel};
use crate::rate_limit::RateLimiter;

/// Chat relay backend. Holds the configuration error when no model could be
/// built, so the relay can report it per request.
#[derive(Clone)]
pub enum ChatBackend {
    Ready(Arc<dyn GenerativeModel>),
    Unavailable(Arc<str>),
}

impl ChatBackend {
    #[must_use]
    pub fn from_result<M>(result: Result<M, ChatError>) -> Self
    where
        M: GenerativeModel + 'static,
    {
        match result {
            Ok(model) => Self::Ready(Arc::new(model)),
            Err(e) => Self::Unavailable(e.to_string().into()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub campus: Arc<RwLock<Campus>>,
    pub chat: ChatBackend,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, campus: Campus, chat: ChatBackend) -> Self {
        Self { pool, campus: Arc::new(RwLock::new(campus)), chat, rate_limiter: RateLimiter::new() }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
