//! Request-handling layer in front of the poll store
//!
//! The store only enforces invariants. This layer supplies what the store
//! deliberately does not own: fresh identifiers, timestamps and logging.

use crate::config::Config;
use crate::store::PollStore;
use crate::types::{CreatePollRequest, NewPoll, OptionCount, Poll, PollId, Timestamp};
use crate::{Error, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Source of identifiers for polls created without one
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> PollId;
}

/// Source of creation and update timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> PollId {
        Uuid::new_v4().to_string()
    }
}

/// Wall-clock UTC time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Entry point for all poll operations
pub struct PollService {
    store: Arc<PollStore>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl PollService {
    /// Service over `store` with UUID ids and the system clock
    pub fn new(store: Arc<PollStore>) -> Self {
        Self::with_parts(store, Box::new(UuidGenerator), Box::new(SystemClock))
    }

    /// Service with explicit id and time sources
    pub fn with_parts(
        store: Arc<PollStore>,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { store, ids, clock }
    }

    /// Build a fresh store from configuration and wrap it
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(PollStore::new(config.store.clone())))
    }

    /// Create a service for testing
    pub fn for_testing() -> Self {
        Self::new(Arc::new(PollStore::for_testing()))
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> &Arc<PollStore> {
        &self.store
    }

    /// Create a poll, generating an id when the request carries none
    pub fn create_poll(&self, request: CreatePollRequest) -> Result<Poll> {
        let generated = request.id.is_none();
        let id = request.id.unwrap_or_else(|| self.ids.generate());

        let result = self.store.create_poll(NewPoll {
            id,
            question: request.question,
            options: request.options,
            created_at: self.clock.now(),
        });

        match &result {
            Ok(poll) => info!(
                poll_id = %poll.id,
                options = poll.options.len(),
                generated,
                "📊 Poll created"
            ),
            Err(Error::DuplicateId { poll_id }) if generated => {
                warn!(poll_id = %poll_id, "Generated poll id collided with an existing poll");
            }
            Err(e) => warn!(error = %e, "Poll creation rejected"),
        }

        result
    }

    /// Cast one vote and return the updated poll
    pub fn vote(&self, poll_id: &str, option: &str) -> Result<Poll> {
        let result = self.store.vote(poll_id, option, self.clock.now());

        match &result {
            Ok(poll) => debug!(
                poll_id = %poll.id,
                option,
                total_votes = poll.total_votes(),
                "🗳️  Vote recorded"
            ),
            Err(e) => warn!(poll_id, option, error = %e, "Vote rejected"),
        }

        result
    }

    /// Snapshot of a poll
    pub fn get_poll(&self, poll_id: &str) -> Result<Poll> {
        let result = self.store.get_poll(poll_id);
        if let Err(e) = &result {
            debug!(poll_id, error = %e, "Poll lookup failed");
        }
        result
    }

    /// Aggregated results for a poll
    pub fn get_poll_results(&self, poll_id: &str) -> Result<Vec<OptionCount>> {
        let result = self.store.get_poll_results(poll_id);
        if let Err(e) = &result {
            debug!(poll_id, error = %e, "Poll results lookup failed");
        }
        result
    }
}

impl std::fmt::Debug for PollService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollService")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}
