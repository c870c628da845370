//! # Core Types for the Poll Store
//!
//! This module defines the data structures shared by the store, the service
//! layer and the wire layer.
//!
//! ## Type Categories
//!
//! ### Identifiers and Time
//! - [`PollId`]: opaque poll identifier, unique within a store
//! - [`Timestamp`]: UTC instant supplied by the caller's clock
//!
//! ### Core Entities
//! - [`Poll`]: question, fixed options and running vote tallies
//! - [`OptionCount`]: one aggregated `(option, count)` pair
//!
//! ### Inputs
//! - [`CreatePollRequest`]: what a caller sends to create a poll
//! - [`NewPoll`]: a fully resolved poll ready for insertion
//!
//! ## Usage Examples
//!
//! ```rust
//! use poll::types::*;
//! use chrono::Utc;
//!
//! let mut poll = Poll::new(NewPoll {
//!     id: "colors".to_string(),
//!     question: "Color?".to_string(),
//!     options: vec!["red".to_string(), "blue".to_string()],
//!     created_at: Utc::now(),
//! });
//!
//! poll.record_vote("blue", Utc::now()).unwrap();
//! assert_eq!(poll.votes_for("blue"), 1);
//! assert_eq!(poll.total_votes(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Opaque poll identifier
///
/// Either supplied by the caller or generated by the service layer. The store
/// only enforces uniqueness, never the format.
pub type PollId = String;

/// Instant used for creation and update stamps
pub type Timestamp = DateTime<Utc>;

/// One aggregated result entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCount {
    pub option: String,
    pub count: u64,
}

/// A poll and the votes cast on it
///
/// `options` is fixed at creation. Votes are kept as a tally list in the order
/// each option first received a vote, so options nobody picked never appear
/// in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Unique poll identifier, immutable after creation
    pub id: PollId,

    /// Free-text question
    pub question: String,

    /// Ordered, distinct option labels
    pub options: Vec<String>,

    /// Vote tallies in first-appearance order
    #[serde(rename = "votes")]
    pub tallies: Vec<OptionCount>,

    /// When the poll was created
    pub created_at: Timestamp,

    /// When the last vote was recorded, `None` until the first vote
    pub updated_at: Option<Timestamp>,
}

impl Poll {
    /// Build a poll with no votes from a resolved creation request
    pub fn new(new_poll: NewPoll) -> Self {
        Self {
            id: new_poll.id,
            question: new_poll.question,
            options: new_poll.options,
            tallies: Vec::new(),
            created_at: new_poll.created_at,
            updated_at: None,
        }
    }

    /// Check whether `option` is exactly one of this poll's options
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Record a single vote for `option`
    ///
    /// Fails with [`Error::InvalidOption`] and leaves the poll untouched when
    /// the option is not one of the poll's options.
    pub fn record_vote(&mut self, option: &str, at: Timestamp) -> Result<()> {
        if !self.has_option(option) {
            return Err(Error::invalid_option(option));
        }

        match self.tallies.iter_mut().find(|t| t.option == option) {
            Some(tally) => tally.count += 1,
            None => self.tallies.push(OptionCount {
                option: option.to_string(),
                count: 1,
            }),
        }
        self.updated_at = Some(at);
        Ok(())
    }

    /// Aggregated results: voted options only, first-appearance order
    pub fn results(&self) -> Vec<OptionCount> {
        self.tallies.clone()
    }

    /// Votes recorded for `option` (zero for unvoted or unknown options)
    pub fn votes_for(&self, option: &str) -> u64 {
        self.tallies
            .iter()
            .find(|t| t.option == option)
            .map_or(0, |t| t.count)
    }

    /// Total number of votes recorded on this poll
    pub fn total_votes(&self) -> u64 {
        self.tallies.iter().map(|t| t.count).sum()
    }
}

/// Caller input for creating a poll
///
/// `id` is optional; when absent the service layer generates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePollRequest {
    #[serde(default)]
    pub id: Option<PollId>,
    pub question: String,
    pub options: Vec<String>,
}

impl CreatePollRequest {
    /// Request with a generated identifier
    pub fn new(question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: None,
            question: question.into(),
            options,
        }
    }

    /// Request with a caller-chosen identifier
    pub fn with_id(id: impl Into<PollId>, question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: Some(id.into()),
            question: question.into(),
            options,
        }
    }
}

/// A creation request with its identifier and timestamp resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPoll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub created_at: Timestamp,
}
