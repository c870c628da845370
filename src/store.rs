//! In-memory poll repository
//!
//! `PollStore` is the single owner of every poll. All mutation happens under
//! one write lock, so a vote's read-modify-write on the tallies is atomic and
//! concurrent votes never lose an increment. Reads hand out cloned snapshots.
//!
//! The store never generates identifiers or reads a clock; both are supplied
//! by the caller (see [`crate::service`]).

use crate::config::StoreConfig;
use crate::types::{NewPoll, OptionCount, Poll, PollId, Timestamp};
use crate::{Error, Result, internal_error, invalid_argument};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// Authoritative mapping from poll id to poll
#[derive(Debug, Default)]
pub struct PollStore {
    polls: RwLock<HashMap<PollId, Poll>>,
    config: StoreConfig,
}

impl PollStore {
    /// Create an empty store enforcing the given input limits
    pub fn new(config: StoreConfig) -> Self {
        Self {
            polls: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Create an empty store with testing limits
    pub fn for_testing() -> Self {
        Self::new(StoreConfig::for_testing())
    }

    /// Limits this store enforces
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Insert a new poll with no votes and return a snapshot of it
    ///
    /// Input is validated before the duplicate check, so a failed create
    /// never changes the store.
    pub fn create_poll(&self, new_poll: NewPoll) -> Result<Poll> {
        self.validate(&new_poll)?;

        let mut polls = self
            .polls
            .write()
            .map_err(|_| internal_error!("Poll store write error"))?;

        if polls.contains_key(&new_poll.id) {
            return Err(Error::duplicate_id(new_poll.id));
        }

        let poll = Poll::new(new_poll);
        polls.insert(poll.id.clone(), poll.clone());
        Ok(poll)
    }

    /// Record one vote and return the poll as it stands after the vote
    pub fn vote(&self, poll_id: &str, option: &str, at: Timestamp) -> Result<Poll> {
        require("poll_id", poll_id)?;
        require("option", option)?;

        let mut polls = self
            .polls
            .write()
            .map_err(|_| internal_error!("Poll store write error"))?;

        let poll = polls
            .get_mut(poll_id)
            .ok_or_else(|| Error::not_found(poll_id))?;

        poll.record_vote(option, at)?;
        Ok(poll.clone())
    }

    /// Snapshot of a single poll
    pub fn get_poll(&self, poll_id: &str) -> Result<Poll> {
        require("poll_id", poll_id)?;

        let polls = self
            .polls
            .read()
            .map_err(|_| internal_error!("Poll store read error"))?;

        polls
            .get(poll_id)
            .cloned()
            .ok_or_else(|| Error::not_found(poll_id))
    }

    /// Aggregated `(option, count)` pairs for a poll
    ///
    /// Only options with at least one vote are listed, in the order they
    /// first received a vote.
    pub fn get_poll_results(&self, poll_id: &str) -> Result<Vec<OptionCount>> {
        require("poll_id", poll_id)?;

        let polls = self
            .polls
            .read()
            .map_err(|_| internal_error!("Poll store read error"))?;

        polls
            .get(poll_id)
            .map(Poll::results)
            .ok_or_else(|| Error::not_found(poll_id))
    }

    /// Whether a poll with this id exists
    pub fn contains(&self, poll_id: &str) -> Result<bool> {
        let polls = self
            .polls
            .read()
            .map_err(|_| internal_error!("Poll store read error"))?;
        Ok(polls.contains_key(poll_id))
    }

    /// Number of polls held
    pub fn len(&self) -> Result<usize> {
        let polls = self
            .polls
            .read()
            .map_err(|_| internal_error!("Poll store read error"))?;
        Ok(polls.len())
    }

    /// Whether the store holds no polls
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn validate(&self, new_poll: &NewPoll) -> Result<()> {
        let limits = &self.config;

        require("id", &new_poll.id)?;
        if new_poll.id.len() > limits.max_id_len {
            return Err(invalid_argument!(
                "id",
                "exceeds {} bytes",
                limits.max_id_len
            ));
        }

        require("question", new_poll.question.trim())?;
        if new_poll.question.len() > limits.max_question_len {
            return Err(invalid_argument!(
                "question",
                "exceeds {} bytes",
                limits.max_question_len
            ));
        }

        if new_poll.options.is_empty() {
            return Err(invalid_argument!("options"));
        }
        if new_poll.options.len() > limits.max_options {
            return Err(invalid_argument!(
                "options",
                "exceeds {} entries",
                limits.max_options
            ));
        }

        let mut seen = HashSet::with_capacity(new_poll.options.len());
        for option in &new_poll.options {
            require("option", option.trim())?;
            if option.len() > limits.max_label_len {
                return Err(invalid_argument!(
                    "option",
                    "exceeds {} bytes",
                    limits.max_label_len
                ));
            }
            if !seen.insert(option.as_str()) {
                return Err(invalid_argument!("option", "duplicate label {}", option));
            }
        }

        Ok(())
    }
}

/// Reject empty required inputs
fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(field));
    }
    Ok(())
}
