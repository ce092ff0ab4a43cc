//! Single-flight candidate attendee search
//!
//! Every search takes the next generation number. Only a response whose
//! generation is still the latest when it arrives may replace the candidate
//! list; older responses are dropped. Requests already sent to the store are
//! not cancelled.

use crate::collaborators::{AttendeeStore, MembershipQuery};
use attendee_model::Membership;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// What happened to one search invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the candidate list
    Applied { generation: u64, candidates: usize },
    /// A newer search was issued first; results were dropped
    Superseded { generation: u64 },
    /// The store failed; the candidate list is unchanged
    Failed { generation: u64 },
    /// The card was not in a mode that takes candidates
    Ignored,
}

impl SearchOutcome {
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Derive the first-name lookup key from raw input
///
/// Trims, keeps the first whitespace-delimited token and strips zero-width
/// spaces the editor leaves around the caret.
#[must_use]
pub fn search_key(input: &str) -> String {
    input
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| *c != ZERO_WIDTH_SPACE)
        .collect()
}

/// Candidate search handle
///
/// Cheap to clone; clones share the generation counter and candidate list.
#[derive(Clone)]
pub struct CandidateSearch {
    store: Arc<dyn AttendeeStore>,
    include: String,
    debounce: Duration,
    latest_generation: Arc<AtomicU64>,
    candidates: Arc<Mutex<Vec<Membership>>>,
}

impl std::fmt::Debug for CandidateSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateSearch")
            .field("include", &self.include)
            .field("debounce", &self.debounce)
            .field("latest_generation", &self.latest_generation())
            .field("candidates", &self.candidates.lock().len())
            .finish_non_exhaustive()
    }
}

impl CandidateSearch {
    /// Create new search over `store`
    #[must_use]
    pub fn new(store: Arc<dyn AttendeeStore>, include: impl Into<String>, debounce: Duration) -> Self {
        Self {
            store,
            include: include.into(),
            debounce,
            latest_generation: Arc::new(AtomicU64::new(0)),
            candidates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Current candidate list
    #[must_use]
    pub fn candidates(&self) -> Vec<Membership> {
        self.candidates.lock().clone()
    }

    /// Most recently issued generation
    #[inline]
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest_generation.load(AtomicOrdering::Acquire)
    }

    /// Drop the results of every search still in flight
    pub fn supersede(&self) -> u64 {
        self.latest_generation.fetch_add(1, AtomicOrdering::AcqRel) + 1
    }

    /// Drop in-flight results and clear the candidate list
    pub fn reset(&self) -> u64 {
        let generation = self.supersede();
        self.candidates.lock().clear();
        generation
    }

    /// Search candidates for the raw `input`
    ///
    /// Waits out the debounce period first and skips the query entirely if a
    /// newer search starts meanwhile. Store failures are logged and leave the
    /// candidate list unchanged.
    pub async fn search(&self, input: &str) -> SearchOutcome {
        let generation = self.supersede();

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if !self.is_latest(generation) {
                tracing::trace!(generation, "search superseded during debounce");
                return SearchOutcome::Superseded { generation };
            }
        }

        let key = search_key(input);
        let query = MembershipQuery::all(self.include.clone()).with_member_firstname(key.clone());
        tracing::debug!(generation, key = %key, "searching candidate attendees");

        let result = self.store.query_memberships(&query).await;

        let mut candidates = self.candidates.lock();
        if !self.is_latest(generation) {
            tracing::debug!(generation, "discarding superseded search results");
            return SearchOutcome::Superseded { generation };
        }

        match result {
            Ok(found) => {
                let typed: String = input.chars().filter(|c| *c != ZERO_WIDTH_SPACE).collect();
                let typed = typed.trim();
                *candidates = found
                    .into_iter()
                    .filter(|m| m.label() != typed)
                    .collect();
                SearchOutcome::Applied {
                    generation,
                    candidates: candidates.len(),
                }
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "candidate search failed");
                SearchOutcome::Failed { generation }
            }
        }
    }

    #[inline]
    fn is_latest(&self, generation: u64) -> bool {
        self.latest_generation() == generation
    }
}
