//! Paging sessions over crawl results.
//!
//! A front end that lets a user page through discovered leaves keeps one
//! [`BrowseSession`] per user in a [`SessionStore`] it owns and passes
//! around. Sessions expire after a fixed time to live; expired sessions are
//! invisible to lookups and removed by [`SessionStore::evict_expired`].
//!
//! # Examples
//!
//! ```rust
//! use spelunk::classify::LeafResource;
//! use spelunk::session::SessionStore;
//! use reqwest::Url;
//! use std::time::Duration;
//!
//! let base = Url::parse("http://example.com/docs/").unwrap();
//! let leaves: Vec<LeafResource> = (0..25)
//!     .map(|i| LeafResource::from_url(&base.join(&format!("{}.pdf", i)).unwrap()))
//!     .collect();
//!
//! let mut store = SessionStore::new(Duration::from_secs(600));
//! store.insert(42_u64, leaves);
//!
//! let session = store.get_mut(&42).unwrap();
//! assert_eq!(session.page().len(), 10);
//! assert_eq!(session.next_page().map(|p| p.len()), Some(10));
//! assert_eq!(session.next_page().map(|p| p.len()), Some(5));
//! assert!(session.next_page().is_none());
//! ```

use crate::classify::LeafResource;

use std::collections::hash_map::{Entry, HashMap};
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::debug;

/// Leaves shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One user's position in a list of leaves.
#[derive(Debug, Clone)]
pub struct BrowseSession {
    leaves: Vec<LeafResource>,
    page: usize,
    page_size: usize,
    expires_at: Option<Instant>,
}

impl BrowseSession {
    /// Create a session on page 1. A zero page size is treated as 1, and a
    /// session without an expiry instant never expires.
    pub fn new(
        leaves: Vec<LeafResource>,
        page_size: usize,
        expires_at: impl Into<Option<Instant>>,
    ) -> Self {
        Self {
            leaves,
            page: 1,
            page_size: page_size.max(1),
            expires_at: expires_at.into(),
        }
    }

    /// Gets all leaves of the session.
    pub fn leaves(&self) -> &[LeafResource] {
        &self.leaves
    }

    /// Gets the current page number, starting at 1.
    pub fn page_number(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.leaves.len().div_ceil(self.page_size).max(1)
    }

    /// Leaves of the current page.
    pub fn page(&self) -> &[LeafResource] {
        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.leaves.len());
        self.leaves.get(start..end).unwrap_or_default()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Move to the next page and return it, or `None` on the last page.
    pub fn next_page(&mut self) -> Option<&[LeafResource]> {
        if !self.has_next() {
            return None;
        }
        self.page += 1;
        Some(self.page())
    }

    /// Move to the previous page and return it, or `None` on the first page.
    pub fn previous_page(&mut self) -> Option<&[LeafResource]> {
        if !self.has_previous() {
            return None;
        }
        self.page -= 1;
        Some(self.page())
    }

    /// Jump to page `number`, clamped to the valid range.
    pub fn go_to(&mut self, number: usize) -> &[LeafResource] {
        self.page = number.clamp(1, self.page_count());
        self.page()
    }

    /// Gets the expiry instant, `None` when the session never expires.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Caller-owned map from session key to [`BrowseSession`].
#[derive(Debug, Clone)]
pub struct SessionStore<K> {
    sessions: HashMap<K, BrowseSession>,
    ttl: Duration,
    page_size: usize,
}

impl<K: Eq + Hash> SessionStore<K> {
    /// Create a store whose sessions live for `ttl` after their last write.
    ///
    /// A `ttl` too large to represent, such as [`Duration::MAX`], means
    /// sessions never expire.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size of sessions created from now on.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Gets the time to live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start (or restart) the session for `key` on page 1.
    pub fn insert(&mut self, key: K, leaves: Vec<LeafResource>) -> &mut BrowseSession {
        let session = BrowseSession::new(leaves, self.page_size, self.deadline(Instant::now()));
        match self.sessions.entry(key) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    /// Live session for `key`.
    pub fn get(&self, key: &K) -> Option<&BrowseSession> {
        let now = Instant::now();
        self.sessions.get(key).filter(|s| !s.is_expired_at(now))
    }

    /// Live session for `key`, with its expiry pushed back by the TTL.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut BrowseSession> {
        let now = Instant::now();
        let expires_at = self.deadline(now);
        let session = self.sessions.get_mut(key).filter(|s| !s.is_expired_at(now))?;
        session.expires_at = expires_at;
        Some(session)
    }

    fn deadline(&self, now: Instant) -> Option<Instant> {
        now.checked_add(self.ttl)
    }

    /// End the session for `key`.
    pub fn remove(&mut self, key: &K) -> Option<BrowseSession> {
        self.sessions.remove(key)
    }

    /// Drop every session expired at `now`; returns how many were dropped.
    pub fn evict_expired_at(&mut self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = self.sessions.len(), "sessions evicted");
        }
        evicted
    }

    /// Drop every expired session; returns how many were dropped.
    pub fn evict_expired(&mut self) -> usize {
        self.evict_expired_at(Instant::now())
    }

    /// Number of stored sessions, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
