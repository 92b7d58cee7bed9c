//! Query Cache
//!
//! Finite-state cache for data fetched from the backend, keyed by
//! `(entity kind, user id)`. Entries are never patched locally: a mutation
//! invalidates the key and the next read fetches it again.
//!
//! ```text
//! Idle ──begin──▶ Fetching ──ok──▶ Ready ──invalidate──▶ Stale ──begin──▶ Fetching
//!                     │                                                     ▲
//!                     └──err──▶ Failed ──invalidate──▶ Stale / Idle ─────────┘
//! ```
//!
//! Every invalidation bumps the entry's generation. A fetch that was already
//! in flight when the key was invalidated lands as `Stale`, so it is fetched
//! again and the cache ends up holding a response taken after the mutation
//! settled.

use std::collections::HashMap;

use log::debug;

use crate::api::ApiError;

/// Kind of data a query holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub entity: EntityKind,
    pub user_id: u32,
}

impl QueryKey {
    /// The task list of one user
    pub fn tasks(user_id: u32) -> Self {
        Self { entity: EntityKind::Tasks, user_id }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Never fetched
    Idle,
    /// Request in flight; `previous` stays displayable meanwhile
    Fetching { previous: Option<T> },
    /// Latest fetch succeeded and nothing has invalidated it
    Ready(T),
    /// Data is displayable but must be fetched again
    Stale(T),
    /// Latest fetch failed
    Failed { error: ApiError, previous: Option<T> },
}

impl<T> QueryState<T> {
    fn data(&self) -> Option<&T> {
        match self {
            QueryState::Idle => None,
            QueryState::Fetching { previous } => previous.as_ref(),
            QueryState::Ready(data) | QueryState::Stale(data) => Some(data),
            QueryState::Failed { previous, .. } => previous.as_ref(),
        }
    }

    fn into_data(self) -> Option<T> {
        match self {
            QueryState::Idle => None,
            QueryState::Fetching { previous } => previous,
            QueryState::Ready(data) | QueryState::Stale(data) => Some(data),
            QueryState::Failed { previous, .. } => previous,
        }
    }

    fn stale_or_idle(data: Option<T>) -> Self {
        match data {
            Some(data) => QueryState::Stale(data),
            None => QueryState::Idle,
        }
    }
}

/// Proof that a fetch was started; hand it back to [`QueryCache::complete_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    fetch_id: u64,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    state: QueryState<T>,
    generation: u64,
    /// Id of the fetch currently allowed to settle this entry
    in_flight: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, Entry<T>>,
    /// Monotonic across `clear`, so tickets from before a clear never match
    counter: u64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self { entries: HashMap::new(), counter: 0 }
    }
}

impl<T: Clone> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, key: &QueryKey) -> Option<&QueryState<T>> {
        self.entries.get(key).map(|e| &e.state)
    }

    /// True when the key has never been fetched or was invalidated.
    /// Failed queries wait for an explicit [`QueryCache::invalidate`].
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        match self.entries.get(key).map(|e| &e.state) {
            None | Some(QueryState::Idle) | Some(QueryState::Stale(_)) => true,
            Some(_) => false,
        }
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        matches!(self.state(key), Some(QueryState::Fetching { .. }))
    }

    /// Nothing to show yet and no error to report either
    pub fn is_loading(&self, key: &QueryKey) -> bool {
        match self.state(key) {
            None | Some(QueryState::Idle) => true,
            Some(QueryState::Fetching { previous }) => previous.is_none(),
            Some(_) => false,
        }
    }

    /// Last successfully fetched data, including while stale or refetching
    pub fn data(&self, key: &QueryKey) -> Option<&T> {
        self.state(key).and_then(QueryState::data)
    }

    pub fn error(&self, key: &QueryKey) -> Option<&ApiError> {
        match self.state(key) {
            Some(QueryState::Failed { error, .. }) => Some(error),
            _ => None,
        }
    }

    /// Start a fetch. Returns None if one is already in flight for `key`.
    pub fn begin_fetch(&mut self, key: QueryKey) -> Option<FetchTicket> {
        if !self.entries.contains_key(&key) {
            let generation = self.next_id();
            self.entries.insert(key, Entry { state: QueryState::Idle, generation, in_flight: None });
        }
        let fetch_id = self.next_id();
        let entry = self.entries.get_mut(&key)?;

        if entry.in_flight.is_some() {
            return None;
        }

        let previous = std::mem::replace(&mut entry.state, QueryState::Idle).into_data();
        entry.state = QueryState::Fetching { previous };
        entry.in_flight = Some(fetch_id);
        debug!("fetch {fetch_id} started for {key:?}");
        Some(FetchTicket { key, fetch_id, generation: entry.generation })
    }

    /// Record a fetch result.
    ///
    /// Results for keys that were invalidated mid-flight are kept for display
    /// but marked stale. Results whose fetch no longer owns the entry (the key
    /// was cleared in between) are dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<T, ApiError>) {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            debug!("dropping fetch {} for cleared {:?}", ticket.fetch_id, ticket.key);
            return;
        };
        if entry.in_flight != Some(ticket.fetch_id) {
            debug!("dropping superseded fetch {} for {:?}", ticket.fetch_id, ticket.key);
            return;
        }
        entry.in_flight = None;

        let previous = std::mem::replace(&mut entry.state, QueryState::Idle).into_data();
        let current = entry.generation == ticket.generation;
        entry.state = match (result, current) {
            (Ok(data), true) => QueryState::Ready(data),
            (Ok(data), false) => QueryState::Stale(data),
            (Err(error), true) => QueryState::Failed { error, previous },
            (Err(_), false) => QueryState::stale_or_idle(previous),
        };
        debug!("fetch {} settled for {:?} (current: {current})", ticket.fetch_id, ticket.key);
    }

    /// Mark `key` for refetch. Other keys are never touched.
    pub fn invalidate(&mut self, key: &QueryKey) {
        if !self.entries.contains_key(key) {
            return;
        }
        let generation = self.next_id();
        let Some(entry) = self.entries.get_mut(key) else {
            return;
        };
        entry.generation = generation;
        entry.state = match std::mem::replace(&mut entry.state, QueryState::Idle) {
            fetching @ QueryState::Fetching { .. } => fetching,
            other => QueryState::stale_or_idle(other.into_data()),
        };
        debug!("invalidated {key:?} (generation {})", entry.generation);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn next_id(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

impl<T: Clone> QueryCache<Vec<T>> {
    /// A fetch for `key` succeeded and returned no items. False while the
    /// last fetch is failed, so an error is never shown as an empty list.
    pub fn is_empty_result(&self, key: &QueryKey) -> bool {
        self.error(key).is_none() && self.data(key).is_some_and(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> QueryKey {
        QueryKey::tasks(1)
    }

    fn fetched(cache: &mut QueryCache<Vec<u32>>, data: Vec<u32>) {
        let ticket = cache.begin_fetch(key()).unwrap();
        cache.complete_fetch(ticket, Ok(data));
    }

    #[test]
    fn unknown_key_needs_fetch_and_is_loading() {
        let cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert!(cache.needs_fetch(&key()));
        assert!(cache.is_loading(&key()));
        assert_eq!(cache.data(&key()), None);
    }

    #[test]
    fn at_most_one_fetch_in_flight() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert!(cache.begin_fetch(key()).is_some());
        assert!(cache.begin_fetch(key()).is_none());
        assert!(!cache.needs_fetch(&key()));
        assert!(cache.is_fetching(&key()));
    }

    #[test]
    fn successful_fetch_becomes_ready() {
        let mut cache = QueryCache::new();
        fetched(&mut cache, vec![1, 2]);
        assert_eq!(cache.state(&key()), Some(&QueryState::Ready(vec![1, 2])));
        assert!(!cache.needs_fetch(&key()));
        assert!(!cache.is_loading(&key()));
    }

    #[test]
    fn invalidate_keeps_data_visible_but_requests_refetch() {
        let mut cache = QueryCache::new();
        fetched(&mut cache, vec![1]);
        cache.invalidate(&key());

        assert_eq!(cache.state(&key()), Some(&QueryState::Stale(vec![1])));
        assert!(cache.needs_fetch(&key()));

        let ticket = cache.begin_fetch(key()).unwrap();
        assert_eq!(cache.data(&key()), Some(&vec![1]));
        assert!(!cache.is_loading(&key()));
        cache.complete_fetch(ticket, Ok(vec![]));
        assert_eq!(cache.state(&key()), Some(&QueryState::Ready(vec![])));
    }

    #[test]
    fn invalidation_during_fetch_forces_another_fetch() {
        let mut cache = QueryCache::new();
        let ticket = cache.begin_fetch(key()).unwrap();
        cache.invalidate(&key());
        cache.complete_fetch(ticket, Ok(vec![9]));

        assert_eq!(cache.state(&key()), Some(&QueryState::Stale(vec![9])));
        assert!(cache.needs_fetch(&key()));
    }

    #[test]
    fn failure_keeps_previous_data_and_waits_for_invalidation() {
        let mut cache = QueryCache::new();
        fetched(&mut cache, vec![1]);
        cache.invalidate(&key());

        let ticket = cache.begin_fetch(key()).unwrap();
        cache.complete_fetch(ticket, Err(ApiError::Transport("offline".into())));

        assert_eq!(cache.data(&key()), Some(&vec![1]));
        assert_eq!(cache.error(&key()), Some(&ApiError::Transport("offline".into())));
        assert!(!cache.needs_fetch(&key()));

        cache.invalidate(&key());
        assert!(cache.needs_fetch(&key()));
        assert_eq!(cache.error(&key()), None);
    }

    #[test]
    fn failed_first_fetch_is_not_loading() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let ticket = cache.begin_fetch(key()).unwrap();
        cache.complete_fetch(ticket, Err(ApiError::Status { status: 500, message: None }));
        assert!(!cache.is_loading(&key()));
        assert_eq!(cache.data(&key()), None);

        cache.invalidate(&key());
        assert_eq!(cache.state(&key()), Some(&QueryState::Idle));
    }

    #[test]
    fn invalidate_touches_only_its_key() {
        let mut cache = QueryCache::new();
        let other = QueryKey::tasks(2);
        fetched(&mut cache, vec![1]);
        let ticket = cache.begin_fetch(other).unwrap();
        cache.complete_fetch(ticket, Ok(vec![2]));

        cache.invalidate(&key());

        assert!(cache.needs_fetch(&key()));
        assert_eq!(cache.state(&other), Some(&QueryState::Ready(vec![2])));
    }

    #[test]
    fn result_for_cleared_cache_is_dropped() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let ticket = cache.begin_fetch(key()).unwrap();
        cache.clear();
        cache.complete_fetch(ticket, Ok(vec![1]));
        assert_eq!(cache.state(&key()), None);
    }

    #[test]
    fn ticket_from_before_clear_does_not_settle_new_fetch() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        let old = cache.begin_fetch(key()).unwrap();
        cache.clear();
        let new = cache.begin_fetch(key()).unwrap();

        cache.complete_fetch(old, Ok(vec![1]));
        assert!(cache.is_fetching(&key()));
        assert_eq!(cache.data(&key()), None);

        cache.complete_fetch(new, Ok(vec![2]));
        assert_eq!(cache.state(&key()), Some(&QueryState::Ready(vec![2])));
    }

    #[test]
    fn failed_fetch_is_not_an_empty_result() {
        let mut cache: QueryCache<Vec<u32>> = QueryCache::new();
        assert!(!cache.is_empty_result(&key()));

        let ticket = cache.begin_fetch(key()).unwrap();
        cache.complete_fetch(ticket, Err(ApiError::Transport("offline".into())));
        assert!(!cache.is_loading(&key()));
        assert!(!cache.is_empty_result(&key()));

        cache.invalidate(&key());
        fetched(&mut cache, vec![]);
        assert!(cache.is_empty_result(&key()));

        cache.invalidate(&key());
        let ticket = cache.begin_fetch(key()).unwrap();
        assert!(cache.is_empty_result(&key()));
        cache.complete_fetch(ticket, Err(ApiError::Status { status: 500, message: None }));
        assert!(!cache.is_empty_result(&key()));
    }
}
