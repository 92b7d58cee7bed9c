//! Task Board Core
//!
//! Platform-neutral half of the task board frontend:
//! - domain: entities exchanged with the REST backend
//! - api: typed HTTP client over the backend contract
//! - session: the logged-in user, persisted in a key-value store
//! - query: finite-state cache for fetched task lists
//! - mutation: write operations and what they do to the cache
//! - handlers: view logic expressed as plain state transitions

pub mod api;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod mutation;
pub mod query;
pub mod session;

pub use api::{ApiClient, ApiError, ApiResult, TaskApi};
pub use config::ClientConfig;
pub use domain::{Entity, NewTask, SubTask, SubTaskPatch, Task, TaskCategory, TaskStatus, User};
pub use mutation::{settle, Effect, Mutation, MutationKind, MutationTracker};
pub use query::{EntityKind, FetchTicket, QueryCache, QueryKey, QueryState};
pub use session::{KeyValueStore, MemoryStore, Session, StorageError};
