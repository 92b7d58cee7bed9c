//! View Handlers
//!
//! The dashboard and login screens as plain state plus handler functions.
//! Handlers take typed input and return what should happen next (a
//! [`Mutation`](crate::Mutation) to run, a navigation) instead of touching
//! the network or the DOM themselves.

mod dashboard;
mod login;

pub use dashboard::{DashboardState, TaskForm, ValidationError};
pub use login::{LoginOutcome, LoginState, LOGIN_FAILED};
