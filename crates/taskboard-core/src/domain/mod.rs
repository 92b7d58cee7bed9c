//! Domain Layer
//!
//! Entities as the REST backend serializes them.

mod entity;
mod task;
mod timestamp;
mod user;

pub use entity::Entity;
pub use task::{NewTask, SubTask, SubTaskPatch, Task, TaskCategory, TaskListBody, TaskStatus};
pub use user::User;
