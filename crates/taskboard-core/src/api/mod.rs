//! Backend API
//!
//! One async function per REST endpoint. No caching or retries happen at
//! this layer; failures reach the caller unmodified.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::domain::{NewTask, SubTask, SubTaskPatch, Task, User};

/// The REST contract the frontend consumes.
///
/// `?Send` because browser futures are single-threaded.
#[async_trait(?Send)]
pub trait TaskApi {
    /// `POST /login/`
    async fn login(&self, email: &str) -> ApiResult<User>;

    /// `GET /tasks/?user_id={id}`
    async fn list_tasks(&self, user_id: u32) -> ApiResult<Vec<Task>>;

    /// `POST /tasks/`
    async fn create_task(&self, task: &NewTask) -> ApiResult<Task>;

    /// `DELETE /tasks/{id}/`
    async fn delete_task(&self, id: u32) -> ApiResult<()>;

    /// `PATCH /subtasks/{id}/`
    async fn update_subtask(&self, id: u32, patch: &SubTaskPatch) -> ApiResult<SubTask>;

    /// `DELETE /subtasks/{id}/`
    async fn delete_subtask(&self, id: u32) -> ApiResult<()>;
}
