//! HTTP client over the task board REST backend

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, ApiResult, TaskApi};
use crate::config::ClientConfig;
use crate::domain::{NewTask, SubTask, SubTaskPatch, Task, TaskListBody, User};

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
}

/// Thin `reqwest` wrapper bound to a fixed base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    // GET and DELETE must stay simple CORS requests: no content type.
    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.config.endpoint(path))
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
        self.http.post(self.config.endpoint(path)).json(body)
    }

    fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> RequestBuilder {
        self.http.patch(self.config.endpoint(path)).json(body)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.http.delete(self.config.endpoint(path))
    }

    /// Send and turn non-2xx statuses into [`ApiError::Status`]
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| {
                warn!("request failed before a response: {e}");
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        warn!("backend rejected request: {err}");
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

#[async_trait(?Send)]
impl TaskApi for ApiClient {
    async fn login(&self, email: &str) -> ApiResult<User> {
        debug!("POST /login/");
        let response = self.send(self.post("/login/", &LoginArgs { email })).await?;
        Self::read_json(response).await
    }

    async fn list_tasks(&self, user_id: u32) -> ApiResult<Vec<Task>> {
        debug!("GET /tasks/?user_id={user_id}");
        let request = self.get("/tasks/").query(&[("user_id", user_id)]);
        let response = self.send(request).await?;
        let body: TaskListBody = Self::read_json(response).await?;
        Ok(body.into_tasks())
    }

    async fn create_task(&self, task: &NewTask) -> ApiResult<Task> {
        debug!("POST /tasks/ for user {}", task.user);
        let response = self.send(self.post("/tasks/", task)).await?;
        Self::read_json(response).await
    }

    async fn delete_task(&self, id: u32) -> ApiResult<()> {
        debug!("DELETE /tasks/{id}/");
        self.send(self.delete(&format!("/tasks/{id}/"))).await?;
        Ok(())
    }

    async fn update_subtask(&self, id: u32, patch: &SubTaskPatch) -> ApiResult<SubTask> {
        debug!("PATCH /subtasks/{id}/");
        let response = self.send(self.patch(&format!("/subtasks/{id}/"), patch)).await?;
        Self::read_json(response).await
    }

    async fn delete_subtask(&self, id: u32) -> ApiResult<()> {
        debug!("DELETE /subtasks/{id}/");
        self.send(self.delete(&format!("/subtasks/{id}/"))).await?;
        Ok(())
    }
}
