//! Mutations
//!
//! Writes against the backend and their effect on client state. A mutation
//! never edits cached data; on success it invalidates the owner's task list
//! so the next read refetches it.
//!
//! Per kind: `idle → pending → (ok → invalidate → idle) | (err → idle)`.

use std::collections::HashMap;

use log::warn;

use crate::api::{ApiError, TaskApi};
use crate::domain::{NewTask, SubTaskPatch};
use crate::query::QueryKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateTask,
    DeleteTask,
    UpdateSubtask,
    DeleteSubtask,
}

impl MutationKind {
    /// Fallback shown when the backend gives no message
    pub fn failure_message(&self) -> &'static str {
        match self {
            MutationKind::CreateTask => "No se pudo crear la tarea",
            MutationKind::DeleteTask => "No se pudo eliminar la tarea",
            MutationKind::UpdateSubtask => "No se pudo actualizar la subtarea",
            MutationKind::DeleteSubtask => "No se pudo eliminar la subtarea",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateTask(NewTask),
    DeleteTask(u32),
    UpdateSubtask { id: u32, patch: SubTaskPatch },
    DeleteSubtask(u32),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::CreateTask(_) => MutationKind::CreateTask,
            Mutation::DeleteTask(_) => MutationKind::DeleteTask,
            Mutation::UpdateSubtask { .. } => MutationKind::UpdateSubtask,
            Mutation::DeleteSubtask(_) => MutationKind::DeleteSubtask,
        }
    }

    /// Issue the single request this mutation stands for
    pub async fn execute<A: TaskApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        match self {
            Mutation::CreateTask(task) => api.create_task(task).await.map(|_| ()),
            Mutation::DeleteTask(id) => api.delete_task(*id).await,
            Mutation::UpdateSubtask { id, patch } => api.update_subtask(*id, patch).await.map(|_| ()),
            Mutation::DeleteSubtask(id) => api.delete_subtask(*id).await,
        }
    }
}

/// State change requested by a settled mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop cached data for this key so it is fetched again
    Invalidate(QueryKey),
    /// Close the new-task dialog and reset its form
    CloseTaskModal,
    /// Show an error to the user
    ShowError(String),
}

/// Effects of a settled mutation issued on behalf of `user_id`.
///
/// Failures leave the cache alone.
pub fn settle(mutation: &Mutation, user_id: u32, result: &Result<(), ApiError>) -> Vec<Effect> {
    match result {
        Ok(()) => {
            let mut effects = vec![Effect::Invalidate(QueryKey::tasks(user_id))];
            if mutation.kind() == MutationKind::CreateTask {
                effects.push(Effect::CloseTaskModal);
            }
            effects
        }
        Err(e) => {
            warn!("{:?} failed: {e}", mutation.kind());
            vec![Effect::ShowError(e.user_message(mutation.kind().failure_message()))]
        }
    }
}

/// Count of in-flight mutations per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationTracker {
    in_flight: HashMap<MutationKind, usize>,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, kind: MutationKind) {
        *self.in_flight.entry(kind).or_insert(0) += 1;
    }

    pub fn finish(&mut self, kind: MutationKind) {
        if let Some(count) = self.in_flight.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(&kind);
            }
        }
    }

    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.in_flight.contains_key(&kind)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}
