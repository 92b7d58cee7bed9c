//! Dashboard handlers

use thiserror::Error;

use crate::domain::{Entity, NewTask, SubTask, SubTaskPatch, Task, TaskCategory, TaskStatus, User};
use crate::mutation::{Effect, Mutation};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("el título es obligatorio")]
    MissingTitle,
    #[error("la descripción es obligatoria")]
    MissingDescription,
}

/// Fields of the new-task dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub category: TaskCategory,
}

impl TaskForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        Ok(())
    }

    /// Whether the create button is enabled
    pub fn can_submit(&self, creating: bool) -> bool {
        !creating && self.validate().is_ok()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_new_task(&self, user_id: u32) -> Result<NewTask, ValidationError> {
        self.validate()?;
        Ok(NewTask {
            user: user_id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            category: self.category,
        })
    }
}

/// Local-only dashboard state: the dialog, its form and the error banner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub form: TaskForm,
    pub modal_open: bool,
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.form.reset();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Create-task request for the current form
    pub fn submit(&self, user: &User) -> Result<Mutation, ValidationError> {
        self.form.to_new_task(user.id).map(Mutation::CreateTask)
    }

    /// Flip a subtask's completion
    pub fn toggle_subtask(subtask: &SubTask) -> Option<Mutation> {
        subtask.id().map(|id| Mutation::UpdateSubtask {
            id,
            patch: SubTaskPatch::completion(!subtask.is_completed),
        })
    }

    /// Rename a subtask; None when unsaved, blank or unchanged
    pub fn rename_subtask(subtask: &SubTask, title: &str) -> Option<Mutation> {
        let title = title.trim();
        if title.is_empty() || title == subtask.title {
            return None;
        }
        subtask.id().map(|id| Mutation::UpdateSubtask { id, patch: SubTaskPatch::title(title) })
    }

    pub fn delete_task(task: &Task) -> Option<Mutation> {
        task.id().map(Mutation::DeleteTask)
    }

    pub fn delete_subtask(subtask: &SubTask) -> Option<Mutation> {
        subtask.id().map(Mutation::DeleteSubtask)
    }

    /// Apply the effects that concern dashboard-local state; cache effects
    /// are ignored here.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::CloseTaskModal => self.close_modal(),
            Effect::ShowError(message) => self.notice = Some(message.clone()),
            Effect::Invalidate(_) => {}
        }
    }
}
