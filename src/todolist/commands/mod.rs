use crate::config::TodoConfig;
use crate::error::{Result, TodoError};
use crate::index::DisplayTask;
use crate::model::{Scope, Task};
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod filter;
pub mod list;
pub mod load;
pub mod save;
pub mod sort;
pub mod status;

/// Directories for each scope. The project scope is the working directory,
/// so a data file sits next to wherever the tool was started.
#[derive(Debug, Clone)]
pub struct TodoPaths {
    pub project: PathBuf,
    pub global: Option<PathBuf>,
}

impl TodoPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => Ok(self.project.clone()),
            Scope::Global => self.global.clone().ok_or_else(|| {
                TodoError::Config("Could not determine the user data directory".to_string())
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_tasks: Vec<Task>,
    pub listed_tasks: Vec<DisplayTask>,
    pub config: Option<TodoConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.affected_tasks = tasks;
        self
    }

    pub fn with_listed_tasks(mut self, tasks: Vec<DisplayTask>) -> Self {
        self.listed_tasks = tasks;
        self
    }

    pub fn with_config(mut self, config: TodoConfig) -> Self {
        self.config = Some(config);
        self
    }
}
