//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every to-do list operation, whatever UI drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the in-memory [`TaskStore`] and the [`DataStore`] it is saved to
//! - **Dispatches** to the appropriate command function
//! - **Tracks** whether there are changes that have not been saved
//! - **Returns structured types** (`CmdResult`), never strings for a terminal
//!
//! ## Generic Over DataStore
//!
//! `TodoApi<S: DataStore>` is generic over the storage backend:
//! - Production: `TodoApi<FileStore>`
//! - Testing: `TodoApi<InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::model::{Scope, Task, TaskEdit};
use crate::store::DataStore;
use crate::tasks::{SortKey, TaskStore};
use std::path::{Path, PathBuf};

pub struct TodoApi<S: DataStore> {
    tasks: TaskStore,
    store: S,
    initial_capacity: usize,
    dirty: bool,
}

impl<S: DataStore> TodoApi<S> {
    /// Creates an API with an empty list. Call [`TodoApi::load`] to read
    /// saved tasks.
    pub fn new(store: S, initial_capacity: usize) -> Self {
        Self {
            tasks: TaskStore::with_capacity_hint(initial_capacity),
            store,
            initial_capacity,
            dirty: false,
        }
    }

    /// Replaces the in-memory list with the saved one.
    pub fn load(&mut self) -> CmdResult {
        let (tasks, result) = commands::load::run(&self.store, self.initial_capacity);
        self.tasks = tasks;
        self.dirty = false;
        result
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    pub fn add_task(&mut self, task: Task) -> CmdResult {
        self.dirty = true;
        commands::add::run(&mut self.tasks, task)
    }

    pub fn list_tasks(&self) -> CmdResult {
        commands::list::run(&self.tasks)
    }

    pub fn change_status(&mut self, index: DisplayIndex, status: &str) -> Result<CmdResult> {
        let result = commands::status::run(&mut self.tasks, index, status)?;
        self.dirty = true;
        Ok(result)
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> CmdResult {
        commands::filter::run(&self.tasks, filter)
    }

    pub fn sort_tasks(&mut self, key: SortKey) -> CmdResult {
        self.dirty = true;
        commands::sort::run(&mut self.tasks, key)
    }

    pub fn edit_task(&mut self, index: DisplayIndex, edit: TaskEdit) -> Result<CmdResult> {
        let result = commands::edit::run(&mut self.tasks, index, edit)?;
        self.dirty = true;
        Ok(result)
    }

    pub fn delete_task(&mut self, index: DisplayIndex) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.tasks, index)?;
        self.dirty = true;
        Ok(result)
    }

    /// Writes the list out. On failure the in-memory list is untouched and
    /// still counts as unsaved.
    pub fn save(&mut self) -> Result<CmdResult> {
        let result = commands::save::run(&mut self.store, &self.tasks)?;
        self.dirty = false;
        Ok(result)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub fn config(paths: &TodoPaths, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(paths, scope, action)
}

/// Location of the data file: an explicit path wins, otherwise the
/// configured file name inside the scope directory.
pub fn data_file_path(scope_dir: &Path, explicit: Option<&Path>, data_file: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => scope_dir.join(data_file),
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::filter::TaskFilter;
pub use crate::commands::{CmdMessage, MessageLevel, TodoPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;
    use crate::store::memory::fixtures::{sample_task, StoreFixture};
    use crate::store::memory::InMemoryStore;

    fn api_with(count: usize) -> TodoApi<InMemoryStore> {
        let fixture = StoreFixture::new().with_tasks(count);
        let mut api = TodoApi::new(fixture.store, 50);
        api.load();
        api
    }

    #[test]
    fn load_then_list() {
        let api = api_with(2);
        let listed = api.list_tasks().listed_tasks;
        assert_eq!(listed.len(), 2);
        assert!(!api.has_unsaved_changes());
    }

    #[test]
    fn changes_mark_unsaved_until_saved() {
        let mut api = api_with(1);
        api.add_task(sample_task("New"));
        assert!(api.has_unsaved_changes());

        api.save().unwrap();
        assert!(!api.has_unsaved_changes());
        assert!(api.store().contents().unwrap().starts_with("2 "));
    }

    #[test]
    fn rejected_change_does_not_mark_unsaved() {
        let mut api = api_with(1);
        let index = DisplayIndex::from_number(1).unwrap();
        assert!(matches!(
            api.change_status(index, "Maybe"),
            Err(TodoError::InvalidEnum { .. })
        ));
        assert!(!api.has_unsaved_changes());
    }

    #[test]
    fn failed_save_keeps_tasks_and_unsaved_flag() {
        let fixture = StoreFixture::new().read_only();
        let mut api = TodoApi::new(fixture.store, 50);
        api.add_task(sample_task("Precious"));

        assert!(api.save().is_err());
        assert_eq!(api.tasks().len(), 1);
        assert!(api.has_unsaved_changes());
    }

    #[test]
    fn delete_then_filter() {
        let mut api = api_with(3);
        api.delete_task(DisplayIndex::from_number(1).unwrap())
            .unwrap();
        let found = api.filter_tasks(&TaskFilter::Category("work".into()));
        assert_eq!(found.listed_tasks.len(), 2);
        assert_eq!(found.listed_tasks[0].task.name, "Test Task 2");
    }

    #[test]
    fn explicit_data_file_wins() {
        let dir = Path::new("/tmp/project");
        assert_eq!(
            data_file_path(dir, None, "tasks-data.txt"),
            dir.join("tasks-data.txt")
        );
        assert_eq!(
            data_file_path(dir, Some(Path::new("/elsewhere/t.txt")), "tasks-data.txt"),
            PathBuf::from("/elsewhere/t.txt")
        );
    }
}
