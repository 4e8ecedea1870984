use super::DataStore;
use crate::error::{Result, TodoError};
use std::io;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    contents: Option<String>,
    read_only: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl DataStore for InMemoryStore {
    fn read(&self) -> Result<String> {
        self.contents
            .clone()
            .ok_or_else(|| TodoError::NotFound(self.location()))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if self.read_only {
            return Err(TodoError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::codec;
    use crate::model::{parse_date, Hours, NewTask, Priority, Task};
    use crate::tasks::TaskStore;

    pub fn sample_task(name: &str) -> Task {
        Task::new(NewTask {
            name: name.to_string(),
            description: format!("Details for {}", name),
            priority: Priority::new(3).unwrap(),
            category: "Work".to_string(),
            due_date: parse_date("2025-06-30").unwrap(),
            estimated_time: Hours::new(1.5).unwrap(),
            tags: "work".to_string(),
            assigned_to: "me".to_string(),
        })
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Saves `count` sample tasks named "Test Task 1", "Test Task 2", ...
        pub fn with_tasks(mut self, count: usize) -> Self {
            let mut tasks = TaskStore::new();
            for i in 0..count {
                tasks.add(sample_task(&format!("Test Task {}", i + 1)));
            }
            self.store.write(&codec::encode(&tasks)).unwrap();
            self
        }

        pub fn with_contents(mut self, contents: &str) -> Self {
            self.store.write(contents).unwrap();
            self
        }

        pub fn read_only(mut self) -> Self {
            self.store.read_only = true;
            self
        }
    }
}
