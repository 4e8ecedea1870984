//! # Task Store
//!
//! [`TaskStore`] is the in-memory, ordered list of tasks the whole application
//! works on. Positions are 0-based; see [`crate::index`] for user numbering.
//!
//! ## Ordering
//!
//! All three sorts are selection sorts: each pass picks the first element
//! with a strictly better key among the remaining ones and swaps it into
//! place. Equal keys are therefore not kept in insertion order. Fields that
//! did not parse when loaded sort with a sentinel key that puts them last.
//!
//! ## Capacity
//!
//! Older data files carry an allocated capacity in their header. The store
//! keeps that number as a hint and grows it in steps of
//! [`CAPACITY_STEP`] when the list outgrows it, so files stay compatible.
//! It has no effect on how many tasks can be stored.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Result, TodoError};
use crate::model::{Hours, Priority, Status, Task, TaskEdit};

pub const DEFAULT_CAPACITY: usize = 50;
pub const CAPACITY_STEP: usize = 20;

/// Sort key for tasks whose priority did not parse.
pub const UNPARSED_PRIORITY_SORT: i64 = 0;
/// Filter key for tasks whose priority did not parse; matches no real priority.
pub const UNPARSED_PRIORITY_FILTER: i64 = -1;
/// Sort key for tasks whose estimated time did not parse.
pub const UNPARSED_HOURS: f64 = f64::MAX;

/// Sort key for tasks whose due date did not parse.
pub fn unparsed_due_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    PriorityDescending,
    EstimatedTimeAscending,
}

impl SortKey {
    pub fn describe(self) -> &'static str {
        match self {
            SortKey::DueDate => "due date",
            SortKey::PriorityDescending => "priority (high to low)",
            SortKey::EstimatedTimeAscending => "estimated time (low to high)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    capacity_hint: usize,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::with_capacity_hint(DEFAULT_CAPACITY)
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_hint(capacity: usize) -> Self {
        Self {
            tasks: Vec::new(),
            capacity_hint: if capacity == 0 {
                DEFAULT_CAPACITY
            } else {
                capacity
            },
        }
    }

    pub(crate) fn from_tasks(tasks: Vec<Task>, capacity: usize) -> Self {
        let mut store = Self::with_capacity_hint(capacity);
        store.tasks = tasks;
        store
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate()
    }

    /// Capacity to record in a data file header; never below the task count.
    pub fn capacity_hint(&self) -> usize {
        self.capacity_hint.max(self.tasks.len())
    }

    /// Appends a task as new work: status becomes `Pending` and the creation
    /// date becomes today, whatever the caller put there. Returns its position.
    pub fn add(&mut self, mut task: Task) -> usize {
        task.status = Status::Pending.into();
        task.created_on = crate::model::today().into();

        if self.tasks.len() >= self.capacity_hint {
            self.capacity_hint += CAPACITY_STEP;
            debug!(capacity = self.capacity_hint, "capacity hint increased");
        }
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    /// Applies one field edit. Priority and status are validated first; a
    /// rejected edit leaves the task as it was.
    pub fn edit(&mut self, index: usize, edit: TaskEdit) -> Result<()> {
        self.check_index(index)?;
        let task = &mut self.tasks[index];
        match edit {
            TaskEdit::Priority(value) => task.priority = Priority::new(value)?.into(),
            TaskEdit::Status(text) => task.status = text.parse::<Status>()?.into(),
            TaskEdit::Name(v) => task.name = v,
            TaskEdit::Description(v) => task.description = v,
            TaskEdit::Category(v) => task.category = v,
            TaskEdit::DueDate(d) => task.due_date = d.into(),
            TaskEdit::EstimatedTime(h) => task.estimated_time = h.into(),
            TaskEdit::Tags(v) => task.tags = v,
            TaskEdit::AssignedTo(v) => task.assigned_to = v,
        }
        Ok(())
    }

    /// Removes the task at `index`, keeping the order of the rest.
    pub fn delete(&mut self, index: usize) -> Result<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn change_status(&mut self, index: usize, status: &str) -> Result<Status> {
        self.check_index(index)?;
        let status: Status = status.parse()?;
        self.tasks[index].status = status.into();
        Ok(status)
    }

    /// Tasks whose category equals `category`, ignoring case.
    pub fn filter_by_category<'a>(
        &'a self,
        category: &str,
    ) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        let wanted = category.to_lowercase();
        self.iter()
            .filter(move |(_, task)| task.category.to_lowercase() == wanted)
    }

    pub fn filter_by_priority(&self, priority: i64) -> impl Iterator<Item = (usize, &Task)> {
        self.iter()
            .filter(move |(_, task)| priority_filter_key(task) == priority)
    }

    /// Tasks whose tags text contains `needle`, ignoring case. This is plain
    /// substring matching: "a" matches "java".
    pub fn filter_by_tag<'a>(
        &'a self,
        needle: &str,
    ) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        let needle = needle.to_lowercase();
        self.iter()
            .filter(move |(_, task)| task.tags.to_lowercase().contains(&needle))
    }

    pub fn sort(&mut self, key: SortKey) {
        match key {
            SortKey::DueDate => self.sort_by_due_date(),
            SortKey::PriorityDescending => self.sort_by_priority_descending(),
            SortKey::EstimatedTimeAscending => self.sort_by_estimated_time_ascending(),
        }
    }

    pub fn sort_by_due_date(&mut self) {
        let sentinel = unparsed_due_date();
        self.selection_sort(
            |task| task.due_date.parsed().copied().unwrap_or(sentinel),
            |candidate, best| candidate < best,
        );
    }

    pub fn sort_by_priority_descending(&mut self) {
        self.selection_sort(
            |task| {
                task.priority
                    .parsed()
                    .map(|p| i64::from(p.get()))
                    .unwrap_or(UNPARSED_PRIORITY_SORT)
            },
            |candidate, best| candidate > best,
        );
    }

    pub fn sort_by_estimated_time_ascending(&mut self) {
        self.selection_sort(
            |task| {
                task.estimated_time
                    .parsed()
                    .map(|h: &Hours| h.get())
                    .unwrap_or(UNPARSED_HOURS)
            },
            |candidate, best| candidate < best,
        );
    }

    fn selection_sort<K, F, B>(&mut self, key: F, better: B)
    where
        F: Fn(&Task) -> K,
        B: Fn(&K, &K) -> bool,
    {
        let mut keys: Vec<K> = self.tasks.iter().map(&key).collect();
        let n = self.tasks.len();
        for i in 0..n.saturating_sub(1) {
            let mut best = i;
            for j in (i + 1)..n {
                if better(&keys[j], &keys[best]) {
                    best = j;
                }
            }
            if best != i {
                self.tasks.swap(i, best);
                keys.swap(i, best);
            }
        }
        debug!(tasks = n, "selection sort finished");
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TodoError::OutOfRange(format!(
                "task number {} (there are {} tasks)",
                index + 1,
                self.tasks.len()
            )))
        }
    }
}

fn priority_filter_key(task: &Task) -> i64 {
    task.priority
        .parsed()
        .map(|p| i64::from(p.get()))
        .unwrap_or(UNPARSED_PRIORITY_FILTER)
}
