//! # Task Numbers
//!
//! The store addresses tasks by 0-based position. Users see and type 1-based
//! task numbers ("Task #3"). [`DisplayIndex`] is the only place the two meet,
//! so off-by-one conversions stay out of both the store and the CLI.

use crate::model::Task;

/// A user-facing, 1-based task number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    /// Returns `None` for numbers below 1.
    pub fn from_number(number: i64) -> Option<Self> {
        usize::try_from(number)
            .ok()
            .filter(|n| *n >= 1)
            .map(DisplayIndex)
    }

    pub fn from_offset(offset: usize) -> Self {
        DisplayIndex(offset + 1)
    }

    pub fn offset(self) -> usize {
        self.0 - 1
    }
}

impl std::fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct DisplayTask {
    pub index: DisplayIndex,
    pub task: Task,
}

/// Pairs store positions with their display numbers.
pub fn index_tasks<'a, I>(tasks: I) -> Vec<DisplayTask>
where
    I: IntoIterator<Item = (usize, &'a Task)>,
{
    tasks
        .into_iter()
        .map(|(offset, task)| DisplayTask {
            index: DisplayIndex::from_offset(offset),
            task: task.clone(),
        })
        .collect()
}
