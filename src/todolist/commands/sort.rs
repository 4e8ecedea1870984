use crate::commands::{CmdMessage, CmdResult};
use crate::index::index_tasks;
use crate::tasks::{SortKey, TaskStore};

/// Reorders the store in place and lists it in its new order.
pub fn run(tasks: &mut TaskStore, key: SortKey) -> CmdResult {
    tasks.sort(key);
    CmdResult::default()
        .with_listed_tasks(index_tasks(tasks.iter()))
        .with_message(CmdMessage::success(format!("Sorted by {}.", key.describe())))
}
