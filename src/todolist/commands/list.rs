use crate::commands::CmdResult;
use crate::index::index_tasks;
use crate::tasks::TaskStore;

pub fn run(tasks: &TaskStore) -> CmdResult {
    CmdResult::default().with_listed_tasks(index_tasks(tasks.iter()))
}
