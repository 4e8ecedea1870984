use crate::commands::{CmdMessage, CmdResult};
use crate::model::Task;
use crate::tasks::TaskStore;

pub fn run(tasks: &mut TaskStore, task: Task) -> CmdResult {
    let index = tasks.add(task);
    let added = tasks.get(index).cloned().into_iter().collect();
    CmdResult::default()
        .with_affected_tasks(added)
        .with_message(CmdMessage::success("Task added! Status is 'Pending'."))
}
