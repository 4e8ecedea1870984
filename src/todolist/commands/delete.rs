use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::tasks::TaskStore;

pub fn run(tasks: &mut TaskStore, index: DisplayIndex) -> Result<CmdResult> {
    let removed = tasks.delete(index.offset())?;
    let message = CmdMessage::success(format!("Task deleted ({}): {}", index, removed.name));
    Ok(CmdResult::default()
        .with_affected_tasks(vec![removed])
        .with_message(message))
}
