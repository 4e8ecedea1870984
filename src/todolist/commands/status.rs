use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::tasks::TaskStore;

pub fn run(tasks: &mut TaskStore, index: DisplayIndex, status: &str) -> Result<CmdResult> {
    let status = tasks.change_status(index.offset(), status)?;
    let affected = tasks.get(index.offset()).cloned().into_iter().collect();
    Ok(CmdResult::default()
        .with_affected_tasks(affected)
        .with_message(CmdMessage::success(format!(
            "Status updated! Task #{} is now {}.",
            index, status
        ))))
}
