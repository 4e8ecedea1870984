use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayIndex;
use crate::model::TaskEdit;
use crate::tasks::TaskStore;

pub fn run(tasks: &mut TaskStore, index: DisplayIndex, edit: TaskEdit) -> Result<CmdResult> {
    let field = edit.field();
    tasks.edit(index.offset(), edit)?;
    let affected = tasks.get(index.offset()).cloned().into_iter().collect();
    Ok(CmdResult::default()
        .with_affected_tasks(affected)
        .with_message(CmdMessage::success(format!(
            "Task updated! ({} of task #{})",
            field.label(),
            index
        ))))
}
