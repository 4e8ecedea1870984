use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use crate::tasks::TaskStore;

pub fn run<S: DataStore>(store: &mut S, tasks: &TaskStore) -> Result<CmdResult> {
    store.write(&codec::encode(tasks))?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Data saved to {}",
        store.location()
    ))))
}
