use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::TodoError;
use crate::store::DataStore;
use crate::tasks::TaskStore;
use tracing::{debug, warn};

/// Reads the saved task list. Never fails: a missing file is a first run and
/// anything unreadable starts an empty list, with a message saying so.
pub fn run<S: DataStore>(store: &S, initial_capacity: usize) -> (TaskStore, CmdResult) {
    let mut result = CmdResult::default();
    let location = store.location();

    let decoded = store.read().and_then(|text| codec::decode(&text));
    let tasks = match decoded {
        Ok(decoded) => {
            debug!(
                declared = decoded.declared,
                loaded = decoded.store.len(),
                skipped = decoded.skipped,
                "loaded task list"
            );
            result.add_message(CmdMessage::info(format!(
                "Data loaded from {} (tasks: {})",
                location,
                decoded.store.len()
            )));
            if decoded.skipped > 0 {
                result.add_message(CmdMessage::warning(format!(
                    "Skipped {} corrupt record(s) in {}",
                    decoded.skipped, location
                )));
            }
            decoded.store
        }
        Err(TodoError::NotFound(_)) => {
            result.add_message(CmdMessage::info(format!(
                "No saved tasks at {}, starting a new list.",
                location
            )));
            TaskStore::with_capacity_hint(initial_capacity)
        }
        Err(e) => {
            warn!(error = %e, "could not load task list, starting empty");
            result.add_message(CmdMessage::warning(format!(
                "Could not read {} ({}), starting with an empty list.",
                location, e
            )));
            TaskStore::with_capacity_hint(initial_capacity)
        }
    };

    (tasks, result)
}
