//! # Storage Layer
//!
//! The [`DataStore`] trait hides where the encoded task list lives. It moves
//! text only: turning that text into tasks is the codec's job
//! ([`crate::codec`]), and deciding what a failed read means is the load
//! command's job ([`crate::commands::load`]).
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage, one plain text file
//!   (`tasks-data.txt` by default).
//! - [`memory::InMemoryStore`]: in-memory storage for tests. No persistence.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for the persisted task list.
pub trait DataStore {
    /// Returns the saved text, or [`crate::error::TodoError::NotFound`] when
    /// nothing has been saved yet.
    fn read(&self) -> Result<String>;

    /// Replaces the saved text.
    fn write(&mut self, contents: &str) -> Result<()>;

    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}
