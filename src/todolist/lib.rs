//! # Todolist Architecture
//!
//! Todolist is an interactive to-do list manager that keeps its tasks in one
//! plain text file. The menu-driven terminal program is a thin client over a
//! library that knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menu loop, prompts with retry, terminal output           │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the task list and its storage backend               │
//! │  - Tracks unsaved changes                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action, returns CmdResult            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (tasks.rs, model.rs) and persistence (codec.rs,       │
//! │  store/)                                                    │
//! │  - TaskStore: add, edit, delete, filter, selection sorts    │
//! │  - Codec: escaped, tab-separated text format                │
//! │  - DataStore trait: FileStore, InMemoryStore (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typed Core, Text at the Edges
//!
//! Inside the library a task has typed fields: a [`model::Priority`] in 1..=5,
//! a [`model::Status`], `chrono` dates and [`model::Hours`]. Text only exists
//! in the codec and in the prompts. A cell read from disk that does not parse
//! is kept verbatim in a [`model::Lenient`] value; sorts and filters give it a
//! sentinel key instead of failing.
//!
//! ## Failure Policy
//!
//! - Validation errors (bad task number, priority, status) abort the
//!   operation before anything changes.
//! - Loading never fails: a missing file is a first run, anything else
//!   unreadable starts an empty list with a warning.
//! - A failed save is reported; the in-memory list is kept.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user action
//! - [`tasks`]: The in-memory task list and its operations
//! - [`codec`]: Data file encoding and decoding
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Task`, `Priority`, `Status`, ...)
//! - [`index`]: 1-based task numbers shown to users
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod store;
pub mod tasks;
