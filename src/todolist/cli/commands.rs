//! # CLI Layer
//!
//! This module is **one possible UI client** for todolist; it is not the
//! application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdin, stdout, stderr)
//! - Uses `std::process::exit` (via `main.rs`)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Startup and dispatch (called by `main.rs`)
//! - `init_context()`: Resolves directories, configuration and the data file
//! - `handle_*()`: Per-command handlers
//! - The menu itself lives in `menu.rs`, prompts in `prompt.rs`, output in
//!   `print.rs`

use super::menu::Session;
use super::print::print_messages;
use super::prompt::Prompter;
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::io::{self, Write};
use std::path::PathBuf;
use todolist::api::{self, ConfigAction, TodoApi, TodoPaths};
use todolist::config::{TodoConfig, KEYS};
use todolist::error::Result;
use todolist::model::Scope;
use todolist::store::fs::FileStore;
use tracing::debug;

const DEBUG_ENV: &str = "TODOLIST_DEBUG";

struct AppContext {
    paths: TodoPaths,
    scope: Scope,
    config: TodoConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose || std::env::var_os(DEBUG_ENV).is_some() {
        tracing_subscriber::fmt()
            .with_env_filter("todolist=debug")
            .with_writer(io::stderr)
            .init();
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_menu(&ctx, cli.file),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let global = ProjectDirs::from("com", "todolist", "todolist")
        .map(|dirs| dirs.data_dir().to_path_buf());

    let scope = if cli.global {
        Scope::Global
    } else {
        Scope::Project
    };
    let paths = TodoPaths {
        project: cwd,
        global,
    };

    let config = match TodoConfig::load(paths.scope_dir(scope)?) {
        Ok(config) => config,
        Err(e) => {
            debug!(error = %e, "unreadable config, using defaults");
            TodoConfig::default()
        }
    };

    Ok(AppContext {
        paths,
        scope,
        config,
    })
}

fn handle_menu(ctx: &AppContext, file: Option<PathBuf>) -> Result<()> {
    let scope_dir = ctx.paths.scope_dir(ctx.scope)?;
    let store = FileStore::new(api::data_file_path(
        &scope_dir,
        file.as_deref(),
        &ctx.config.data_file,
    ));
    debug!(path = %store.path().display(), scope = ?ctx.scope, "starting menu");

    let mut todo = TodoApi::new(store, ctx.config.initial_capacity);
    let loaded = todo.load();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompter::new(stdin.lock(), stdout.lock());
    print_messages(prompt.out(), &loaded.messages)?;

    Session::new(todo, prompt, ctx.config.autosave).run()?;
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = api::config(&ctx.paths, ctx.scope, action)?;
    let mut stdout = io::stdout().lock();
    if let Some(config) = &result.config {
        for key in KEYS {
            if let Some(value) = config.get(key) {
                writeln!(stdout, "{} = {}", key, value)?;
            }
        }
    }
    print_messages(&mut stdout, &result.messages)?;
    Ok(())
}
