pub mod commands;
mod menu;
mod print;
mod prompt;
mod setup;
