//! CLI module - command-line interface
//!
//! Contains the JSON-lines server and its command parsing.

pub mod commands;
pub mod serve;

pub use serve::Server;
