//! CLI module for the MQ debug tool

pub mod commands;

pub use commands::{handle_list_command, handle_process_command};
