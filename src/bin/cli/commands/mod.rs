//! Command handlers: build the real registry, storage and consumer from
//! configuration and hand them to the library commands.

pub mod list;
pub mod process;

pub use list::handle_list_command;
pub use process::handle_process_command;
