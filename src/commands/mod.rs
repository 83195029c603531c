//! # Commands
//!
//! The two debugging operations, written against trait objects so the binary
//! and the tests can supply their own registry, storage and consumer.
//!
//! - [`list`] - destination inventory with pending message counts
//! - [`process`] - bounded single-shot consumption

pub mod list;
pub mod process;

pub use list::ListOptions;
pub use process::ProcessOptions;

use std::process::ExitCode;

/// Outcome reported to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl CommandStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        ExitCode::from(status.code())
    }
}
