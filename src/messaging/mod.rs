//! # Messaging Module
//!
//! Messages as stored in the DBAL transport table and the processors that
//! handle them during a debugging consume run.

pub mod message;
pub mod processor;

pub use message::{ProcessorStatus, TransportMessage};
pub use processor::{InspectProcessor, MessageProcessor, ProcessorRegistry};
