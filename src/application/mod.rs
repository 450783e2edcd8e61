//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod notices;
pub mod ports;
pub mod process_image;

// Re-export use cases
pub use notices::FailureNotices;
pub use process_image::{
    ProcessCallbacks, ProcessError, ProcessImageUseCase, ProcessOutcome, ProcessOutput,
    APPEND_CHUNK_DELAY, APPEND_CHUNK_SIZE,
};
