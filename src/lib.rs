//! NotesToNotion - handwritten notes to Notion
//!
//! This crate provides the core functionality for transcribing photos of
//! handwritten notes with a vision model and appending them as dated entries
//! to a Notion page.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Note formatter, value objects, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (OpenAI, Gemini, Notion, filesystem, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
