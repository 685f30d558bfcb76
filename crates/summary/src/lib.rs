//! Generation client and orchestration for emotion-flavored newsletter
//! summaries.
//!
//! [`GenerationClient`] turns a [`GenerationTask`] into one chat-completion
//! call and enforces the local word limits. [`Orchestrator`] fans the calls
//! out per emotion / per language and applies each finished batch to a
//! [`bulletin_core::SessionState`].

pub mod backend;
pub mod client;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod prompts;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use backend::{ChatBackend, ChatRequest};
pub use client::GenerationClient;
pub use error::GenerationError;
pub use openai::OpenAiChat;
pub use orchestrator::{BatchReport, Failure, FailureScope, Orchestrator};
pub use prompts::GenerationTask;
