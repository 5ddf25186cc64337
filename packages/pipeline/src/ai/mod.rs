//! Collaborator implementations backed by real model APIs.

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAiCollaborator;
