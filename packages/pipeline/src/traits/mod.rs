//! Core trait abstractions.
//!
//! - [`collaborator`] - the external language-model contract
//! - [`stage`] - the uniform contract every pipeline stage implements

pub mod collaborator;
pub mod stage;
