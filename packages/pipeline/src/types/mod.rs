//! Artifact data types produced and consumed by the pipeline stages.

pub mod artifact;
pub mod config;
pub mod fact;
pub mod outline;
pub mod report;
pub mod summary;
pub mod trace;
