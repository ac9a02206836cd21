//! gradebook-core: in-memory student registry and report cards.
//!
//! This crate owns the student and course records, the registry operations
//! that mutate them, report card generation, and the scripted driver that
//! replays a sequence of registry calls.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod report;
pub mod script;
pub mod statistics;

pub use error::RegistryError;
pub use registry::{EnrollmentPolicy, Registry};
