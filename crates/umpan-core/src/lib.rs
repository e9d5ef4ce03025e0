//! Core types and operations for the umpan feedback service.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! Persistence goes through the [`store::DocumentStore`] trait; backends live
//! in their own crates.

pub mod document;
pub mod error;
pub mod event;
pub mod feedback;
pub mod id;
mod input;
pub mod query;
pub mod registry;
pub mod store;

pub use error::{Error, Result, ValidationError};
pub use registry::{Attachment, Registry};
