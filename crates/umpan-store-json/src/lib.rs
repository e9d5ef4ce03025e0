//! Flat-file JSON backend for the umpan feedback service.
//!
//! Each collection is one pretty-printed JSON document in a data directory.
//! File access goes through [`tokio::fs`] so it never blocks the async
//! runtime.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonFileStore;

#[cfg(test)]
mod tests;
