//! Core types and trait definitions for the Sheer lead store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend, the API and the admin client all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod dashboard;
pub mod error;
pub mod form;
pub mod query;
pub mod store;
pub mod submission;

pub use error::{Error, Result};
