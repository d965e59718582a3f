//! npsites library
//!
//! This module exposes the cache, fetch mediator, scraping clients and the
//! interactive session for use by the binary and integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod fetch;
