//! Cache module for storing HTTP responses to disk
//!
//! This module provides a best-effort cache store that persists every fetched
//! response body into a single JSON document. Any failure to read that document
//! degrades to an empty cache, so the cache can never be the reason a lookup fails.

mod key;
mod store;

pub use key::build_key;
pub use store::CacheStore;
