//! Flight search requests.
//!
//! This module provides:
//! - The fixed search payload and the departure date policy
//! - The search client that replays captured headers and retries with fresh ones

mod client;
mod payload;

pub use client::SearchClient;
pub use payload::{PayloadDate, SearchRequest};
