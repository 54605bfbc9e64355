//! Header sets and the sources that mint them.
//!
//! The search endpoint only answers requests that look like they come from a
//! live browser session. A [`HeaderSource`] produces a [`HeaderSet`] that the
//! search client replays until the endpoint rejects it, then asks for a new one.

mod browser;
mod file;
mod set;

pub use browser::{BrowserHeaderSource, BrowserOptions};
pub use file::FileHeaderSource;
pub use set::HeaderSet;

use crate::error_handling::HeaderCaptureError;

/// Produces fresh header sets on demand.
///
/// Called once before the first search and again before every retry.
#[allow(async_fn_in_trait)]
pub trait HeaderSource {
    /// Mints a new header set, replacing any previous one wholesale.
    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError>;
}
