//! Paginated retrieval of reach records.
//!
//! [`ReachSource`] is the transport seam: one call returns one page. The
//! [`ReachPages`] cursor walks a source forward from page zero, yielding
//! reaches lazily and stopping once a page reports that nothing follows it.
//!
//! # Example
//!
//! ```
//! use reachmap_core::{PageRequest, Reach, ReachPage, ReachSource, SourceError, fetch_reaches};
//!
//! struct SinglePage;
//!
//! impl ReachSource for SinglePage {
//!     fn fetch_page(&self, _request: PageRequest) -> Result<ReachPage, SourceError> {
//!         Ok(ReachPage {
//!             reaches: vec![
//!                 Reach::new("1", "Rogue", "Wild").with_geometry("1 2,3 4"),
//!                 Reach::new("2", "Rogue", "Lost"),
//!             ],
//!             has_more_pages: false,
//!         })
//!     }
//! }
//!
//! let reaches = fetch_reaches(&SinglePage).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(reaches.len(), 1);
//! # Ok::<(), SourceError>(())
//! ```

use std::iter::FusedIterator;

use log::debug;
use thiserror::Error;

use crate::reach::Reach;

/// Number of reaches requested per page unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A single page query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Maximum number of reaches on the page.
    pub per_page: u32,
}

/// One page of reaches returned by a [`ReachSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReachPage {
    /// Reaches on this page, geometry not yet filtered.
    pub reaches: Vec<Reach>,
    /// Whether the source holds further pages.
    pub has_more_pages: bool,
}

/// Errors from [`ReachSource::fetch_page`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The request could not be sent or the connection failed.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The server answered with an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The response body could not be decoded.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service reported an error in an otherwise valid response.
    #[error("data source reported an error: {message}")]
    Service {
        /// Error messages reported by the service.
        message: String,
    },
}

/// Fetch pages of reach records.
pub trait ReachSource {
    /// Return the page described by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the page cannot be retrieved. Callers
    /// treat every error as fatal.
    fn fetch_page(&self, request: PageRequest) -> Result<ReachPage, SourceError>;
}

/// Forward-only cursor over every reach a [`ReachSource`] holds.
///
/// Pages are requested one at a time with increasing indices, only once the
/// previous page has been drained. The cursor finishes after yielding the
/// first page whose `has_more_pages` flag is false, or after yielding the
/// first error. Reaches with empty geometry are skipped.
#[derive(Debug)]
pub struct ReachPages<'a, S: ?Sized> {
    source: &'a S,
    per_page: u32,
    next_page: u32,
    buffer: std::vec::IntoIter<Reach>,
    finished: bool,
}

impl<'a, S: ReachSource + ?Sized> ReachPages<'a, S> {
    /// Create a cursor using [`DEFAULT_PAGE_SIZE`].
    pub fn new(source: &'a S) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    /// Create a cursor requesting `per_page` reaches at a time.
    pub fn with_page_size(source: &'a S, per_page: u32) -> Self {
        Self {
            source,
            per_page,
            next_page: 0,
            buffer: Vec::new().into_iter(),
            finished: false,
        }
    }

    /// Index of the page the cursor will request next.
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    fn fetch_next(&mut self) -> Result<(), SourceError> {
        let request = PageRequest {
            page: self.next_page,
            per_page: self.per_page,
        };
        let page = self.source.fetch_page(request)?;
        debug!(
            "fetched page {} with {} reaches (more pages: {})",
            request.page,
            page.reaches.len(),
            page.has_more_pages
        );
        self.finished = !page.has_more_pages;
        self.next_page = self.next_page.saturating_add(1);
        self.buffer = page.reaches.into_iter();
        Ok(())
    }
}

impl<S: ReachSource + ?Sized> Iterator for ReachPages<'_, S> {
    type Item = Result<Reach, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reach) = self.buffer.next() {
                if reach.has_geometry() {
                    return Some(Ok(reach));
                }
                debug!("skipping reach {} without geometry", reach.id);
                continue;
            }
            if self.finished {
                return None;
            }
            if let Err(error) = self.fetch_next() {
                self.finished = true;
                return Some(Err(error));
            }
        }
    }
}

impl<S: ReachSource + ?Sized> FusedIterator for ReachPages<'_, S> {}

/// Walk `source` from the first page with the default page size.
pub fn fetch_reaches<S: ReachSource + ?Sized>(source: &S) -> ReachPages<'_, S> {
    ReachPages::new(source)
}
