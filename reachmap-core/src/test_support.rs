//! Test utilities for reach sources.
//!
//! This module provides [`StubReachSource`], a deterministic test double for
//! [`ReachSource`] that serves canned pages without touching the network,
//! plus small builders for sample reaches.

use std::cell::RefCell;

use crate::reach::{Reach, State};
use crate::source::{PageRequest, ReachPage, ReachSource, SourceError};

/// Stub `ReachSource` for testing.
///
/// Responses are served by page index, and every request is recorded so
/// tests can assert on the pages the cursor asked for.
///
/// # Example
///
/// ```
/// use reachmap_core::test_support::{StubReachSource, sample_reach};
/// use reachmap_core::{ReachPage, fetch_reaches};
///
/// let source = StubReachSource::with_pages(vec![ReachPage {
///     reaches: vec![sample_reach("1", "Rogue")],
///     has_more_pages: false,
/// }]);
/// assert_eq!(fetch_reaches(&source).count(), 1);
/// assert_eq!(source.requests().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StubReachSource {
    responses: Vec<Result<ReachPage, SourceError>>,
    requests: RefCell<Vec<PageRequest>>,
}

impl StubReachSource {
    /// Create a source serving the given pages in order.
    #[must_use]
    pub fn with_pages(pages: Vec<ReachPage>) -> Self {
        Self::with_responses(pages.into_iter().map(Ok).collect())
    }

    /// Create a source serving the given results in order.
    #[must_use]
    pub fn with_responses(responses: Vec<Result<ReachPage, SourceError>>) -> Self {
        Self {
            responses,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.borrow().clone()
    }
}

impl ReachSource for StubReachSource {
    fn fetch_page(&self, request: PageRequest) -> Result<ReachPage, SourceError> {
        self.requests.borrow_mut().push(request);
        let response = usize::try_from(request.page)
            .ok()
            .and_then(|index| self.responses.get(index));
        match response {
            Some(result) => result.clone(),
            None => Err(SourceError::Service {
                message: format!("no stub response for page {}", request.page),
            }),
        }
    }
}

/// Build a reach with a two-point line, both endpoints, and an `"OR"` state.
#[must_use]
pub fn sample_reach(id: &str, river: &str) -> Reach {
    Reach::new(id, river, format!("Section {id}"))
        .with_class("III")
        .with_put_in("-123.5 42.6")
        .with_take_out("-123.9 42.7")
        .with_geometry("-123.5 42.6,-123.9 42.7")
        .with_state(State::new("OR", "Oregon"))
}
