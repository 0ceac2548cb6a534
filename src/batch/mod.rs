//! Batch aggregation: concurrent fan-out over the resolver with
//! partial-failure tolerance.
//!
//! Every dispatched handle ends up in exactly one of the two tracks of
//! [`BatchOutcome`]: a resolved [`AccountMetrics`] record or a
//! [`FetchFailure`]. A single handle failing never aborts or drops its
//! siblings; the only fatal condition is an empty handle set, which is
//! rejected before any resolver call is made.

use crate::resolver::{AccountMetrics, MetricsResolver, ResolveError};
use futures::future::join_all;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use thiserror::Error;

/// Message used when a resolver error carries no text of its own.
const GENERIC_FAILURE_MESSAGE: &str = "failed to fetch account metrics";

/// What a failure is attributable to.
///
/// A dedicated `Request` variant replaces the wire-level `"request"`
/// sentinel so a real account literally named `request` cannot be mistaken
/// for a request-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureScope {
    /// Resolution failed for one specific handle.
    Handle(String),

    /// The batch call as a whole failed.
    Request,
}

/// A failed fetch, paired with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub scope: FailureScope,
    pub message: String,
}

impl FetchFailure {
    #[must_use]
    pub fn for_handle(handle: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scope: FailureScope::Handle(handle.into()),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn for_request(message: impl Into<String>) -> Self {
        Self {
            scope: FailureScope::Request,
            message: message.into(),
        }
    }
}

// On the wire a failure is `{ "handle": ..., "message": ... }`, with the
// literal handle `"request"` denoting a request-level failure.
impl Serialize for FetchFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let handle = match &self.scope {
            FailureScope::Handle(handle) => handle.as_str(),
            FailureScope::Request => "request",
        };
        let mut state = serializer.serialize_struct("FetchFailure", 2)?;
        state.serialize_field("handle", handle)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// The two-track result of one batch: resolved records plus per-handle
/// failures, both in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<AccountMetrics>,
    pub failures: Vec<FetchFailure>,
}

/// Request-level rejection; surfaced before any resolver call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("no valid handles were provided")]
    NoValidHandles,
}

/// Resolve a batch of canonical handles concurrently.
///
/// Handles are deduplicated by exact string equality, preserving
/// first-occurrence order, and one resolver call per distinct handle is
/// put in flight. The join waits for every call to settle; each settled
/// outcome is then filed into its dispatch-order slot, success or failure.
pub async fn resolve_batch<R>(resolver: &R, handles: &[String]) -> core::result::Result<BatchOutcome, BatchError>
where
    R: MetricsResolver + ?Sized,
{
    let mut seen = HashSet::new();
    let unique: Vec<&str> = handles
        .iter()
        .map(String::as_str)
        .filter(|handle| seen.insert(*handle))
        .collect();

    if unique.is_empty() {
        return Err(BatchError::NoValidHandles);
    }

    log::debug!("dispatching {} resolver calls ({} raw handles)", unique.len(), handles.len());

    let settled = join_all(unique.iter().map(|handle| resolver.resolve(handle))).await;

    let mut outcome = BatchOutcome::default();
    for (handle, result) in unique.iter().zip(settled) {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(err) => outcome.failures.push(FetchFailure::for_handle(*handle, failure_message(&err))),
        }
    }

    Ok(outcome)
}

fn failure_message(err: &ResolveError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}
