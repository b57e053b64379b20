// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Failure kinds a scroll request can settle with.

use alloc::string::{String, ToString};

/// Why a scroll request did not scroll.
///
/// Every request settles with either `Ok(())` or one of these; nothing is
/// thrown or retried. The [`Display`](core::fmt::Display) text doubles as the
/// message of the `{ success: false, message }` form returned by
/// [`ScrollError::message`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    /// The request went through an [`AnchorsRef`](crate::AnchorsRef) that was
    /// never attached to a provider.
    #[error("Missing anchor provider.")]
    MissingProvider,
    /// The scope has no container, or the container has no native node.
    #[error("Scroll ref does not exist. Will not scroll to view.")]
    NoContainer,
    /// No target is registered under this name.
    #[error(
        "Anchor ref {0} does not exist. It will not scroll. Please make sure to use the \
         ScrollView provided by understory_anchor, or register your own scroll container."
    )]
    MissingTarget(String),
    /// The host could not measure the target relative to the container.
    #[error("Failed to measure target node.")]
    MeasureFailed,
    /// The container exposes none of the recognized scroll capabilities.
    #[error("Scroll container does not support scrolling to an offset.")]
    UnsupportedContainer,
    /// The host dropped a pending callback without invoking it.
    #[error("Scroll request was dropped before it completed.")]
    Abandoned,
}

impl ScrollError {
    /// Returns the user-facing message for this failure.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
