// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host toolkit boundary: native nodes, layout measurement, and frames.

use alloc::boxed::Box;

use kurbo::Point;

use crate::ScrollContainer;

/// Receives the result of a layout measurement.
///
/// `Some(point)` carries the target's `(left, top)` relative to the container;
/// `None` means the host could not measure it.
pub type MeasureCallback = Box<dyn FnOnce(Option<Point>)>;

/// Runs on the host's next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Capabilities a UI toolkit provides so scopes can measure and scroll.
///
/// Both asynchronous operations are callback based and may complete on a later
/// turn of the host's event loop. A host should invoke each callback exactly
/// once. Dropping one uncalled settles the affected request with
/// [`ScrollError::Abandoned`](crate::ScrollError::Abandoned).
///
/// All calls happen on the UI thread; nothing here needs to be `Send`.
pub trait AnchorHost: 'static {
    /// Handle to a laid-out target view.
    type Target: Clone + 'static;
    /// Handle to a scroll container as the application sees it.
    type Container: ScrollContainer + Clone + 'static;
    /// Native node that measurements are taken relative to.
    type Node;

    /// Looks up the native node behind `container`, if it is mounted.
    fn find_node(&self, container: &Self::Container) -> Option<Self::Node>;

    /// Measures `target` relative to `relative_to` and reports through `callback`.
    fn measure_layout(
        &self,
        target: &Self::Target,
        relative_to: &Self::Node,
        callback: MeasureCallback,
    );

    /// Schedules `callback` for the next frame.
    fn request_frame(&self, callback: FrameCallback);
}
