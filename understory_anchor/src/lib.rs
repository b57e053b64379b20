// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_anchor --heading-base-level=0

//! Understory Anchor: named scroll targets for UI scroll containers.
//!
//! Register named positions ("targets") inside a scroll container, then scroll
//! the container so a target comes into view, from a pressable trigger or from
//! code outside the view tree.
//!
//! The crate does not render, lay out, or measure anything itself. A host
//! toolkit supplies those through [`AnchorHost`]:
//!
//! - looking up the native node of a container handle,
//! - measuring a target's position relative to that node (asynchronous, callback based),
//! - running a callback on the next frame.
//!
//! ## Pieces
//!
//! - [`AnchorRegistry`]: name → target handle plus one container handle.
//! - [`AnchorScope`]: a shared registry with a fixed [`Axis`] and the
//!   [`scroll_to`](AnchorScope::scroll_to) algorithm. Each request returns a
//!   [`ScrollFuture`] that settles exactly once with a [`ScrollOutcome`].
//! - [`ScrollContainer`]: the scroll capabilities a container handle exposes
//!   (point, offset, or responder scrolling, possibly behind a wrapper).
//! - [`MergedRef`] / [`NodeRef`]: forward one mounted handle to the scope and
//!   to the application.
//! - [`AnchorProvider`], [`AnchorContainer`], [`Target`], [`Anchor`]: lifecycle
//!   glue for hosts, and [`AnchorsRef`] for scrolling from outside.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use understory_anchor::{
//!     AnchorHost, AnchorScope, Axis, FrameCallback, MeasureCallback, PointScroll,
//!     ScrollContainer, ScrollPoint, ScrollToOptions,
//! };
//!
//! #[derive(Default)]
//! struct View { y: Cell<f64> }
//!
//! impl PointScroll for View {
//!     fn scroll_to(&self, point: ScrollPoint) {
//!         self.y.set(point.y.unwrap_or(self.y.get()));
//!     }
//! }
//!
//! impl ScrollContainer for View {
//!     fn as_point_scroll(&self) -> Option<&dyn PointScroll> {
//!         Some(self)
//!     }
//! }
//!
//! // A host that measures synchronously and runs frames when asked.
//! #[derive(Default)]
//! struct Host { frames: RefCell<Vec<FrameCallback>> }
//!
//! impl AnchorHost for Host {
//!     type Target = Point;
//!     type Container = Rc<View>;
//!     type Node = ();
//!
//!     fn find_node(&self, _: &Rc<View>) -> Option<()> { Some(()) }
//!
//!     fn measure_layout(&self, target: &Point, _: &(), callback: MeasureCallback) {
//!         callback(Some(*target));
//!     }
//!
//!     fn request_frame(&self, callback: FrameCallback) {
//!         self.frames.borrow_mut().push(callback);
//!     }
//! }
//!
//! let host = Rc::new(Host::default());
//! let scope = AnchorScope::new(host.clone(), Axis::Vertical);
//! let view = Rc::new(View::default());
//! scope.register_container(Some(view.clone()));
//! scope.register_target("footer", Point::new(0.0, 480.0));
//!
//! let request = scope.scroll_to("footer", ScrollToOptions::default());
//! for frame in host.frames.take() {
//!     frame();
//! }
//!
//! assert_eq!(request.outcome(), Some(Ok(())));
//! // 10 pixels before the target by default.
//! assert_eq!(view.y.get(), 470.0);
//! ```
//!
//! ## Failures
//!
//! Every request settles; none panic. See [`ScrollError`] for the kinds. A
//! missing target fails fast without measuring, and a container that exposes
//! no scroll capability reports [`ScrollError::UnsupportedContainer`] rather
//! than success.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` and `tracing`.
//! - `libm`: `no_std` float math for `kurbo`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod components;
mod error;
mod handle;
mod host;
mod pending;
mod refs;
mod registry;
mod scope;
mod scrollable;
mod types;

#[cfg(test)]
mod testing;

pub use components::{Anchor, AnchorContainer, AnchorProvider, ContainerKind, Target};
pub use error::ScrollError;
pub use handle::AnchorsRef;
pub use host::{AnchorHost, FrameCallback, MeasureCallback};
pub use pending::ScrollFuture;
pub use refs::{MergedRef, NodeRef};
pub use registry::AnchorRegistry;
pub use scope::AnchorScope;
pub use scrollable::{
    OffsetScroll, PointScroll, ResponderScroll, ScrollCapability, ScrollContainer, capability,
    resolve_scrollable, scroll_container_to,
};
pub use types::{Axis, ScrollOutcome, ScrollPoint, ScrollToOptions};
