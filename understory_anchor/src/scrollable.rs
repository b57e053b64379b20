// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll capabilities of container handles and how a command reaches them.
//!
//! Hosts expose scrolling in different shapes. A plain scroll view takes a
//! point (`{ y, animated }`), a list takes a single offset, and older
//! responder-based views take a point through a separate entry point. Some
//! handles are wrappers around the real scrollable node and only hand it out
//! through an accessor.
//!
//! [`ScrollContainer`] models all of these as optional capabilities. A handle
//! implements the accessors it supports and leaves the rest at their `None`
//! defaults. [`resolve_scrollable`] unwraps a handle to the node that should
//! receive the command and [`scroll_container_to`] issues it.
//!
//! ## Resolution order
//!
//! 1. A handle exposing any scroll capability is used as is.
//! 2. Otherwise its [`scroll_responder`](ScrollContainer::scroll_responder), if any.
//! 3. Otherwise its [`node`](ScrollContainer::node), if any.
//! 4. Otherwise the handle itself.
//!
//! On the resolved node the capabilities are tried in the order point,
//! offset, responder. The first one present receives the command.

use alloc::rc::Rc;

use crate::{Axis, ScrollError, ScrollOutcome, ScrollPoint};

/// Point-style scrolling: `scroll_to({ x | y, animated })`.
pub trait PointScroll {
    /// Scrolls to `point`. Unset coordinates keep their current value.
    fn scroll_to(&self, point: ScrollPoint);
}

/// Offset-style scrolling used by index/offset lists.
pub trait OffsetScroll {
    /// Scrolls so that `offset` along the list's axis is at the leading edge.
    fn scroll_to_offset(&self, offset: f64, animated: bool);
}

/// Legacy responder-style scrolling.
pub trait ResponderScroll {
    /// Scrolls to `point` through the scroll responder.
    fn scroll_responder_scroll_to(&self, point: ScrollPoint);
}

/// A handle to something that may be scrolled, directly or through a wrapper.
///
/// Every method has a `None` default; implement only what the handle supports.
///
/// ```
/// use core::cell::Cell;
/// use understory_anchor::{Axis, OffsetScroll, ScrollContainer, scroll_container_to};
///
/// #[derive(Default)]
/// struct List { offset: Cell<f64> }
///
/// impl OffsetScroll for List {
///     fn scroll_to_offset(&self, offset: f64, _animated: bool) {
///         self.offset.set(offset);
///     }
/// }
///
/// impl ScrollContainer for List {
///     fn as_offset_scroll(&self) -> Option<&dyn OffsetScroll> {
///         Some(self)
///     }
/// }
///
/// let list = List::default();
/// scroll_container_to(&list, Axis::Vertical, 120.0, true).unwrap();
/// assert_eq!(list.offset.get(), 120.0);
/// ```
pub trait ScrollContainer {
    /// Point-style scroll capability.
    fn as_point_scroll(&self) -> Option<&dyn PointScroll> {
        None
    }

    /// Offset-style scroll capability.
    fn as_offset_scroll(&self) -> Option<&dyn OffsetScroll> {
        None
    }

    /// Responder-style scroll capability.
    fn as_responder_scroll(&self) -> Option<&dyn ResponderScroll> {
        None
    }

    /// For list-like wrappers: the scroll responder that does the scrolling.
    fn scroll_responder(&self) -> Option<&dyn ScrollContainer> {
        None
    }

    /// For animated or otherwise wrapped views: the underlying node.
    fn node(&self) -> Option<&dyn ScrollContainer> {
        None
    }
}

impl<S: ScrollContainer + ?Sized> ScrollContainer for Rc<S> {
    fn as_point_scroll(&self) -> Option<&dyn PointScroll> {
        (**self).as_point_scroll()
    }

    fn as_offset_scroll(&self) -> Option<&dyn OffsetScroll> {
        (**self).as_offset_scroll()
    }

    fn as_responder_scroll(&self) -> Option<&dyn ResponderScroll> {
        (**self).as_responder_scroll()
    }

    fn scroll_responder(&self) -> Option<&dyn ScrollContainer> {
        (**self).scroll_responder()
    }

    fn node(&self) -> Option<&dyn ScrollContainer> {
        (**self).node()
    }
}

/// Which capability a resolved node would receive a command through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollCapability {
    /// [`PointScroll`].
    Point,
    /// [`OffsetScroll`].
    Offset,
    /// [`ResponderScroll`].
    Responder,
}

/// Returns the first capability `node` exposes, in point, offset, responder order.
#[must_use]
pub fn capability(node: &dyn ScrollContainer) -> Option<ScrollCapability> {
    if node.as_point_scroll().is_some() {
        Some(ScrollCapability::Point)
    } else if node.as_offset_scroll().is_some() {
        Some(ScrollCapability::Offset)
    } else if node.as_responder_scroll().is_some() {
        Some(ScrollCapability::Responder)
    } else {
        None
    }
}

/// Unwraps `container` to the node that should receive scroll commands.
///
/// See the [module docs](self) for the resolution order.
#[must_use]
pub fn resolve_scrollable(container: &dyn ScrollContainer) -> &dyn ScrollContainer {
    if capability(container).is_some() {
        container
    } else if let Some(responder) = container.scroll_responder() {
        responder
    } else if let Some(node) = container.node() {
        node
    } else {
        container
    }
}

/// Scrolls `container` to `position` along `axis`.
///
/// Returns [`ScrollError::UnsupportedContainer`] when the resolved node
/// exposes no scroll capability; nothing is scrolled in that case.
pub fn scroll_container_to(
    container: &dyn ScrollContainer,
    axis: Axis,
    position: f64,
    animated: bool,
) -> ScrollOutcome {
    let node = resolve_scrollable(container);
    let point = ScrollPoint::along(axis, position, animated);
    if let Some(scroll) = node.as_point_scroll() {
        scroll.scroll_to(point);
    } else if let Some(scroll) = node.as_offset_scroll() {
        scroll.scroll_to_offset(position, animated);
    } else if let Some(scroll) = node.as_responder_scroll() {
        scroll.scroll_responder_scroll_to(point);
    } else {
        return Err(ScrollError::UnsupportedContainer);
    }
    Ok(())
}
