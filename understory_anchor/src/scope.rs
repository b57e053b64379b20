// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One anchor scope: a registry, its axis, and the scroll-to algorithm.
//!
//! ## Scroll-to
//!
//! [`AnchorScope::scroll_to`] settles its [`ScrollFuture`] exactly once:
//!
//! 1. No container registered, or the host finds no native node for it:
//!    [`ScrollError::NoContainer`], nothing is measured.
//! 2. No target under the requested name: [`ScrollError::MissingTarget`],
//!    nothing is measured.
//! 3. The host measures the target relative to the container node.
//!    A failed measurement settles with [`ScrollError::MeasureFailed`].
//! 4. On the next frame the scope re-reads its container, computes
//!    `max(primary + offset, 0)` along its [`Axis`], and scrolls it through
//!    [`scroll_container_to`]. A container with no scroll capability settles
//!    with [`ScrollError::UnsupportedContainer`].
//!
//! Requests are independent. Nothing orders or cancels them.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use core::cell::{Ref, RefCell};
use core::fmt;

use kurbo::Point;

use crate::pending::{Resolver, pending};
use crate::{
    AnchorHost, AnchorRegistry, Axis, FrameCallback, MeasureCallback, ScrollError, ScrollFuture,
    ScrollToOptions, scroll_container_to,
};

struct ScopeInner<H: AnchorHost> {
    host: Rc<H>,
    axis: Axis,
    registry: RefCell<AnchorRegistry<H::Target, H::Container>>,
}

/// Shared handle to one anchor scope.
///
/// Clones refer to the same registry; hand them to every component that
/// registers targets, registers the container, or requests scrolls.
pub struct AnchorScope<H: AnchorHost> {
    inner: Rc<ScopeInner<H>>,
}

impl<H: AnchorHost> Clone for AnchorScope<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: AnchorHost> fmt::Debug for AnchorScope<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.borrow();
        f.debug_struct("AnchorScope")
            .field("axis", &self.inner.axis)
            .field("targets", &registry.len())
            .field("has_container", &registry.container().is_some())
            .finish_non_exhaustive()
    }
}

impl<H: AnchorHost> AnchorScope<H> {
    /// Creates an empty scope scrolling along `axis`.
    #[must_use]
    pub fn new(host: Rc<H>, axis: Axis) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                host,
                axis,
                registry: RefCell::new(AnchorRegistry::new()),
            }),
        }
    }

    /// The scroll axis this scope was created with.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.inner.axis
    }

    /// The host this scope measures and schedules through.
    #[must_use]
    pub fn host(&self) -> &Rc<H> {
        &self.inner.host
    }

    /// Returns `true` if both handles refer to the same scope.
    #[must_use]
    pub fn same_scope(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrows the registry for inspection.
    ///
    /// Do not hold the borrow across calls that register or scroll.
    #[must_use]
    pub fn registry(&self) -> Ref<'_, AnchorRegistry<H::Target, H::Container>> {
        self.inner.registry.borrow()
    }

    /// Registers `handle` under `name`, replacing any previous handle.
    pub fn register_target(&self, name: impl Into<String>, handle: H::Target) {
        self.inner
            .registry
            .borrow_mut()
            .register_target(name, handle);
    }

    /// Removes the target registered under `name`.
    pub fn unregister_target(&self, name: &str) -> Option<H::Target> {
        self.inner.registry.borrow_mut().unregister_target(name)
    }

    /// Sets the scope's container. `None` keeps the current one.
    pub fn register_container(&self, handle: Option<H::Container>) {
        self.inner.registry.borrow_mut().register_container(handle);
    }

    /// Returns the handle registered under `name`.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<H::Target> {
        self.inner.registry.borrow().target(name).cloned()
    }

    /// Returns the active container.
    #[must_use]
    pub fn container(&self) -> Option<H::Container> {
        self.inner.registry.borrow().container().cloned()
    }

    /// Ref callback for a target view named `name`.
    ///
    /// `Some(handle)` registers the target and `None` (unmount) removes it.
    /// The callback holds the scope weakly and does nothing once it is gone.
    pub fn target_ref(&self, name: &str) -> impl Fn(Option<H::Target>) + 'static + use<H> {
        let scope = Rc::downgrade(&self.inner);
        let name = String::from(name);
        move |handle| {
            let Some(inner) = scope.upgrade() else {
                return;
            };
            let mut registry = inner.registry.borrow_mut();
            match handle {
                Some(handle) => registry.register_target(name.clone(), handle),
                None => {
                    registry.unregister_target(&name);
                }
            }
        }
    }

    /// Ref callback for the scope's container. `None` is ignored.
    pub fn container_ref(&self) -> impl Fn(Option<H::Container>) + 'static + use<H> {
        let scope = Rc::downgrade(&self.inner);
        move |handle| {
            if let Some(inner) = scope.upgrade() {
                inner.registry.borrow_mut().register_container(handle);
            }
        }
    }

    /// Scrolls the container so the target `name` comes into view.
    ///
    /// See the [module docs](self) for each step and failure.
    pub fn scroll_to(&self, name: &str, options: ScrollToOptions) -> ScrollFuture {
        tracing::debug!(anchor = %name, ?options, "scroll requested");
        let (container, target) = {
            let registry = self.inner.registry.borrow();
            let container = registry.container().cloned();
            (container, registry.target(name).cloned())
        };
        let Some(node) = container.and_then(|c| self.inner.host.find_node(&c)) else {
            return failed(ScrollError::NoContainer);
        };
        let Some(target) = target else {
            return failed(ScrollError::MissingTarget(String::from(name)));
        };

        let (resolver, future) = pending();
        let scope = Rc::downgrade(&self.inner);
        let callback: MeasureCallback =
            Box::new(move |measured| on_measured(scope, measured, options, resolver));
        self.inner.host.measure_layout(&target, &node, callback);
        future
    }
}

fn on_measured<H: AnchorHost>(
    scope: Weak<ScopeInner<H>>,
    measured: Option<Point>,
    options: ScrollToOptions,
    resolver: Resolver,
) {
    let Some(position) = measured else {
        tracing::debug!("target measurement failed");
        resolver.resolve(Err(ScrollError::MeasureFailed));
        return;
    };
    let Some(inner) = scope.upgrade() else {
        resolver.resolve(Err(ScrollError::NoContainer));
        return;
    };
    tracing::trace!(x = position.x, y = position.y, "target measured");
    let frame: FrameCallback = Box::new(move || on_frame(scope, position, options, resolver));
    inner.host.request_frame(frame);
}

fn on_frame<H: AnchorHost>(
    scope: Weak<ScopeInner<H>>,
    position: Point,
    options: ScrollToOptions,
    resolver: Resolver,
) {
    let Some(inner) = scope.upgrade() else {
        resolver.resolve(Err(ScrollError::NoContainer));
        return;
    };
    // The container may have been swapped since the request started.
    let container = inner.registry.borrow().container().cloned();
    let Some(container) = container else {
        resolver.resolve(Err(ScrollError::NoContainer));
        return;
    };
    let axis = inner.axis;
    let to = options.resolve(axis, position);
    let outcome = scroll_container_to(&container, axis, to, options.animated);
    tracing::debug!(to, ?axis, ?outcome, "scroll settled");
    resolver.resolve(outcome);
}

fn failed(error: ScrollError) -> ScrollFuture {
    tracing::debug!(%error, "scroll request failed");
    ScrollFuture::ready(Err(error))
}

#[cfg(test)]
mod tests {
    use super::AnchorScope;
    use crate::testing::{Call, MockContainer, MockHost, Shape};
    use crate::{Axis, ScrollError, ScrollPoint, ScrollToOptions};
    use alloc::rc::Rc;
    use alloc::string::String;
    use kurbo::Point;

    fn scope_with(
        host: &Rc<MockHost>,
        axis: Axis,
        shape: Shape,
    ) -> (AnchorScope<MockHost>, Rc<MockContainer>) {
        let scope = AnchorScope::new(host.clone(), axis);
        let container = Rc::new(MockContainer::new(shape));
        scope.register_container(Some(container.clone()));
        (scope, container)
    }

    #[test]
    fn scrolls_vertically_with_default_offset() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("bottom", 1);
        host.place(1, Point::new(100.0, 250.0));

        let future = scope.scroll_to("bottom", ScrollToOptions::default());
        assert!(!future.is_settled());
        host.run_until_idle();

        assert_eq!(future.outcome(), Some(Ok(())));
        let expected = ScrollPoint {
            x: None,
            y: Some(240.0),
            animated: true,
        };
        assert_eq!(container.calls(), [Call::Point(expected)]);
    }

    #[test]
    fn clamps_to_zero() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("top", 1);
        host.place(1, Point::new(100.0, 5.0));

        let future = scope.scroll_to("top", ScrollToOptions::default());
        host.run_until_idle();

        assert_eq!(future.outcome(), Some(Ok(())));
        let expected = ScrollPoint {
            x: None,
            y: Some(0.0),
            animated: true,
        };
        assert_eq!(container.calls(), [Call::Point(expected)]);
    }

    #[test]
    fn horizontal_uses_left_and_x() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Horizontal, Shape::Point);
        scope.register_target("side", 1);
        host.place(1, Point::new(100.0, 250.0));

        let future = scope.scroll_to("side", ScrollToOptions::default().animated(false));
        host.run_until_idle();

        assert_eq!(future.outcome(), Some(Ok(())));
        let expected = ScrollPoint {
            x: Some(90.0),
            y: None,
            animated: false,
        };
        assert_eq!(container.calls(), [Call::Point(expected)]);
    }

    #[test]
    fn positive_offset_moves_past_the_edge() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Offset);
        scope.register_target("item", 1);
        host.place(1, Point::new(0.0, 40.0));

        let future = scope.scroll_to("item", ScrollToOptions::default().offset(15.0));
        host.run_until_idle();

        assert_eq!(future.outcome(), Some(Ok(())));
        assert_eq!(container.calls(), [Call::Offset(55.0, true)]);
    }

    #[test]
    fn no_container_fails_without_measuring() {
        let host = Rc::new(MockHost::default());
        let scope = AnchorScope::new(host.clone(), Axis::Vertical);
        scope.register_target("a", 1);
        host.place(1, Point::new(0.0, 10.0));

        let future = scope.scroll_to("a", ScrollToOptions::default());
        assert_eq!(future.outcome(), Some(Err(ScrollError::NoContainer)));
        assert_eq!(host.measure_requests(), 0);
    }

    #[test]
    fn unmounted_container_counts_as_missing() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        container.set_mounted(false);
        scope.register_target("a", 1);

        let future = scope.scroll_to("a", ScrollToOptions::default());
        assert_eq!(future.outcome(), Some(Err(ScrollError::NoContainer)));
        assert_eq!(host.measure_requests(), 0);
    }

    #[test]
    fn missing_target_fails_fast() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);

        let future = scope.scroll_to("nowhere", ScrollToOptions::default());
        assert_eq!(
            future.outcome(),
            Some(Err(ScrollError::MissingTarget(String::from("nowhere"))))
        );
        assert_eq!(host.measure_requests(), 0);
        assert!(container.calls().is_empty());
    }

    #[test]
    fn measurement_failure_never_scrolls() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        // Registered but never laid out: the mock host fails the measurement.
        scope.register_target("ghost", 9);

        let future = scope.scroll_to("ghost", ScrollToOptions::default());
        host.run_until_idle();

        let outcome = future.outcome().unwrap();
        assert_eq!(outcome, Err(ScrollError::MeasureFailed));
        assert_eq!(
            outcome.unwrap_err().message(),
            "Failed to measure target node."
        );
        assert!(container.calls().is_empty());
    }

    #[test]
    fn unsupported_container_is_not_success() {
        let host = Rc::new(MockHost::default());
        let (scope, _container) = scope_with(&host, Axis::Vertical, Shape::Inert);
        scope.register_target("a", 1);
        host.place(1, Point::new(0.0, 100.0));

        let future = scope.scroll_to("a", ScrollToOptions::default());
        host.run_until_idle();
        assert_eq!(
            future.outcome(),
            Some(Err(ScrollError::UnsupportedContainer))
        );
    }

    #[test]
    fn concurrent_requests_settle_independently() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("a", 1);
        scope.register_target("b", 2);
        host.place(1, Point::new(0.0, 100.0));
        host.place(2, Point::new(0.0, 300.0));

        let first = scope.scroll_to("a", ScrollToOptions::default());
        let second = scope.scroll_to("b", ScrollToOptions::default());
        // Complete the second request's measurement first.
        host.flush_measurements_reversed();
        host.flush_frames();

        assert_eq!(first.outcome(), Some(Ok(())));
        assert_eq!(second.outcome(), Some(Ok(())));
        assert_eq!(
            container.calls(),
            [
                Call::Point(ScrollPoint::along(Axis::Vertical, 290.0, true)),
                Call::Point(ScrollPoint::along(Axis::Vertical, 90.0, true)),
            ]
        );
    }

    #[test]
    fn container_swap_applies_to_unsettled_requests() {
        let host = Rc::new(MockHost::default());
        let (scope, old) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("a", 1);
        host.place(1, Point::new(0.0, 100.0));

        // Settled before the swap: goes to the old container.
        let settled = scope.scroll_to("a", ScrollToOptions::default());
        host.run_until_idle();
        assert_eq!(settled.outcome(), Some(Ok(())));

        // Measured but not yet scrolled when the container changes.
        let queued = scope.scroll_to("a", ScrollToOptions::default());
        host.flush_measurements();
        let new = Rc::new(MockContainer::new(Shape::Offset));
        scope.register_container(Some(new.clone()));
        host.flush_frames();

        assert_eq!(queued.outcome(), Some(Ok(())));
        assert_eq!(old.calls().len(), 1);
        assert_eq!(new.calls(), [Call::Offset(90.0, true)]);
    }

    #[test]
    fn dropped_callbacks_abandon_the_request() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("a", 1);
        host.place(1, Point::new(0.0, 100.0));

        let future = scope.scroll_to("a", ScrollToOptions::default());
        host.discard_pending();
        assert_eq!(future.outcome(), Some(Err(ScrollError::Abandoned)));
        assert!(container.calls().is_empty());
    }

    #[test]
    fn dropped_scope_settles_queued_frames() {
        let host = Rc::new(MockHost::default());
        let (scope, container) = scope_with(&host, Axis::Vertical, Shape::Point);
        scope.register_target("a", 1);
        host.place(1, Point::new(0.0, 100.0));

        let future = scope.scroll_to("a", ScrollToOptions::default());
        host.flush_measurements();
        drop(scope);
        host.flush_frames();

        assert_eq!(future.outcome(), Some(Err(ScrollError::NoContainer)));
        assert!(container.calls().is_empty());
    }

    #[test]
    fn target_ref_registers_and_unregisters() {
        let host = Rc::new(MockHost::default());
        let scope = AnchorScope::new(host, Axis::Vertical);
        let target_ref = scope.target_ref("a");

        target_ref(Some(4));
        assert_eq!(scope.target("a"), Some(4));
        target_ref(Some(5));
        assert_eq!(scope.target("a"), Some(5));
        target_ref(None);
        assert_eq!(scope.target("a"), None);

        let container_ref = scope.container_ref();
        let container = Rc::new(MockContainer::new(Shape::Point));
        container_ref(Some(container.clone()));
        container_ref(None);
        let registered = scope.container();
        assert!(registered.is_some_and(|c| Rc::ptr_eq(&c, &container)));
    }

    #[test]
    fn clones_share_host_and_registry() {
        let host = Rc::new(MockHost::default());
        let scope = AnchorScope::new(host.clone(), Axis::Horizontal);
        let other = scope.clone();
        other.register_target("a", 1);
        other.register_target("b", 2);
        assert_eq!(other.unregister_target("b"), Some(2));

        assert!(scope.same_scope(&other));
        assert!(Rc::ptr_eq(scope.host(), &host));
        assert_eq!(scope.axis(), Axis::Horizontal);
        let registry = scope.registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_target("a"));
        assert!(registry.container().is_none());
    }
}
