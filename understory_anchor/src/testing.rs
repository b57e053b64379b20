// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host and containers for unit tests.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Point;

use crate::{
    AnchorHost, FrameCallback, MeasureCallback, OffsetScroll, PointScroll, ResponderScroll,
    ScrollContainer, ScrollPoint,
};

/// A recorded scroll command.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Point(ScrollPoint),
    Offset(f64, bool),
    Responder(ScrollPoint),
}

/// Which capability a mock container exposes directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    Point,
    Offset,
    Responder,
    Inert,
}

#[derive(Debug)]
pub(crate) struct MockContainer {
    shapes: Vec<Shape>,
    mounted: Cell<bool>,
    calls: RefCell<Vec<Call>>,
    responder: Option<Box<Self>>,
    node: Option<Box<Self>>,
}

impl MockContainer {
    pub(crate) fn new(shape: Shape) -> Self {
        Self::with_shapes(&[shape])
    }

    /// A handle exposing every capability in `shapes` directly.
    pub(crate) fn with_shapes(shapes: &[Shape]) -> Self {
        Self {
            shapes: shapes.to_vec(),
            mounted: Cell::new(true),
            calls: RefCell::new(Vec::new()),
            responder: None,
            node: None,
        }
    }

    /// A list-like wrapper handing out a scroll responder of `shape`.
    pub(crate) fn wrapping_responder(shape: Shape) -> Self {
        Self {
            responder: Some(Box::new(Self::new(shape))),
            ..Self::new(Shape::Inert)
        }
    }

    /// An animated-style wrapper handing out a node of `shape`.
    pub(crate) fn wrapping_node(shape: Shape) -> Self {
        Self {
            node: Some(Box::new(Self::new(shape))),
            ..Self::new(Shape::Inert)
        }
    }

    /// Adds a scroll responder accessor handing out `inner`.
    pub(crate) fn with_responder(mut self, inner: Self) -> Self {
        self.responder = Some(Box::new(inner));
        self
    }

    /// Adds a node accessor handing out `inner`.
    pub(crate) fn with_node(mut self, inner: Self) -> Self {
        self.node = Some(Box::new(inner));
        self
    }

    pub(crate) fn set_mounted(&self, mounted: bool) {
        self.mounted.set(mounted);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn responder_calls(&self) -> Vec<Call> {
        self.responder
            .as_ref()
            .map(|inner| inner.calls())
            .unwrap_or_default()
    }

    pub(crate) fn node_calls(&self) -> Vec<Call> {
        self.node
            .as_ref()
            .map(|inner| inner.calls())
            .unwrap_or_default()
    }

    pub(crate) fn inner_calls(&self) -> Vec<Call> {
        self.responder
            .as_ref()
            .or(self.node.as_ref())
            .map(|inner| inner.calls())
            .unwrap_or_default()
    }
}

impl MockContainer {
    fn exposes(&self, shape: Shape) -> bool {
        self.shapes.contains(&shape)
    }
}

impl PointScroll for MockContainer {
    fn scroll_to(&self, point: ScrollPoint) {
        self.calls.borrow_mut().push(Call::Point(point));
    }
}

impl OffsetScroll for MockContainer {
    fn scroll_to_offset(&self, offset: f64, animated: bool) {
        self.calls.borrow_mut().push(Call::Offset(offset, animated));
    }
}

impl ResponderScroll for MockContainer {
    fn scroll_responder_scroll_to(&self, point: ScrollPoint) {
        self.calls.borrow_mut().push(Call::Responder(point));
    }
}

impl ScrollContainer for MockContainer {
    fn as_point_scroll(&self) -> Option<&dyn PointScroll> {
        self.exposes(Shape::Point)
            .then_some(self as &dyn PointScroll)
    }

    fn as_offset_scroll(&self) -> Option<&dyn OffsetScroll> {
        self.exposes(Shape::Offset)
            .then_some(self as &dyn OffsetScroll)
    }

    fn as_responder_scroll(&self) -> Option<&dyn ResponderScroll> {
        self.exposes(Shape::Responder)
            .then_some(self as &dyn ResponderScroll)
    }

    fn scroll_responder(&self) -> Option<&dyn ScrollContainer> {
        self.responder.as_deref().map(|r| r as &dyn ScrollContainer)
    }

    fn node(&self) -> Option<&dyn ScrollContainer> {
        self.node.as_deref().map(|n| n as &dyn ScrollContainer)
    }
}

/// Host that queues measurements and frames until a test flushes them.
///
/// Targets are plain ids; a target measures successfully only after
/// [`place`](Self::place) gave it a position.
#[derive(Default)]
pub(crate) struct MockHost {
    layout: RefCell<BTreeMap<u32, Point>>,
    measurements: RefCell<Vec<(u32, MeasureCallback)>>,
    frames: RefCell<Vec<FrameCallback>>,
    measure_requests: Cell<usize>,
}

impl MockHost {
    pub(crate) fn place(&self, target: u32, position: Point) {
        self.layout.borrow_mut().insert(target, position);
    }

    pub(crate) fn measure_requests(&self) -> usize {
        self.measure_requests.get()
    }

    pub(crate) fn flush_measurements(&self) {
        let queued = core::mem::take(&mut *self.measurements.borrow_mut());
        for (target, callback) in queued {
            self.complete(target, callback);
        }
    }

    pub(crate) fn flush_measurements_reversed(&self) {
        let queued = core::mem::take(&mut *self.measurements.borrow_mut());
        for (target, callback) in queued.into_iter().rev() {
            self.complete(target, callback);
        }
    }

    pub(crate) fn flush_frames(&self) {
        let queued = core::mem::take(&mut *self.frames.borrow_mut());
        for callback in queued {
            callback();
        }
    }

    pub(crate) fn run_until_idle(&self) {
        while !self.measurements.borrow().is_empty() || !self.frames.borrow().is_empty() {
            self.flush_measurements();
            self.flush_frames();
        }
    }

    /// Drops every queued callback without invoking it.
    pub(crate) fn discard_pending(&self) {
        self.measurements.borrow_mut().clear();
        self.frames.borrow_mut().clear();
    }

    fn complete(&self, target: u32, callback: MeasureCallback) {
        let measured = self.layout.borrow().get(&target).copied();
        callback(measured);
    }
}

impl AnchorHost for MockHost {
    type Target = u32;
    type Container = Rc<MockContainer>;
    type Node = ();

    fn find_node(&self, container: &Self::Container) -> Option<Self::Node> {
        container.mounted.get().then_some(())
    }

    fn measure_layout(&self, target: &u32, _relative_to: &(), callback: MeasureCallback) {
        self.measure_requests.set(self.measure_requests.get() + 1);
        self.measurements.borrow_mut().push((*target, callback));
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.frames.borrow_mut().push(callback);
    }
}
