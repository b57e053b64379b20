// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle cells and broadcast assignment of one handle to several owners.
//!
//! A mounted view produces one handle, but several parties may need it: the
//! anchor scope (to register a target or container) and the application (to
//! keep its own reference). [`MergedRef`] forwards each assignment to every
//! sink in the order the sinks were added. Order only matters when a sink has
//! side effects; the components in this crate add the scope's sink first.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

/// A shared, mutable slot holding the current handle of a mounted view.
///
/// `None` while unmounted. Clones share the slot.
pub struct NodeRef<T> {
    current: Rc<RefCell<Option<T>>>,
}

impl<T> NodeRef<T> {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Rc::new(RefCell::new(None)),
        }
    }

    /// Replaces the held handle.
    pub fn set(&self, value: Option<T>) {
        *self.current.borrow_mut() = value;
    }

    /// Returns `true` while a handle is held.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.current.borrow().is_some()
    }
}

impl<T: Clone> NodeRef<T> {
    /// Returns a clone of the held handle.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.current.borrow().clone()
    }
}

impl<T> Clone for NodeRef<T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
        }
    }
}

impl<T> Default for NodeRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef")
            .field(&self.current.borrow())
            .finish()
    }
}

enum Sink<T> {
    Callback(Rc<dyn Fn(Option<T>)>),
    Cell(NodeRef<T>),
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Callback(f) => Self::Callback(f.clone()),
            Self::Cell(cell) => Self::Cell(cell.clone()),
        }
    }
}

/// Forwards one handle to every registered sink.
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use understory_anchor::{MergedRef, NodeRef};
///
/// let seen = Rc::new(Cell::new(0));
/// let sink = seen.clone();
/// let app_ref = NodeRef::new();
/// let merged = MergedRef::new()
///     .with_callback(move |v: Option<u32>| sink.set(v.unwrap_or(0)))
///     .with_cell(app_ref.clone());
///
/// merged.assign(Some(7));
/// assert_eq!(seen.get(), 7);
/// assert_eq!(app_ref.get(), Some(7));
///
/// merged.assign(None);
/// assert!(!app_ref.is_set());
/// ```
pub struct MergedRef<T> {
    sinks: SmallVec<[Sink<T>; 2]>,
}

impl<T> MergedRef<T> {
    /// Creates a ref with no sinks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: SmallVec::new(),
        }
    }

    /// Adds a callback sink.
    pub fn push_callback(&mut self, f: impl Fn(Option<T>) + 'static) {
        self.sinks.push(Sink::Callback(Rc::new(f)));
    }

    /// Adds a cell sink.
    pub fn push_cell(&mut self, cell: NodeRef<T>) {
        self.sinks.push(Sink::Cell(cell));
    }

    /// Builder form of [`push_callback`](Self::push_callback).
    #[must_use]
    pub fn with_callback(mut self, f: impl Fn(Option<T>) + 'static) -> Self {
        self.push_callback(f);
        self
    }

    /// Builder form of [`push_cell`](Self::push_cell).
    #[must_use]
    pub fn with_cell(mut self, cell: NodeRef<T>) -> Self {
        self.push_cell(cell);
        self
    }

    /// Number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Returns `true` if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl<T: Clone> MergedRef<T> {
    /// Forwards `value` to every sink in insertion order.
    pub fn assign(&self, value: Option<T>) {
        for sink in &self.sinks {
            match sink {
                Sink::Callback(f) => f(value.clone()),
                Sink::Cell(cell) => cell.set(value.clone()),
            }
        }
    }
}

impl<T> Clone for MergedRef<T> {
    fn clone(&self) -> Self {
        Self {
            sinks: self.sinks.clone(),
        }
    }
}

impl<T> Default for MergedRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for MergedRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedRef")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
