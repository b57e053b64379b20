// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrolling a scope from outside the components that share it.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::{AnchorHost, AnchorScope, ScrollError, ScrollFuture, ScrollToOptions};

/// A cell that gives code outside a scope's components a `scroll_to`.
///
/// Create one up front, hand it to an [`AnchorProvider`](crate::AnchorProvider)
/// or an [`AnchorContainer`](crate::AnchorContainer), and call
/// [`scroll_to`](Self::scroll_to) from anywhere, for example a navigation
/// action. Until one attaches, requests settle with
/// [`ScrollError::MissingProvider`]. Whichever attached it detaches it when
/// dropped.
pub struct AnchorsRef<H: AnchorHost> {
    scope: Rc<RefCell<Option<AnchorScope<H>>>>,
}

impl<H: AnchorHost> AnchorsRef<H> {
    /// Creates an unattached handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: Rc::new(RefCell::new(None)),
        }
    }

    /// Points this handle at `scope`, replacing any previous one.
    pub fn attach(&self, scope: &AnchorScope<H>) {
        *self.scope.borrow_mut() = Some(scope.clone());
    }

    /// Detaches this handle if it currently points at `scope`.
    pub fn detach_from(&self, scope: &AnchorScope<H>) {
        let mut current = self.scope.borrow_mut();
        if current.as_ref().is_some_and(|s| s.same_scope(scope)) {
            *current = None;
        }
    }

    /// Detaches this handle from whatever scope it points at.
    pub fn detach(&self) {
        *self.scope.borrow_mut() = None;
    }

    /// Returns `true` while attached to a scope.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.scope.borrow().is_some()
    }

    /// Forwards to [`AnchorScope::scroll_to`] on the attached scope.
    pub fn scroll_to(&self, name: &str, options: ScrollToOptions) -> ScrollFuture {
        let scope = self.scope.borrow().clone();
        match scope {
            Some(scope) => scope.scroll_to(name, options),
            None => ScrollFuture::ready(Err(ScrollError::MissingProvider)),
        }
    }
}

impl<H: AnchorHost> Clone for AnchorsRef<H> {
    fn clone(&self) -> Self {
        Self {
            scope: self.scope.clone(),
        }
    }
}

impl<H: AnchorHost> Default for AnchorsRef<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: AnchorHost> fmt::Debug for AnchorsRef<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorsRef")
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
