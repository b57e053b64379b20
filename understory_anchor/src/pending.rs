// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle-once completion for scroll requests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use smallvec::SmallVec;

use crate::{ScrollError, ScrollOutcome};

type Listener = Box<dyn FnOnce(ScrollOutcome)>;

#[derive(Default)]
struct Slot {
    outcome: Option<ScrollOutcome>,
    waker: Option<Waker>,
    listeners: SmallVec<[Listener; 1]>,
}

/// The eventual outcome of one scroll request.
///
/// A request settles exactly once. Observe it by polling as a [`Future`],
/// by registering [`on_settled`](Self::on_settled) callbacks, or by peeking
/// with [`outcome`](Self::outcome). Clones observe the same request.
#[derive(Clone)]
pub struct ScrollFuture {
    slot: Rc<RefCell<Slot>>,
}

impl ScrollFuture {
    /// A future that is already settled with `outcome`.
    #[must_use]
    pub fn ready(outcome: ScrollOutcome) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot {
                outcome: Some(outcome),
                ..Slot::default()
            })),
        }
    }

    /// Returns `true` once the request has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slot.borrow().outcome.is_some()
    }

    /// Returns the outcome if the request has settled.
    #[must_use]
    pub fn outcome(&self) -> Option<ScrollOutcome> {
        self.slot.borrow().outcome.clone()
    }

    /// Calls `f` with the outcome once settled, or right away if it already is.
    pub fn on_settled(&self, f: impl FnOnce(ScrollOutcome) + 'static) {
        let settled = self.slot.borrow().outcome.clone();
        match settled {
            Some(outcome) => f(outcome),
            None => self.slot.borrow_mut().listeners.push(Box::new(f)),
        }
    }
}

impl Future for ScrollFuture {
    type Output = ScrollOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.borrow_mut();
        if let Some(outcome) = &slot.outcome {
            return Poll::Ready(outcome.clone());
        }
        slot.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}

impl fmt::Debug for ScrollFuture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("ScrollFuture")
            .field("outcome", &slot.outcome)
            .field("listeners", &slot.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Write side of a [`ScrollFuture`].
///
/// Consumed by [`resolve`](Self::resolve). Dropping it unresolved settles the
/// request with [`ScrollError::Abandoned`].
pub(crate) struct Resolver {
    slot: Option<Rc<RefCell<Slot>>>,
}

impl Resolver {
    pub(crate) fn resolve(mut self, outcome: ScrollOutcome) {
        if let Some(slot) = self.slot.take() {
            settle(&slot, outcome);
        }
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            tracing::debug!("scroll request dropped before completing");
            settle(&slot, Err(ScrollError::Abandoned));
        }
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("pending", &self.slot.is_some())
            .finish_non_exhaustive()
    }
}

/// Creates an unsettled request.
pub(crate) fn pending() -> (Resolver, ScrollFuture) {
    let slot = Rc::new(RefCell::new(Slot::default()));
    (
        Resolver {
            slot: Some(slot.clone()),
        },
        ScrollFuture { slot },
    )
}

fn settle(slot: &RefCell<Slot>, outcome: ScrollOutcome) {
    let (listeners, waker) = {
        let mut slot = slot.borrow_mut();
        if slot.outcome.is_some() {
            return;
        }
        slot.outcome = Some(outcome.clone());
        (core::mem::take(&mut slot.listeners), slot.waker.take())
    };
    for listener in listeners {
        listener(outcome.clone());
    }
    if let Some(waker) = waker {
        waker.wake();
    }
}
