// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made pieces for hosts: provider, containers, targets, and triggers.
//!
//! These do not render anything. A host toolkit builds its own views and
//! forwards their lifecycle here:
//!
//! - [`AnchorProvider`] creates a scope and optionally attaches an [`AnchorsRef`].
//! - [`AnchorContainer`] wraps a scroll view or list. It joins an existing scope
//!   or brings its own provider, and registers its handle as the container.
//! - [`Target`] registers a view's handle under a name while mounted.
//! - [`Anchor`] is a pressable trigger that scrolls to a named target.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::{
    AnchorHost, AnchorScope, AnchorsRef, Axis, MergedRef, NodeRef, ScrollFuture, ScrollOutcome,
    ScrollToOptions,
};

/// Owner of one [`AnchorScope`].
///
/// Dropping the provider detaches its [`AnchorsRef`], if it still points here.
pub struct AnchorProvider<H: AnchorHost> {
    scope: AnchorScope<H>,
    anchors: Option<AnchorsRef<H>>,
}

impl<H: AnchorHost> AnchorProvider<H> {
    /// Creates a provider with a fresh scope scrolling along `axis`.
    #[must_use]
    pub fn new(host: Rc<H>, axis: Axis) -> Self {
        Self {
            scope: AnchorScope::new(host, axis),
            anchors: None,
        }
    }

    /// Attaches `anchors` to this provider's scope.
    ///
    /// A ref attached by an earlier call is detached first.
    #[must_use]
    pub fn with_anchors(mut self, anchors: &AnchorsRef<H>) -> Self {
        if let Some(previous) = self.anchors.take() {
            previous.detach_from(&self.scope);
        }
        anchors.attach(&self.scope);
        self.anchors = Some(anchors.clone());
        self
    }

    /// The scope shared with descendants.
    #[must_use]
    pub fn scope(&self) -> &AnchorScope<H> {
        &self.scope
    }
}

impl<H: AnchorHost> Drop for AnchorProvider<H> {
    fn drop(&mut self) {
        if let Some(anchors) = &self.anchors {
            anchors.detach_from(&self.scope);
        }
    }
}

impl<H: AnchorHost> fmt::Debug for AnchorProvider<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorProvider")
            .field("scope", &self.scope)
            .field("anchors", &self.anchors)
            .finish()
    }
}

/// Flavor of scrollable an [`AnchorContainer`] stands in for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// A generic scroll view.
    ScrollView,
    /// A windowed, virtualized list.
    FlatList,
}

/// A scroll container that registers itself with an anchor scope.
///
/// Call [`attach`](Self::attach) with the native handle on mount and after
/// every re-render. The handle goes to the scope first, then to any caller
/// ref added with [`with_ref`](Self::with_ref) or
/// [`with_ref_callback`](Self::with_ref_callback). `None` (unmount) leaves the
/// scope's container in place.
///
/// Anchors attached through [`with_anchors`](Self::with_anchors) are detached
/// when the container drops.
pub struct AnchorContainer<H: AnchorHost> {
    kind: ContainerKind,
    scope: AnchorScope<H>,
    provider: Option<AnchorProvider<H>>,
    joined: Option<AnchorsRef<H>>,
    handle: MergedRef<H::Container>,
}

impl<H: AnchorHost> AnchorContainer<H> {
    /// A scroll view with its own provider.
    #[must_use]
    pub fn scroll_view(host: Rc<H>, axis: Axis) -> Self {
        Self::with_provider(ContainerKind::ScrollView, AnchorProvider::new(host, axis))
    }

    /// A virtualized list with its own provider.
    #[must_use]
    pub fn flat_list(host: Rc<H>, axis: Axis) -> Self {
        Self::with_provider(ContainerKind::FlatList, AnchorProvider::new(host, axis))
    }

    /// A container joining an existing scope; it scrolls along that scope's axis.
    #[must_use]
    pub fn in_scope(kind: ContainerKind, scope: &AnchorScope<H>) -> Self {
        Self::build(kind, scope.clone(), None)
    }

    /// Joins `context` when present, otherwise brings its own provider.
    #[must_use]
    pub fn mount(
        kind: ContainerKind,
        context: Option<&AnchorScope<H>>,
        host: Rc<H>,
        axis: Axis,
    ) -> Self {
        match context {
            Some(scope) => Self::in_scope(kind, scope),
            None => Self::with_provider(kind, AnchorProvider::new(host, axis)),
        }
    }

    fn with_provider(kind: ContainerKind, provider: AnchorProvider<H>) -> Self {
        let scope = provider.scope().clone();
        Self::build(kind, scope, Some(provider))
    }

    fn build(
        kind: ContainerKind,
        scope: AnchorScope<H>,
        provider: Option<AnchorProvider<H>>,
    ) -> Self {
        let handle = MergedRef::new().with_callback(scope.container_ref());
        Self {
            kind,
            scope,
            provider,
            joined: None,
            handle,
        }
    }

    /// Attaches `anchors` to this container's scope.
    ///
    /// Only the most recent ref stays attached. It is detached when the
    /// container drops.
    #[must_use]
    pub fn with_anchors(mut self, anchors: &AnchorsRef<H>) -> Self {
        self.provider = match self.provider.take() {
            Some(provider) => Some(provider.with_anchors(anchors)),
            None => {
                if let Some(previous) = self.joined.take() {
                    previous.detach_from(&self.scope);
                }
                anchors.attach(&self.scope);
                self.joined = Some(anchors.clone());
                None
            }
        };
        self
    }

    /// Also forwards the handle into `node_ref`.
    #[must_use]
    pub fn with_ref(mut self, node_ref: NodeRef<H::Container>) -> Self {
        self.handle.push_cell(node_ref);
        self
    }

    /// Also forwards the handle to `f`.
    #[must_use]
    pub fn with_ref_callback(mut self, f: impl Fn(Option<H::Container>) + 'static) -> Self {
        self.handle.push_callback(f);
        self
    }

    /// Forwards the container's current native handle.
    pub fn attach(&self, handle: Option<H::Container>) {
        self.handle.assign(handle);
    }

    /// Which flavor of scrollable this is.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Scroll axis, for configuring the native scrollable.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.scope.axis()
    }

    /// Returns `true` if this container created its own provider.
    #[must_use]
    pub fn owns_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The scope descendants register targets in.
    #[must_use]
    pub fn scope(&self) -> &AnchorScope<H> {
        &self.scope
    }
}

impl<H: AnchorHost> Drop for AnchorContainer<H> {
    fn drop(&mut self) {
        if let Some(anchors) = &self.joined {
            anchors.detach_from(&self.scope);
        }
    }
}

impl<H: AnchorHost> fmt::Debug for AnchorContainer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorContainer")
            .field("kind", &self.kind)
            .field("scope", &self.scope)
            .field("owns_provider", &self.owns_provider())
            .field("joined", &self.joined)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

/// A named position inside a scope.
///
/// [`attach`](Self::attach) registers the view's handle (and forwards it to
/// any caller ref); [`detach`](Self::detach) removes the registration.
pub struct Target<H: AnchorHost> {
    name: String,
    handle: MergedRef<H::Target>,
}

impl<H: AnchorHost> Target<H> {
    /// Creates a target named `name` in `scope`.
    #[must_use]
    pub fn new(scope: &AnchorScope<H>, name: impl Into<String>) -> Self {
        let name = name.into();
        let handle = MergedRef::new().with_callback(scope.target_ref(&name));
        Self { name, handle }
    }

    /// Also forwards the handle into `node_ref`.
    #[must_use]
    pub fn with_ref(mut self, node_ref: NodeRef<H::Target>) -> Self {
        self.handle.push_cell(node_ref);
        self
    }

    /// The name this target registers under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers `handle` on mount or update.
    pub fn attach(&self, handle: H::Target) {
        self.handle.assign(Some(handle));
    }

    /// Removes the registration on unmount.
    pub fn detach(&self) {
        self.handle.assign(None);
    }
}

impl<H: AnchorHost> fmt::Debug for Target<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("handle", &self.handle)
            .finish()
    }
}

type PressHandler<E> = Box<dyn FnMut(&E)>;
type ScrollHandler = Rc<dyn Fn(ScrollOutcome)>;

/// A pressable trigger that scrolls its scope to `target`.
///
/// On [`press`](Self::press) the caller's press handler runs first, then the
/// scroll request is issued, and the outcome reaches
/// [`on_request_scroll_to`](Self::on_request_scroll_to) once it settles.
///
/// `E` is the host's press event type.
pub struct Anchor<H: AnchorHost, E = ()> {
    scope: AnchorScope<H>,
    target: String,
    options: ScrollToOptions,
    on_press: Option<PressHandler<E>>,
    on_request_scroll_to: Option<ScrollHandler>,
}

impl<H: AnchorHost, E> Anchor<H, E> {
    /// Creates a trigger scrolling `scope` to `target` with default options.
    #[must_use]
    pub fn new(scope: &AnchorScope<H>, target: impl Into<String>) -> Self {
        Self {
            scope: scope.clone(),
            target: target.into(),
            options: ScrollToOptions::default(),
            on_press: None,
            on_request_scroll_to: None,
        }
    }

    /// Sets the scroll options.
    #[must_use]
    pub fn options(mut self, options: ScrollToOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the caller's press handler.
    #[must_use]
    pub fn on_press(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Sets the callback that receives each scroll outcome.
    #[must_use]
    pub fn on_request_scroll_to(mut self, f: impl Fn(ScrollOutcome) + 'static) -> Self {
        self.on_request_scroll_to = Some(Rc::new(f));
        self
    }

    /// The target name this trigger scrolls to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Handles a press.
    pub fn press(&mut self, event: &E) -> ScrollFuture {
        if let Some(on_press) = &mut self.on_press {
            on_press(event);
        }
        let future = self.scope.scroll_to(&self.target, self.options);
        if let Some(callback) = &self.on_request_scroll_to {
            let callback = callback.clone();
            future.on_settled(move |outcome| callback(outcome));
        }
        future
    }
}

impl<H: AnchorHost, E> fmt::Debug for Anchor<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("on_press", &self.on_press.is_some())
            .field("on_request_scroll_to", &self.on_request_scroll_to.is_some())
            .finish_non_exhaustive()
    }
}
