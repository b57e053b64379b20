// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name → target handle map plus the single container slot of one scope.

use alloc::string::String;

use hashbrown::HashMap;

/// Registry of named targets and the active scroll container for one scope.
///
/// Handles are opaque to the registry: `T` is whatever the host uses to refer
/// to a laid-out target, `C` whatever it uses for a scroll container.
///
/// - Target names are unique; registering a name again replaces the handle (last wins).
/// - At most one container is active; registering a new one replaces it, and
///   registering `None` leaves the current one in place.
///
/// ```
/// use understory_anchor::AnchorRegistry;
///
/// let mut registry: AnchorRegistry<u32, &str> = AnchorRegistry::new();
/// registry.register_target("intro", 1);
/// registry.register_target("intro", 2);
/// assert_eq!(registry.target("intro"), Some(&2));
///
/// registry.register_container(Some("list"));
/// registry.register_container(None);
/// assert_eq!(registry.container(), Some(&"list"));
/// ```
#[derive(Clone, Debug)]
pub struct AnchorRegistry<T, C> {
    targets: HashMap<String, T>,
    container: Option<C>,
}

impl<T, C> Default for AnchorRegistry<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AnchorRegistry<T, C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            targets: HashMap::new(),
            container: None,
        }
    }

    /// Registers `handle` under `name`, replacing any previous handle.
    pub fn register_target(&mut self, name: impl Into<String>, handle: T) {
        let name = name.into();
        if self.targets.insert(name.clone(), handle).is_some() {
            tracing::trace!(anchor = %name, "replaced anchor target");
        } else {
            tracing::trace!(anchor = %name, "registered anchor target");
        }
    }

    /// Removes the target registered under `name`, returning its handle.
    pub fn unregister_target(&mut self, name: &str) -> Option<T> {
        let removed = self.targets.remove(name);
        if removed.is_some() {
            tracing::trace!(anchor = %name, "unregistered anchor target");
        }
        removed
    }

    /// Sets the active container. `None` is ignored.
    pub fn register_container(&mut self, handle: Option<C>) {
        if let Some(handle) = handle {
            let replaced = self.container.is_some();
            tracing::trace!(replaced, "registered scroll container");
            self.container = Some(handle);
        }
    }

    /// Returns the handle registered under `name`.
    #[must_use]
    pub fn target(&self, name: &str) -> Option<&T> {
        self.targets.get(name)
    }

    /// Returns the active container.
    #[must_use]
    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Returns `true` if a target is registered under `name`.
    #[must_use]
    pub fn contains_target(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterates over the registered target names in no particular order.
    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }
}
