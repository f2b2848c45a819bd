// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for plug event subscriptions.
//!
//! This module provides the core types for managing subscription callbacks:
//!
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Ordered registry storing and dispatching callbacks

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::event::{EventKind, PlugEvent};

/// Unique identifier for a subscription.
///
/// This ID is returned when creating a subscription and can be used to
/// unsubscribe later. IDs are unique within a registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Creates a new subscription ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

/// Listener receiving the emitting source and the event.
type Listener<S> = Arc<dyn Fn(&S, &PlugEvent) + Send + Sync>;

struct Entry<S> {
    id: SubscriptionId,
    kind: EventKind,
    once: bool,
    listener: Listener<S>,
}

/// Registry of event listeners, keyed by event name.
///
/// Listeners of one event are invoked synchronously in registration order.
/// A `once` listener is removed before its first invocation, so it never
/// runs twice even if the listener itself triggers another emission.
///
/// `S` is the type handed to listeners as the event source; for plugs it
/// is the [`Plug`](crate::Plug) itself.
pub struct CallbackRegistry<S> {
    /// Counter for generating unique subscription IDs.
    next_id: AtomicU64,
    /// Listeners in registration order.
    entries: RwLock<Vec<Entry<S>>>,
}

impl<S> CallbackRegistry<S> {
    /// Creates a new empty callback registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Generates a new unique subscription ID.
    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn register<F>(&self, kind: EventKind, once: bool, listener: F) -> SubscriptionId
    where
        F: Fn(&S, &PlugEvent) + Send + Sync + 'static,
    {
        let id = self.next_id();
        self.entries.write().push(Entry {
            id,
            kind,
            once,
            listener: Arc::new(listener),
        });
        id
    }

    /// Registers a listener invoked on every emission of `kind`.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&S, &PlugEvent) + Send + Sync + 'static,
    {
        self.register(kind, false, listener)
    }

    /// Registers a listener invoked on the next emission of `kind` only.
    pub fn once<F>(&self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: Fn(&S, &PlugEvent) + Send + Sync + 'static,
    {
        self.register(kind, true, listener)
    }

    /// Unregisters a listener by its subscription ID.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        entries.len() != before
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Invokes the listeners registered for the event's kind.
    ///
    /// The registry lock is released before any listener runs, so listeners
    /// may subscribe or unsubscribe. Returns the number of listeners invoked.
    pub fn dispatch(&self, source: &S, event: &PlugEvent) -> usize {
        let kind = event.kind();
        let listeners: Vec<Listener<S>> = {
            let mut entries = self.entries.write();
            let matching = entries
                .iter()
                .filter(|entry| entry.kind == kind)
                .map(|entry| Arc::clone(&entry.listener))
                .collect();
            entries.retain(|entry| !(entry.once && entry.kind == kind));
            matching
        };

        for listener in &listeners {
            listener(source, event);
        }
        listeners.len()
    }

    /// Returns the number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Returns the total number of registered listeners.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if there are no registered listeners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callback_count() == 0
    }
}

impl<S> Default for CallbackRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for CallbackRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
