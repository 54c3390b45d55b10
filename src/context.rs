//! Scoped logging context: the mutable {correlation id, extended
//! properties, inherit flag} triple consulted by the pipeline when a log
//! call does not pass explicit values, plus the RAII handle that restores
//! a context to its pre-scope state.

use crate::properties::ExtendedProperty;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct ContextState {
    correlation_id: Option<Uuid>,
    extended_properties: Option<Vec<ExtendedProperty>>,
    inherit_extended_properties: bool,
}

impl Default for ContextState {
    fn default() -> Self {
        ContextState {
            correlation_id: None,
            extended_properties: None,
            inherit_extended_properties: true,
        }
    }
}

/// Stack-scoped container of ambient logging state.
///
/// A `LogContext` is a cheap cloneable handle to shared state; clones
/// observe each other's mutations. One instance is conceptually owned by
/// a single logical flow (the per-thread ambient context), plus an
/// optional process-wide default context owned by the logger. Nested
/// scopes over the same context are created with [`push`](Self::push) and
/// unwound by dropping the returned [`ScopeHandle`] in LIFO order; the
/// crate does not detect out-of-order release.
#[derive(Debug, Clone, Default)]
pub struct LogContext {
    state: Arc<Mutex<ContextState>>,
}

impl LogContext {
    /// A context with no correlation id, no properties, and property
    /// inheritance enabled.
    pub fn new() -> Self {
        LogContext::default()
    }

    /// A context pre-loaded with default extended properties.
    pub fn with_defaults(defaults: Vec<ExtendedProperty>) -> Self {
        let context = LogContext::new();
        context.set_extended_properties(defaults);
        context
    }

    pub fn correlation_id(&self) -> Option<Uuid> {
        self.lock().correlation_id
    }

    pub fn set_correlation_id(&self, id: Option<Uuid>) {
        self.lock().correlation_id = id;
    }

    /// Snapshot of the extended properties, `None` when unset.
    pub fn extended_properties(&self) -> Option<Vec<ExtendedProperty>> {
        self.lock().extended_properties.clone()
    }

    /// Store a property collection. The context keeps its own copy, so
    /// later mutation of the caller's data never leaks in.
    pub fn set_extended_properties(&self, properties: Vec<ExtendedProperty>) {
        self.lock().extended_properties = Some(properties);
    }

    pub fn clear_extended_properties(&self) {
        self.lock().extended_properties = None;
    }

    pub fn inherit_extended_properties(&self) -> bool {
        self.lock().inherit_extended_properties
    }

    /// Control whether log calls on this flow pick up ambient extended
    /// properties.
    ///
    /// When `false` on the thread context, the pipeline skips the
    /// ambient property contribution entirely: this context's own
    /// properties are suppressed along with any process-wide defaults,
    /// and only per-call property bags reach the record.
    pub fn set_inherit_extended_properties(&self, inherit: bool) {
        self.lock().inherit_extended_properties = inherit;
    }

    /// Case-insensitive upsert of a single property, lazily allocating
    /// the collection on first use.
    pub fn set_extended_property(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut state = self.lock();
        let properties = state.extended_properties.get_or_insert_with(Vec::new);
        match properties.iter_mut().find(|p| p.name.eq_ignore_ascii_case(&name)) {
            Some(existing) => {
                existing.name = name;
                existing.value = value;
            }
            None => properties.push(ExtendedProperty::new(name, value)),
        }
    }

    /// Open a scope: snapshot the current state into a [`ScopeHandle`]
    /// without resetting anything. The caller mutates the context after
    /// the push and relies on the handle's drop to restore it.
    pub fn push(&self) -> ScopeHandle {
        ScopeHandle { context: self.clone(), snapshot: self.lock().clone() }
    }

    /// Open a scope and immediately overlay `other`'s three fields onto
    /// this context. The snapshot is taken before the copy, so dropping
    /// the handle restores the pre-push state.
    pub fn push_context(&self, other: &LogContext) -> ScopeHandle {
        let handle = self.push();
        let incoming = other.lock().clone();
        *self.lock() = incoming;
        handle
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ContextState> {
        // A poisoned context mutex can only come from a panic inside one
        // of these short accessors, which do not panic.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scope guard produced by [`LogContext::push`].
///
/// On drop it writes its snapshot back to the bound context verbatim,
/// whatever the context was mutated to in between. Handles must be
/// dropped innermost-first relative to their push; releasing out of
/// order is a caller contract violation with undefined results.
#[must_use = "dropping the handle immediately closes the scope"]
#[derive(Debug)]
pub struct ScopeHandle {
    context: LogContext,
    snapshot: ContextState,
}

impl ScopeHandle {
    /// Close the scope now instead of at end of block.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        *self.context.lock() = self.snapshot.clone();
    }
}
