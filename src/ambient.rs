//! Ambient context plumbing: the per-thread [`LogContext`] and the
//! resolver that computes the active correlation id and property set
//! from the most specific available source.
//!
//! This module is also the flow-boundary surface for transport code: an
//! RPC layer reads [`thread_correlation_id`] before an outgoing call and
//! calls [`set_thread_correlation_id`] when a correlated request comes
//! in. The crate knows nothing about headers or wire formats.

use crate::context::LogContext;
use crate::properties::ExtendedProperty;
use uuid::Uuid;

thread_local! {
    static THREAD_CONTEXT: LogContext = LogContext::new();
}

/// Handle to the calling thread's ambient [`LogContext`].
///
/// The context is created lazily per thread and never observed by other
/// threads. Handing the handle to another thread is a contract
/// violation; to carry state across an execution boundary, copy it with
/// [`LogContext::push_context`] on the receiving side.
pub fn thread_log_context() -> LogContext {
    THREAD_CONTEXT.with(|context| context.clone())
}

/// The calling thread's ambient correlation id, ignoring any process
/// default.
pub fn thread_correlation_id() -> Option<Uuid> {
    thread_log_context().correlation_id()
}

/// Set (or clear) the calling thread's ambient correlation id.
pub fn set_thread_correlation_id(id: Option<Uuid>) {
    thread_log_context().set_correlation_id(id);
}

/// Computes the *active* ambient state by walking from the most specific
/// source (the thread context) to the least specific (the logger's
/// process-wide default context).
///
/// Resolution is strictly most-specific-wins per field; no merging
/// happens here. Merging and inheritance are the pipeline's business.
#[derive(Debug, Clone, Default)]
pub struct ContextResolver {
    default_context: Option<LogContext>,
}

impl ContextResolver {
    pub fn new(default_context: Option<LogContext>) -> Self {
        ContextResolver { default_context }
    }

    /// Thread context's correlation id if set, else the default
    /// context's, else `None`. A thread context without an id does not
    /// shadow the default.
    pub fn active_correlation_id(&self) -> Option<Uuid> {
        thread_correlation_id()
            .or_else(|| self.default_context.as_ref().and_then(|c| c.correlation_id()))
    }

    /// Thread context's extended properties if set, else the default
    /// context's, else `None`. Callers treat `None` as empty.
    pub fn active_extended_properties(&self) -> Option<Vec<ExtendedProperty>> {
        thread_log_context()
            .extended_properties()
            .or_else(|| self.default_context.as_ref().and_then(|c| c.extended_properties()))
    }

    /// The inherit flag of the most specific context, which governs
    /// whether the pipeline consults ambient properties at all.
    pub fn inherit_extended_properties(&self) -> bool {
        thread_log_context().inherit_extended_properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn thread_context_is_stable_within_a_thread() {
        let id = Uuid::new_v4();
        set_thread_correlation_id(Some(id));
        assert_eq!(thread_correlation_id(), Some(id));
        set_thread_correlation_id(None);
        assert_eq!(thread_correlation_id(), None);
    }

    #[test]
    fn thread_contexts_are_isolated() {
        set_thread_correlation_id(Some(Uuid::new_v4()));

        let other = thread::spawn(thread_correlation_id).join().expect("spawned thread");
        assert_eq!(other, None, "a new thread starts with an empty context");

        set_thread_correlation_id(None);
    }

    #[test]
    fn resolver_prefers_thread_context() {
        let default_context = LogContext::new();
        let default_id = Uuid::new_v4();
        default_context.set_correlation_id(Some(default_id));
        let resolver = ContextResolver::new(Some(default_context));

        // run in a fresh thread so this test owns its ambient state
        let resolved = thread::spawn(move || {
            let first = resolver.active_correlation_id();
            let thread_id = Uuid::new_v4();
            set_thread_correlation_id(Some(thread_id));
            let second = resolver.active_correlation_id();
            (first, second, thread_id)
        })
        .join()
        .expect("spawned thread");

        assert_eq!(resolved.0, Some(default_id));
        assert_eq!(resolved.1, Some(resolved.2));
    }

    #[test]
    fn resolver_falls_back_for_properties() {
        let default_context =
            LogContext::with_defaults(vec![ExtendedProperty::new("env", "prod")]);
        let resolver = ContextResolver::new(Some(default_context));

        let (fallback, overridden) = thread::spawn(move || {
            let fallback = resolver.active_extended_properties();
            thread_log_context()
                .set_extended_properties(vec![ExtendedProperty::new("env", "test")]);
            let overridden = resolver.active_extended_properties();
            (fallback, overridden)
        })
        .join()
        .expect("spawned thread");

        assert_eq!(fallback.expect("default properties")[0].value, "prod");
        assert_eq!(overridden.expect("thread properties")[0].value, "test");
    }

    #[test]
    fn resolver_without_default_is_empty() {
        let resolver = ContextResolver::new(None);
        let resolved = thread::spawn(move || {
            (resolver.active_correlation_id(), resolver.active_extended_properties())
        })
        .join()
        .expect("spawned thread");
        assert_eq!(resolved, (None, None));
    }
}
