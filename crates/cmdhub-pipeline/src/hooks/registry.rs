//! Hook registry: the configuration holder compiled commands are built
//! against.
//!
//! The registry is deliberately not synchronized: configuration happens up
//! front through `&mut` mutators, and every build takes an immutable
//! [`HookSnapshot`], so commands compiled earlier never observe later
//! mutations.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::info;

use cmdhub_core::traits::{AllowAllAuthorizer, Authorizer, CommandCompleter, EmptyCompleter};
use cmdhub_executor::{SynchronousExecutor, TaskExecutor};

use super::converter::ExceptionConverter;
use super::listener::InvokeListener;
use crate::error::ConfigurationError;

/// Holds the cross-cutting hooks shared by every command built against it.
///
/// Listeners are kept in registration order and notified FIFO; converters
/// are kept newest-first and consulted LIFO. The authorizer, completer, and
/// executor are single-valued with replace-on-set semantics. Mutators given
/// no value fail with [`ConfigurationError`] and leave the previous value
/// in effect.
#[derive(Debug)]
pub struct HookRegistry {
    invoke_listeners: Vec<Arc<dyn InvokeListener>>,
    exception_converters: VecDeque<Arc<dyn ExceptionConverter>>,
    authorizer: Arc<dyn Authorizer>,
    completer: Arc<dyn CommandCompleter>,
    executor: Arc<dyn TaskExecutor>,
}

impl HookRegistry {
    /// Creates a registry with no listeners or converters, the allow-all
    /// authorizer, the empty completer, and the synchronous executor.
    pub fn new() -> Self {
        Self {
            invoke_listeners: Vec::new(),
            exception_converters: VecDeque::new(),
            authorizer: Arc::new(AllowAllAuthorizer),
            completer: Arc::new(EmptyCompleter),
            executor: Arc::new(SynchronousExecutor::new()),
        }
    }

    /// Appends an invocation listener. Listeners are notified in
    /// registration order and are not deduplicated: a listener registered
    /// twice is notified twice.
    pub fn add_invoke_listener(
        &mut self,
        listener: Option<Arc<dyn InvokeListener>>,
    ) -> Result<(), ConfigurationError> {
        let listener = listener.ok_or(ConfigurationError::missing("invoke listener"))?;
        self.invoke_listeners.push(listener);
        info!(
            listeners = self.invoke_listeners.len(),
            "Invoke listener registered"
        );
        Ok(())
    }

    /// Registers an exception converter ahead of all existing ones, so it
    /// is consulted first.
    pub fn add_exception_converter(
        &mut self,
        converter: Option<Arc<dyn ExceptionConverter>>,
    ) -> Result<(), ConfigurationError> {
        let converter = converter.ok_or(ConfigurationError::missing("exception converter"))?;
        info!(
            converter = %converter.name(),
            converters = self.exception_converters.len() + 1,
            "Exception converter registered"
        );
        self.exception_converters.push_front(converter);
        Ok(())
    }

    /// Replaces the active authorizer.
    pub fn set_authorizer(
        &mut self,
        authorizer: Option<Arc<dyn Authorizer>>,
    ) -> Result<(), ConfigurationError> {
        let authorizer = authorizer.ok_or(ConfigurationError::missing("authorizer"))?;
        info!(authorizer = ?authorizer, "Authorizer replaced");
        self.authorizer = authorizer;
        Ok(())
    }

    /// Replaces the active completer.
    pub fn set_completer(
        &mut self,
        completer: Option<Arc<dyn CommandCompleter>>,
    ) -> Result<(), ConfigurationError> {
        let completer = completer.ok_or(ConfigurationError::missing("completer"))?;
        info!(completer = ?completer, "Completer replaced");
        self.completer = completer;
        Ok(())
    }

    /// Replaces the active executor. Commands built before the replacement
    /// keep dispatching through the executor captured in their snapshot.
    pub fn set_executor(
        &mut self,
        executor: Option<Arc<dyn TaskExecutor>>,
    ) -> Result<(), ConfigurationError> {
        let executor = executor.ok_or(ConfigurationError::missing("executor"))?;
        info!(executor = ?executor, "Executor replaced");
        self.executor = executor;
        Ok(())
    }

    /// Listeners in registration (notification) order.
    pub fn invoke_listeners(&self) -> &[Arc<dyn InvokeListener>] {
        &self.invoke_listeners
    }

    /// Converters in consultation order, most recently registered first.
    pub fn exception_converters(&self) -> impl Iterator<Item = &Arc<dyn ExceptionConverter>> {
        self.exception_converters.iter()
    }

    /// The active authorizer.
    pub fn authorizer(&self) -> &Arc<dyn Authorizer> {
        &self.authorizer
    }

    /// The active completer.
    pub fn completer(&self) -> &Arc<dyn CommandCompleter> {
        &self.completer
    }

    /// The active executor.
    pub fn executor(&self) -> &Arc<dyn TaskExecutor> {
        &self.executor
    }

    /// Captures the current hooks for a build.
    pub fn snapshot(&self) -> HookSnapshot {
        HookSnapshot {
            invoke_listeners: self.invoke_listeners.clone(),
            exception_converters: self.exception_converters.iter().cloned().collect(),
            authorizer: Arc::clone(&self.authorizer),
            completer: Arc::clone(&self.completer),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable capture of a registry's hooks, taken once per build.
///
/// Compiled commands keep the snapshot they were built with; registry
/// mutations after the build do not reach them.
#[derive(Debug, Clone)]
pub struct HookSnapshot {
    /// Listeners in notification order.
    pub invoke_listeners: Vec<Arc<dyn InvokeListener>>,
    /// Converters in consultation order, most recently registered first.
    pub exception_converters: Vec<Arc<dyn ExceptionConverter>>,
    /// Active authorizer.
    pub authorizer: Arc<dyn Authorizer>,
    /// Active completer.
    pub completer: Arc<dyn CommandCompleter>,
    /// Active executor.
    pub executor: Arc<dyn TaskExecutor>,
}

#[cfg(test)]
mod tests {
    use cmdhub_core::context::InvocationContext;
    use cmdhub_core::error::CommandError;

    use super::*;

    #[derive(Debug)]
    struct NamedListener;

    impl InvokeListener for NamedListener {}

    #[derive(Debug)]
    struct NamedConverter {
        name: &'static str,
    }

    impl ExceptionConverter for NamedConverter {
        fn name(&self) -> &str {
            self.name
        }

        fn convert(
            &self,
            _ctx: &InvocationContext,
            _failure: &(dyn std::error::Error + Send + Sync + 'static),
        ) -> Option<CommandError> {
            None
        }
    }

    #[derive(Debug)]
    struct DenyAllAuthorizer;

    #[async_trait::async_trait]
    impl Authorizer for DenyAllAuthorizer {
        async fn check(&self, _ctx: &InvocationContext, _permission: &str) -> bool {
            false
        }
    }

    fn converter(name: &'static str) -> Arc<dyn ExceptionConverter> {
        Arc::new(NamedConverter { name })
    }

    #[test]
    fn test_listeners_keep_registration_order() {
        let mut registry = HookRegistry::new();
        let first: Arc<dyn InvokeListener> = Arc::new(NamedListener);
        let second: Arc<dyn InvokeListener> = Arc::new(NamedListener);
        registry.add_invoke_listener(Some(Arc::clone(&first))).unwrap();
        registry.add_invoke_listener(Some(Arc::clone(&second))).unwrap();

        let listeners = registry.invoke_listeners();
        assert_eq!(listeners.len(), 2);
        assert!(Arc::ptr_eq(&listeners[0], &first));
        assert!(Arc::ptr_eq(&listeners[1], &second));
    }

    #[test]
    fn test_duplicate_listener_is_kept_twice() {
        let mut registry = HookRegistry::new();
        let listener: Arc<dyn InvokeListener> = Arc::new(NamedListener);
        registry.add_invoke_listener(Some(Arc::clone(&listener))).unwrap();
        registry.add_invoke_listener(Some(listener)).unwrap();
        assert_eq!(registry.invoke_listeners().len(), 2);
    }

    #[test]
    fn test_converters_consulted_newest_first() {
        let mut registry = HookRegistry::new();
        registry.add_exception_converter(Some(converter("c1"))).unwrap();
        registry.add_exception_converter(Some(converter("c2"))).unwrap();
        registry.add_exception_converter(Some(converter("c3"))).unwrap();

        let order: Vec<&str> = registry.exception_converters().map(|c| c.name()).collect();
        assert_eq!(order, vec!["c3", "c2", "c1"]);
    }

    #[test]
    fn test_missing_value_is_rejected_and_previous_kept() {
        let mut registry = HookRegistry::new();
        let custom: Arc<dyn Authorizer> = Arc::new(DenyAllAuthorizer);
        registry.set_authorizer(Some(Arc::clone(&custom))).unwrap();

        let err = registry.set_authorizer(None).unwrap_err();
        assert_eq!(err, ConfigurationError::missing("authorizer"));
        assert!(Arc::ptr_eq(registry.authorizer(), &custom));

        assert!(registry.add_invoke_listener(None).is_err());
        assert!(registry.add_exception_converter(None).is_err());
        assert!(registry.set_completer(None).is_err());
        assert!(registry.set_executor(None).is_err());
        assert!(registry.invoke_listeners().is_empty());
        assert_eq!(registry.exception_converters().count(), 0);
    }

    #[tokio::test]
    async fn test_defaults_allow_everything_and_suggest_nothing() {
        let registry = HookRegistry::new();
        let ctx = InvocationContext::new("ping", "");
        assert!(registry.authorizer().check(&ctx, "any.permission").await);
        assert!(registry.completer().suggest("pi", &ctx).await.is_empty());
        assert!(!registry.executor().is_shutdown());
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutations() {
        let mut registry = HookRegistry::new();
        registry.add_exception_converter(Some(converter("early"))).unwrap();
        let snapshot = registry.snapshot();

        registry.add_exception_converter(Some(converter("late"))).unwrap();
        assert_eq!(snapshot.exception_converters.len(), 1);
        assert_eq!(snapshot.exception_converters[0].name(), "early");
        assert_eq!(registry.exception_converters().count(), 2);
    }
}
