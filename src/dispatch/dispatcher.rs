use super::{Attempt, AttemptOutcome, DispatchError, DispatchRun, ErasedExecutor};
use crate::ErasedAction;
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Ordered list of executors; the first one that owns an action runs it.
///
/// A mismatch moves on to the next executor. A genuine execution error stops
/// the loop immediately. When every executor reports a mismatch the action is
/// [`DispatchError::Unhandled`]. Nothing is ever retried.
#[derive(Default)]
pub struct Dispatcher {
    executors: Vec<Box<dyn ErasedExecutor>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher::default()
    }

    /// Append an executor, tried after every one already present.
    pub fn with<X: ErasedExecutor + 'static>(mut self, executor: X) -> Self {
        self.push(executor);
        self
    }

    pub fn push<X: ErasedExecutor + 'static>(&mut self, executor: X) {
        self.executors.push(Box::new(executor));
    }

    pub fn len(&self) -> usize {
        self.executors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    pub fn dispatch(&self, action: &dyn ErasedAction) -> Result<(), DispatchError> {
        self.run(action, None)
    }

    /// Like [`dispatch`](Self::dispatch), but record every attempt.
    pub fn dispatch_verbose(&self, action: &dyn ErasedAction) -> DispatchRun {
        let start = Instant::now();
        let mut attempts = Vec::with_capacity(self.executors.len());
        let result = self.run(action, Some(&mut attempts));
        DispatchRun { attempts, elapsed: start.elapsed(), result }
    }

    fn run(&self, action: &dyn ErasedAction, mut attempts: Option<&mut Vec<Attempt>>) -> Result<(), DispatchError> {
        let mut record = |executor: &'static str, outcome: AttemptOutcome| {
            if let Some(attempts) = attempts.as_deref_mut() {
                attempts.push(Attempt { executor, outcome });
            }
        };

        for executor in &self.executors {
            match executor.dispatch(action) {
                Ok(()) => {
                    debug!(executor = executor.name(), action = action.action_type(), "action handled");
                    record(executor.name(), AttemptOutcome::Handled);
                    return Ok(());
                }
                Err(DispatchError::Mismatch { .. }) => {
                    trace!(executor = executor.name(), action = action.action_type(), "executor mismatch");
                    record(executor.name(), AttemptOutcome::Mismatch);
                }
                Err(error) => {
                    warn!(executor = executor.name(), action = action.action_type(), %error, "executor failed");
                    record(executor.name(), AttemptOutcome::Failed(error.to_string()));
                    return Err(error);
                }
            }
        }

        debug!(action = ?action, "unhandled action");
        Err(DispatchError::Unhandled { action_type: action.action_type(), action: format!("{action:?}") })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.executors.iter().map(|executor| executor.name())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Action, ExecuteError, Executor, GenericAction, MemoryStore, Module, Payload, Store, StoreValue, StringAction,
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct Ping;

    #[derive(Debug, Clone)]
    struct Pong;

    macro_rules! marker_action {
        ($ty:ty) => {
            impl Action for $ty {
                type Subject = ();
                type Verb = ();
                type Object = ();

                fn module(&self) -> &Module {
                    static MODULE: once_cell::sync::Lazy<Module> = once_cell::sync::Lazy::new(|| Module::new("test"));
                    &MODULE
                }

                fn subject(&self) {}

                fn verb(&self) {}

                fn object(&self) {}

                fn payload(&self) -> Option<&Payload> {
                    None
                }
            }
        };
    }

    marker_action!(Ping);
    marker_action!(Pong);

    /// Counts calls and writes its action type into the store.
    struct Recording<A> {
        calls: Arc<AtomicUsize>,
        store: Arc<MemoryStore>,
        _action: std::marker::PhantomData<fn() -> A>,
    }

    impl<A> Recording<A> {
        fn new(store: &Arc<MemoryStore>) -> Self {
            Recording { calls: Arc::default(), store: Arc::clone(store), _action: std::marker::PhantomData }
        }
    }

    impl<A: crate::ErasedAction> Executor for Recording<A> {
        type Action = A;

        fn execute(&self, action: &A) -> Result<(), ExecuteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.store.set("last", StoreValue::String(action.action_type().to_string()))?;
            Ok(())
        }
    }

    struct Broken;

    impl Executor for Broken {
        type Action = Ping;

        fn execute(&self, _action: &Ping) -> Result<(), ExecuteError> {
            Err(ExecuteError::other("disk full"))
        }
    }

    #[test]
    fn only_matching_executor_runs() {
        let store = Arc::new(MemoryStore::new());
        let first = Recording::<StringAction>::new(&store);
        let second = Recording::<Pong>::new(&store);
        let third = Recording::<Ping>::new(&store);
        let fourth = Recording::<Ping>::new(&store);
        let (c1, c2, c3, c4) = (first.calls.clone(), second.calls.clone(), third.calls.clone(), fourth.calls.clone());

        let dispatcher = Dispatcher::new().with(first).with(second).with(third).with(fourth);
        let run = dispatcher.dispatch_verbose(&Ping);

        assert!(run.result.is_ok());
        assert_eq!(run.attempts.len(), 3);
        assert_eq!(run.mismatches(), 2);
        assert_eq!(run.attempts[2].outcome, AttemptOutcome::Handled);
        assert_eq!(run.handled_by(), Some(std::any::type_name::<Recording<Ping>>()));
        assert_eq!([c1, c2, c3, c4].map(|c| c.load(Ordering::SeqCst)), [0, 0, 1, 0]);
    }

    #[test]
    fn unhandled_when_no_executor_matches() {
        let store = Arc::new(MemoryStore::new());
        let dispatcher = Dispatcher::new()
            .with(Recording::<Ping>::new(&store))
            .with(Recording::<StringAction>::new(&store));

        let action = GenericAction::unary(Module::new("other"), "x".to_string(), "y".to_string(), None);
        let error = dispatcher.dispatch(&action).unwrap_err();

        assert!(error.is_unhandled());
        assert!(store.is_empty());
    }

    #[test]
    fn empty_dispatcher_reports_unhandled() {
        assert!(Dispatcher::new().dispatch(&Pong).unwrap_err().is_unhandled());
    }

    #[test]
    fn execution_error_stops_the_loop() {
        let store = Arc::new(MemoryStore::new());
        let fallback = Recording::<Ping>::new(&store);
        let calls = fallback.calls.clone();

        let dispatcher = Dispatcher::new().with(Broken).with(fallback);
        let run = dispatcher.dispatch_verbose(&Ping);

        assert!(matches!(run.result, Err(DispatchError::Execution { .. })));
        assert_eq!(run.attempts.len(), 1);
        let failure = format!("{} failed", std::any::type_name::<Broken>());
        assert_eq!(run.attempts[0].outcome, AttemptOutcome::Failed(failure));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn boxed_actions_dispatch_by_their_concrete_type() {
        let store = Arc::new(MemoryStore::new());
        let dispatcher = Dispatcher::new().with(Recording::<Pong>::new(&store));

        let boxed: Box<dyn ErasedAction> = Box::new(Pong);
        dispatcher.dispatch(boxed.as_ref()).unwrap();

        assert_eq!(store.get("last").unwrap(), Some(StoreValue::String(std::any::type_name::<Pong>().to_string())));
    }
}
