use super::{DispatchError, Dispatcher};
use crate::{ApplyToStore, ErasedAction, Store, StoreError};
use std::fmt;
use std::sync::Arc;

/// Destination for parsed values.
pub trait Sink<A: ?Sized> {
    type Error;

    fn sink(&self, value: &A) -> Result<(), Self::Error>;
}

impl Sink<dyn ErasedAction> for Dispatcher {
    type Error = DispatchError;

    fn sink(&self, action: &(dyn ErasedAction + 'static)) -> Result<(), DispatchError> {
        self.dispatch(action)
    }
}

impl Sink<Box<dyn ErasedAction>> for Dispatcher {
    type Error = DispatchError;

    fn sink(&self, action: &Box<dyn ErasedAction>) -> Result<(), DispatchError> {
        self.dispatch(action.as_ref())
    }
}

impl<A: ?Sized, S: Sink<A> + ?Sized> Sink<A> for Arc<S> {
    type Error = S::Error;

    fn sink(&self, value: &A) -> Result<(), S::Error> {
        (**self).sink(value)
    }
}

/// Sink backed by a closure.
#[derive(Clone, Copy)]
pub struct FnSink<F> {
    function: F,
}

impl<F> FnSink<F> {
    pub fn new(function: F) -> Self {
        FnSink { function }
    }
}

impl<A, E, F> Sink<A> for FnSink<F>
where
    A: ?Sized,
    F: Fn(&A) -> Result<(), E>,
{
    type Error = E;

    fn sink(&self, value: &A) -> Result<(), E> {
        (self.function)(value)
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink(<function>)")
    }
}

/// Applies store-backed actions directly, without an executor list.
#[derive(Clone)]
pub struct StoreSink {
    store: Arc<dyn Store>,
}

impl StoreSink {
    pub fn new(store: Arc<dyn Store>) -> Self {
        StoreSink { store }
    }
}

impl<A: ApplyToStore + ?Sized> Sink<A> for StoreSink {
    type Error = StoreError;

    fn sink(&self, action: &A) -> Result<(), StoreError> {
        action.apply(self.store.as_ref())
    }
}

impl fmt::Debug for StoreSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreSink")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChangePreference, MemoryStore, StoreValue, StringAction};
    use parking_lot::Mutex;
    use std::convert::Infallible;

    #[test]
    fn fn_sink_receives_value() {
        let seen = Mutex::new(Vec::new());
        let sink = FnSink::new(|action: &StringAction| {
            seen.lock().push(action.mode().depth());
            Ok::<(), Infallible>(())
        });

        sink.sink(&StringAction::from_segments("m", ["a", "b"], None)).unwrap();
        assert_eq!(*seen.lock(), vec![2]);
    }

    #[test]
    fn store_sink_applies_action() {
        let store = Arc::new(MemoryStore::new());
        let sink = StoreSink::new(store.clone());

        sink.sink(&ChangePreference::new("age", 123_i64)).unwrap();
        assert_eq!(store.get("age").unwrap(), Some(StoreValue::I64(123)));
    }
}
