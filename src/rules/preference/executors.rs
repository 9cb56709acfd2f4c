use super::{ApplyToStore, ChangePreference, DeletePreference, PreferenceValue};
use crate::{ExecuteError, Executor, Store};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Runs [`ChangePreference<V>`] against a store.
pub struct ChangePreferenceExecutor<V> {
    store: Arc<dyn Store>,
    _value: PhantomData<fn() -> V>,
}

impl<V> ChangePreferenceExecutor<V> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        ChangePreferenceExecutor { store, _value: PhantomData }
    }
}

impl<V> fmt::Debug for ChangePreferenceExecutor<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChangePreferenceExecutor<{}>", std::any::type_name::<V>())
    }
}

impl<V: PreferenceValue> Executor for ChangePreferenceExecutor<V> {
    type Action = ChangePreference<V>;

    fn execute(&self, action: &ChangePreference<V>) -> Result<(), ExecuteError> {
        action.apply(self.store.as_ref())?;
        Ok(())
    }
}

/// Runs [`DeletePreference`] against a store.
pub struct DeletePreferenceExecutor {
    store: Arc<dyn Store>,
}

impl DeletePreferenceExecutor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        DeletePreferenceExecutor { store }
    }
}

impl fmt::Debug for DeletePreferenceExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeletePreferenceExecutor")
    }
}

impl Executor for DeletePreferenceExecutor {
    type Action = DeletePreference;

    fn execute(&self, action: &DeletePreference) -> Result<(), ExecuteError> {
        action.apply(self.store.as_ref())?;
        Ok(())
    }
}
