use crate::{ErasedAction, StoreError};
use std::any::type_name;
use std::error::Error;
use thiserror::Error;

// --- Errors ------------------------------------------------------------------

/// A genuine failure of an executor's side effect.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(Box<dyn Error + Send + Sync>),
}

impl ExecuteError {
    pub fn other(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        ExecuteError::Other(error.into())
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The executor does not own this action type. Consumed by
    /// [`Dispatcher`](crate::Dispatcher); callers of `dispatch` never see it.
    #[error("{executor} does not handle {action}")]
    Mismatch { executor: &'static str, action: &'static str },

    /// No executor claimed a structurally valid action.
    #[error("no executor handles {action_type}: {action}")]
    Unhandled { action_type: &'static str, action: String },

    #[error("{executor} failed")]
    Execution {
        executor: &'static str,
        #[source]
        source: ExecuteError,
    },
}

impl DispatchError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, DispatchError::Mismatch { .. })
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchError::Unhandled { .. })
    }
}

// --- Executors ---------------------------------------------------------------

/// Performs the side effect for one concrete action type.
pub trait Executor: Send + Sync {
    type Action: ErasedAction;

    fn execute(&self, action: &Self::Action) -> Result<(), ExecuteError>;
}

/// Type-erased entry point of an [`Executor`].
///
/// `dispatch` narrows the action to the executor's own type and reports
/// [`DispatchError::Mismatch`] when it is something else.
pub trait ErasedExecutor: Send + Sync {
    fn name(&self) -> &'static str;

    fn dispatch(&self, action: &dyn ErasedAction) -> Result<(), DispatchError>;
}

impl<X: Executor> ErasedExecutor for X {
    fn name(&self) -> &'static str {
        type_name::<X>()
    }

    fn dispatch(&self, action: &dyn ErasedAction) -> Result<(), DispatchError> {
        let Some(typed) = action.downcast_ref::<X::Action>() else {
            return Err(DispatchError::Mismatch { executor: self.name(), action: action.action_type() });
        };
        self.execute(typed).map_err(|source| DispatchError::Execution { executor: self.name(), source })
    }
}
