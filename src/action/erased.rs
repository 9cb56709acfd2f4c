//! Type-erased actions for dispatch.

use super::Action;
use crate::Module;
use std::any::Any;
use std::fmt;

/// Object-safe view of any [`Action`].
///
/// Executors declare one concrete action type; the dispatcher recovers it
/// from a `&dyn ErasedAction` with [`downcast_ref`](trait.ErasedAction.html#method.downcast_ref).
pub trait ErasedAction: Any + fmt::Debug + Send + Sync {
    fn action_module(&self) -> &Module;

    /// Concrete type name, used for diagnostics.
    fn action_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

impl<A> ErasedAction for A
where
    A: Action + Any + fmt::Debug + Send + Sync,
{
    fn action_module(&self) -> &Module {
        self.module()
    }

    fn action_type(&self) -> &'static str {
        std::any::type_name::<A>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<'a> dyn ErasedAction + 'a {
    pub fn is<A: Any>(&self) -> bool {
        self.as_any().is::<A>()
    }

    pub fn downcast_ref<A: Any>(&self) -> Option<&A> {
        self.as_any().downcast_ref::<A>()
    }
}
