use std::sync::Arc;

use crate::holder::{HolderError, Instance, InstanceHolder};

/// A type with one process-wide [`InstanceHolder`].
///
/// The associated functions make the holder reachable through the type
/// itself, e.g. `<dyn Service>::get_instance()`. Implement this with the
/// [`singleton`] attribute rather than by hand:
///
/// ```rust
/// use instance_holder::prelude::*;
///
/// #[singleton]
/// trait Service: Send + Sync {
///     fn value(&self) -> u32;
/// }
///
/// struct Fixed;
///
/// impl Service for Fixed {
///     fn value(&self) -> u32 {
///         1
///     }
/// }
///
/// <dyn Service>::set_instance(Box::new(Fixed));
/// assert_eq!(<dyn Service>::get_instance().value(), 1);
/// ```
///
/// A process-wide holder is shared by everything in the process, tests
/// included. Prefer a [`HolderContext`] where isolation matters.
///
/// [`singleton`]: crate::singleton
/// [`HolderContext`]: crate::context::HolderContext
pub trait Singleton: Instance {
    /// Returns the holder backing this type.
    fn holder() -> &'static InstanceHolder<Self>;

    /// See [`InstanceHolder::set_instance`].
    fn set_instance(instance: Box<Self>) {
        Self::holder().set_instance(instance);
    }

    /// See [`InstanceHolder::get_instance`].
    ///
    /// # Panics
    ///
    /// Panics if no instance has been set.
    #[track_caller]
    fn get_instance() -> Arc<Self> {
        Self::holder().get_instance()
    }

    /// See [`InstanceHolder::try_get_instance`].
    ///
    /// # Errors
    ///
    /// Returns [`HolderError::Uninitialized`] if no instance has been set.
    fn try_get_instance() -> Result<Arc<Self>, HolderError> {
        Self::holder().try_get_instance()
    }

    fn is_set() -> bool {
        Self::holder().is_set()
    }

    fn clear() -> bool {
        Self::holder().clear()
    }
}
