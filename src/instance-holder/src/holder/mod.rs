mod singleton;

use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::RwLock;
use snafu::prelude::*;

pub use singleton::Singleton;

/// A type that can be stored in an [`InstanceHolder`].
///
/// This is automatically implemented for every type, including trait objects,
/// which can be shared between threads and contains no borrowed data.
pub trait Instance: Send + Sync + 'static {}

impl<T> Instance for T where T: Send + Sync + ?Sized + 'static {}

/// A slot owning at most one instance of `T`.
///
/// `T` is usually a trait object type like `dyn Service`, so that any
/// implementer can be stored and callers only see the shared interface. The
/// holder starts empty and is populated through [`set_instance`], which
/// releases whatever instance was stored before.
///
/// Accessing an empty holder is a programming error. [`get_instance`] panics
/// in that case, while [`try_get_instance`] reports it as a [`HolderError`]
/// for callers that want to recover.
///
/// Instances are handed out as [`Arc`]s, so no lock is held once a getter
/// returns. A replaced instance is dropped as soon as the last handle to it
/// goes away, which is immediately if nobody kept one.
///
/// The holder itself owns at most one instance at a time. Handles that
/// callers keep are not covered by that rule: an instance obtained before a
/// replacement stays alive, next to the new one, until the caller drops it.
///
/// [`set_instance`]: InstanceHolder::set_instance
/// [`get_instance`]: InstanceHolder::get_instance
/// [`try_get_instance`]: InstanceHolder::try_get_instance
pub struct InstanceHolder<T>
where
    T: Instance + ?Sized,
{
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> InstanceHolder<T>
where
    T: Instance + ?Sized,
{
    /// Creates an empty holder. Being a `const fn`, this can initialize a
    /// `static` item.
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Stores `instance`, dropping the previously held instance unless
    /// someone still holds a handle to it.
    pub fn set_instance(&self, instance: Box<T>) {
        drop(self.replace_instance(instance));
    }

    /// Stores `instance` and returns the previously held one, if any.
    pub fn replace_instance(&self, instance: Box<T>) -> Option<Arc<T>> {
        let previous = self.slot.write().replace(Arc::from(instance));
        tracing::debug!(
            instance = any::type_name::<T>(),
            replaced = previous.is_some(),
            "instance set"
        );
        previous
    }

    /// Returns the current instance.
    ///
    /// # Panics
    ///
    /// Panics if no instance has been set.
    #[track_caller]
    pub fn get_instance(&self) -> Arc<T> {
        match self.try_get_instance() {
            Ok(instance) => instance,
            Err(err) => panic!("{err}"),
        }
    }

    /// Returns the current instance.
    ///
    /// # Errors
    ///
    /// Returns [`HolderError::Uninitialized`] if no instance has been set.
    pub fn try_get_instance(&self) -> Result<Arc<T>, HolderError> {
        let slot = self.slot.read();
        slot.as_ref().map(Arc::clone).context(UninitializedSnafu {
            type_name: any::type_name::<T>(),
        })
    }

    /// Returns true if an instance is currently held.
    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Releases the held instance and empties the holder. Returns whether an
    /// instance was held.
    pub fn clear(&self) -> bool {
        let previous = self.slot.write().take();
        if previous.is_some() {
            tracing::debug!(instance = any::type_name::<T>(), "instance cleared");
        }
        previous.is_some()
    }
}

impl<T> Default for InstanceHolder<T>
where
    T: Instance + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for InstanceHolder<T>
where
    T: Instance + ?Sized,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InstanceHolder")
            .field("type", &any::type_name::<T>())
            .field("set", &self.is_set())
            .finish()
    }
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum HolderError {
    #[snafu(display("no instance of {type_name} has been set"))]
    #[non_exhaustive]
    Uninitialized { type_name: &'static str },
}
