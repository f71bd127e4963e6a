mod configurer;

use std::any::{self, TypeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::RwLock;
use snafu::prelude::*;

use crate::holder::{HolderError, Instance, InstanceHolder};
use crate::module::Module;
use crate::util::any::{AsAny, DowncastArc};

pub(crate) use configurer::ConfigurerImpl;
pub use configurer::{Configurer, TypedConfigurer};

/// A set of [`InstanceHolder`]s, one for each type it has been asked about.
///
/// A [`HolderContext`] is meant to be created once by the composition root of
/// an application and then passed to whatever needs it. Unlike the
/// process-wide holders of [`Singleton`] types, separate contexts never
/// observe each other's instances.
///
/// [`Singleton`]: crate::holder::Singleton
///
/// # Examples
///
/// ```rust
/// # use instance_holder::prelude::*;
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct Frozen(u64);
///
/// impl Clock for Frozen {
///     fn now(&self) -> u64 {
///         self.0
///     }
/// }
///
/// let context = HolderContext::new();
/// context.set_instance::<dyn Clock>(Box::new(Frozen(42)));
/// assert_eq!(context.get_instance::<dyn Clock>().now(), 42);
/// ```
pub struct HolderContext {
    holders: RwLock<HashMap<TypeId, Arc<dyn ErasedHolder>>>,
}

impl HolderContext {
    /// Creates a context in which every holder is empty.
    pub fn new() -> Self {
        Self {
            holders: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a context whose holders are populated by `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if `module` or any module it is composed of fails to
    /// configure, or if some type is installed more than once.
    pub fn init<M>(module: M) -> Result<Self, ContextError>
    where
        M: Module,
    {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        configurer.finish()
    }

    /// Returns the holder of `T` in this context, creating an empty one on
    /// first use.
    pub fn holder<T>(&self) -> Arc<InstanceHolder<T>>
    where
        T: Instance + ?Sized,
    {
        let type_id = TypeId::of::<T>();
        if let Some(holder) = self.holders.read().get(&type_id) {
            return Self::downcast_holder(Arc::clone(holder));
        }

        let mut holders = self.holders.write();
        let holder = holders.entry(type_id).or_insert_with(|| {
            tracing::trace!(instance = any::type_name::<T>(), "holder created");
            let holder: Arc<dyn ErasedHolder> = Arc::new(InstanceHolder::<T>::new());
            holder
        });
        Self::downcast_holder(Arc::clone(holder))
    }

    pub fn set_instance<T>(&self, instance: Box<T>)
    where
        T: Instance + ?Sized,
    {
        self.holder::<T>().set_instance(instance);
    }

    /// # Panics
    ///
    /// Panics if no instance of `T` has been set in this context.
    #[track_caller]
    pub fn get_instance<T>(&self) -> Arc<T>
    where
        T: Instance + ?Sized,
    {
        self.holder::<T>().get_instance()
    }

    /// # Errors
    ///
    /// Returns [`HolderError::Uninitialized`] if no instance of `T` has been
    /// set in this context.
    pub fn try_get_instance<T>(&self) -> Result<Arc<T>, HolderError>
    where
        T: Instance + ?Sized,
    {
        self.holder::<T>().try_get_instance()
    }

    pub fn is_set<T>(&self) -> bool
    where
        T: Instance + ?Sized,
    {
        self.holders
            .read()
            .get(&TypeId::of::<T>())
            .is_some_and(|holder| holder.is_set())
    }

    pub fn clear<T>(&self) -> bool
    where
        T: Instance + ?Sized,
    {
        let holder = self.holders.read().get(&TypeId::of::<T>()).cloned();
        holder.is_some_and(|holder| holder.clear())
    }

    fn downcast_holder<T>(holder: Arc<dyn ErasedHolder>) -> Arc<InstanceHolder<T>>
    where
        T: Instance + ?Sized,
    {
        match holder.downcast_arc::<InstanceHolder<T>>() {
            Ok(holder) => holder,
            Err(_) => unreachable!("holders are keyed by the `TypeId` of their instance type"),
        }
    }
}

impl Default for HolderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for HolderContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let holders = self.holders.read();
        f.debug_map()
            .entries(
                holders
                    .values()
                    .map(|holder| (holder.type_name(), holder.is_set())),
            )
            .finish()
    }
}

trait ErasedHolder: AsAny + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn is_set(&self) -> bool;

    fn clear(&self) -> bool;
}

impl<T> ErasedHolder for InstanceHolder<T>
where
    T: Instance + ?Sized,
{
    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn is_set(&self) -> bool {
        InstanceHolder::is_set(self)
    }

    fn clear(&self) -> bool {
        InstanceHolder::clear(self)
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ContextError {
    #[snafu(display("an instance of {type_name} is installed more than once"))]
    #[non_exhaustive]
    InstanceDuplicated { type_name: &'static str },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated context errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<ContextError> },
}

struct AggregatedDisplayer<'a> {
    errors: &'a [ContextError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [ContextError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::module::Configuration;

    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            String::from("hello")
        }
    }

    struct Named(&'static str);

    impl Greeter for Named {
        fn greet(&self) -> String {
            format!("hello, {}", self.0)
        }
    }

    struct GreeterModule;

    impl Module for GreeterModule {
        fn configure(
            &self,
            configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            configurer.install::<dyn Greeter>(Box::new(English));
            Ok(())
        }
    }

    struct PortModule(u16);

    impl Module for PortModule {
        fn configure(
            &self,
            configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            configurer.install(Box::new(self.0));
            Ok(())
        }
    }

    struct FailingModule;

    impl Module for FailingModule {
        fn configure(
            &self,
            _configurer: &mut dyn Configurer,
        ) -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("missing configuration".into())
        }
    }

    #[test]
    fn context_operations_succeed() {
        let context = HolderContext::new();
        assert!(!context.is_set::<dyn Greeter>());

        context.set_instance::<dyn Greeter>(Box::new(English));
        assert_eq!(context.get_instance::<dyn Greeter>().greet(), "hello");

        context.set_instance::<dyn Greeter>(Box::new(Named("world")));
        assert_eq!(context.get_instance::<dyn Greeter>().greet(), "hello, world");

        assert!(context.clear::<dyn Greeter>());
        assert!(!context.is_set::<dyn Greeter>());
        assert!(!context.clear::<dyn Greeter>());
    }

    #[test]
    fn context_holder_is_shared_per_type() {
        let context = HolderContext::new();
        let holder = context.holder::<u32>();

        holder.set_instance(Box::new(7));
        assert_eq!(*context.get_instance::<u32>(), 7);
        assert!(Arc::ptr_eq(&holder, &context.holder::<u32>()));
        assert!(!context.is_set::<u64>());
    }

    #[test]
    fn context_instances_are_isolated() {
        let first = HolderContext::new();
        let second = HolderContext::new();

        first.set_instance::<dyn Greeter>(Box::new(English));

        assert!(first.is_set::<dyn Greeter>());
        assert!(!second.is_set::<dyn Greeter>());
        assert!(matches!(
            second.try_get_instance::<dyn Greeter>(),
            Err(HolderError::Uninitialized { .. })
        ));
    }

    #[test]
    fn context_distinguishes_trait_object_from_implementer() {
        let context = HolderContext::new();
        context.set_instance(Box::new(English));

        assert!(context.is_set::<English>());
        assert!(!context.is_set::<dyn Greeter>());
    }

    #[test]
    #[should_panic(expected = "has been set")]
    fn context_get_panics_when_empty() {
        let context = HolderContext::new();
        context.get_instance::<dyn Greeter>();
    }

    #[test]
    fn context_init_succeeds() {
        let configuration = Configuration::new()
            .with(GreeterModule)
            .with(PortModule(8080));
        let context = HolderContext::init(configuration).unwrap();

        assert_eq!(context.get_instance::<dyn Greeter>().greet(), "hello");
        assert_eq!(*context.get_instance::<u16>(), 8080);
    }

    #[test]
    fn context_init_fails_when_instance_is_duplicated() {
        let configuration = Configuration::new()
            .with(PortModule(8080))
            .with(PortModule(8081));

        let err = HolderContext::init(configuration).unwrap_err();
        assert!(matches!(err, ContextError::InstanceDuplicated { .. }));
        assert_eq!(err.to_string(), "an instance of u16 is installed more than once");
    }

    #[test]
    fn context_init_fails_when_module_reports_error() {
        let err = HolderContext::init(FailingModule).unwrap_err();
        assert!(matches!(err, ContextError::ModuleInner { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn context_init_aggregates_errors() {
        let configuration = Configuration::new()
            .with(FailingModule)
            .with(GreeterModule)
            .with(GreeterModule);

        let err = HolderContext::init(configuration).unwrap_err();
        let ContextError::Aggregated { errors } = &err else {
            panic!("expected aggregated errors, got {err:?}");
        };
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ContextError::ModuleInner { .. }));
        assert!(matches!(errors[1], ContextError::InstanceDuplicated { .. }));
        assert!(err.to_string().starts_with("aggregated context errors:\n   1: "));
    }

    #[test]
    fn context_debug_lists_holders() {
        let context = HolderContext::new();
        context.set_instance(Box::new(1u8));

        assert_eq!(format!("{context:?}"), "{\"u8\": true}");
    }
}
