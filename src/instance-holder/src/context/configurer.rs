use std::any::{self, TypeId};
use std::collections::HashSet;
use std::error::Error;

use crate::context::{ContextError, HolderContext};
use crate::holder::Instance;

/// Receives the startup instances of a [`HolderContext`] from [`Module`]s.
///
/// [`Module`]: crate::module::Module
pub trait Configurer {
    #[doc(hidden)]
    fn dyn_install(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
        installer: Box<dyn FnOnce(&HolderContext)>,
    );

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

pub trait TypedConfigurer: Configurer {
    /// Installs `instance` as the initial instance of `T`. Each type can only
    /// be installed once per context.
    fn install<T>(&mut self, instance: Box<T>)
    where
        T: Instance + ?Sized,
    {
        self.dyn_install(
            TypeId::of::<T>(),
            any::type_name::<T>(),
            Box::new(move |context: &HolderContext| context.set_instance::<T>(instance)),
        );
    }
}

impl<T: Configurer + ?Sized> TypedConfigurer for T {}

pub struct ConfigurerImpl {
    context: HolderContext,
    installed: HashSet<TypeId>,
    errors: Vec<ContextError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            context: HolderContext::new(),
            installed: HashSet::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(mut self) -> Result<HolderContext, ContextError> {
        match self.errors.len() {
            0 => Ok(self.context),
            1 => Err(self.errors.remove(0)),
            _ => Err(ContextError::Aggregated {
                errors: self.errors,
            }),
        }
    }
}

impl Configurer for ConfigurerImpl {
    fn dyn_install(
        &mut self,
        type_id: TypeId,
        type_name: &'static str,
        installer: Box<dyn FnOnce(&HolderContext)>,
    ) {
        if self.installed.insert(type_id) {
            installer(&self.context);
        } else {
            tracing::warn!(instance = type_name, "duplicated instance ignored");
            self.errors
                .push(ContextError::InstanceDuplicated { type_name });
        }
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        tracing::warn!(module, error = %err, "module fails to configure");
        self.errors.push(ContextError::ModuleInner {
            module,
            source: err,
        });
    }
}
