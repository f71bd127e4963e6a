use std::any;
use std::error::Error;

use crate::context::Configurer;

/// A unit of startup configuration for a [`HolderContext`].
///
/// A module installs the instances the application starts with. Modules can
/// be grouped with [`Configuration`], so each part of an application can
/// contribute its own.
///
/// [`HolderContext`]: crate::context::HolderContext
pub trait Module: 'static {
    /// Runs [`Module::configure`] and reports its error, if any, to
    /// `configurer` under the module's type name.
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }

    /// Installs instances through `configurer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the module can't produce its instances.
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// An ordered group of [`Module`]s that acts as a single module.
///
/// Members are set up one after another, and a failing member does not stop
/// the rest, so [`HolderContext::init`] can report every problem at once.
///
/// [`HolderContext::init`]: crate::context::HolderContext::init
#[derive(Default)]
pub struct Configuration {
    members: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Appends `module`, which is set up after every module added before it.
    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.members.push(Box::new(module));
        self
    }

    /// Appends all members of `other`, keeping their order.
    pub fn compose(mut self, other: Configuration) -> Self {
        self.members.extend(other.members);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Module for Configuration {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        for member in &self.members {
            member.setup(configurer);
        }
        Ok(())
    }
}
