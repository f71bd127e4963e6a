#![allow(clippy::new_without_default)]

extern crate self as instance_holder;

pub mod context;
pub mod holder;
pub mod module;
mod util;

pub use instance_holder_derive::singleton;

pub use crate::holder::{HolderError, Instance, InstanceHolder, Singleton};

pub mod prelude {
    pub use crate::context::{Configurer, ContextError, HolderContext, TypedConfigurer};
    pub use crate::holder::{HolderError, InstanceHolder, Singleton};
    pub use crate::module::{Configuration, Module};
    pub use crate::singleton;
}
