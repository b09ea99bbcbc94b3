#![cfg_attr(doc, doc = include_str!("../README.md"))]

#[macro_use]
extern crate tracing;

#[macro_use]
mod macros;

pub mod builder;
pub mod panic;

mod bootstrap;
mod config;
mod error;
mod factory;
mod identity;
mod memo;
mod module;
mod surface;

pub use bootstrap::{BootstrapInputs, BootstrapState, Dimensions, ErrorSink, RuntimeBootstrap};
pub use builder::{LinkProgress, StagedBuilder};
pub use config::BootstrapConfig;
pub use error::{
    BootstrapError, BootstrapErrorKind, BootstrapResult, ErrorReport, LinkStage, PanicMessage, StageError,
};
pub use factory::RuntimeFactory;
pub use identity::Identity;
pub use memo::ResourceMemoizer;
pub use module::{Runtime, RuntimeBuilder, RuntimeModule};
pub use panic::set_panic_hook_once;
pub use surface::{ContextAcquirer, Surface, DEFAULT_CONTEXT_KIND};
