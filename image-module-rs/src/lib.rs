// Allow uninlined format args for cleaner format!/error macros
#![allow(clippy::uninlined_format_args)]
#![doc = include_str!("../README.md")]

pub mod args;
pub mod error;
pub mod filter;
pub mod mime;
pub mod module_loader;
pub mod options;
pub mod plugin;
pub mod template;

#[macro_use]
extern crate lazy_static;

pub use args::{LoadArgs, ResolveArgs};
pub use error::ImageModuleError;
pub use mime::{classify, MediaType, SourceFormat};
pub use module_loader::{encoder_virtual_id, ImageModuleLoader, ModuleRef};
pub use options::{FilterPattern, ImageOptions};
pub use plugin::Plugin;
pub use template::{emit, EmitMode};
