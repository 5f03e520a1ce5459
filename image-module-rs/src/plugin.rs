//! Hook contract between a bundler and its plugins.

use crate::args::{LoadArgs, ResolveArgs};
use crate::error::ImageModuleError;

/// A bundler plugin that can take over resolution and loading of modules.
///
/// Returning `Ok(None)` from a hook means "no opinion": the bundler moves on to
/// the next plugin or its default behavior.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn resolve_id(&self, args: &ResolveArgs) -> Result<Option<String>, ImageModuleError>;

    fn load(&self, args: &LoadArgs) -> Result<Option<String>, ImageModuleError>;
}
