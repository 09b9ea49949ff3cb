pub mod context;
pub mod events;

use std::sync::Arc;

pub use context::Context;
pub use events::*;

use crate::plugin::BoxFuture;

/// Metadata describing a plugin.
#[derive(Debug, Clone)]
pub struct PluginMetadata<'s> {
    /// The plugin name.
    pub name: &'s str,
    /// The plugin version.
    pub version: &'s str,
    /// The plugin authors.
    pub authors: &'s str,
    /// A short description of the plugin.
    pub description: &'s str,
}

/// A server extension, driven through its load and unload hooks.
pub trait Plugin: Send + Sync + 'static {
    /// Called when the plugin is loaded. Returning an error aborts the load.
    fn on_load<'a>(&'a mut self, _context: Arc<Context>) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    /// Called when the plugin is unloaded.
    fn on_unload<'a>(&'a mut self, _context: Arc<Context>) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}
