use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info};

pub mod api;

pub use api::*;

use crate::plugin::server::plugin_disable::PluginDisableEvent;
use crate::plugin::server::plugin_enable::PluginEnableEvent;
use crate::server::Server;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A trait for handling events dynamically.
///
/// This trait allows for handling events of any type that implements the
/// `Payload` trait.
pub trait DynEventHandler: Send + Sync {
    /// Asynchronously handles a dynamic event.
    ///
    /// # Arguments
    /// - `event`: A reference to the event to handle.
    fn handle_dyn<'a>(
        &'a self,
        _server: &'a Arc<Server>,
        event: &'a (dyn Payload + Send + Sync),
    ) -> BoxFuture<'a, ()>;

    /// Asynchronously handles a blocking dynamic event.
    ///
    /// # Arguments
    /// - `event`: A mutable reference to the event to handle.
    fn handle_blocking_dyn<'a>(
        &'a self,
        _server: &'a Arc<Server>,
        _event: &'a mut (dyn Payload + Send + Sync),
    ) -> BoxFuture<'a, ()>;

    /// Checks if the event handler is blocking.
    fn is_blocking(&self) -> bool;

    /// Retrieves the priority of the event handler.
    fn get_priority(&self) -> &EventPriority;
}

/// A trait for handling events of a specific type.
///
/// Implement `handle_blocking` for handlers registered as blocking, which
/// run sequentially and may mutate the event. Implement `handle` for the
/// rest, which run concurrently once the blocking handlers are done.
pub trait EventHandler<E: Payload>: Send + Sync {
    /// Asynchronously handles an event of type `E`.
    ///
    /// # Arguments
    /// - `event`: A reference to the event to handle.
    fn handle<'a>(&'a self, _server: &'a Arc<Server>, _event: &'a E) -> BoxFuture<'a, ()> {
        Box::pin(async {})
    }

    /// Asynchronously handles a blocking event of type `E`.
    ///
    /// # Arguments
    /// - `event`: A mutable reference to the event to handle.
    fn handle_blocking<'a>(
        &'a self,
        _server: &'a Arc<Server>,
        _event: &'a mut E,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async {})
    }
}

/// An event handler bound to its concrete event type.
struct TypedEventHandler<E, H>
where
    E: Payload + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    handler: Arc<H>,
    priority: EventPriority,
    blocking: bool,
    _phantom: std::marker::PhantomData<E>,
}

impl<E, H> DynEventHandler for TypedEventHandler<E, H>
where
    E: Payload + Send + Sync + 'static,
    H: EventHandler<E> + Send + Sync,
{
    fn handle_blocking_dyn<'a>(
        &'a self,
        server: &'a Arc<Server>,
        event: &'a mut (dyn Payload + Send + Sync),
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if let Some(typed_event) = <dyn Payload>::downcast_mut(event) {
                self.handler.handle_blocking(server, typed_event).await;
            }
        })
    }

    fn handle_dyn<'a>(
        &'a self,
        server: &'a Arc<Server>,
        event: &'a (dyn Payload + Send + Sync),
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if let Some(typed_event) = <dyn Payload>::downcast_ref(event) {
                self.handler.handle(server, typed_event).await;
            }
        })
    }

    fn is_blocking(&self) -> bool {
        self.blocking
    }

    fn get_priority(&self) -> &EventPriority {
        &self.priority
    }
}

/// A map of event handlers, keyed by the name of the event type they are
/// registered for.
type HandlerMap = HashMap<&'static str, Vec<Box<dyn DynEventHandler>>>;

/// Core plugin management system.
pub struct PluginManager {
    plugins: RwLock<Vec<LoadedPlugin>>,
    server: RwLock<Option<Arc<Server>>>,
    handlers: RwLock<HandlerMap>,
    // Self-reference for sharing with contexts
    self_ref: RwLock<Option<Arc<Self>>>,
    services: RwLock<HashMap<String, Arc<dyn Payload>>>,
}

/// A successfully loaded plugin.
struct LoadedPlugin {
    metadata: PluginMetadata<'static>,
    instance: Box<dyn Plugin>,
    context: Arc<Context>,
}

/// Error types for plugin management.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Server not initialized")]
    ServerNotInitialized,

    #[error("Plugin manager not initialized properly")]
    ManagerNotInitialized,

    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Plugin already loaded: {0}")]
    PluginAlreadyLoaded(String),

    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(String),
}

impl Default for PluginManager {
    fn default() -> Self {
        Self {
            plugins: RwLock::new(Vec::new()),
            server: RwLock::new(None),
            handlers: RwLock::new(HashMap::new()),
            self_ref: RwLock::new(None),
            services: RwLock::new(HashMap::new()),
        }
    }
}

impl PluginManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server reference for plugin contexts.
    pub async fn set_server(&self, server: Arc<Server>) {
        let mut srv = self.server.write().await;
        srv.replace(server);
    }

    /// Set the self reference used for creating contexts.
    pub async fn set_self_ref(&self, self_ref: Arc<Self>) {
        let mut sref = self.self_ref.write().await;
        sref.replace(self_ref);
    }

    /// Loads a plugin instance and calls its load hook.
    ///
    /// On a load-hook error, the plugin's unload hook runs best-effort and
    /// the plugin is not kept.
    pub async fn load_plugin(
        &self,
        mut instance: Box<dyn Plugin>,
        metadata: PluginMetadata<'static>,
    ) -> Result<(), ManagerError> {
        if self.is_plugin_loaded(metadata.name).await {
            return Err(ManagerError::PluginAlreadyLoaded(metadata.name.to_string()));
        }

        let self_ref = self
            .self_ref
            .read()
            .await
            .clone()
            .ok_or(ManagerError::ManagerNotInitialized)?;
        let server = self
            .server
            .read()
            .await
            .clone()
            .ok_or(ManagerError::ServerNotInitialized)?;

        let context = Arc::new(Context::new(metadata.clone(), server.clone(), self_ref));

        if let Err(e) = instance.on_load(context.clone()).await {
            let _ = instance.on_unload(context).await;
            error!("Failed to initialize plugin {}: {e}", metadata.name);
            return Err(ManagerError::InitializationFailed(e));
        }

        self.plugins.write().await.push(LoadedPlugin {
            metadata: metadata.clone(),
            instance,
            context,
        });

        let enable_event = PluginEnableEvent::new(metadata.name.to_string());
        let _ = server
            .plugin_manager
            .fire::<PluginEnableEvent>(enable_event)
            .await;

        info!("Loaded {} ({})", metadata.name, metadata.version);
        Ok(())
    }

    /// Unload a plugin by name.
    pub async fn unload_plugin(&self, name: &str) -> Result<(), ManagerError> {
        let index = {
            let plugins = self.plugins.read().await;
            plugins
                .iter()
                .position(|plugin| plugin.metadata.name == name)
                .ok_or_else(|| ManagerError::PluginNotFound(name.to_string()))?
        };

        let disable_event = PluginDisableEvent::new(name.to_string());
        if let Some(server) = self.server.read().await.clone() {
            let _ = server
                .plugin_manager
                .fire::<PluginDisableEvent>(disable_event)
                .await;
        }

        let mut plugin = {
            let mut plugins = self.plugins.write().await;
            plugins.remove(index)
        };
        plugin.instance.on_unload(plugin.context.clone()).await.ok();

        info!("Unloaded {}", name);
        Ok(())
    }

    /// Unload all loaded plugins.
    pub async fn unload_all_plugins(&self) {
        let plugin_names: Vec<String> = {
            let plugins = self.plugins.read().await;
            plugins
                .iter()
                .map(|plugin| plugin.metadata.name.to_string())
                .collect()
        };

        for name in plugin_names {
            if let Err(e) = self.unload_plugin(&name).await {
                error!("Failed to unload plugin {name}: {e}");
            }
        }
    }

    /// Checks if a plugin is loaded.
    #[must_use]
    pub async fn is_plugin_loaded(&self, name: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.iter().any(|plugin| plugin.metadata.name == name)
    }

    /// Get the list of loaded plugins.
    #[must_use]
    pub async fn loaded_plugins(&self) -> Vec<PluginMetadata<'static>> {
        let plugins = self.plugins.read().await;
        plugins.iter().map(|plugin| plugin.metadata.clone()).collect()
    }

    /// Register an event handler.
    pub async fn register<E, H>(&self, handler: Arc<H>, priority: EventPriority, blocking: bool)
    where
        E: Payload + Send + Sync + 'static,
        H: EventHandler<E> + 'static,
    {
        let mut handlers = self.handlers.write().await;
        let typed_handler = TypedEventHandler {
            handler,
            priority,
            blocking,
            _phantom: std::marker::PhantomData,
        };

        handlers
            .entry(E::get_name_static())
            .or_default()
            .push(Box::new(typed_handler));
    }

    /// Fire an event to all registered handlers and hand it back.
    ///
    /// Blocking handlers run first, ordered from the lowest priority to the
    /// highest so higher priorities get the last word, and may mutate the
    /// event. Non-blocking handlers then observe the final event
    /// concurrently. The returned event carries whatever the blocking
    /// handlers left in it.
    ///
    /// The handler table stays read-locked for the whole dispatch, so
    /// handlers must not call [`Self::register`] (or
    /// `Context::register_event`) from inside one — that deadlocks.
    pub async fn fire<E: Payload + Send + Sync + 'static>(&self, mut event: E) -> E {
        if let Some(server) = self.server.read().await.as_ref() {
            let handlers = self.handlers.read().await;
            if let Some(handlers) = handlers.get(&E::get_name_static()) {
                let (mut blocking, non_blocking): (Vec<_>, Vec<_>) =
                    handlers.iter().partition(|handler| handler.is_blocking());

                // Stable sort keeps registration order within a priority.
                blocking.sort_by_key(|handler| std::cmp::Reverse(handler.get_priority().clone()));

                for handler in blocking {
                    handler.handle_blocking_dyn(server, &mut event).await;
                }

                join_all(
                    non_blocking
                        .into_iter()
                        .map(|handler| handler.handle_dyn(server, &event)),
                )
                .await;
            }
        }
        event
    }
}
