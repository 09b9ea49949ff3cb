use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::entity::player::Player;
use crate::plugin::server::service_register::ServiceRegisterEvent;
use crate::plugin::server::service_unregister::ServiceUnregisterEvent;
use crate::plugin::{EventHandler, EventPriority, Payload, PluginManager, PluginMetadata};
use crate::server::Server;

/// The API a loaded plugin talks to the server through.
pub struct Context {
    metadata: PluginMetadata<'static>,
    pub server: Arc<Server>,
    pub plugin_manager: Arc<PluginManager>,
}

impl Context {
    #[must_use]
    pub fn new(
        metadata: PluginMetadata<'static>,
        server: Arc<Server>,
        plugin_manager: Arc<PluginManager>,
    ) -> Self {
        Self {
            metadata,
            server,
            plugin_manager,
        }
    }

    /// Returns the data folder of the plugin, creating it if missing.
    #[must_use]
    pub fn get_data_folder(&self) -> PathBuf {
        let path = PathBuf::from("plugins").join(self.metadata.name);
        if !path.exists() {
            fs::create_dir_all(&path).expect("Failed to create plugin data folder");
        }
        path
    }

    /// Finds an online player by name.
    pub async fn get_player_by_name(&self, player_name: &str) -> Option<Arc<Player>> {
        self.server.get_player_by_name(player_name).await
    }

    /// Registers an event handler for events of type `E`.
    ///
    /// # Arguments
    /// - `handler`: The handler to call for matching events.
    /// - `priority`: Where the handler runs relative to other blocking
    ///   handlers.
    /// - `blocking`: Whether the handler may mutate the event.
    pub async fn register_event<E, H>(
        &self,
        handler: Arc<H>,
        priority: EventPriority,
        blocking: bool,
    ) where
        E: Payload + Send + Sync + 'static,
        H: EventHandler<E> + 'static,
    {
        self.plugin_manager
            .register::<E, H>(handler, priority, blocking)
            .await;
    }

    /// Registers a named service other plugins can look up.
    ///
    /// Replaces any service previously registered under the same name.
    pub async fn register_service<N: Into<String>>(&self, name: N, service: Arc<dyn Payload>) {
        let name = name.into();
        self.plugin_manager
            .services
            .write()
            .await
            .insert(name.clone(), service);

        let event = ServiceRegisterEvent::new(self.metadata.name.to_string(), name);
        let _ = self
            .plugin_manager
            .fire::<ServiceRegisterEvent>(event)
            .await;
    }

    /// Removes a named service. Does nothing if the name is unknown.
    pub async fn unregister_service(&self, name: &str) {
        let removed = self.plugin_manager.services.write().await.remove(name);
        if removed.is_some() {
            let event =
                ServiceUnregisterEvent::new(self.metadata.name.to_string(), name.to_string());
            let _ = self
                .plugin_manager
                .fire::<ServiceUnregisterEvent>(event)
                .await;
        }
    }

    /// Looks up a named service, downcast to its concrete type.
    ///
    /// Returns `None` if no service is registered under the name or if the
    /// registered service is of a different type.
    pub async fn get_service<T: Payload + Send + Sync + 'static>(
        &self,
        name: &str,
    ) -> Option<Arc<T>> {
        let service = self.plugin_manager.services.read().await.get(name)?.clone();
        <dyn Payload>::downcast_arc::<T>(service)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use gourd_config::BasicConfiguration;
    use gourd_macros::Event;

    use super::Context;
    use crate::plugin::server::service_register::ServiceRegisterEvent;
    use crate::plugin::server::service_unregister::ServiceUnregisterEvent;
    use crate::plugin::{BoxFuture, EventHandler, EventPriority, PluginMetadata};
    use crate::server::Server;

    #[derive(Event, Clone)]
    struct WaypointService {
        range: u32,
    }

    #[derive(Event, Clone)]
    struct HomesService {}

    async fn test_context() -> Arc<Context> {
        let server = Server::new(BasicConfiguration::default());
        server
            .plugin_manager
            .set_self_ref(server.plugin_manager.clone())
            .await;
        server.plugin_manager.set_server(server.clone()).await;

        Arc::new(Context::new(
            PluginMetadata {
                name: "waypoints",
                version: "1.0.0",
                authors: "tests",
                description: "shares a waypoint service",
            },
            server.clone(),
            server.plugin_manager.clone(),
        ))
    }

    #[tokio::test]
    async fn services_resolve_by_name_and_type() {
        let context = test_context().await;
        context
            .register_service("waypoints", Arc::new(WaypointService { range: 64 }))
            .await;

        let service = context.get_service::<WaypointService>("waypoints").await;
        assert_eq!(service.unwrap().range, 64);

        assert!(context.get_service::<HomesService>("waypoints").await.is_none());
        assert!(context.get_service::<WaypointService>("homes").await.is_none());
    }

    #[tokio::test]
    async fn unregistering_removes_the_service() {
        let context = test_context().await;
        context
            .register_service("waypoints", Arc::new(WaypointService { range: 8 }))
            .await;
        context.unregister_service("waypoints").await;

        assert!(
            context
                .get_service::<WaypointService>("waypoints")
                .await
                .is_none()
        );
    }

    struct ServiceListener {
        registered: Arc<AtomicU32>,
        unregistered: Arc<AtomicU32>,
    }

    impl EventHandler<ServiceRegisterEvent> for ServiceListener {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut ServiceRegisterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                assert_eq!(event.plugin_name, "waypoints");
                self.registered.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    impl EventHandler<ServiceUnregisterEvent> for ServiceListener {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut ServiceUnregisterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                assert_eq!(event.service_name, "waypoints");
                self.unregistered.fetch_add(1, Ordering::SeqCst);
            })
        }
    }

    #[tokio::test]
    async fn service_changes_fire_events() {
        let context = test_context().await;
        let listener = Arc::new(ServiceListener {
            registered: Arc::new(AtomicU32::new(0)),
            unregistered: Arc::new(AtomicU32::new(0)),
        });
        context
            .register_event::<ServiceRegisterEvent, _>(
                listener.clone(),
                EventPriority::Normal,
                true,
            )
            .await;
        context
            .register_event::<ServiceUnregisterEvent, _>(
                listener.clone(),
                EventPriority::Normal,
                true,
            )
            .await;

        context
            .register_service("waypoints", Arc::new(WaypointService { range: 16 }))
            .await;
        context.unregister_service("waypoints").await;
        // A second unregister has nothing to remove, so no event fires.
        context.unregister_service("waypoints").await;

        assert_eq!(listener.registered.load(Ordering::SeqCst), 1);
        assert_eq!(listener.unregistered.load(Ordering::SeqCst), 1);
    }
}
