use std::any::Any;
use std::sync::Arc;

pub mod block;
pub mod player;
pub mod server;

/// A payload carried through the event bus.
///
/// Handler lists are keyed by the payload's name, so `get_name_static` (on
/// the type) and `get_name` (on an instance) must agree for dispatch to find
/// the right list. Both are implemented by `#[derive(Event)]`.
pub trait Payload: Send + Sync {
    /// The name of this payload type.
    fn get_name_static() -> &'static str
    where
        Self: Sized;

    /// The name of this payload instance. Always equal to what
    /// `get_name_static` returns for the concrete type.
    fn get_name(&self) -> &'static str;

    /// An immutable view of the payload for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// A mutable view of the payload for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Converts a shared payload into a shared `Any` for downcasting.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Helper functions for safe downcasting of payload implementations.
impl dyn Payload + '_ {
    /// Attempts to downcast an `Arc<dyn Payload>` to `Arc<T>`.
    pub fn downcast_arc<T: Payload + 'static>(payload: Arc<dyn Payload>) -> Option<Arc<T>> {
        payload.into_any_arc().downcast::<T>().ok()
    }

    /// Attempts to downcast a `&mut dyn Payload` to `&mut T`.
    pub fn downcast_mut<T: Payload + 'static>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Attempts to downcast a `&dyn Payload` to `&T`.
    pub fn downcast_ref<T: Payload + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// A cancellable event.
///
/// What cancelling suppresses is up to each event type; see its
/// documentation.
pub trait Cancellable: Send + Sync {
    /// Whether the event has been cancelled.
    fn cancelled(&self) -> bool;

    /// Sets the cancellation state of the event.
    fn set_cancelled(&mut self, cancelled: bool);
}

/// The priority levels of event handlers.
///
/// Handlers with lower priority run first, so handlers with higher priority
/// see and can override their changes.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Clone)]
pub enum EventPriority {
    /// Highest priority level.
    Highest,

    /// High priority level.
    High,

    /// Normal priority level.
    Normal,

    /// Low priority level.
    Low,

    /// Lowest priority level.
    Lowest,
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use gourd_macros::Event;

    use super::{EventPriority, Payload};

    #[derive(Event, Clone)]
    struct ProbeEvent {
        counter: u32,
    }

    #[derive(Event, Clone)]
    struct UnrelatedEvent {}

    #[test]
    fn name_is_the_type_name_on_both_accessors() {
        let event = ProbeEvent { counter: 0 };
        assert_eq!(ProbeEvent::get_name_static(), "ProbeEvent");
        assert_eq!(event.get_name(), ProbeEvent::get_name_static());
    }

    #[test]
    fn downcasting_recovers_the_concrete_type() {
        let mut event = ProbeEvent { counter: 1 };
        let dyn_event: &mut dyn Payload = &mut event;

        assert!(dyn_event.downcast_ref::<ProbeEvent>().is_some());
        dyn_event.downcast_mut::<ProbeEvent>().unwrap().counter = 2;
        assert_eq!(event.counter, 2);
    }

    #[test]
    fn arc_downcast_requires_the_matching_type() {
        let event: Arc<dyn Payload> = Arc::new(ProbeEvent { counter: 7 });
        let typed = <dyn Payload>::downcast_arc::<ProbeEvent>(event).unwrap();
        assert_eq!(typed.counter, 7);

        let other: Arc<dyn Payload> = Arc::new(UnrelatedEvent {});
        assert!(<dyn Payload>::downcast_arc::<ProbeEvent>(other).is_none());
    }

    #[test]
    fn priorities_order_highest_first() {
        assert!(EventPriority::Highest < EventPriority::Normal);
        assert!(EventPriority::Normal < EventPriority::Lowest);
    }
}
