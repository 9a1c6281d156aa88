use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications emitted for host consumption.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    ControlAdded,
    ControlRemoved,
    Expanded,
    Collapsed,
    DrawActivated,
    DrawDeactivated,
    DeleteActivated,
    DeleteDeactivated,
    RequestStart,
    RequestEnd,
    /// A result was normalized and rendered.
    Displayed,
    /// One result was removed while others remain.
    Deleted,
    /// The layer group was emptied.
    Cleared,
    Error,
    NoData,
    Exported { filename: String },
}

/// Broadcast bus distributing control events to any number of subscribers.
/// Emission never blocks; events emitted with no subscribers are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ControlEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControlEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: ControlEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
