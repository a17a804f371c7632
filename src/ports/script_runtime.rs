//! Script Runtime Port - Load signals for the widget's runtime script.
//!
//! The host page loads the widget runtime asynchronously. It reports the
//! outcome through [`ScriptSignals`]; the panel subscribes at mount and
//! drops its subscription at teardown. A synchronous registration check
//! covers the case where the runtime loaded before the panel mounted.

use tokio::sync::broadcast;

/// Capacity of the signal channel. Signals are rare; a handful suffices.
const SIGNAL_CAPACITY: usize = 16;

/// A load outcome reported by the host page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLoadEvent {
    Loaded,
    Failed { detail: Option<String> },
}

/// Synchronous probe for the runtime's registration.
pub trait ScriptRuntime: Send + Sync {
    /// True once the widget's custom element is registered.
    fn is_registered(&self) -> bool;
}

/// Publisher side of the load signals.
#[derive(Debug, Clone)]
pub struct ScriptSignals {
    sender: broadcast::Sender<ScriptLoadEvent>,
}

impl Default for ScriptSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptSignals {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { sender }
    }

    /// Reports that the runtime finished loading.
    pub fn loaded(&self) {
        self.publish(ScriptLoadEvent::Loaded);
    }

    /// Reports that the runtime failed to load.
    pub fn failed(&self, detail: Option<String>) {
        self.publish(ScriptLoadEvent::Failed { detail });
    }

    /// Opens a new subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<ScriptLoadEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn publish(&self, event: ScriptLoadEvent) {
        // No subscriber simply means no panel is mounted.
        let _ = self.sender.send(event);
    }
}
