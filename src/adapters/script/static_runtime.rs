//! Script runtime probe with a settable registration flag.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ports::ScriptRuntime;

/// Runtime probe whose answer is set by the caller.
///
/// Hosts that learn about registration out of band (or tests) flip the
/// flag with [`StaticScriptRuntime::set_registered`].
#[derive(Debug, Default)]
pub struct StaticScriptRuntime {
    registered: AtomicBool,
}

impl StaticScriptRuntime {
    pub fn new(registered: bool) -> Self {
        Self {
            registered: AtomicBool::new(registered),
        }
    }

    pub fn registered() -> Self {
        Self::new(true)
    }

    pub fn unregistered() -> Self {
        Self::new(false)
    }

    pub fn set_registered(&self, registered: bool) {
        self.registered.store(registered, Ordering::SeqCst);
    }
}

impl ScriptRuntime for StaticScriptRuntime {
    fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }
}
