//! Monotonic counters that tag mounts and generation cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Counter of widget mounts.
///
/// Bumped by every restart; the embedding UI uses it as the widget's
/// instance key so the widget remounts cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MountGeneration(u64);

impl MountGeneration {
    /// Creates a generation from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount-{}", self.0)
    }
}

/// Identifier of one "generate answer" cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationCycle(u64);

impl GenerationCycle {
    /// Creates a cycle id from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the following cycle id.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_increments() {
        assert_eq!(MountGeneration::default().next().value(), 1);
        assert_eq!(GenerationCycle::new(41).next(), GenerationCycle::new(42));
    }

    #[test]
    fn display_is_prefixed() {
        assert_eq!(MountGeneration::new(3).to_string(), "mount-3");
        assert_eq!(GenerationCycle::new(7).to_string(), "cycle-7");
    }
}
