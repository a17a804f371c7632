//! Shared panel state and its liveness guard.
//!
//! All controller-owned fields live in one [`PanelState`] behind a mutex
//! that is never held across an await point. Work that resumes after a
//! suspension goes through [`PanelStateHandle::update_if_current`], which
//! drops the write when the panel was torn down or restarted meanwhile.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{GenerationCycle, MountGeneration};
use crate::domain::panel::{ErrorState, FactRegistry, PanelStatus, ScriptReadiness};

/// Everything the controller owns.
#[derive(Debug, Clone)]
pub struct PanelState {
    /// False once the panel is torn down.
    pub mounted: bool,
    /// Bumped on every mount and restart; doubles as the widget key.
    pub generation: MountGeneration,
    pub readiness: ScriptReadiness,
    pub errors: ErrorState,
    /// True while the first credential of a generation is being fetched.
    pub initializing: bool,
    pub facts: FactRegistry,
    /// Last generation cycle handed out.
    pub cycle: GenerationCycle,
    /// Pending-answer latch: the cycle awaiting capture, if any.
    pub pending: Option<GenerationCycle>,
    pub generated_answer: Option<String>,
    pub generating: bool,
    pub saving: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            mounted: false,
            generation: MountGeneration::default(),
            readiness: ScriptReadiness::Pending,
            errors: ErrorState::new(),
            initializing: true,
            facts: FactRegistry::new(),
            cycle: GenerationCycle::default(),
            pending: None,
            generated_answer: None,
            generating: false,
            saving: false,
        }
    }
}

impl PanelState {
    pub fn status(&self) -> PanelStatus {
        PanelStatus::derive(&self.errors, self.initializing)
    }

    /// True when `cycle` still owns the latch.
    pub fn is_pending(&self, cycle: GenerationCycle) -> bool {
        self.mounted && self.pending == Some(cycle)
    }

    /// Releases the latch held by `cycle`, storing `answer`.
    ///
    /// Returns false without touching anything when the latch moved on.
    pub fn settle(&mut self, cycle: GenerationCycle, answer: Option<String>) -> bool {
        if !self.is_pending(cycle) {
            return false;
        }
        self.pending = None;
        self.generating = false;
        self.generated_answer = answer;
        true
    }
}

/// Cloneable handle to the shared [`PanelState`].
#[derive(Debug, Clone, Default)]
pub struct PanelStateHandle {
    inner: Arc<Mutex<PanelState>>,
}

impl PanelStateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the state.
    pub fn read<R>(&self, f: impl FnOnce(&PanelState) -> R) -> R {
        f(&self.lock())
    }

    /// Mutates the state unconditionally.
    pub fn update<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Mutates the state only while mounted.
    pub fn update_if_mounted<R>(&self, f: impl FnOnce(&mut PanelState) -> R) -> Option<R> {
        let mut state = self.lock();
        state.mounted.then(|| f(&mut state))
    }

    /// Mutates the state only while `generation` is the live mount.
    pub fn update_if_current<R>(
        &self,
        generation: MountGeneration,
        f: impl FnOnce(&mut PanelState) -> R,
    ) -> Option<R> {
        let mut state = self.lock();
        (state.mounted && state.generation == generation).then(|| f(&mut state))
    }

    /// The live mount generation, or `None` after teardown.
    pub fn live_generation(&self) -> Option<MountGeneration> {
        self.read(|s| s.mounted.then_some(s.generation))
    }

    /// Arms a guard that runs `reset` when dropped, if `generation` is still live.
    pub fn reset_on_drop(
        &self,
        generation: MountGeneration,
        reset: fn(&mut PanelState),
    ) -> ResetOnDrop {
        ResetOnDrop {
            state: self.clone(),
            generation: Some(generation),
            reset,
        }
    }

    /// Arms a guard that runs `reset` when dropped, if still mounted.
    pub fn reset_on_drop_while_mounted(&self, reset: fn(&mut PanelState)) -> ResetOnDrop {
        ResetOnDrop {
            state: self.clone(),
            generation: None,
            reset,
        }
    }

    // Writers never panic while holding the lock, so a poisoned lock still
    // holds consistent state.
    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs a state reset exactly once, when dropped.
///
/// Covers early returns and cancellation of the surrounding future.
#[must_use = "the reset runs when the guard is dropped"]
pub struct ResetOnDrop {
    state: PanelStateHandle,
    generation: Option<MountGeneration>,
    reset: fn(&mut PanelState),
}

impl Drop for ResetOnDrop {
    fn drop(&mut self) {
        match self.generation {
            Some(generation) => self.state.update_if_current(generation, self.reset),
            None => self.state.update_if_mounted(self.reset),
        };
    }
}
