//! # Input focus
//!
//! ## Overview
//!
//! The platform only delivers text-input callbacks to the view that holds input focus. Dropping
//! and reacquiring focus is also how the bridge forces the platform to abandon its current
//! composition session.
//!
//! Reacquiring focus can't happen while the platform is still delivering the callback that
//! caused the reset, so it's stored in a single deferred slot and run by the host on its next
//! event loop turn.

/// Work postponed until the host's next event loop turn.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DeferredTask {
    /// Become the platform's input focus again.
    AcquireFocus,
}

/// Focus state, with a single slot for deferred work.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Focus {
    focused: bool,
    flushed: bool,
    deferred: Option<DeferredTask>,
}

impl Focus {
    /// Whether the bridge currently holds input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether focus can be acquired yet.
    ///
    /// The view has to have been drawn at least once before it can take focus.
    pub fn can_focus(&self) -> bool {
        self.flushed
    }

    /// Try to take input focus.
    pub fn acquire(&mut self) -> bool {
        if !self.can_focus() {
            tracing::debug!("focus requested before first flush");
            return false;
        }

        self.focused = true;

        return true;
    }

    /// Give up input focus, returning whether it was held.
    pub fn resign(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    /// Record that the view has been drawn.
    ///
    /// The first flush schedules acquiring focus.
    pub fn mark_flushed(&mut self) -> bool {
        if self.flushed {
            return false;
        }

        self.flushed = true;
        self.schedule(DeferredTask::AcquireFocus);

        return true;
    }

    /// Put a task into the deferred slot.
    ///
    /// At most one task is ever outstanding, so this replaces anything already there.
    pub fn schedule(&mut self, task: DeferredTask) {
        if let Some(old) = self.deferred.replace(task) {
            tracing::trace!(?old, new = ?task, "replaced deferred task");
        }
    }

    /// The task waiting to run, if any.
    pub fn deferred(&self) -> Option<DeferredTask> {
        self.deferred
    }

    /// Remove the deferred task so that it can be run.
    pub fn take_deferred(&mut self) -> Option<DeferredTask> {
        self.deferred.take()
    }
}
