//! Availability guard: pure pre-flip check deciding what a toggle request
//! may do right now.
//!
//! Two independent inputs:
//! * the host's pending-action signal — textual editing must not race a
//!   model mutation in flight, so any pending action refuses the toggle
//!   outright;
//! * whether the editing surface is locally owned — decided once at
//!   construction (fed from `[source_mode] locally_owned_surface` or set
//!   directly by the host), never by runtime introspection of a foreign
//!   object. An externally managed surface demotes the toggle to
//!   flag-and-notify; the host reacts to the notification itself.
//!
//! Pending-action takes precedence over the ownership branch. The check has
//! no side effects.

use core_config::SourceModeConfig;

/// Host signal: is any unrelated asynchronous action currently in flight?
pub trait PendingActionSource {
    fn has_pending(&self) -> bool;
}

impl<F: Fn() -> bool> PendingActionSource for F {
    fn has_pending(&self) -> bool {
        self()
    }
}

/// Three-way verdict of [`AvailabilityGuard::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Full transition permitted.
    Ready,
    /// An asynchronous action is pending; refuse the toggle entirely.
    PendingAction,
    /// Surface is externally managed; flip and notify only.
    ExternalSurface,
}

#[derive(Debug, Clone, Copy)]
pub struct AvailabilityGuard {
    surface_locally_owned: bool,
}

impl AvailabilityGuard {
    pub fn new(surface_locally_owned: bool) -> Self {
        Self {
            surface_locally_owned,
        }
    }

    pub fn from_config(cfg: &SourceModeConfig) -> Self {
        Self::new(cfg.locally_owned_surface)
    }

    pub fn surface_locally_owned(&self) -> bool {
        self.surface_locally_owned
    }

    pub fn check(&self, pending: &dyn PendingActionSource) -> Availability {
        if pending.has_pending() {
            return Availability::PendingAction;
        }
        if !self.surface_locally_owned {
            return Availability::ExternalSurface;
        }
        Availability::Ready
    }

    /// `true` only when a full transition is permitted. Hosts typically bind
    /// the trigger control's enabled state to this.
    pub fn can_toggle(&self, pending: &dyn PendingActionSource) -> bool {
        matches!(self.check(pending), Availability::Ready)
    }
}
