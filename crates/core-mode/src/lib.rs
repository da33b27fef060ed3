//! Source-mode toggle: bidirectional synchronization between the structured
//! document model and a flat textual (serialized source) view.
//!
//! The [`SourceModeController`] owns a single mode flag and executes the
//! whole enter/exit sequence synchronously once a toggle is accepted, so no
//! observer ever sees a half-transitioned document. Per transition:
//!
//! * enter: for each region (registration order) read its serialized
//!   content, clear the structured content, capture the snapshot seeded
//!   with the read text, hide the structured rendering; then suppress every
//!   registered command; then flip the flag and notify observers once.
//! * exit: write each snapshot's current text back (registration order),
//!   unhide, drain the store; then release the suppression tag; then flip
//!   and notify.
//!
//! Ordering guarantees (normative): command suppression happens strictly
//! after content/visibility changes on entry, and suppression release
//! strictly after write-back on exit, so no command can execute against a
//! half-written model.
//!
//! Invariants (must hold at every point outside an in-flight transition):
//! * `is_source_mode() == true` iff every region holds a live snapshot;
//!   `false` iff the store is empty.
//! * No region ever has both a live snapshot and non-empty structured
//!   content.
//! * Snapshot lifecycle and suppression-tag lifecycle are strictly paired;
//!   never one without the other.
//!
//! Failure policy: entry is all-or-nothing — the first region failure rolls
//! already-transitioned regions back (best-effort, logged) and the document
//! returns to its pre-toggle state. Exit writes every region back before
//! discarding any snapshot; a write failure aborts with the full store
//! retained so a later exit retries idempotently. Permission refusals are
//! not errors: they surface as [`ToggleOutcome::NotPermitted`] with no
//! observable effect.
//!
//! Each editor instance gets its own controller; nothing here is global.

pub mod gate;
pub mod guard;
pub mod observer;
pub mod snapshot;

pub use gate::{CommandGate, SOURCE_MODE_TAG};
pub use guard::{Availability, AvailabilityGuard, PendingActionSource};
pub use observer::{ModeObserver, ObserverRegistry};
pub use snapshot::{SnapshotError, SnapshotStore};

use core_commands::CommandRegistry;
use core_config::SourceModeConfig;
use core_document::{AccessError, DocumentAccess};
use thiserror::Error;
use tracing::{debug, error, info};

/// Failure fatal to a mode transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What a [`SourceModeController::toggle`] call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Full transition into source mode completed.
    Entered,
    /// Full transition back to the structured view completed.
    Exited,
    /// Refused: an asynchronous action is pending. Nothing changed and no
    /// notification fired.
    NotPermitted,
    /// Surface is externally managed: the flag flipped and observers were
    /// notified, but document, snapshots, and commands were left to the
    /// host.
    DeferredToHost,
}

/// State machine owning the source-mode flag, the snapshot store, and the
/// command gate for one editor instance.
pub struct SourceModeController {
    is_source_mode: bool,
    snapshots: SnapshotStore,
    gate: CommandGate,
    guard: AvailabilityGuard,
    observers: ObserverRegistry,
}

impl SourceModeController {
    pub fn new(surface_locally_owned: bool) -> Self {
        Self {
            is_source_mode: false,
            snapshots: SnapshotStore::new(),
            gate: CommandGate::default(),
            guard: AvailabilityGuard::new(surface_locally_owned),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn from_config(cfg: &SourceModeConfig) -> Self {
        Self::new(cfg.locally_owned_surface)
    }

    /// Read-only view of the mode flag.
    pub fn is_source_mode(&self) -> bool {
        self.is_source_mode
    }

    pub fn guard(&self) -> &AvailabilityGuard {
        &self.guard
    }

    /// Register a mode-change observer. Observers fire once per accepted
    /// toggle, in subscription order.
    pub fn subscribe(&mut self, observer: impl ModeObserver + 'static) {
        self.observers.subscribe(observer);
    }

    /// Current snapshot text for a region, while source mode is active.
    /// Hosts render the textual view from this.
    pub fn snapshot_text(&self, region: &str) -> Option<&str> {
        self.snapshots.get(region)
    }

    /// Live-edit path: replace a region's snapshot text after a keystroke in
    /// the textual view. Fails loudly when the region was never captured —
    /// that is a lifecycle violation on the host's side, not user input.
    pub fn update_snapshot(
        &mut self,
        region: &str,
        text: impl Into<String>,
    ) -> Result<(), ModeError> {
        self.snapshots.update(region, text)?;
        Ok(())
    }

    /// Flip the mode if currently permitted.
    ///
    /// The guard verdict decides the shape of the call: a pending action
    /// refuses outright (no flag change, no event); an externally managed
    /// surface flips and notifies without touching document or commands;
    /// otherwise the full enter/exit sequence runs before the single
    /// notification. Errors are access failures fatal to the transition —
    /// the flag never flips on an error.
    pub fn toggle(
        &mut self,
        doc: &mut dyn DocumentAccess,
        commands: &mut CommandRegistry,
        pending: &dyn PendingActionSource,
    ) -> Result<ToggleOutcome, ModeError> {
        match self.guard.check(pending) {
            Availability::PendingAction => {
                debug!(target: "mode.toggle", "toggle_refused_pending_action");
                return Ok(ToggleOutcome::NotPermitted);
            }
            Availability::ExternalSurface => {
                let next = !self.is_source_mode;
                debug!(target: "mode.toggle", is_source_mode = next, "toggle_deferred_to_host");
                self.set_mode(next);
                return Ok(ToggleOutcome::DeferredToHost);
            }
            Availability::Ready => {}
        }
        if self.is_source_mode {
            self.exit(doc, commands)?;
            self.set_mode(false);
            Ok(ToggleOutcome::Exited)
        } else {
            self.enter(doc, commands)?;
            self.set_mode(true);
            Ok(ToggleOutcome::Entered)
        }
    }

    /// Flip the flag and notify observers. Same-value sets are no-ops.
    fn set_mode(&mut self, is_source_mode: bool) {
        if self.is_source_mode == is_source_mode {
            return;
        }
        self.is_source_mode = is_source_mode;
        self.observers.notify(is_source_mode);
    }

    fn enter(
        &mut self,
        doc: &mut dyn DocumentAccess,
        commands: &mut CommandRegistry,
    ) -> Result<(), ModeError> {
        let regions = doc.region_names();
        for name in &regions {
            if let Err(err) = self.enter_region(doc, name) {
                error!(target: "mode.toggle", region = %name, %err, "enter_failed_rolling_back");
                self.rollback_enter(doc);
                return Err(err);
            }
        }
        // Strictly after content and visibility changes.
        self.gate.suppress(commands);
        info!(target: "mode.toggle", regions = regions.len(), "entered_source_mode");
        Ok(())
    }

    fn enter_region(&mut self, doc: &mut dyn DocumentAccess, name: &str) -> Result<(), ModeError> {
        let source = doc.read(name)?;
        // Clearing now makes any later return to the structured view a
        // deliberate write-back, never an accidental merge.
        doc.write(name, "")?;
        self.snapshots.capture(name, source);
        doc.set_hidden(name, true)?;
        Ok(())
    }

    /// Undo a partially applied entry: every captured snapshot is written
    /// back and unhidden. Best-effort — a region that fails to restore is
    /// logged and skipped so the remaining regions still recover.
    fn rollback_enter(&mut self, doc: &mut dyn DocumentAccess) {
        for (name, text) in self.snapshots.release_all() {
            if let Err(err) = doc.write(&name, &text) {
                error!(target: "mode.toggle", region = %name, %err, "rollback_write_failed");
            }
            if let Err(err) = doc.set_hidden(&name, false) {
                error!(target: "mode.toggle", region = %name, %err, "rollback_unhide_failed");
            }
        }
    }

    fn exit(
        &mut self,
        doc: &mut dyn DocumentAccess,
        commands: &mut CommandRegistry,
    ) -> Result<(), ModeError> {
        // Write every region back before discarding any snapshot; aborting
        // here keeps the full store so a later exit retries idempotently.
        for (region, text) in self.snapshots.iter() {
            doc.write(region, text)?;
            doc.set_hidden(region, false)?;
        }
        let released = self.snapshots.release_all();
        // Suppression release strictly follows write-back.
        self.gate.release(commands);
        info!(target: "mode.toggle", regions = released.len(), "exited_source_mode");
        Ok(())
    }
}
