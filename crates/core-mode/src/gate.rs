//! Command gate: bulk application and release of the source-mode
//! suppression tag across the host's command registry.
//!
//! The gate owns exactly one tag and never touches any other suppression
//! reason, so features holding the same command disabled stay independent.
//! Both sweeps are idempotent (tag sets absorb repeats) and neither executes
//! a command; only availability state changes. A sweep always covers every
//! command registered at call time, including commands registered after the
//! gate was constructed.

use core_commands::{CommandRegistry, SuppressionTag};
use tracing::debug;

/// Tag applied to every registered command while source mode is active.
pub const SOURCE_MODE_TAG: SuppressionTag = SuppressionTag("source-mode");

#[derive(Debug, Clone, Copy)]
pub struct CommandGate {
    tag: SuppressionTag,
}

impl Default for CommandGate {
    fn default() -> Self {
        Self::new(SOURCE_MODE_TAG)
    }
}

impl CommandGate {
    pub fn new(tag: SuppressionTag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> SuppressionTag {
        self.tag
    }

    /// Apply the gate's tag to every currently registered command.
    pub fn suppress(&self, registry: &mut CommandRegistry) {
        let count = registry.len();
        for command in registry.iter_mut() {
            command.force_disable(self.tag);
        }
        debug!(target: "mode.commands", tag = %self.tag, count, "commands_suppressed");
    }

    /// Remove the gate's tag from every command, leaving other suppression
    /// reasons untouched. No-op for commands the tag was never applied to.
    pub fn release(&self, registry: &mut CommandRegistry) {
        let count = registry.len();
        for command in registry.iter_mut() {
            command.clear_force_disabled(self.tag);
        }
        debug!(target: "mode.commands", tag = %self.tag, count, "commands_released");
    }
}
