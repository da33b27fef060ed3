//! core-commands: command registry with additive force-disable state.
//!
//! Design principles:
//! - Pure and deterministic: availability depends only on the set of active
//!   suppression tags; enumeration follows registration order.
//! - Additive disable: a command's disabled state is a *set* of reasons, not
//!   a boolean. Several features can hold a command disabled at once; each
//!   releases only its own tag, and the command re-enables exactly when the
//!   set is empty. There is no generic "enable" call.
//! - No side effects: registering, disabling, and releasing never execute
//!   commands; logging stays at DEBUG/TRACE.

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, trace};

/// Identifier naming a reason a command is force-disabled.
///
/// Tags are `&'static str` constants owned by the feature that applies them
/// (e.g. the source-mode controller). Applying a tag twice is the same as
/// applying it once; only removing that same tag lifts that feature's hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuppressionTag(pub &'static str);

impl fmt::Display for SuppressionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A host command as seen by availability control.
///
/// Execution plumbing lives with the host; this type carries only identity
/// and the active suppression set. Most commands hold zero or one tag at a
/// time, so the set is a two-slot small vector.
#[derive(Debug, Clone)]
pub struct Command {
    id: String,
    disabled_by: SmallVec<[SuppressionTag; 2]>,
}

impl Command {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disabled_by: SmallVec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Enabled exactly when no suppression tag is active.
    pub fn is_enabled(&self) -> bool {
        self.disabled_by.is_empty()
    }

    pub fn is_force_disabled_by(&self, tag: SuppressionTag) -> bool {
        self.disabled_by.contains(&tag)
    }

    /// Apply a suppression tag. Idempotent: re-applying an active tag leaves
    /// the set unchanged.
    pub fn force_disable(&mut self, tag: SuppressionTag) {
        if self.disabled_by.contains(&tag) {
            trace!(target: "commands", command = %self.id, %tag, "force_disable_repeat");
            return;
        }
        self.disabled_by.push(tag);
        debug!(target: "commands", command = %self.id, %tag, "force_disabled");
    }

    /// Remove one suppression tag, leaving any other reasons untouched.
    /// No-op when the tag is not active.
    pub fn clear_force_disabled(&mut self, tag: SuppressionTag) {
        let before = self.disabled_by.len();
        self.disabled_by.retain(|t| *t != tag);
        if self.disabled_by.len() != before {
            debug!(target: "commands", command = %self.id, %tag, "force_disable_cleared");
        }
    }
}

/// Registration-ordered command collection.
///
/// Ordering matters: features that sweep the registry (suppress all, release
/// all) must observe commands deterministically, and commands registered
/// after construction simply append. Linear id lookup keeps the structure
/// index-free; hosts register tens of commands, not thousands.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A duplicate id replaces the earlier entry in
    /// place, keeping its registration position.
    pub fn register(&mut self, command: Command) {
        if let Some(existing) = self.commands.iter_mut().find(|c| c.id == command.id) {
            debug!(target: "commands", command = %command.id, "command_reregistered");
            *existing = command;
            return;
        }
        trace!(target: "commands", command = %command.id, "command_registered");
        self.commands.push(command);
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Command> {
        self.commands.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Command> {
        self.commands.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
