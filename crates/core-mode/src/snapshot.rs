//! Region snapshot store.
//!
//! While source mode is active every region's serialized text lives here,
//! not in the document model. Entries are created in bulk when the mode is
//! entered, mutated freely while it is active, and drained in bulk when it
//! is left; outside a transition the store is either empty or holds exactly
//! one entry per region.
//!
//! Iteration and drain order equal capture order, which the controller keeps
//! equal to region registration order so write-back stays deterministic.

use thiserror::Error;
use tracing::trace;

/// Lifecycle violation surfaced by [`SnapshotStore::update`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// `update` was called for a region that was never captured. Updates
    /// originate only from live edits of the textual view, which cannot
    /// exist before capture, so this indicates host misuse.
    #[error("no active snapshot for region `{region}`")]
    NotCaptured { region: String },
}

#[derive(Debug, Clone)]
struct SnapshotEntry {
    region: String,
    text: String,
}

/// Capture-ordered region→text store.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the snapshot for `region`, seeded with `text`. Capturing a
    /// region that already holds a snapshot overwrites it in place.
    pub fn capture(&mut self, region: impl Into<String>, text: impl Into<String>) {
        let region = region.into();
        let text = text.into();
        trace!(target: "mode.snapshot", region = %region, len = text.len(), "capture");
        if let Some(entry) = self.entries.iter_mut().find(|e| e.region == region) {
            entry.text = text;
            return;
        }
        self.entries.push(SnapshotEntry { region, text });
    }

    /// Replace the live text of an existing snapshot (the keystroke path).
    pub fn update(&mut self, region: &str, text: impl Into<String>) -> Result<(), SnapshotError> {
        match self.entries.iter_mut().find(|e| e.region == region) {
            Some(entry) => {
                entry.text = text.into();
                Ok(())
            }
            None => Err(SnapshotError::NotCaptured {
                region: region.to_string(),
            }),
        }
    }

    pub fn get(&self, region: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.region == region)
            .map(|e| e.text.as_str())
    }

    pub fn contains(&self, region: &str) -> bool {
        self.entries.iter().any(|e| e.region == region)
    }

    /// `(region, text)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.region.as_str(), e.text.as_str()))
    }

    /// Remove one snapshot, returning its current text.
    pub fn release(&mut self, region: &str) -> Option<String> {
        let idx = self.entries.iter().position(|e| e.region == region)?;
        let entry = self.entries.remove(idx);
        trace!(target: "mode.snapshot", region = %entry.region, "release");
        Some(entry.text)
    }

    /// Drain every snapshot in capture order. Afterwards the store is empty
    /// and no region holds a stale entry.
    pub fn release_all(&mut self) -> Vec<(String, String)> {
        trace!(target: "mode.snapshot", count = self.entries.len(), "release_all");
        self.entries
            .drain(..)
            .map(|e| (e.region, e.text))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_then_get() {
        let mut store = SnapshotStore::new();
        store.capture("main", "<p>Hello</p>");
        assert_eq!(store.get("main"), Some("<p>Hello</p>"));
        assert!(store.contains("main"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn capture_overwrites_in_place() {
        let mut store = SnapshotStore::new();
        store.capture("main", "old");
        store.capture("aside", "side");
        store.capture("main", "new");
        assert_eq!(store.get("main"), Some("new"));
        let order: Vec<&str> = store.iter().map(|(r, _)| r).collect();
        assert_eq!(order, vec!["main", "aside"]);
    }

    #[test]
    fn update_requires_prior_capture() {
        let mut store = SnapshotStore::new();
        let err = store.update("main", "text").unwrap_err();
        assert_eq!(
            err,
            SnapshotError::NotCaptured {
                region: "main".to_string()
            }
        );
        store.capture("main", "seed");
        store.update("main", "edited").unwrap();
        assert_eq!(store.get("main"), Some("edited"));
    }

    #[test]
    fn release_returns_current_text_and_removes() {
        let mut store = SnapshotStore::new();
        store.capture("main", "seed");
        store.update("main", "edited").unwrap();
        assert_eq!(store.release("main"), Some("edited".to_string()));
        assert!(store.release("main").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn release_all_drains_in_capture_order() {
        let mut store = SnapshotStore::new();
        store.capture("main", "x");
        store.capture("aside", "y");
        let drained = store.release_all();
        assert_eq!(
            drained,
            vec![
                ("main".to_string(), "x".to_string()),
                ("aside".to_string(), "y".to_string()),
            ]
        );
        assert!(store.is_empty());
        assert!(!store.contains("main"));
    }
}
