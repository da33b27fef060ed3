//! Document region model and the access seam consumed by the mode controller.
//!
//! A document is rendered as one or more named *regions*. Each region carries
//! its serialized textual content plus a presentational `hidden` flag used
//! while the source-mode view replaces the structured rendering. Region names
//! are unique keys, stable for the document's lifetime, and enumeration
//! always follows registration order so multi-region operations stay
//! deterministic.
//!
//! Core invariants (must hold after every public call):
//! * Region names are unique within a document.
//! * `region_names()` order equals registration order.
//! * `read`/`write`/`set_hidden` on an unknown name fail with
//!   `AccessError::UnknownRegion` and mutate nothing.
//!
//! The `DocumentAccess` trait is the seam real hosts implement against their
//! own model; `InMemoryDocument` is the in-tree implementation used by tests
//! and by embedding hosts without a model of their own. Host failures that
//! are not simple name misses surface as `AccessError::Backend` so callers
//! can treat any access failure uniformly as fatal to the operation in
//! flight.

use thiserror::Error;
use tracing::{debug, trace};

/// Failure surfaced by a [`DocumentAccess`] operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The named region is not part of the document.
    #[error("unknown region `{name}`")]
    UnknownRegion { name: String },
    /// The host's document backend rejected the operation.
    #[error("region `{name}` access failed: {reason}")]
    Backend { name: String, reason: String },
}

/// A named, independently addressable portion of the document.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    content: String,
    hidden: bool,
}

impl Region {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serialized textual content currently owned by the structured model.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether the structured rendering of this region is presentationally
    /// hidden (it still exists; hiding is never a deletion).
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Access seam over a host document: serialized content per named region plus
/// the presentational hidden flag.
///
/// Implementations must keep `region_names()` in registration order and must
/// not partially apply a failed operation.
pub trait DocumentAccess {
    /// Region names in registration order.
    fn region_names(&self) -> Vec<String>;
    /// Current serialized content of the named region.
    fn read(&self, region: &str) -> Result<String, AccessError>;
    /// Replace the named region's serialized content.
    fn write(&mut self, region: &str, content: &str) -> Result<(), AccessError>;
    /// Set or clear the presentational hidden flag of the named region.
    fn set_hidden(&mut self, region: &str, hidden: bool) -> Result<(), AccessError>;
}

impl<T: DocumentAccess + ?Sized> DocumentAccess for &mut T {
    fn region_names(&self) -> Vec<String> {
        (**self).region_names()
    }
    fn read(&self, region: &str) -> Result<String, AccessError> {
        (**self).read(region)
    }
    fn write(&mut self, region: &str, content: &str) -> Result<(), AccessError> {
        (**self).write(region, content)
    }
    fn set_hidden(&mut self, region: &str, hidden: bool) -> Result<(), AccessError> {
        (**self).set_hidden(region, hidden)
    }
}

/// Vec-backed reference document. Registration order is storage order, which
/// keeps enumeration deterministic without a secondary index; documents hold
/// a handful of regions, so linear name lookup is fine.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    regions: Vec<Region>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region with initial serialized content. Registering a name
    /// twice replaces the earlier content in place (the slot keeps its
    /// registration position).
    pub fn register_region(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        if let Some(existing) = self.regions.iter_mut().find(|r| r.name == name) {
            debug!(target: "document", region = %name, "region_reregistered");
            existing.content = content;
            existing.hidden = false;
            return;
        }
        self.regions.push(Region {
            name,
            content,
            hidden: false,
        });
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn region_mut(&mut self, name: &str) -> Result<&mut Region, AccessError> {
        self.regions
            .iter_mut()
            .find(|r| r.name == name)
            .ok_or_else(|| AccessError::UnknownRegion {
                name: name.to_string(),
            })
    }
}

impl DocumentAccess for InMemoryDocument {
    fn region_names(&self) -> Vec<String> {
        self.regions.iter().map(|r| r.name.clone()).collect()
    }

    fn read(&self, region: &str) -> Result<String, AccessError> {
        self.region(region)
            .map(|r| r.content.clone())
            .ok_or_else(|| AccessError::UnknownRegion {
                name: region.to_string(),
            })
    }

    fn write(&mut self, region: &str, content: &str) -> Result<(), AccessError> {
        let slot = self.region_mut(region)?;
        trace!(target: "document", region, len = content.len(), "region_write");
        slot.content = content.to_string();
        Ok(())
    }

    fn set_hidden(&mut self, region: &str, hidden: bool) -> Result<(), AccessError> {
        let slot = self.region_mut(region)?;
        trace!(target: "document", region, hidden, "region_set_hidden");
        slot.hidden = hidden;
        Ok(())
    }
}
