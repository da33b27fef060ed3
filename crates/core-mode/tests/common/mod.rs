#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use core_commands::{Command, CommandRegistry};
use core_document::{AccessError, DocumentAccess, InMemoryDocument};
use core_mode::{PendingActionSource, SourceModeController};

pub fn single_region_doc() -> InMemoryDocument {
    let mut doc = InMemoryDocument::new();
    doc.register_region("main", "<p>Hello</p>");
    doc
}

pub fn two_region_doc() -> InMemoryDocument {
    let mut doc = InMemoryDocument::new();
    doc.register_region("main", "x");
    doc.register_region("aside", "y");
    doc
}

pub fn registry() -> CommandRegistry {
    let mut reg = CommandRegistry::new();
    reg.register(Command::new("bold"));
    reg.register(Command::new("italic"));
    reg.register(Command::new("undo"));
    reg
}

/// Interior-mutable pending-action signal so tests can flip it mid-scenario.
pub struct PendingFlag(Cell<bool>);

impl PendingFlag {
    pub fn new(pending: bool) -> Self {
        Self(Cell::new(pending))
    }

    pub fn set(&self, pending: bool) {
        self.0.set(pending);
    }
}

impl PendingActionSource for PendingFlag {
    fn has_pending(&self) -> bool {
        self.0.get()
    }
}

/// Subscribe a recording observer; the returned handle collects every
/// notified flag value in order.
pub fn recording_observer(ctrl: &mut SourceModeController) -> Rc<RefCell<Vec<bool>>> {
    let events: Rc<RefCell<Vec<bool>>> = Rc::default();
    let sink = events.clone();
    ctrl.subscribe(move |is_source_mode: bool| sink.borrow_mut().push(is_source_mode));
    events
}

/// Document wrapper with armable per-region failure injection.
pub struct FlakyDocument {
    inner: InMemoryDocument,
    fail_read: RefCell<Option<String>>,
    fail_write: RefCell<Option<String>>,
}

impl FlakyDocument {
    pub fn new(inner: InMemoryDocument) -> Self {
        Self {
            inner,
            fail_read: RefCell::new(None),
            fail_write: RefCell::new(None),
        }
    }

    pub fn arm_read_failure(&self, region: &str) {
        *self.fail_read.borrow_mut() = Some(region.to_string());
    }

    pub fn arm_write_failure(&self, region: &str) {
        *self.fail_write.borrow_mut() = Some(region.to_string());
    }

    pub fn disarm(&self) {
        *self.fail_read.borrow_mut() = None;
        *self.fail_write.borrow_mut() = None;
    }

    pub fn inner(&self) -> &InMemoryDocument {
        &self.inner
    }

    fn injected(&self, region: &str) -> AccessError {
        AccessError::Backend {
            name: region.to_string(),
            reason: "injected failure".to_string(),
        }
    }
}

impl DocumentAccess for FlakyDocument {
    fn region_names(&self) -> Vec<String> {
        self.inner.region_names()
    }

    fn read(&self, region: &str) -> Result<String, AccessError> {
        if self.fail_read.borrow().as_deref() == Some(region) {
            return Err(self.injected(region));
        }
        self.inner.read(region)
    }

    fn write(&mut self, region: &str, content: &str) -> Result<(), AccessError> {
        if self.fail_write.borrow().as_deref() == Some(region) {
            return Err(self.injected(region));
        }
        self.inner.write(region, content)
    }

    fn set_hidden(&mut self, region: &str, hidden: bool) -> Result<(), AccessError> {
        self.inner.set_hidden(region, hidden)
    }
}
