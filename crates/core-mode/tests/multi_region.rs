mod common;

use common::{registry, two_region_doc, PendingFlag};
use core_document::DocumentAccess;
use core_mode::SourceModeController;
use pretty_assertions::assert_eq;

#[test]
fn entry_captures_one_snapshot_per_region_and_clears_both() {
    let mut doc = two_region_doc();
    let mut commands = registry();
    let pending = PendingFlag::new(false);
    let mut ctrl = SourceModeController::new(true);

    ctrl.toggle(&mut doc, &mut commands, &pending).unwrap();
    assert_eq!(ctrl.snapshot_text("main"), Some("x"));
    assert_eq!(ctrl.snapshot_text("aside"), Some("y"));
    for name in ["main", "aside"] {
        // A region with a live snapshot never also has structured content.
        assert_eq!(doc.read(name).unwrap(), "");
        assert!(doc.region(name).unwrap().is_hidden());
    }
}

#[test]
fn exit_restores_edited_values_and_removes_both_snapshots() {
    let mut doc = two_region_doc();
    let mut commands = registry();
    let pending = PendingFlag::new(false);
    let mut ctrl = SourceModeController::new(true);

    ctrl.toggle(&mut doc, &mut commands, &pending).unwrap();
    ctrl.update_snapshot("main", "x edited").unwrap();
    // "aside" is left untouched on purpose.

    ctrl.toggle(&mut doc, &mut commands, &pending).unwrap();
    assert_eq!(doc.read("main").unwrap(), "x edited");
    assert_eq!(doc.read("aside").unwrap(), "y");
    assert!(ctrl.snapshot_text("main").is_none());
    assert!(ctrl.snapshot_text("aside").is_none());
    assert!(!doc.region("main").unwrap().is_hidden());
    assert!(!doc.region("aside").unwrap().is_hidden());
}

#[test]
fn updating_an_uncaptured_region_fails_even_in_source_mode() {
    let mut doc = two_region_doc();
    let mut commands = registry();
    let pending = PendingFlag::new(false);
    let mut ctrl = SourceModeController::new(true);

    ctrl.toggle(&mut doc, &mut commands, &pending).unwrap();
    assert!(ctrl.update_snapshot("footer", "z").is_err());
    // The miss leaves captured regions untouched.
    assert_eq!(ctrl.snapshot_text("main"), Some("x"));
}
