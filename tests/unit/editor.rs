use super::*;
use crate::foundation::{core::Point, error::MeshError};

fn editor() -> Editor {
    Editor::from_preset("ocean", EditorOpts::default()).unwrap()
}

#[test]
fn preset_editor_starts_with_shapes_and_no_history() {
    let ed = editor();
    assert!(ed.doc().shapes.len() >= 3);
    assert_eq!(ed.undo_len(), 0);
    assert_eq!(ed.redo_len(), 0);
}

#[test]
fn same_seed_gives_same_document() {
    assert_eq!(editor().doc(), editor().doc());
}

#[test]
fn successful_edit_commits_and_undo_redo_walk_history() {
    let mut ed = editor();
    let original = ed.doc().clone();
    let id = original.shapes[0].id.clone();
    let target = Point::new(100.0, 100.0);

    ed.edit(|d| d.translate_shape_center(&id, target)).unwrap();
    let moved = ed.doc().clone();
    assert_ne!(moved, original);
    assert_eq!(ed.undo_len(), 1);

    assert!(ed.undo());
    assert_eq!(ed.doc(), &original);
    assert!(!ed.undo());

    assert!(ed.redo());
    assert_eq!(ed.doc(), &moved);
    assert!(!ed.redo());
}

#[test]
fn failed_edit_leaves_document_and_history_untouched() {
    let mut ed = editor();
    let before = ed.doc().clone();
    let err = ed
        .edit(|d| {
            d.rotate_all(30.0);
            d.move_vertex("missing", 0, Point::ORIGIN)
        })
        .unwrap_err();
    assert!(matches!(err, MeshError::UnknownShape(_)));
    assert_eq!(ed.doc(), &before);
    assert_eq!(ed.undo_len(), 0);
}

#[test]
fn no_op_edit_records_nothing() {
    let mut ed = editor();
    ed.edit(|_| Ok(())).unwrap();
    assert_eq!(ed.undo_len(), 0);
}

#[test]
fn new_commit_clears_redo() {
    let mut ed = editor();
    ed.randomize();
    ed.undo();
    assert_eq!(ed.redo_len(), 1);
    ed.edit(|d| {
        d.rotate_all(10.0);
        Ok(())
    })
    .unwrap();
    assert_eq!(ed.redo_len(), 0);
}

#[test]
fn history_is_bounded() {
    let mut ed = Editor::from_preset(
        "ocean",
        EditorOpts {
            history_capacity: 3,
            ..EditorOpts::default()
        },
    )
    .unwrap();
    for i in 0..10 {
        ed.edit(|d| {
            d.rotate_all(i as f64 + 1.0);
            Ok(())
        })
        .unwrap();
    }
    assert_eq!(ed.undo_len(), 3);
    while ed.undo() {}
    assert_eq!(ed.doc().shapes[0].rotation, Some(7.0));
}

#[test]
fn palette_resize_regenerates_in_one_step() {
    let mut ed = editor();
    ed.set_palette_size(6);
    assert_eq!(ed.doc().palette.len(), 6);
    assert!(ed.doc().shapes.iter().all(|s| s.fill_index < 6));
    assert_eq!(ed.undo_len(), 1);
    ed.undo();
    assert_eq!(ed.doc().palette.len(), 4);
}

#[test]
fn preview_caches_and_export_encodes() {
    let mut ed = editor();
    let mut surface = Surface::new(48, 27).unwrap();
    assert_eq!(ed.preview(&mut surface), PreviewOutcome::Drawn);
    assert_eq!(ed.preview(&mut surface), PreviewOutcome::Cached);

    ed.regenerate();
    assert_eq!(ed.preview(&mut surface), PreviewOutcome::Drawn);
    assert_eq!(surface.draw_count(), 2);

    let png = ed
        .export(Some(Size::new(64, 36)), ExportFormat::Png)
        .unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (64, 36));
}
