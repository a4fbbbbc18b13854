use super::*;
use crate::{
    foundation::core::{Canvas, centroid},
    foundation::rng::Rng64,
    scene::model::Filters,
};

fn doc() -> SceneDocument {
    let mut doc = SceneDocument::new(
        Canvas::new(400, 300, "#000000").unwrap(),
        vec![
            PaletteColor::new("a", "#ff0000"),
            PaletteColor::new("b", "#00ff00"),
            PaletteColor::new("c", "#0000ff"),
        ],
        Filters::default(),
    )
    .unwrap();
    doc.shapes.push(
        Shape::new(
            "s0",
            vec![
                Point::new(10.0, 10.0),
                Point::new(60.0, 5.0),
                Point::new(50.0, 70.0),
            ],
            0,
        )
        .unwrap(),
    );
    doc.shapes.push(
        Shape::new(
            "s1",
            vec![
                Point::new(-40.0, 100.0),
                Point::new(200.0, 120.0),
                Point::new(420.0, 330.0),
                Point::new(100.0, 250.0),
            ],
            2,
        )
        .unwrap(),
    );
    doc
}

fn assert_centroids_consistent(doc: &SceneDocument) {
    for s in &doc.shapes {
        let c = centroid(&s.points);
        assert!(
            (c.x - s.center.x).abs() < 1e-9 && (c.y - s.center.y).abs() < 1e-9,
            "shape {} center {:?} != centroid {:?}",
            s.id,
            s.center,
            c
        );
    }
}

#[test]
fn translate_moves_points_by_delta_from_stored_center() {
    let mut d = doc();
    let before = d.shapes[0].points.clone();
    let old_center = d.shapes[0].center;
    d.translate_shape_center("s0", Point::new(200.0, 150.0))
        .unwrap();
    let delta = Point::new(200.0, 150.0) - old_center;
    for (a, b) in before.iter().zip(&d.shapes[0].points) {
        assert!(((*a + delta) - *b).hypot() < 1e-9);
    }
    assert!((d.shapes[0].center - Point::new(200.0, 150.0)).hypot() < 1e-9);
    assert_centroids_consistent(&d);
}

#[test]
fn centroid_invariant_holds_across_edit_sequences() {
    let mut d = doc();
    let mut rng = Rng64::new(5);
    for i in 0..200 {
        let id = if i % 2 == 0 { "s0" } else { "s1" };
        let target = Point::new(rng.range_f64(-500.0, 900.0), rng.range_f64(-500.0, 900.0));
        if i % 3 == 0 {
            let len = d.shape(id).unwrap().points.len();
            d.move_vertex(id, rng.index(len), target).unwrap();
        } else {
            d.translate_shape_center(id, target).unwrap();
        }
        assert_centroids_consistent(&d);
    }
}

#[test]
fn invalid_targets_are_reported_and_leave_document_untouched() {
    let mut d = doc();
    let before = d.clone();

    let err = d
        .translate_shape_center("missing", Point::new(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, MeshError::UnknownShape(ref id) if id == "missing"));

    let err = d.move_vertex("s0", 3, Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(
        err,
        MeshError::VertexOutOfRange {
            index: 3,
            len: 3,
            ..
        }
    ));

    assert!(d.rotate_shape("missing", 10.0).is_err());
    assert!(d.remove_color("missing").is_err());
    assert_eq!(d, before);
}

#[test]
fn non_finite_targets_are_rejected() {
    let mut d = doc();
    let before = d.clone();

    let err = d
        .translate_shape_center("s0", Point::new(f64::NAN, 0.0))
        .unwrap_err();
    assert!(matches!(err, MeshError::Validation(_)));
    assert!(d.move_vertex("s1", 0, Point::new(0.0, f64::INFINITY)).is_err());
    assert_eq!(d, before);

    let back = SceneDocument::from_json(&d.to_json().unwrap()).unwrap();
    assert_eq!(back, d);
}

#[test]
fn rotation_is_a_hint_only() {
    let mut d = doc();
    let points = d.shapes[0].points.clone();
    d.rotate_shape("s0", 30.0).unwrap();
    assert_eq!(d.shapes[0].rotation, Some(30.0));
    assert_eq!(d.shapes[0].points, points);

    d.rotate_all(-45.0);
    assert!(d.shapes.iter().all(|s| s.rotation == Some(-45.0)));
}

#[test]
fn overrides_are_range_checked() {
    let mut d = doc();
    d.set_shape_opacity("s0", Some(50.0)).unwrap();
    d.set_shape_blur("s0", Some(12.0)).unwrap();
    assert_eq!(d.shapes[0].opacity, Some(50.0));
    assert_eq!(d.shapes[0].blur, Some(12.0));
    assert!(d.set_shape_opacity("s0", Some(101.0)).is_err());
    assert!(d.set_shape_blur("s0", Some(-1.0)).is_err());
    d.set_shape_blur("s0", None).unwrap();
    assert_eq!(d.shapes[0].blur, None);
}

#[test]
fn palette_operations_keep_ids_unique() {
    let mut d = doc();
    let id = d.add_color("#ffffff").unwrap();
    assert_eq!(d.palette.len(), 4);
    assert!(d.add_color("bogus").is_err());

    let removed = d.remove_color("a").unwrap();
    assert_eq!(removed.value, "#ff0000");
    let id2 = d.add_color("#123456").unwrap();
    assert_ne!(id, id2);

    d.set_palette_size(8);
    assert_eq!(d.palette.len(), 8);
    d.validate().unwrap();

    d.set_palette_size(2);
    assert_eq!(d.palette.len(), 2);
}

#[test]
fn shuffle_palette_keeps_shape_indices() {
    let mut d = doc();
    d.set_palette_size(6);
    let indices: Vec<_> = d.shapes.iter().map(|s| s.fill_index).collect();
    let mut ids: Vec<_> = d.palette.iter().map(|c| c.id.clone()).collect();
    d.shuffle_palette(&mut Rng64::new(3));
    let mut shuffled: Vec<_> = d.palette.iter().map(|c| c.id.clone()).collect();
    assert_eq!(
        d.shapes.iter().map(|s| s.fill_index).collect::<Vec<_>>(),
        indices
    );
    ids.sort();
    shuffled.sort();
    assert_eq!(ids, shuffled);
}

#[test]
fn randomize_clamps_into_margin_and_recomputes_centers() {
    let mut rng = Rng64::new(11);
    for _ in 0..20 {
        let mut d = doc();
        d.randomize(&mut rng);
        let margin = 300.0 * RANDOMIZE_MARGIN;
        for s in &d.shapes {
            for p in &s.points {
                assert!(p.x >= margin && p.x <= 400.0 - margin, "x={}", p.x);
                assert!(p.y >= margin && p.y <= 300.0 - margin, "y={}", p.y);
            }
        }
        assert_centroids_consistent(&d);
    }
}

#[test]
fn regenerate_replaces_shapes() {
    let mut d = doc();
    d.canvas = Canvas::new(1920, 1080, "#000000").unwrap();
    d.regenerate(&mut Rng64::new(42));
    assert!(d.shapes.len() >= 3);
    assert!(d.shape("s0").is_none());
    assert!(d.shapes.iter().all(|s| (10..=15).contains(&s.points.len())));
    assert!(d.shapes.iter().all(|s| s.fill_index < d.palette.len()));
}
