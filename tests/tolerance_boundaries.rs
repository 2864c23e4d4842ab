/// Tolerance boundary tests: a deviation of exactly the tolerance matches, anything past it
/// does not. Both the classifier and the comparator are checked.
use border_fixtures::{
    compare, BorderSpecification, CanonicalDescriptor, Classifier, Color, NodeId, OperationPool,
    PaintOperation, Rect, SceneIds, Sides, Strategy, Stroke, Tolerances,
};
use lyon::math::{point, Box2D};

fn spec(color: Color) -> BorderSpecification {
    BorderSpecification::new(
        NodeId(1),
        Rect::new(0.0, 0.0, 100.0, 50.0),
        Sides::uniform(4.0),
        Sides::uniform(color),
    )
    .unwrap()
}

/// The stroked rect for `spec`, with its left edge shifted by `offset`.
fn shifted_rect(offset: f32, color: Color) -> PaintOperation {
    PaintOperation::stroked_rect(
        Box2D::new(point(2.0 + offset, 2.0), point(98.0, 48.0)),
        Stroke::new(4.0, color),
    )
}

fn matched_strategy(
    classifier: &Classifier,
    spec: &BorderSpecification,
    operation: PaintOperation,
) -> Option<Strategy> {
    let pool = OperationPool::new(vec![operation]);
    classifier
        .classify(std::slice::from_ref(spec), &pool)
        .matches()
        .first()
        .map(|node_match| node_match.result.strategy())
}

#[test]
fn geometry_tolerance_is_inclusive() {
    let classifier = Classifier::new();
    let spec = spec(Color::BLACK);

    assert_eq!(
        matched_strategy(&classifier, &spec, shifted_rect(2.0, Color::BLACK)),
        Some(Strategy::StrokedRect)
    );
    assert_eq!(
        matched_strategy(&classifier, &spec, shifted_rect(2.25, Color::BLACK)),
        None
    );
}

#[test]
fn color_tolerance_is_inclusive() {
    let classifier = Classifier::new().with_tolerances(Tolerances::default().with_color(0.25));
    let spec = spec(Color::rgb(1.0, 0.0, 0.0));

    assert_eq!(
        matched_strategy(&classifier, &spec, shifted_rect(0.0, Color::rgb(0.75, 0.0, 0.0))),
        Some(Strategy::StrokedRect)
    );
    assert_eq!(
        matched_strategy(&classifier, &spec, shifted_rect(0.0, Color::rgb(0.5, 0.0, 0.0))),
        None
    );
}

#[test]
fn stroke_width_tolerance_is_inclusive() {
    let classifier = Classifier::new();
    let spec = spec(Color::BLACK);
    let with_width = |width: f32| {
        PaintOperation::stroked_rect(
            Box2D::new(point(2.0, 2.0), point(98.0, 48.0)),
            Stroke::new(width, Color::BLACK),
        )
    };

    assert!(matched_strategy(&classifier, &spec, with_width(4.5)).is_some());
    assert!(matched_strategy(&classifier, &spec, with_width(4.75)).is_none());
}

// ── Comparator ──────────────────────────────────────────────────────────────

fn fixture(strategy: Strategy, widths: Sides<f32>, color: Color) -> CanonicalDescriptor {
    CanonicalDescriptor {
        geometry: Rect::new(0.0, 0.0, 100.0, 50.0),
        border_widths: widths,
        border_colors: Sides::uniform(color),
        border_radii: None,
        border_styles: None,
        state_ids: SceneIds::default(),
        match_type: strategy,
        node_id: NodeId(1),
    }
}

fn compared(
    descriptor: &CanonicalDescriptor,
    output: Vec<PaintOperation>,
    tolerances: &Tolerances,
) -> Vec<String> {
    compare(descriptor, &output.into(), tolerances).diffs().to_vec()
}

fn side_line(y: f32, color: Color) -> PaintOperation {
    PaintOperation::line(point(0.0, y), point(100.0, y), Stroke::new(2.0, color))
}

#[test]
fn comparator_rect_tolerance_is_inclusive() {
    let descriptor = fixture(Strategy::StrokedRect, Sides::uniform(4.0), Color::BLACK);
    let tolerances = Tolerances::default();

    assert!(compared(&descriptor, vec![shifted_rect(0.5, Color::BLACK)], &tolerances).is_empty());
    assert_eq!(
        compared(&descriptor, vec![shifted_rect(0.75, Color::BLACK)], &tolerances),
        vec!["Rect[0]: 2.75 vs 2"]
    );
}

#[test]
fn comparator_stroke_width_tolerance_is_inclusive() {
    let descriptor = fixture(Strategy::StrokedRect, Sides::uniform(4.0), Color::BLACK);
    let tolerances = Tolerances::default();
    let with_width = |width: f32| {
        vec![PaintOperation::stroked_rect(
            Box2D::new(point(2.0, 2.0), point(98.0, 48.0)),
            Stroke::new(width, Color::BLACK),
        )]
    };

    assert!(compared(&descriptor, with_width(4.5), &tolerances).is_empty());
    assert_eq!(
        compared(&descriptor, with_width(4.75), &tolerances),
        vec!["StrokeWidth: 4.75 vs 4"]
    );
}

#[test]
fn comparator_color_tolerance_is_inclusive() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let descriptor = fixture(Strategy::StrokedRect, Sides::uniform(4.0), red);
    let tolerances = Tolerances::default().with_color(0.25);

    let exact = shifted_rect(0.0, Color::rgb(0.75, 0.0, 0.0));
    assert!(compared(&descriptor, vec![exact], &tolerances).is_empty());

    let past = shifted_rect(0.0, Color::rgb(0.5, 0.0, 0.0));
    assert_eq!(
        compared(&descriptor, vec![past], &tolerances),
        vec!["Color r: 0.5 vs 1"]
    );
}

#[test]
fn comparator_side_color_tolerance_is_inclusive() {
    let descriptor = fixture(
        Strategy::DrawLine,
        Sides::new(2.0, 0.0, 2.0, 0.0),
        Color::BLACK,
    );
    // Only the per-side tolerance is widened; whole-border color stays at its default.
    let tolerances = Tolerances {
        side_color: 0.25,
        ..Tolerances::default()
    };

    let exact = vec![
        side_line(1.0, Color::rgb(0.25, 0.0, 0.0)),
        side_line(49.0, Color::rgb(0.0, 0.25, 0.0)),
    ];
    assert!(compared(&descriptor, exact, &tolerances).is_empty());

    let past = vec![
        side_line(1.0, Color::rgb(0.5, 0.0, 0.0)),
        side_line(49.0, Color::BLACK),
    ];
    assert_eq!(
        compared(&descriptor, past, &tolerances),
        vec!["top color r: 0.500 vs 0.000"]
    );
}

#[test]
fn comparator_line_geometry_tolerance_is_inclusive() {
    let descriptor = fixture(
        Strategy::DrawLine,
        Sides::new(2.0, 0.0, 2.0, 0.0),
        Color::BLACK,
    );
    let tolerances = Tolerances::default();

    let exact = vec![side_line(3.0, Color::BLACK), side_line(49.0, Color::BLACK)];
    assert!(compared(&descriptor, exact, &tolerances).is_empty());

    let past = vec![side_line(3.25, Color::BLACK), side_line(49.0, Color::BLACK)];
    let diffs = compared(&descriptor, past, &tolerances);
    assert_eq!(diffs.len(), 1);
    assert!(diffs[0].starts_with("Unmatched line"));
}
