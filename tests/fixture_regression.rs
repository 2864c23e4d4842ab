/// Fixture regression tests for the border classifier.
///
/// These tests record the reference scene (one border per tile, painted with the
/// strategy the tile exercises), classify it, and validate the outcome against the
/// scene's classification expectations.
///
/// Run with:   cargo test --test fixture_regression
use ahash::{HashSet, HashSetExt};
use border_fixtures::{
    compare, BorderSpecification, CandidateOutput, Classification, Classifier, Color, NodeId,
    OperationPool, PaintOperation, Rect, Sides, Strategy, Tolerances,
};
use border_fixtures_scenes::{
    build_main_scene, check_classifications, paint_border, SceneRecorder,
};

fn classify_main_scene() -> (Vec<BorderSpecification>, OperationPool, Classification) {
    let mut recorder = SceneRecorder::new();
    let expectations = build_main_scene(&mut recorder);
    let (specs, pool) = recorder.into_parts();
    let classification = Classifier::new().classify(&specs, &pool);

    let failures = check_classifications(&classification, &expectations);
    if !failures.is_empty() {
        let message = format!(
            "{} classification expectation(s) failed:\n{}",
            failures.len(),
            failures.join("\n"),
        );
        panic!("{message}");
    }

    (specs, pool, classification)
}

/// Main regression test: classifies every tile and checks each expectation.
#[test]
fn main_scene_classification_expectations() {
    classify_main_scene();
}

#[test]
fn no_operation_is_claimed_twice() {
    let (_, _, classification) = classify_main_scene();

    let mut seen = HashSet::new();
    for node_match in classification.matches() {
        for index in node_match.result.consumed() {
            assert!(
                seen.insert(index),
                "operation {index} claimed again by node {}",
                node_match.node_id
            );
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let (specs, pool, first) = classify_main_scene();
    let second = Classifier::new().classify(&specs, &pool);
    assert_eq!(first, second);
    assert_eq!(first.descriptors(&specs, &pool), second.descriptors(&specs, &pool));
}

/// Every extracted fixture must verify against the very operations it was extracted from.
#[test]
fn matched_operations_verify_against_their_descriptors() {
    let (specs, pool, classification) = classify_main_scene();
    let descriptors = classification.descriptors(&specs, &pool);
    assert_eq!(descriptors.len(), classification.matches().len());

    for (node_match, descriptor) in classification.matches().iter().zip(&descriptors) {
        let operations: Vec<PaintOperation> = node_match
            .result
            .consumed()
            .into_iter()
            .filter_map(|index| pool.get(index).cloned())
            .collect();
        let report = compare(
            descriptor,
            &CandidateOutput::List(operations),
            &Tolerances::default(),
        );
        assert!(report.passed(), "node {}: {report}", descriptor.node_id);
    }
}

/// A fresh paint of each fixture, stamped with the fixture's scene ids, verifies too.
#[test]
fn repainted_fixtures_verify() {
    let (specs, pool, classification) = classify_main_scene();
    let descriptors = classification.descriptors(&specs, &pool);

    for (node_match, descriptor) in classification.matches().iter().zip(&descriptors) {
        let spec = &specs[node_match.spec_index];
        let strategy = node_match.result.strategy();
        let output: Vec<PaintOperation> = paint_border(spec, strategy)
            .into_iter()
            .map(|operation| operation.with_scene_ids(descriptor.state_ids))
            .collect();

        let report = compare(descriptor, &output.into(), &Tolerances::default());
        assert!(report.passed(), "node {} ({strategy}): {report}", spec.node_id());
    }
}

#[test]
fn strategy_counts_sum_to_the_matches() {
    let (_, _, classification) = classify_main_scene();
    let counts = classification.strategy_counts();
    let total: usize = counts.iter().map(|(_, count)| count).sum();

    assert_eq!(total, classification.matches().len());
    assert_eq!(
        counts.iter().map(|(strategy, _)| *strategy).collect::<Vec<_>>(),
        Strategy::PRIORITY.to_vec()
    );
    assert!(counts.iter().all(|(_, count)| *count > 0));
}

// ── Single-border round trips ────────────────────────────────────────────────

fn single_border(widths: Sides<f32>, color: Color) -> BorderSpecification {
    BorderSpecification::new(
        NodeId(1),
        Rect::new(0.0, 0.0, 100.0, 50.0),
        widths,
        Sides::uniform(color),
    )
    .unwrap()
}

#[test]
fn uniform_border_round_trips_as_a_stroked_rect() {
    let spec = single_border(Sides::uniform(4.0), Color::rgb(1.0, 0.0, 0.0));
    let pool = OperationPool::new(paint_border(&spec, Strategy::StrokedRect));
    let classification = Classifier::new().classify(std::slice::from_ref(&spec), &pool);

    let node_match = &classification.matches()[0];
    assert_eq!(node_match.result.strategy(), Strategy::StrokedRect);
    assert_eq!(node_match.result.consumed().as_slice(), &[0]);
}

#[test]
fn double_border_needs_both_rects() {
    let spec = single_border(Sides::uniform(9.0), Color::BLACK);
    let operations = paint_border(&spec, Strategy::DoubleStroked);

    let both = OperationPool::new(operations.clone());
    let classification = Classifier::new().classify(std::slice::from_ref(&spec), &both);
    assert_eq!(
        classification.matches()[0].result.strategy(),
        Strategy::DoubleStroked
    );

    for lone in operations {
        let pool = OperationPool::new(vec![lone]);
        let classification = Classifier::new().classify(std::slice::from_ref(&spec), &pool);
        assert_eq!(classification.unmatched(), &[0]);
    }
}

#[test]
fn two_sided_border_falls_back_to_per_side_strategies() {
    let spec = single_border(Sides::new(2.0, 0.0, 2.0, 0.0), Color::rgb(0.0, 0.0, 1.0));

    for strategy in [Strategy::DrawLine, Strategy::FilledThinRect] {
        let pool = OperationPool::new(paint_border(&spec, strategy));
        let classification = Classifier::new().classify(std::slice::from_ref(&spec), &pool);
        let node_match = &classification.matches()[0];
        assert_eq!(node_match.result.strategy(), strategy);
        assert_eq!(node_match.result.consumed().len(), 2);
    }
}

#[test]
fn identical_specs_compete_for_one_operation() {
    let spec = single_border(Sides::uniform(4.0), Color::BLACK);
    let pool = OperationPool::new(paint_border(&spec, Strategy::StrokedRect));
    let classification = Classifier::new().classify(&[spec.clone(), spec], &pool);

    assert_eq!(classification.matches().len(), 1);
    assert_eq!(classification.matches()[0].spec_index, 0);
    assert_eq!(classification.unmatched(), &[1]);
}
