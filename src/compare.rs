//! Verification of a painter's output against a fixture.
//!
//! The comparator re-derives the expected operations from the descriptor with the same
//! formulas the matchers use and reports every difference as one line naming the field and
//! both values, e.g. `Rect[0]: 3 vs 2`.

use std::fmt;

use lyon::geom::LineSegment;
use lyon::math::Box2D;
use smallvec::SmallVec;

use crate::descriptor::CanonicalDescriptor;
use crate::expected::{
    double_insets, double_stroke_width, half_band, side_band, side_midline, HalfBand,
};
use crate::geometry::Side;
use crate::matcher::{groove_color_matches, Strategy};
use crate::util::{edge_distance, edges, edges_within, segment_distance, segment_within, within};
use crate::{Color, PaintOperation, Tolerances};

/// What a painter produced for one border: a single operation or a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutput {
    Single(PaintOperation),
    List(Vec<PaintOperation>),
}

impl CandidateOutput {
    pub fn as_slice(&self) -> &[PaintOperation] {
        match self {
            CandidateOutput::Single(operation) => std::slice::from_ref(operation),
            CandidateOutput::List(operations) => operations,
        }
    }
}

impl From<PaintOperation> for CandidateOutput {
    fn from(operation: PaintOperation) -> Self {
        CandidateOutput::Single(operation)
    }
}

impl From<Vec<PaintOperation>> for CandidateOutput {
    fn from(operations: Vec<PaintOperation>) -> Self {
        CandidateOutput::List(operations)
    }
}

/// Result of verifying one candidate output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    strategy: Strategy,
    diffs: Vec<String>,
}

impl ComparisonReport {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// One line per difference, in the order they were found.
    pub fn diffs(&self) -> &[String] {
        &self.diffs
    }

    pub fn passed(&self) -> bool {
        self.diffs.is_empty()
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return write!(f, "PASS ({})", self.strategy);
        }
        write!(f, "FAIL ({})", self.strategy)?;
        for diff in &self.diffs {
            write!(f, "\n  - {diff}")?;
        }
        Ok(())
    }
}

/// Checks `output` against the operations `descriptor` expects for its strategy.
///
/// Never fails; malformed or unexpected output shows up as differences.
pub fn compare(
    descriptor: &CanonicalDescriptor,
    output: &CandidateOutput,
    tolerances: &Tolerances,
) -> ComparisonReport {
    let strategy = descriptor.match_type;
    let operations = output.as_slice();

    let diffs = if operations.is_empty() {
        vec!["Empty computed output".to_string()]
    } else {
        match strategy {
            Strategy::StrokedRect => compare_stroked_rect(descriptor, &operations[0], tolerances),
            Strategy::DoubleStroked => compare_double_stroked(descriptor, operations, tolerances),
            Strategy::DottedLines => {
                compare_side_lines(descriptor, operations, tolerances.dash_geometry, tolerances)
            }
            Strategy::DrawLine => {
                compare_side_lines(descriptor, operations, tolerances.geometry, tolerances)
            }
            Strategy::FilledThinRect => {
                compare_filled_thin_rects(descriptor, operations, tolerances)
            }
            Strategy::GrooveRidge => compare_groove_ridge(descriptor, operations, tolerances),
        }
    };

    ComparisonReport { strategy, diffs }
}

// ── Operation accessors ─────────────────────────────────────────────────────

/// Paint style code of the recorded op: 0 fill, 1 stroke.
fn style_code(operation: &PaintOperation) -> Option<u8> {
    match operation {
        PaintOperation::FilledRect(_) => Some(0),
        PaintOperation::StrokedRect(_) | PaintOperation::Line(_) => Some(1),
        PaintOperation::Unsupported { .. } => None,
    }
}

fn style_name(operation: &PaintOperation) -> String {
    style_code(operation).map_or_else(|| "none".to_string(), |code| code.to_string())
}

fn rect_of(operation: &PaintOperation) -> Option<&Box2D> {
    match operation {
        PaintOperation::FilledRect(op) => Some(&op.rect),
        PaintOperation::StrokedRect(op) => Some(&op.rect),
        _ => None,
    }
}

fn stroke_width_of(operation: &PaintOperation) -> f32 {
    match operation {
        PaintOperation::StrokedRect(op) => op.stroke.width,
        PaintOperation::Line(op) => op.stroke.width,
        _ => 0.0,
    }
}

fn color_of(operation: &PaintOperation) -> Color {
    match operation {
        PaintOperation::FilledRect(op) => op.color,
        PaintOperation::StrokedRect(op) => op.stroke.color,
        PaintOperation::Line(op) => op.stroke.color,
        PaintOperation::Unsupported { .. } => Color::TRANSPARENT,
    }
}

fn radii_of(operation: &PaintOperation) -> &[f32] {
    let radii = match operation {
        PaintOperation::FilledRect(op) => op.radii.as_ref(),
        PaintOperation::StrokedRect(op) => op.radii.as_ref(),
        _ => None,
    };
    radii.map(|radii| radii.values()).unwrap_or(&[])
}

fn format_rect(rect: &Box2D) -> String {
    let [left, top, right, bottom] = edges(rect);
    format!("[{left:.1},{top:.1},{right:.1},{bottom:.1}]")
}

fn format_color(color: &Color) -> String {
    let [r, g, b, a] = color.to_array();
    format!("rgba({r:.3},{g:.3},{b:.3},{a:.3})")
}

fn push_rgb_diffs(
    diffs: &mut Vec<String>,
    label: &str,
    actual: &Color,
    expected: &Color,
    tolerance: f32,
) {
    for (channel, actual, expected) in [
        ("r", actual.r, expected.r),
        ("g", actual.g, expected.g),
        ("b", actual.b, expected.b),
    ] {
        if !within(actual, expected, tolerance) {
            diffs.push(format!("{label} color {channel}: {actual:.3} vs {expected:.3}"));
        }
    }
}

// ── Single stroked rect ─────────────────────────────────────────────────────

fn compare_stroked_rect(
    descriptor: &CanonicalDescriptor,
    operation: &PaintOperation,
    tolerances: &Tolerances,
) -> Vec<String> {
    let mut diffs = Vec::new();
    let tolerance = tolerances.single_rect;
    let width = descriptor.border_widths.top;
    let expected_rect = descriptor.geometry.inset(width / 2.0);
    let expected_radii = descriptor
        .border_radii
        .as_ref()
        .map(|radii| radii.shrunk_for_stroke(width));

    // Without radii either rect kind is accepted, as the matcher does.
    let kind = operation.kind_name();
    let (kind_fits, expected_kind) = match expected_radii {
        Some(_) => (kind == "DrawRRectOp", "DrawRRectOp"),
        None => (matches!(kind, "DrawRectOp" | "DrawRRectOp"), "DrawRectOp"),
    };
    if !kind_fits {
        diffs.push(format!("Type: {kind} vs {expected_kind}"));
    }

    let actual_edges = rect_of(operation).map_or([0.0; 4], edges);
    let expected_edges = edges(&expected_rect);
    for (index, (actual, expected)) in actual_edges.into_iter().zip(expected_edges).enumerate() {
        if !within(actual, expected, tolerance) {
            diffs.push(format!("Rect[{index}]: {actual} vs {expected}"));
        }
    }

    if style_code(operation) != Some(1) {
        diffs.push(format!("Style: {} vs 1", style_name(operation)));
    }

    let stroke_width = stroke_width_of(operation);
    if !within(stroke_width, width, tolerance) {
        diffs.push(format!("StrokeWidth: {stroke_width} vs {width}"));
    }

    let actual_color = color_of(operation).to_array();
    let expected_color = descriptor.border_colors.top.to_array();
    for (channel, (actual, expected)) in ["r", "g", "b", "a"]
        .into_iter()
        .zip(actual_color.into_iter().zip(expected_color))
    {
        if !within(actual, expected, tolerances.color) {
            diffs.push(format!("Color {channel}: {actual} vs {expected}"));
        }
    }

    if let Some(expected_radii) = expected_radii {
        let actual_radii = radii_of(operation);
        if actual_radii.len() != expected_radii.len() {
            diffs.push(format!(
                "Radii count: {} vs {}",
                actual_radii.len(),
                expected_radii.len()
            ));
        } else {
            let pairs = actual_radii.iter().zip(expected_radii.values());
            for (index, (actual, expected)) in pairs.enumerate() {
                if !within(*actual, *expected, tolerance) {
                    diffs.push(format!("Radii[{index}]: {actual} vs {expected}"));
                }
            }
        }
    }

    // Painters that do not report scene ids are not checked against them.
    let expected_ids = descriptor.state_ids;
    if let Some(actual_ids) = operation.recorded_scene_ids() {
        for (name, actual, expected) in [
            ("transform_id", actual_ids.transform_id, expected_ids.transform_id),
            ("clip_id", actual_ids.clip_id, expected_ids.clip_id),
            ("effect_id", actual_ids.effect_id, expected_ids.effect_id),
        ] {
            if actual != expected {
                diffs.push(format!("{name}: {actual} vs {expected}"));
            }
        }
    }

    diffs
}

// ── Double stroked rects ────────────────────────────────────────────────────

fn compare_double_stroked(
    descriptor: &CanonicalDescriptor,
    operations: &[PaintOperation],
    tolerances: &Tolerances,
) -> Vec<String> {
    if operations.len() < 2 {
        return vec![format!(
            "Expected 2 ops for double border, got {}",
            operations.len()
        )];
    }

    let width = descriptor.border_widths.top;
    let color = descriptor.border_colors.top;
    let stroke_width = double_stroke_width(width);
    let (outer_inset, inner_inset) = double_insets(width);
    let outer_rect = descriptor.geometry.inset(outer_inset);
    let inner_rect = descriptor.geometry.inset(inner_inset);

    let mut outer_found = false;
    let mut inner_found = false;
    for operation in operations {
        let PaintOperation::StrokedRect(op) = operation else {
            continue;
        };
        if !within(op.stroke.width, stroke_width, tolerances.line_stroke_width)
            || !op.stroke.color.rgb_approx_eq(&color, tolerances.side_color)
        {
            continue;
        }
        if !outer_found && edges_within(&op.rect, &outer_rect, tolerances.geometry) {
            outer_found = true;
            continue;
        }
        if !inner_found && edges_within(&op.rect, &inner_rect, tolerances.geometry) {
            inner_found = true;
        }
    }

    let mut diffs = Vec::new();
    if !outer_found {
        diffs.push(format!("Outer rect not found (expected inset {outer_inset})"));
    }
    if !inner_found {
        diffs.push(format!("Inner rect not found (expected inset {inner_inset})"));
    }
    diffs
}

// ── Per-side lines ──────────────────────────────────────────────────────────

fn painted_sides(descriptor: &CanonicalDescriptor) -> SmallVec<[Side; 4]> {
    Side::ALL
        .into_iter()
        .filter(|side| descriptor.border_widths[*side] > 0.0)
        .collect()
}

/// Index into `slots` of the unclaimed slot nearest to the candidate, among those that fit.
fn nearest_slot<T>(
    slots: &[T],
    claimed: &[bool],
    mut score: impl FnMut(&T) -> Option<f32>,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, slot) in slots.iter().enumerate() {
        if claimed[index] {
            continue;
        }
        let Some(deviation) = score(slot) else {
            continue;
        };
        if best.map_or(true, |(_, best_deviation)| deviation < best_deviation) {
            best = Some((index, deviation));
        }
    }
    best.map(|(index, _)| index)
}

fn compare_side_lines(
    descriptor: &CanonicalDescriptor,
    operations: &[PaintOperation],
    geometry_tolerance: f32,
    tolerances: &Tolerances,
) -> Vec<String> {
    let mut diffs = Vec::new();
    let sides = painted_sides(descriptor);
    let expected: SmallVec<[(Side, LineSegment<f32>, f32); 4]> = sides
        .iter()
        .map(|side| {
            let width = descriptor.border_widths[*side];
            (*side, side_midline(&descriptor.geometry, *side, width), width)
        })
        .collect();

    if operations.len() != expected.len() {
        diffs.push(format!("Op count: {} vs {}", operations.len(), expected.len()));
    }

    let mut claimed = vec![false; expected.len()];
    for operation in operations {
        let PaintOperation::Line(op) = operation else {
            diffs.push(format!("Unexpected type: {}", operation.kind_name()));
            continue;
        };

        let slot = nearest_slot(&expected, &claimed, |(_, midline, _)| {
            segment_within(&op.segment, midline, geometry_tolerance)
                .then(|| segment_distance(&op.segment, midline))
        });
        let Some(slot) = slot else {
            let (from, to) = (op.segment.from, op.segment.to);
            diffs.push(format!(
                "Unmatched line: ({:.1},{:.1})->({:.1},{:.1})",
                from.x, from.y, to.x, to.y
            ));
            continue;
        };
        claimed[slot] = true;

        let (side, _, width) = expected[slot];
        if !within(op.stroke.width, width, tolerances.line_stroke_width) {
            diffs.push(format!("{side} strokeWidth: {} vs {width}", op.stroke.width));
        }
        push_rgb_diffs(
            &mut diffs,
            side.as_str(),
            &op.stroke.color,
            &descriptor.border_colors[side],
            tolerances.side_color,
        );
    }

    diffs
}

// ── Per-side filled rects ───────────────────────────────────────────────────

fn compare_filled_thin_rects(
    descriptor: &CanonicalDescriptor,
    operations: &[PaintOperation],
    tolerances: &Tolerances,
) -> Vec<String> {
    let mut diffs = Vec::new();
    let expected: SmallVec<[(Side, Box2D); 4]> = painted_sides(descriptor)
        .into_iter()
        .map(|side| {
            let width = descriptor.border_widths[side];
            (side, side_band(&descriptor.geometry, side, width))
        })
        .collect();

    if operations.len() != expected.len() {
        diffs.push(format!("Op count: {} vs {}", operations.len(), expected.len()));
    }

    let mut claimed = vec![false; expected.len()];
    for operation in operations {
        if operation.kind_name() != "DrawRectOp" {
            diffs.push(format!("Unexpected type: {}", operation.kind_name()));
            continue;
        }
        let Some(rect) = rect_of(operation) else {
            continue;
        };
        if style_code(operation) != Some(0) {
            diffs.push(format!("Expected filled style, got {}", style_name(operation)));
        }

        let slot = nearest_slot(&expected, &claimed, |(_, band)| {
            edges_within(rect, band, tolerances.geometry).then(|| edge_distance(rect, band))
        });
        let Some(slot) = slot else {
            diffs.push(format!("Unmatched rect: {}", format_rect(rect)));
            continue;
        };
        claimed[slot] = true;

        let side = expected[slot].0;
        push_rgb_diffs(
            &mut diffs,
            side.as_str(),
            &color_of(operation),
            &descriptor.border_colors[side],
            tolerances.side_color,
        );
    }

    diffs
}

// ── Groove / ridge half bands ───────────────────────────────────────────────

fn compare_groove_ridge(
    descriptor: &CanonicalDescriptor,
    operations: &[PaintOperation],
    tolerances: &Tolerances,
) -> Vec<String> {
    let min_parts = tolerances.groove_ridge_min_parts.max(1);
    if operations.len() < min_parts {
        return vec![format!(
            "Expected at least {min_parts} ops for groove/ridge, got {}",
            operations.len()
        )];
    }

    let mut diffs = Vec::new();
    let width = descriptor.border_widths.top;
    let base = descriptor.border_colors.top;
    let slots: SmallVec<[Box2D; 8]> = HalfBand::ALL
        .iter()
        .map(|slot| half_band(&descriptor.geometry, *slot, width))
        .collect();

    let mut claimed = [false; 8];
    for operation in operations {
        let PaintOperation::FilledRect(op) = operation else {
            match rect_of(operation) {
                Some(_) => diffs.push(format!(
                    "Expected filled style, got {}",
                    style_name(operation)
                )),
                None => diffs.push(format!("Unexpected type: {}", operation.kind_name())),
            }
            continue;
        };

        let slot = nearest_slot(&slots, &claimed, |band| {
            edges_within(&op.rect, band, tolerances.geometry).then(|| edge_distance(&op.rect, band))
        });
        let Some(slot) = slot else {
            diffs.push(format!("Unmatched rect: {}", format_rect(&op.rect)));
            continue;
        };
        claimed[slot] = true;

        if !groove_color_matches(&op.color, &base, tolerances.color) {
            let role = HalfBand::ALL[slot].role();
            let before = diffs.len();
            push_rgb_diffs(&mut diffs, &role, &op.color, &base, tolerances.color);
            if !within(op.color.a, base.a, tolerances.color) {
                diffs.push(format!("{role} color a: {:.3} vs {:.3}", op.color.a, base.a));
            }
            if diffs.len() == before {
                diffs.push(format!(
                    "{role} color: {} not a groove/ridge shade of {}",
                    format_color(&op.color),
                    format_color(&base)
                ));
            }
        }
    }

    let matched = claimed.iter().filter(|claimed| **claimed).count();
    if matched < min_parts {
        diffs.push(format!(
            "Half bands matched: {matched} vs at least {min_parts}"
        ));
    }

    diffs
}
