use border_fixtures::{
    BorderSpecification, BorderStyle, Color, CornerRadii, NodeId, OperationPool, PaintOperation,
    Rect, SceneIds, Sides, Strategy,
};
use lyon::math::{point, Box2D};

use crate::expectations::ClassificationExpectation;
use crate::painter::paint_border;

// ── Grid layout constants ────────────────────────────────────────────────────

const TILE_SIZE: u32 = 120;
const COLUMNS: u32 = 4;
const ROWS: u32 = 4;

pub const CANVAS_WIDTH: u32 = TILE_SIZE * COLUMNS;
pub const CANVAS_HEIGHT: u32 = TILE_SIZE * ROWS;

const RED: Color = Color::rgb(1.0, 0.0, 0.0);
const GREEN: Color = Color::rgb(0.0, 0.5, 0.0);
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const BROWN: Color = Color::rgb(0.6, 0.4, 0.2);
const SLATE: Color = Color::rgb(0.2, 0.4, 0.6);

/// Returns the pixel origin (top-left corner) of tile number `n` (1-based).
fn tile_origin(tile_number: u32) -> (f32, f32) {
    let index = tile_number - 1;
    let column = index % COLUMNS;
    let row = index / COLUMNS;
    ((column * TILE_SIZE) as f32, (row * TILE_SIZE) as f32)
}

/// The border box every tile paints into: 100×60, inset 10px into the tile.
fn tile_box(tile_number: u32) -> Rect {
    let (ox, oy) = tile_origin(tile_number);
    Rect::new(ox + 10.0, oy + 10.0, 100.0, 60.0)
}

fn tile_node(tile_number: u32) -> NodeId {
    NodeId(100 + tile_number as i64)
}

fn tile_ids(tile_number: u32) -> SceneIds {
    SceneIds::new(tile_number as i64, 1, 0)
}

fn tile_spec(tile_number: u32, widths: Sides<f32>, colors: Sides<Color>) -> BorderSpecification {
    BorderSpecification::new(tile_node(tile_number), tile_box(tile_number), widths, colors)
        .expect("tile borders are valid")
}

/// Collects the layout side and the paint side of a scene.
///
/// Specifications and operations are recorded in tile order, the way a backend records a
/// document's border paints in tree order.
#[derive(Debug, Default)]
pub struct SceneRecorder {
    specs: Vec<BorderSpecification>,
    operations: Vec<PaintOperation>,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a specification and returns its position.
    pub fn add_border(&mut self, spec: BorderSpecification) -> usize {
        self.specs.push(spec);
        self.specs.len() - 1
    }

    /// Records operations under `ids`.
    pub fn paint(&mut self, operations: impl IntoIterator<Item = PaintOperation>, ids: SceneIds) {
        self.operations
            .extend(operations.into_iter().map(|operation| operation.with_scene_ids(ids)));
    }

    pub fn specs(&self) -> &[BorderSpecification] {
        &self.specs
    }

    pub fn operations(&self) -> &[PaintOperation] {
        &self.operations
    }

    pub fn into_parts(self) -> (Vec<BorderSpecification>, OperationPool) {
        (self.specs, OperationPool::new(self.operations))
    }
}

/// Builds the entire main test scene on the given recorder and returns a list
/// of classification expectations to validate a run against.
pub fn build_main_scene(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let mut expectations: Vec<ClassificationExpectation> = Vec::new();

    expectations.extend(tile_01_stroked_rect_solid(recorder));
    expectations.extend(tile_02_stroked_rect_rounded(recorder));
    expectations.extend(tile_03_double_border(recorder));
    expectations.extend(tile_04_dotted_border(recorder));
    expectations.extend(tile_05_groove_border(recorder));
    expectations.extend(tile_06_ridge_with_merged_corners(recorder));
    expectations.extend(tile_07_top_bottom_lines(recorder));
    expectations.extend(tile_08_left_right_bands(recorder));
    expectations.extend(tile_09_mixed_width_bands(recorder));
    expectations.extend(tile_10_uniform_lines(recorder));
    expectations.extend(tile_11_translucent_side_lines(recorder));
    expectations.extend(tile_12_starved_duplicate(recorder));
    expectations.extend(tile_13_wrong_color(recorder));
    expectations.extend(tile_14_band_among_noise(recorder));
    expectations.extend(tile_15_zero_radius_rounded_rect(recorder));
    expectations.extend(tile_16_double_border_inner_first(recorder));

    expectations
}

// ── Section A: Whole-border strategies ───────────────────────────────────────

fn tile_01_stroked_rect_solid(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(1, Sides::uniform(4.0), Sides::uniform(RED));
    recorder.paint(paint_border(&spec, Strategy::StrokedRect), tile_ids(1));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(1), Strategy::StrokedRect, "t01")
            .with_op_count(1),
    ]
}

fn tile_02_stroked_rect_rounded(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let radii = CornerRadii::new([10.0; 8]).expect("eight radii");
    let spec = tile_spec(2, Sides::uniform(4.0), Sides::uniform(BLUE)).with_radii(radii);
    recorder.paint(paint_border(&spec, Strategy::StrokedRect), tile_ids(2));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(2), Strategy::StrokedRect, "t02")
            .with_op_count(1),
    ]
}

fn tile_03_double_border(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(3, Sides::uniform(9.0), Sides::uniform(Color::BLACK))
        .with_styles(Sides::uniform(BorderStyle::Double));
    recorder.paint(paint_border(&spec, Strategy::DoubleStroked), tile_ids(3));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(3), Strategy::DoubleStroked, "t03")
            .with_op_count(2),
    ]
}

fn tile_04_dotted_border(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(4, Sides::uniform(2.0), Sides::uniform(GREEN))
        .with_styles(Sides::uniform(BorderStyle::Dotted));
    recorder.paint(paint_border(&spec, Strategy::DottedLines), tile_ids(4));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(4), Strategy::DottedLines, "t04")
            .with_op_count(4),
    ]
}

fn tile_05_groove_border(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(5, Sides::uniform(6.0), Sides::uniform(BROWN))
        .with_styles(Sides::uniform(BorderStyle::Groove));
    recorder.paint(paint_border(&spec, Strategy::GrooveRidge), tile_ids(5));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(5), Strategy::GrooveRidge, "t05")
            .with_op_count(8),
    ]
}

fn tile_06_ridge_with_merged_corners(
    recorder: &mut SceneRecorder,
) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(6, Sides::uniform(6.0), Sides::uniform(BROWN))
        .with_styles(Sides::uniform(BorderStyle::Ridge));
    // Drop right inner, bottom outer and left inner; five strips remain.
    let strips = paint_border(&spec, Strategy::GrooveRidge)
        .into_iter()
        .enumerate()
        .filter(|(slot, _)| ![3, 4, 7].contains(slot))
        .map(|(_, operation)| operation);
    recorder.paint(strips, tile_ids(6));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(6), Strategy::GrooveRidge, "t06")
            .with_op_count(5),
    ]
}

// ── Section B: Per-side strategies ───────────────────────────────────────────

fn tile_07_top_bottom_lines(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(7, Sides::new(2.0, 0.0, 2.0, 0.0), Sides::uniform(BLUE));
    recorder.paint(paint_border(&spec, Strategy::DrawLine), tile_ids(7));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(7), Strategy::DrawLine, "t07")
            .with_op_count(2),
    ]
}

fn tile_08_left_right_bands(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(8, Sides::new(0.0, 6.0, 0.0, 6.0), Sides::uniform(SLATE));
    recorder.paint(paint_border(&spec, Strategy::FilledThinRect), tile_ids(8));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(8), Strategy::FilledThinRect, "t08")
            .with_op_count(2),
    ]
}

fn tile_09_mixed_width_bands(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(
        9,
        Sides::new(3.0, 6.0, 3.0, 6.0),
        Sides::new(RED, GREEN, BLUE, Color::BLACK),
    );
    recorder.paint(paint_border(&spec, Strategy::FilledThinRect), tile_ids(9));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(9), Strategy::FilledThinRect, "t09")
            .with_op_count(4),
    ]
}

fn tile_10_uniform_lines(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(10, Sides::uniform(3.0), Sides::uniform(SLATE));
    recorder.paint(paint_border(&spec, Strategy::DrawLine), tile_ids(10));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(10), Strategy::DrawLine, "t10")
            .with_op_count(4),
    ]
}

fn tile_11_translucent_side_lines(
    recorder: &mut SceneRecorder,
) -> Vec<ClassificationExpectation> {
    let widths = Sides::new(0.0, 4.0, 0.0, 4.0);
    let spec = tile_spec(11, widths, Sides::uniform(SLATE));
    // The backend paints with half alpha; per-side matching ignores alpha.
    let faded = tile_spec(11, widths, Sides::uniform(Color::rgba(0.2, 0.4, 0.6, 0.5)));
    recorder.paint(paint_border(&faded, Strategy::DrawLine), tile_ids(11));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(11), Strategy::DrawLine, "t11")
            .with_op_count(2),
    ]
}

// ── Section C: Contention and noise ──────────────────────────────────────────

fn tile_12_starved_duplicate(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(12, Sides::uniform(4.0), Sides::uniform(RED));
    recorder.paint(paint_border(&spec, Strategy::StrokedRect), tile_ids(12));
    let first = recorder.add_border(spec.clone());
    let second = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(first, tile_node(12), Strategy::StrokedRect, "t12_first")
            .with_op_count(1),
        ClassificationExpectation::unmatched(second, tile_node(12), "t12_second_is_starved"),
    ]
}

fn tile_13_wrong_color(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(13, Sides::uniform(4.0), Sides::uniform(GREEN));
    let painted = tile_spec(13, Sides::uniform(4.0), Sides::uniform(BLUE));
    recorder.paint(paint_border(&painted, Strategy::StrokedRect), tile_ids(13));
    let index = recorder.add_border(spec);

    vec![ClassificationExpectation::unmatched(index, tile_node(13), "t13")]
}

fn tile_14_band_among_noise(recorder: &mut SceneRecorder) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(14, Sides::new(0.0, 0.0, 4.0, 0.0), Sides::uniform(SLATE));
    let rect = spec.rect();
    let background = PaintOperation::filled_rect(
        Box2D::new(
            point(rect.x, rect.y),
            point(rect.x + rect.width, rect.y + rect.height),
        ),
        SLATE,
    );
    let text = PaintOperation::Unsupported {
        kind: "DrawTextBlobOp".to_string(),
        scene_ids: None,
    };
    recorder.paint([background, text], tile_ids(14));
    recorder.paint(paint_border(&spec, Strategy::FilledThinRect), tile_ids(14));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(14), Strategy::FilledThinRect, "t14")
            .with_op_count(1),
    ]
}

fn tile_15_zero_radius_rounded_rect(
    recorder: &mut SceneRecorder,
) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(15, Sides::uniform(2.0), Sides::uniform(Color::BLACK));
    let rounded = paint_border(&spec, Strategy::StrokedRect)
        .into_iter()
        .map(|operation| operation.with_radii(CornerRadii::uniform(0.0)));
    recorder.paint(rounded, tile_ids(15));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(15), Strategy::StrokedRect, "t15")
            .with_op_count(1),
    ]
}

fn tile_16_double_border_inner_first(
    recorder: &mut SceneRecorder,
) -> Vec<ClassificationExpectation> {
    let spec = tile_spec(16, Sides::uniform(12.0), Sides::uniform(RED))
        .with_styles(Sides::uniform(BorderStyle::Double));
    let mut operations = paint_border(&spec, Strategy::DoubleStroked);
    operations.reverse();
    recorder.paint(operations, tile_ids(16));
    let index = recorder.add_border(spec);

    vec![
        ClassificationExpectation::matched(index, tile_node(16), Strategy::DoubleStroked, "t16")
            .with_op_count(2),
    ]
}
