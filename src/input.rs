//! Loading captured layout trees, paint-op dumps, fixtures and painter output from JSON.
//!
//! Records mirror the capture formats field for field. Conversion into the model validates
//! everything up front: a malformed record fails the whole load instead of turning into an
//! unmatched border later.

use lyon::math::{point, Box2D};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::border::SpecError;
use crate::compare::CandidateOutput;
use crate::descriptor::CanonicalDescriptor;
use crate::geometry::{CornerRadii, Rect, Side, Sides};
use crate::{BorderSpecification, BorderStyle, Color, NodeId, PaintOperation, SceneIds, Stroke};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a `{0}` array or a bare array")]
    MissingDocumentKey(&'static str),
    #[error("node {node}: has border widths but no `{field}`")]
    MissingField { node: NodeId, field: &'static str },
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error("node {node}: border radii must have 4 or 8 entries, got {count}")]
    InvalidRadii { node: NodeId, count: usize },
    #[error("node {node}: unrecognized {side} border color {value:?}")]
    InvalidColor {
        node: NodeId,
        side: Side,
        value: String,
    },
    #[error("paint op {index} ({kind}): {reason}")]
    MalformedOp {
        index: usize,
        kind: String,
        reason: &'static str,
    },
}

// ── Layout tree ─────────────────────────────────────────────────────────────

/// A border color as captured: channel values in `0.0..=1.0`, or a CSS color string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorRecord {
    Channels(Color),
    Css(String),
}

/// One entry of a captured layout tree. Only the fields borders need are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNodeRecord {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geometry: Option<Rect>,
    #[serde(default)]
    pub border_widths: Option<Sides<f32>>,
    /// `null` sides are transparent.
    #[serde(default)]
    pub border_colors: Option<Sides<Option<ColorRecord>>>,
    #[serde(default)]
    pub border_styles: Option<Sides<BorderStyle>>,
    #[serde(default)]
    pub border_radii: Option<Vec<f32>>,
}

impl LayoutNodeRecord {
    /// True if the node paints any border at all.
    pub fn is_bordered(&self) -> bool {
        self.border_widths
            .map(|widths| widths.iter().any(|(_, width)| *width != 0.0))
            .unwrap_or(false)
    }

    /// Converts a bordered node into a specification.
    pub fn to_specification(&self) -> Result<BorderSpecification, InputError> {
        let node = NodeId(self.id);
        let missing = |field| InputError::MissingField { node, field };

        let widths = self.border_widths.ok_or_else(|| missing("border_widths"))?;
        let rect = self.geometry.ok_or_else(|| missing("geometry"))?;
        let color_records = self
            .border_colors
            .as_ref()
            .ok_or_else(|| missing("border_colors"))?;

        let mut colors = Sides::uniform(Color::TRANSPARENT);
        for (side, record) in color_records.iter() {
            colors[side] = match record {
                None => Color::TRANSPARENT,
                Some(ColorRecord::Channels(color)) => *color,
                Some(ColorRecord::Css(value)) => {
                    Color::parse_css(value).ok_or_else(|| InputError::InvalidColor {
                        node,
                        side,
                        value: value.clone(),
                    })?
                }
            };
        }

        let mut spec = BorderSpecification::new(node, rect, widths, colors)?;
        if let Some(styles) = self.border_styles {
            spec = spec.with_styles(styles);
        }
        if let Some(values) = &self.border_radii {
            let radii = CornerRadii::new(values.iter().copied()).ok_or(InputError::InvalidRadii {
                node,
                count: values.len(),
            })?;
            spec = spec.with_radii(radii);
        }
        Ok(spec)
    }
}

/// Parses a captured layout tree and returns the specifications of its bordered nodes, in
/// tree order.
///
/// Accepts `{"layout_tree": [...]}` or a bare array. Nodes without border widths, or with
/// all four widths zero, are skipped.
pub fn load_layout_tree(json: &str) -> Result<Vec<BorderSpecification>, InputError> {
    let records: Vec<LayoutNodeRecord> = parse_list(json, "layout_tree")?;
    let specs = records
        .iter()
        .filter(|record| record.is_bordered())
        .map(LayoutNodeRecord::to_specification)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Loaded {} bordered nodes out of {} layout nodes",
        specs.len(),
        records.len()
    );
    Ok(specs)
}

// ── Paint ops ───────────────────────────────────────────────────────────────

fn opaque() -> f32 {
    1.0
}

/// Paint flags of a recorded op. `style` is 0 for fill and 1 for stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintFlagsRecord {
    #[serde(default)]
    pub style: u8,
    #[serde(default, rename = "strokeWidth")]
    pub stroke_width: f32,
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub g: f32,
    #[serde(default)]
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

impl Default for PaintFlagsRecord {
    fn default() -> Self {
        Self {
            style: 0,
            stroke_width: 0.0,
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl PaintFlagsRecord {
    pub fn color(&self) -> Color {
        Color::rgba(self.r, self.g, self.b, self.a)
    }
}

/// One recorded backend paint op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintOpRecord {
    #[serde(rename = "type")]
    pub kind: String,
    /// `[left, top, right, bottom]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radii: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x0: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y0: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f32>,
    #[serde(default)]
    pub flags: PaintFlagsRecord,
    /// Scene ids are optional; painter output under test often omits them. A record with any
    /// of the three reads the missing ones as 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect_id: Option<i64>,
}

impl PaintOpRecord {
    /// Converts the record at pool position `index` into an operation.
    ///
    /// Op kinds no border strategy paints with become [`PaintOperation::Unsupported`].
    pub fn to_operation(&self, index: usize) -> Result<PaintOperation, InputError> {
        let malformed = |reason| InputError::MalformedOp {
            index,
            kind: self.kind.clone(),
            reason,
        };
        let scene_ids = self.scene_ids();
        let color = self.flags.color();

        let operation = match self.kind.as_str() {
            "DrawRectOp" | "DrawRRectOp" => {
                let [left, top, right, bottom] = self
                    .rect
                    .as_deref()
                    .and_then(|rect| <[f32; 4]>::try_from(rect).ok())
                    .ok_or_else(|| malformed("`rect` must have 4 entries"))?;
                let rect = Box2D::new(point(left, top), point(right, bottom));
                let operation = match self.flags.style {
                    0 => PaintOperation::filled_rect(rect, color),
                    _ => {
                        let stroke = Stroke::new(self.flags.stroke_width, color);
                        PaintOperation::stroked_rect(rect, stroke)
                    }
                };
                if self.kind == "DrawRRectOp" {
                    let values = self
                        .radii
                        .as_deref()
                        .ok_or_else(|| malformed("rounded rect without `radii`"))?;
                    let radii = CornerRadii::new(values.iter().copied())
                        .ok_or_else(|| malformed("`radii` must have 4 or 8 entries"))?;
                    operation.with_radii(radii)
                } else {
                    operation
                }
            }
            "DrawLineOp" => {
                let (Some(x0), Some(y0), Some(x1), Some(y1)) = (self.x0, self.y0, self.x1, self.y1)
                else {
                    return Err(malformed("line without both endpoints"));
                };
                PaintOperation::line(
                    point(x0, y0),
                    point(x1, y1),
                    Stroke::new(self.flags.stroke_width, color),
                )
            }
            other => PaintOperation::Unsupported {
                kind: other.to_string(),
                scene_ids,
            },
        };

        Ok(match scene_ids {
            Some(ids) => operation.with_scene_ids(ids),
            None => operation,
        })
    }

    fn scene_ids(&self) -> Option<SceneIds> {
        let ids = [self.transform_id, self.clip_id, self.effect_id];
        ids.iter().any(Option::is_some).then(|| {
            let [transform_id, clip_id, effect_id] = ids.map(|id| id.unwrap_or(0));
            SceneIds::new(transform_id, clip_id, effect_id)
        })
    }
}

/// Parses a paint-op dump into pool order.
///
/// Accepts `{"paint_ops": [...]}` or a bare array.
pub fn load_paint_ops(json: &str) -> Result<Vec<PaintOperation>, InputError> {
    let records: Vec<PaintOpRecord> = parse_list(json, "paint_ops")?;
    let operations = records
        .iter()
        .enumerate()
        .map(|(index, record)| record.to_operation(index))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Loaded {} paint ops", operations.len());
    Ok(operations)
}

// ── Fixtures and painter output ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateRecord {
    List(Vec<PaintOpRecord>),
    Single(PaintOpRecord),
}

/// Parses painter output: one op object or an array of them.
pub fn load_candidate_output(json: &str) -> Result<CandidateOutput, InputError> {
    Ok(match serde_json::from_str::<CandidateRecord>(json)? {
        CandidateRecord::Single(record) => CandidateOutput::Single(record.to_operation(0)?),
        CandidateRecord::List(records) => CandidateOutput::List(
            records
                .iter()
                .enumerate()
                .map(|(index, record)| record.to_operation(index))
                .collect::<Result<_, _>>()?,
        ),
    })
}

pub fn load_descriptor(json: &str) -> Result<CanonicalDescriptor, InputError> {
    Ok(serde_json::from_str(json)?)
}

/// Either `{ "<key>": [...] }` or a bare `[...]`.
fn parse_list<T: DeserializeOwned>(json: &str, key: &'static str) -> Result<Vec<T>, InputError> {
    let list = match serde_json::from_str::<Value>(json)? {
        Value::Object(mut document) => document
            .remove(key)
            .ok_or(InputError::MissingDocumentKey(key))?,
        list @ Value::Array(_) => list,
        _ => return Err(InputError::MissingDocumentKey(key)),
    };
    Ok(serde_json::from_value(list)?)
}
