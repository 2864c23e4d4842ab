use serde::{Deserialize, Serialize};

use crate::matcher::{MatchResult, Strategy};
use crate::pool::OperationPool;
use crate::{BorderSpecification, BorderStyle, Color, CornerRadii, NodeId, Rect, SceneIds, Sides};

/// The fixture written for one matched border: everything a painter needs to repaint it, and
/// the strategy its output is verified against.
///
/// Field names are the fixture file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalDescriptor {
    pub geometry: Rect,
    pub border_widths: Sides<f32>,
    pub border_colors: Sides<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radii: Option<CornerRadii>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_styles: Option<Sides<BorderStyle>>,
    #[serde(default)]
    pub state_ids: SceneIds,
    pub match_type: Strategy,
    pub node_id: NodeId,
}

impl CanonicalDescriptor {
    /// Builds the descriptor of `spec` matched as `result` against `pool`.
    ///
    /// Scene ids come from the representative operation of the match. If that position is
    /// not in `pool` the ids stay at their defaults.
    pub fn from_match(
        spec: &BorderSpecification,
        result: &MatchResult,
        pool: &OperationPool,
    ) -> Self {
        let state_ids = result
            .ops()
            .representative()
            .and_then(|index| pool.get(index))
            .map(|operation| operation.scene_ids())
            .unwrap_or_default();

        Self {
            geometry: *spec.rect(),
            border_widths: *spec.widths(),
            border_colors: *spec.colors(),
            border_radii: spec.radii().cloned(),
            border_styles: spec.styles().copied(),
            state_ids,
            match_type: result.strategy(),
            node_id: spec.node_id(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
