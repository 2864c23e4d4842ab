//! The layout-side description of one element's border.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{CornerRadii, Rect, Sides};
use crate::id::NodeId;
use crate::Color;

/// Errors raised when a border specification would violate its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("node {0}: all four border widths are zero")]
    NoBorder(NodeId),
    #[error("node {node}: border width {width} on {side} is negative or not finite")]
    InvalidWidth {
        node: NodeId,
        side: crate::Side,
        width: f32,
    },
    #[error("node {node}: border box has negative or non-finite size {width}x{height}")]
    InvalidRect { node: NodeId, width: f32, height: f32 },
}

/// CSS border style of one side.
///
/// Styles are informative: the paint operations decide how a border is classified. The one
/// exception is the dotted strategy, which only applies to dotted or dashed borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    Hidden,
    #[default]
    Solid,
    Double,
    Dotted,
    Dashed,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    pub fn is_dash_pattern(&self) -> bool {
        matches!(self, BorderStyle::Dotted | BorderStyle::Dashed)
    }
}

/// One element's border as the layout engine sees it.
///
/// # Examples
///
/// ```
/// use border_fixtures::{BorderSpecification, Color, NodeId, Rect, Sides};
///
/// let spec = BorderSpecification::new(
///     NodeId(7),
///     Rect::new(0.0, 0.0, 100.0, 50.0),
///     Sides::uniform(4.0),
///     Sides::uniform(Color::rgb(1.0, 0.0, 0.0)),
/// )
/// .unwrap();
/// assert!(spec.is_uniform());
/// assert_eq!(spec.uniform_width(), Some(4.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BorderSpecification {
    node_id: NodeId,
    rect: Rect,
    widths: Sides<f32>,
    colors: Sides<Color>,
    styles: Option<Sides<BorderStyle>>,
    radii: Option<CornerRadii>,
}

impl BorderSpecification {
    pub fn new(
        node_id: NodeId,
        rect: Rect,
        widths: Sides<f32>,
        colors: Sides<Color>,
    ) -> Result<Self, SpecError> {
        let valid_size = |value: f32| value.is_finite() && value >= 0.0;
        if !valid_size(rect.width)
            || !valid_size(rect.height)
            || !rect.x.is_finite()
            || !rect.y.is_finite()
        {
            return Err(SpecError::InvalidRect {
                node: node_id,
                width: rect.width,
                height: rect.height,
            });
        }
        for (side, width) in widths.iter() {
            if !valid_size(*width) {
                return Err(SpecError::InvalidWidth {
                    node: node_id,
                    side,
                    width: *width,
                });
            }
        }
        if widths.iter().all(|(_, width)| *width == 0.0) {
            return Err(SpecError::NoBorder(node_id));
        }

        Ok(Self {
            node_id,
            rect,
            widths,
            colors,
            styles: None,
            radii: None,
        })
    }

    pub fn with_styles(mut self, styles: Sides<BorderStyle>) -> Self {
        self.styles = Some(styles);
        self
    }

    pub fn with_radii(mut self, radii: CornerRadii) -> Self {
        self.radii = Some(radii);
        self
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn widths(&self) -> &Sides<f32> {
        &self.widths
    }

    pub fn colors(&self) -> &Sides<Color> {
        &self.colors
    }

    pub fn styles(&self) -> Option<&Sides<BorderStyle>> {
        self.styles.as_ref()
    }

    pub fn radii(&self) -> Option<&CornerRadii> {
        self.radii.as_ref()
    }

    /// All four widths equal and positive.
    pub fn is_uniform(&self) -> bool {
        let top = self.widths.top;
        top > 0.0
            && self.widths.right == top
            && self.widths.bottom == top
            && self.widths.left == top
    }

    /// The shared width of a uniform border.
    pub fn uniform_width(&self) -> Option<f32> {
        self.is_uniform().then_some(self.widths.top)
    }

    /// Color used by the strategies that paint the whole border in one pass.
    pub fn primary_color(&self) -> Color {
        self.colors.top
    }

    /// True if every side is styled dotted or dashed.
    pub fn has_dash_pattern(&self) -> bool {
        self.styles
            .map(|styles| styles.iter().all(|(_, style)| style.is_dash_pattern()))
            .unwrap_or(false)
    }
}
