mod border;
mod classifier;
mod color;
mod compare;
mod descriptor;
pub mod expected;
mod geometry;
mod id;
mod input;
mod matcher;
mod paint_op;
mod pool;
mod stroke;
mod tolerance;
mod util;

pub use border::{BorderSpecification, BorderStyle, SpecError};
pub use classifier::{Classification, Classifier, NodeMatch};
pub use color::Color;
pub use compare::{compare, CandidateOutput, ComparisonReport};
pub use descriptor::CanonicalDescriptor;
pub use geometry::{CornerRadii, RadiiCountError, Rect, Side, Sides};
pub use id::{NodeId, SceneIds};
pub use input::{
    load_candidate_output, load_descriptor, load_layout_tree, load_paint_ops, ColorRecord,
    InputError, LayoutNodeRecord, PaintFlagsRecord, PaintOpRecord,
};
pub use matcher::{
    default_matchers, BorderMatcher, DottedLinesMatcher, DoubleStrokedMatcher, DrawLineMatcher,
    FilledThinRectMatcher, GrooveRidgeMatcher, MatchResult, MatchedOps, Strategy,
    StrokedRectMatcher,
};
pub use paint_op::{FilledRectOp, LineOp, PaintOperation, StrokedRectOp};
pub use pool::{ConsumptionSet, OperationPool};
pub use stroke::Stroke;
pub use tolerance::Tolerances;
