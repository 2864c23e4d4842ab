/// Numeric tolerances used by the matchers and the comparator.
///
/// The defaults are the values fixtures are generated and verified with; changing them
/// changes which operations a border is matched against. All comparisons are inclusive, so
/// a value off by exactly the tolerance still matches.
///
/// # Examples
///
/// ```
/// use border_fixtures::Tolerances;
///
/// let strict = Tolerances::default().with_geometry(0.5).with_color(0.001);
/// assert_eq!(strict.geometry, 0.5);
/// assert_eq!(strict.dash_geometry, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Position and size tolerance for rect and line geometry (default 2.0).
    pub geometry: f32,
    /// Geometry tolerance for dotted and dashed lines, absorbing dash-pattern jitter
    /// (default 5.0).
    pub dash_geometry: f32,
    /// Geometry, stroke width and radius tolerance when verifying a single stroked rect
    /// (default 0.5).
    pub single_rect: f32,
    /// Per-channel color tolerance for strategies painting the whole border at once
    /// (default 0.01).
    pub color: f32,
    /// Per-channel color tolerance for per-side strategies (default 0.02).
    pub side_color: f32,
    /// Stroke width tolerance when matching stroked rects (default 0.5).
    pub stroke_width: f32,
    /// Stroke width tolerance for lines and for verifying double borders (default 1.0).
    pub line_stroke_width: f32,
    /// Corner radius tolerance when matching rounded rects (default 1.0).
    pub radius: f32,
    /// A filled rect is a border band only if one dimension is below this and the other
    /// above it (default 10.0).
    pub thin_rect: f32,
    /// Number of the eight groove/ridge half bands that must be found (default 4).
    pub groove_ridge_min_parts: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            geometry: 2.0,
            dash_geometry: 5.0,
            single_rect: 0.5,
            color: 0.01,
            side_color: 0.02,
            stroke_width: 0.5,
            line_stroke_width: 1.0,
            radius: 1.0,
            thin_rect: 10.0,
            groove_ridge_min_parts: 4,
        }
    }
}

impl Tolerances {
    pub fn with_geometry(mut self, tolerance: f32) -> Self {
        self.geometry = tolerance;
        self
    }

    pub fn with_dash_geometry(mut self, tolerance: f32) -> Self {
        self.dash_geometry = tolerance;
        self
    }

    pub fn with_single_rect(mut self, tolerance: f32) -> Self {
        self.single_rect = tolerance;
        self
    }

    /// Sets both the whole-border and the per-side color tolerance.
    pub fn with_color(mut self, tolerance: f32) -> Self {
        self.color = tolerance;
        self.side_color = tolerance;
        self
    }

    pub fn with_stroke_width(mut self, tolerance: f32) -> Self {
        self.stroke_width = tolerance;
        self
    }

    pub fn with_radius(mut self, tolerance: f32) -> Self {
        self.radius = tolerance;
        self
    }

    pub fn with_thin_rect(mut self, threshold: f32) -> Self {
        self.thin_rect = threshold;
        self
    }

    pub fn with_groove_ridge_min_parts(mut self, parts: usize) -> Self {
        self.groove_ridge_min_parts = parts;
        self
    }
}
