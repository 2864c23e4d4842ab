use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::util::{channel_from_u8, within};

/// Represents a color in RGBA format.
///
/// Each channel is a floating point value in `[0.0, 1.0]`, which is how both the captured layout
/// tree and the paint operation dumps describe colors.
///
/// # Examples
///
/// ```
/// use border_fixtures::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// assert_eq!(red.to_array(), [1.0, 0.0, 0.0, 1.0]);
///
/// let almost_red = Color::rgb(0.995, 0.0, 0.0);
/// assert!(red.approx_eq(&almost_red, 0.01));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque_alpha")]
    pub a: f32,
}

fn opaque_alpha() -> f32 {
    1.0
}

impl Color {
    /// A transparent color.
    ///
    /// All color channels are set to zero, making the color fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// A black color.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// A white color.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color with the specified RGB values and full opacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use border_fixtures::Color;
    ///
    /// let green = Color::rgb(0.0, 1.0, 0.0);
    /// assert_eq!(green.a, 1.0);
    /// ```
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new color with the specified RGBA values.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from 8-bit channels, the way CSS computed styles report them.
    ///
    /// # Examples
    ///
    /// ```
    /// use border_fixtures::Color;
    ///
    /// let white = Color::from_rgba8(255, 255, 255, 1.0);
    /// assert_eq!(white, Color::WHITE);
    /// ```
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(channel_from_u8(r), channel_from_u8(g), channel_from_u8(b), a)
    }

    /// Parses a CSS `rgb()`/`rgba()` color string or the `transparent` keyword.
    ///
    /// Returns `None` when the string is not one of those forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use border_fixtures::Color;
    ///
    /// let color = Color::parse_css("rgba(255, 0, 0, 0.5)").unwrap();
    /// assert_eq!(color, Color::rgba(1.0, 0.0, 0.0, 0.5));
    /// assert_eq!(Color::parse_css("transparent"), Some(Color::TRANSPARENT));
    /// assert_eq!(Color::parse_css("red"), None);
    /// ```
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }

        let captures = css_color_regex().captures(value)?;
        let channel = |group: usize| captures.get(group)?.as_str().parse::<u8>().ok();
        let alpha = match captures.get(4) {
            Some(alpha) => alpha.as_str().parse::<f32>().ok()?,
            None => 1.0,
        };

        Some(Self::from_rgba8(channel(1)?, channel(2)?, channel(3)?, alpha))
    }

    /// Returns the color as an array of 4 `f32` values.
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// True if every channel, alpha included, is within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Color, tolerance: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(left, right)| within(*left, right, tolerance))
    }

    /// True if the red, green and blue channels are within `tolerance` of `other`.
    ///
    /// Per-side border paints carry alpha inconsistently, so alpha is ignored here.
    pub fn rgb_approx_eq(&self, other: &Color, tolerance: f32) -> bool {
        within(self.r, other.r, tolerance)
            && within(self.g, other.g, tolerance)
            && within(self.b, other.b, tolerance)
    }

    /// True if every rgb channel of `self` lies within `factors` of the matching channel of
    /// `base`, with `tolerance` slack on both ends.
    pub(crate) fn is_scaled_from(
        &self,
        base: &Color,
        factors: std::ops::RangeInclusive<f32>,
        tolerance: f32,
    ) -> bool {
        [(self.r, base.r), (self.g, base.g), (self.b, base.b)]
            .into_iter()
            .all(|(channel, base_channel)| {
                channel >= base_channel * factors.start() - tolerance
                    && channel <= base_channel * factors.end() + tolerance
            })
    }

    /// True if the color has no visible coverage.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

fn css_color_regex() -> &'static Regex {
    static CSS_COLOR: OnceLock<Regex> = OnceLock::new();
    CSS_COLOR.get_or_init(|| {
        Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([\d.]+)\s*)?\)$")
            .expect("css color pattern is a valid regex")
    })
}
