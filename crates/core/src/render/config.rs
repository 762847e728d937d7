use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Configuration specific to visually rendering a lenslet array. These
/// options have absolutely no bearing on lenslet _generation_, only on the
/// visual presentation. If you generate an array then output to a non-visual
/// format (e.g. JSON), these options will **never** affect that output.
///
/// Not all render options apply to all render output formats. The
/// documentation for each field will list which formats it applies to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// Controls how each lens aperture is colored. See [AperturePaint].
    ///
    /// ## Relevant Formats
    /// - SVG
    pub aperture_paint: AperturePaint,

    /// Should the eyebox lattice hexagon that each lens came from be drawn
    /// underneath it?
    ///
    /// ## Relevant Formats
    /// - SVG
    pub show_lattice: bool,

    /// Width of polygon outlines, in millimeters
    ///
    /// ## Relevant Formats
    /// - SVG
    #[validate(range(min = 0.0))]
    pub stroke_width: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            aperture_paint: AperturePaint::Tilt,
            show_lattice: true,
            stroke_width: 0.02,
        }
    }
}

/// A definition of what data is used to compute an aperture's color.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AperturePaint {
    /// Every aperture gets the same color
    Flat,
    /// Color is a gradient based on how far the lens axis tilts away from
    /// the optical axis. Untilted is white, 90° is red.
    Tilt,
    /// Color is a gradient based on aperture area, relative to the biggest
    /// aperture in the array. Tiny is white, biggest is blue.
    Area,
}
