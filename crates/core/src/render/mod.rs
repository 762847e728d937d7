pub mod config;
#[cfg(feature = "stl")]
pub mod stl;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

use crate::{
    lenslet::{lens::ParaxialLens, tiling::optical_axis, LensletArray},
    render::{
        config::{AperturePaint, RenderConfig},
        unit::Color3,
    },
    util::{cmp_unwrap, range::NumRange, unit::Radians},
};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use validator::Validate;

/// A lenslet renderer is used to convert lenslet arrays into various visual
/// output formats. A renderer is created using a particular [RenderConfig],
/// and from there can be used to render any number of arrays any number of
/// times.
///
/// ## Supported Formats
/// - STL (3D, no colors)
/// - SVG (2D top-down, with colors)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LensletRenderer {
    /// Config that determines how rendering is done
    ///
    /// **This is different from the lenslet config.** The lenslet config
    /// controls how the array is generated, the render config just controls
    /// how it's visually presented _after_ generation.
    render_config: RenderConfig,
}

impl LensletRenderer {
    const FLAT_COLOR: Color3 = Color3::new_int(72, 192, 240);
    const TILT_COLOR: Color3 = Color3::new_int(214, 39, 40);
    const AREA_COLOR: Color3 = Color3::new_int(20, 77, 163);
    pub const LATTICE_COLOR: Color3 = Color3::new_int(191, 191, 191);

    /// Range of lens tilts that maps onto the tilt gradient
    const TILT_RANGE: NumRange<Radians, f64> =
        NumRange::new(Radians(0.0), Radians(FRAC_PI_2));

    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid.
    pub fn new(render_config: RenderConfig) -> anyhow::Result<Self> {
        render_config.validate()?;
        Ok(Self { render_config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Convert a world point to 2D screen space, looking down the optical
    /// axis from the eyebox. Screen Y points down, so world Y gets flipped.
    pub fn world_to_screen_space(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::new(point.x, -point.y)
    }

    /// Angle between a lens's optical axis and the system's optical axis.
    /// Lenses facing straight back at the eyebox have zero tilt.
    pub fn lens_tilt(&self, lens: &ParaxialLens) -> Radians {
        let alignment = lens.optical_axis().dot(&-optical_axis());
        Radians(alignment.clamp(-1.0, 1.0).acos())
    }

    /// Compute the color of a lens aperture based on current render settings.
    /// `max_area` is the area of the biggest aperture in the array being
    /// rendered.
    pub fn aperture_color(&self, lens: &ParaxialLens, max_area: f64) -> Color3 {
        match self.render_config.aperture_paint {
            AperturePaint::Flat => Self::FLAT_COLOR,
            AperturePaint::Tilt => {
                let normal_tilt = Self::TILT_RANGE
                    .normalize(Self::TILT_RANGE.clamp(self.lens_tilt(lens)));
                // 0 -> white
                // 1 -> red
                Color3::WHITE.blend(Self::TILT_COLOR, normal_tilt.0 as f32)
            }
            AperturePaint::Area => {
                let normal_area = NumRange::new(0.0, max_area)
                    .normalize(lens.aperture().area());
                // 0 -> white
                // 1 -> blue
                Color3::WHITE.blend(Self::AREA_COLOR, normal_area as f32)
            }
        }
    }

    /// Area of the biggest aperture in the array, or zero if it's empty
    pub fn max_aperture_area(&self, array: &LensletArray) -> f64 {
        array
            .lenses()
            .iter()
            .map(|lens| lens.aperture().area())
            .max_by(cmp_unwrap)
            .unwrap_or(0.0)
    }

    /// Render the array as a 2D SVG, from a top-down perspective. Returns the
    /// SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self, array: &LensletArray) -> String {
        let svg = svg::lenslets_to_svg(array, self);
        svg.to_string()
    }

    /// Render the array into an STL model. Return value is the STL binary
    /// data.
    #[cfg(feature = "stl")]
    pub fn render_as_stl(&self, array: &LensletArray) -> Vec<u8> {
        let mesh = stl::lenslets_to_stl(array);
        let mut buffer = Vec::<u8>::new();
        // Panic here indicates a bug in our STL mesh format
        stl_io::write_stl(&mut buffer, mesh.iter())
            .expect("error serializing STL");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::ConvexPolygon, util::unit::Millimeter};
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::{Isometry3, Vector2, Vector3};

    fn lens(rotation: Vector3<f64>) -> ParaxialLens {
        ParaxialLens::new(
            Millimeter(10.0),
            ConvexPolygon::new(
                Isometry3::new(Vector3::zeros(), rotation),
                vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(1.0, 0.0),
                    Point2::new(0.0, 1.0),
                ],
            ),
            Vector2::zeros(),
        )
    }

    fn renderer(aperture_paint: AperturePaint) -> LensletRenderer {
        LensletRenderer::new(RenderConfig {
            aperture_paint,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_lens_tilt() {
        let renderer = renderer(AperturePaint::Tilt);
        // Rotated half a turn about X, so it faces -Z (back at the eyebox)
        let facing_back = lens(Vector3::x() * std::f64::consts::PI);
        assert_approx_eq!(renderer.lens_tilt(&facing_back).0, 0.0);
        assert_eq!(
            renderer.aperture_color(&facing_back, 1.0).to_ints(),
            Color3::WHITE.to_ints()
        );

        let sideways = lens(Vector3::x() * FRAC_PI_2);
        assert_approx_eq!(renderer.lens_tilt(&sideways).0, FRAC_PI_2);
        assert_eq!(
            renderer.aperture_color(&sideways, 1.0).to_ints(),
            LensletRenderer::TILT_COLOR.to_ints()
        );
    }

    #[test]
    fn test_area_color() {
        let renderer = renderer(AperturePaint::Area);
        let lens = lens(Vector3::zeros());
        // The test triangle has area 0.5
        assert_eq!(
            renderer.aperture_color(&lens, 0.5).to_ints(),
            LensletRenderer::AREA_COLOR.to_ints()
        );
        // Half the max area lands halfway between white and blue
        let (red, green, blue) = renderer.aperture_color(&lens, 1.0).to_ints();
        assert!(red > 20 && red < 255);
        assert!(green > 77 && green < 255);
        assert!(blue > 163 && blue < 255);
    }

    #[test]
    fn test_invalid_config() {
        assert!(LensletRenderer::new(RenderConfig {
            stroke_width: -0.5,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_screen_space() {
        let renderer = renderer(AperturePaint::Flat);
        let screen =
            renderer.world_to_screen_space(&Point3::new(1.0, 2.0, 3.0));
        assert_eq!(screen, Point2::new(1.0, -2.0));
    }
}
