//! This module provides logic for rendering a lenslet array as an SVG. Only
//! available with the "svg" feature enabled.

use crate::{
    geometry::BoundingBox,
    lattice::{HexLattice, TilePoint},
    lenslet::{lens::ParaxialLens, LensletArray},
    render::LensletRenderer,
};
use nalgebra::{Point2, Point3};
use svg::{
    node::{
        element::{Circle, Group, Polygon},
        Comment,
    },
    Document,
};

/// Render a lenslet array as an SVG. This is a 2D rendering looking down the
/// optical axis, with each aperture drawn over the lattice hexagon it was
/// generated from.
pub fn lenslets_to_svg(
    array: &LensletArray,
    renderer: &LensletRenderer,
) -> Document {
    let lattice = array.config().hex_lattice();
    let stroke_width = renderer.render_config().stroke_width;
    let max_area = renderer.max_aperture_area(array);

    let mut document = Document::new()
        .set("viewBox", view_box(array, &lattice, renderer, stroke_width))
        .add(Comment::new(format!("\n{:#?}\n", array.config())));

    for (tile, lens) in array.iter() {
        let group = draw_lens(renderer, &lattice, tile, lens, max_area);
        document = document.add(group);
    }

    document
}

/// Get a view box that fits everything we're going to draw, as
/// `(min_x, min_y, width, height)`. An empty array gets a unit box so the
/// document is still valid.
fn view_box(
    array: &LensletArray,
    lattice: &HexLattice,
    renderer: &LensletRenderer,
    padding: f64,
) -> (f64, f64, f64, f64) {
    let mut points: Vec<Point2<f64>> = array
        .lenses()
        .iter()
        .flat_map(|lens| lens.aperture().world_vertices())
        .map(|vertex| renderer.world_to_screen_space(&vertex))
        .collect();
    if renderer.render_config().show_lattice {
        points.extend(array.tiles().iter().flat_map(|tile| {
            lattice
                .tile_vertices(*tile)
                .iter()
                .map(|vertex| lattice_to_screen(renderer, vertex))
                .collect::<Vec<_>>()
        }));
    }

    match BoundingBox::enclosing(&points) {
        Some(bounds) => (
            bounds.x.min - padding,
            bounds.y.min - padding,
            bounds.x.span() + 2.0 * padding,
            bounds.y.span() + 2.0 * padding,
        ),
        None => (-0.5, -0.5, 1.0, 1.0),
    }
}

fn lattice_to_screen(
    renderer: &LensletRenderer,
    vertex: &Point2<f64>,
) -> Point2<f64> {
    renderer.world_to_screen_space(&Point3::new(vertex.x, vertex.y, 0.0))
}

/// Generate an SVG group for a single lens
fn draw_lens(
    renderer: &LensletRenderer,
    lattice: &HexLattice,
    tile: TilePoint,
    lens: &ParaxialLens,
    max_area: f64,
) -> Group {
    let stroke_width = renderer.render_config().stroke_width;
    // Tile coordinate comment is just for readability
    let mut group = Group::new().add(Comment::new(tile.to_string()));

    if renderer.render_config().show_lattice {
        group = group.add(
            Polygon::new()
                .set(
                    "points",
                    lattice
                        .tile_vertices(tile)
                        .iter()
                        .map(|vertex| {
                            let screen = lattice_to_screen(renderer, vertex);
                            (screen.x, screen.y)
                        })
                        .collect::<Vec<_>>(),
                )
                .set("fill", "none")
                .set("stroke", LensletRenderer::LATTICE_COLOR.to_html())
                .set("stroke-width", stroke_width),
        );
    }

    let center = renderer.world_to_screen_space(&lens.optical_center());
    group
        .add(
            Polygon::new()
                .set(
                    "points",
                    lens.aperture()
                        .world_vertices()
                        .iter()
                        .map(|vertex| {
                            let screen = renderer.world_to_screen_space(vertex);
                            (screen.x, screen.y)
                        })
                        .collect::<Vec<_>>(),
                )
                .set("fill", renderer.aperture_color(lens, max_area).to_html())
                .set("stroke", "black")
                .set("stroke-width", stroke_width),
        )
        // Mark where the optical axis goes through
        .add(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", stroke_width * 2.0)
                .set("fill", "black"),
        )
}

#[cfg(test)]
mod tests {
    use crate::{
        render::{config::RenderConfig, LensletRenderer},
        LensletArray, LensletConfig,
    };

    #[test]
    fn test_render_svg() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let renderer = LensletRenderer::new(RenderConfig::default()).unwrap();
        let svg = renderer.render_as_svg(&array);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox"));
        // One aperture per lens, plus one lattice hexagon per lens
        assert_eq!(svg.matches("<polygon").count(), 2 * array.lenses().len());
        assert_eq!(svg.matches("<circle").count(), array.lenses().len());
        // Tile coordinates get left as comments
        let (tile, _) = array.iter().next().unwrap();
        assert!(svg.contains(&tile.to_string()));
    }

    #[test]
    fn test_render_svg_no_lattice() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let renderer = LensletRenderer::new(RenderConfig {
            show_lattice: false,
            ..Default::default()
        })
        .unwrap();
        let svg = renderer.render_as_svg(&array);
        assert_eq!(svg.matches("<polygon").count(), array.lenses().len());
    }
}
