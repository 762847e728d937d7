//! This module provides logic for rendering a lenslet array as an STL. Only
//! available with the "stl" feature enabled.

use crate::{geometry::ConvexPolygon, lenslet::LensletArray};
use nalgebra::Point3;
use stl_io::{Normal, Triangle, Vertex};

/// Render the given array as an STL model. STL only carries geometric data,
/// so each aperture is just a flat triangle fan, in world coordinates. Unlike
/// most of our output, the STL keeps the optical axis (+Z) as Z.
pub fn lenslets_to_stl(array: &LensletArray) -> Vec<Triangle> {
    let mut mesh = Vec::with_capacity(
        array
            .lenses()
            .iter()
            .map(|lens| triangles_per_polygon(lens.aperture()))
            .sum(),
    );

    for lens in array.lenses() {
        add_polygon_to_mesh(lens.aperture(), &mut mesh);
    }

    mesh
}

/// A fan from the first vertex covers a convex polygon with `n - 2` triangles
fn triangles_per_polygon(polygon: &ConvexPolygon) -> usize {
    polygon.vertices().len() - 2
}

/// Convert a polygon to triangle soup and add it to the soup pot.
fn add_polygon_to_mesh(polygon: &ConvexPolygon, mesh: &mut Vec<Triangle>) {
    let normal = polygon.normal();
    let normal =
        Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]);
    let vertices: Vec<Vertex> =
        polygon.world_vertices().iter().map(to_vertex).collect();

    // REMEMBER: We use the right-hand rule, and polygon vertices are already
    // counter-clockwise about the normal, so the fan keeps that winding
    for i in 1..(vertices.len() - 1) {
        mesh.push(Triangle {
            normal,
            vertices: [vertices[0], vertices[i], vertices[i + 1]],
        });
    }
}

fn to_vertex(point: &Point3<f64>) -> Vertex {
    Vertex::new([point.x as f32, point.y as f32, point.z as f32])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::{config::RenderConfig, LensletRenderer},
        LensletConfig,
    };
    use nalgebra::{Point2, Vector3};

    #[test]
    fn test_fan_winding() {
        let polygon = ConvexPolygon::new(
            nalgebra::Isometry3::translation(0.0, 0.0, 2.0),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        );
        let mut mesh = Vec::new();
        add_polygon_to_mesh(&polygon, &mut mesh);
        assert_eq!(mesh.len(), triangles_per_polygon(&polygon));

        for triangle in &mesh {
            // Winding agrees with the stored normal
            let [a, b, c] = triangle
                .vertices
                .map(|v| Vector3::new(v[0] as f64, v[1] as f64, v[2] as f64));
            let winding = (b - a).cross(&(c - a));
            assert!(winding.z > 0.0);
            assert_eq!(triangle.normal[2], 1.0);
        }
    }

    #[test]
    fn test_render_stl() {
        let array = LensletArray::generate(LensletConfig::default()).unwrap();
        let mesh = lenslets_to_stl(&array);
        // Every aperture is a hexagon, which takes 4 triangles
        assert_eq!(mesh.len(), 4 * array.lenses().len());

        let renderer = LensletRenderer::new(RenderConfig::default()).unwrap();
        let bytes = renderer.render_as_stl(&array);
        // Binary STL: 80 byte header, triangle count, 50 bytes per triangle
        assert_eq!(bytes.len(), 84 + 50 * mesh.len());
    }
}
