//! Turns retained scene geometry into triangle meshes with lyon. Meshes are
//! cached per shape and draw style until the shape's change guard marks it
//! dirty again.

use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use lyon::math::{point, Box2D};
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::math::Point;
use crate::scene::{DrawStyle, Geometry, Scene, ShapeId};

const MESH_CACHE_CAPACITY: usize = 512;

/// A tessellated shape in shape-local coordinates. `t` is the normalized
/// advancement along the stroked path (zero for fills); paints use it for
/// per-point colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 2],
    pub t: f32,
}

#[derive(Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

struct FillConverter;

impl FillVertexConstructor<MeshVertex> for FillConverter {
    fn new_vertex(&mut self, vertex: FillVertex) -> MeshVertex {
        MeshVertex {
            position: vertex.position().to_array(),
            t: 0.0,
        }
    }
}

struct StrokeConverter {
    inv_length: f32,
}

impl StrokeVertexConstructor<MeshVertex> for StrokeConverter {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> MeshVertex {
        MeshVertex {
            position: vertex.position().to_array(),
            t: (vertex.advancement() * self.inv_length).clamp(0.0, 1.0),
        }
    }
}

pub struct Tessellator {
    fill: FillTessellator,
    stroke: StrokeTessellator,
    cache: LruCache<(ShapeId, DrawStyle), Rc<Mesh>>,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    pub fn new() -> Self {
        Self {
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
            cache: LruCache::new(
                NonZeroUsize::new(MESH_CACHE_CAPACITY).expect("cache capacity must be non-zero"),
            ),
        }
    }

    /// Drops the cached meshes of a shape. Called by the renderer for every
    /// shape the scene reports dirty.
    pub fn invalidate(&mut self, shape: ShapeId) {
        self.cache.pop(&(shape, DrawStyle::Fill));
        self.cache.pop(&(shape, DrawStyle::Stroke));
    }

    /// Returns the mesh of a shape, tessellating on a cache miss.
    pub fn mesh(&mut self, scene: &Scene, shape: ShapeId, style: DrawStyle) -> Rc<Mesh> {
        if let Some(mesh) = self.cache.get(&(shape, style)) {
            return mesh.clone();
        }

        let node = scene.node(shape);
        let mesh = Rc::new(match style {
            DrawStyle::Fill => self.tessellate_fill(&node.geometry),
            DrawStyle::Stroke => self.tessellate_stroke(&node.geometry, node.stroke_width),
        });
        self.cache.put((shape, style), mesh.clone());
        mesh
    }

    fn tessellate_fill(&mut self, geometry: &Geometry) -> Mesh {
        // Rectangles fill as a plain quad, no tessellator involved.
        if let Geometry::Rect { position, size } = geometry {
            let (min_x, min_y) = (position.x, position.y);
            let (max_x, max_y) = (position.x + size.width, position.y + size.height);
            return Mesh {
                vertices: vec![
                    MeshVertex {
                        position: [min_x, min_y],
                        t: 0.0,
                    },
                    MeshVertex {
                        position: [max_x, min_y],
                        t: 0.0,
                    },
                    MeshVertex {
                        position: [min_x, max_y],
                        t: 0.0,
                    },
                    MeshVertex {
                        position: [max_x, max_y],
                        t: 0.0,
                    },
                ],
                indices: vec![0, 1, 2, 2, 1, 3],
            };
        }

        let Some(path) = build_path(geometry, true) else {
            return Mesh::default();
        };

        let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
        self.fill
            .tessellate_path(
                &path,
                &FillOptions::default(),
                &mut BuffersBuilder::new(&mut buffers, FillConverter),
            )
            .unwrap();

        Mesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        }
    }

    fn tessellate_stroke(&mut self, geometry: &Geometry, width: f32) -> Mesh {
        if width <= 0.0 {
            return Mesh::default();
        }
        let Some(path) = build_path(geometry, false) else {
            return Mesh::default();
        };

        let length = path_length(geometry);
        let converter = StrokeConverter {
            inv_length: if length > 0.0 { 1.0 / length } else { 0.0 },
        };

        let mut buffers: VertexBuffers<MeshVertex, u32> = VertexBuffers::new();
        self.stroke
            .tessellate_path(
                &path,
                &StrokeOptions::default().with_line_width(width),
                &mut BuffersBuilder::new(&mut buffers, converter),
            )
            .unwrap();

        Mesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        }
    }
}

/// Builds the lyon path of a geometry. `for_fill` only matters for strips,
/// which close when filled and stay open when stroked. Returns `None` for
/// degenerate geometry.
fn build_path(geometry: &Geometry, for_fill: bool) -> Option<Path> {
    let mut builder = Path::builder();
    match geometry {
        Geometry::Rect { position, size } => {
            let min = point(position.x, position.y);
            let max = point(position.x + size.width, position.y + size.height);
            builder.add_rectangle(&Box2D::new(min, max), Winding::Positive);
        }
        Geometry::Circle {
            center,
            radius,
            point_count,
        } => {
            if *point_count < 3 || *radius <= 0.0 {
                return None;
            }
            let corners = polygon_points(*center, *radius, *point_count);
            builder.begin(point(corners[0].x, corners[0].y));
            for p in &corners[1..] {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(true);
        }
        Geometry::Strip { points } => {
            if points.len() < 2 {
                return None;
            }
            builder.begin(point(points[0].x, points[0].y));
            for p in &points[1..] {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(for_fill);
        }
    }
    Some(builder.build())
}

fn polygon_points(center: Point, radius: f32, count: u32) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn path_length(geometry: &Geometry) -> f32 {
    let segment = |a: Point, b: Point| {
        let d = b - a;
        (d.x * d.x + d.y * d.y).sqrt()
    };
    match geometry {
        Geometry::Rect { size, .. } => 2.0 * (size.width + size.height),
        Geometry::Circle {
            center,
            radius,
            point_count,
        } => {
            let corners = polygon_points(*center, *radius, *point_count);
            let mut len = 0.0;
            for i in 0..corners.len() {
                len += segment(corners[i], corners[(i + 1) % corners.len()]);
            }
            len
        }
        Geometry::Strip { points } => points.windows(2).map(|w| segment(w[0], w[1])).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use smallvec::smallvec;

    #[test]
    fn rect_fill_is_a_quad() {
        let mut scene = Scene::new();
        let id = scene.add_shape(Geometry::Rect {
            position: Point::new(5.0, 5.0),
            size: Size::new(10.0, 20.0),
        });
        scene.take_dirty();

        let mut tess = Tessellator::new();
        let mesh = tess.mesh(&scene, id, DrawStyle::Fill);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh
            .vertices
            .iter()
            .any(|v| v.position == [15.0, 25.0]));
    }

    #[test]
    fn strip_stroke_advancement_is_normalized() {
        let mut scene = Scene::new();
        let id = scene.add_shape_with_stroke(
            Geometry::Strip {
                points: smallvec![Point::new(0.0, 0.0), Point::new(0.0, 100.0)],
            },
            20.0,
        );
        scene.take_dirty();

        let mut tess = Tessellator::new();
        let mesh = tess.mesh(&scene, id, DrawStyle::Stroke);
        assert!(!mesh.is_empty());
        for v in &mesh.vertices {
            assert!((0.0..=1.0).contains(&v.t));
            // Butt caps keep the stroke within width/2 of the center line.
            assert!(v.position[0].abs() <= 10.0 + 1e-3);
        }
        assert!(mesh.vertices.iter().any(|v| v.t < 1e-3));
        assert!(mesh.vertices.iter().any(|v| v.t > 1.0 - 1e-3));
    }

    #[test]
    fn cache_serves_same_mesh_until_invalidated() {
        let mut scene = Scene::new();
        let id = scene.add_shape(Geometry::Rect {
            position: Point::ZERO,
            size: Size::new(1.0, 1.0),
        });
        scene.take_dirty();

        let mut tess = Tessellator::new();
        let first = tess.mesh(&scene, id, DrawStyle::Fill);
        let second = tess.mesh(&scene, id, DrawStyle::Fill);
        assert!(Rc::ptr_eq(&first, &second));

        tess.invalidate(id);
        let third = tess.mesh(&scene, id, DrawStyle::Fill);
        assert!(!Rc::ptr_eq(&first, &third));
    }

    #[test]
    fn degenerate_shapes_produce_empty_meshes() {
        let mut scene = Scene::new();
        let strip = scene.add_shape(Geometry::Strip {
            points: smallvec![Point::ZERO],
        });
        let dot = scene.add_shape(Geometry::Circle {
            center: Point::ZERO,
            radius: 0.0,
            point_count: 6,
        });
        scene.take_dirty();

        let mut tess = Tessellator::new();
        assert!(tess.mesh(&scene, strip, DrawStyle::Stroke).is_empty());
        assert!(tess.mesh(&scene, dot, DrawStyle::Fill).is_empty());
    }
}
