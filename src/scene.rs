//! The retained scene: shapes and paints owned by the toolkit, referenced by
//! widgets through copyable ids. Geometry is mutated through [`Scene::change`],
//! whose guard marks the shape dirty so the renderer re-tessellates it.

use std::cell::RefCell;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use ahash::{HashMap, HashMapExt};
use smallvec::SmallVec;

use crate::math::{Point, Size};
use crate::paint::Paint;

/// Identifies a shape stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a paint stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintId(pub u64);

/// Shared handle to a scene. The toolkit is single-threaded and
/// callback-driven, so interior mutability through `RefCell` is sufficient.
pub type SceneHandle = Rc<RefCell<Scene>>;

/// Shape geometry in widget-local coordinates. Translation to screen space
/// happens per draw command, so moving a widget never re-tessellates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// An axis-aligned rectangle.
    Rect { position: Point, size: Size },
    /// A regular polygon approximating a circle, `point_count` corners.
    Circle {
        center: Point,
        radius: f32,
        point_count: u32,
    },
    /// An open polyline, stroked with the shape's stroke width.
    Strip { points: SmallVec<[Point; 8]> },
}

#[derive(Debug)]
pub(crate) struct ShapeNode {
    pub geometry: Geometry,
    pub stroke_width: f32,
    pub dirty: bool,
}

/// Whether a draw command fills a shape's interior or strokes its outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStyle {
    Fill,
    Stroke,
}

/// One entry of a [`Frame`]: a shape, the paint to bind for it, and the
/// fill/stroke mode. Commands are rendered in order, painter style.
#[derive(Debug, Clone, Copy)]
pub struct DrawCmd {
    pub shape: ShapeId,
    pub paint: PaintId,
    pub style: DrawStyle,
    /// Screen-space translation applied after tessellation.
    pub offset: Point,
}

/// The per-frame draw list widgets push their commands into. A translation
/// stack tracks nested widget origins, so widgets always emit local
/// coordinates.
#[derive(Debug, Default)]
pub struct Frame {
    cmds: Vec<DrawCmd>,
    offset: Point,
    stack: SmallVec<[Point; 8]>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_translation(&mut self, offset: Point) {
        self.stack.push(self.offset);
        self.offset = self.offset + offset;
    }

    pub fn pop_translation(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.offset = prev;
        }
    }

    pub fn fill(&mut self, shape: ShapeId, paint: PaintId) {
        self.push(shape, paint, DrawStyle::Fill);
    }

    pub fn stroke(&mut self, shape: ShapeId, paint: PaintId) {
        self.push(shape, paint, DrawStyle::Stroke);
    }

    fn push(&mut self, shape: ShapeId, paint: PaintId, style: DrawStyle) {
        self.cmds.push(DrawCmd {
            shape,
            paint,
            style,
            offset: self.offset,
        });
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

/// Retained storage for shapes and paints.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: HashMap<ShapeId, ShapeNode>,
    paints: HashMap<PaintId, Paint>,
    next_shape: u64,
    next_paint: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            paints: HashMap::new(),
            next_shape: 0,
            next_paint: 0,
        }
    }

    /// Creates a scene behind a shared handle, ready to be cloned into
    /// widgets.
    pub fn new_handle() -> SceneHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn add_shape(&mut self, geometry: Geometry) -> ShapeId {
        self.add_shape_with_stroke(geometry, 1.0)
    }

    pub fn add_shape_with_stroke(&mut self, geometry: Geometry, stroke_width: f32) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        self.shapes.insert(
            id,
            ShapeNode {
                geometry,
                stroke_width,
                dirty: true,
            },
        );
        id
    }

    pub fn add_paint(&mut self, paint: impl Into<Paint>) -> PaintId {
        let id = PaintId(self.next_paint);
        self.next_paint += 1;
        self.paints.insert(id, paint.into());
        id
    }

    /// Read access to a shape's geometry.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this scene.
    pub fn geometry(&self, id: ShapeId) -> &Geometry {
        &self.shapes[&id].geometry
    }

    pub fn stroke_width(&self, id: ShapeId) -> f32 {
        self.shapes[&id].stroke_width
    }

    /// Begins a geometry change. The returned guard gives mutable access to
    /// the geometry and flags the shape for re-tessellation when dropped.
    pub fn change(&mut self, id: ShapeId) -> ChangeGuard<'_> {
        let node = self
            .shapes
            .get_mut(&id)
            .expect("shape id does not belong to this scene");
        ChangeGuard { node }
    }

    pub fn set_stroke_width(&mut self, id: ShapeId, width: f32) {
        let node = self
            .shapes
            .get_mut(&id)
            .expect("shape id does not belong to this scene");
        node.stroke_width = width;
        node.dirty = true;
    }

    pub fn paint(&self, id: PaintId) -> &Paint {
        &self.paints[&id]
    }

    /// Replaces a paint. Paints are evaluated every frame, so no dirty
    /// tracking is needed.
    pub fn set_paint(&mut self, id: PaintId, paint: impl Into<Paint>) {
        *self
            .paints
            .get_mut(&id)
            .expect("paint id does not belong to this scene") = paint.into();
    }

    pub(crate) fn node(&self, id: ShapeId) -> &ShapeNode {
        &self.shapes[&id]
    }

    /// Collects and clears the dirty flags, yielding the ids whose cached
    /// tessellation must be dropped.
    pub(crate) fn take_dirty(&mut self) -> Vec<ShapeId> {
        let mut dirty = Vec::new();
        for (id, node) in self.shapes.iter_mut() {
            if node.dirty {
                node.dirty = false;
                dirty.push(*id);
            }
        }
        dirty
    }
}

/// Transaction guard returned by [`Scene::change`].
pub struct ChangeGuard<'a> {
    node: &'a mut ShapeNode,
}

impl Deref for ChangeGuard<'_> {
    type Target = Geometry;

    fn deref(&self) -> &Geometry {
        &self.node.geometry
    }
}

impl DerefMut for ChangeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Geometry {
        &mut self.node.geometry
    }
}

impl Drop for ChangeGuard<'_> {
    fn drop(&mut self) {
        self.node.dirty = true;
    }
}
