use std::rc::Rc;

use crate::math::{Point, Rect, Size};
use crate::scene::{Frame, Geometry, PaintId, SceneHandle, ShapeId};
use crate::style::Theme;
use crate::widget::{EventResult, MouseButtonEvent, MouseMoveEvent, Widget};

/// A padded background rectangle wrapping a single child widget. Used as the
/// popup surface of [`crate::ColorButton`].
pub struct Pane<W: Widget> {
    scene: SceneHandle,
    position: Point,
    size: Size,
    hidden: bool,
    padding: f32,

    background: ShapeId,
    background_paint: PaintId,
    child: W,
}

impl<W: Widget> Pane<W> {
    pub fn new(scene: SceneHandle, theme: Rc<Theme>, mut child: W) -> Self {
        let padding = theme.pane.padding;
        let child_size = child.size();
        let size = Size::new(
            child_size.width + 2.0 * padding,
            child_size.height + 2.0 * padding,
        );
        child.set_position(Point::new(padding, padding));

        let (background, background_paint) = {
            let mut s = scene.borrow_mut();
            let background = s.add_shape(Geometry::Rect {
                position: Point::ZERO,
                size,
            });
            (background, s.add_paint(theme.pane.background))
        };

        Self {
            scene,
            position: Point::ZERO,
            size,
            hidden: false,
            padding,
            background,
            background_paint,
            child,
        }
    }

    pub fn child(&self) -> &W {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut W {
        &mut self.child
    }

    fn to_child(&self, position: Point) -> Point {
        position - self.child.position()
    }
}

impl<W: Widget> Widget for Pane<W> {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.child.set_size(Size::new(
            size.width - 2.0 * self.padding,
            size.height - 2.0 * self.padding,
        ));
        // The child may have derived auto dimensions; fit around the result.
        let child_size = self.child.size();
        self.size = Size::new(
            child_size.width + 2.0 * self.padding,
            child_size.height + 2.0 * self.padding,
        );
        let mut scene = self.scene.borrow_mut();
        *scene.change(self.background) = Geometry::Rect {
            position: Point::ZERO,
            size: self.size,
        };
    }

    fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn mouse_button(&mut self, event: MouseButtonEvent) -> EventResult {
        self.child.mouse_button(MouseButtonEvent {
            position: self.to_child(event.position),
            ..event
        });
        // The pane swallows everything within its surface, so clicks on the
        // padding do not fall through to widgets underneath.
        if Rect::new(Point::ZERO, self.size).contains(event.position) {
            EventResult::Claimed
        } else {
            EventResult::Ignored
        }
    }

    fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        self.child.mouse_move(MouseMoveEvent {
            position: self.to_child(event.position),
        })
    }

    fn focus(&mut self, gained: bool) {
        self.child.focus(gained);
    }

    fn draw(&self, frame: &mut Frame) {
        frame.fill(self.background, self.background_paint);
        frame.push_translation(self.child.position());
        self.child.draw(frame);
        frame.pop_translation();
    }
}
