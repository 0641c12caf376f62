use std::rc::Rc;

use crate::math::{Point, Rect, Size, AUTO_DIMENSION};
use crate::scene::{Frame, Geometry, PaintId, SceneHandle, ShapeId};
use crate::style::Theme;
use crate::widget::{EventResult, MouseButton, MouseButtonEvent, MouseMoveEvent, Widget};

/// A plain rectangular button. A completed click (press and release inside
/// the bounds) sets a latch that composite widgets consume with
/// [`Button::take_click`].
pub struct Button {
    scene: SceneHandle,
    position: Point,
    size: Size,
    hidden: bool,

    background: ShapeId,
    normal_paint: PaintId,
    hovered_paint: PaintId,
    pressed_paint: PaintId,

    hovered: bool,
    pressed: bool,
    clicked: bool,
}

impl Button {
    pub fn new(scene: SceneHandle, theme: Rc<Theme>, position: Point, size: Size) -> Self {
        let (background, normal_paint, hovered_paint, pressed_paint) = {
            let mut s = scene.borrow_mut();
            let background = s.add_shape(Geometry::Rect {
                position: Point::ZERO,
                size: Size::default(),
            });
            (
                background,
                s.add_paint(theme.button.background),
                s.add_paint(theme.button.hovered),
                s.add_paint(theme.button.pressed),
            )
        };

        let mut button = Self {
            scene,
            position,
            size: Size::default(),
            hidden: false,
            background,
            normal_paint,
            hovered_paint,
            pressed_paint,
            hovered: false,
            pressed: false,
            clicked: false,
        };
        button.set_size(size);
        button
    }

    /// Consumes the click latch. Returns true once per completed click.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }
}

impl Widget for Button {
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
        let mut size = size;
        if size.width == AUTO_DIMENSION && size.height == AUTO_DIMENSION {
            size = Size::new(100.0, 25.0);
        } else if size.width == AUTO_DIMENSION {
            size.width = size.height * 4.0;
        } else if size.height == AUTO_DIMENSION {
            size.height = size.width / 4.0;
        }

        self.size = size;
        let mut scene = self.scene.borrow_mut();
        *scene.change(self.background) = Geometry::Rect {
            position: Point::ZERO,
            size,
        };
    }

    fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn mouse_button(&mut self, event: MouseButtonEvent) -> EventResult {
        if event.button != MouseButton::Left {
            return EventResult::Ignored;
        }

        let inside = Rect::new(Point::ZERO, self.size).contains(event.position);
        if event.pressed {
            if !inside {
                return EventResult::Ignored;
            }
            self.pressed = true;
        } else {
            if self.pressed && inside {
                self.clicked = true;
            }
            self.pressed = false;
        }
        EventResult::Claimed
    }

    fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        self.hovered = Rect::new(Point::ZERO, self.size).contains(event.position);
        if self.pressed || self.hovered {
            EventResult::Claimed
        } else {
            EventResult::Ignored
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let paint = if self.pressed {
            self.pressed_paint
        } else if self.hovered {
            self.hovered_paint
        } else {
            self.normal_paint
        };
        frame.fill(self.background, paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;

    fn button() -> Button {
        Button::new(
            Scene::new_handle(),
            Theme::new_handle(),
            Point::ZERO,
            Size::new(80.0, 24.0),
        )
    }

    #[test]
    fn click_latch_requires_release_inside() {
        let mut b = button();
        b.mouse_button(MouseButtonEvent {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
            pressed: true,
        });
        b.mouse_button(MouseButtonEvent {
            position: Point::new(500.0, 10.0),
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(!b.take_click());

        b.mouse_button(MouseButtonEvent {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
            pressed: true,
        });
        b.mouse_button(MouseButtonEvent {
            position: Point::new(12.0, 10.0),
            button: MouseButton::Left,
            pressed: false,
        });
        assert!(b.take_click());
        // The latch is consumed.
        assert!(!b.take_click());
    }

    #[test]
    fn auto_size_derives_missing_dimension() {
        let mut b = button();
        b.set_size(Size::new(AUTO_DIMENSION, 30.0));
        assert_eq!(b.size(), Size::new(120.0, 30.0));

        b.set_size(Size::AUTO);
        assert_eq!(b.size(), Size::new(100.0, 25.0));
    }
}
