//! The widget capability set. Concrete widgets implement [`Widget`] and are
//! dispatched dynamically by the [`crate::Gui`] root.
//!
//! Event positions are widget-local: the caller subtracts the widget's origin
//! before invoking a handler.

use crate::math::{Point, Rect, Size};
use crate::scene::Frame;

/// Identifies the mouse button of a [`MouseButtonEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, Copy)]
pub struct MouseButtonEvent {
    /// Position in the receiving widget's local coordinates.
    pub position: Point,
    pub button: MouseButton,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Position in the receiving widget's local coordinates.
    pub position: Point,
}

/// Whether a widget consumed an event. A claimed press grabs the mouse: the
/// widget keeps receiving moves and the release even when the pointer leaves
/// its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Claimed,
    Ignored,
}

pub trait Widget {
    /// Origin of the widget in its parent's coordinate space.
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);

    fn size(&self) -> Size;
    /// Resizes the widget. Dimensions equal to
    /// [`crate::math::AUTO_DIMENSION`] are derived by the widget.
    fn set_size(&mut self, size: Size);

    fn hide(&mut self, hidden: bool);
    fn hidden(&self) -> bool;

    fn mouse_button(&mut self, event: MouseButtonEvent) -> EventResult {
        let _ = event;
        EventResult::Ignored
    }

    fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        let _ = event;
        EventResult::Ignored
    }

    /// Keyboard-focus notification. Widgets with popups close them here.
    fn focus(&mut self, gained: bool) {
        let _ = gained;
    }

    /// True if the local point hits the widget. The default checks the size
    /// box; widgets with popups extend it.
    fn contains(&self, local: Point) -> bool {
        Rect::new(Point::ZERO, self.size()).contains(local)
    }

    /// Pushes this widget's draw commands. The frame's translation already
    /// points at the widget's origin.
    fn draw(&self, frame: &mut Frame);
}
