//! The widget root. [`Gui`] owns the widgets, routes window-space mouse
//! events to them in local coordinates, and collects the per-frame draw list.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::math::Point;
use crate::scene::{Frame, SceneHandle};
use crate::style::Theme;
use crate::widget::{EventResult, MouseButtonEvent, MouseMoveEvent, Widget};

type WidgetHandle = Rc<RefCell<dyn Widget>>;

pub struct Gui {
    scene: SceneHandle,
    theme: Rc<Theme>,
    widgets: Vec<WidgetHandle>,
    /// Index of the widget that claimed the current press, if any. It keeps
    /// receiving moves and the release while the button is held.
    grab: Option<usize>,
    hovered: Option<usize>,
    focused: Option<usize>,
}

impl Gui {
    pub fn new(scene: SceneHandle, theme: Rc<Theme>) -> Self {
        Self {
            scene,
            theme,
            widgets: Vec::new(),
            grab: None,
            hovered: None,
            focused: None,
        }
    }

    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    pub fn theme(&self) -> &Rc<Theme> {
        &self.theme
    }

    /// Adds a widget on top of the existing ones and returns a shared handle
    /// to it, so the caller keeps typed access while the root dispatches
    /// through the trait.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> Rc<RefCell<W>> {
        let handle = Rc::new(RefCell::new(widget));
        self.widgets.push(handle.clone());
        handle
    }

    /// Topmost visible widget containing the window-space point.
    fn hit_test(&self, position: Point) -> Option<usize> {
        self.widgets.iter().enumerate().rev().find_map(|(i, w)| {
            let w = w.borrow();
            if !w.hidden() && w.contains(position - w.position()) {
                Some(i)
            } else {
                None
            }
        })
    }

    fn dispatch_button(&self, index: usize, event: MouseButtonEvent) -> EventResult {
        let mut widget = self.widgets[index].borrow_mut();
        let local = event.position - widget.position();
        widget.mouse_button(MouseButtonEvent {
            position: local,
            ..event
        })
    }

    fn set_focus(&mut self, target: Option<usize>) {
        if self.focused == target {
            return;
        }
        if let Some(old) = self.focused {
            self.widgets[old].borrow_mut().focus(false);
        }
        if let Some(new) = target {
            self.widgets[new].borrow_mut().focus(true);
        }
        self.focused = target;
    }

    /// Routes a mouse-button event. Positions are in window space.
    pub fn mouse_button(&mut self, event: MouseButtonEvent) -> EventResult {
        if let Some(index) = self.grab {
            let result = self.dispatch_button(index, event);
            if !event.pressed {
                self.grab = None;
            }
            return result;
        }

        if !event.pressed {
            return EventResult::Ignored;
        }

        let hit = self.hit_test(event.position);
        trace!(?hit, x = event.position.x, y = event.position.y, "press");
        self.set_focus(hit);

        let Some(index) = hit else {
            return EventResult::Ignored;
        };
        let result = self.dispatch_button(index, event);
        if result == EventResult::Claimed {
            self.grab = Some(index);
        }
        result
    }

    /// Routes a mouse-move event. The previously hovered widget also receives
    /// the move so it can drop its hover state.
    pub fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        let deliver = |widgets: &[WidgetHandle], index: usize| {
            let mut widget = widgets[index].borrow_mut();
            let local = event.position - widget.position();
            widget.mouse_move(MouseMoveEvent { position: local })
        };

        if let Some(index) = self.grab {
            return deliver(&self.widgets, index);
        }

        let hit = self.hit_test(event.position);
        if let Some(old) = self.hovered {
            if hit != Some(old) {
                deliver(&self.widgets, old);
            }
        }
        self.hovered = hit;

        match hit {
            Some(index) => deliver(&self.widgets, index),
            None => EventResult::Ignored,
        }
    }

    /// Collects the draw commands of all visible widgets, bottom to top.
    pub fn draw(&self) -> Frame {
        let mut frame = Frame::new();
        for handle in &self.widgets {
            let widget = handle.borrow();
            if widget.hidden() {
                continue;
            }
            frame.push_translation(widget.position());
            widget.draw(&mut frame);
            frame.pop_translation();
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::math::Size;
    use crate::scene::Scene;
    use crate::widget::MouseButton;
    use crate::widgets::{Button, ColorPicker};

    fn press_at(gui: &mut Gui, x: f32, y: f32) -> EventResult {
        gui.mouse_button(MouseButtonEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            pressed: true,
        })
    }

    fn release_at(gui: &mut Gui, x: f32, y: f32) -> EventResult {
        gui.mouse_button(MouseButtonEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            pressed: false,
        })
    }

    #[test]
    fn grab_routes_drag_to_pressed_widget() {
        let scene = Scene::new_handle();
        let theme = Theme::new_handle();
        let mut gui = Gui::new(scene.clone(), theme.clone());
        let picker = gui.add(ColorPicker::new(
            scene,
            theme,
            Point::new(50.0, 50.0),
            Size::new(230.0, 200.0),
            Color::rgb(255, 0, 0),
        ));

        // Press in the middle of the saturation/value square.
        assert_eq!(press_at(&mut gui, 153.0, 150.0), EventResult::Claimed);
        // Drag far outside the widget; the grab keeps it tracking.
        gui.mouse_move(MouseMoveEvent {
            position: Point::new(500.0, 500.0),
        });
        let (s, v) = picker.borrow().current_sv();
        assert_eq!((s, v), (1.0, 0.0));

        release_at(&mut gui, 500.0, 500.0);
        // After release the drag is over; moves elsewhere change nothing.
        gui.mouse_move(MouseMoveEvent {
            position: Point::new(153.0, 150.0),
        });
        let (s, v) = picker.borrow().current_sv();
        assert_eq!((s, v), (1.0, 0.0));
    }

    #[test]
    fn press_on_empty_space_unfocuses() {
        let scene = Scene::new_handle();
        let theme = Theme::new_handle();
        let mut gui = Gui::new(scene.clone(), theme.clone());
        let button = gui.add(Button::new(
            scene,
            theme,
            Point::ZERO,
            Size::new(80.0, 24.0),
        ));

        press_at(&mut gui, 10.0, 10.0);
        release_at(&mut gui, 10.0, 10.0);
        assert!(button.borrow_mut().take_click());
        assert_eq!(gui.focused, Some(0));

        assert_eq!(press_at(&mut gui, 400.0, 400.0), EventResult::Ignored);
        assert_eq!(gui.focused, None);
    }

    #[test]
    fn hidden_widgets_are_skipped() {
        let scene = Scene::new_handle();
        let theme = Theme::new_handle();
        let mut gui = Gui::new(scene.clone(), theme.clone());
        let button = gui.add(Button::new(
            scene,
            theme,
            Point::ZERO,
            Size::new(80.0, 24.0),
        ));

        button.borrow_mut().hide(true);
        assert_eq!(press_at(&mut gui, 10.0, 10.0), EventResult::Ignored);
        assert!(gui.draw().is_empty());

        button.borrow_mut().hide(false);
        assert_eq!(press_at(&mut gui, 10.0, 10.0), EventResult::Claimed);
        assert!(!gui.draw().is_empty());
    }

    #[test]
    fn topmost_widget_wins_hit_test() {
        let scene = Scene::new_handle();
        let theme = Theme::new_handle();
        let mut gui = Gui::new(scene.clone(), theme.clone());
        let below = gui.add(Button::new(
            scene.clone(),
            theme.clone(),
            Point::ZERO,
            Size::new(80.0, 24.0),
        ));
        let above = gui.add(Button::new(
            scene,
            theme,
            Point::ZERO,
            Size::new(80.0, 24.0),
        ));

        press_at(&mut gui, 10.0, 10.0);
        release_at(&mut gui, 10.0, 10.0);
        assert!(!below.borrow_mut().take_click());
        assert!(above.borrow_mut().take_click());
    }
}
