//! The HSV color picker: a saturation/value square next to a vertical hue
//! strip. Marker geometry is the source of truth for the picked color, so
//! reading the color back always matches what is on screen.

use std::rc::Rc;

use smallvec::SmallVec;
use tracing::trace;

use crate::color::{Color, Hsv};
use crate::math::{Point, Rect, Size, AUTO_DIMENSION};
use crate::paint::{LinearGradient, Paint};
use crate::scene::{Frame, Geometry, PaintId, SceneHandle, ShapeId};
use crate::style::Theme;
use crate::widget::{EventResult, MouseButton, MouseButtonEvent, MouseMoveEvent, Widget};
use crate::widgets::{Button, Pane};

/// Number of color stops on the hue strip: one per 60 degrees of hue, plus
/// the closing stop back at red.
const HUE_STOPS: usize = 7;

type ChangeCallback = Box<dyn FnMut(&ColorPicker)>;

pub struct ColorPicker {
    scene: SceneHandle,
    theme: Rc<Theme>,
    position: Point,
    size: Size,
    hidden: bool,

    /// The saturation/value square, at the local origin.
    selector: ShapeId,
    /// Vertical strip showing the full hue range.
    hue_strip: ShapeId,
    /// Rectangle marking the current hue on the strip.
    hue_marker: ShapeId,
    /// Ring marking the current saturation/value in the square.
    color_marker: ShapeId,

    /// Fully saturated fill at the current hue.
    base_paint: PaintId,
    /// White-to-transparent, left to right: encodes saturation.
    s_grad: PaintId,
    /// Transparent-to-black, top to bottom: encodes value.
    v_grad: PaintId,
    /// Per-point hue colors of the strip.
    hue_paint: PaintId,
    marker_paint: Option<PaintId>,
    outline_paint: Option<PaintId>,

    sliding_sv: bool,
    sliding_hue: bool,
    on_change: Option<ChangeCallback>,
}

impl ColorPicker {
    pub fn new(
        scene: SceneHandle,
        theme: Rc<Theme>,
        position: Point,
        size: Size,
        start: Color,
    ) -> Self {
        let style = &theme.color_picker;
        let hsv = start.to_hsv();

        let (selector, hue_strip, hue_marker, color_marker) = {
            let mut s = scene.borrow_mut();
            let selector = s.add_shape_with_stroke(
                Geometry::Rect {
                    position: Point::ZERO,
                    size: Size::default(),
                },
                style.outline_width,
            );
            let hue_strip = s.add_shape_with_stroke(
                Geometry::Strip {
                    points: SmallVec::new(),
                },
                style.hue_width,
            );
            let hue_marker = s.add_shape_with_stroke(
                Geometry::Rect {
                    position: Point::ZERO,
                    size: Size::default(),
                },
                style.hue_marker_thickness,
            );
            let color_marker = s.add_shape_with_stroke(
                Geometry::Circle {
                    center: Point::ZERO,
                    radius: style.color_marker_radius,
                    point_count: 6,
                },
                style.color_marker_thickness,
            );
            (selector, hue_strip, hue_marker, color_marker)
        };

        let (base_paint, s_grad, v_grad, hue_paint, marker_paint, outline_paint) = {
            let mut s = scene.borrow_mut();
            let base = s.add_paint(Color::from_hsv(Hsv::new(hsv.h, 1.0, 1.0)));
            let s_grad = s.add_paint(Color::TRANSPARENT);
            let v_grad = s.add_paint(Color::TRANSPARENT);
            let hue_paint = s.add_paint(Paint::point_colors(
                (0..HUE_STOPS)
                    .map(|i| Color::from_hsv(Hsv::new(i as f32 / (HUE_STOPS - 1) as f32, 1.0, 1.0))),
            ));
            let marker_paint = style.marker.clone().map(|p| s.add_paint(p));
            let outline_paint = style.outline.clone().map(|p| s.add_paint(p));
            (base, s_grad, v_grad, hue_paint, marker_paint, outline_paint)
        };

        let mut picker = Self {
            scene,
            theme,
            position,
            size: Size::default(),
            hidden: false,
            selector,
            hue_strip,
            hue_marker,
            color_marker,
            base_paint,
            s_grad,
            v_grad,
            hue_paint,
            marker_paint,
            outline_paint,
            sliding_sv: false,
            sliding_hue: false,
            on_change: None,
        };
        picker.resize_to(hsv, size);
        picker
    }

    /// Registers the change sink. It is invoked synchronously, once per
    /// committed interactive change, after all geometry and paint updates.
    /// Programmatic [`ColorPicker::pick`] calls do not trigger it.
    pub fn set_on_change(&mut self, callback: impl FnMut(&ColorPicker) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Sets the picker to the given color without notifying the change sink.
    pub fn pick(&mut self, color: Color) {
        let hsv = color.to_hsv();
        let style = &self.theme.color_picker;
        let sel = self.selector_size();

        let mut scene = self.scene.borrow_mut();
        if let Geometry::Rect { position, .. } = &mut *scene.change(self.hue_marker) {
            position.y = hsv.h * sel.height - style.hue_marker_height / 2.0;
        }
        if let Geometry::Circle { center, .. } = &mut *scene.change(self.color_marker) {
            *center = Point::new(hsv.s * sel.width, (1.0 - hsv.v) * sel.height);
        }
        scene.set_paint(
            self.base_paint,
            Color::from_hsv(Hsv::new(hsv.h, 1.0, 1.0)),
        );
    }

    /// The color currently encoded by the marker positions.
    pub fn picked(&self) -> Color {
        let (s, v) = self.current_sv();
        Color::from_hsv(Hsv::new(self.current_hue(), s, v))
    }

    /// Normalized hue derived from the hue marker's vertical center.
    pub fn current_hue(&self) -> f32 {
        let style = &self.theme.color_picker;
        let sel = self.selector_size();
        let scene = self.scene.borrow();
        let Geometry::Rect { position, .. } = scene.geometry(self.hue_marker) else {
            unreachable!("hue marker is a rectangle");
        };
        (position.y + style.hue_marker_height / 2.0) / sel.height
    }

    /// Normalized (saturation, value) derived from the ring marker's center.
    /// Value is measured from the top edge.
    pub fn current_sv(&self) -> (f32, f32) {
        let sel = self.selector_size();
        let scene = self.scene.borrow();
        let Geometry::Circle { center, .. } = scene.geometry(self.color_marker) else {
            unreachable!("color marker is a circle");
        };
        (center.x / sel.width, 1.0 - center.y / sel.height)
    }

    fn selector_size(&self) -> Size {
        let scene = self.scene.borrow();
        let Geometry::Rect { size, .. } = scene.geometry(self.selector) else {
            unreachable!("selector is a rectangle");
        };
        *size
    }

    /// Recomputes all derived geometry for `size`, placing the markers at
    /// `hsv`.
    fn resize_to(&mut self, hsv: Hsv, size: Size) {
        let style = self.theme.color_picker.clone();

        let mut size = size;
        if size.width == AUTO_DIMENSION && size.height == AUTO_DIMENSION {
            size = Size::new(230.0, 200.0);
        } else if size.width == AUTO_DIMENSION {
            size.width = (0.87 * size.height).min(150.0);
        } else if size.height == AUTO_DIMENSION {
            size.height = (1.15 * size.width).min(120.0);
        }

        let sel = Size::new(
            size.width - style.hue_width - style.hue_padding,
            size.height,
        );

        let mut scene = self.scene.borrow_mut();
        *scene.change(self.selector) = Geometry::Rect {
            position: Point::ZERO,
            size: sel,
        };

        let ystep = size.height / (HUE_STOPS - 1) as f32;
        let x = size.width - style.hue_width / 2.0;
        *scene.change(self.hue_strip) = Geometry::Strip {
            points: (0..HUE_STOPS)
                .map(|i| Point::new(x, ystep * i as f32))
                .collect(),
        };

        *scene.change(self.hue_marker) = Geometry::Rect {
            position: Point::new(
                size.width - style.hue_width,
                hsv.h * sel.height - style.hue_marker_height / 2.0,
            ),
            size: Size::new(style.hue_width, style.hue_marker_height),
        };

        *scene.change(self.color_marker) = Geometry::Circle {
            center: Point::new(hsv.s * sel.width, (1.0 - hsv.v) * sel.height),
            radius: style.color_marker_radius,
            point_count: 6,
        };

        scene.set_paint(
            self.s_grad,
            Paint::Linear(LinearGradient::new(
                (0.0, 0.0),
                (sel.width, 0.0),
                Color::WHITE,
                Color::WHITE.with_alpha(0),
            )),
        );
        scene.set_paint(
            self.v_grad,
            Paint::Linear(LinearGradient::new(
                (0.0, 0.0),
                (0.0, sel.height),
                Color::BLACK.with_alpha(0),
                Color::BLACK,
            )),
        );

        self.size = size;
    }

    /// Resolves a press or drag position against the two interactive
    /// regions. `fresh` is true for the press that starts an interaction;
    /// move events continue whichever drag is in progress.
    ///
    /// Once a drag flag is set, positions are clamped to the tracked region
    /// even when the raw position lands in the other one.
    fn click(&mut self, position: Point, fresh: bool) {
        let style = self.theme.color_picker.clone();
        let sel = self.selector_size();
        let position = Rect::new(Point::ZERO, self.size).clamp_point(position);

        let sv_rect = Rect::new(Point::ZERO, sel);
        let hue_rect = Rect::new(
            (sel.width + style.hue_padding, 0.0),
            (style.hue_width, sel.height),
        );

        if self.sliding_sv || (fresh && sv_rect.contains(position)) {
            self.sliding_sv = true;
            let position = sv_rect.clamp_point(position);
            {
                let mut scene = self.scene.borrow_mut();
                if let Geometry::Circle { center, .. } = &mut *scene.change(self.color_marker) {
                    *center = position;
                };
            }
            trace!(x = position.x, y = position.y, "sv marker moved");
            self.notify_change();
        } else if self.sliding_hue || (fresh && hue_rect.contains(position)) {
            self.sliding_hue = true;
            let position = hue_rect.clamp_point(position);
            let norm = position.y / sel.height;
            {
                let mut scene = self.scene.borrow_mut();
                if let Geometry::Rect { position: p, .. } = &mut *scene.change(self.hue_marker) {
                    p.y = position.y - style.hue_marker_height / 2.0;
                }
                scene.set_paint(
                    self.base_paint,
                    Color::from_hsv(Hsv::new(norm, 1.0, 1.0)),
                );
            }
            trace!(hue = norm, "hue marker moved");
            self.notify_change();
        }
    }

    fn notify_change(&mut self) {
        if let Some(mut callback) = self.on_change.take() {
            callback(self);
            // A callback registered by the callback itself wins.
            if self.on_change.is_none() {
                self.on_change = Some(callback);
            }
        }
    }
}

impl Widget for ColorPicker {
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
        let (s, v) = self.current_sv();
        let hue = self.current_hue();
        self.resize_to(Hsv::new(hue, s, v), size);
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

        if event.pressed {
            self.click(event.position, true);
        } else {
            self.sliding_sv = false;
            self.sliding_hue = false;
        }
        EventResult::Claimed
    }

    fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        self.click(event.position, false);
        EventResult::Claimed
    }

    fn draw(&self, frame: &mut Frame) {
        let marker = self
            .marker_paint
            .expect("color picker style has no marker paint");

        frame.fill(self.selector, self.base_paint);
        frame.fill(self.selector, self.s_grad);
        frame.fill(self.selector, self.v_grad);
        frame.stroke(self.hue_strip, self.hue_paint);
        if let Some(outline) = self.outline_paint {
            frame.stroke(self.selector, outline);
        }
        frame.stroke(self.hue_marker, marker);
        frame.stroke(self.color_marker, marker);
    }
}

type ColorButtonCallback = Box<dyn FnMut(&ColorButton)>;

/// A button displaying the picked color in a swatch. Clicking it toggles a
/// popup pane with a [`ColorPicker`]; the popup also closes when the button
/// loses focus.
pub struct ColorButton {
    scene: SceneHandle,
    position: Point,
    hidden: bool,

    button: Button,
    swatch: ShapeId,
    swatch_paint: PaintId,
    swatch_padding: f32,

    popup: Pane<ColorPicker>,
    popup_open: bool,
    /// True while a press routed into the popup has not been released, so
    /// drags keep going to the picker even outside the popup.
    popup_grab: bool,

    last_picked: Color,
    on_change: Option<ColorButtonCallback>,
}

impl ColorButton {
    pub fn new(
        scene: SceneHandle,
        theme: Rc<Theme>,
        position: Point,
        size: Size,
        picker_size: Size,
        start: Color,
    ) -> Self {
        let padding = theme.button.padding;
        let size = Self::resolve_size(size, padding);

        let button = Button::new(scene.clone(), theme.clone(), Point::ZERO, size);

        let picker = ColorPicker::new(
            scene.clone(),
            theme.clone(),
            Point::ZERO,
            picker_size,
            start,
        );
        let last_picked = picker.picked();
        let mut popup = Pane::new(scene.clone(), theme.clone(), picker);
        popup.set_position(Point::new(0.0, size.height));

        let (swatch, swatch_paint) = {
            let mut s = scene.borrow_mut();
            let swatch = s.add_shape(Geometry::Rect {
                position: Point::new(padding, padding),
                size: Size::new(size.width - 2.0 * padding, size.height - 2.0 * padding),
            });
            (swatch, s.add_paint(last_picked))
        };

        Self {
            scene,
            position,
            hidden: false,
            button,
            swatch,
            swatch_paint,
            swatch_padding: padding,
            popup,
            popup_open: false,
            popup_grab: false,
            last_picked,
            on_change: None,
        }
    }

    fn resolve_size(size: Size, padding: f32) -> Size {
        let mut size = size;
        if size.width == AUTO_DIMENSION && size.height == AUTO_DIMENSION {
            size = Size::new(100.0 + 2.0 * padding, 25.0 + 2.0 * padding);
        } else if size.width == AUTO_DIMENSION {
            size.width = size.height * 4.0;
        } else if size.height == AUTO_DIMENSION {
            size.height = size.width / 4.0;
        }
        size
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(&ColorButton) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn picker(&self) -> &ColorPicker {
        self.popup.child()
    }

    pub fn picked(&self) -> Color {
        self.popup.child().picked()
    }

    /// Sets the color programmatically. No change notification fires.
    pub fn pick(&mut self, color: Color) {
        self.popup.child_mut().pick(color);
        self.last_picked = self.popup.child().picked();
        self.scene
            .borrow_mut()
            .set_paint(self.swatch_paint, self.last_picked);
    }

    pub fn popup_open(&self) -> bool {
        self.popup_open
    }

    fn popup_rect(&self) -> Rect {
        Rect::new(self.popup.position(), self.popup.size())
    }

    fn to_popup(&self, position: Point) -> Point {
        position - self.popup.position()
    }

    /// Propagates a picker change into the swatch and this widget's sink.
    fn sync_picked(&mut self) {
        let picked = self.popup.child().picked();
        if picked == self.last_picked {
            return;
        }
        self.last_picked = picked;
        self.scene
            .borrow_mut()
            .set_paint(self.swatch_paint, picked);
        if let Some(mut callback) = self.on_change.take() {
            callback(self);
            if self.on_change.is_none() {
                self.on_change = Some(callback);
            }
        }
    }
}

impl Widget for ColorButton {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.button.size()
    }

    fn set_size(&mut self, size: Size) {
        let size = Self::resolve_size(size, self.swatch_padding);
        self.button.set_size(size);
        self.popup.set_position(Point::new(0.0, size.height));

        let mut scene = self.scene.borrow_mut();
        *scene.change(self.swatch) = Geometry::Rect {
            position: Point::new(self.swatch_padding, self.swatch_padding),
            size: Size::new(
                size.width - 2.0 * self.swatch_padding,
                size.height - 2.0 * self.swatch_padding,
            ),
        };
    }

    fn hide(&mut self, hidden: bool) {
        self.hidden = hidden;
        if hidden {
            self.popup_open = false;
            self.popup_grab = false;
        }
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn contains(&self, local: Point) -> bool {
        Rect::new(Point::ZERO, self.size()).contains(local)
            || (self.popup_open && self.popup_rect().contains(local))
    }

    fn mouse_button(&mut self, event: MouseButtonEvent) -> EventResult {
        if event.pressed {
            if self.popup_open
                && event.button == MouseButton::Left
                && self.popup_rect().contains(event.position)
            {
                self.popup_grab = true;
                self.popup.mouse_button(MouseButtonEvent {
                    position: self.to_popup(event.position),
                    ..event
                });
                self.sync_picked();
                return EventResult::Claimed;
            }
            let result = self.button.mouse_button(event);
            if self.button.take_click() {
                self.popup_open = !self.popup_open;
            }
            result
        } else {
            if self.popup_grab {
                self.popup_grab = false;
                self.popup.mouse_button(MouseButtonEvent {
                    position: self.to_popup(event.position),
                    ..event
                });
                self.sync_picked();
                return EventResult::Claimed;
            }
            let result = self.button.mouse_button(event);
            if self.button.take_click() {
                self.popup_open = !self.popup_open;
            }
            result
        }
    }

    fn mouse_move(&mut self, event: MouseMoveEvent) -> EventResult {
        if self.popup_grab || (self.popup_open && self.popup_rect().contains(event.position)) {
            self.popup.mouse_move(MouseMoveEvent {
                position: self.to_popup(event.position),
            });
            self.sync_picked();
            return EventResult::Claimed;
        }
        self.button.mouse_move(event)
    }

    fn focus(&mut self, gained: bool) {
        if !gained {
            self.popup_open = false;
            self.popup_grab = false;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        self.button.draw(frame);
        frame.fill(self.swatch, self.swatch_paint);
        if self.popup_open {
            frame.push_translation(self.popup.position());
            self.popup.draw(frame);
            frame.pop_translation();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::scene::Scene;

    fn picker(start: Color) -> ColorPicker {
        ColorPicker::new(
            Scene::new_handle(),
            Theme::new_handle(),
            Point::ZERO,
            Size::new(230.0, 200.0),
            start,
        )
    }

    fn press(w: &mut impl Widget, x: f32, y: f32) {
        w.mouse_button(MouseButtonEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            pressed: true,
        });
    }

    fn release(w: &mut impl Widget, x: f32, y: f32) {
        w.mouse_button(MouseButtonEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            pressed: false,
        });
    }

    fn drag(w: &mut impl Widget, x: f32, y: f32) {
        w.mouse_move(MouseMoveEvent {
            position: Point::new(x, y),
        });
    }

    #[test]
    fn layout_splits_selector_and_hue_strip() {
        let p = picker(Color::rgb(255, 0, 0));
        assert_eq!(p.size(), Size::new(230.0, 200.0));
        // 230 minus 20 strip minus 4 gap.
        assert_eq!(p.selector_size(), Size::new(206.0, 200.0));
    }

    #[test]
    fn auto_dimensions_are_derived() {
        let mut p = picker(Color::rgb(255, 0, 0));
        p.set_size(Size::AUTO);
        assert_eq!(p.size(), Size::new(230.0, 200.0));

        p.set_size(Size::new(AUTO_DIMENSION, 100.0));
        assert_eq!(p.size(), Size::new(87.0, 100.0));

        p.set_size(Size::new(200.0, AUTO_DIMENSION));
        assert_eq!(p.size(), Size::new(200.0, 120.0));
    }

    #[test]
    fn sv_press_updates_marker_and_notifies() {
        let mut p = picker(Color::rgb(255, 0, 0));
        let changes = Rc::new(Cell::new(0));
        let seen = changes.clone();
        p.set_on_change(move |_| seen.set(seen.get() + 1));

        press(&mut p, 103.0, 50.0);
        let (s, v) = p.current_sv();
        assert!((s - 0.5).abs() < 1e-3);
        assert!((v - 0.75).abs() < 1e-3);
        assert_eq!(changes.get(), 1);

        release(&mut p, 103.0, 50.0);
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn hue_press_updates_marker_and_base() {
        let mut p = picker(Color::rgb(255, 0, 0));
        press(&mut p, 220.0, 100.0);
        release(&mut p, 220.0, 100.0);
        assert!((p.current_hue() - 0.5).abs() < 1e-3);
        // The square's base fill follows the hue to its fully saturated color.
        assert_eq!(
            *p.scene.borrow().paint(p.base_paint),
            Paint::Solid(Color::from_hsv(Hsv::new(0.5, 1.0, 1.0)))
        );

        // Full saturation and value at one half hue is cyan.
        press(&mut p, 206.0, 0.0);
        release(&mut p, 206.0, 0.0);
        assert_eq!(p.picked(), Color::rgb(0, 255, 255));
    }

    #[test]
    fn sv_drag_stays_sticky_and_clamps() {
        let mut p = picker(Color::rgb(255, 0, 0));
        press(&mut p, 100.0, 100.0);
        let hue_before = p.current_hue();

        // Dragging over the hue strip keeps tracking the square, clamped to
        // its right edge.
        drag(&mut p, 225.0, 150.0);
        let (s, v) = p.current_sv();
        assert!((s - 1.0).abs() < 1e-6);
        assert!((v - 0.25).abs() < 1e-3);
        assert_eq!(p.current_hue(), hue_before);

        // Leaving the control entirely clamps both axes.
        drag(&mut p, -50.0, 400.0);
        let (s, v) = p.current_sv();
        assert_eq!((s, v), (0.0, 0.0));
    }

    #[test]
    fn hue_drag_ignores_selector_square() {
        let mut p = picker(Color::rgb(255, 0, 0));
        press(&mut p, 220.0, 0.0);
        let sv_before = p.current_sv();

        drag(&mut p, 10.0, 100.0);
        assert!((p.current_hue() - 0.5).abs() < 1e-3);
        assert_eq!(p.current_sv(), sv_before);

        // A release ends the drag; plain moves no longer track.
        release(&mut p, 10.0, 100.0);
        drag(&mut p, 220.0, 180.0);
        assert!((p.current_hue() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn dead_zone_press_changes_nothing() {
        let mut p = picker(Color::rgb(255, 0, 0));
        let changes = Rc::new(Cell::new(0));
        let seen = changes.clone();
        p.set_on_change(move |_| seen.set(seen.get() + 1));

        // Between the square's right edge at 206 and the strip at 210.
        press(&mut p, 208.0, 100.0);
        assert_eq!(changes.get(), 0);

        // And it does not start a drag either.
        drag(&mut p, 100.0, 100.0);
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn pick_round_trips_without_notification() {
        let mut p = picker(Color::rgb(255, 0, 0));
        let changes = Rc::new(Cell::new(0));
        let seen = changes.clone();
        p.set_on_change(move |_| seen.set(seen.get() + 1));

        let target = Color::rgb(64, 128, 192);
        p.pick(target);
        assert_eq!(changes.get(), 0);

        let got = p.picked();
        for (a, b) in got.0.iter().zip(target.0) {
            assert!(a.abs_diff(b) <= 1);
        }
    }

    #[test]
    fn picked_reflects_callback_time_state() {
        let mut p = picker(Color::rgb(255, 0, 0));
        let seen = Rc::new(Cell::new(Color::TRANSPARENT));
        let inner = seen.clone();
        p.set_on_change(move |picker| inner.set(picker.picked()));

        press(&mut p, 0.0, 0.0);
        // Top-left corner of the square is white regardless of hue.
        assert_eq!(seen.get(), Color::WHITE);
    }

    #[test]
    fn popup_click_toggles_open_state() {
        let mut b = ColorButton::new(
            Scene::new_handle(),
            Theme::new_handle(),
            Point::ZERO,
            Size::new(80.0, 24.0),
            Size::new(230.0, 200.0),
            Color::rgb(255, 0, 0),
        );

        press(&mut b, 10.0, 10.0);
        release(&mut b, 10.0, 10.0);
        assert!(b.popup_open());

        // A second click on the button closes the popup again.
        press(&mut b, 10.0, 10.0);
        release(&mut b, 10.0, 10.0);
        assert!(!b.popup_open());

        press(&mut b, 10.0, 10.0);
        release(&mut b, 10.0, 10.0);
        assert!(b.popup_open());
    }

    #[test]
    fn color_button_toggles_popup_and_syncs_swatch() {
        let scene = Scene::new_handle();
        let mut b = ColorButton::new(
            scene,
            Theme::new_handle(),
            Point::ZERO,
            Size::new(80.0, 24.0),
            Size::new(230.0, 200.0),
            Color::rgb(255, 0, 0),
        );
        let changes = Rc::new(Cell::new(0));
        let seen = changes.clone();
        b.set_on_change(move |_| seen.set(seen.get() + 1));

        assert!(!b.popup_open());
        press(&mut b, 10.0, 10.0);
        release(&mut b, 10.0, 10.0);
        assert!(b.popup_open());

        // Pane padding is 8, so the picker square starts at (8, 32).
        press(&mut b, 8.0, 32.0);
        release(&mut b, 8.0, 32.0);
        assert_eq!(b.picked(), Color::WHITE);
        assert_eq!(changes.get(), 1);

        // The popup region counts as part of the widget while open.
        assert!(b.contains(Point::new(100.0, 150.0)));

        b.focus(false);
        assert!(!b.popup_open());
        assert!(!b.contains(Point::new(100.0, 150.0)));
    }
}
