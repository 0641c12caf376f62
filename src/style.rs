//! Widget styling. Styles are immutable configuration structs collected in a
//! [`Theme`], shared by handle (`Rc<Theme>`) so widgets never own or mutate
//! them.

use std::rc::Rc;

use crate::color::Color;
use crate::paint::Paint;

/// Style of the [`crate::ColorPicker`] widget. Metrics are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPickerStyle {
    /// Width of the vertical hue strip.
    pub hue_width: f32,
    /// Gap between the saturation/value square and the hue strip.
    pub hue_padding: f32,
    /// Height of the rectangular hue marker.
    pub hue_marker_height: f32,
    /// Stroke width of the hue marker outline.
    pub hue_marker_thickness: f32,
    /// Radius of the ring marking the current saturation/value.
    pub color_marker_radius: f32,
    /// Stroke width of that ring.
    pub color_marker_thickness: f32,
    /// Paint used to stroke both markers. Required for drawing.
    pub marker: Option<Paint>,
    /// Optional outline around the saturation/value square.
    pub outline: Option<Paint>,
    /// Stroke width of the outline.
    pub outline_width: f32,
}

impl Default for ColorPickerStyle {
    fn default() -> Self {
        Self {
            hue_width: 20.0,
            hue_padding: 4.0,
            hue_marker_height: 8.0,
            hue_marker_thickness: 1.5,
            color_marker_radius: 3.0,
            color_marker_thickness: 1.5,
            marker: Some(Paint::Solid(Color::rgb(240, 240, 240))),
            outline: Some(Paint::Solid(Color::rgb(60, 60, 60))),
            outline_width: 1.0,
        }
    }
}

/// Style of the plain [`crate::Button`] widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    pub background: Color,
    pub hovered: Color,
    pub pressed: Color,
    /// Inner padding, also used by the color button's swatch inset.
    pub padding: f32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(55, 55, 60),
            hovered: Color::rgb(70, 70, 76),
            pressed: Color::rgb(40, 40, 44),
            padding: 4.0,
        }
    }
}

/// Style of the [`crate::Pane`] container.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneStyle {
    pub background: Color,
    pub padding: f32,
}

impl Default for PaneStyle {
    fn default() -> Self {
        Self {
            background: Color::rgba(30, 30, 32, 240),
            padding: 8.0,
        }
    }
}

/// The style registry handed to every widget at construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    pub color_picker: ColorPickerStyle,
    pub button: ButtonStyle,
    pub pane: PaneStyle,
}

impl Theme {
    /// Creates the default theme behind a shared handle.
    pub fn new_handle() -> Rc<Theme> {
        Rc::new(Theme::default())
    }
}
