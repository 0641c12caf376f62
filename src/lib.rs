//! `tinct` is a small GPU-accelerated widget toolkit built around an HSV
//! color picker. Shapes and paints live in a retained [`Scene`]; widgets
//! reference them by id, push draw commands into a per-frame [`Frame`], and
//! the [`Renderer`] tessellates and draws the result with `wgpu` and `lyon`.
//!
//! The typical setup is a [`Gui`] root owning the widgets:
//!
//! ```no_run
//! use tinct::{Color, ColorPicker, Gui, Point, Scene, Size, Theme};
//!
//! let scene = Scene::new_handle();
//! let theme = Theme::new_handle();
//! let mut gui = Gui::new(scene.clone(), theme.clone());
//!
//! let picker = gui.add(ColorPicker::new(
//!     scene,
//!     theme,
//!     Point::new(20.0, 20.0),
//!     Size::AUTO,
//!     Color::rgb(255, 0, 0),
//! ));
//! picker
//!     .borrow_mut()
//!     .set_on_change(|p| println!("picked {:?}", p.picked()));
//!
//! // Each frame: forward winit mouse events to the gui, then
//! // `renderer.render(&mut scene.borrow_mut(), &gui.draw())`.
//! ```

mod color;
mod error;
mod gui;
mod math;
mod paint;
mod pipeline;
mod renderer;
mod scene;
mod style;
mod tessellate;
mod vertex;
mod widget;
mod widgets;

pub use color::{Color, Hsv};
pub use error::Error;
pub use gui::Gui;
pub use math::{Point, Rect, Size, AUTO_DIMENSION};
pub use paint::{LinearGradient, Paint};
pub use renderer::Renderer;
pub use scene::{
    ChangeGuard, DrawCmd, DrawStyle, Frame, Geometry, PaintId, Scene, SceneHandle, ShapeId,
};
pub use style::{ButtonStyle, ColorPickerStyle, PaneStyle, Theme};
pub use widget::{EventResult, MouseButton, MouseButtonEvent, MouseMoveEvent, Widget};
pub use widgets::{Button, ColorButton, ColorPicker, Pane};

// Re-exported so demos and downstream users match the renderer's wgpu
// version without depending on it directly.
pub use wgpu;
