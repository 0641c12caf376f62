mod button;
mod color_picker;
mod pane;

pub use button::Button;
pub use color_picker::{ColorButton, ColorPicker};
pub use pane::Pane;
