use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use futures::executor::block_on;
use tinct::{
    wgpu, Color, ColorButton, ColorPicker, Gui, MouseButton, MouseButtonEvent, MouseMoveEvent,
    Point, Renderer, Scene, SceneHandle, Size, Theme, AUTO_DIMENSION,
};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

struct State {
    window: Arc<Window>,
    renderer: Renderer<'static>,
    scene: SceneHandle,
    gui: Gui,
    /// The picker writes the picked color here; redraws read it back as the
    /// clear color, since the renderer is not reachable from the callback.
    background: Rc<Cell<Color>>,
    scale_factor: f64,
    cursor: Point,
}

impl State {
    fn new(event_loop: &ActiveEventLoop) -> Self {
        let window = Arc::new(
            event_loop
                .create_window(Window::default_attributes().with_title("tinct color picker"))
                .unwrap(),
        );

        let window_size = window.inner_size();
        let scale_factor = window.scale_factor();
        let renderer = block_on(Renderer::new(
            window.clone(),
            (window_size.width, window_size.height),
            scale_factor,
            true,
            4,
        ))
        .expect("To create the renderer");

        let scene = Scene::new_handle();
        let theme = Theme::new_handle();
        let mut gui = Gui::new(scene.clone(), theme.clone());

        let background = Rc::new(Cell::new(Color::rgb(255, 0, 0)));

        let picker = gui.add(ColorPicker::new(
            scene.clone(),
            theme.clone(),
            Point::new(20.0, 20.0),
            Size::AUTO,
            background.get(),
        ));
        let sink = background.clone();
        picker
            .borrow_mut()
            .set_on_change(move |p| sink.set(p.picked()));

        let swatch_button = gui.add(ColorButton::new(
            scene.clone(),
            theme,
            Point::new(280.0, 20.0),
            Size::new(120.0, AUTO_DIMENSION),
            Size::AUTO,
            Color::rgb(64, 128, 192),
        ));
        swatch_button
            .borrow_mut()
            .set_on_change(|b| println!("button color: {:?}", b.picked()));

        Self {
            window,
            renderer,
            scene,
            gui,
            background,
            scale_factor,
            cursor: Point::ZERO,
        }
    }
}

#[derive(Default)]
struct App {
    state: Option<State>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            self.state = Some(State::new(event_loop));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if window_id != state.window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                state
                    .renderer
                    .resize((physical_size.width, physical_size.height));
                state.window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = Point::new(
                    (position.x / state.scale_factor) as f32,
                    (position.y / state.scale_factor) as f32,
                );
                state.gui.mouse_move(MouseMoveEvent {
                    position: state.cursor,
                });
                state.window.request_redraw();
            }
            WindowEvent::MouseInput { state: element_state, button, .. } => {
                state.gui.mouse_button(MouseButtonEvent {
                    position: state.cursor,
                    button: map_button(button),
                    pressed: element_state == ElementState::Pressed,
                });
                state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                state.renderer.set_clear_color(state.background.get());

                let frame = state.gui.draw();
                match state
                    .renderer
                    .render(&mut state.scene.borrow_mut(), &frame)
                {
                    Ok(()) => {}
                    Err(tinct::Error::Surface(wgpu::SurfaceError::Lost)) => {
                        let size = state.renderer.size();
                        state.renderer.resize(size);
                    }
                    Err(tinct::Error::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        event_loop.exit()
                    }
                    Err(e) => eprintln!("{e:?}"),
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                state.scale_factor = scale_factor;
                state.renderer.change_scale_factor(scale_factor);
            }
            _ => {}
        }
    }
}

pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let event_loop = EventLoop::new().expect("To create the event loop");
    let mut app = App::default();
    let _ = event_loop.run_app(&mut app);
}
