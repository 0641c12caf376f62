use tinct::{
    Color, ColorButton, ColorPicker, Gui, MouseButton, MouseButtonEvent, Point, Scene, Size, Theme,
};

fn click(gui: &mut Gui, x: f32, y: f32) {
    for pressed in [true, false] {
        gui.mouse_button(MouseButtonEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            pressed,
        });
    }
}

#[test]
fn picker_commands_carry_widget_offset() {
    let scene = Scene::new_handle();
    let theme = Theme::new_handle();
    let mut gui = Gui::new(scene.clone(), theme.clone());
    gui.add(ColorPicker::new(
        scene,
        theme,
        Point::new(20.0, 30.0),
        Size::new(230.0, 200.0),
        Color::rgb(255, 0, 0),
    ));

    let frame = gui.draw();
    // Three fills of the square, the hue strip, the outline and two markers.
    assert_eq!(frame.commands().len(), 7);
    for cmd in frame.commands() {
        assert_eq!(cmd.offset, Point::new(20.0, 30.0));
    }
}

#[test]
fn open_popup_translates_nested_commands() {
    let scene = Scene::new_handle();
    let theme = Theme::new_handle();
    let mut gui = Gui::new(scene.clone(), theme.clone());
    gui.add(ColorButton::new(
        scene,
        theme,
        Point::new(300.0, 10.0),
        Size::new(80.0, 24.0),
        Size::new(230.0, 200.0),
        Color::rgb(255, 0, 0),
    ));

    // Closed popup: the button background and the swatch.
    assert_eq!(gui.draw().commands().len(), 2);

    click(&mut gui, 310.0, 20.0);
    let frame = gui.draw();
    let offsets: Vec<Point> = frame.commands().iter().map(|c| c.offset).collect();
    assert_eq!(frame.commands().len(), 10);

    // Button surface stays at the widget origin.
    assert_eq!(offsets[0], Point::new(300.0, 10.0));
    assert_eq!(offsets[1], Point::new(300.0, 10.0));
    // The pane background sits below the button.
    assert_eq!(offsets[2], Point::new(300.0, 34.0));
    // Picker commands are offset further by the pane padding.
    for offset in &offsets[3..] {
        assert_eq!(*offset, Point::new(308.0, 42.0));
    }
}
