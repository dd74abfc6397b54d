use fltk::{
    enums::Color,
    frame::Frame,
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::TextEditor,
    window::Window,
};

/// Colors for the widgets that are not custom drawn.
pub fn apply_theme(
    editor: &mut TextEditor,
    preview: &mut HelpView,
    image_frame: &mut Frame,
    window: &mut Window,
    menu: &mut MenuBar,
    status_bar: &mut Frame,
    is_dark: bool,
) {
    if is_dark {
        editor.set_color(Color::from_rgb(30, 30, 30));
        editor.set_text_color(Color::from_rgb(212, 212, 212));
        editor.set_cursor_color(Color::from_rgb(255, 255, 255));
        editor.set_selection_color(Color::from_rgb(38, 79, 120));
        editor.set_linenumber_bgcolor(Color::from_rgb(30, 30, 30));
        editor.set_linenumber_fgcolor(Color::from_rgb(133, 133, 133));
        preview.set_color(Color::from_rgb(30, 30, 30));
        preview.set_text_color(Color::from_rgb(212, 212, 212));
        image_frame.set_color(Color::from_rgb(30, 30, 30));
        image_frame.set_label_color(Color::from_rgb(204, 204, 204));
        window.set_color(Color::from_rgb(25, 25, 25));
        window.set_label_color(Color::from_rgb(220, 220, 220));
        menu.set_color(Color::from_rgb(60, 60, 60));
        menu.set_text_color(Color::from_rgb(204, 204, 204));
        menu.set_selection_color(Color::from_rgb(80, 80, 80));
    } else {
        editor.set_color(Color::White);
        editor.set_text_color(Color::Black);
        editor.set_cursor_color(Color::Black);
        editor.set_selection_color(Color::from_rgb(173, 214, 255));
        editor.set_linenumber_bgcolor(Color::from_rgb(240, 240, 240));
        editor.set_linenumber_fgcolor(Color::from_rgb(100, 100, 100));
        preview.set_color(Color::White);
        preview.set_text_color(Color::Black);
        image_frame.set_color(Color::from_rgb(245, 245, 245));
        image_frame.set_label_color(Color::Black);
        window.set_color(Color::from_rgb(240, 240, 240));
        window.set_label_color(Color::Black);
        menu.set_color(Color::from_rgb(240, 240, 240));
        menu.set_text_color(Color::Black);
        menu.set_selection_color(Color::from_rgb(200, 200, 200));
    }
    // The status bar keeps the accent blue in both modes
    status_bar.set_color(Color::from_rgb(0, 122, 204));
    status_bar.set_label_color(Color::White);

    editor.redraw();
    preview.redraw();
    window.redraw();
    menu.redraw();
    status_bar.redraw();
}
