use fltk::{
    app::Sender,
    button::Button,
    enums::{Align, Color, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    prelude::*,
};

use crate::app::domain::file::FileId;
use crate::app::domain::messages::Message;

const LINK_HEIGHT: i32 = 24;

/// Welcome screen shown when no tab is active. Each quick link opens a
/// workspace file the way `TabController::open_welcome_link` decides.
pub struct WelcomePage {
    pub flex: Flex,
    heading: Frame,
    subtitle: Frame,
    start: Frame,
    links: Flex,
    buttons: Vec<Button>,
    is_dark: bool,
}

impl WelcomePage {
    pub fn new() -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);
        flex.set_margin(40);
        flex.set_spacing(6);

        let mut heading = Frame::default().with_label("Codefolio");
        heading.set_label_size(32);
        heading.set_label_font(Font::Helvetica);
        heading.set_align(Align::Left | Align::Inside);
        flex.fixed(&heading, 48);

        let mut subtitle = Frame::default().with_label("Editing evolved");
        subtitle.set_label_size(16);
        subtitle.set_align(Align::Left | Align::Inside);
        flex.fixed(&subtitle, 28);

        let spacer = Frame::default();
        flex.fixed(&spacer, 20);

        let mut start = Frame::default().with_label("Start");
        start.set_label_size(18);
        start.set_align(Align::Left | Align::Inside);
        flex.fixed(&start, 30);

        let mut links = Flex::default();
        links.set_type(FlexType::Column);
        links.end();

        flex.end();

        Self {
            flex,
            heading,
            subtitle,
            start,
            links,
            buttons: Vec::new(),
            is_dark: true,
        }
    }

    /// Replace the quick links with one button per file.
    pub fn set_links(&mut self, files: &[FileId], sender: &Sender<Message>) {
        self.links.clear();
        self.buttons.clear();
        self.links.begin();
        for file_id in files {
            let mut btn = Button::default().with_label(&format!("Open {file_id}"));
            btn.set_frame(FrameType::NoBox);
            btn.set_align(Align::Left | Align::Inside);
            btn.set_label_size(14);
            btn.emit(*sender, Message::WelcomeLink(file_id.clone()));
            self.links.fixed(&btn, LINK_HEIGHT);
            self.buttons.push(btn);
        }
        // Spacer
        Frame::default();
        self.links.end();
        self.links.layout();
        self.apply_theme(self.is_dark);
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        let (bg, fg, dim, link) = if is_dark {
            (
                Color::from_rgb(30, 30, 30),
                Color::from_rgb(204, 204, 204),
                Color::from_rgb(133, 133, 133),
                Color::from_rgb(55, 148, 255),
            )
        } else {
            (
                Color::White,
                Color::from_rgb(30, 30, 30),
                Color::from_rgb(110, 110, 110),
                Color::from_rgb(0, 102, 191),
            )
        };
        self.flex.set_frame(FrameType::FlatBox);
        self.flex.set_color(bg);
        self.links.set_color(bg);
        self.heading.set_label_color(fg);
        self.subtitle.set_label_color(dim);
        self.start.set_label_color(fg);
        for btn in &mut self.buttons {
            btn.set_label_color(link);
        }
        self.flex.redraw();
    }
}
