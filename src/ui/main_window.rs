use fltk::{
    app::Sender,
    enums::{Align, Event, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    menu::MenuBar,
    misc::HelpView,
    prelude::*,
    text::{TextBuffer, TextEditor},
    window::Window,
};

use super::sidebar::{ACTIVITY_BAR_WIDTH, ActivityBar, SidebarWidgets};
use super::tab_bar::{TAB_BAR_HEIGHT, TabBar};
use super::welcome::WelcomePage;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;

const MENU_HEIGHT: i32 = 30;
const STATUS_BAR_HEIGHT: i32 = 22;

pub struct MainWidgets {
    pub wind: Window,
    pub menu: MenuBar,
    pub activity_bar: ActivityBar,
    pub sidebar: SidebarWidgets,
    pub tab_bar: TabBar,
    pub content: Flex,
    pub welcome: WelcomePage,
    pub text_editor: TextEditor,
    pub preview: HelpView,
    pub image_frame: Frame,
    pub status_bar: Frame,
}

pub fn build_main_window(settings: &AppSettings, sender: &Sender<Message>) -> MainWidgets {
    let mut wind = Window::new(100, 100, 1200, 800, "Codefolio");
    wind.set_xclass("Codefolio");

    let mut root = Flex::new(0, 0, 1200, 800, None);
    root.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, MENU_HEIGHT, "");
    root.fixed(&menu, MENU_HEIGHT);

    let mut body = Flex::default();
    body.set_type(FlexType::Row);

    let activity_bar = ActivityBar::new(sender);
    body.fixed(&activity_bar.flex, ACTIVITY_BAR_WIDTH);

    let sidebar = SidebarWidgets::new(sender);
    body.fixed(&sidebar.flex, settings.sidebar_width);

    let mut main = Flex::default();
    main.set_type(FlexType::Column);

    let tab_bar = TabBar::new(0, MENU_HEIGHT, 640, *sender);
    main.fixed(&tab_bar.widget, TAB_BAR_HEIGHT);

    // Only one child of `content` is visible at a time
    let mut content = Flex::default();
    content.set_type(FlexType::Column);

    let welcome = WelcomePage::new();

    let mut text_editor = TextEditor::default();
    text_editor.set_buffer(TextBuffer::default());
    text_editor.set_text_size(settings.font_size as i32);
    text_editor.hide();

    let mut preview = HelpView::default();
    preview.set_text_size(settings.font_size as i32);
    preview.hide();

    let mut image_frame = Frame::default();
    image_frame.set_frame(FrameType::FlatBox);
    image_frame.hide();

    content.end();
    main.end();
    body.end();

    let mut status_bar = Frame::default();
    status_bar.set_frame(FrameType::FlatBox);
    status_bar.set_align(Align::Left | Align::Inside);
    status_bar.set_label_size(12);
    root.fixed(&status_bar, STATUS_BAR_HEIGHT);

    root.end();
    wind.resizable(&root);
    wind.end();

    wind.set_callback({
        let s = *sender;
        move |_| {
            if fltk::app::event() == Event::Close {
                s.send(Message::WindowClose);
            }
        }
    });

    MainWidgets {
        wind,
        menu,
        activity_bar,
        sidebar,
        tab_bar,
        content,
        welcome,
        text_editor,
        preview,
        image_frame,
        status_bar,
    }
}
