use fltk::{
    app::Sender,
    browser::{Browser, HoldBrowser},
    button::Button,
    enums::{Align, CallbackTrigger, Color, Font, FrameType},
    frame::Frame,
    group::{Flex, FlexType},
    input::Input,
    prelude::*,
};

use crate::app::controllers::sidebar::{
    Extension, NO_RESULTS, NO_SOURCE_CONTROL, SearchHit, SidebarPanel,
};
use crate::app::domain::messages::Message;

pub const ACTIVITY_BAR_WIDTH: i32 = 48;
const TITLE_HEIGHT: i32 = 28;
const SEARCH_INPUT_HEIGHT: i32 = 26;

/// Vertical strip of panel buttons on the far left.
pub struct ActivityBar {
    pub flex: Flex,
    buttons: Vec<(SidebarPanel, Button)>,
}

impl ActivityBar {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);
        flex.set_margin(4);
        flex.set_spacing(4);

        let mut buttons = Vec::new();
        for panel in SidebarPanel::ALL {
            let mut btn = Button::default().with_label(panel.icon());
            btn.set_frame(FrameType::FlatBox);
            btn.set_tooltip(panel.title());
            btn.emit(*sender, Message::SetPanel(panel));
            flex.fixed(&btn, ACTIVITY_BAR_WIDTH - 8);
            buttons.push((panel, btn));
        }
        // Spacer
        Frame::default();
        flex.end();

        Self { flex, buttons }
    }

    pub fn set_active(&mut self, active: SidebarPanel, is_dark: bool) {
        let (bg, fg, sel) = if is_dark {
            (Color::from_rgb(51, 51, 51), Color::from_rgb(133, 133, 133), Color::White)
        } else {
            (Color::from_rgb(44, 44, 44), Color::from_rgb(150, 150, 150), Color::White)
        };
        self.flex.set_color(bg);
        for (panel, btn) in &mut self.buttons {
            btn.set_color(bg);
            btn.set_label_color(if *panel == active { sel } else { fg });
        }
        self.flex.redraw();
    }
}

/// The panel next to the activity bar: a title plus the widgets of
/// whichever panel is selected.
pub struct SidebarWidgets {
    pub flex: Flex,
    pub title: Frame,
    pub explorer: HoldBrowser,
    pub search_input: Input,
    pub search_results: HoldBrowser,
    pub info: Browser,
}

impl SidebarWidgets {
    pub fn new(sender: &Sender<Message>) -> Self {
        let mut flex = Flex::default();
        flex.set_type(FlexType::Column);

        let mut title = Frame::default().with_label(SidebarPanel::Explorer.title());
        title.set_align(Align::Left | Align::Inside);
        title.set_label_size(11);
        title.set_label_font(Font::HelveticaBold);
        flex.fixed(&title, TITLE_HEIGHT);

        let mut explorer = HoldBrowser::default();
        explorer.set_frame(FrameType::FlatBox);
        explorer.set_text_size(13);
        explorer.set_callback({
            let s = *sender;
            move |b| {
                let line = b.value();
                if line > 0 {
                    s.send(Message::ExplorerClick(line as usize));
                }
            }
        });

        let mut search_input = Input::default();
        search_input.set_trigger(CallbackTrigger::Changed);
        search_input.set_callback({
            let s = *sender;
            move |i| s.send(Message::Search(i.value()))
        });
        flex.fixed(&search_input, SEARCH_INPUT_HEIGHT);

        let mut search_results = HoldBrowser::default();
        search_results.set_frame(FrameType::FlatBox);
        search_results.set_text_size(12);
        search_results.set_callback({
            let s = *sender;
            move |b| {
                let line = b.value();
                if line > 0 {
                    s.send(Message::SearchResultClick(line as usize));
                }
            }
        });

        let mut info = Browser::default();
        info.set_frame(FrameType::FlatBox);
        info.set_text_size(12);

        flex.end();

        let mut widgets = Self {
            flex,
            title,
            explorer,
            search_input,
            search_results,
            info,
        };
        widgets.show_panel(SidebarPanel::Explorer);
        widgets
    }

    /// Show only the widgets belonging to `panel`.
    pub fn show_panel(&mut self, panel: SidebarPanel) {
        self.title.set_label(panel.title());
        self.explorer.hide();
        self.search_input.hide();
        self.search_results.hide();
        self.info.hide();
        match panel {
            SidebarPanel::Explorer => self.explorer.show(),
            SidebarPanel::Search => {
                self.search_input.show();
                self.search_results.show();
            }
            SidebarPanel::SourceControl | SidebarPanel::Extensions => self.info.show(),
        }
        self.flex.layout();
        self.flex.redraw();
    }

    pub fn fill_search(&mut self, hits: &[SearchHit]) {
        self.search_results.clear();
        if hits.is_empty() {
            self.search_results.add(&format!("@i{NO_RESULTS}"));
            return;
        }
        for hit in hits {
            self.search_results.add(&hit.display());
        }
    }

    pub fn fill_source_control(&mut self) {
        self.info.clear();
        self.info.add(&format!("@i{NO_SOURCE_CONTROL}"));
    }

    pub fn fill_extensions(&mut self, extensions: &[Extension]) {
        self.info.clear();
        self.info.add("@s@bINSTALLED");
        for ext in extensions {
            self.info.add("");
            self.info.add(&format!("@b{}  {}", ext.icon, ext.name));
            self.info.add(&format!("@s{}", ext.description));
            self.info.add(&format!("@s@C4{}", ext.version));
        }
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        let (bg, fg, sel) = if is_dark {
            (Color::from_rgb(37, 37, 38), Color::from_rgb(204, 204, 204), Color::from_rgb(55, 55, 61))
        } else {
            (Color::from_rgb(243, 243, 243), Color::from_rgb(30, 30, 30), Color::from_rgb(200, 220, 240))
        };
        self.flex.set_color(bg);
        self.title.set_label_color(fg);
        for b in [&mut self.explorer, &mut self.search_results] {
            b.set_color(bg);
            b.set_text_color(fg);
            b.set_selection_color(sel);
        }
        self.info.set_color(bg);
        self.info.set_text_color(fg);
        self.search_input.set_color(if is_dark { Color::from_rgb(60, 60, 60) } else { Color::White });
        self.search_input.set_text_color(fg);
        self.flex.redraw();
    }
}
