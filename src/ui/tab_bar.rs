use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::Sender,
    draw,
    enums::{Align, Color, Event, Font},
    prelude::*,
    widget::Widget,
};

use crate::app::domain::messages::Message;
use crate::app::domain::view::{OpenTab, TabKey, ViewMode};

pub const TAB_BAR_HEIGHT: i32 = 30;

const MIN_TAB_WIDTH: i32 = 80;
const MAX_TAB_WIDTH: i32 = 220;
const CLOSE_BTN_SIZE: i32 = 14;
const CLOSE_BTN_MARGIN: i32 = 6;
const TAB_H_PADDING: i32 = 10;
const CORNER_RADIUS: i32 = 6;
const TAB_GAP: i32 = 1;
const WELCOME_BTN_WIDTH: i32 = 84;
const PREVIEW_UNDERLINE: i32 = 2;

struct TabInfo {
    key: TabKey,
    display_name: String,
    is_active: bool,
}

#[derive(Clone, Copy)]
enum LayoutItem {
    Welcome { x: i32, width: i32 },
    Tab { index: usize, x: i32, width: i32 },
}

#[derive(Debug, PartialEq)]
enum HitResult {
    Welcome,
    Tab { index: usize, is_close: bool },
    None,
}

struct TabBarState {
    tabs: Vec<TabInfo>,
    welcome_active: bool,
    layout: Vec<LayoutItem>,
    is_dark: bool,
    hover_tab_index: Option<usize>,
    hover_close: bool,
    hover_welcome: bool,
    sender: Sender<Message>,
    widget_w: i32,
}

/// Tab strip drawn by hand: a fixed Welcome button followed by one tab per
/// open file view. It mirrors controller state through the effect methods
/// below and reports clicks as messages.
pub struct TabBar {
    pub widget: Widget,
    state: Rc<RefCell<TabBarState>>,
}

impl TabBar {
    pub fn new(x: i32, y: i32, w: i32, sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(TabBarState {
            tabs: Vec::new(),
            welcome_active: true,
            layout: Vec::new(),
            is_dark: true,
            hover_tab_index: None,
            hover_close: false,
            hover_welcome: false,
            sender,
            widget_w: w,
        }));
        compute_layout(&mut state.borrow_mut());

        let mut widget = Widget::new(x, y, w, TAB_BAR_HEIGHT, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let mut st = draw_state.borrow_mut();
            if st.widget_w != wid.w() {
                st.widget_w = wid.w();
                compute_layout(&mut st);
            }
            draw_tab_bar(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_tab_bar(wid, event, &handle_state));

        Self { widget, state }
    }

    fn update(&mut self, f: impl FnOnce(&mut TabBarState)) {
        let mut st = self.state.borrow_mut();
        f(&mut st);
        st.hover_tab_index = None;
        st.hover_close = false;
        compute_layout(&mut st);
        drop(st);
        self.widget.redraw();
    }

    pub fn insert(&mut self, tab: &OpenTab) {
        self.update(|st| {
            st.tabs.push(TabInfo {
                key: tab.key.clone(),
                display_name: tab.display_name.clone(),
                is_active: false,
            })
        });
    }

    pub fn remove(&mut self, key: &TabKey) {
        self.update(|st| st.tabs.retain(|t| &t.key != key));
    }

    pub fn set_active(&mut self, key: &TabKey, active: bool) {
        self.update(|st| {
            if let Some(tab) = st.tabs.iter_mut().find(|t| &t.key == key) {
                tab.is_active = active;
            }
        });
    }

    pub fn set_welcome_active(&mut self, active: bool) {
        self.update(|st| st.welcome_active = active);
    }

    pub fn apply_theme(&mut self, is_dark: bool) {
        self.state.borrow_mut().is_dark = is_dark;
        self.widget.redraw();
    }
}

// --- Layout computation ---

fn compute_layout(st: &mut TabBarState) {
    st.layout = layout_items(st.tabs.len(), st.widget_w);
}

fn layout_items(tab_count: usize, widget_w: i32) -> Vec<LayoutItem> {
    let mut layout = vec![LayoutItem::Welcome {
        x: 0,
        width: WELCOME_BTN_WIDTH,
    }];
    if tab_count == 0 {
        return layout;
    }

    let count = tab_count as i32;
    let available = widget_w - WELCOME_BTN_WIDTH - TAB_GAP * count;
    let tab_width = (available / count).clamp(MIN_TAB_WIDTH, MAX_TAB_WIDTH);

    let mut cursor_x = WELCOME_BTN_WIDTH + TAB_GAP;
    for index in 0..tab_count {
        layout.push(LayoutItem::Tab {
            index,
            x: cursor_x,
            width: tab_width,
        });
        cursor_x += tab_width + TAB_GAP;
    }
    layout
}

// --- Hit-testing ---

fn close_button_rect(tab_x: i32, tab_width: i32, wy: i32) -> (i32, i32) {
    let close_x = tab_x + tab_width - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE;
    let close_y = wy + (TAB_BAR_HEIGHT - CLOSE_BTN_SIZE) / 2;
    (close_x, close_y)
}

fn hit_test_layout(items: &[LayoutItem], wy: i32, mx: i32, my: i32) -> HitResult {
    if my < wy || my >= wy + TAB_BAR_HEIGHT {
        return HitResult::None;
    }

    for item in items {
        match *item {
            LayoutItem::Welcome { x, width } => {
                if mx >= x && mx < x + width {
                    return HitResult::Welcome;
                }
            }
            LayoutItem::Tab { index, x, width } => {
                if mx >= x && mx < x + width {
                    let (close_x, close_y) = close_button_rect(x, width, wy);
                    let is_close = mx >= close_x
                        && mx <= close_x + CLOSE_BTN_SIZE
                        && my >= close_y
                        && my <= close_y + CLOSE_BTN_SIZE;
                    return HitResult::Tab { index, is_close };
                }
            }
        }
    }
    HitResult::None
}

// --- Theme ---

struct ThemeColors {
    bar_bg: Color,
    active_bg: Color,
    inactive_bg: Color,
    active_text: Color,
    inactive_text: Color,
    close_hover_bg: Color,
    accent: Color,
}

fn theme_colors(is_dark: bool) -> ThemeColors {
    if is_dark {
        ThemeColors {
            bar_bg: Color::from_rgb(37, 37, 38),
            active_bg: Color::from_rgb(30, 30, 30),
            inactive_bg: Color::from_rgb(45, 45, 45),
            active_text: Color::from_rgb(255, 255, 255),
            inactive_text: Color::from_rgb(150, 150, 150),
            close_hover_bg: Color::from_rgb(70, 70, 70),
            accent: Color::from_rgb(0, 122, 204),
        }
    } else {
        ThemeColors {
            bar_bg: Color::from_rgb(200, 200, 200),
            active_bg: Color::from_rgb(255, 255, 255),
            inactive_bg: Color::from_rgb(220, 220, 220),
            active_text: Color::from_rgb(0, 0, 0),
            inactive_text: Color::from_rgb(80, 80, 80),
            close_hover_bg: Color::from_rgb(190, 190, 190),
            accent: Color::from_rgb(0, 102, 191),
        }
    }
}

// --- Truncation ---

fn truncate_to_fit(text: &str, max_width: i32) -> String {
    if max_width <= 0 {
        return String::new();
    }
    draw::set_font(Font::Helvetica, 12);
    let (tw, _) = draw::measure(text, true);
    if tw <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let chars: Vec<char> = text.chars().collect();
    for len in (1..chars.len()).rev() {
        let candidate: String = chars[..len].iter().collect();
        let full = format!("{candidate}{ellipsis}");
        let (fw, _) = draw::measure(&full, true);
        if fw <= max_width {
            return full;
        }
    }
    ellipsis.to_string()
}

// --- Drawing ---

fn draw_rounded_top_rect(x: i32, y: i32, w: i32, h: i32, r: i32, color: Color) {
    draw::set_draw_color(color);
    draw::draw_rectf(x, y + r, w, h - r);
    draw::draw_rectf(x + r, y, w - 2 * r, r);
    draw::draw_pie(x, y, 2 * r, 2 * r, 90.0, 180.0);
    draw::draw_pie(x + w - 2 * r, y, 2 * r, 2 * r, 0.0, 90.0);
}

fn draw_tab_background(x: i32, y: i32, w: i32, h: i32, active: bool, colors: &ThemeColors) {
    if active {
        draw_rounded_top_rect(x, y, w, h, CORNER_RADIUS, colors.active_bg);
    } else {
        draw_rounded_top_rect(x, y + 2, w, h - 2, CORNER_RADIUS, colors.inactive_bg);
    }
}

fn draw_tab_bar(wid: &Widget, st: &TabBarState) {
    let wx = wid.x();
    let wy = wid.y();
    let ww = wid.w();
    let wh = wid.h();
    let colors = theme_colors(st.is_dark);

    // Background
    draw::set_draw_color(colors.bar_bg);
    draw::draw_rectf(wx, wy, ww, wh);

    for item in &st.layout {
        match *item {
            LayoutItem::Welcome { x, width } => {
                let bx = wx + x;
                draw_tab_background(bx, wy, width, wh, st.welcome_active || st.hover_welcome, &colors);
                let text_color = if st.welcome_active {
                    colors.active_text
                } else {
                    colors.inactive_text
                };
                draw::set_draw_color(text_color);
                draw::set_font(Font::HelveticaItalic, 12);
                draw::draw_text2("Welcome", bx, wy, width, wh, Align::Center);
            }
            LayoutItem::Tab { index, x, width } => {
                let tx = wx + x;
                let tab = &st.tabs[index];
                draw_tab_background(tx, wy, width, wh, tab.is_active, &colors);

                // Preview tabs carry an accent underline
                if tab.key.mode == ViewMode::Preview {
                    draw::set_draw_color(colors.accent);
                    draw::draw_rectf(tx, wy + wh - PREVIEW_UNDERLINE, width, PREVIEW_UNDERLINE);
                }

                let text_color = if tab.is_active {
                    colors.active_text
                } else {
                    colors.inactive_text
                };
                let text_area_width =
                    width - TAB_H_PADDING - CLOSE_BTN_MARGIN - CLOSE_BTN_SIZE - TAB_H_PADDING;
                let display_text = truncate_to_fit(&tab.display_name, text_area_width);

                draw::set_draw_color(text_color);
                draw::set_font(Font::Helvetica, 12);
                draw::draw_text(&display_text, tx + TAB_H_PADDING, wy + (wh + 12) / 2);

                // Close button
                let (close_x, close_y) = close_button_rect(tx, width, wy);
                let is_hovered_tab = st.hover_tab_index == Some(index);
                if is_hovered_tab && st.hover_close {
                    draw::set_draw_color(colors.close_hover_bg);
                    draw::draw_rectf(close_x - 2, close_y - 2, CLOSE_BTN_SIZE + 4, CLOSE_BTN_SIZE + 4);
                }
                let close_color = if tab.is_active || is_hovered_tab {
                    text_color
                } else {
                    colors.inactive_text
                };
                draw::set_draw_color(close_color);
                draw::set_font(Font::HelveticaBold, 20);
                draw::draw_text2(
                    "\u{00d7}",
                    close_x,
                    close_y,
                    CLOSE_BTN_SIZE,
                    CLOSE_BTN_SIZE,
                    Align::Center,
                );
            }
        }
    }
}

// --- Event handling ---

fn handle_tab_bar(wid: &mut Widget, event: Event, state: &Rc<RefCell<TabBarState>>) -> bool {
    match event {
        Event::Push => {
            let st = state.borrow();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();
            let button = fltk::app::event_button();
            let sender = st.sender;

            match hit_test_layout(&st.layout, wid.y(), mx, my) {
                HitResult::Welcome if button == 1 => {
                    drop(st);
                    sender.send(Message::ShowWelcome);
                    true
                }
                HitResult::Tab { index, is_close } => {
                    let key = st.tabs[index].key.clone();
                    drop(st);
                    // Middle click closes, like the close button
                    if button == 2 || (button == 1 && is_close) {
                        sender.send(Message::CloseTab(key));
                    } else if button == 1 {
                        sender.send(Message::SwitchTab(key));
                    }
                    true
                }
                _ => false,
            }
        }
        Event::Move => {
            let mut st = state.borrow_mut();
            let mx = fltk::app::event_x() - wid.x();
            let my = fltk::app::event_y();

            let (new_hover, new_close, new_welcome) =
                match hit_test_layout(&st.layout, wid.y(), mx, my) {
                    HitResult::Tab { index, is_close } => (Some(index), is_close, false),
                    HitResult::Welcome => (None, false, true),
                    HitResult::None => (None, false, false),
                };

            if new_hover != st.hover_tab_index
                || new_close != st.hover_close
                || new_welcome != st.hover_welcome
            {
                st.hover_tab_index = new_hover;
                st.hover_close = new_close;
                st.hover_welcome = new_welcome;
                drop(st);
                wid.redraw();
            }
            true
        }
        Event::Leave => {
            let mut st = state.borrow_mut();
            if st.hover_tab_index.is_some() || st.hover_close || st.hover_welcome {
                st.hover_tab_index = None;
                st.hover_close = false;
                st.hover_welcome = false;
                drop(st);
                wid.redraw();
            }
            false
        }
        _ => false,
    }
}
