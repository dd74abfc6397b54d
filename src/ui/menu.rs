use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::controllers::sidebar::SidebarPanel;
use crate::app::domain::messages::Message;
use crate::app::domain::settings::AppSettings;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, settings: &AppSettings) {
    let s = sender;

    // File
    menu.add("File/Open Folder...", Shortcut::Ctrl | 'o', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenFolder) });
    menu.add("File/Close Tab", Shortcut::Ctrl | 'w', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::CloseActiveTab) });
    menu.add("File/Welcome", Shortcut::None, MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::ShowWelcome) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // View
    menu.add("View/Explorer", Shortcut::Ctrl | Shortcut::Shift | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetPanel(SidebarPanel::Explorer)) });
    menu.add("View/Search", Shortcut::Ctrl | Shortcut::Shift | 'f', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetPanel(SidebarPanel::Search)) });
    menu.add("View/Source Control", Shortcut::Ctrl | Shortcut::Shift | 'g', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::SetPanel(SidebarPanel::SourceControl)) });
    menu.add("View/Extensions", Shortcut::Ctrl | Shortcut::Shift | 'x', MenuFlag::MenuDivider, { let s = *s; move |_| s.send(Message::SetPanel(SidebarPanel::Extensions)) });
    let ln_flag = if settings.line_numbers_enabled { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Line Numbers", Shortcut::None, ln_flag, { let s = *s; move |_| s.send(Message::ToggleLineNumbers) });
    let dm_flag = if settings.is_dark() { MenuFlag::Toggle | MenuFlag::Value } else { MenuFlag::Toggle };
    menu.add("View/Toggle Dark Mode", Shortcut::None, dm_flag, { let s = *s; move |_| s.send(Message::ToggleDarkMode) });
}
