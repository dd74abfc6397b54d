#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use fltk::{app, prelude::*};

use codefolio::app::domain::messages::Message;
use codefolio::app::domain::settings::AppSettings;
use codefolio::app::infrastructure::logging::init_logger;
use codefolio::app::services::workspace::Workspace;
use codefolio::app::state::AppState;
use codefolio::ui::main_window::build_main_window;
use codefolio::ui::menu::build_menu;

fn load_workspace(settings: &AppSettings) -> Workspace {
    let Some(dir) = &settings.workspace_dir else {
        return Workspace::bundled();
    };
    match Workspace::load_dir(dir) {
        Ok(workspace) => workspace,
        Err(e) => {
            tracing::warn!("Falling back to the bundled portfolio: {}", e);
            Workspace::bundled()
        }
    }
}

fn main() {
    let settings = AppSettings::load();
    init_logger(&settings.log_level);

    let app = app::App::default().with_scheme(app::Scheme::Gtk);
    let (sender, receiver) = app::channel::<Message>();

    let workspace = load_workspace(&settings);

    let mut widgets = build_main_window(&settings, &sender);
    build_menu(&mut widgets.menu, &sender, &settings);

    let mut state = AppState::new(widgets, workspace, settings, sender);
    state.window.show();
    tracing::info!("Codefolio started");

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            match msg {
                Message::OpenFile(file_id, mode) => state.open_file(&file_id, mode),
                Message::ExplorerClick(line) => state.explorer_click(line),
                Message::SwitchTab(key) => state.switch_tab(&key),
                Message::CloseTab(key) => state.close_tab(&key),
                Message::CloseActiveTab => state.close_active_tab(),
                Message::ShowWelcome => state.show_welcome(),
                Message::WelcomeLink(file_id) => state.open_welcome_link(&file_id),
                Message::OpenFolder => state.open_folder(),

                Message::SetPanel(panel) => state.set_panel(panel),
                Message::Search(query) => state.search(&query),
                Message::SearchResultClick(line) => state.search_result_click(line),

                Message::ToggleDarkMode => state.toggle_dark_mode(),
                Message::ToggleLineNumbers => state.toggle_line_numbers(),

                Message::FileQuit | Message::WindowClose => state.file_quit(),
            }
        }
    }
}
