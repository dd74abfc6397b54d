pub mod file_dialogs;
pub mod main_window;
pub mod menu;
pub mod sidebar;
pub mod tab_bar;
pub mod theme;
pub mod view_panes;
pub mod welcome;
