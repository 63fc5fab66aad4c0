pub mod app;
pub mod canvas_panel;
pub mod form_panel;
pub mod gallery_panel;
pub mod settings;
pub mod settings_io;
pub mod settings_window;
pub mod state;
