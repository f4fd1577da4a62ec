pub mod control_hooks;
pub mod dialog;
pub mod import_screen;

pub use control_hooks::{use_control, use_control_view};
pub use dialog::ErrorDialog;
pub use import_screen::ImportScreen;
