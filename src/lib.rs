// Library exports for the binaries and integration tests

pub mod config;
pub mod control;
pub mod handoff;
pub mod import;

// Desktop front end (dioxus + native file dialog)
#[cfg(feature = "desktop")]
pub mod ui;
