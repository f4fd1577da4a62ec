use dioxus::desktop::{Config as DioxusConfig, WindowBuilder};
use dioxus::prelude::*;

use crate::control::ControlHandle;
use crate::ui::components::*;

const MAIN_CSS: &str = r#"
body { margin: 0; font-family: sans-serif; background: #111318; color: #e5e7eb; }
.screen { display: flex; flex-direction: column; align-items: center; justify-content: center; height: 100vh; gap: 24px; }
.title { font-size: 28px; font-weight: bold; margin: 0; }
.status { color: #9ca3af; margin: 0; text-align: center; max-width: 480px; }
.actions { display: flex; gap: 12px; }
button { padding: 10px 18px; border: none; border-radius: 8px; color: white; cursor: pointer; font-size: 15px; }
button:disabled { background: #4b5563; cursor: default; }
.primary { background: #2563eb; }
.secondary { background: #374151; }
.overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; }
.dialog { background: #1f2937; border-radius: 8px; padding: 24px; max-width: 420px; width: 100%; }
.dialog h2 { margin-top: 0; }
.dialog-actions { display: flex; justify-content: flex-end; }
"#;

pub fn make_config() -> DioxusConfig {
    DioxusConfig::default()
        .with_window(make_window())
        .with_custom_head(format!("<style>{}</style>", MAIN_CSS))
}

fn make_window() -> WindowBuilder {
    WindowBuilder::new()
        .with_title("silene")
        .with_always_on_top(false)
        .with_inner_size(dioxus::desktop::LogicalSize::new(640, 420))
}

pub fn launch_app(control: ControlHandle) {
    LaunchBuilder::desktop()
        .with_cfg(make_config())
        // ControlHandle is Send + Sync; components pick it up with use_context
        .with_context_provider(move || Box::new(control.clone()))
        .launch(App);
}

#[component]
pub fn App() -> Element {
    rsx! {
        ImportScreen {}
        ErrorDialog {}
    }
}
