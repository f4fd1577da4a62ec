use crate::ui::components::{use_control, use_control_view};
use dioxus::prelude::*;

/// The two triggers and the status line
#[component]
pub fn ImportScreen() -> Element {
    let control = use_control();
    let view = use_control_view();
    let snapshot = view.read().clone();

    let select_control = control.clone();
    let reuse_control = control.clone();

    rsx! {
        div { class: "screen",
            h1 { class: "title", "silene" }
            p { class: "status", "{snapshot.status}" }
            div { class: "actions",
                button {
                    class: "primary",
                    disabled: !snapshot.select_enabled,
                    onclick: move |_| select_control.select_new(),
                    "Select application"
                }
                if snapshot.reuse_available {
                    button {
                        class: "secondary",
                        disabled: !snapshot.select_enabled,
                        onclick: move |_| reuse_control.use_last(),
                        "Use last application"
                    }
                }
            }
        }
    }
}
