use crate::ui::components::{use_control, use_control_view};
use dioxus::prelude::*;

/// Blocking error notification; only the accept button closes it
#[component]
pub fn ErrorDialog() -> Element {
    let control = use_control();
    let view = use_control_view();
    let notification = view.read().notification.clone();

    rsx! {
        if let Some(message) = notification {
            div { class: "overlay",
                div {
                    class: "dialog",
                    onclick: move |evt| evt.stop_propagation(),
                    h2 { "Something went wrong" }
                    p { "{message}" }
                    div { class: "dialog-actions",
                        button {
                            class: "primary",
                            onclick: move |_| control.dismiss_notification(),
                            "OK"
                        }
                    }
                }
            }
        }
    }
}
