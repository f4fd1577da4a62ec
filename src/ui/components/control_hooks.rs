use crate::control::{ControlHandle, ControlView};
use dioxus::prelude::*;
use tracing::trace;

/// Hook to access the control handle from components
pub fn use_control() -> ControlHandle {
    use_context::<ControlHandle>()
}

/// Hook mirroring the control task's published snapshots into a signal
pub fn use_control_view() -> Signal<ControlView> {
    let control = use_control();
    let mut view = use_signal(|| control.view());

    use_future(move || {
        let mut updates = control.watch();
        async move {
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                trace!("Control view update: {:?}", snapshot);
                view.set(snapshot);
            }
        }
    });

    view
}
