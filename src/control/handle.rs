use super::types::{AttemptReport, ControlEvent, ControlView};
use tokio::sync::{mpsc, watch};
use tracing::error;

/// Handle for triggering the pipeline and observing the controls
#[derive(Clone)]
pub struct ControlHandle {
    events_tx: mpsc::UnboundedSender<ControlEvent>,
    view_rx: watch::Receiver<ControlView>,
}

impl ControlHandle {
    pub(crate) fn new(
        events_tx: mpsc::UnboundedSender<ControlEvent>,
        view_rx: watch::Receiver<ControlView>,
    ) -> Self {
        Self { events_tx, view_rx }
    }

    /// "Select new artifact": open the picker and import the selection
    pub fn select_new(&self) {
        self.send(ControlEvent::SelectRequested);
    }

    /// "Reuse last artifact": hand off the previously imported artifact
    pub fn use_last(&self) {
        self.send(ControlEvent::ReuseRequested);
    }

    /// Acknowledge the blocking error notification
    pub fn dismiss_notification(&self) {
        self.send(ControlEvent::DismissNotification);
    }

    /// Current snapshot of the controls
    pub fn view(&self) -> ControlView {
        self.view_rx.borrow().clone()
    }

    /// Receiver that is notified on every published snapshot
    pub fn watch(&self) -> watch::Receiver<ControlView> {
        self.view_rx.clone()
    }

    /// Subscribe to attempt reports.
    /// The subscription is removed when the receiver is dropped
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<AttemptReport> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.send(ControlEvent::Subscribe(tx));
        rx
    }

    /// Wait until a published snapshot satisfies `predicate`.
    /// Returns `None` if the control task has stopped.
    pub async fn wait_until(
        &self,
        mut predicate: impl FnMut(&ControlView) -> bool,
    ) -> Option<ControlView> {
        let mut view_rx = self.view_rx.clone();
        loop {
            {
                let view = view_rx.borrow_and_update();
                if predicate(&*view) {
                    return Some(view.clone());
                }
            }
            if view_rx.changed().await.is_err() {
                return None;
            }
        }
    }

    fn send(&self, event: ControlEvent) {
        if self.events_tx.send(event).is_err() {
            error!("ControlHandle: Control task is not running");
        }
    }
}
