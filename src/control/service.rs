// # Control Service
//
// The control task is the only place that mutates the interactive controls and
// makes the hand-off decision. Picker answers and copy outcomes arrive from
// other tasks as events on the same channel, so every state change happens in
// order on this one task.

use super::handle::ControlHandle;
use super::types::{
    idle_status, AttemptReport, ControlEvent, ControlView, NOTIFICATION_MISSING_ARTIFACT,
    STATUS_COPYING, STATUS_LAUNCHED, STATUS_SELECTING,
};
use crate::handoff::{self, ArtifactConsumer, HandOffError};
use crate::import::{ArtifactPicker, ContentHandle, ImportOutcome, ImportState, Importer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// Import pipeline controller running on the shared runtime
pub struct ControlService {
    importer: Importer,
    picker: Arc<dyn ArtifactPicker>,
    consumer: Arc<dyn ArtifactConsumer>,
    mime_filter: String,
    events_rx: mpsc::UnboundedReceiver<ControlEvent>,
    /// Weak so the task stops once every ControlHandle is gone
    events_tx: mpsc::WeakUnboundedSender<ControlEvent>,
    view_tx: watch::Sender<ControlView>,
    view: ControlView,
    selection_pending: bool,
    subscribers: Vec<mpsc::UnboundedSender<AttemptReport>>,
}

impl ControlService {
    /// Start the control task, returning a handle for triggering and observing it
    pub fn start(
        runtime_handle: tokio::runtime::Handle,
        importer: Importer,
        picker: Arc<dyn ArtifactPicker>,
        consumer: Arc<dyn ArtifactConsumer>,
        mime_filter: impl Into<String>,
    ) -> ControlHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let view = ControlView::initial(importer.artifact_exists());
        let (view_tx, view_rx) = watch::channel(view.clone());

        info!(
            "ControlService: Destination {} (previous artifact: {})",
            importer.destination().display(),
            view.reuse_available
        );

        let service = ControlService {
            importer,
            picker,
            consumer,
            mime_filter: mime_filter.into(),
            events_rx,
            events_tx: events_tx.downgrade(),
            view_tx,
            view,
            selection_pending: false,
            subscribers: Vec::new(),
        };

        runtime_handle.spawn(service.listen_for_events());

        ControlHandle::new(events_tx, view_rx)
    }

    async fn listen_for_events(mut self) {
        debug!("ControlService: Worker started");

        while let Some(event) = self.events_rx.recv().await {
            self.handle_event(event).await;
        }

        debug!("ControlService: Channel closed");
    }

    async fn handle_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::SelectRequested => self.on_select_requested(),
            ControlEvent::ReuseRequested => self.on_reuse_requested().await,
            ControlEvent::DismissNotification => {
                if self.view.notification.take().is_some() {
                    self.publish();
                }
            }
            ControlEvent::Subscribe(tx) => self.subscribers.push(tx),
            ControlEvent::SelectionAnswered(selection) => {
                self.on_selection_answered(selection).await
            }
            ControlEvent::PickerFailed(reason) => self.on_picker_failed(reason).await,
            ControlEvent::CopyFinished(outcome) => self.settle_import(outcome).await,
        }
    }

    fn is_busy(&self) -> bool {
        self.selection_pending || self.view.state != ImportState::Idle
    }

    fn on_select_requested(&mut self) {
        if self.is_busy() {
            warn!(
                "ControlService: Ignoring select while busy (state: {:?})",
                self.view.state
            );
            return;
        }

        let Some(events_tx) = self.events_tx.upgrade() else {
            return;
        };

        self.selection_pending = true;
        self.view.select_enabled = false;
        self.view.status = STATUS_SELECTING.to_string();
        self.publish();

        let picker = self.picker.clone();
        let mime_filter = self.mime_filter.clone();
        tokio::spawn(async move {
            let picking =
                tokio::spawn(async move { picker.request_selection(&mime_filter).await });
            let event = match picking.await {
                Ok(selection) => ControlEvent::SelectionAnswered(selection),
                Err(e) => {
                    error!("ControlService: Picker task failed: {}", e);
                    ControlEvent::PickerFailed(format!("File picker failed: {}", e))
                }
            };
            let _ = events_tx.send(event);
        });
    }

    async fn on_selection_answered(&mut self, selection: Option<ContentHandle>) {
        self.selection_pending = false;

        let Some(handle) = selection else {
            info!("ControlService: Selection cancelled");
            self.settle_import(ImportOutcome::Cancelled).await;
            return;
        };

        let Some(events_tx) = self.events_tx.upgrade() else {
            return;
        };

        info!("ControlService: Importing {}", handle.name());
        match self.importer.start(handle) {
            Ok(task) => {
                self.view.state = ImportState::Copying;
                self.view.select_enabled = false;
                self.view.status = STATUS_COPYING.to_string();
                self.publish();

                tokio::spawn(async move {
                    let outcome = task.outcome().await;
                    let _ = events_tx.send(ControlEvent::CopyFinished(outcome));
                });
            }
            Err(e) => {
                error!("ControlService: Could not start import: {}", e);
                self.settle_import(ImportOutcome::Failure {
                    reason: e.to_string(),
                })
                .await;
            }
        }
    }

    async fn on_picker_failed(&mut self, reason: String) {
        self.selection_pending = false;
        self.settle_import(ImportOutcome::Failure { reason }).await;
    }

    /// Every import attempt ends here with exactly one outcome
    async fn settle_import(&mut self, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Success { artifact, bytes } => {
                info!("ControlService: Import done ({} bytes)", bytes);
                self.view.state = ImportState::Done;
                self.publish();
                self.decide_hand_off(artifact).await;
            }
            ImportOutcome::Failure { reason } => {
                warn!("ControlService: Import failed: {}", reason);
                self.view.state = ImportState::Failed;
                self.view.status = format!("Import failed: {}", reason);
                self.publish();

                self.view.state = ImportState::Idle;
                self.view.select_enabled = true;
                self.view.reuse_available = self.importer.artifact_exists();
                self.publish();
                self.report(AttemptReport::Failed { reason });
            }
            ImportOutcome::Cancelled => {
                self.reset_to_idle();
                self.report(AttemptReport::Cancelled);
            }
        }
    }

    async fn on_reuse_requested(&mut self) {
        if self.is_busy() {
            warn!(
                "ControlService: Ignoring reuse while busy (state: {:?})",
                self.view.state
            );
            return;
        }
        if !self.view.reuse_available {
            warn!("ControlService: Ignoring reuse, no previous artifact was offered");
            return;
        }

        info!("ControlService: Reusing last imported artifact");
        let artifact = self.importer.destination().to_path_buf();
        self.decide_hand_off(artifact).await;
    }

    /// Re-check the artifact and hand it to the consumer, then return to Idle
    async fn decide_hand_off(&mut self, artifact: PathBuf) {
        let report = match handoff::hand_off(self.consumer.as_ref(), &artifact).await {
            Ok(request) => {
                self.view.status = STATUS_LAUNCHED.to_string();
                AttemptReport::HandedOff {
                    artifact: request.artifact,
                }
            }
            Err(HandOffError::MissingArtifact(artifact)) => {
                self.view.notification = Some(NOTIFICATION_MISSING_ARTIFACT.to_string());
                AttemptReport::MissingArtifact { artifact }
            }
            Err(e) => {
                error!("ControlService: Hand-off failed: {}", e);
                self.view.notification = Some(e.to_string());
                AttemptReport::LaunchFailed {
                    reason: e.to_string(),
                }
            }
        };

        self.view.state = ImportState::Idle;
        self.view.select_enabled = true;
        self.view.reuse_available = self.importer.artifact_exists();
        if !matches!(report, AttemptReport::HandedOff { .. }) {
            self.view.status = idle_status(self.view.reuse_available).to_string();
        }
        self.publish();
        self.report(report);
    }

    fn reset_to_idle(&mut self) {
        self.view.state = ImportState::Idle;
        self.view.select_enabled = true;
        self.view.reuse_available = self.importer.artifact_exists();
        self.view.status = idle_status(self.view.reuse_available).to_string();
        self.publish();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view.clone());
    }

    fn report(&mut self, report: AttemptReport) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(report.clone()).is_ok());
    }
}
