use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum HandOffError {
    #[error("Imported artifact is missing: {0}")]
    MissingArtifact(PathBuf),
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What the downstream consumer is asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub artifact: PathBuf,
    /// Discard any state left by a previous launch
    pub fresh_state: bool,
}

/// Downstream consumer of the imported artifact
#[async_trait::async_trait]
pub trait ArtifactConsumer: Send + Sync {
    async fn launch(&self, request: LaunchRequest) -> Result<(), HandOffError>;
}

/// Re-check the artifact and hand it to `consumer`.
///
/// The existence check runs here, after the copy has been committed, so a file
/// removed between the completion signal and the decision is reported as missing.
pub async fn hand_off(
    consumer: &dyn ArtifactConsumer,
    artifact: &Path,
) -> Result<LaunchRequest, HandOffError> {
    let present = tokio::fs::metadata(artifact)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !present {
        warn!("Hand-off: {} is missing", artifact.display());
        return Err(HandOffError::MissingArtifact(artifact.to_path_buf()));
    }

    let request = LaunchRequest {
        artifact: artifact.to_path_buf(),
        fresh_state: true,
    };
    consumer.launch(request.clone()).await?;
    info!("Hand-off: Launched consumer for {}", artifact.display());
    Ok(request)
}

/// Runs the runtime program as a child process with the artifact path as its argument
pub struct ProcessConsumer {
    program: PathBuf,
    running: Mutex<Option<Child>>,
}

impl ProcessConsumer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            running: Mutex::new(None),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait::async_trait]
impl ArtifactConsumer for ProcessConsumer {
    async fn launch(&self, request: LaunchRequest) -> Result<(), HandOffError> {
        let mut running = self.running.lock().await;

        if request.fresh_state {
            if let Some(mut previous) = running.take() {
                info!("ProcessConsumer: Stopping previous runtime instance");
                if let Err(e) = previous.kill().await {
                    warn!("ProcessConsumer: Failed to stop previous instance: {}", e);
                }
            }
        }

        let child = Command::new(&self.program)
            .arg(&request.artifact)
            .spawn()
            .map_err(|source| HandOffError::Launch {
                program: self.program.clone(),
                source,
            })?;

        info!(
            "ProcessConsumer: Started {} (pid {:?})",
            self.program.display(),
            child.id()
        );
        *running = Some(child);
        Ok(())
    }
}
