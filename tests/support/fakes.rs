use silene::handoff::{ArtifactConsumer, HandOffError, LaunchRequest};
use silene::import::{ArtifactPicker, ContentHandle};
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};

/// Picker answering from a queue of prepared selections.
/// Once the queue is empty every request is answered as cancelled.
#[derive(Default)]
pub struct ScriptedPicker {
    answers: Mutex<Vec<Option<ContentHandle>>>,
    calls: AtomicUsize,
    filters: Mutex<Vec<String>>,
}

impl ScriptedPicker {
    pub fn new(answers: Vec<Option<ContentHandle>>) -> Self {
        Self {
            answers: Mutex::new(answers),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn filters(&self) -> Vec<String> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ArtifactPicker for ScriptedPicker {
    async fn request_selection(&self, mime_filter: &str) -> Option<ContentHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.filters.lock().unwrap().push(mime_filter.to_string());
        let mut answers = self.answers.lock().unwrap();
        if answers.is_empty() {
            None
        } else {
            answers.remove(0)
        }
    }
}

/// Consumer that records launch requests instead of running anything
#[derive(Default)]
pub struct RecordingConsumer {
    launches: Mutex<Vec<LaunchRequest>>,
}

impl RecordingConsumer {
    pub fn launches(&self) -> Vec<LaunchRequest> {
        self.launches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ArtifactConsumer for RecordingConsumer {
    async fn launch(&self, request: LaunchRequest) -> Result<(), HandOffError> {
        self.launches.lock().unwrap().push(request);
        Ok(())
    }
}

/// Reader that blocks on its first read until the gate is opened,
/// then serves its data in small pieces
pub struct GatedReader {
    gate: mpsc::Receiver<()>,
    data: Cursor<Vec<u8>>,
    opened: bool,
}

impl GatedReader {
    pub fn new(data: Vec<u8>) -> (Self, mpsc::Sender<()>) {
        let (open, gate) = mpsc::channel();
        let reader = Self {
            gate,
            data: Cursor::new(data),
            opened: false,
        };
        (reader, open)
    }
}

impl Read for GatedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.opened {
            self.gate
                .recv()
                .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "gate dropped"))?;
            self.opened = true;
        }
        let limit = buf.len().min(1000);
        self.data.read(&mut buf[..limit])
    }
}

/// Reader that fails after serving `good_bytes`
pub struct FailingReader {
    remaining: usize,
}

impl FailingReader {
    pub fn new(good_bytes: usize) -> Self {
        Self {
            remaining: good_bytes,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stream truncated"));
        }
        let n = buf.len().min(self.remaining);
        buf[..n].fill(0x5A);
        self.remaining -= n;
        Ok(n)
    }
}
