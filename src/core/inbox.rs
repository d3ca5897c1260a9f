//! Producer queues between recognizers and the tick loop
//!
//! Producers never wait: a full queue drops the value. The tick loop never
//! waits either: it takes whatever is queued and moves on.

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;
use crate::error::AtmosphereError;

/// Producer side, cheap to clone into recognizer/audio tasks
#[derive(Debug, Clone)]
pub struct Feeds {
    text_tx: mpsc::Sender<String>,
    volume_tx: mpsc::Sender<f64>,
}

/// Consumer side, owned by the tick loop
#[derive(Debug)]
pub struct Inbox {
    text_rx: mpsc::Receiver<String>,
    volume_rx: mpsc::Receiver<f64>,
}

/// Create a bounded text queue and a bounded volume queue
pub fn channel(capacity: usize) -> (Feeds, Inbox) {
    let capacity = capacity.max(1);
    let (text_tx, text_rx) = mpsc::channel(capacity);
    let (volume_tx, volume_rx) = mpsc::channel(capacity);
    (Feeds { text_tx, volume_tx }, Inbox { text_rx, volume_rx })
}

impl Feeds {
    /// Queue a recognized utterance
    pub fn push_text(&self, text: impl Into<String>) -> Result<(), AtmosphereError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AtmosphereError::EmptyUtterance);
        }
        match self.text_tx.try_send(text) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => {
                warn!(text = %dropped, "text queue full, dropping utterance");
                Err(AtmosphereError::QueueFull("text"))
            }
            Err(TrySendError::Closed(_)) => Err(AtmosphereError::QueueFull("text (closed)")),
        }
    }

    /// Queue a volume sample in [0, 1]
    pub fn push_volume(&self, level: f64) -> Result<(), AtmosphereError> {
        let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 0.0 };
        self.volume_tx.try_send(level).map_err(|e| match e {
            TrySendError::Full(_) => AtmosphereError::QueueFull("volume"),
            TrySendError::Closed(_) => AtmosphereError::QueueFull("volume (closed)"),
        })
    }
}

impl Inbox {
    /// Everything queued right now, without waiting
    pub fn drain_text(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(text) = self.text_rx.try_recv() {
            out.push(text);
        }
        out
    }

    /// Queued volume samples, oldest first
    pub fn drain_volume(&mut self) -> Vec<f64> {
        let mut out = Vec::new();
        while let Ok(level) = self.volume_rx.try_recv() {
            out.push(level);
        }
        out
    }
}
