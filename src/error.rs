//! Error types for the I/O edges of the engine
//!
//! The simulation itself never fails; these only surface where input
//! arrives from outside (sockets, HTTP bodies, producer queues).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtmosphereError {
    #[error("Malformed control message: {0}")]
    MalformedControl(#[from] serde_json::Error),

    #[error("Queue full: {0}")]
    QueueFull(&'static str),

    #[error("Empty utterance")]
    EmptyUtterance,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
