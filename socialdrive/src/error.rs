use socialdrive_core::WorkflowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Service address is empty")]
    EmptyAddress,

    #[error("Unsupported URL scheme `{0}`; expected http or https")]
    UnsupportedScheme(String),

    #[error("Invalid service address: {0}")]
    Address(#[from] url::ParseError),

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Could not open log file: {0}")]
    LogFile(#[from] std::io::Error),

    #[error("Could not install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
