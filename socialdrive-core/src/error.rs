use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("account count must be at least 1")]
    NoAccounts,

    #[error("direct message {sender} -> {receiver} is outside the {count} configured accounts")]
    DirectIndexOutOfRange {
        sender: usize,
        receiver: usize,
        count: usize,
    },

    #[error("timeout for {0} must be non-zero")]
    ZeroTimeout(crate::OperationKind),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The account gate failed; nothing past account creation was attempted.
    #[error("only {created} of {required} accounts were created")]
    InsufficientAccounts { created: usize, required: usize },

    #[error("invalid workflow configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
