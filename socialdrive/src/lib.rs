//! Scripted integration driver for a social-network service.
//!
//! A run creates a fixed set of accounts, has every account follow every other one, publishes
//! one post per account and sends two patterns of direct messages. Each call is bounded by a
//! timeout, classified, and reported; only a shortfall in account creation stops the run.
//!
//! ```no_run
//! use socialdrive::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let summary = socialdrive::drive(
//!         "localhost:9090",
//!         WorkflowConfig::default(),
//!         TracingReporter,
//!         RandomSuffix,
//!     )
//!     .await?;
//!     println!("finished in state {}", summary.state);
//!     Ok(())
//! }
//! ```
pub mod error;
pub mod facade;
pub mod http;
pub mod names;
pub mod orchestrator;
pub mod registry;
pub mod reporter;
pub mod service;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DriveError, TelemetryError, TransportError};
pub use facade::{Attempt, RpcFacade};
pub use http::HttpService;
pub use orchestrator::Orchestrator;

use tracing::{info, instrument};

pub mod prelude {
    pub use crate::names::{RandomSuffix, SequentialSuffix, SuffixGenerator};
    pub use crate::reporter::{MemoryReporter, Reporter, TracingReporter};
    pub use crate::service::SocialService;
    pub use crate::{drive, HttpService, Orchestrator};
    pub use socialdrive_core::{RunSummary, WorkflowConfig, WorkflowState};
}

/// Connects to `address`, runs the workflow, and releases the connection.
///
/// A failed account gate is not an error here; it shows up as
/// [`WorkflowState::Aborted`](socialdrive_core::WorkflowState::Aborted) in the summary.
#[instrument(name = "drive", skip(config, reporter, names))]
pub async fn drive<R, G>(
    address: &str,
    config: socialdrive_core::WorkflowConfig,
    reporter: R,
    names: G,
) -> Result<socialdrive_core::RunSummary, DriveError>
where
    R: reporter::Reporter,
    G: names::SuffixGenerator,
{
    info!("Starting run against {address}");
    let service = HttpService::connect(address)?;
    let summary = Orchestrator::new(config, &service, reporter, names)?
        .run()
        .await;
    info!("Run against {address} finished in state {}", summary.state);
    Ok(summary)
}
