mod config;
mod constants;
mod data;
mod error;
mod failure;
mod metrics;
mod record;
mod stats;
mod wire;

pub use config::*;
pub use constants::*;
pub use data::*;
pub use error::*;
pub use failure::*;
pub use metrics::*;
pub use record::*;
pub use stats::*;
pub use wire::*;
