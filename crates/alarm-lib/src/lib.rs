//! FSx alarm provisioning library
//!
//! This crate provides the core functionality for:
//! - Listing FSx file systems and volumes
//! - Interactive file-system and volume selection
//! - CloudWatch alarm definitions and provisioning
//! - The end-to-end provisioning workflow

pub mod alarms;
pub mod config;
pub mod error;
pub mod lister;
pub mod models;
pub mod provider;
pub mod report;
pub mod selector;
pub mod workflow;

pub use alarms::{AlarmBatch, AlarmOutcome, AlarmProvisioner};
pub use crate::config::ProvisionerConfig;
pub use error::{ErrorKind, ProviderError, SelectionError};
pub use lister::ResourceLister;
pub use models::*;
pub use provider::{AwsProvider, FsxProvider};
pub use report::Reporter;
pub use selector::{LineSource, ScriptedInput};
pub use workflow::{run, RunSummary};
