//! Provider seam for the FSx, CloudWatch and STS calls
//!
//! The workflow only talks to [`FsxProvider`]. [`AwsProvider`] backs it with
//! the AWS SDK; the in-memory [`MockProvider`] records calls for tests.

mod aws;
#[cfg(any(test, feature = "test-util"))]
mod mock;

pub use aws::AwsProvider;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockProvider;

use crate::error::ProviderError;
use crate::models::{AlarmSpec, FileSystem, Volume};
use async_trait::async_trait;

/// Operations consumed from the cloud provider
#[async_trait]
pub trait FsxProvider: Send + Sync {
    /// Region the provider is bound to
    fn region(&self) -> &str;

    /// All file systems in the region
    async fn describe_file_systems(&self) -> Result<Vec<FileSystem>, ProviderError>;

    /// Volumes owned by `file_system_id`, filtered server-side
    async fn describe_volumes(&self, file_system_id: &str) -> Result<Vec<Volume>, ProviderError>;

    /// Create the alarm, replacing any existing alarm of the same name
    async fn put_metric_alarm(&self, alarm: &AlarmSpec) -> Result<(), ProviderError>;

    /// Account id of the calling identity
    async fn caller_account_id(&self) -> Result<String, ProviderError>;
}
