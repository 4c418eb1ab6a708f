//! Resource listing against the bound provider

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ProviderError;
use crate::models::{FileSystem, Volume};
use crate::provider::FsxProvider;

/// Lists file systems and their volumes
pub struct ResourceLister {
    provider: Arc<dyn FsxProvider>,
}

impl ResourceLister {
    pub fn new(provider: Arc<dyn FsxProvider>) -> Self {
        Self { provider }
    }

    pub fn region(&self) -> &str {
        self.provider.region()
    }

    /// All file systems in the provider's region
    pub async fn list_file_systems(&self) -> Result<Vec<FileSystem>, ProviderError> {
        match self.provider.describe_file_systems().await {
            Ok(file_systems) => {
                info!(
                    region = %self.region(),
                    count = file_systems.len(),
                    "Listed file systems"
                );
                Ok(file_systems)
            }
            Err(e) => {
                warn!(
                    region = %self.region(),
                    kind = %e.kind(),
                    error = %e,
                    "Failed to list file systems"
                );
                Err(e)
            }
        }
    }

    /// Volumes owned by `file_system_id`
    pub async fn list_volumes(&self, file_system_id: &str) -> Result<Vec<Volume>, ProviderError> {
        match self.provider.describe_volumes(file_system_id).await {
            Ok(volumes) => {
                info!(file_system_id, count = volumes.len(), "Listed volumes");
                Ok(volumes)
            }
            Err(e) => {
                warn!(
                    file_system_id,
                    kind = %e.kind(),
                    error = %e,
                    "Failed to list volumes"
                );
                Err(e)
            }
        }
    }
}
