//! Sends alarm definitions to the provider

use std::sync::Arc;
use tracing::{info, warn};

use super::catalog;
use crate::config::ProvisionerConfig;
use crate::error::ProviderError;
use crate::models::{AlarmSpec, Volume};
use crate::provider::FsxProvider;

/// Result of one create-or-replace call
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmOutcome {
    pub alarm_name: String,
    pub result: Result<(), ProviderError>,
}

impl AlarmOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one provisioning stage
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmBatch {
    /// Account resolved by the identity lookup before the batch, if it succeeded
    pub account_id: Option<String>,
    pub outcomes: Vec<AlarmOutcome>,
}

/// Creates volume and file-system alarms through a provider
pub struct AlarmProvisioner {
    provider: Arc<dyn FsxProvider>,
    config: ProvisionerConfig,
}

impl AlarmProvisioner {
    pub fn new(provider: Arc<dyn FsxProvider>, config: ProvisionerConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ProvisionerConfig {
        &self.config
    }

    /// Capacity alarm for a single volume
    pub async fn create_volume_alarm(&self, volume: &Volume, file_system_id: &str) -> AlarmBatch {
        let alarm = catalog::volume_capacity_alarm(&self.config, volume, file_system_id);
        self.put_all(vec![alarm]).await
    }

    /// CPU, disk throughput and network throughput alarms for a file system
    pub async fn create_filesystem_alarms(&self, file_system_id: &str) -> AlarmBatch {
        let alarms = catalog::filesystem_operational_alarms(&self.config, file_system_id);
        self.put_all(alarms).await
    }

    /// SSD capacity-tier alarms for a file system
    pub async fn create_filesystem_capacity_alarms(&self, file_system_id: &str) -> AlarmBatch {
        let alarms = catalog::filesystem_capacity_alarms(&self.config, file_system_id);
        self.put_all(alarms).await
    }

    async fn lookup_account_id(&self) -> Option<String> {
        match self.provider.caller_account_id().await {
            Ok(account_id) => {
                info!(account_id = %account_id, "Resolved caller identity");
                Some(account_id)
            }
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Caller identity lookup failed");
                None
            }
        }
    }

    /// Send each alarm in order; a failure never stops the rest
    async fn put_all(&self, alarms: Vec<AlarmSpec>) -> AlarmBatch {
        let account_id = self.lookup_account_id().await;
        let mut outcomes = Vec::with_capacity(alarms.len());

        for alarm in alarms {
            let result = self.provider.put_metric_alarm(&alarm).await;
            match &result {
                Ok(()) => info!(alarm = %alarm.name, metric = %alarm.metric, "Alarm created"),
                Err(e) => warn!(
                    alarm = %alarm.name,
                    kind = %e.kind(),
                    error = %e,
                    "Alarm creation failed"
                ),
            }
            outcomes.push(AlarmOutcome {
                alarm_name: alarm.name,
                result,
            });
        }

        AlarmBatch {
            account_id,
            outcomes,
        }
    }
}
