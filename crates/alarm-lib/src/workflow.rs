//! End-to-end provisioning run
//!
//! List file systems, let the operator pick one and some of its volumes, then
//! create the volume alarms, the operational alarms and the capacity-tier
//! alarms, in that order. Provider failures are reported and never abort the
//! run; only losing operator input during file-system selection does.

use std::sync::Arc;
use tracing::info;

use crate::alarms::{AlarmBatch, AlarmOutcome, AlarmProvisioner};
use crate::config::ProvisionerConfig;
use crate::error::SelectionError;
use crate::lister::ResourceLister;
use crate::provider::FsxProvider;
use crate::report::Reporter;
use crate::selector::{self, LineSource, TokenResolution};

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Selected file system, `None` when nothing was found
    pub file_system_id: Option<String>,
    pub volume_alarms: Vec<AlarmOutcome>,
    /// Operator tokens that matched no volume
    pub unmatched_volumes: Vec<String>,
    pub filesystem_alarms: Vec<AlarmOutcome>,
    pub capacity_alarms: Vec<AlarmOutcome>,
}

impl RunSummary {
    pub fn outcomes(&self) -> impl Iterator<Item = &AlarmOutcome> {
        self.volume_alarms
            .iter()
            .chain(&self.filesystem_alarms)
            .chain(&self.capacity_alarms)
    }

    pub fn attempted(&self) -> usize {
        self.outcomes().count()
    }

    pub fn created(&self) -> usize {
        self.outcomes().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.created()
    }
}

fn report_batch(reporter: &mut dyn Reporter, batch: &AlarmBatch) {
    if let Some(account_id) = &batch.account_id {
        reporter.info(&format!("Account ID: {}", account_id));
    }

    for outcome in &batch.outcomes {
        match &outcome.result {
            Ok(()) => reporter.success(&format!(
                "Successfully created alarm: {}",
                outcome.alarm_name
            )),
            Err(e) => reporter.error(&format!(
                "Error creating alarm {}: {}",
                outcome.alarm_name, e
            )),
        }
    }
}

/// Run the interactive provisioning flow against `provider`
pub async fn run(
    provider: Arc<dyn FsxProvider>,
    config: ProvisionerConfig,
    input: &mut dyn LineSource,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, SelectionError> {
    let lister = ResourceLister::new(provider.clone());
    let provisioner = AlarmProvisioner::new(provider, config);
    let mut summary = RunSummary::default();

    reporter.info(&format!(
        "Attempting to list FSx filesystems in region {}",
        lister.region()
    ));
    let file_systems = match lister.list_file_systems().await {
        Ok(file_systems) => {
            reporter.info(&format!("Found {} file systems", file_systems.len()));
            file_systems
        }
        Err(e) => {
            reporter.error(&format!("Error listing file systems: {}", e));
            Vec::new()
        }
    };
    if file_systems.is_empty() {
        reporter.warning("No file systems found. Exiting.");
        return Ok(summary);
    }

    let selected = selector::select_file_system(&file_systems, input, reporter)?;
    let file_system_id = selected.file_system_id.clone();
    info!(file_system_id = %file_system_id, "File system selected");
    summary.file_system_id = Some(file_system_id.clone());

    reporter.info(&format!(
        "Attempting to list volumes for file system {}",
        file_system_id
    ));
    let volumes = lister
        .list_volumes(&file_system_id)
        .await
        .unwrap_or_else(|e| {
            reporter.error(&format!("Error listing volumes: {}", e));
            Vec::new()
        });

    if volumes.is_empty() {
        reporter.warning("No volumes found for the selected file system.");
    } else {
        reporter.info(&format!("Found {} volumes", volumes.len()));
        let tokens = selector::read_volume_tokens(&volumes, input, reporter)?;

        for resolution in selector::resolve_volumes(&volumes, &tokens) {
            match resolution {
                TokenResolution::Matched(volume) => {
                    reporter.info(&format!(
                        "Attempting to create alarm for volume {} ({})",
                        volume.volume_id, volume.name
                    ));
                    let batch = provisioner
                        .create_volume_alarm(volume, &file_system_id)
                        .await;
                    report_batch(reporter, &batch);
                    summary.volume_alarms.extend(batch.outcomes);
                }
                TokenResolution::Unmatched(token) => {
                    reporter.warning(&format!(
                        "Volume '{}' not found in the selected file system.",
                        token
                    ));
                    summary.unmatched_volumes.push(token);
                }
            }
        }
    }

    reporter.info(&format!(
        "Attempting to create alarms for file system {}",
        file_system_id
    ));
    let batch = provisioner.create_filesystem_alarms(&file_system_id).await;
    report_batch(reporter, &batch);
    summary.filesystem_alarms = batch.outcomes;

    reporter.info(&format!(
        "Attempting to create capacity alarms for file system {}",
        file_system_id
    ));
    let batch = provisioner
        .create_filesystem_capacity_alarms(&file_system_id)
        .await;
    report_batch(reporter, &batch);
    summary.capacity_alarms = batch.outcomes;

    info!(
        file_system_id = %file_system_id,
        attempted = summary.attempted(),
        created = summary.created(),
        "Provisioning finished"
    );
    Ok(summary)
}
