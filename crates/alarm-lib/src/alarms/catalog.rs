//! Fixed alarm definitions
//!
//! Every alarm notifies the configured topics on both ALARM and OK
//! transitions, averages over each period and is evaluated over one period.

use crate::config::ProvisionerConfig;
use crate::models::{AlarmSpec, ComparisonOperator, Dimension, MetricName, Statistic, Volume};

pub const VOLUME_ID: &str = "VolumeId";
pub const FILE_SYSTEM_ID: &str = "FileSystemId";
pub const STORAGE_TIER: &str = "StorageTier";
pub const DATA_TYPE: &str = "DataType";

/// Storage tier watched by the capacity-tier alarms
pub const SSD_TIER: &str = "SSD";
/// Data type watched by the capacity-tier alarms
pub const ALL_DATA: &str = "All";

/// Thresholds of the file-system capacity-tier alarms, in percent
pub const CAPACITY_TIER_THRESHOLDS: [f64; 3] = [75.0, 80.0, 90.0];

const FIVE_MINUTES: u32 = 300;
const FIFTEEN_MINUTES: u32 = 900;
const UTILIZATION_THRESHOLD: f64 = 90.0;

fn window_label(period_secs: u32) -> String {
    format!("{} minutes", period_secs / 60)
}

fn comparison_phrase(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::GreaterThanThreshold => "greater than",
        ComparisonOperator::GreaterThanOrEqualToThreshold => "greater than or equal to",
    }
}

/// Shared shape of every alarm this tool creates
struct AlarmTemplate {
    name: String,
    description: String,
    metric: MetricName,
    comparison: ComparisonOperator,
    period_secs: u32,
    threshold: f64,
    dimensions: Vec<Dimension>,
}

impl AlarmTemplate {
    fn build(self, config: &ProvisionerConfig) -> AlarmSpec {
        AlarmSpec {
            name: self.name,
            description: self.description,
            metric: self.metric,
            namespace: config.metric_namespace.clone(),
            comparison: self.comparison,
            statistic: Statistic::Average,
            period_secs: self.period_secs,
            evaluation_periods: 1,
            threshold: self.threshold,
            actions_enabled: true,
            alarm_actions: config.notification_topics.clone(),
            ok_actions: config.notification_topics.clone(),
            dimensions: self.dimensions,
        }
    }
}

/// Storage capacity alarm for one volume, at 90%
pub fn volume_capacity_alarm(
    config: &ProvisionerConfig,
    volume: &Volume,
    file_system_id: &str,
) -> AlarmSpec {
    let comparison = ComparisonOperator::GreaterThanOrEqualToThreshold;

    AlarmTemplate {
        name: format!(
            "Primary FSx ONTAP Volume: {} Utilization Reached at 90%",
            volume.name
        ),
        description: format!(
            "Notify when Storage Capacity Utilization of FSx volume {} is {} 90% for 1 datapoint within {}",
            volume.volume_id,
            comparison_phrase(comparison),
            window_label(FIVE_MINUTES)
        ),
        metric: MetricName::StorageCapacityUtilization,
        comparison,
        period_secs: FIVE_MINUTES,
        threshold: UTILIZATION_THRESHOLD,
        dimensions: vec![
            Dimension::new(VOLUME_ID, &volume.volume_id),
            Dimension::new(FILE_SYSTEM_ID, file_system_id),
        ],
    }
    .build(config)
}

/// CPU, disk throughput and network throughput alarms for a file system
pub fn filesystem_operational_alarms(
    config: &ProvisionerConfig,
    file_system_id: &str,
) -> Vec<AlarmSpec> {
    let definitions = [
        (
            "CPU Utilization",
            "CPU Utilization",
            MetricName::CpuUtilization,
            ComparisonOperator::GreaterThanOrEqualToThreshold,
            FIVE_MINUTES,
        ),
        (
            "Disk throughput Utilization",
            "File Server Disk Throughput Utilization",
            MetricName::FileServerDiskThroughputUtilization,
            ComparisonOperator::GreaterThanThreshold,
            FIFTEEN_MINUTES,
        ),
        (
            "Network throughput Utilization",
            "Network Throughput Utilization",
            MetricName::NetworkThroughputUtilization,
            ComparisonOperator::GreaterThanThreshold,
            FIFTEEN_MINUTES,
        ),
    ];

    definitions
        .into_iter()
        .map(|(title, label, metric, comparison, period_secs)| {
            AlarmTemplate {
                name: format!(
                    "FSx ONTAP {} Reached at 90% Threshold for {}",
                    title, file_system_id
                ),
                description: format!(
                    "Notify when {} of FSx file system {} is {} 90% for 1 datapoint within {}",
                    label,
                    file_system_id,
                    comparison_phrase(comparison),
                    window_label(period_secs)
                ),
                metric,
                comparison,
                period_secs,
                threshold: UTILIZATION_THRESHOLD,
                dimensions: vec![Dimension::new(FILE_SYSTEM_ID, file_system_id)],
            }
            .build(config)
        })
        .collect()
}

/// SSD capacity alarms at 75%, 80% and 90% for a file system
pub fn filesystem_capacity_alarms(
    config: &ProvisionerConfig,
    file_system_id: &str,
) -> Vec<AlarmSpec> {
    let comparison = ComparisonOperator::GreaterThanOrEqualToThreshold;

    CAPACITY_TIER_THRESHOLDS
        .iter()
        .map(|&threshold| {
            AlarmTemplate {
                name: format!(
                    "FSx ONTAP SSD Capacity Reached at {}% Threshold for {}",
                    threshold, file_system_id
                ),
                description: format!(
                    "Notify when Storage Capacity Utilization of FSx file system {} is {} {}% for 1 datapoint within {}",
                    file_system_id,
                    comparison_phrase(comparison),
                    threshold,
                    window_label(FIVE_MINUTES)
                ),
                metric: MetricName::StorageCapacityUtilization,
                comparison,
                period_secs: FIVE_MINUTES,
                threshold,
                dimensions: vec![
                    Dimension::new(STORAGE_TIER, SSD_TIER),
                    Dimension::new(FILE_SYSTEM_ID, file_system_id),
                    Dimension::new(DATA_TYPE, ALL_DATA),
                ],
            }
            .build(config)
        })
        .collect()
}
