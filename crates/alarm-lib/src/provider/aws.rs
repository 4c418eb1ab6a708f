//! AWS SDK implementation of [`FsxProvider`]

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch::operation::put_metric_alarm::builders::PutMetricAlarmFluentBuilder;
use aws_sdk_cloudwatch::types::{
    ComparisonOperator as CwComparisonOperator, Dimension as CwDimension,
    Statistic as CwStatistic,
};
use aws_sdk_fsx::config::Region;
use aws_sdk_fsx::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_fsx::types::{VolumeFilter, VolumeFilterName};
use tracing::debug;

use super::FsxProvider;
use crate::error::{classify_error_code, ErrorKind, ProviderError};
use crate::models::{AlarmSpec, ComparisonOperator, FileSystem, Statistic, Tag, Volume};

/// Classify an SDK failure, keeping the full error chain as the message
fn classify_sdk_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> ProviderError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let kind = match &err {
        SdkError::ConstructionFailure(_) => ErrorKind::Validation,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ErrorKind::Transport,
        SdkError::ServiceError(service_err) => classify_error_code(service_err.err().code()),
        _ => classify_error_code(err.code()),
    };

    ProviderError::new(kind, operation, DisplayErrorContext(&err).to_string())
}

fn convert_file_system(fs: &aws_sdk_fsx::types::FileSystem) -> Option<FileSystem> {
    let file_system_id = fs.file_system_id()?;

    Some(FileSystem {
        file_system_id: file_system_id.to_string(),
        file_system_type: fs.file_system_type().map(|t| t.as_str().to_string()),
        tags: fs
            .tags()
            .iter()
            .filter_map(|tag| {
                Some(Tag {
                    key: tag.key()?.to_string(),
                    value: tag.value().unwrap_or_default().to_string(),
                })
            })
            .collect(),
    })
}

fn convert_volume(volume: &aws_sdk_fsx::types::Volume, file_system_id: &str) -> Option<Volume> {
    let volume_id = volume.volume_id()?;

    Some(Volume {
        volume_id: volume_id.to_string(),
        name: volume.name().unwrap_or_default().to_string(),
        file_system_id: volume
            .file_system_id()
            .unwrap_or(file_system_id)
            .to_string(),
    })
}

fn comparison_operator(op: ComparisonOperator) -> CwComparisonOperator {
    match op {
        ComparisonOperator::GreaterThanThreshold => CwComparisonOperator::GreaterThanThreshold,
        ComparisonOperator::GreaterThanOrEqualToThreshold => {
            CwComparisonOperator::GreaterThanOrEqualToThreshold
        }
    }
}

fn statistic(stat: Statistic) -> CwStatistic {
    match stat {
        Statistic::Average => CwStatistic::Average,
    }
}

/// Translate an alarm definition into a `PutMetricAlarm` request, keeping
/// action and dimension order
fn put_metric_alarm_request(
    client: &aws_sdk_cloudwatch::Client,
    alarm: &AlarmSpec,
) -> PutMetricAlarmFluentBuilder {
    let mut request = client
        .put_metric_alarm()
        .alarm_name(&alarm.name)
        .alarm_description(&alarm.description)
        .comparison_operator(comparison_operator(alarm.comparison))
        .evaluation_periods(alarm.evaluation_periods as i32)
        .metric_name(alarm.metric.as_str())
        .namespace(&alarm.namespace)
        .period(alarm.period_secs as i32)
        .statistic(statistic(alarm.statistic))
        .threshold(alarm.threshold)
        .actions_enabled(alarm.actions_enabled);

    for topic in &alarm.alarm_actions {
        request = request.alarm_actions(topic);
    }
    for topic in &alarm.ok_actions {
        request = request.ok_actions(topic);
    }
    for dimension in &alarm.dimensions {
        request = request.dimensions(
            CwDimension::builder()
                .name(&dimension.name)
                .value(&dimension.value)
                .build(),
        );
    }

    request
}

/// FSx, CloudWatch and STS clients sharing one region-bound SDK config
pub struct AwsProvider {
    region: String,
    fsx: aws_sdk_fsx::Client,
    cloudwatch: aws_sdk_cloudwatch::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsProvider {
    /// Build clients for `region` from the default credential chain
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            region: region.to_string(),
            fsx: aws_sdk_fsx::Client::new(&config),
            cloudwatch: aws_sdk_cloudwatch::Client::new(&config),
            sts: aws_sdk_sts::Client::new(&config),
        }
    }
}

#[async_trait]
impl FsxProvider for AwsProvider {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_file_systems(&self) -> Result<Vec<FileSystem>, ProviderError> {
        let mut file_systems = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .fsx
                .describe_file_systems()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error("DescribeFileSystems", e))?;

            file_systems.extend(output.file_systems().iter().filter_map(convert_file_system));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(region = %self.region, count = file_systems.len(), "Described file systems");
        Ok(file_systems)
    }

    async fn describe_volumes(&self, file_system_id: &str) -> Result<Vec<Volume>, ProviderError> {
        let filter = VolumeFilter::builder()
            .name(VolumeFilterName::FileSystemId)
            .values(file_system_id)
            .build();

        let mut volumes = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .fsx
                .describe_volumes()
                .filters(filter.clone())
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| classify_sdk_error("DescribeVolumes", e))?;

            volumes.extend(
                output
                    .volumes()
                    .iter()
                    .filter_map(|v| convert_volume(v, file_system_id)),
            );

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(file_system_id, count = volumes.len(), "Described volumes");
        Ok(volumes)
    }

    async fn put_metric_alarm(&self, alarm: &AlarmSpec) -> Result<(), ProviderError> {
        put_metric_alarm_request(&self.cloudwatch, alarm)
            .send()
            .await
            .map_err(|e| classify_sdk_error("PutMetricAlarm", e))?;

        debug!(alarm = %alarm.name, "Put metric alarm");
        Ok(())
    }

    async fn caller_account_id(&self) -> Result<String, ProviderError> {
        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| classify_sdk_error("GetCallerIdentity", e))?;

        output.account().map(str::to_string).ok_or_else(|| {
            ProviderError::new(
                ErrorKind::Transport,
                "GetCallerIdentity",
                "response did not include an account id",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarms::catalog;
    use crate::config::ProvisionerConfig;
    use aws_sdk_fsx::error::ErrorMetadata;
    use aws_sdk_fsx::operation::describe_file_systems::DescribeFileSystemsError;
    use aws_sdk_fsx::types::FileSystemType;

    fn sdk_tag(key: &str, value: &str) -> aws_sdk_fsx::types::Tag {
        aws_sdk_fsx::types::Tag::builder().key(key).value(value).build()
    }

    fn cloudwatch_client() -> aws_sdk_cloudwatch::Client {
        let config = aws_sdk_cloudwatch::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        aws_sdk_cloudwatch::Client::from_conf(config)
    }

    fn service_error(code: &str) -> SdkError<DescribeFileSystemsError, ()> {
        let meta = ErrorMetadata::builder().code(code).message("scripted").build();
        SdkError::service_error(DescribeFileSystemsError::generic(meta), ())
    }

    #[test]
    fn test_convert_file_system_keeps_tag_order() {
        let fs = aws_sdk_fsx::types::FileSystem::builder()
            .file_system_id("fs-0aaa")
            .file_system_type(FileSystemType::Ontap)
            .tags(sdk_tag("Owner", "storage-team"))
            .tags(sdk_tag("Name", "prod"))
            .build();

        let converted = convert_file_system(&fs).unwrap();

        assert_eq!(converted.file_system_id, "fs-0aaa");
        assert_eq!(converted.file_system_type.as_deref(), Some("ONTAP"));
        assert_eq!(converted.tags.len(), 2);
        assert_eq!(converted.display_name(), "storage-team");
    }

    #[test]
    fn test_convert_file_system_without_tags_or_id() {
        let untagged = aws_sdk_fsx::types::FileSystem::builder()
            .file_system_id("fs-0bbb")
            .build();
        let converted = convert_file_system(&untagged).unwrap();
        assert!(converted.tags.is_empty());
        assert_eq!(converted.display_name(), "N/A");

        let anonymous = aws_sdk_fsx::types::FileSystem::builder().build();
        assert!(convert_file_system(&anonymous).is_none());
    }

    #[test]
    fn test_convert_volume_defaults() {
        let full = aws_sdk_fsx::types::Volume::builder()
            .volume_id("fsvol-1")
            .name("data")
            .file_system_id("fs-0aaa")
            .build();
        assert_eq!(
            convert_volume(&full, "fs-other"),
            Some(Volume::new("fsvol-1", "data", "fs-0aaa"))
        );

        let sparse = aws_sdk_fsx::types::Volume::builder()
            .volume_id("fsvol-2")
            .build();
        assert_eq!(
            convert_volume(&sparse, "fs-0aaa"),
            Some(Volume::new("fsvol-2", "", "fs-0aaa"))
        );

        let no_id = aws_sdk_fsx::types::Volume::builder().name("orphan").build();
        assert_eq!(convert_volume(&no_id, "fs-0aaa"), None);
    }

    #[test]
    fn test_capacity_alarm_request_fields() {
        let config = ProvisionerConfig::with_topics(["arn:topic:a", "arn:topic:b"]);
        let alarm = catalog::filesystem_capacity_alarms(&config, "fs-0aaa").remove(0);

        let request = put_metric_alarm_request(&cloudwatch_client(), &alarm);
        let input = request.as_input();

        assert_eq!(input.get_alarm_name().as_deref(), Some(alarm.name.as_str()));
        assert_eq!(input.get_metric_name().as_deref(), Some("StorageCapacityUtilization"));
        assert_eq!(input.get_namespace().as_deref(), Some("AWS/FSx"));
        assert_eq!(
            input.get_comparison_operator(),
            &Some(CwComparisonOperator::GreaterThanOrEqualToThreshold)
        );
        assert_eq!(input.get_statistic(), &Some(CwStatistic::Average));
        assert_eq!(input.get_threshold(), &Some(75.0));
        assert_eq!(input.get_period(), &Some(300));
        assert_eq!(input.get_evaluation_periods(), &Some(1));
        assert_eq!(input.get_actions_enabled(), &Some(true));

        let topics = Some(vec!["arn:topic:a".to_string(), "arn:topic:b".to_string()]);
        assert_eq!(input.get_alarm_actions(), &topics);
        assert_eq!(input.get_ok_actions(), &topics);

        let dimensions: Vec<(Option<&str>, Option<&str>)> = input
            .get_dimensions()
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|d| (d.name(), d.value()))
            .collect();
        assert_eq!(
            dimensions,
            vec![
                (Some("StorageTier"), Some("SSD")),
                (Some("FileSystemId"), Some("fs-0aaa")),
                (Some("DataType"), Some("All")),
            ]
        );
    }

    #[test]
    fn test_throughput_alarm_uses_strict_comparison() {
        let config = ProvisionerConfig::default();
        let alarm = catalog::filesystem_operational_alarms(&config, "fs-0aaa").remove(1);

        let request = put_metric_alarm_request(&cloudwatch_client(), &alarm);

        assert_eq!(
            request.as_input().get_comparison_operator(),
            &Some(CwComparisonOperator::GreaterThanThreshold)
        );
        assert_eq!(request.as_input().get_period(), &Some(900));
    }

    #[test]
    fn test_classify_service_errors_by_code() {
        let err = classify_sdk_error("DescribeFileSystems", service_error("AccessDenied"));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(err.operation(), "DescribeFileSystems");

        let err = classify_sdk_error("DescribeFileSystems", service_error("FileSystemNotFound"));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = classify_sdk_error("DescribeFileSystems", service_error("InternalServerError"));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_classify_transport_and_construction_failures() {
        let timeout: SdkError<DescribeFileSystemsError, ()> = SdkError::timeout_error("too slow");
        assert_eq!(
            classify_sdk_error("DescribeFileSystems", timeout).kind(),
            ErrorKind::Transport
        );

        let invalid: SdkError<DescribeFileSystemsError, ()> =
            SdkError::construction_failure("bad input");
        assert_eq!(
            classify_sdk_error("DescribeFileSystems", invalid).kind(),
            ErrorKind::Validation
        );
    }
}
