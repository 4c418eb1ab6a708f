//! In-memory provider that records every call

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::FsxProvider;
use crate::error::{ErrorKind, ProviderError};
use crate::models::{AlarmSpec, FileSystem, Volume};

#[derive(Default)]
struct Recorded {
    volume_queries: Vec<String>,
    put_attempts: Vec<AlarmSpec>,
    identity_lookups: usize,
}

/// Scriptable [`FsxProvider`] for tests
pub struct MockProvider {
    region: String,
    file_systems: Result<Vec<FileSystem>, ProviderError>,
    volumes: HashMap<String, Vec<Volume>>,
    volume_error: Option<ProviderError>,
    alarm_failures: HashMap<String, ErrorKind>,
    account_id: Option<String>,
    recorded: Mutex<Recorded>,
}

impl MockProvider {
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
            file_systems: Ok(Vec::new()),
            volumes: HashMap::new(),
            volume_error: None,
            alarm_failures: HashMap::new(),
            account_id: Some("123456789012".to_string()),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    pub fn with_file_systems(mut self, file_systems: Vec<FileSystem>) -> Self {
        self.file_systems = Ok(file_systems);
        self
    }

    pub fn with_volumes(mut self, file_system_id: &str, volumes: Vec<Volume>) -> Self {
        self.volumes.insert(file_system_id.to_string(), volumes);
        self
    }

    /// Make `describe_file_systems` fail
    pub fn failing_file_systems(mut self, kind: ErrorKind) -> Self {
        self.file_systems = Err(ProviderError::new(
            kind,
            "DescribeFileSystems",
            "scripted failure",
        ));
        self
    }

    /// Make `describe_volumes` fail
    pub fn failing_volumes(mut self, kind: ErrorKind) -> Self {
        self.volume_error = Some(ProviderError::new(kind, "DescribeVolumes", "scripted failure"));
        self
    }

    /// Make `put_metric_alarm` fail for the alarm called `alarm_name`
    pub fn failing_alarm(mut self, alarm_name: impl Into<String>, kind: ErrorKind) -> Self {
        self.alarm_failures.insert(alarm_name.into(), kind);
        self
    }

    /// Make the identity lookup fail
    pub fn without_identity(mut self) -> Self {
        self.account_id = None;
        self
    }

    /// Every alarm passed to `put_metric_alarm`, including failed ones
    pub fn put_attempts(&self) -> Vec<AlarmSpec> {
        self.recorded
            .lock()
            .map(|r| r.put_attempts.clone())
            .unwrap_or_default()
    }

    /// File-system ids passed to `describe_volumes`
    pub fn volume_queries(&self) -> Vec<String> {
        self.recorded
            .lock()
            .map(|r| r.volume_queries.clone())
            .unwrap_or_default()
    }

    pub fn identity_lookups(&self) -> usize {
        self.recorded
            .lock()
            .map(|r| r.identity_lookups)
            .unwrap_or_default()
    }
}

#[async_trait]
impl FsxProvider for MockProvider {
    fn region(&self) -> &str {
        &self.region
    }

    async fn describe_file_systems(&self) -> Result<Vec<FileSystem>, ProviderError> {
        self.file_systems.clone()
    }

    async fn describe_volumes(&self, file_system_id: &str) -> Result<Vec<Volume>, ProviderError> {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.volume_queries.push(file_system_id.to_string());
        }
        if let Some(err) = &self.volume_error {
            return Err(err.clone());
        }
        Ok(self.volumes.get(file_system_id).cloned().unwrap_or_default())
    }

    async fn put_metric_alarm(&self, alarm: &AlarmSpec) -> Result<(), ProviderError> {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.put_attempts.push(alarm.clone());
        }
        match self.alarm_failures.get(&alarm.name) {
            Some(kind) => Err(ProviderError::new(
                *kind,
                "PutMetricAlarm",
                format!("scripted failure for {}", alarm.name),
            )),
            None => Ok(()),
        }
    }

    async fn caller_account_id(&self) -> Result<String, ProviderError> {
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.identity_lookups += 1;
        }
        self.account_id.clone().ok_or_else(|| {
            ProviderError::new(
                ErrorKind::PermissionDenied,
                "GetCallerIdentity",
                "scripted failure",
            )
        })
    }
}
