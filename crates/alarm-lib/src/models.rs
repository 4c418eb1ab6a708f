//! Core data models for FSx alarm provisioning

/// Display name used when a file system carries no tags
pub const UNNAMED: &str = "N/A";

/// Key/value tag attached to a file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// FSx file system as reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct FileSystem {
    pub file_system_id: String,
    /// Provider-reported type, e.g. `ONTAP`
    pub file_system_type: Option<String>,
    pub tags: Vec<Tag>,
}

impl FileSystem {
    pub fn new(file_system_id: impl Into<String>) -> Self {
        Self {
            file_system_id: file_system_id.into(),
            file_system_type: None,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Value of the first tag, or `N/A` when untagged.
    ///
    /// The first tag wins regardless of its key.
    pub fn display_name(&self) -> &str {
        self.tags
            .first()
            .map(|tag| tag.value.as_str())
            .unwrap_or(UNNAMED)
    }
}

/// Volume belonging to a file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub volume_id: String,
    pub name: String,
    pub file_system_id: String,
}

impl Volume {
    pub fn new(
        volume_id: impl Into<String>,
        name: impl Into<String>,
        file_system_id: impl Into<String>,
    ) -> Self {
        Self {
            volume_id: volume_id.into(),
            name: name.into(),
            file_system_id: file_system_id.into(),
        }
    }

    /// True when `token` equals either the identifier or the name
    pub fn matches(&self, token: &str) -> bool {
        self.volume_id == token || self.name == token
    }
}

/// Comparison applied between the metric statistic and the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterThanThreshold,
    GreaterThanOrEqualToThreshold,
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterThanThreshold => "GreaterThanThreshold",
            ComparisonOperator::GreaterThanOrEqualToThreshold => "GreaterThanOrEqualToThreshold",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// FSx metrics the alarms watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    StorageCapacityUtilization,
    CpuUtilization,
    FileServerDiskThroughputUtilization,
    NetworkThroughputUtilization,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::StorageCapacityUtilization => "StorageCapacityUtilization",
            MetricName::CpuUtilization => "CPUUtilization",
            MetricName::FileServerDiskThroughputUtilization => {
                "FileServerDiskThroughputUtilization"
            }
            MetricName::NetworkThroughputUtilization => "NetworkThroughputUtilization",
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistic aggregated over each period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    #[default]
    Average,
}

/// Name/value pair scoping an alarm to a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Full definition of a metric alarm, sent as a create-or-replace request
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmSpec {
    pub name: String,
    pub description: String,
    pub metric: MetricName,
    pub namespace: String,
    pub comparison: ComparisonOperator,
    pub statistic: Statistic,
    pub period_secs: u32,
    pub evaluation_periods: u32,
    pub threshold: f64,
    pub actions_enabled: bool,
    pub alarm_actions: Vec<String>,
    pub ok_actions: Vec<String>,
    pub dimensions: Vec<Dimension>,
}

impl AlarmSpec {
    /// Value of the named dimension, if present
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}
