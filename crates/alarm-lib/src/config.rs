//! Provisioning configuration

use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ConfigError;

/// Primary notification topic
pub const PRIMARY_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:010526239784:billing_alert";

/// Secondary notification topic
pub const SECONDARY_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:010526239784:second";

/// CloudWatch namespace of FSx metrics
pub const FSX_NAMESPACE: &str = "AWS/FSx";

const ENV_PREFIX: &str = "FSX_ALARMS";

/// Settings handed to the alarm provisioner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProvisionerConfig {
    /// Topics notified on both ALARM and OK transitions, in order
    #[serde(default = "default_notification_topics")]
    pub notification_topics: Vec<String>,

    #[serde(default = "default_metric_namespace")]
    pub metric_namespace: String,
}

fn default_notification_topics() -> Vec<String> {
    vec![PRIMARY_TOPIC_ARN.to_string(), SECONDARY_TOPIC_ARN.to_string()]
}

fn default_metric_namespace() -> String {
    FSX_NAMESPACE.to_string()
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            notification_topics: default_notification_topics(),
            metric_namespace: default_metric_namespace(),
        }
    }
}

impl ProvisionerConfig {
    /// Config with the given topics and the FSx namespace
    pub fn with_topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            notification_topics: topics.into_iter().map(Into::into).collect(),
            metric_namespace: default_metric_namespace(),
        }
    }

    /// Load configuration from `FSX_ALARMS_*` environment variables over the built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Same as [`ProvisionerConfig::load`], reading variables from `vars` instead of the process
    /// environment when given
    pub fn load_from(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("notification_topics")
                    .source(vars),
            )
            .build()?;

        let config: ProvisionerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notification_topics.is_empty() {
            return Err(ConfigError::Validation(
                "notification_topics must not be empty".to_string(),
            ));
        }
        if let Some(blank) = self
            .notification_topics
            .iter()
            .position(|topic| topic.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "notification_topics[{}] must not be blank",
                blank
            )));
        }
        if self.metric_namespace.trim().is_empty() {
            return Err(ConfigError::Validation(
                "metric_namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
