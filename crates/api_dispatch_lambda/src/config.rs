use api_dispatch_core::Failure;

pub const NOTIFICATIONS_FUNCTION_VAR: &str = "LAMBDA_NOTIFICATIONS";
pub const REPORT_LOG_GROUP_VAR: &str = "REPORT_LOG_GROUP_NAME";
pub const PAGESPEED_TABLE_VAR: &str = "PAGESPEED_TABLE";
pub const TOPIC_VAR: &str = "SNS_TOPIC";
pub const LOG_LEVEL_VAR: &str = "LAMBDA_FUNCTIONS_LOG_LEVEL";

/// Collaborator names injected at process start.
///
/// Every field is optional at load time; a handler asks for the one it needs
/// through [`require`] and fails as a fault if the deployment left it out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub notifications_function: Option<String>,
    pub report_log_group: Option<String>,
    pub pagespeed_table: Option<String>,
    pub topic: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            notifications_function: read(NOTIFICATIONS_FUNCTION_VAR),
            report_log_group: read(REPORT_LOG_GROUP_VAR),
            pagespeed_table: read(PAGESPEED_TABLE_VAR),
            topic: read(TOPIC_VAR),
        }
    }
}

pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, Failure> {
    value
        .as_deref()
        .ok_or_else(|| Failure::fault(format!("{name} must be configured")))
}
