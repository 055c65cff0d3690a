use serde::{Deserialize, Serialize};

/// Presentation settings for the report.
///
/// ```toml
/// allow_empty_service_output = false
/// branding = "check_cert v1.4.0"
///
/// [sections]
/// errors_label = "PROBLEMS"
/// hide_thresholds = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Permit an empty summary line without flagging it as misuse.
    #[serde(default)]
    pub allow_empty_service_output: bool,

    /// Fixed trailer appended after all sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding: Option<String>,

    #[serde(default)]
    pub sections: SectionsConfig,
}

/// Section header overrides and visibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_info_label: Option<String>,

    #[serde(default)]
    pub hide_errors: bool,

    #[serde(default)]
    pub hide_thresholds: bool,
}
