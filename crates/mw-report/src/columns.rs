use serde::{Deserialize, Serialize};

/// Column names read by [`build_report`](crate::build_report).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportColumns {
    /// URL column of the classification table.
    pub url: String,
    /// Deduction column of the classification table.
    pub deduction: String,

    pub dns_key: String,
    pub dns_status: String,
    pub dns_blocked: String,

    pub http_key: String,
    pub http_accessible: String,
    pub dns_failure: String,
    pub http_failure: String,
}

impl Default for ReportColumns {
    fn default() -> Self {
        Self {
            url: "url".into(),
            deduction: "deduction".into(),
            dns_key: "Dominio".into(),
            dns_status: "Status".into(),
            dns_blocked: "Bloqueado".into(),
            http_key: "input".into(),
            http_accessible: "accessible".into(),
            dns_failure: "dns_experiment_failure".into(),
            http_failure: "http_experiment_failure".into(),
        }
    }
}

impl ReportColumns {
    /// Every configured column name with its field name, for validation.
    #[must_use]
    pub fn named(&self) -> [(&'static str, &str); 9] {
        [
            ("url", &self.url),
            ("deduction", &self.deduction),
            ("dns_key", &self.dns_key),
            ("dns_status", &self.dns_status),
            ("dns_blocked", &self.dns_blocked),
            ("http_key", &self.http_key),
            ("http_accessible", &self.http_accessible),
            ("dns_failure", &self.dns_failure),
            ("http_failure", &self.http_failure),
        ]
    }
}
