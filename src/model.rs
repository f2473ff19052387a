use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profile stored next to the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
}

impl UserProfile {
    /// First letter of every word in the name, e.g. "JD" for "John Doe".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Completed,
    Running,
    Failed,
    Scheduled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Completed => "completed",
            JobStatus::Running => "running",
            JobStatus::Failed => "failed",
            JobStatus::Scheduled => "scheduled",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Available,
}

impl IntegrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationStatus::Connected => "connected",
            IntegrationStatus::Available => "available",
        }
    }

    /// Badge label.
    pub fn label(&self) -> &'static str {
        match self {
            IntegrationStatus::Connected => "Connected",
            IntegrationStatus::Available => "Available",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Active,
    Draft,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Active => "active",
            PipelineStatus::Draft => "draft",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub name: String,
    pub status: JobStatus,
    pub records: u64,
    pub source: String,
    pub created: NaiveDate,
    pub last_run: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Integration {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: IntegrationStatus,
    pub description: String,
    pub last_sync: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    pub status: PipelineStatus,
    pub last_run: String,
    pub steps: Vec<String>,
}

/// Where a drafted job would read its data from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Website,
    Api,
    Upload,
}

impl DataSource {
    pub const ALL: [DataSource; 3] = [DataSource::Website, DataSource::Api, DataSource::Upload];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Website => "website",
            DataSource::Api => "api",
            DataSource::Upload => "upload",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "website" => Some(DataSource::Website),
            "api" => Some(DataSource::Api),
            "upload" => Some(DataSource::Upload),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Website => "Website",
            DataSource::Api => "API",
            DataSource::Upload => "Upload",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataSource::Website => "Scrape from websites",
            DataSource::Api => "Connect to APIs",
            DataSource::Upload => "Upload CSV/Excel files",
        }
    }
}

/// Enrichment toggles offered on the wizard's third step.
///
/// Declaration order is display order; `Ord` follows it so ordered maps keyed
/// by this type iterate the way the form lists them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentOption {
    Email,
    Company,
    Social,
    Phone,
}

impl EnrichmentOption {
    pub const ALL: [EnrichmentOption; 4] = [
        EnrichmentOption::Email,
        EnrichmentOption::Company,
        EnrichmentOption::Social,
        EnrichmentOption::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentOption::Email => "email",
            EnrichmentOption::Company => "company",
            EnrichmentOption::Social => "social",
            EnrichmentOption::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Some(EnrichmentOption::Email),
            "company" => Some(EnrichmentOption::Company),
            "social" => Some(EnrichmentOption::Social),
            "phone" => Some(EnrichmentOption::Phone),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnrichmentOption::Email => "Email Lookup",
            EnrichmentOption::Company => "Company Info",
            EnrichmentOption::Social => "Social Profiles",
            EnrichmentOption::Phone => "Phone Numbers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EnrichmentOption::Email => "Find email addresses",
            EnrichmentOption::Company => "Get company details",
            EnrichmentOption::Social => "Find social media profiles",
            EnrichmentOption::Phone => "Lookup phone numbers",
        }
    }

    /// Only email lookup starts switched on.
    pub fn enabled_by_default(&self) -> bool {
        matches!(self, EnrichmentOption::Email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_from_name() {
        let user = UserProfile {
            id: "1".into(),
            name: "John Doe".into(),
            email: "a@b.com".into(),
            company: "DataFlow Corp".into(),
            role: "Admin".into(),
        };
        assert_eq!(user.initials(), "JD");
    }

    #[test]
    fn integration_type_uses_wire_name() {
        let raw = r#"{"id":"1","name":"Salesforce","type":"CRM","status":"connected","description":"d","last_sync":"now"}"#;
        let integration: Integration = serde_json::from_str(raw).unwrap();
        assert_eq!(integration.kind, "CRM");
        assert_eq!(integration.status, IntegrationStatus::Connected);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(DataSource::parse("API"), Some(DataSource::Api));
        assert_eq!(EnrichmentOption::parse(" Phone "), Some(EnrichmentOption::Phone));
        assert_eq!(DataSource::parse("ftp"), None);
    }
}
