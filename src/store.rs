//! Static data store: the fixed jobs, integrations and pipelines every page
//! reads from. Assembled once, never mutated.
use crate::model::{
    Integration, IntegrationStatus, Job, JobStatus, Pipeline, PipelineStatus,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::sync::Arc;

static SEEDED: Lazy<Arc<DataSnapshot>> = Lazy::new(|| Arc::new(DataSnapshot::build()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSnapshot {
    jobs: Vec<Job>,
    integrations: Vec<Integration>,
    pipelines: Vec<Pipeline>,
}

impl DataSnapshot {
    pub fn new(jobs: Vec<Job>, integrations: Vec<Integration>, pipelines: Vec<Pipeline>) -> Self {
        Self {
            jobs,
            integrations,
            pipelines,
        }
    }

    /// The process-wide sample data, shared by reference.
    pub fn seeded() -> Arc<DataSnapshot> {
        Arc::clone(&SEEDED)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn integrations(&self) -> &[Integration] {
        &self.integrations
    }

    pub fn pipelines(&self) -> &[Pipeline] {
        &self.pipelines
    }

    fn build() -> Self {
        Self::new(seed_jobs(), seed_integrations(), seed_pipelines())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn job(
    id: &str,
    name: &str,
    status: JobStatus,
    records: u64,
    source: &str,
    created: NaiveDate,
    last_run: &str,
) -> Job {
    Job {
        id: id.into(),
        name: name.into(),
        status,
        records,
        source: source.into(),
        created,
        last_run: last_run.into(),
    }
}

fn seed_jobs() -> Vec<Job> {
    vec![
        job(
            "1",
            "LinkedIn Profile Scraping",
            JobStatus::Completed,
            1250,
            "Website",
            date(2024, 1, 15),
            "2h ago",
        ),
        job(
            "2",
            "Company Email Enrichment",
            JobStatus::Running,
            847,
            "API",
            date(2024, 1, 14),
            "30m ago",
        ),
        job(
            "3",
            "Website Contact Extraction",
            JobStatus::Failed,
            0,
            "Website",
            date(2024, 1, 14),
            "1h ago",
        ),
        job(
            "4",
            "CRM Data Enhancement",
            JobStatus::Completed,
            2103,
            "Upload",
            date(2024, 1, 13),
            "3h ago",
        ),
        job(
            "5",
            "Social Media Profile Enrichment",
            JobStatus::Scheduled,
            0,
            "API",
            date(2024, 1, 13),
            "Never",
        ),
    ]
}

fn integration(
    id: &str,
    name: &str,
    kind: &str,
    status: IntegrationStatus,
    description: &str,
    last_sync: &str,
) -> Integration {
    Integration {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        status,
        description: description.into(),
        last_sync: last_sync.into(),
    }
}

fn seed_integrations() -> Vec<Integration> {
    use IntegrationStatus::{Available, Connected};
    vec![
        integration(
            "1",
            "Salesforce",
            "CRM",
            Connected,
            "Sync data with Salesforce CRM",
            "2 hours ago",
        ),
        integration(
            "2",
            "Google Sheets",
            "Storage",
            Connected,
            "Export data to Google Sheets",
            "1 hour ago",
        ),
        integration(
            "3",
            "Webhooks",
            "Custom",
            Connected,
            "Send data to custom endpoints",
            "30 minutes ago",
        ),
        integration(
            "4",
            "HubSpot",
            "CRM",
            Available,
            "Connect to HubSpot for lead management",
            "Never",
        ),
        integration(
            "5",
            "Slack",
            "Communication",
            Available,
            "Get notifications in Slack",
            "Never",
        ),
        integration(
            "6",
            "Zapier",
            "Automation",
            Available,
            "Connect to 5000+ apps via Zapier",
            "Never",
        ),
    ]
}

fn seed_pipelines() -> Vec<Pipeline> {
    let steps = |s: &[&str]| s.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    vec![
        Pipeline {
            id: "1".into(),
            name: "Lead Enrichment Pipeline".into(),
            status: PipelineStatus::Active,
            last_run: "2 hours ago".into(),
            steps: steps(&["Extract", "Email Lookup", "Company Info", "Export"]),
        },
        Pipeline {
            id: "2".into(),
            name: "Contact Enhancement".into(),
            status: PipelineStatus::Draft,
            last_run: "Never".into(),
            steps: steps(&["Upload", "Phone Lookup", "Social Profiles", "CRM Push"]),
        },
    ]
}
