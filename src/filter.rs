//! Search and category filters over the static collections, plus the
//! counts shown on the dashboard and integrations pages.
use crate::model::{Integration, IntegrationStatus, Job, JobStatus};

/// Integration category tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    All,
    Crm,
    Storage,
    Communication,
    Custom,
    Automation,
}

impl Category {
    pub const TABS: [Category; 6] = [
        Category::All,
        Category::Crm,
        Category::Storage,
        Category::Communication,
        Category::Custom,
        Category::Automation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Crm => "CRM",
            Category::Storage => "Storage",
            Category::Communication => "Communication",
            Category::Custom => "Custom",
            Category::Automation => "Automation",
        }
    }

    /// Tab labels are matched without regard to case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::TABS
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn matches(&self, kind: &str) -> bool {
        match self {
            Category::All => true,
            other => other.as_str() == kind,
        }
    }
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

/// Jobs whose name contains `term`, case-insensitively, in store order.
pub fn filter_jobs<'a>(jobs: &'a [Job], term: &str) -> Vec<&'a Job> {
    let needle = term.to_lowercase();
    jobs.iter().filter(|j| name_matches(&j.name, &needle)).collect()
}

pub fn filter_integrations<'a>(
    integrations: &'a [Integration],
    term: &str,
    category: Category,
) -> Vec<&'a Integration> {
    let needle = term.to_lowercase();
    integrations
        .iter()
        .filter(|i| name_matches(&i.name, &needle) && category.matches(&i.kind))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats<'a> {
    pub completed: usize,
    pub running: usize,
    pub failed: usize,
    pub recent: &'a [Job],
}

const RECENT_JOBS: usize = 4;

pub fn dashboard_stats(jobs: &[Job]) -> DashboardStats<'_> {
    let count = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
    DashboardStats {
        completed: count(JobStatus::Completed),
        running: count(JobStatus::Running),
        failed: count(JobStatus::Failed),
        recent: &jobs[..jobs.len().min(RECENT_JOBS)],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationStats {
    pub connected: usize,
    pub available: usize,
    pub total: usize,
}

pub fn integration_stats(integrations: &[Integration]) -> IntegrationStats {
    let count = |status: IntegrationStatus| {
        integrations
            .iter()
            .filter(|i| i.status == status)
            .count()
    };
    IntegrationStats {
        connected: count(IntegrationStatus::Connected),
        available: count(IntegrationStatus::Available),
        total: integrations.len(),
    }
}
