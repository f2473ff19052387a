//! Plain-text rendering of each page.
use crate::filter::{self, Category};
use crate::model::{Integration, Job, UserProfile};
use crate::routes::{Navigation, Route};
use crate::shell::Shell;
use crate::wizard::{Step, StepView};

const FALLBACK_NAME: &str = "John Doe";
const FALLBACK_ROLE: &str = "Admin";
const FALLBACK_INITIALS: &str = "JD";

/// Default credentials pre-filled on the login form.
pub const DEMO_EMAIL: &str = "demo@dataflow.com";
pub const DEMO_PASSWORD: &str = "password";

pub fn render(shell: &Shell) -> Vec<String> {
    let mut out = Vec::new();
    if let Navigation::Redirect(route) = shell.location() {
        out.push(format!("-> redirected to {route}"));
    }
    match shell.location() {
        Navigation::NotFound(path) => {
            out.extend(chrome(shell));
            out.push(format!("No page at {path}."));
        }
        Navigation::Render(route) | Navigation::Redirect(route) => {
            if route.is_protected() {
                out.extend(chrome(shell));
            }
            out.extend(page(shell, *route));
        }
    }
    out
}

fn page(shell: &Shell, route: Route) -> Vec<String> {
    match route {
        Route::Landing => landing(),
        Route::Login => login(),
        Route::CreateJob => create_job(shell),
        Route::Settings => settings(shell.gate().user()),
        Route::Reports => reports(),
        _ => match shell.data() {
            Some(data) => match route {
                Route::Dashboard => dashboard(data.jobs()),
                Route::DataJobs => jobs(data.jobs(), &shell.page().search),
                Route::Integrations => integrations(
                    data.integrations(),
                    &shell.page().search,
                    shell.page().category,
                ),
                Route::EnrichmentPipelines => pipelines(shell),
                _ => Vec::new(),
            },
            None => vec!["Loading...".to_string()],
        },
    }
}

/// Header line plus sidebar for protected pages.
fn chrome(shell: &Shell) -> Vec<String> {
    let current = shell.current();
    let nav: Vec<String> = Route::SIDEBAR
        .iter()
        .map(|r| {
            if Some(*r) == current {
                format!("[{}]", r.label())
            } else {
                r.label().to_string()
            }
        })
        .collect();
    vec![header(shell.gate().user()), nav.join(" | ")]
}

pub fn header(user: Option<&UserProfile>) -> String {
    let (initials, name, role) = match user {
        Some(u) => {
            let initials = u.initials();
            let initials = if initials.is_empty() {
                FALLBACK_INITIALS.to_string()
            } else {
                initials
            };
            (initials, u.name.as_str(), u.role.as_str())
        }
        None => (FALLBACK_INITIALS.to_string(), FALLBACK_NAME, FALLBACK_ROLE),
    };
    format!("DataFlow Pro  ({initials}) {name} - {role}")
}

fn landing() -> Vec<String> {
    vec![
        "DataFlow Pro - Automate. Enrich. Integrate.".to_string(),
        "Professional data automation platform for modern data teams.".to_string(),
        "Use /login to sign in.".to_string(),
    ]
}

fn login() -> Vec<String> {
    vec![
        "Sign in to DataFlow Pro".to_string(),
        format!("/login [email] [password]  (defaults: {DEMO_EMAIL} / {DEMO_PASSWORD})"),
    ]
}

fn job_line(job: &Job) -> String {
    format!(
        "  #{} {} [{}] records={} source={} created={} last run {}",
        job.id,
        job.name,
        job.status.as_str(),
        job.records,
        job.source,
        job.created,
        job.last_run
    )
}

fn dashboard(all: &[Job]) -> Vec<String> {
    let stats = filter::dashboard_stats(all);
    let mut out = vec![
        "Dashboard".to_string(),
        format!(
            "Completed: {}  Running: {}  Failed: {}",
            stats.completed, stats.running, stats.failed
        ),
        "Recent jobs:".to_string(),
    ];
    out.extend(stats.recent.iter().map(job_line));
    out
}

fn jobs(all: &[Job], search: &str) -> Vec<String> {
    let hits = filter::filter_jobs(all, search);
    let mut out = vec![format!("Data Jobs (search: {search:?})")];
    if hits.is_empty() {
        out.push("No jobs found. Use /create-job to create your first job.".to_string());
    } else {
        out.extend(hits.into_iter().map(job_line));
    }
    out
}

fn integration_line(i: &Integration) -> String {
    format!(
        "  {} ({}) {} - {} | last sync: {}",
        i.name,
        i.kind,
        i.status.label(),
        i.description,
        i.last_sync
    )
}

fn integrations(all: &[Integration], search: &str, category: Category) -> Vec<String> {
    let stats = filter::integration_stats(all);
    let tabs: Vec<String> = Category::TABS
        .iter()
        .map(|c| {
            if *c == category {
                format!("[{}]", c.as_str())
            } else {
                c.as_str().to_string()
            }
        })
        .collect();
    let mut out = vec![
        "Integrations".to_string(),
        format!(
            "Connected: {}  Available: {}  Total: {}",
            stats.connected, stats.available, stats.total
        ),
        format!("{}  (search: {search:?})", tabs.join(" ")),
    ];
    let hits = filter::filter_integrations(all, search, category);
    if hits.is_empty() {
        out.push("No integrations found.".to_string());
    }
    out.extend(hits.into_iter().map(integration_line));
    out
}

fn pipelines(shell: &Shell) -> Vec<String> {
    let mut out = vec!["Enrichment Pipelines".to_string()];
    if let Some(data) = shell.data() {
        for p in data.pipelines() {
            out.push(format!(
                "  {} [{}] last run {}: {}",
                p.name,
                p.status.as_str(),
                p.last_run,
                p.steps.join(" -> ")
            ));
        }
    }
    out
}

fn reports() -> Vec<String> {
    vec![
        "Reports".to_string(),
        "Use /export <PDF|Excel|CSV> to export.".to_string(),
    ]
}

fn settings(user: Option<&UserProfile>) -> Vec<String> {
    let field = |value: Option<&str>, fallback: &str| value.unwrap_or(fallback).to_string();
    vec![
        "Settings".to_string(),
        format!("  Full name: {}", field(user.map(|u| u.name.as_str()), FALLBACK_NAME)),
        format!("  Email: {}", field(user.map(|u| u.email.as_str()), "john@example.com")),
        format!("  Company: {}", field(user.map(|u| u.company.as_str()), "DataFlow Corp")),
        format!("  Role: {}", field(user.map(|u| u.role.as_str()), FALLBACK_ROLE)),
    ]
}

fn create_job(shell: &Shell) -> Vec<String> {
    let Some(wizard) = shell.wizard() else {
        return vec!["Create New Job".to_string()];
    };
    let current = wizard.step();
    let progress: Vec<String> = Step::ALL
        .iter()
        .map(|s| {
            let mark = if *s == current {
                ">"
            } else if *s < current {
                "x"
            } else {
                " "
            };
            format!("[{mark}] {} {}", s.number(), s.name())
        })
        .collect();

    let mut out = vec![
        "Create New Job".to_string(),
        progress.join("  "),
        format!("{}: {}", current.name(), current.description()),
    ];
    out.extend(step_view(&wizard.view()));
    if current == Step::Review {
        out.push("/prev | /finish to create the job".to_string());
    } else {
        out.push("/prev | /next".to_string());
    }
    out
}

pub fn step_view(view: &StepView) -> Vec<String> {
    match view {
        StepView::DataSource {
            name,
            selected,
            options,
        } => {
            let mut out = vec![format!("  Job name: {name:?}  (/name <text>)")];
            for source in options.iter() {
                let mark = if Some(*source) == *selected { "(*)" } else { "( )" };
                out.push(format!(
                    "  {mark} {} - {}  (/source {})",
                    source.display_name(),
                    source.description(),
                    source.as_str()
                ));
            }
            out
        }
        StepView::Enrichment(options) => options
            .iter()
            .map(|(option, on)| {
                format!(
                    "  [{}] {} - {}  (/toggle {})",
                    if *on { "on" } else { "off" },
                    option.display_name(),
                    option.description(),
                    option.as_str()
                )
            })
            .collect(),
        StepView::Review(summary) => vec![
            format!("  Job Name: {}", summary.name),
            format!("  Data Source: {}", summary.data_source),
            format!("  Enrichment Options: {}", summary.enrichments.join(", ")),
        ],
        StepView::NotImplemented { title, message } => {
            vec![format!("  {title}"), format!("  {message}")]
        }
    }
}
