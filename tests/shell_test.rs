use anyhow::anyhow;
use async_trait::async_trait;
use dataflow_shell::config::{Config, StorageBackend};
use dataflow_shell::db::{LocalStorage, MemoryStorage, StorageError};
use dataflow_shell::filter::Category;
use dataflow_shell::handlers::handle_line;
use dataflow_shell::notice::{Variant, MAX_OPEN, NOT_IMPLEMENTED};
use dataflow_shell::routes::{Navigation, Route};
use dataflow_shell::shell::{self, Shell};
use std::sync::Arc;

fn test_config() -> Config {
    let mut cfg = Config::default();
    cfg.app.storage = StorageBackend::Memory;
    cfg.auth.latency_ms = 5;
    cfg
}

async fn started_shell(storage: Arc<dyn LocalStorage>) -> Shell {
    let mut shell = Shell::with_storage(&test_config(), storage);
    shell.start().await.unwrap();
    shell
}

/// Storage whose removals always fail; reads and writes go to memory.
#[derive(Default)]
struct FailingRemove {
    inner: MemoryStorage,
}

#[async_trait]
impl LocalStorage for FailingRemove {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).await
    }

    async fn set_items(&self, items: &[(&str, &str)]) -> Result<(), StorageError> {
        self.inner.set_items(items).await
    }

    async fn remove_items(&self, _keys: &[&str]) -> Result<(), StorageError> {
        Err(anyhow!("disk is read-only").into())
    }
}

async fn signed_in_shell() -> Shell {
    let mut shell = started_shell(Arc::new(MemoryStorage::new())).await;
    handle_line(&mut shell, "/login a@b.com x").await.unwrap();
    shell
}

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login() {
    let mut shell = started_shell(Arc::new(MemoryStorage::new())).await;
    assert_eq!(shell.location(), &Navigation::Render(Route::Landing));
    assert!(shell.data().is_none());

    for path in ["/dashboard", "/data-jobs", "/create-job", "/settings", "/nowhere"] {
        let reply = handle_line(&mut shell, &format!("/go {path}")).await.unwrap();
        assert_eq!(shell.location(), &Navigation::Redirect(Route::Login));
        assert!(reply.lines[0].contains("redirected to /login"));
    }
    // the protected section never mounted
    assert!(shell.data().is_none());
}

#[tokio::test]
async fn login_lands_on_dashboard() {
    let mut shell = started_shell(Arc::new(MemoryStorage::new())).await;
    let reply = handle_line(&mut shell, "/login a@b.com x").await.unwrap();

    assert!(shell.gate().is_authenticated());
    assert_eq!(shell.location(), &Navigation::Redirect(Route::Dashboard));
    assert_eq!(reply.notices.len(), 1);
    assert_eq!(reply.notices[0].title, "Welcome back!");
    assert!(reply.lines.iter().any(|l| l == "Completed: 2  Running: 1  Failed: 1"));

    // the login page keeps bouncing while signed in
    handle_line(&mut shell, "/go /login").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Redirect(Route::Dashboard));
}

#[tokio::test]
async fn login_without_arguments_uses_demo_credentials() {
    let mut shell = started_shell(Arc::new(MemoryStorage::new())).await;
    handle_line(&mut shell, "/login").await.unwrap();
    assert_eq!(shell.gate().user().unwrap().email, "demo@dataflow.com");
}

#[tokio::test]
async fn session_survives_restart() {
    let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
    let mut first = started_shell(storage.clone()).await;
    handle_line(&mut first, "/login a@b.com x").await.unwrap();
    drop(first);

    let mut second = started_shell(storage).await;
    assert!(second.gate().is_authenticated());
    handle_line(&mut second, "/dashboard").await.unwrap();
    assert_eq!(second.location(), &Navigation::Render(Route::Dashboard));
    let reply = handle_line(&mut second, "/whoami").await.unwrap();
    assert_eq!(reply.lines, vec!["DataFlow Pro  (JD) John Doe - Admin"]);
}

#[tokio::test]
async fn logout_from_protected_page_redirects() {
    let mut shell = signed_in_shell().await;
    handle_line(&mut shell, "/settings").await.unwrap();
    handle_line(&mut shell, "/logout").await.unwrap();
    assert!(!shell.gate().is_authenticated());
    assert_eq!(shell.location(), &Navigation::Redirect(Route::Login));
    let reply = handle_line(&mut shell, "/whoami").await.unwrap();
    assert_eq!(reply.lines, vec!["Not signed in."]);
}

#[tokio::test]
async fn failed_logout_still_leaves_protected_page() {
    let mut shell = started_shell(Arc::new(FailingRemove::default())).await;
    handle_line(&mut shell, "/login a@b.com x").await.unwrap();
    handle_line(&mut shell, "/jobs").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Render(Route::DataJobs));

    assert!(handle_line(&mut shell, "/logout").await.is_err());
    assert!(!shell.gate().is_authenticated());
    assert_eq!(shell.location(), &Navigation::Redirect(Route::Login));

    let reply = handle_line(&mut shell, "/jobs linkedin").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Redirect(Route::Login));
    assert!(!reply.lines.iter().any(|l| l.contains("LinkedIn")));
}

#[tokio::test]
async fn job_search() {
    let mut shell = signed_in_shell().await;
    let reply = handle_line(&mut shell, "/jobs LINKEDIN").await.unwrap();
    let hits: Vec<_> = reply.lines.iter().filter(|l| l.starts_with("  #")).collect();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].contains("LinkedIn Profile Scraping"));

    let reply = handle_line(&mut shell, "/jobs no-such-job").await.unwrap();
    assert!(reply.lines.iter().any(|l| l.starts_with("No jobs found")));
    assert!(reply.notices.is_empty());
}

#[tokio::test]
async fn integration_category_filter() {
    let mut shell = signed_in_shell().await;
    let reply = handle_line(&mut shell, "/integrations CRM").await.unwrap();
    let rows: Vec<_> = reply.lines.iter().filter(|l| l.contains("(CRM)")).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|l| l.contains("Salesforce") && l.contains("Connected")));
    assert!(rows.iter().any(|l| l.contains("HubSpot") && l.contains("Available")));
    assert!(reply.lines.iter().any(|l| l == "Connected: 3  Available: 3  Total: 6"));
}

#[tokio::test]
async fn category_word_needs_all_to_be_searched() {
    let mut shell = signed_in_shell().await;
    handle_line(&mut shell, "/integrations storage").await.unwrap();
    assert_eq!(shell.page().category, Category::Storage);
    assert!(shell.page().search.is_empty());

    let reply = handle_line(&mut shell, "/integrations all slack").await.unwrap();
    assert_eq!(shell.page().category, Category::All);
    assert_eq!(shell.page().search, "slack");
    assert!(reply.lines.iter().any(|l| l.contains("Slack (Communication)")));
}

#[tokio::test]
async fn quick_actions_navigate() {
    let mut shell = signed_in_shell().await;
    let reply = handle_line(&mut shell, "/setup-integration").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Render(Route::Integrations));
    assert!(reply.notices.is_empty());

    handle_line(&mut shell, "/view-reports").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Render(Route::Reports));
}

#[tokio::test]
async fn wizard_flow_creates_nothing() {
    let mut shell = signed_in_shell().await;
    let jobs_before = shell.data().unwrap().jobs().len();

    handle_line(&mut shell, "/create-job").await.unwrap();
    assert!(shell.wizard().is_some());
    handle_line(&mut shell, "/name Weekly leads").await.unwrap();
    handle_line(&mut shell, "/source api").await.unwrap();
    handle_line(&mut shell, "/next").await.unwrap();
    handle_line(&mut shell, "/next").await.unwrap();
    handle_line(&mut shell, "/toggle company").await.unwrap();
    handle_line(&mut shell, "/next").await.unwrap();

    let early = handle_line(&mut shell, "/finish").await.unwrap();
    assert!(early.lines[0].contains("review step"));
    assert_eq!(shell.current(), Some(Route::CreateJob));

    let review = handle_line(&mut shell, "/next").await.unwrap();
    assert!(review.lines.iter().any(|l| l == "  Job Name: Weekly leads"));
    assert!(review.lines.iter().any(|l| l == "  Data Source: API"));
    assert!(review
        .lines
        .iter()
        .any(|l| l == "  Enrichment Options: Email Lookup, Company Info"));

    let done = handle_line(&mut shell, "/finish").await.unwrap();
    assert_eq!(shell.location(), &Navigation::Render(Route::DataJobs));
    assert!(shell.wizard().is_none());
    assert_eq!(done.notices[0].title, "Job Created Successfully!");
    assert_eq!(shell.data().unwrap().jobs().len(), jobs_before);

    // reopening starts from a blank draft
    handle_line(&mut shell, "/create-job").await.unwrap();
    assert!(shell.wizard().unwrap().draft().name.is_empty());
}

#[tokio::test]
async fn leaving_the_wizard_discards_the_draft() {
    let mut shell = signed_in_shell().await;
    handle_line(&mut shell, "/create-job").await.unwrap();
    handle_line(&mut shell, "/name Abandoned").await.unwrap();
    handle_line(&mut shell, "/dashboard").await.unwrap();
    assert!(shell.wizard().is_none());

    let reply = handle_line(&mut shell, "/next").await.unwrap();
    assert!(reply.lines[0].contains("/create-job"));
}

#[tokio::test]
async fn unimplemented_actions_only_notify() {
    let mut shell = signed_in_shell().await;
    handle_line(&mut shell, "/jobs").await.unwrap();
    let before = shell.location().clone();

    let reply = handle_line(&mut shell, "/run CRM Data Enhancement").await.unwrap();
    assert_eq!(reply.notices.len(), 1);
    let notice = &reply.notices[0];
    assert_eq!(notice.title, "Run - CRM Data Enhancement");
    assert_eq!(notice.description.as_deref(), Some(NOT_IMPLEMENTED));
    assert_eq!(notice.variant, Variant::Default);
    assert_eq!(shell.location(), &before);

    let id = notice.id.to_string();
    let open = shell.notices().len();
    handle_line(&mut shell, &format!("/dismiss {id}")).await.unwrap();
    assert_eq!(shell.notices().len(), open - 1);
}

#[tokio::test]
async fn repeated_actions_keep_notices_bounded() {
    let mut shell = signed_in_shell().await;
    for _ in 0..50 {
        handle_line(&mut shell, "/forgot-password").await.unwrap();
    }
    assert_eq!(shell.notices().len(), MAX_OPEN);
    assert!(shell.notices().open().all(|n| n.title == "Forgot Password"));
}

#[tokio::test]
async fn sqlite_backed_shell_opens() {
    let td = tempfile::tempdir().unwrap();
    let mut cfg = test_config();
    cfg.app.storage = StorageBackend::Sqlite;
    cfg.app.data_dir = td.path().join("data").to_string_lossy().to_string();
    cfg.ensure_dirs().unwrap();

    let storage = shell::open_storage(&cfg).await.unwrap();
    let mut first = Shell::with_storage(&cfg, storage);
    first.start().await.unwrap();
    handle_line(&mut first, "/login file@x.io x").await.unwrap();
    drop(first);

    let storage = shell::open_storage(&cfg).await.unwrap();
    let mut second = Shell::with_storage(&cfg, storage);
    second.start().await.unwrap();
    assert_eq!(second.gate().user().unwrap().email, "file@x.io");
}
