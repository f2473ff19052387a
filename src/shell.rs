//! In-process application state: the session gate, where the user is, the
//! per-page state of the page on screen, and open notices.
use crate::auth::MockAuthenticator;
use crate::config::{Config, StorageBackend};
use crate::db::{self, LocalStorage, MemoryStorage, SqliteStorage};
use crate::filter::Category;
use crate::notice::Notices;
use crate::routes::{self, Navigation, Route};
use crate::session::{SessionError, SessionGate};
use crate::store::DataSnapshot;
use crate::wizard::JobWizard;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::{debug, info};

/// Search box and category tab state; reset whenever a page mounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub search: String,
    pub category: Category,
}

pub struct Shell {
    gate: SessionGate,
    data: OnceCell<Arc<DataSnapshot>>,
    path: String,
    location: Navigation,
    page: PageState,
    wizard: Option<JobWizard>,
    notices: Notices,
}

/// Open local storage as configured. SQLite backends are migrated first.
pub async fn open_storage(cfg: &Config) -> Result<Arc<dyn LocalStorage>> {
    match cfg.app.storage {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageBackend::Sqlite => {
            let pool = db::init_pool(&cfg.database_url()).await?;
            db::run_migrations(&pool).await?;
            Ok(Arc::new(SqliteStorage::new(pool)))
        }
    }
}

impl Shell {
    pub fn new(gate: SessionGate) -> Self {
        Self {
            gate,
            data: OnceCell::new(),
            path: Route::Landing.path().to_string(),
            location: Navigation::Render(Route::Landing),
            page: PageState::default(),
            wizard: None,
            notices: Notices::default(),
        }
    }

    /// Gate wired to the mock authenticator and the given storage.
    pub fn with_storage(cfg: &Config, storage: Arc<dyn LocalStorage>) -> Self {
        let auth = Arc::new(MockAuthenticator::from_config(cfg));
        Self::new(SessionGate::new(storage, auth, cfg.session.clone()))
    }

    /// Restore the session and open the landing page.
    pub async fn start(&mut self) -> Result<&Navigation, SessionError> {
        self.gate.restore().await?;
        info!(authenticated = self.gate.is_authenticated(), "shell started");
        Ok(self.navigate(Route::Landing.path()))
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut SessionGate {
        &mut self.gate
    }

    /// The data store, once the protected section has mounted.
    pub fn data(&self) -> Option<&Arc<DataSnapshot>> {
        self.data.get()
    }

    pub fn location(&self) -> &Navigation {
        &self.location
    }

    /// The route on screen, if any.
    pub fn current(&self) -> Option<Route> {
        self.location.target()
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageState {
        &mut self.page
    }

    pub fn wizard(&self) -> Option<&JobWizard> {
        self.wizard.as_ref()
    }

    pub fn wizard_mut(&mut self) -> Option<&mut JobWizard> {
        self.wizard.as_mut()
    }

    /// Drop the wizard and its draft, returning it for a final read.
    pub fn take_wizard(&mut self) -> Option<JobWizard> {
        self.wizard.take()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Send `path` through the guard and mount whatever it lands on.
    pub fn navigate(&mut self, path: &str) -> &Navigation {
        let before = self.current();
        let nav = routes::resolve(path, self.gate.is_authenticated());
        let after = nav.target();
        debug!(path, ?nav, "navigate");

        if after.map_or(true, |r| r.is_protected()) {
            self.data.get_or_init(DataSnapshot::seeded);
        }
        if before != after {
            self.page = PageState::default();
            self.wizard = match after {
                Some(Route::CreateJob) => Some(JobWizard::new()),
                _ => None,
            };
        }

        self.path = match &nav {
            Navigation::Redirect(r) => r.path().to_string(),
            _ => path.trim().to_string(),
        };
        self.location = nav;
        &self.location
    }

    /// Re-run the guard for the current path, e.g. after login or logout.
    pub fn refresh(&mut self) -> &Navigation {
        let path = self.path.clone();
        self.navigate(&path)
    }
}
