//! Route table and the guard that decides what a path renders.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Dashboard,
    DataJobs,
    CreateJob,
    EnrichmentPipelines,
    Integrations,
    Reports,
    Settings,
}

impl Route {
    /// Sidebar entries, in order.
    pub const SIDEBAR: [Route; 7] = [
        Route::Dashboard,
        Route::DataJobs,
        Route::CreateJob,
        Route::EnrichmentPipelines,
        Route::Integrations,
        Route::Reports,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::DataJobs => "/data-jobs",
            Route::CreateJob => "/create-job",
            Route::EnrichmentPipelines => "/enrichment-pipelines",
            Route::Integrations => "/integrations",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Login => "Sign in",
            Route::Dashboard => "Dashboard",
            Route::DataJobs => "Data Jobs",
            Route::CreateJob => "Create Job",
            Route::EnrichmentPipelines => "Enrichment Pipelines",
            Route::Integrations => "Integrations",
            Route::Reports => "Reports",
            Route::Settings => "Settings",
        }
    }

    /// Exact path match; a single trailing slash is tolerated.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };
        [Route::Landing, Route::Login]
            .into_iter()
            .chain(Self::SIDEBAR)
            .find(|r| r.path() == path)
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of asking the guard for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
    /// Authenticated, but no page lives at this path.
    NotFound(String),
}

impl Navigation {
    /// The route that ends up on screen, if any.
    pub fn target(&self) -> Option<Route> {
        match self {
            Navigation::Render(r) | Navigation::Redirect(r) => Some(*r),
            Navigation::NotFound(_) => None,
        }
    }
}

/// Unknown paths sit under the protected catch-all, so anonymous visitors
/// are sent to the login page before anything else is decided.
pub fn resolve(path: &str, authenticated: bool) -> Navigation {
    match Route::parse(path) {
        Some(Route::Login) if authenticated => Navigation::Redirect(Route::Dashboard),
        Some(route) if route.is_protected() && !authenticated => Navigation::Redirect(Route::Login),
        Some(route) => Navigation::Render(route),
        None if !authenticated => Navigation::Redirect(Route::Login),
        None => Navigation::NotFound(path.trim().to_string()),
    }
}
