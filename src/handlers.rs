use crate::filter::Category;
use crate::model::{DataSource, EnrichmentOption};
use crate::notice::Notice;
use crate::pages::{self, DEMO_EMAIL, DEMO_PASSWORD};
use crate::routes::{Navigation, Route};
use crate::shell::Shell;
use crate::wizard::JobWizard;
use anyhow::Result;
use tracing::{info, instrument, warn};

pub const HELP: &str = "\
/go <path>                       navigate (/, /login, /dashboard, /data-jobs, /create-job,
                                 /enrichment-pipelines, /integrations, /reports, /settings)
/login [email] [password]        sign in (any credentials are accepted)
/logout                          sign out
/whoami                          show the signed-in user
/jobs [term]                     search jobs by name
/integrations [category] [term]  filter integrations by tab and name; tabs are
                                 All, CRM, Storage, Communication, Custom, Automation.
                                 A leading tab name is always the tab: \"/integrations all storage\"
                                 searches for \"storage\" on the All tab
/name <text> /source <id>        job wizard, step 1
/toggle <option>                 job wizard, step 3 (email, company, social, phone)
/next /prev /step /finish        job wizard navigation
/setup-integration /view-reports dashboard quick actions
/notices /dismiss <id>           list or dismiss notices
/help                            this text";

/// Output of one handled line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub notices: Vec<Notice>,
}

impl Reply {
    fn text(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            notices: Vec::new(),
        }
    }

    fn page(shell: &Shell) -> Self {
        Self {
            lines: pages::render(shell),
            notices: Vec::new(),
        }
    }

    fn notice(shell: &mut Shell, notice: Notice) -> Self {
        let mut reply = Self::default();
        reply.push_notice(shell, notice);
        reply
    }

    fn push_notice(&mut self, shell: &mut Shell, notice: Notice) {
        shell.notices_mut().push(notice.clone());
        self.notices.push(notice);
    }

    /// Everything to print, notices last.
    pub fn render(&self) -> Vec<String> {
        self.lines
            .iter()
            .cloned()
            .chain(self.notices.iter().map(ToString::to_string))
            .collect()
    }
}

/// Handle one line of input. Blank lines produce an empty reply.
#[instrument(skip_all)]
pub async fn handle_line(shell: &mut Shell, line: &str) -> Result<Reply> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Reply::default());
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(Reply::text("Commands start with '/'. Try /help."));
    };
    let (verb, rest) = match command.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (command, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "help" => Ok(Reply::text(HELP)),
        "go" => Ok(go(shell, if rest.is_empty() { "/" } else { rest })),
        "login" => login(shell, rest).await,
        "logout" => logout(shell).await,
        "whoami" => Ok(match shell.gate().user() {
            Some(user) => Reply::text(pages::header(Some(user))),
            None => Reply::text("Not signed in."),
        }),
        "dashboard" => Ok(go(shell, Route::Dashboard.path())),
        "pipelines" => Ok(go(shell, Route::EnrichmentPipelines.path())),
        "reports" => Ok(go(shell, Route::Reports.path())),
        "settings" => Ok(go(shell, Route::Settings.path())),
        "create-job" => Ok(go(shell, Route::CreateJob.path())),
        "setup-integration" => Ok(go(shell, Route::Integrations.path())),
        "view-reports" => Ok(go(shell, Route::Reports.path())),
        "jobs" => Ok(search_jobs(shell, rest)),
        "integrations" => Ok(search_integrations(shell, rest)),
        v @ ("name" | "source" | "toggle" | "next" | "prev" | "step" | "finish") => {
            Ok(wizard_command(shell, v, rest))
        }
        "notices" => Ok(list_notices(shell)),
        "dismiss" => Ok(dismiss(shell, rest)),
        other => Ok(Reply::notice(
            shell,
            Notice::not_implemented(&action_label(other), rest),
        )),
    }
}

/// "run" -> "Run", "view-running" -> "View Running".
fn action_label(verb: &str) -> String {
    verb.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn go(shell: &mut Shell, path: &str) -> Reply {
    shell.navigate(path);
    Reply::page(shell)
}

async fn login(shell: &mut Shell, args: &str) -> Result<Reply> {
    let signed_in = matches!(shell.navigate(Route::Login.path()), Navigation::Redirect(_));
    if signed_in {
        return Ok(Reply::page(shell));
    }

    let mut parts = args.split_whitespace();
    let email = parts.next().unwrap_or(DEMO_EMAIL).to_string();
    let password = parts.next().unwrap_or(DEMO_PASSWORD).to_string();

    let mut reply = Reply::default();
    let result = shell
        .gate_mut()
        .login(&email, &password)
        .await
        .map(|user| user.email.clone());
    match result {
        Ok(email) => {
            info!(%email, "login succeeded");
            reply.push_notice(
                shell,
                Notice::new(
                    "Welcome back!",
                    Some("Successfully logged in to DataFlow Pro.".to_string()),
                ),
            );
        }
        Err(err) => {
            warn!(%err, "login failed");
            reply.push_notice(shell, Notice::destructive("Login failed", err.to_string()));
        }
    }
    shell.refresh();
    reply.lines = pages::render(shell);
    Ok(reply)
}

async fn logout(shell: &mut Shell) -> Result<Reply> {
    // the gate is already anonymous here even if storage failed
    let result = shell.gate_mut().logout().await;
    shell.refresh();
    result?;
    Ok(Reply::page(shell))
}

fn search_jobs(shell: &mut Shell, term: &str) -> Reply {
    if shell.current() != Some(Route::DataJobs) {
        shell.navigate(Route::DataJobs.path());
    }
    if shell.current() == Some(Route::DataJobs) {
        shell.page_mut().search = term.to_string();
    }
    Reply::page(shell)
}

/// A leading category word picks the tab and the rest is the search term,
/// so searching for a category's own name needs an explicit `all` first.
fn search_integrations(shell: &mut Shell, args: &str) -> Reply {
    if shell.current() != Some(Route::Integrations) {
        shell.navigate(Route::Integrations.path());
    }
    if shell.current() == Some(Route::Integrations) {
        let (first, rest) = match args.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, rest.trim()),
            None => (args, ""),
        };
        let page = shell.page_mut();
        match Category::parse(first) {
            Some(category) => {
                page.category = category;
                page.search = rest.to_string();
            }
            None => page.search = args.to_string(),
        }
    }
    Reply::page(shell)
}

fn wizard_command(shell: &mut Shell, verb: &str, args: &str) -> Reply {
    if verb == "finish" {
        return finish(shell);
    }
    let Some(wizard) = shell.wizard_mut() else {
        return Reply::text("No job is being created. Use /create-job first.");
    };
    let outcome: Result<(), String> = match verb {
        "name" => wizard.set_name(args).map_err(|e| e.to_string()),
        "source" => match DataSource::parse(args) {
            Some(source) => wizard.select_data_source(source).map_err(|e| e.to_string()),
            None => Err(format!("unknown data source {args:?}; use website, api or upload")),
        },
        "toggle" => match EnrichmentOption::parse(args) {
            Some(option) => wizard
                .toggle_enrichment(option)
                .map(|_| ())
                .map_err(|e| e.to_string()),
            None => Err(format!(
                "unknown enrichment option {args:?}; use email, company, social or phone"
            )),
        },
        "next" => {
            wizard.next();
            Ok(())
        }
        "prev" => {
            wizard.previous();
            Ok(())
        }
        _ => Ok(()),
    };
    match outcome {
        Ok(()) => Reply::page(shell),
        Err(msg) => Reply::text(msg),
    }
}

fn finish(shell: &mut Shell) -> Reply {
    let completion = match shell.wizard().map(JobWizard::finish) {
        Some(Ok(completion)) => completion,
        Some(Err(err)) => return Reply::text(err.to_string()),
        None => return Reply::text("No job is being created. Use /create-job first."),
    };
    // the draft goes with the wizard
    shell.take_wizard();
    shell.navigate(completion.redirect.path());
    let mut reply = Reply::page(shell);
    reply.push_notice(shell, completion.notice);
    reply
}

fn list_notices(shell: &Shell) -> Reply {
    if shell.notices().is_empty() {
        return Reply::text("No notices.");
    }
    Reply {
        lines: shell.notices().open().map(ToString::to_string).collect(),
        notices: Vec::new(),
    }
}

fn dismiss(shell: &mut Shell, id: &str) -> Reply {
    if shell.notices_mut().dismiss(id) {
        Reply::text("Dismissed.")
    } else {
        Reply::text(format!("No notice with id {id:?}."))
    }
}
