//! Transient, dismissable notices shown after user actions.
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

pub const NOT_IMPLEMENTED: &str = "This feature isn't implemented yet.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description,
            variant: Variant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, Some(description.into()))
        }
    }

    /// Uniform notice for an action the shell does not perform,
    /// e.g. "Run Now - LinkedIn Profile Scraping".
    pub fn not_implemented(action: &str, subject: &str) -> Self {
        let title = if subject.is_empty() {
            action.to_string()
        } else {
            format!("{action} - {subject}")
        };
        Self::new(title, Some(NOT_IMPLEMENTED.to_string()))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.variant {
            Variant::Default => "*",
            Variant::Destructive => "!",
        };
        write!(f, "[{marker}] {}", self.title)?;
        if let Some(desc) = &self.description {
            write!(f, ": {desc}")?;
        }
        write!(f, " ({})", self.id.simple())
    }
}

/// Most notices kept open at once.
pub const MAX_OPEN: usize = 5;

/// Open notices, oldest first.
#[derive(Debug, Default)]
pub struct Notices {
    open: VecDeque<Notice>,
}

impl Notices {
    /// Add a notice, evicting the oldest ones beyond [`MAX_OPEN`].
    pub fn push(&mut self, notice: Notice) -> &Notice {
        while self.open.len() >= MAX_OPEN {
            if let Some(evicted) = self.open.pop_front() {
                debug!(id = %evicted.id, "notice evicted");
            }
        }
        self.open.push_back(notice);
        &self.open[self.open.len() - 1]
    }

    /// Accepts the full id or its hyphen-less form. Returns whether a notice
    /// was removed.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let Ok(id) = Uuid::parse_str(id.trim()) else {
            return false;
        };
        let before = self.open.len();
        self.open.retain(|n| n.id != id);
        before != self.open.len()
    }

    pub fn open(&self) -> impl Iterator<Item = &Notice> {
        self.open.iter()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}
