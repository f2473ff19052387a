//! Five-step job creation wizard.
//!
//! The wizard only collects a draft and renders a review; finishing it emits
//! a notice and a redirect. No job is ever added to the data store.
use crate::model::{DataSource, EnrichmentOption};
use crate::notice::Notice;
use crate::routes::Route;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

pub const UNTITLED_JOB: &str = "Untitled Job";
pub const NOT_SELECTED: &str = "Not selected";
pub const STEP_NOT_IMPLEMENTED: &str = "This step isn't fully implemented yet.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    #[default]
    DataSource = 1,
    ExtractionRules = 2,
    Enrichment = 3,
    OutputSchedule = 4,
    Review = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::DataSource,
        Step::ExtractionRules,
        Step::Enrichment,
        Step::OutputSchedule,
        Step::Review,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::DataSource => "Data Source",
            Step::ExtractionRules => "Extraction Rules",
            Step::Enrichment => "Enrichment",
            Step::OutputSchedule => "Output & Schedule",
            Step::Review => "Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::DataSource => "Choose where to get your data",
            Step::ExtractionRules => "Define what data to extract",
            Step::Enrichment => "Select enrichment options",
            Step::OutputSchedule => "Configure output and scheduling",
            Step::Review => "Review and create your job",
        }
    }

    fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("jobs can only be created from the review step (currently on step {0})")]
    NotAtReview(u8),
    #[error("step {step} does not take {input}")]
    InputNotAccepted { step: u8, input: &'static str },
}

/// Working state of the wizard. Never cleared while the wizard lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub name: String,
    pub data_source: Option<DataSource>,
    pub enrichment: BTreeMap<EnrichmentOption, bool>,
}

impl Default for JobDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_source: None,
            enrichment: EnrichmentOption::ALL
                .into_iter()
                .map(|o| (o, o.enabled_by_default()))
                .collect(),
        }
    }
}

impl JobDraft {
    pub fn is_enabled(&self, option: EnrichmentOption) -> bool {
        self.enrichment.get(&option).copied().unwrap_or(false)
    }
}

/// Review-step rendering of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub name: String,
    pub data_source: &'static str,
    pub enrichments: Vec<&'static str>,
}

impl JobSummary {
    pub fn of(draft: &JobDraft) -> Self {
        let name = if draft.name.is_empty() {
            UNTITLED_JOB.to_string()
        } else {
            draft.name.clone()
        };
        Self {
            name,
            data_source: draft.data_source.map_or(NOT_SELECTED, |s| s.display_name()),
            enrichments: draft
                .enrichment
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(option, _)| option.display_name())
                .collect(),
        }
    }
}

/// What a step shows for the current draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView {
    DataSource {
        name: String,
        selected: Option<DataSource>,
        options: &'static [DataSource],
    },
    Enrichment(Vec<(EnrichmentOption, bool)>),
    Review(JobSummary),
    /// Placeholder step: no input, no behaviour yet.
    NotImplemented { title: &'static str, message: &'static str },
}

/// Per-step behaviour, looked up by step number.
pub trait StepHandler: Sync {
    fn view(&self, draft: &JobDraft) -> StepView;

    /// Whether the step has real form controls.
    fn accepts_input(&self) -> bool {
        true
    }
}

struct DataSourceStep;
struct EnrichmentStep;
struct ReviewStep;
struct PlaceholderStep {
    title: &'static str,
}

impl StepHandler for DataSourceStep {
    fn view(&self, draft: &JobDraft) -> StepView {
        StepView::DataSource {
            name: draft.name.clone(),
            selected: draft.data_source,
            options: &DataSource::ALL,
        }
    }
}

impl StepHandler for EnrichmentStep {
    fn view(&self, draft: &JobDraft) -> StepView {
        StepView::Enrichment(draft.enrichment.iter().map(|(o, on)| (*o, *on)).collect())
    }
}

impl StepHandler for ReviewStep {
    fn view(&self, draft: &JobDraft) -> StepView {
        StepView::Review(JobSummary::of(draft))
    }

    fn accepts_input(&self) -> bool {
        false
    }
}

impl StepHandler for PlaceholderStep {
    fn view(&self, _draft: &JobDraft) -> StepView {
        StepView::NotImplemented {
            title: self.title,
            message: STEP_NOT_IMPLEMENTED,
        }
    }

    fn accepts_input(&self) -> bool {
        false
    }
}

static DATA_SOURCE_STEP: DataSourceStep = DataSourceStep;
static EXTRACTION_RULES_STEP: PlaceholderStep = PlaceholderStep { title: "Extraction Rules" };
static ENRICHMENT_STEP: EnrichmentStep = EnrichmentStep;
static OUTPUT_SCHEDULE_STEP: PlaceholderStep = PlaceholderStep { title: "Output & Schedule" };
static REVIEW_STEP: ReviewStep = ReviewStep;

pub fn handler_for(step: Step) -> &'static dyn StepHandler {
    match step {
        Step::DataSource => &DATA_SOURCE_STEP,
        Step::ExtractionRules => &EXTRACTION_RULES_STEP,
        Step::Enrichment => &ENRICHMENT_STEP,
        Step::OutputSchedule => &OUTPUT_SCHEDULE_STEP,
        Step::Review => &REVIEW_STEP,
    }
}

/// What finishing the wizard produces. The draft is gone once the caller
/// drops the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub notice: Notice,
    pub redirect: Route,
}

#[derive(Debug, Clone, Default)]
pub struct JobWizard {
    step: Step,
    draft: JobDraft,
}

impl JobWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn view(&self) -> StepView {
        handler_for(self.step).view(&self.draft)
    }

    /// Advance one step. No validation; stays put on the last step.
    pub fn next(&mut self) -> Step {
        if let Some(step) = self.step.next() {
            self.step = step;
            debug!(step = step.number(), "wizard advanced");
        }
        self.step
    }

    /// Go back one step, keeping every draft value. Stays put on the first.
    pub fn previous(&mut self) -> Step {
        if let Some(step) = self.step.previous() {
            self.step = step;
            debug!(step = step.number(), "wizard went back");
        }
        self.step
    }

    fn require(&self, step: Step, input: &'static str) -> Result<(), WizardError> {
        if self.step == step && handler_for(step).accepts_input() {
            Ok(())
        } else {
            Err(WizardError::InputNotAccepted {
                step: self.step.number(),
                input,
            })
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WizardError> {
        self.require(Step::DataSource, "a job name")?;
        self.draft.name = name.into();
        Ok(())
    }

    /// Overwrites any previous choice; does not advance.
    pub fn select_data_source(&mut self, source: DataSource) -> Result<(), WizardError> {
        self.require(Step::DataSource, "a data source")?;
        self.draft.data_source = Some(source);
        Ok(())
    }

    /// Flip one enrichment flag and return its new value.
    pub fn toggle_enrichment(&mut self, option: EnrichmentOption) -> Result<bool, WizardError> {
        self.require(Step::Enrichment, "enrichment toggles")?;
        let flag = self.draft.enrichment.entry(option).or_insert(false);
        *flag = !*flag;
        Ok(*flag)
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary::of(&self.draft)
    }

    /// Only valid on the review step.
    pub fn finish(&self) -> Result<Completion, WizardError> {
        if self.step != Step::Review {
            return Err(WizardError::NotAtReview(self.step.number()));
        }
        info!(name = %self.draft.name, "job creation finished");
        Ok(Completion {
            notice: Notice::new(
                "Job Created Successfully!",
                Some(format!("{} has been created and is ready to run.", self.draft.name)),
            ),
            redirect: Route::DataJobs,
        })
    }
}
