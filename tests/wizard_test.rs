use dataflow_shell::model::{DataSource, EnrichmentOption};
use dataflow_shell::routes::Route;
use dataflow_shell::wizard::{JobWizard, Step, StepView, WizardError};

#[test]
fn four_nexts_reach_review() {
    let mut wizard = JobWizard::new();
    assert_eq!(wizard.step().number(), 1);
    for expected in 2..=5u8 {
        assert_eq!(wizard.next().number(), expected);
    }
    assert_eq!(wizard.step(), Step::Review);
    assert!(matches!(wizard.view(), StepView::Review(_)));
}

#[test]
fn advancing_with_empty_draft_is_allowed() {
    let mut wizard = JobWizard::new();
    wizard.next();
    wizard.next();
    wizard.next();
    wizard.next();
    let summary = wizard.summary();
    assert_eq!(summary.name, "Untitled Job");
    assert_eq!(summary.data_source, "Not selected");
    assert_eq!(summary.enrichments, vec!["Email Lookup"]);
    assert!(wizard.finish().is_ok());
}

#[test]
fn draft_survives_back_and_forth() {
    let mut wizard = JobWizard::new();
    wizard.set_name("Lead scrape").unwrap();
    wizard.select_data_source(DataSource::Website).unwrap();
    // a later choice overwrites the earlier one without moving the step
    wizard.select_data_source(DataSource::Api).unwrap();
    assert_eq!(wizard.step(), Step::DataSource);

    wizard.next();
    wizard.next();
    assert_eq!(wizard.step(), Step::Enrichment);
    assert!(!wizard.toggle_enrichment(EnrichmentOption::Email).unwrap());
    assert!(wizard.toggle_enrichment(EnrichmentOption::Company).unwrap());

    wizard.previous();
    wizard.previous();
    assert_eq!(wizard.step(), Step::DataSource);

    let draft = wizard.draft();
    assert_eq!(draft.name, "Lead scrape");
    assert_eq!(draft.data_source, Some(DataSource::Api));
    assert!(!draft.is_enabled(EnrichmentOption::Email));
    assert!(draft.is_enabled(EnrichmentOption::Company));
    assert!(!draft.is_enabled(EnrichmentOption::Social));
    assert!(!draft.is_enabled(EnrichmentOption::Phone));

    match wizard.view() {
        StepView::DataSource { name, selected, options } => {
            assert_eq!(name, "Lead scrape");
            assert_eq!(selected, Some(DataSource::Api));
            assert_eq!(options.len(), 3);
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn review_lists_enabled_options_in_order() {
    let mut wizard = JobWizard::new();
    wizard.set_name("Enrich CRM").unwrap();
    wizard.select_data_source(DataSource::Upload).unwrap();
    wizard.next();
    wizard.next();
    wizard.toggle_enrichment(EnrichmentOption::Phone).unwrap();
    wizard.toggle_enrichment(EnrichmentOption::Social).unwrap();
    wizard.next();
    wizard.next();

    let summary = wizard.summary();
    assert_eq!(summary.name, "Enrich CRM");
    assert_eq!(summary.data_source, "Upload");
    assert_eq!(
        summary.enrichments,
        vec!["Email Lookup", "Social Profiles", "Phone Numbers"]
    );
}

#[test]
fn finish_only_at_step_five() {
    let mut wizard = JobWizard::new();
    wizard.set_name("Nightly").unwrap();
    assert_eq!(wizard.finish(), Err(WizardError::NotAtReview(1)));
    wizard.next();
    wizard.next();
    wizard.next();
    assert_eq!(wizard.finish(), Err(WizardError::NotAtReview(4)));
    wizard.next();

    let done = wizard.finish().unwrap();
    assert_eq!(done.redirect, Route::DataJobs);
    assert_eq!(
        done.notice.description.as_deref(),
        Some("Nightly has been created and is ready to run.")
    );
}

#[test]
fn placeholder_steps_take_no_input() {
    let mut wizard = JobWizard::new();
    wizard.next();
    assert!(matches!(wizard.view(), StepView::NotImplemented { title: "Extraction Rules", .. }));
    assert!(wizard.select_data_source(DataSource::Api).is_err());
    wizard.next();
    wizard.next();
    assert!(matches!(wizard.view(), StepView::NotImplemented { title: "Output & Schedule", .. }));
    assert!(wizard.toggle_enrichment(EnrichmentOption::Email).is_err());
    assert!(wizard.draft().data_source.is_none());
}
