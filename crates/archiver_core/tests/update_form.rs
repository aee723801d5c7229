use archiver_core::{
    update, AppState, CrawlOptions, CrawlSubmission, Effect, FormField, Msg, Screen, ScopeType,
    URL_REQUIRED,
};
use pretty_assertions::assert_eq;

fn open_form() -> AppState {
    let (state, _) = update(AppState::new(), Msg::OpenCreateForm);
    state
}

fn set(state: AppState, field: FormField, value: &str) -> AppState {
    let (state, _) = update(state, Msg::FormFieldChanged(field, value.to_string()));
    state
}

#[test]
fn missing_url_is_rejected_without_effects() {
    let state = open_form();
    let (state, effects) = update(state, Msg::SubmitForm);

    assert!(effects.is_empty());
    assert_eq!(state.form().error(), Some(URL_REQUIRED));
    assert!(!state.form().is_submitting());
    assert_eq!(state.screen(), Screen::CreateArchive);

    let state = set(state, FormField::Url, "   ");
    let (state, effects) = update(state, Msg::SubmitForm);
    assert!(effects.is_empty());
    assert_eq!(state.view().form.error.as_deref(), Some("URL is required"));
}

#[test]
fn submit_with_defaults_sends_full_parameter_set() {
    let state = open_form();
    let state = set(state, FormField::Url, "https://example.com");
    let (state, effects) = update(state, Msg::SubmitForm);

    assert_eq!(
        effects,
        vec![Effect::CreateJob(CrawlSubmission {
            url: "https://example.com".to_string(),
            options: CrawlOptions {
                name: String::new(),
                scope: ScopeType::Page,
                page_limit: 100,
                size_limit: 0,
                depth: 2,
            },
        })]
    );
    assert!(state.form().is_submitting());
    assert_eq!(state.form().error(), None);

    // A second submit while in flight is ignored.
    let (_state, effects) = update(state, Msg::SubmitForm);
    assert!(effects.is_empty());
}

#[test]
fn numeric_fields_are_coerced_without_range_checks() {
    let state = open_form();
    let state = set(state, FormField::Url, "https://example.com");
    let state = set(state, FormField::Name, "nightly");
    let state = set(state, FormField::Scope, "domain");
    let state = set(state, FormField::PageLimit, " -5 ");
    let state = set(state, FormField::SizeLimit, "");
    let state = set(state, FormField::Depth, "-1");
    let (_state, effects) = update(state, Msg::SubmitForm);

    assert_eq!(
        effects,
        vec![Effect::CreateJob(CrawlSubmission {
            url: "https://example.com".to_string(),
            options: CrawlOptions {
                name: "nightly".to_string(),
                scope: ScopeType::Domain,
                page_limit: -5,
                size_limit: 0,
                depth: -1,
            },
        })]
    );
}

#[test]
fn non_numeric_limit_is_reported() {
    let state = open_form();
    let state = set(state, FormField::Url, "https://example.com");
    let state = set(state, FormField::Depth, "deep");
    let (state, effects) = update(state, Msg::SubmitForm);

    assert!(effects.is_empty());
    assert_eq!(state.form().error(), Some("Depth must be a number"));
}

#[test]
fn success_returns_to_list_and_resets_form() {
    let state = open_form();
    let state = set(state, FormField::Url, "https://example.com");
    let (state, _) = update(state, Msg::SubmitForm);
    let (state, effects) = update(state, Msg::JobCreated(Ok("abc".to_string())));

    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Archives);
    assert_eq!(state.view().form.url, "");
    assert_eq!(state.notice(), Some("Job abc queued"));
}

#[test]
fn failure_keeps_form_for_correction() {
    let state = open_form();
    let state = set(state, FormField::Url, "https://example.com");
    let state = set(state, FormField::Name, "keep me");
    let (state, _) = update(state, Msg::SubmitForm);
    let (state, _) = update(
        state,
        Msg::JobCreated(Err("API Error: Internal Server Error".to_string())),
    );

    let view = state.view();
    assert_eq!(view.screen, Screen::CreateArchive);
    assert_eq!(view.form.url, "https://example.com");
    assert_eq!(view.form.name, "keep me");
    assert_eq!(
        view.form.error.as_deref(),
        Some("API Error: Internal Server Error")
    );
    assert!(!view.form.submitting);
}

#[test]
fn unknown_scope_is_rejected_and_previous_kept() {
    let state = open_form();
    let state = set(state, FormField::Scope, "site");
    assert_eq!(state.view().form.scope, ScopeType::Page);
    assert_eq!(state.form().error(), Some("unknown scope type 'site'"));
}
