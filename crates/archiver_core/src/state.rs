use crate::model::{
    display_name, stored_name, Archive, CrawlOptions, CrawlSubmission, Job, ScopeType,
};
use crate::view_model::{
    AppViewModel, ArchiveRowView, EditView, FormView, JobRowView, JobsPanelView,
};
use crate::viewer::viewer_target;

pub const URL_REQUIRED: &str = "URL is required";
pub const RENAME_FAILED: &str = "Failed to rename archive. Name might be taken or invalid.";

pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const DEFAULT_SIZE_LIMIT: i64 = 0;
pub const DEFAULT_DEPTH: i64 = 2;

/// Lifecycle of a server-backed collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Archives,
    CreateArchive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Url,
    Name,
    Scope,
    PageLimit,
    SizeLimit,
    Depth,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Url => "URL",
            FormField::Name => "Name",
            FormField::Scope => "Scope",
            FormField::PageLimit => "Page limit",
            FormField::SizeLimit => "Size limit",
            FormField::Depth => "Depth",
        }
    }
}

/// Cached archive collection plus the per-list editing state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveListState {
    archives: Option<Vec<Archive>>,
    load: LoadState,
    editing: Option<String>,
    edit_value: String,
    search_query: String,
    pending_delete: Option<String>,
    renaming: Option<(String, String)>,
}

impl ArchiveListState {
    pub fn archives(&self) -> Option<&[Archive]> {
        self.archives.as_deref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load.is_loading()
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn edit_value(&self) -> &str {
        &self.edit_value
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// True between a committed rename and its result.
    pub fn is_renaming(&self) -> bool {
        self.renaming.is_some()
    }

    /// Archives whose display name contains the search query, ignoring case.
    ///
    /// `None` while the list has never loaded, which is distinct from a loaded
    /// but empty (or fully filtered) list.
    pub fn filtered(&self) -> Option<Vec<&Archive>> {
        let archives = self.archives.as_ref()?;
        let needle = self.search_query.to_lowercase();
        Some(
            archives
                .iter()
                .filter(|archive| archive.display_name().to_lowercase().contains(&needle))
                .collect(),
        )
    }

    pub(crate) fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    pub(crate) fn apply_loaded(&mut self, archives: Vec<Archive>) {
        self.archives = Some(archives);
        self.load = LoadState::Loaded;
    }

    pub(crate) fn apply_load_failed(&mut self, message: String) {
        self.load = LoadState::Failed(message);
    }

    pub(crate) fn set_search_query(&mut self, query: String) {
        self.search_query = query;
    }

    pub(crate) fn start_editing(&mut self, name: String) {
        self.edit_value = display_name(&name).to_string();
        self.editing = Some(name);
    }

    pub(crate) fn set_edit_value(&mut self, value: String) {
        self.edit_value = value;
    }

    pub(crate) fn stop_editing(&mut self) {
        self.editing = None;
        self.edit_value.clear();
    }

    /// The `(from, to)` pair of a rename worth sending, if any. Nothing is
    /// sent while an earlier rename is still in flight.
    pub(crate) fn rename_request(&self) -> Option<(String, String)> {
        if self.renaming.is_some() {
            return None;
        }
        let from = self.editing.as_ref()?;
        if self.edit_value.trim().is_empty() {
            return None;
        }
        Some((from.clone(), self.edit_value.clone()))
    }

    pub(crate) fn begin_rename(&mut self, from: String, to: String) {
        self.renaming = Some((from, to));
    }

    pub(crate) fn finish_rename(&mut self) {
        self.renaming = None;
    }

    pub(crate) fn set_pending_delete(&mut self, name: Option<String>) {
        self.pending_delete = name;
    }

    pub(crate) fn take_pending_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }
}

/// Cached job collection for the jobs panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListState {
    jobs: Vec<Job>,
    load: LoadState,
    open: bool,
}

impl JobListState {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    /// Records the panel visibility and reports whether it just opened.
    pub(crate) fn set_open(&mut self, open: bool) -> bool {
        let opened = open && !self.open;
        self.open = open;
        opened
    }

    pub(crate) fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    pub(crate) fn apply_loaded(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.load = LoadState::Loaded;
    }

    pub(crate) fn apply_load_failed(&mut self, message: String) {
        self.load = LoadState::Failed(message);
    }
}

/// Input buffers of the create-archive form. Numeric fields stay as typed
/// text until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFormState {
    url: String,
    name: String,
    scope: ScopeType,
    page_limit: String,
    size_limit: String,
    depth: String,
    error: Option<String>,
    submitting: bool,
}

impl Default for CreateFormState {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: String::new(),
            scope: ScopeType::default(),
            page_limit: DEFAULT_PAGE_LIMIT.to_string(),
            size_limit: DEFAULT_SIZE_LIMIT.to_string(),
            depth: DEFAULT_DEPTH.to_string(),
            error: None,
            submitting: false,
        }
    }
}

impl CreateFormState {
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Url => self.url = value,
            FormField::Name => self.name = value,
            FormField::Scope => match value.parse() {
                Ok(scope) => self.scope = scope,
                Err(err) => self.error = Some(err),
            },
            FormField::PageLimit => self.page_limit = value,
            FormField::SizeLimit => self.size_limit = value,
            FormField::Depth => self.depth = value,
        }
    }

    /// Validates the buffers into a submission. Only the URL is required;
    /// numbers are coerced without range checks.
    pub(crate) fn build_submission(&self) -> Result<CrawlSubmission, String> {
        if self.url.trim().is_empty() {
            return Err(URL_REQUIRED.to_string());
        }
        Ok(CrawlSubmission {
            url: self.url.trim().to_string(),
            options: CrawlOptions {
                name: self.name.clone(),
                scope: self.scope,
                page_limit: coerce_number(FormField::PageLimit, &self.page_limit)?,
                size_limit: coerce_number(FormField::SizeLimit, &self.size_limit)?,
                depth: coerce_number(FormField::Depth, &self.depth)?,
            },
        })
    }

    pub(crate) fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    fn view(&self) -> FormView {
        FormView {
            url: self.url.clone(),
            name: self.name.clone(),
            scope: self.scope,
            page_limit: self.page_limit.clone(),
            size_limit: self.size_limit.clone(),
            depth: self.depth.clone(),
            error: self.error.clone(),
            submitting: self.submitting,
        }
    }
}

/// Blank input counts as zero.
fn coerce_number(field: FormField, raw: &str) -> Result<i64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| format!("{} must be a number", field.label()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    archives: ArchiveListState,
    jobs: JobListState,
    form: CreateFormState,
    selected: String,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn archives(&self) -> &ArchiveListState {
        &self.archives
    }

    pub fn jobs(&self) -> &JobListState {
        &self.jobs
    }

    pub fn form(&self) -> &CreateFormState {
        &self.form
    }

    /// Selected archive name; empty when nothing is selected.
    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let editing = self.archives.editing();
        let archives = self.archives.filtered().map(|rows| {
            rows.into_iter()
                .map(|archive| ArchiveRowView {
                    name: archive.name.clone(),
                    display_name: archive.display_name().to_string(),
                    selected: archive.name == self.selected,
                    editing: editing == Some(archive.name.as_str()),
                })
                .collect()
        });

        AppViewModel {
            screen: self.screen,
            loading: self.archives.is_loading(),
            archive_load: self.archives.load_state().clone(),
            archives,
            archive_total: self.archives.archives().map_or(0, |list| list.len()),
            search_query: self.archives.search_query().to_string(),
            selected: (!self.selected.is_empty()).then(|| self.selected.clone()),
            editing: editing.map(|name| EditView {
                archive: name.to_string(),
                value: self.archives.edit_value().to_string(),
            }),
            pending_delete: self.archives.pending_delete().map(ToOwned::to_owned),
            jobs: JobsPanelView {
                open: self.jobs.is_open(),
                loading: self.jobs.load_state().is_loading(),
                rows: self.jobs.jobs().iter().map(JobRowView::from_job).collect(),
            },
            form: self.form.view(),
            notice: self.notice.clone(),
            viewer: viewer_target(&self.selected),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn archives_mut(&mut self) -> &mut ArchiveListState {
        &mut self.archives
    }

    pub(crate) fn jobs_mut(&mut self) -> &mut JobListState {
        &mut self.jobs
    }

    pub(crate) fn form_mut(&mut self) -> &mut CreateFormState {
        &mut self.form
    }

    pub(crate) fn reset_form(&mut self) {
        self.form = CreateFormState::default();
    }

    pub(crate) fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub(crate) fn set_selected(&mut self, name: String) {
        self.selected = name;
    }

    pub(crate) fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }

    /// Selection predicted after renaming `from` to the display name `to`.
    pub(crate) fn follow_rename(&mut self, from: &str, to: &str, canonical: Option<String>) {
        if self.selected == from {
            self.selected = canonical.unwrap_or_else(|| stored_name(to));
        }
    }
}
