use crate::model::{Job, JobStatus, ScopeType};
use crate::state::{LoadState, Screen};
use crate::viewer::ViewerTarget;

/// Snapshot of everything a rendering surface needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: Screen,
    pub loading: bool,
    pub archive_load: LoadState,
    /// Filtered rows; `None` until the first successful load.
    pub archives: Option<Vec<ArchiveRowView>>,
    pub archive_total: usize,
    pub search_query: String,
    pub selected: Option<String>,
    pub editing: Option<EditView>,
    pub pending_delete: Option<String>,
    pub jobs: JobsPanelView,
    pub form: FormView,
    pub notice: Option<String>,
    pub viewer: Option<ViewerTarget>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRowView {
    pub name: String,
    pub display_name: String,
    pub selected: bool,
    pub editing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub archive: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobsPanelView {
    pub open: bool,
    pub loading: bool,
    pub rows: Vec<JobRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub id: String,
    pub short_id: String,
    pub url: String,
    pub status: String,
    pub tone: JobStatus,
    pub created_at: String,
}

impl JobRowView {
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            id: job.id.clone(),
            short_id: job.short_id().to_string(),
            url: job.url.clone(),
            status: job.status.clone(),
            tone: job.status_kind(),
            created_at: job.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub url: String,
    pub name: String,
    pub scope: ScopeType,
    pub page_limit: String,
    pub size_limit: String,
    pub depth: String,
    pub error: Option<String>,
    pub submitting: bool,
}
