//! Archiver core: pure state machine and view-model helpers for the
//! archive browser.
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;
mod viewer;

pub use effect::Effect;
pub use model::{
    display_name, stored_name, Archive, CrawlOptions, CrawlSubmission, Job, JobStatus, ScopeType,
    ARCHIVE_SUFFIX,
};
pub use msg::Msg;
pub use state::{
    AppState, ArchiveListState, CreateFormState, FormField, JobListState, LoadState, Screen,
    DEFAULT_DEPTH, DEFAULT_PAGE_LIMIT, DEFAULT_SIZE_LIMIT, RENAME_FAILED, URL_REQUIRED,
};
pub use update::update;
pub use view_model::{
    AppViewModel, ArchiveRowView, EditView, FormView, JobRowView, JobsPanelView,
};
pub use viewer::{viewer_target, ViewerTarget, ARCHIVE_STREAM_PREFIX, VIEWER_PAGE};
