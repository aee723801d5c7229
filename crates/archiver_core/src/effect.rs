use crate::model::CrawlSubmission;

/// Side effects requested by `update`, executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchArchives,
    RenameArchive { from: String, to: String },
    /// Ask the user a blocking yes/no question before deleting.
    ConfirmDelete { name: String },
    DeleteArchive { name: String },
    FetchJobs,
    CreateJob(CrawlSubmission),
}
