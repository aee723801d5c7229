use crate::model::{Archive, Job};
use crate::state::FormField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// First display of the archive list.
    Started,
    /// User asked for a fresh archive list.
    RefreshArchives,
    /// Result of `GET /archives`. Errors carry the transport status text.
    ArchivesLoaded(Result<Vec<Archive>, String>),
    /// User edited the search box.
    SearchChanged(String),
    /// User picked an archive; an empty name deselects.
    SelectArchive(String),
    /// User started renaming the archive with this stored name.
    StartRename(String),
    /// User edited the rename buffer.
    EditChanged(String),
    CancelRename,
    CommitRename,
    /// Result of `PUT /archives/{from}`. `Ok` carries the name echoed by the
    /// server, if any.
    RenameFinished {
        from: String,
        to: String,
        result: Result<Option<String>, String>,
    },
    /// User asked to delete an archive; needs confirmation first.
    RequestDelete(String),
    DeleteConfirmed,
    DeleteCancelled,
    /// Result of `DELETE /archives/{name}`.
    DeleteFinished {
        name: String,
        result: Result<(), String>,
    },
    /// Jobs panel visibility changed.
    JobsPanelToggled(bool),
    /// User asked for a fresh job list.
    RefreshJobs,
    /// Result of `GET /jobs`.
    JobsLoaded(Result<Vec<Job>, String>),
    OpenCreateForm,
    CloseCreateForm,
    FormFieldChanged(FormField, String),
    SubmitForm,
    /// Result of `POST /jobs`; `Ok` carries the new job id.
    JobCreated(Result<String, String>),
    DismissNotice,
}
