//! Archiver engine: REST client for the archiving backend and the background
//! executor that runs requests off the UI thread.
mod client;
mod engine;
mod error;
mod types;

pub use client::{
    archive_path, ApiClient, ArchiveApi, ClientSettings, API_BASE_PATH, DEFAULT_SERVER,
};
pub use engine::{EngineHandle, EngineStartError};
pub use error::RequestError;
pub use types::{
    ArchiveRecord, ArchivesResponse, CrawlRequest, CreatedJob, EngineEvent, JobRecord,
    JobsPayload, RenameRequest, RenamedArchive, WireCrawlOptions, WireScopeType,
};
