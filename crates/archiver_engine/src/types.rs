use serde::{Deserialize, Serialize};

use crate::RequestError;

/// Archive entry as listed by `GET /archives`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchivesResponse {
    #[serde(default)]
    pub archives: Vec<ArchiveRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub url: String,
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

/// Accepted shapes of the `GET /jobs` payload.
///
/// The backend returns a bare array; the wrapped form is accepted as well so
/// that a `{ "jobs": [...] }` envelope decodes to the same list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JobsPayload {
    Bare(Vec<JobRecord>),
    Wrapped {
        #[serde(default)]
        jobs: Vec<JobRecord>,
    },
}

impl JobsPayload {
    pub fn into_jobs(self) -> Vec<JobRecord> {
        match self {
            JobsPayload::Bare(jobs) | JobsPayload::Wrapped { jobs } => jobs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireScopeType {
    #[serde(rename = "page")]
    Page,
    #[serde(rename = "page-spa")]
    PageSpa,
    #[serde(rename = "prefix")]
    Prefix,
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "domain")]
    Domain,
    #[serde(rename = "any")]
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCrawlOptions {
    pub name: String,
    #[serde(rename = "scopeType")]
    pub scope_type: WireScopeType,
    pub page_limit: i64,
    pub size_limit: i64,
    pub depth: i64,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: String,
    pub crawl_options: WireCrawlOptions,
}

/// Response of `POST /jobs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedJob {
    pub job_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRequest<'a> {
    pub name: &'a str,
}

/// Optional body of a successful `PUT /archives/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RenamedArchive {
    #[serde(default)]
    pub name: Option<String>,
}

/// Results delivered by the engine thread, one per executed request.
#[derive(Debug)]
pub enum EngineEvent {
    ArchivesFetched(Result<Vec<ArchiveRecord>, RequestError>),
    ArchiveRenamed {
        from: String,
        to: String,
        result: Result<Option<String>, RequestError>,
    },
    ArchiveDeleted {
        name: String,
        result: Result<(), RequestError>,
    },
    JobsFetched(Result<Vec<JobRecord>, RequestError>),
    JobCreated(Result<CreatedJob, RequestError>),
}
