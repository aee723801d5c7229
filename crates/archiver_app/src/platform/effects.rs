use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use archiver_core::{Archive, CrawlSubmission, Effect, Job, Msg, ScopeType};
use archiver_engine::{
    ArchiveRecord, CrawlRequest, EngineEvent, EngineHandle, JobRecord, WireCrawlOptions,
    WireScopeType,
};
use archiver_logging::{archiver_error, archiver_info, archiver_warn};

/// Outcome of waiting for the engine.
#[derive(Debug)]
pub enum Poll {
    Msg(Msg),
    Pending,
    Disconnected,
}

/// Forwards network effects to the engine and turns its results back into
/// messages. Failures are logged here before the core sees them.
pub struct EffectRunner {
    engine: EngineHandle,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::FetchArchives => self.engine.fetch_archives(),
            Effect::RenameArchive { from, to } => {
                archiver_info!("RenameArchive from={} to={}", from, to);
                self.engine.rename_archive(from, to);
            }
            Effect::DeleteArchive { name } => {
                archiver_info!("DeleteArchive name={}", name);
                self.engine.delete_archive(name);
            }
            Effect::FetchJobs => self.engine.fetch_jobs(),
            Effect::CreateJob(submission) => {
                archiver_info!(
                    "CreateJob url={} scope={}",
                    submission.url,
                    submission.options.scope
                );
                self.engine.create_job(to_crawl_request(submission));
            }
            Effect::ConfirmDelete { name } => {
                // Confirmation is a UI concern and never reaches the engine.
                archiver_warn!("ConfirmDelete for {} routed to effect runner; ignored", name);
                return;
            }
        }
        self.in_flight += 1;
    }

    pub fn poll(&mut self, timeout: Duration) -> Poll {
        match self.engine.recv_timeout(timeout) {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Poll::Msg(event_to_msg(event))
            }
            Err(RecvTimeoutError::Timeout) => Poll::Pending,
            Err(RecvTimeoutError::Disconnected) => {
                archiver_error!("engine thread stopped with {} requests in flight", self.in_flight);
                self.in_flight = 0;
                Poll::Disconnected
            }
        }
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ArchivesFetched(result) => Msg::ArchivesLoaded(
            result
                .map(|records| records.into_iter().map(to_archive).collect())
                .map_err(|err| {
                    archiver_error!("Failed to fetch archives: {}", err);
                    err.to_string()
                }),
        ),
        EngineEvent::ArchiveRenamed { from, to, result } => {
            let result = result.map_err(|err| {
                archiver_error!("Failed to rename archive {}: {}", from, err);
                err.to_string()
            });
            Msg::RenameFinished { from, to, result }
        }
        EngineEvent::ArchiveDeleted { name, result } => {
            let result = result.map_err(|err| {
                archiver_error!("Failed to delete archive {}: {}", name, err);
                err.to_string()
            });
            Msg::DeleteFinished { name, result }
        }
        EngineEvent::JobsFetched(result) => Msg::JobsLoaded(
            result
                .map(|records| records.into_iter().map(to_job).collect())
                .map_err(|err| {
                    archiver_error!("Failed to fetch jobs: {}", err);
                    err.to_string()
                }),
        ),
        EngineEvent::JobCreated(result) => Msg::JobCreated(
            result
                .map(|created| {
                    archiver_info!("Job {} created with status {}", created.job_id, created.status);
                    created.job_id
                })
                .map_err(|err| {
                    archiver_error!("Failed to create archive job: {}", err);
                    err.to_string()
                }),
        ),
    }
}

fn to_archive(record: ArchiveRecord) -> Archive {
    Archive { name: record.name }
}

fn to_job(record: JobRecord) -> Job {
    Job {
        id: record.id,
        url: record.url,
        status: record.status,
        created_at: record.created_at,
    }
}

fn to_crawl_request(submission: CrawlSubmission) -> CrawlRequest {
    let options = submission.options;
    CrawlRequest {
        url: submission.url,
        crawl_options: WireCrawlOptions {
            name: options.name,
            scope_type: map_scope(options.scope),
            page_limit: options.page_limit,
            size_limit: options.size_limit,
            depth: options.depth,
        },
    }
}

fn map_scope(scope: ScopeType) -> WireScopeType {
    match scope {
        ScopeType::Page => WireScopeType::Page,
        ScopeType::PageSpa => WireScopeType::PageSpa,
        ScopeType::Prefix => WireScopeType::Prefix,
        ScopeType::Host => WireScopeType::Host,
        ScopeType::Domain => WireScopeType::Domain,
        ScopeType::Any => WireScopeType::Any,
    }
}
