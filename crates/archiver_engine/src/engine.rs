use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use archiver_logging::archiver_debug;
use thiserror::Error;

use crate::client::{ApiClient, ArchiveApi, ClientSettings};
use crate::{CrawlRequest, EngineEvent, RequestError};

#[derive(Debug, Error)]
pub enum EngineStartError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build api client: {0}")]
    Client(#[from] RequestError),
}

enum EngineCommand {
    FetchArchives,
    RenameArchive { from: String, to: String },
    DeleteArchive { name: String },
    FetchJobs,
    CreateJob(CrawlRequest),
}

/// Runs API requests on a background runtime and hands results back over a
/// channel. Requests are not cancelled or ordered against each other.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: &ClientSettings) -> Result<Self, EngineStartError> {
        let api = ApiClient::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn ArchiveApi>) -> Result<Self, EngineStartError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_archives(&self) {
        self.submit(EngineCommand::FetchArchives);
    }

    pub fn rename_archive(&self, from: impl Into<String>, to: impl Into<String>) {
        self.submit(EngineCommand::RenameArchive {
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn delete_archive(&self, name: impl Into<String>) {
        self.submit(EngineCommand::DeleteArchive { name: name.into() });
    }

    pub fn fetch_jobs(&self) {
        self.submit(EngineCommand::FetchJobs);
    }

    pub fn create_job(&self, request: CrawlRequest) {
        self.submit(EngineCommand::CreateJob(request));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next result. `Disconnected` means the
    /// engine thread is gone and no further results will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(api: &dyn ArchiveApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchArchives => {
            archiver_debug!("fetching archive list");
            EngineEvent::ArchivesFetched(api.list_archives().await)
        }
        EngineCommand::RenameArchive { from, to } => {
            archiver_debug!("renaming archive {} to {}", from, to);
            let result = api.rename_archive(&from, &to).await;
            EngineEvent::ArchiveRenamed { from, to, result }
        }
        EngineCommand::DeleteArchive { name } => {
            archiver_debug!("deleting archive {}", name);
            let result = api.delete_archive(&name).await;
            EngineEvent::ArchiveDeleted { name, result }
        }
        EngineCommand::FetchJobs => {
            archiver_debug!("fetching job list");
            EngineEvent::JobsFetched(api.list_jobs().await)
        }
        EngineCommand::CreateJob(request) => {
            archiver_debug!("creating crawl job for {}", request.url);
            EngineEvent::JobCreated(api.create_job(&request).await)
        }
    }
}
