use std::sync::{Arc, Mutex};
use std::time::Duration;

use archiver_engine::{
    ArchiveApi, ArchiveRecord, CrawlRequest, CreatedJob, EngineEvent, EngineHandle, JobRecord,
    RequestError,
};

#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ArchiveApi for FakeApi {
    async fn list_archives(&self) -> Result<Vec<ArchiveRecord>, RequestError> {
        self.record("list_archives".to_string());
        Ok(vec![ArchiveRecord {
            name: "foo.wacz".to_string(),
        }])
    }

    async fn rename_archive(&self, from: &str, to: &str) -> Result<Option<String>, RequestError> {
        self.record(format!("rename {from} {to}"));
        Err(RequestError::Status {
            status: 409,
            status_text: "Conflict".to_string(),
        })
    }

    async fn delete_archive(&self, name: &str) -> Result<(), RequestError> {
        self.record(format!("delete {name}"));
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, RequestError> {
        self.record("list_jobs".to_string());
        Ok(Vec::new())
    }

    async fn create_job(&self, request: &CrawlRequest) -> Result<CreatedJob, RequestError> {
        self.record(format!("create {}", request.url));
        Ok(CreatedJob {
            job_id: "job-1".to_string(),
            status: "pending".to_string(),
        })
    }
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn engine_delivers_one_event_per_request() {
    archiver_logging::initialize_for_tests();
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api.clone()).expect("engine");

    engine.fetch_archives();
    match next_event(&engine) {
        EngineEvent::ArchivesFetched(Ok(archives)) => {
            assert_eq!(archives.len(), 1);
            assert_eq!(archives[0].name, "foo.wacz");
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.delete_archive("foo.wacz");
    match next_event(&engine) {
        EngineEvent::ArchiveDeleted { name, result } => {
            assert_eq!(name, "foo.wacz");
            assert!(result.is_ok());
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(api.calls(), vec!["list_archives", "delete foo.wacz"]);
    assert!(engine.try_recv().is_none());
}

#[test]
fn rename_failure_carries_request_identity() {
    let api = Arc::new(FakeApi::default());
    let engine = EngineHandle::with_api(api).expect("engine");

    engine.rename_archive("bar.wacz", "baz");
    match next_event(&engine) {
        EngineEvent::ArchiveRenamed { from, to, result } => {
            assert_eq!(from, "bar.wacz");
            assert_eq!(to, "baz");
            assert_eq!(result.unwrap_err().to_string(), "API Error: Conflict");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
