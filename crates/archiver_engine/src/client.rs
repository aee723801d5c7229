use std::time::Duration;

use archiver_logging::{archiver_debug, archiver_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    ArchiveRecord, ArchivesResponse, CrawlRequest, CreatedJob, JobRecord, JobsPayload,
    RenameRequest, RenamedArchive, RequestError,
};

/// Every request is issued below this path on the configured server.
pub const API_BASE_PATH: &str = "/api";

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:1080";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Origin of the backend, e.g. `http://127.0.0.1:1080`.
    pub server: String,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            request_timeout: None,
        }
    }
}

/// Typed view of the backend endpoints consumed by the client.
#[async_trait::async_trait]
pub trait ArchiveApi: Send + Sync {
    async fn list_archives(&self) -> Result<Vec<ArchiveRecord>, RequestError>;

    /// Returns the canonical new name when the server echoes one back.
    async fn rename_archive(&self, from: &str, to: &str) -> Result<Option<String>, RequestError>;

    async fn delete_archive(&self, name: &str) -> Result<(), RequestError>;

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, RequestError>;

    async fn create_job(&self, request: &CrawlRequest) -> Result<CreatedJob, RequestError>;
}

/// Thin JSON wrapper over reqwest rooted at `{server}/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, RequestError> {
        let server = settings.server.trim().trim_end_matches('/');
        url::Url::parse(server).map_err(|err| RequestError::InvalidUrl(err.to_string()))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base: format!("{server}{API_BASE_PATH}"),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let response = self.send(Method::GET, path, None).await?;
        parse_json(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        parse_json(response).await
    }

    /// A 204 yields `None` without touching the (empty) body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Option<T>, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_vec(body)?;
        let response = self.send(Method::PUT, path, Some(body)).await?;
        parse_optional_json(response).await
    }

    /// A 204 yields `None` without touching the (empty) body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, RequestError> {
        let response = self.send(Method::DELETE, path, None).await?;
        parse_optional_json(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response, RequestError> {
        let url = format!("{}{}", self.base, path);
        archiver_debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            archiver_warn!("{} {} failed with status {}", method, url, status);
            return Err(RequestError::from_status(status));
        }
        Ok(response)
    }
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn parse_optional_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, RequestError> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    parse_json(response).await.map(Some)
}

/// Path of a single archive below the API base, name encoded as one segment.
pub fn archive_path(name: &str) -> String {
    format!("/archives/{}", urlencoding::encode(name))
}

#[async_trait::async_trait]
impl ArchiveApi for ApiClient {
    async fn list_archives(&self) -> Result<Vec<ArchiveRecord>, RequestError> {
        let response: ArchivesResponse = self.get("/archives").await?;
        Ok(response.archives)
    }

    async fn rename_archive(&self, from: &str, to: &str) -> Result<Option<String>, RequestError> {
        let body: Option<serde_json::Value> = self
            .put(&archive_path(from), &RenameRequest { name: to })
            .await?;
        // Only success matters; a `name` field is adopted when present.
        let canonical = body
            .and_then(|value| serde_json::from_value::<RenamedArchive>(value).ok())
            .and_then(|renamed| renamed.name)
            .filter(|name| !name.trim().is_empty());
        Ok(canonical)
    }

    async fn delete_archive(&self, name: &str) -> Result<(), RequestError> {
        let _: Option<serde_json::Value> = self.delete(&archive_path(name)).await?;
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, RequestError> {
        let payload: JobsPayload = self.get("/jobs").await?;
        Ok(payload.into_jobs())
    }

    async fn create_job(&self, request: &CrawlRequest) -> Result<CreatedJob, RequestError> {
        self.post("/jobs", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_path_encodes_name_as_single_segment() {
        assert_eq!(archive_path("site.wacz"), "/archives/site.wacz");
        assert_eq!(archive_path("my site/1.wacz"), "/archives/my%20site%2F1.wacz");
    }

    #[test]
    fn base_strips_trailing_slash() {
        let client = ApiClient::new(&ClientSettings {
            server: "http://localhost:8080/".to_string(),
            request_timeout: None,
        })
        .unwrap();
        assert_eq!(client.base(), "http://localhost:8080/api");
    }

    #[test]
    fn rejects_unparsable_server() {
        let err = ApiClient::new(&ClientSettings {
            server: "not a url".to_string(),
            request_timeout: None,
        })
        .unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }
}
