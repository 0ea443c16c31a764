//! HTTP client wrapper - talks to the DocuForge backend

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::config::Settings;
use crate::constants::{GENERATE_PATH, HEALTH_PATH, INGEST_FIELD_NAME, INGEST_FILE_PATH};
use crate::error::ClientError;
use crate::models::{GenerateRequest, GenerateResponse, HealthStatus};

/// Typed access to the backend endpoints
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        ApiClient {
            http: create_client(settings.request_timeout()),
            base_url: settings.api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute endpoint path onto the backend address
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Run the generation workflow for a topic
    pub async fn generate(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ClientError> {
        let resp = self
            .http
            .post(self.endpoint(GENERATE_PATH))
            .json(request)
            .send()
            .await?;
        let body = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Upload a document into the knowledge base
    pub async fn ingest_file(&self, path: &Path) -> Result<(), ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let part = Part::bytes(bytes)
            .file_name(display_name(path))
            .mime_str(mime_for(path))?;
        let form = Form::new().part(INGEST_FIELD_NAME, part);

        let resp = self
            .http
            .post(self.endpoint(INGEST_FILE_PATH))
            .multipart(form)
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let resp = self.http.get(self.endpoint(HEALTH_PATH)).send().await?;
        let body = ensure_success(resp).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Any non-2xx status is a failure; the error body is not inspected
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
        })
    }
}

/// File name shown to the user and sent in the multipart part
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Create an HTTP client, with a timeout only when one is configured
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let builder = reqwest::Client::builder();
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tone;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        let settings = Settings {
            api_url: server.uri(),
            ..Settings::default()
        };
        ApiClient::new(&settings)
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let settings = Settings {
            api_url: "http://backend:8000/".to_string(),
            ..Settings::default()
        };
        let client = ApiClient::new(&settings);
        assert_eq!(
            client.endpoint(GENERATE_PATH),
            "http://backend:8000/api/v1/generate"
        );
    }

    #[test]
    fn test_display_name_and_mime() {
        let path = PathBuf::from("/tmp/manuals/HMP155.PDF");
        assert_eq!(display_name(&path), "HMP155.PDF");
        assert_eq!(mime_for(&path), "application/pdf");
        assert_eq!(mime_for(Path::new("notes.txt")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_generate_posts_topic_and_tone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/generate"))
            .and(body_json(serde_json::json!({
                "topic": "How do I install the HMP155 sensor?",
                "tone": "technical"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "final_document": "# Installing the HMP155",
                "revisions": 2,
                "final_critique": "Looks good.",
                "used_context": 5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = GenerateRequest::new("How do I install the HMP155 sensor?", Tone::Technical);
        let resp = client.generate(&request).await.expect("generate ok");
        assert_eq!(resp.revisions, 2);
        assert_eq!(resp.used_context, 5);
        assert_eq!(resp.final_document, "# Installing the HMP155");
    }

    #[tokio::test]
    async fn test_generate_non_2xx_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("agents down"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .generate(&GenerateRequest::new("x", Tone::Technical))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_generate_bad_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .generate(&GenerateRequest::new("x", Tone::Technical))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ingest_file_sends_multipart_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/ingest/file"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"spec.pdf\""))
            .and(body_string_contains("%PDF-1.4 fake content"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let file = dir.path().join("spec.pdf");
        std::fs::write(&file, b"%PDF-1.4 fake content").unwrap();

        let client = client_for(&server);
        client.ingest_file(&file).await.expect("ingest ok");
    }

    #[tokio::test]
    async fn test_ingest_missing_file_is_io_error() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let dir = tempdir().unwrap();

        let err = client
            .ingest_file(&dir.path().join("missing.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io { .. }));
    }

    #[tokio::test]
    async fn test_ingest_rejected_upload_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/ingest/file"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let file = dir.path().join("spec.pdf");
        std::fs::write(&file, b"%PDF").unwrap();

        let err = client_for(&server).ingest_file(&file).await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 422 }));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "active",
                "environment": "dev",
                "service": "DocuForge API"
            })))
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.expect("health ok");
        assert_eq!(health.status, "active");
        assert_eq!(health.service, "DocuForge API");
    }
}
