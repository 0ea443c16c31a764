//! Headless commands - one backend call, result printed to a writer

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{GenerateRequest, GenerateResponse, HealthStatus, Tone};
use crate::network::client::{display_name, ApiClient};

pub async fn generate(client: &ApiClient, topic: &str, tone: Tone, out: &mut impl Write) -> Result<()> {
    if topic.is_empty() {
        anyhow::bail!("topic must not be empty");
    }
    let request = GenerateRequest::new(topic, tone);
    let response = client
        .generate(&request)
        .await
        .context("Failed to contact agents")?;
    write_report(&response, out)?;
    Ok(())
}

pub async fn ingest(client: &ApiClient, path: &Path, out: &mut impl Write) -> Result<()> {
    let filename = display_name(path);
    client
        .ingest_file(path)
        .await
        .with_context(|| format!("Upload failed: {}", filename))?;
    writeln!(out, "Ingestion complete: {}", filename)?;
    Ok(())
}

pub async fn health(client: &ApiClient, out: &mut impl Write) -> Result<()> {
    let HealthStatus {
        status,
        environment,
        service,
    } = client.health().await.context("Health check failed")?;
    writeln!(out, "{} is {} ({})", service, status, environment)?;
    Ok(())
}

/// Plain-text rendering of a generation result
pub fn write_report(response: &GenerateResponse, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Revisions Made: {}", response.revisions)?;
    writeln!(out, "Sources Cited:  {}", response.used_context)?;
    writeln!(out)?;
    writeln!(out, "{}", response.final_document)?;
    writeln!(out)?;
    writeln!(out, "Final Editor's Note: \"{}\"", response.final_critique)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_report_layout() {
        let response = GenerateResponse {
            final_document: "Mount the probe vertically.".to_string(),
            revisions: 2,
            final_critique: "Looks good.".to_string(),
            used_context: 5,
        };
        let mut out = Vec::new();
        write_report(&response, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Revisions Made: 2\nSources Cited:  5\n"));
        assert!(text.contains("Mount the probe vertically."));
        assert!(text.ends_with("Final Editor's Note: \"Looks good.\"\n"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_topic_without_calling_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(&Settings {
            api_url: server.uri(),
            ..Settings::default()
        });
        let mut out = Vec::new();
        assert!(generate(&client, "", Tone::Technical, &mut out).await.is_err());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_generate_sends_whitespace_topic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/generate"))
            .and(body_json(serde_json::json!({"topic": "   ", "tone": "summary"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "final_document": "Nothing to say.",
                "revisions": 0,
                "final_critique": "Empty brief.",
                "used_context": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&Settings {
            api_url: server.uri(),
            ..Settings::default()
        });
        let mut out = Vec::new();
        generate(&client, "   ", Tone::Summary, &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("Revisions Made: 0\n"));
    }

    #[tokio::test]
    async fn test_health_output() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "active",
                "environment": "production",
                "service": "DocuForge API"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&Settings {
            api_url: server.uri(),
            ..Settings::default()
        });
        let mut out = Vec::new();
        health(&client, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "DocuForge API is active (production)\n"
        );
    }
}
