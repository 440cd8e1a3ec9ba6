use async_trait::async_trait;
use std::time::Duration;

use crate::error::{GeminiError, Result};
use crate::models::{GenerateContentRequest, GenerateContentResponse};

/// Carries `generateContent` requests to a provider. The HTTP transport
/// is the production implementation; tests substitute a stub.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Talks to the Gemini REST API over HTTPS.
pub struct HttpTransport {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GeminiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpTransport {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        );
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                GeminiError::GenerationFailed(format!(
                    "Request to the generation provider failed: {}",
                    e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::GenerationFailed(format!(
                "Provider returned HTTP {}: {}",
                status,
                excerpt(&body)
            )));
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            GeminiError::GenerationFailed(format!("Failed to decode provider response: {}", e))
        })
    }
}

/// Trims provider error bodies to a loggable size.
fn excerpt(body: &str) -> &str {
    const MAX: usize = 500;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use crate::models::{Content, Part};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub model: String,
        pub request: GenerateContentRequest,
    }

    /// In-memory transport that returns a canned response and records
    /// every call it receives.
    pub struct StubTransport {
        response: GenerateContentResponse,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl StubTransport {
        pub fn returning(response: GenerateContentResponse) -> Arc<Self> {
            Arc::new(StubTransport {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationTransport for StubTransport {
        async fn generate_content(
            &self,
            model: &str,
            request: GenerateContentRequest,
        ) -> Result<GenerateContentResponse> {
            self.calls.lock().unwrap().push(RecordedCall {
                model: model.to_string(),
                request,
            });
            Ok(self.response.clone())
        }
    }

    /// Builds the typical success payload: a short text part followed by
    /// an inline image.
    pub fn inline_image_response(mime_type: &str, data: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![crate::models::Candidate {
                content: Some(Content {
                    role: "model".to_string(),
                    parts: vec![
                        Part::text("Here is your image."),
                        Part {
                            inline_data: Some(crate::models::InlineData {
                                mime_type: mime_type.to_string(),
                                data: data.to_string(),
                            }),
                            ..Part::default()
                        },
                    ],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread;

    #[test]
    fn excerpt_keeps_short_bodies_whole() {
        assert_eq!(excerpt("quota exceeded"), "quota exceeded");
    }

    #[test]
    fn excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(400);
        let cut = excerpt(&body);
        assert!(cut.len() <= 500);
        assert!(body.starts_with(cut));
    }

    #[test]
    fn builds_with_timeout() {
        let transport =
            HttpTransport::new("key", "https://example.com", Some(Duration::from_secs(30)));
        assert!(transport.is_ok());
    }

    // Serves one canned HTTP response on a loopback socket, then closes.
    fn serve_once(status_line: &str, body: &str) -> (thread::JoinHandle<()>, SocketAddr) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(response.as_bytes());
        });
        (handle, addr)
    }

    #[tokio::test]
    async fn non_success_status_maps_to_generation_failed() {
        let (server, addr) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"quota exceeded"}}"#,
        );

        let transport = HttpTransport::new("key", format!("http://{}", addr), None).unwrap();
        let result = transport
            .generate_content("test-model", GenerateContentRequest::text_to_image("a fox"))
            .await;
        server.join().unwrap();

        match result {
            Err(GeminiError::GenerationFailed(message)) => {
                assert!(message.contains("429"), "missing status: {}", message);
                assert!(message.contains("quota exceeded"), "missing body: {}", message);
            }
            other => panic!("expected GenerationFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_generation_failed() {
        let (server, addr) = serve_once("200 OK", "not json at all");

        let transport = HttpTransport::new("key", format!("http://{}", addr), None).unwrap();
        let result = transport
            .generate_content("test-model", GenerateContentRequest::text_to_image("a fox"))
            .await;
        server.join().unwrap();

        match result {
            Err(GeminiError::GenerationFailed(message)) => {
                assert!(message.contains("decode"), "unexpected message: {}", message);
            }
            other => panic!("expected GenerationFailed, got {:?}", other),
        }
    }
}
