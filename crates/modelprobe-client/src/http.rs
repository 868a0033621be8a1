//! HTTP probe client for OpenAI-compatible chat completion endpoints.

use async_trait::async_trait;
use modelprobe_core::{truncate_error, ProviderHandle};
use tracing::{debug, trace};

use crate::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::{ClientError, ProbeClient, ProbeRequest};

/// Probe client that POSTs to `{base_url}/chat/completions`.
#[derive(Debug, Clone, Default)]
pub struct HttpProbeClient {
    inner: reqwest::Client,
    default_provider: Option<ProviderHandle>,
}

impl HttpProbeClient {
    /// Create a client with no default endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint used when a request names no provider.
    pub fn with_default_provider(mut self, handle: ProviderHandle) -> Self {
        self.default_provider = Some(handle);
        self
    }

    fn resolve<'a>(&'a self, request: &'a ProbeRequest) -> Result<&'a ProviderHandle, ClientError> {
        request
            .provider
            .as_ref()
            .or(self.default_provider.as_ref())
            .ok_or(ClientError::NoDefaultProvider)
    }
}

#[async_trait]
impl ProbeClient for HttpProbeClient {
    async fn invoke(&self, request: &ProbeRequest) -> Result<String, ClientError> {
        let handle = self.resolve(request)?;
        let url = chat_url(&handle.base_url);

        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            stream: false,
        };

        let mut builder = self
            .inner
            .post(&url)
            .timeout(request.timeout)
            .json(&body);

        if let Some(var) = &handle.api_key_env {
            let key =
                std::env::var(var).map_err(|_| ClientError::MissingCredential(var.clone()))?;
            builder = builder.bearer_auth(key);
        }

        debug!(url = %url, model = %request.model, "POST chat completion");

        let response = builder.send().await.map_err(from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(from_reqwest)?;
        trace!(status = %status, len = text.len(), "Chat completion response");

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate_error(text.trim()),
            });
        }

        parse_completion(&text)
    }
}

fn chat_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn from_reqwest(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(e)
    }
}

/// Pull the first choice's text out of a chat completion body.
fn parse_completion(body: &str) -> Result<String, ClientError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
    parsed
        .into_text()
        .ok_or_else(|| ClientError::MalformedResponse("no choices in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).into_owned()
        });

        (format!("http://{addr}/v1"), handle)
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..split]
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= split + 4 + content_length
    }

    fn request(provider: Option<ProviderHandle>) -> ProbeRequest {
        ProbeRequest::new(provider, "gpt-4", "hello, how are u?", Duration::from_secs(5))
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"I am fine"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "I am fine");

        let null_content = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_completion(null_content).unwrap(), "");

        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(ClientError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion("<html>busy</html>"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_chat_url_trims_slash() {
        assert_eq!(
            chat_url("https://api.groq.com/openai/v1/"),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_invoke_success_sends_chat_request() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"I am fine"}}]}"#,
        )
        .await;
        std::env::set_var("MODELPROBE_TEST_KEY_OK", "sk-test");
        let handle = ProviderHandle::new(base).with_api_key_env("MODELPROBE_TEST_KEY_OK");

        let text = HttpProbeClient::new()
            .invoke(&request(Some(handle)))
            .await
            .unwrap();
        assert_eq!(text, "I am fine");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains(r#""model":"gpt-4""#));
        assert!(raw.contains(r#""role":"user""#));
        assert!(raw.contains("hello, how are u?"));
    }

    #[tokio::test]
    async fn test_invoke_error_status() {
        let (base, server) =
            serve_once("429 Too Many Requests", r#"{"error":"rate limited"}"#).await;

        let err = HttpProbeClient::new()
            .invoke(&request(Some(ProviderHandle::new(base))))
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("Expected Status, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_default_provider_used_without_handle() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"from default"}}]}"#,
        )
        .await;

        let client = HttpProbeClient::new().with_default_provider(ProviderHandle::new(base));
        let text = client.invoke(&request(None)).await.unwrap();
        assert_eq!(text, "from default");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_default_provider() {
        let err = HttpProbeClient::new().invoke(&request(None)).await.unwrap_err();
        assert!(matches!(err, ClientError::NoDefaultProvider));
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let handle = ProviderHandle::new("http://127.0.0.1:9/v1")
            .with_api_key_env("MODELPROBE_TEST_KEY_UNSET");
        let err = HttpProbeClient::new()
            .invoke(&request(Some(handle)))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClientError::MissingCredential(ref var) if var == "MODELPROBE_TEST_KEY_UNSET")
        );
    }
}
