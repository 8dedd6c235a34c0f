//! HTTP transport posting the form as `multipart/form-data`

use crate::controller::{SubmitError, SubmitTransport, TransportResponse};
use async_trait::async_trait;
use reqwest::{multipart, Client};

/// Posts form data to the configured endpoint with a shared reqwest client
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_form(fields: Vec<(String, String)>) -> multipart::Form {
        fields
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| {
                form.text(name, value)
            })
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
    ) -> Result<TransportResponse, SubmitError> {
        let form = Self::build_form(fields);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    SubmitError::Other(format!("Failed to build request: {e}"))
                } else {
                    SubmitError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Network(format!("Failed to read response body: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one request, answering with `status` and `body`.
    /// The join handle yields the raw request bytes.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                // Last multipart boundary, or the end of a chunked body
                if request.ends_with(b"--\r\n") || request.ends_with(b"\r\n0\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (url, handle)
    }

    fn fields() -> Vec<(String, String)> {
        vec![
            ("fullName".to_string(), "Ada Lovelace".to_string()),
            ("honeypot_field".to_string(), String::new()),
            ("g-recaptcha-response".to_string(), "tok-1".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_posts_multipart_fields() {
        let (url, server) = serve_once("200 OK", r#"{"result":"success"}"#).await;
        let transport = HttpTransport::new();

        let response = transport.post_form(&url, fields()).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body, r#"{"result":"success"}"#);

        let request = String::from_utf8_lossy(&server.await.unwrap()).to_string();
        assert!(request.starts_with("POST /exec"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains("name=\"fullName\""));
        assert!(request.contains("Ada Lovelace"));
        assert!(request.contains("name=\"honeypot_field\""));
        assert!(request.contains("name=\"g-recaptcha-response\""));
        assert!(request.contains("tok-1"));
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let (url, server) = serve_once("503 Service Unavailable", "maintenance").await;
        let transport = HttpTransport::new();

        let response = transport.post_form(&url, fields()).await.unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
        assert_eq!(response.body, "maintenance");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_failure() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new();
        let err = transport
            .post_form(&format!("http://{addr}/exec"), fields())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Network(_)));
    }
}
