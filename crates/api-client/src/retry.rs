use std::time::Duration;

use tracing::warn;

use crate::error::ClientError;

/// Retry behaviour for POST requests against flaky backends. One attempt
/// per delay entry, plus the initial try.
pub struct RetryConfig {
    pub delays: Vec<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            delays: vec![1, 2, 4],
        }
    }
}

/// Retry a form-encoded POST with backoff.
///
/// Retries on network errors and 5xx responses. Returns immediately on
/// success or 4xx (client errors won't get better by repeating them).
pub async fn retry_form_post(
    client: &reqwest::Client,
    url: &str,
    form: &[(&str, &str)],
    config: &RetryConfig,
) -> Result<reqwest::Response, ClientError> {
    let max_attempts = config.delays.len() + 1;
    let mut attempt = 0;

    loop {
        match client.post(url).form(form).send().await {
            Ok(resp) if resp.status().is_server_error() && attempt < config.delays.len() => {
                warn!(
                    "POST attempt {}/{} failed (HTTP {}), retrying in {}s",
                    attempt + 1,
                    max_attempts,
                    resp.status(),
                    config.delays[attempt],
                );
                tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
            }
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < config.delays.len() => {
                warn!(
                    "POST attempt {}/{} failed ({}), retrying in {}s",
                    attempt + 1,
                    max_attempts,
                    e,
                    config.delays[attempt],
                );
                tokio::time::sleep(Duration::from_secs(config.delays[attempt])).await;
            }
            Err(e) => return Err(ClientError::Transport(e)),
        }
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn serve_sequence(statuses: &'static [&'static str]) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            for status in statuses {
                let (mut sock, _) = listener.accept().await.expect("accept");
                let mut buf = [0u8; 4096];
                let _ = sock.read(&mut buf).await;
                let body = "{}";
                let resp = format!(
                    "{status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len(),
                );
                sock.write_all(resp.as_bytes()).await.expect("write");
            }
        });
        addr
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_success() {
        let addr =
            serve_sequence(&["HTTP/1.1 500 Internal Server Error", "HTTP/1.1 200 OK"]).await;
        let client = reqwest::Client::new();
        let config = RetryConfig { delays: vec![0, 0] };
        let resp = retry_form_post(&client, &format!("http://{addr}/api/x"), &[("a", "b")], &config)
            .await
            .expect("response");
        assert!(resp.status().is_success());
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let addr = serve_sequence(&["HTTP/1.1 400 Bad Request"]).await;
        let client = reqwest::Client::new();
        let config = RetryConfig { delays: vec![0] };
        let resp = retry_form_post(&client, &format!("http://{addr}/api/x"), &[("a", "b")], &config)
            .await
            .expect("response");
        assert_eq!(resp.status().as_u16(), 400);
    }
}
