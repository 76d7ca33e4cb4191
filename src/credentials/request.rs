use reqwest::{Client, Method};

use super::CredentialsError;

/// A fully described metadata request: method, URL, and headers.
///
/// Strategies build these as plain data and hand them to `send`, the single
/// transport path. This keeps the token-then-request sequencing of the
/// secured flow visible as values rather than scattered client calls.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    method: Method,
    url: String,
    headers: Vec<(&'static str, String)>,
}

impl RequestSpec {
    pub(crate) fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub(crate) fn put(url: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub(crate) fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    /// Execute the request and return the response body.
    ///
    /// A transport error or non-2xx status is an error; the response is
    /// consumed or dropped on every path so the connection is released.
    pub(crate) async fn send(&self, client: &Client) -> Result<String, CredentialsError> {
        let mut request = client.request(self.method.clone(), &self.url);
        for (name, value) in &self.headers {
            request = request.header(*name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|source| CredentialsError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CredentialsError::Status {
                url: self.url.clone(),
                status,
            });
        }

        response
            .text()
            .await
            .map_err(|source| CredentialsError::Transport {
                url: self.url.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/value"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        let client = Client::new();
        let body = RequestSpec::get(format!("{}/value", server.uri()))
            .send(&client)
            .await
            .unwrap();
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_send_attaches_headers() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/token"))
            .and(header("X-test-header", "present"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = Client::new();
        let body = RequestSpec::put(format!("{}/token", server.uri()))
            .header("X-test-header", "present")
            .send(&client)
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_send_rejects_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = Client::new();
        let result = RequestSpec::get(format!("{}/forbidden", server.uri()))
            .send(&client)
            .await;
        match result {
            Err(CredentialsError::Status { status, .. }) => assert_eq!(status.as_u16(), 403),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_reports_transport_errors() {
        // Port 1 is never listening
        let client = Client::new();
        let result = RequestSpec::get("http://127.0.0.1:1/nope").send(&client).await;
        assert!(matches!(result, Err(CredentialsError::Transport { .. })));
    }
}
