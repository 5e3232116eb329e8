use reqwest::header::HeaderMap;
use std::time::Duration;
use std::{future::Future, pin::Pin};

/// Upper bound on one API round trip. There is no retry; this is the only
/// limit on worst-case latency.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A trait that represents an HTTP client for making requests to the
/// generative-language API. This abstraction enables real HTTP requests
/// while also supporting mock implementations for testing.
pub trait HttpClient: Send + Sync {
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl Default for ReqwestClient {
    fn default() -> Self {
        ReqwestClient {
            client: reqwest::Client::new(),
        }
    }
}

impl HttpClient for ReqwestClient {
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .post(url)
                .headers(headers)
                .json(&body)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await
        })
    }
}

/// Test double that answers every request with a canned status and body.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    status: u16,
    body: String,
}

impl MockHttpClient {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl HttpClient for MockHttpClient {
    #[allow(unused_variables)]
    fn post_json<'a, T: serde::Serialize + Send + Sync>(
        &'a self,
        url: &'a str,
        headers: HeaderMap,
        body: &'a T,
    ) -> Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send + 'a>> {
        let status = self.status;
        let canned = self.body.clone();
        Box::pin(async move {
            let http_response = http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(bytes::Bytes::from(canned))
                .unwrap();

            Ok(reqwest::Response::from(http_response))
        })
    }
}
