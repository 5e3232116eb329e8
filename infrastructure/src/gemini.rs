use domain::conversation::{Role, Turn};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::{HttpClient, ReqwestClient};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.8;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("the request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("the API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("the response body was not valid JSON: {0}")]
    InvalidJson(String),
    #[error("the API key contains characters that cannot be sent in a header")]
    InvalidCredential,
}

impl From<reqwest::Error> for GeminiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            GeminiError::Timeout
        } else {
            GeminiError::Network(error.to_string())
        }
    }
}

/// One piece of a message. Requests always carry text; response parts may
/// hold other payloads, so the field stays optional on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn from_turns(turns: &[Turn]) -> Self {
        Self {
            contents: to_wire_contents(turns),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub finish_reason: Option<String>,
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// The API names the assistant side "model".
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

pub fn to_wire_contents(turns: &[Turn]) -> Vec<Content> {
    turns
        .iter()
        .map(|turn| Content {
            role: wire_role(turn.role).to_string(),
            parts: vec![Part {
                text: Some(turn.content.clone()),
            }],
        })
        .collect()
}

/// A successful round trip: the parsed response plus the raw body, which
/// diagnostic messages embed verbatim.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub body: String,
    pub parsed: GenerateContentResponse,
}

pub struct GeminiClient<T: HttpClient = ReqwestClient> {
    http: T,
    api_key: String,
    api_base: String,
}

impl GeminiClient<ReqwestClient> {
    pub fn new(api_key: String, api_base: String) -> Self {
        Self::with_http(ReqwestClient::default(), api_key, api_base)
    }
}

impl<T: HttpClient> GeminiClient<T> {
    pub fn with_http(http: T, api_key: String, api_base: String) -> Self {
        Self {
            http,
            api_key,
            api_base,
        }
    }

    /// Send the whole conversation to `models/{model}:generateContent` and
    /// return the body once it parses as JSON. The key travels only in the
    /// `x-goog-api-key` header, never in the URL.
    pub async fn generate(&self, model: &str, turns: &[Turn]) -> Result<ApiResponse, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        let request = GenerateContentRequest::from_turns(turns);

        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|_| GeminiError::InvalidCredential)?,
        );

        let response = self.http.post_json(&url, headers, &request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = serde_json::from_str(&body)
            .map_err(|_| GeminiError::InvalidJson(body.clone()))?;

        Ok(ApiResponse { body, parsed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::MockHttpClient;
    use serde_json::json;

    fn sample_turns() -> Vec<Turn> {
        vec![
            Turn {
                role: Role::User,
                content: "hi".into(),
            },
            Turn {
                role: Role::Assistant,
                content: "hello".into(),
            },
            Turn {
                role: Role::User,
                content: "how are you?".into(),
            },
        ]
    }

    #[test]
    fn assistant_turns_become_model_role() {
        let contents = to_wire_contents(&sample_turns());
        let roles: Vec<&str> = contents.iter().map(|c| c.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert!(contents.iter().all(|c| c.parts.len() == 1));
    }

    #[test]
    fn request_body_matches_wire_format() {
        let request = GenerateContentRequest::from_turns(&sample_turns()[..1]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]}
                ],
                "generationConfig": {"temperature": 0.7, "topP": 0.8}
            })
        );
    }

    #[tokio::test]
    async fn generate_parses_successful_body() {
        let body = json!({
            "candidates": [
                {"content": {"parts": [{"text": "hello"}]}}
            ]
        })
        .to_string();
        let client =
            GeminiClient::with_http(MockHttpClient::new(body.clone()), "key".into(), "b".into());

        let response = client.generate("gemini-2.5-flash", &[]).await.unwrap();
        assert_eq!(response.body, body);
        assert_eq!(response.parsed.candidates.len(), 1);
        let candidate = &response.parsed.candidates[0];
        assert_eq!(
            candidate.content.as_ref().unwrap().parts[0].text.as_deref(),
            Some("hello")
        );
    }

    #[tokio::test]
    async fn generate_surfaces_http_errors() {
        let client = GeminiClient::with_http(
            MockHttpClient::with_status(500, "boom"),
            "key".into(),
            "b".into(),
        );

        let err = client.generate("gemini-2.5-flash", &[]).await.unwrap_err();
        match err {
            GeminiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_rejects_non_json_bodies() {
        let client = GeminiClient::with_http(
            MockHttpClient::new("<html>not json</html>"),
            "key".into(),
            "b".into(),
        );

        let err = client.generate("gemini-2.5-flash", &[]).await.unwrap_err();
        assert!(matches!(err, GeminiError::InvalidJson(body) if body.contains("not json")));
    }
}
