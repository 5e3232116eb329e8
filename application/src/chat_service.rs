use domain::conversation::Conversation;
use infrastructure::gemini::{ApiResponse, GeminiClient, GeminiError};
use infrastructure::http_client::HttpClient;

/// Shown instead of partial text when generation stops at the output cap.
pub const TRUNCATION_NOTICE: &str =
    "The response was cut off because the model hit its output token limit. \
     Try a shorter question or ask for a more compact answer.";

const FINISH_REASON_MAX_TOKENS: &str = "MAX_TOKENS";

/// Run one chat turn: append the user message, replay the whole conversation
/// to the API, and append whatever comes back as the assistant turn.
///
/// Never fails. Transport and response-shape problems are downgraded to a
/// diagnostic assistant message so the session stays usable.
pub async fn handle_turn<T: HttpClient>(
    client: &GeminiClient<T>,
    conversation: &mut Conversation,
    model: &str,
    user_text: &str,
) -> String {
    conversation.push_user(user_text.to_string());

    let reply = match client.generate(model, conversation.turns()).await {
        Ok(response) => extract_reply(&response),
        Err(err) => transport_reply(&err),
    };

    conversation.push_assistant(reply.clone());
    reply
}

fn transport_reply(err: &GeminiError) -> String {
    format!("Error: the API request failed: {err}")
}

/// Walk the response shape in a fixed order: no candidates, then the
/// truncation marker (which wins even when partial text is present), then
/// the first part's text. Anything else is an unexpected format.
fn extract_reply(response: &ApiResponse) -> String {
    let Some(candidate) = response.parsed.candidates.first() else {
        return format!(
            "Error: no candidates found in the API response. Details: {}",
            response.body
        );
    };

    if candidate.finish_reason.as_deref() == Some(FINISH_REASON_MAX_TOKENS) {
        return TRUNCATION_NOTICE.to_string();
    }

    candidate
        .content
        .as_ref()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .unwrap_or_else(|| {
            format!(
                "Error: unexpected API response format. Details: {}",
                response.body
            )
        })
}
