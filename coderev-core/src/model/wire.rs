//! Wire types for the OpenAI-compatible chat-completions endpoint

use serde::{Deserialize, Serialize};

/// Chat completion request body
#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub response_format: ResponseFormat,
    pub stream: bool,
}

/// One chat message
#[derive(Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Constrains the response to a single JSON object
#[derive(Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

/// Chat completion response body
#[derive(Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One response choice
#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatResponseMessage>,
}

/// Message payload of a choice
#[derive(Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Extract the content of the first choice, if any
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "llama3-8b",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "instructions",
                },
                ChatMessage {
                    role: "user",
                    content: "code",
                },
            ],
            temperature: 0.2,
            response_format: ResponseFormat::json_object(),
            stream: false,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("llama3-8b"));
        assert!(json.contains(r#""role":"system""#));
        assert!(json.contains(r#""response_format":{"type":"json_object"}"#));
        assert!(json.contains(r#""stream":false"#));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"choices": [{"message": {"content": "{\"summary\":\"ok\"}"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.into_content(),
            Some(r#"{"summary":"ok"}"#.to_string())
        );
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_content(), None);
    }

    #[test]
    fn test_response_with_null_content() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_content(), None);
    }
}
