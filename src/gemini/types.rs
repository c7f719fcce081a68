use serde::{Deserialize, Serialize};

/// One entry in a Gemini conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: ContentRole,
    pub parts: Vec<Part>,
}

/// Conversation role as the API names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRole {
    User,
    Model,
}

/// Text fragment within a content entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Request body for the `generateContent` endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// System instruction attached to a request
#[derive(Debug, Clone, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<Part>,
}

/// Generation options (only the subset this crate uses)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response body from the `generateContent` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

/// Candidate content (role is echoed back but unused here)
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user-authored entry
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ContentRole::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a model-authored entry
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ContentRole::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl GenerateRequest {
    /// Create a request from an ordered message list
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Create a single-turn request from one prompt string
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Content::user(prompt)])
    }

    /// Attach a system instruction
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(SystemInstruction {
            parts: vec![Part {
                text: instruction.into(),
            }],
        });
        self
    }

    /// Require the reply to be syntactically valid JSON
    pub fn with_json_output(mut self) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .response_mime_type = Some("application/json".to_string());
        self
    }

    /// Set sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.generation_config
            .get_or_insert_with(GenerationConfig::default)
            .temperature = Some(temperature);
        self
    }
}

impl GenerateResponse {
    /// Text of the first candidate, if the response carried one
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_builders() {
        let user = Content::user("hello");
        assert_eq!(user.role, ContentRole::User);
        assert_eq!(user.text(), "hello");

        let model = Content::model("hi there");
        assert_eq!(model.role, ContentRole::Model);
        assert_eq!(model.text(), "hi there");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateRequest::from_prompt("prompt")
            .with_system("system")
            .with_json_output();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn test_request_omits_absent_options() {
        let request = GenerateRequest::from_prompt("prompt");
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("systemInstruction").is_none());
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_first_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "a"}, {"text": "b"}]}
            }]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("ab".to_string()));
    }

    #[test]
    fn test_first_text_missing_candidates() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(response.first_text(), None);
    }
}
