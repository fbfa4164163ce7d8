use crate::backend::HttpClient;
use crate::core::error::ProjchatError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContentPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct GeminiContentPart {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<GeminiPart>,
}

/// Decoding constraints for structured-output calls.
#[derive(Debug, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    pub fn json_with_schema(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}

#[derive(Debug, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        let mut client = HttpClient::new(base_url);
        client.add_query_param("key", api_key);
        Self { client, model }
    }

    /// One request, one generated text. No retries and no local timeout;
    /// whatever the transport enforces is the effective deadline.
    pub async fn generate_content(
        &self,
        system_instruction: &str,
        user_text: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, ProjchatError> {
        let payload = GeminiRequest {
            contents: vec![GeminiContentPart {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: user_text.to_string(),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![GeminiPart {
                    text: system_instruction.to_string(),
                }],
            }),
            generation_config,
        };

        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let response_body: String = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            ProjchatError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        if let Some(candidate) = parsed.candidates.first() {
            if let Some(part) = candidate.content.parts.first() {
                return Ok(part.text.clone());
            }
        }

        Err(ProjchatError::Api(
            "No valid response from Gemini".to_string(),
        ))
    }
}
