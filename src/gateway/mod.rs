use crate::backend::GeminiClient;
use crate::backend::gemini::GenerationConfig;
use crate::config::Config;
use crate::core::error::ProjchatError;
use crate::workspace::Snapshot;
use async_trait::async_trait;

pub mod analysis;
pub mod context;

pub use analysis::{Analysis, AnalysisPayload, EntityRef, Kpi, ResultKind};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// The two call modes the session manager and front-end run against.
/// Conversational failures surface as `Err` so callers decide the wording;
/// structured analysis reports failures in-band as `Analysis::Error`.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    async fn chat_response(
        &self,
        query: &str,
        snapshot: &Snapshot<'_>,
    ) -> Result<String, ProjchatError>;

    async fn analyze_query(&self, query: &str, snapshot: &Snapshot<'_>) -> Analysis;
}

/// Translates (query, snapshot) into backend requests and typed results.
/// Owns its client handle; a missing credential fails construction instead
/// of the first call, so a broken deployment is visible at startup.
pub struct Gateway {
    client: GeminiClient,
}

impl Gateway {
    pub fn new(config: &Config) -> Result<Self, ProjchatError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ProjchatError::Config(
                "No API key configured; set GEMINI_API_KEY or api_key in the config file"
                    .to_string(),
            )
        })?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: GeminiClient::new(base_url, api_key, model),
        })
    }

    pub fn with_endpoint(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: GeminiClient::new(endpoint, api_key, model),
        }
    }

    async fn try_analyze(
        &self,
        query: &str,
        snapshot: &Snapshot<'_>,
    ) -> Result<Analysis, ProjchatError> {
        let data_context = context::format_context(snapshot)?;
        let system = ANALYSIS_SYSTEM_PROMPT.replace("{context}", &data_context);
        let generation = GenerationConfig::json_with_schema(analysis::analysis_schema());

        let raw = self
            .client
            .generate_content(&system, query, Some(generation))
            .await?;

        let payload: AnalysisPayload = serde_json::from_str(extract_json(&raw))?;
        Ok(payload.into_analysis())
    }
}

#[async_trait]
impl QueryGateway for Gateway {
    async fn chat_response(
        &self,
        query: &str,
        snapshot: &Snapshot<'_>,
    ) -> Result<String, ProjchatError> {
        let data_context = context::format_context(snapshot)?;
        let system = CHAT_SYSTEM_PROMPT.replace("{context}", &data_context);

        let text = self.client.generate_content(&system, query, None).await?;
        Ok(text.trim().to_string())
    }

    async fn analyze_query(&self, query: &str, snapshot: &Snapshot<'_>) -> Analysis {
        match self.try_analyze(query, snapshot).await {
            Ok(analysis) => analysis,
            Err(e) => Analysis::Error(format!("Query analysis failed: {}", e)),
        }
    }
}

/// Strip a Markdown code fence if the model wrapped its JSON in one.
/// Happens occasionally even with the JSON mime type requested.
fn extract_json(content: &str) -> &str {
    let content = content.trim();

    if let Some(start) = content.find("```") {
        let after = &content[start + 3..];
        let block = match after.find("```") {
            Some(end) => &after[..end],
            None => after,
        };
        // Drop the language specifier line if present
        let block = match block.find('\n') {
            Some(newline) => &block[newline + 1..],
            None => block,
        };
        return block.trim();
    }

    content
}

const CHAT_SYSTEM_PROMPT: &str = "You are a friendly and helpful project management assistant. \
Always answer in the same language as the user's question. Keep answers concise. \
Use the workspace data below as your background knowledge and do not invent records \
that are not in it.\n\n{context}";

const ANALYSIS_SYSTEM_PROMPT: &str = "Classify the user's question about the workspace data below \
and answer with JSON only, conforming to the provided schema. Pick exactly one resultType: \
PROJECTS when the question asks for a set of projects (fill `projects` with their ids); \
ACTIVITIES when it asks for a set of activities (fill `activities` with their ids); \
SUMMARY when it asks for a narrative overview (fill `summary`, in the language of the question); \
KPIS when it asks for figures or metrics (fill `kpis` with title/value pairs); \
ERROR when the question cannot be answered from the data (fill `error` with a short reason).\n\n{context}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_passes_plain_json_through() {
        assert_eq!(extract_json(" {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn extract_json_strips_fence_with_language() {
        assert_eq!(
            extract_json("```json\n{\"resultType\":\"SUMMARY\"}\n```"),
            "{\"resultType\":\"SUMMARY\"}"
        );
    }

    #[test]
    fn extract_json_strips_bare_fence() {
        assert_eq!(extract_json("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn prompts_embed_the_data_context() {
        assert!(CHAT_SYSTEM_PROMPT.contains("{context}"));
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("{context}"));
    }
}
