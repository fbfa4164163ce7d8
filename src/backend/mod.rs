use crate::core::error::ProjchatError;
use reqwest::{Client, Response};
use serde::Serialize;

pub mod gemini;

pub use gemini::GeminiClient;

/// Thin JSON-POST client shared by backend wire clients. Query parameters
/// are carried here because the Gemini API authenticates via a `key` query
/// parameter rather than an Authorization header.
#[derive(Clone)]
pub struct HttpClient {
    endpoint: String,
    query_params: Vec<(String, String)>,
    client: Client,
}

impl HttpClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            query_params: Vec::new(),
            client: Client::new(),
        }
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query_params.push((key.to_string(), value));
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, ProjchatError> {
        let url = format!("{}/{}", self.endpoint, path);

        let response = self
            .client
            .post(&url)
            .query(&self.query_params)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProjchatError::Api(format!(
                "Backend returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        Ok(response)
    }
}
