use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::NluSection;
use crate::error::{DialogueError, Result};
use crate::nlu::NluInterpretation;

const API_VERSION: &str = "2024-11-15-preview";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const ANALYZE_PATH: &str = "/language/:analyze-conversations";

/// Client for a conversational language understanding service.
#[derive(Clone)]
pub struct NluClient {
    client: Client,
    endpoint: String,
    api_key: String,
    project_name: String,
    deployment_name: String,
    language: String,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    result: AnalyzeResult,
}

#[derive(Deserialize)]
struct AnalyzeResult {
    prediction: NluInterpretation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeParameters<'a> {
    project_name: &'a str,
    deployment_name: &'a str,
    string_index_type: &'a str,
}

/// Resource base URL. A full analyze URL is cut back to its base.
fn base_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    let base = match endpoint.find(ANALYZE_PATH) {
        Some(index) => &endpoint[..index],
        None => endpoint,
    };
    base.trim_end_matches('/').to_string()
}

impl NluClient {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        project_name: &str,
        deployment_name: &str,
        language: &str,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_default(),
            endpoint: base_url(endpoint),
            api_key: api_key.to_string(),
            project_name: project_name.to_string(),
            deployment_name: deployment_name.to_string(),
            language: language.to_string(),
        }
    }

    /// Build from config, reading the key from the configured env var.
    /// Returns `Ok(None)` when no endpoint is configured.
    pub fn from_config(section: &NluSection) -> Result<Option<Self>> {
        if !section.is_enabled() {
            return Ok(None);
        }
        let key = std::env::var(&section.api_key_env).map_err(|_| {
            DialogueError::Config(format!("NLU key variable {} is not set", section.api_key_env))
        })?;
        Ok(Some(Self::new(
            &section.endpoint,
            &key,
            &section.project_name,
            &section.deployment_name,
            &section.language,
        )))
    }

    fn analyze_url(&self) -> String {
        format!("{}{}?api-version={}", self.endpoint, ANALYZE_PATH, API_VERSION)
    }

    fn request_body(&self, utterance: &str) -> serde_json::Value {
        json!({
            "kind": "Conversation",
            "analysisInput": {
                "conversationItem": {
                    "id": "1",
                    "participantId": "1",
                    "modality": "text",
                    "language": self.language,
                    "text": utterance,
                }
            },
            "parameters": AnalyzeParameters {
                project_name: &self.project_name,
                deployment_name: &self.deployment_name,
                string_index_type: "TextElement_V8",
            },
        })
    }

    pub async fn analyze(&self, utterance: &str) -> Result<NluInterpretation> {
        let response = self
            .client
            .post(self.analyze_url())
            .header(KEY_HEADER, &self.api_key)
            .json(&self.request_body(utterance))
            .send()
            .await
            .map_err(|e| DialogueError::Nlu(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DialogueError::Nlu(format!("NLU server error: {}", response.status())));
        }

        let body: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| DialogueError::Nlu(e.to_string()))?;
        Ok(body.result.prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> NluClient {
        NluClient::new(endpoint, "key", "appointment", "production", "en-US")
    }

    #[test]
    fn test_analyze_url_from_base_or_full_endpoint() {
        let base = "https://parley.cognitiveservices.azure.com";
        let expected = format!("{}{}?api-version={}", base, ANALYZE_PATH, API_VERSION);

        assert_eq!(client(base).analyze_url(), expected);
        assert_eq!(client(&format!("{}/", base)).analyze_url(), expected);

        let pasted = format!("{}{}?api-version=2022-10-01-preview", base, ANALYZE_PATH);
        assert_eq!(client(&pasted).analyze_url(), expected);
    }

    #[test]
    fn test_request_body_shape() {
        let body = client("https://parley.example").request_body("who is taylor");

        assert_eq!(body["kind"], "Conversation");
        let item = &body["analysisInput"]["conversationItem"];
        assert_eq!(item["text"], "who is taylor");
        assert_eq!(item["language"], "en-US");
        assert_eq!(item["modality"], "text");
        assert_eq!(body["parameters"]["projectName"], "appointment");
        assert_eq!(body["parameters"]["deploymentName"], "production");
        assert_eq!(body["parameters"]["stringIndexType"], "TextElement_V8");
    }

    #[test]
    fn test_decode_prediction() {
        let raw = r#"{
            "kind": "ConversationResult",
            "result": {
                "query": "who is taylor swift",
                "prediction": {
                    "projectKind": "Conversation",
                    "topIntent": "who_is_X",
                    "intents": [
                        { "category": "who_is_X", "confidenceScore": 0.93 },
                        { "category": "createMeeting", "confidenceScore": 0.05 }
                    ],
                    "entities": [
                        {
                            "category": "person",
                            "text": "taylor swift",
                            "offset": 7,
                            "length": 12,
                            "confidenceScore": 1
                        }
                    ]
                }
            }
        }"#;

        let response: AnalyzeResponse = serde_json::from_str(raw).unwrap();
        let prediction = response.result.prediction;
        assert_eq!(prediction.top_intent, "who_is_X");
        assert_eq!(prediction.intents.len(), 2);
        assert_eq!(prediction.entities[0].category, "person");
        assert_eq!(prediction.entities[0].text, "taylor swift");
        assert_eq!(prediction.entities[0].offset, 7);
        assert_eq!(prediction.entities[0].length, 12);
    }
}
