use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::prompt_builder::RequestPart;
use crate::engine::schema::canvas_schema;
use crate::error::CanvasError;
use crate::ui::settings::AppSettings;

pub const SYSTEM_INSTRUCTION: &str = "Responda em formato JSON compatível com o schema. Seja conciso, técnico e criativo. Formato estilo 'Bullet points' curtos e diretos.";

/// Anything that can turn request parts into raw model text.
pub trait ContentGenerator {
    fn generate(&self, parts: &[RequestPart]) -> Result<String, CanvasError>;
}

/* =========================
   Wire types
   ========================= */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub system_instruction: SystemInstruction,
    pub generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
pub struct Content<'a> {
    pub parts: &'a [RequestPart],
}

#[derive(Serialize)]
pub struct SystemInstruction {
    pub parts: Vec<RequestPart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig<'a> {
    pub response_mime_type: &'static str,
    pub response_schema: &'a Value,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn new(parts: &'a [RequestPart]) -> Self {
        Self {
            contents: vec![Content { parts }],
            system_instruction: SystemInstruction {
                parts: vec![RequestPart::Text(SYSTEM_INSTRUCTION.to_string())],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: canvas_schema(),
            },
        }
    }
}

#[derive(Deserialize, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Text of the first candidate, or `Generation` if there is none.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, CanvasError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(CanvasError::Generation("model returned no text".into()));
    }

    Ok(text)
}

/* =========================
   Gemini client
   ========================= */

pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key().map(str::to_string),
            model: settings.model.clone(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn key(&self) -> Result<&str, CanvasError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| CanvasError::Generation("no API key configured".into()))
    }

    pub fn test_connection(&self) -> Result<String> {
        let resp: Value = self
            .http
            .get(format!("{}/v1beta/models", self.base_url))
            .header("x-goog-api-key", self.key()?)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(format!(
            "Conectado ({} modelos disponíveis)",
            resp["models"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }
}

impl ContentGenerator for GeminiClient {
    fn generate(&self, parts: &[RequestPart]) -> Result<String, CanvasError> {
        let key = self.key()?;
        let body = GenerateContentRequest::new(parts);

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .map_err(|e| CanvasError::Generation(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(CanvasError::Generation(format!(
                "HTTP {status}: {}",
                snippet(&text)
            )));
        }

        let envelope: GenerateContentResponse = resp
            .json()
            .map_err(|e| CanvasError::Generation(format!("unreadable response: {e}")))?;

        extract_text(envelope)
    }
}

fn snippet(text: &str) -> String {
    const MAX: usize = 300;
    match text.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}…", &text[..i]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_declares_json_schema() {
        let parts = vec![RequestPart::Text("oi".into())];
        let body = serde_json::to_value(GenerateContentRequest::new(&parts)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "oi");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
    }

    #[test]
    fn extracts_concatenated_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn empty_candidates_are_a_generation_error() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(CanvasError::Generation(_))
        ));
    }

    #[test]
    fn blank_text_is_a_generation_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert!(matches!(
            extract_text(response),
            Err(CanvasError::Generation(_))
        ));
    }

    #[test]
    fn missing_key_fails_before_network() {
        let client = GeminiClient::from_settings(&AppSettings {
            api_key: None,
            api_base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();

        match client.generate(&[RequestPart::Text("x".into())]) {
            Err(CanvasError::Generation(msg)) => assert!(msg.contains("API key")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let client = GeminiClient::from_settings(&AppSettings {
            api_base_url: "https://example.test/".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "é".repeat(400);
        let short = snippet(&long);
        assert_eq!(short.chars().count(), 301);
        assert_eq!(snippet("ok"), "ok");
    }
}
