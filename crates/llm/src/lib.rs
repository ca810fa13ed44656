//! Model-backed classifier and summarizer talking to a local Ollama server.
//!
//! Both capabilities share one blocking HTTP client built at startup.  A
//! request either yields usable text or fails; error bodies are never
//! passed back as if they were model output.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::json;

use mood_journal::{Classification, Classifier, Summarizer};

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single non-streaming `/api/generate` call.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = format!("{}/api/generate", self.base_url);
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false
        });

        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .with_context(|| {
                format!(
                    "Ollama unavailable at {}. Start Ollama and ensure model '{}' is installed",
                    self.base_url, self.model
                )
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().context("decoding Ollama response")?;
        if !status.is_success() {
            bail!("Ollama error ({status}): {body}");
        }

        body.get("response")
            .and_then(|value| value.as_str())
            .map(ToString::to_string)
            .ok_or_else(|| anyhow!("Ollama response missing text: {body}"))
    }
}

// ── Classification ───────────────────────────────────────────────────────────

/// Shape the classifier prompt asks the model to reply with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReply {
    pub sentiment: String,
    pub sentiment_score: f64,
    pub emotion: String,
    pub emotion_score: f64,
}

pub fn classification_prompt(text: &str) -> String {
    format!(
        "Classify the journal entry below.\n\
         Reply with only a JSON object of the form \
         {{\"sentiment\": \"POSITIVE\" or \"NEGATIVE\", \"sentiment_score\": 0.0-1.0, \
         \"emotion\": one of joy, sadness, anger, fear, surprise, disgust, neutral, \
         \"emotion_score\": 0.0-1.0}}.\n\n\
         Entry:\n{text}"
    )
}

/// Decode a classifier reply, normalising label case.
pub fn parse_classification(response: &str) -> Result<Classification> {
    let reply: ClassificationReply = extract_json_output(response)
        .ok_or_else(|| anyhow!("model reply contained no classification JSON"))?;
    if reply.emotion.trim().is_empty() || reply.sentiment.trim().is_empty() {
        bail!("model reply has an empty label");
    }
    Ok(Classification {
        sentiment_label: reply.sentiment.trim().to_uppercase(),
        sentiment_score: reply.sentiment_score,
        emotion_label: reply.emotion.trim().to_lowercase(),
        emotion_score: reply.emotion_score,
    })
}

#[derive(Debug, Clone)]
pub struct OllamaClassifier {
    client: OllamaClient,
}

impl OllamaClassifier {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

impl Classifier for OllamaClassifier {
    fn analyze(&self, text: &str) -> Result<Classification> {
        let raw = self.client.generate(&classification_prompt(text))?;
        tracing::debug!(model = self.client.model(), reply_chars = raw.len(), "classification reply");
        parse_classification(&raw)
    }
}

// ── Summarization ────────────────────────────────────────────────────────────

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize these personal journal entries in two or three sentences, \
         written in the second person. Reply with the summary only.\n\n{text}"
    )
}

#[derive(Debug, Clone)]
pub struct OllamaSummarizer {
    client: OllamaClient,
}

impl OllamaSummarizer {
    pub fn new(client: OllamaClient) -> Self {
        Self { client }
    }
}

impl Summarizer for OllamaSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        let summary = self.client.generate(&summary_prompt(text))?;
        let summary = summary.trim();
        if summary.is_empty() {
            bail!("model returned an empty summary");
        }
        Ok(summary.to_string())
    }
}

// ── Structured output extraction ──────────────────────────────────────────────

/// Decode the JSON object a model reply carries.
///
/// A ` ```json ` fenced block is preferred; otherwise the outermost
/// `{ ... }` span of the reply is tried.  `None` when neither decodes.
pub fn extract_json_output<T: serde::de::DeserializeOwned>(response: &str) -> Option<T> {
    fenced_json(response)
        .and_then(|body| serde_json::from_str(body).ok())
        .or_else(|| outer_braces(response).and_then(|span| serde_json::from_str(span).ok()))
}

fn fenced_json(response: &str) -> Option<&str> {
    let (_, after) = response.split_once("```json")?;
    let (body, _) = after.split_once("```")?;
    Some(body.trim())
}

fn outer_braces(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

// ── Tests ────────────────────────────────────────────────────────────────────
