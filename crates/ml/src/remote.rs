use std::time::Duration;

use moodlog_core::Sentiment;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/tabularisai/multilingual-sentiment-analysis";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(6);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote model answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("remote model returned no labels")]
    Empty,
    #[error("unrecognised remote label `{0}`")]
    UnknownLabel(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoteVote {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    #[serde(default)]
    score: f32,
}

// The inference API wraps the scores in an extra list for single inputs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassificationResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            Self::Nested(rows) => rows.into_iter().flatten().collect(),
            Self::Flat(scores) => scores,
        }
    }
}

/// Client for a hosted text-classification model.
#[derive(Debug, Clone)]
pub struct RemoteSentimentClient {
    http: reqwest::Client,
    url: String,
    api_token: String,
}

impl RemoteSentimentClient {
    pub fn new(url: impl Into<String>, api_token: impl Into<String>) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
            api_token: api_token.into(),
        })
    }

    pub async fn classify(&self, text: &str) -> Result<RemoteVote, RemoteError> {
        let response = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .json(&json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ClassificationResponse = response.json().await?;
        let top = parsed
            .into_scores()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(RemoteError::Empty)?;

        let sentiment =
            map_remote_label(&top.label).ok_or_else(|| RemoteError::UnknownLabel(top.label.clone()))?;

        Ok(RemoteVote {
            sentiment,
            confidence: top.score,
            label: top.label,
        })
    }
}

/// Maps a model label ("Very Positive", "LABEL_0", "nötr", ...) onto a sentiment.
pub fn map_remote_label(label: &str) -> Option<Sentiment> {
    let label = label.trim().to_lowercase();

    if label.contains("positive") || label.contains("pozitif") || matches!(label.as_str(), "pos" | "1" | "label_1") {
        Some(Sentiment::Positive)
    } else if label.contains("negative") || label.contains("negatif") || matches!(label.as_str(), "neg" | "0" | "label_0") {
        Some(Sentiment::Negative)
    } else if label.contains("neutral") || label.contains("nötr") || matches!(label.as_str(), "2" | "label_2") {
        Some(Sentiment::Neutral)
    } else {
        None
    }
}
