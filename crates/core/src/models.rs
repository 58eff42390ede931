use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "positive" | "pozitif" => Some(Self::Positive),
            "neutral" | "nötr" | "notr" => Some(Self::Neutral),
            "negative" | "negatif" => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn from_optional_str(value: Option<&str>) -> Option<Self> {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "tr" || v == "tr-tr" || v == "turkish" || v == "türkçe" => {
                Some(Self::Tr)
            }
            Some(v) if v == "en" || v == "en-us" || v == "english" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

/// Stored account. The credential hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggestion: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDraft {
    pub content: String,
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPatch {
    pub content: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub summary: Option<String>,
    pub suggestion: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.sentiment.is_none()
            && self.summary.is_none()
            && self.suggestion.is_none()
    }

    pub fn apply(&self, entry: &mut EntryRecord, now: DateTime<Utc>) {
        if let Some(content) = &self.content {
            entry.content = content.clone();
        }
        if let Some(sentiment) = self.sentiment {
            entry.sentiment = sentiment;
        }
        if let Some(summary) = &self.summary {
            entry.summary = summary.clone();
        }
        if let Some(suggestion) = &self.suggestion {
            entry.suggestion = suggestion.clone();
        }
        entry.updated_at = now;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_entries: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub dominant_sentiment: Sentiment,
    pub start_date: String,
    pub end_date: String,
}
