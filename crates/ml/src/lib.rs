mod arbitration;
mod remote;

use std::env;
use std::sync::Arc;

use moodlog_core::{
    detect_language, pick_suggestion, pick_summary, score_sentiment, Language, Sentiment,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

pub use arbitration::{arbitrate, Arbitration, ArbitrationOutcome, Decider, DEFAULT_REMOTE_THRESHOLD};
pub use remote::{map_remote_label, RemoteError, RemoteSentimentClient, RemoteVote, DEFAULT_MODEL_URL};

#[derive(Debug, Clone, Serialize)]
pub struct SentimentPrediction {
    pub sentiment: Sentiment,
    pub confidence: f32,
    pub model: &'static str,
}

pub trait SentimentClassifier: Send + Sync {
    fn predict(&self, text: &str) -> SentimentPrediction;
}

#[derive(Debug, Default)]
pub struct RuleSentimentClassifier;

impl SentimentClassifier for RuleSentimentClassifier {
    fn predict(&self, text: &str) -> SentimentPrediction {
        let verdict = score_sentiment(text);
        let confidence = if verdict.matched_phrase.is_some() {
            0.9
        } else {
            let margin = verdict.positive_hits.abs_diff(verdict.negative_hits) as f32;
            (0.5 + 0.1 * margin).min(0.85)
        };

        SentimentPrediction {
            sentiment: verdict.sentiment,
            confidence,
            model: "keyword-rules",
        }
    }
}

/// Settings for the analyzer stack, normally read from `MOOD_*` variables.
#[derive(Debug, Clone)]
pub struct MlConfig {
    pub hf_api_token: Option<String>,
    pub hf_api_url: String,
    pub remote_threshold: f32,
    pub arbitration: Arbitration,
}

impl Default for MlConfig {
    fn default() -> Self {
        Self {
            hf_api_token: None,
            hf_api_url: DEFAULT_MODEL_URL.to_string(),
            remote_threshold: DEFAULT_REMOTE_THRESHOLD,
            arbitration: Arbitration::default(),
        }
    }
}

impl MlConfig {
    pub fn from_env() -> Self {
        let hf_api_token = env::var("MOOD_HF_API_TOKEN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let hf_api_url = env::var("MOOD_HF_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());
        let remote_threshold = env::var("MOOD_REMOTE_THRESHOLD")
            .ok()
            .and_then(|value| value.parse::<f32>().ok())
            .filter(|value| (0.0..=1.0).contains(value))
            .unwrap_or(DEFAULT_REMOTE_THRESHOLD);
        let arbitration = env::var("MOOD_ARBITRATION")
            .ok()
            .and_then(|value| Arbitration::parse(&value))
            .unwrap_or_default();

        Self {
            hf_api_token,
            hf_api_url,
            remote_threshold,
            arbitration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifierTrace {
    pub keyword: SentimentPrediction,
    pub remote: Option<RemoteVote>,
    pub remote_error: Option<String>,
    pub arbitration: Arbitration,
    pub decided_by: Decider,
    pub keyword_override: bool,
}

impl ClassifierTrace {
    pub fn remote_attempted(&self) -> bool {
        self.remote.is_some() || self.remote_error.is_some()
    }

    pub fn remote_failed(&self) -> bool {
        self.remote_error.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodAnalysis {
    pub sentiment: Sentiment,
    pub summary: String,
    pub suggestion: String,
    pub language: Language,
    pub trace: ClassifierTrace,
}

#[derive(Clone)]
pub struct MoodMlStack {
    pub classifier: Arc<dyn SentimentClassifier>,
    pub remote: Option<Arc<RemoteSentimentClient>>,
    pub arbitration: Arbitration,
    pub remote_threshold: f32,
}

impl MoodMlStack {
    pub fn load_default() -> Self {
        Self::from_config(&MlConfig::from_env())
    }

    pub fn keyword_only() -> Self {
        Self::from_config(&MlConfig::default())
    }

    pub fn from_config(config: &MlConfig) -> Self {
        let remote = config.hf_api_token.as_ref().and_then(|token| {
            RemoteSentimentClient::new(config.hf_api_url.clone(), token.clone())
                .map(Arc::new)
                .map_err(|err| warn!(error = %err, "remote sentiment client unavailable"))
                .ok()
        });

        Self {
            classifier: Arc::new(RuleSentimentClassifier),
            remote,
            arbitration: config.arbitration,
            remote_threshold: config.remote_threshold,
        }
    }

    pub fn with_remote(mut self, client: RemoteSentimentClient) -> Self {
        self.remote = Some(Arc::new(client));
        self
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// Runs the full pipeline. Remote failures fall back to the keyword
    /// verdict, so this always produces a label.
    pub async fn analyze(&self, text: &str) -> MoodAnalysis {
        let keyword = self.classifier.predict(text);

        let (remote, remote_error) = match &self.remote {
            Some(client) => match client.classify(text).await {
                Ok(vote) => (Some(vote), None),
                Err(err) => {
                    warn!(error = %err, "remote sentiment vote failed, keeping keyword verdict");
                    (None, Some(err.to_string()))
                }
            },
            None => (None, None),
        };

        let outcome = arbitrate(
            keyword.sentiment,
            remote.as_ref(),
            self.arbitration,
            self.remote_threshold,
        );
        debug!(
            keyword = %keyword.sentiment,
            final_label = %outcome.sentiment,
            decided_by = ?outcome.decided_by,
            "sentiment arbitrated"
        );

        let language = detect_language(text);
        let (summary, suggestion) =
            compose_feedback(text, language, outcome.sentiment, &mut rand::thread_rng());

        MoodAnalysis {
            sentiment: outcome.sentiment,
            summary,
            suggestion,
            language,
            trace: ClassifierTrace {
                keyword,
                remote,
                remote_error,
                arbitration: self.arbitration,
                decided_by: outcome.decided_by,
                keyword_override: outcome.keyword_override,
            },
        }
    }
}

pub fn compose_feedback<R: Rng + ?Sized>(
    text: &str,
    language: Language,
    sentiment: Sentiment,
    rng: &mut R,
) -> (String, String) {
    (
        pick_summary(language, sentiment, rng).to_string(),
        pick_suggestion(text, language, sentiment, rng).to_string(),
    )
}
