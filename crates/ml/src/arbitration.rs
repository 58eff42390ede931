use moodlog_core::Sentiment;
use serde::Serialize;

use crate::remote::RemoteVote;

pub const DEFAULT_REMOTE_THRESHOLD: f32 = 0.5;

/// Which vote decides when the keyword tables and the remote model disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arbitration {
    /// A positive or negative keyword verdict stands; a neutral one defers
    /// to a confident remote vote.
    #[default]
    KeywordFirst,
    /// A confident remote vote replaces the keyword verdict.
    ModelFirst,
}

impl Arbitration {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "keyword_first" | "keyword" => Some(Self::KeywordFirst),
            "model_first" | "model" => Some(Self::ModelFirst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decider {
    Keyword,
    Remote,
    Agreement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArbitrationOutcome {
    pub sentiment: Sentiment,
    pub decided_by: Decider,
    /// The keyword verdict replaced a remote vote that said something else.
    pub keyword_override: bool,
}

pub fn arbitrate(
    keyword: Sentiment,
    remote: Option<&RemoteVote>,
    policy: Arbitration,
    threshold: f32,
) -> ArbitrationOutcome {
    let Some(remote) = remote else {
        return ArbitrationOutcome {
            sentiment: keyword,
            decided_by: Decider::Keyword,
            keyword_override: false,
        };
    };

    let confident = remote.confidence >= threshold;
    if remote.sentiment == keyword {
        return ArbitrationOutcome {
            sentiment: keyword,
            decided_by: if confident { Decider::Agreement } else { Decider::Keyword },
            keyword_override: false,
        };
    }

    let remote_decides = confident
        && match policy {
            Arbitration::ModelFirst => true,
            Arbitration::KeywordFirst => keyword == Sentiment::Neutral,
        };
    if remote_decides {
        ArbitrationOutcome {
            sentiment: remote.sentiment,
            decided_by: Decider::Remote,
            keyword_override: false,
        }
    } else {
        ArbitrationOutcome {
            sentiment: keyword,
            decided_by: Decider::Keyword,
            keyword_override: true,
        }
    }
}
