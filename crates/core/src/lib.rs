pub mod i18n;
pub mod language;
pub mod lexicon;
pub mod models;
pub mod sentiment;
pub mod templates;
pub mod text;
pub mod weekly;

pub use i18n::{Palette, Theme, Translator, UiConfig};
pub use language::detect_language;
pub use models::*;
pub use sentiment::{classify_sentiment_rules, score_sentiment, KeywordVerdict};
pub use templates::{pick_suggestion, pick_summary};
pub use text::TextView;
pub use weekly::{dominant_sentiment, summarize_week, weekly_window_start, WEEKLY_WINDOW_DAYS};
