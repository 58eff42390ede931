use chrono::{DateTime, Duration, Utc};

use crate::models::{EntryRecord, Sentiment, WeeklySummary};

pub const WEEKLY_WINDOW_DAYS: i64 = 7;

pub fn weekly_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WEEKLY_WINDOW_DAYS)
}

/// Rolls up the entries created inside the trailing week ending at `now`.
/// Entries outside the window are ignored, so callers may pass a superset.
pub fn summarize_week(entries: &[EntryRecord], now: DateTime<Utc>) -> WeeklySummary {
    let start = weekly_window_start(now);
    let (mut positive, mut neutral, mut negative) = (0_usize, 0_usize, 0_usize);

    for entry in entries.iter().filter(|entry| entry.created_at >= start) {
        match entry.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Neutral => neutral += 1,
            Sentiment::Negative => negative += 1,
        }
    }

    WeeklySummary {
        total_entries: positive + neutral + negative,
        positive,
        neutral,
        negative,
        dominant_sentiment: dominant_sentiment(positive, neutral, negative),
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: now.format("%Y-%m-%d").to_string(),
    }
}

/// The label with a strictly greater count than both others; anything else
/// (ties, no entries) is neutral.
pub fn dominant_sentiment(positive: usize, neutral: usize, negative: usize) -> Sentiment {
    if positive > neutral && positive > negative {
        Sentiment::Positive
    } else if negative > positive && negative > neutral {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(id: i64, sentiment: Sentiment, created_at: DateTime<Utc>) -> EntryRecord {
        EntryRecord {
            id,
            user_id: 1,
            content: format!("entry {id}"),
            sentiment,
            summary: String::new(),
            suggestion: String::new(),
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn counts_only_the_trailing_week() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let entries = vec![
            entry(1, Sentiment::Positive, now - Duration::hours(1)),
            entry(2, Sentiment::Positive, now - Duration::days(2)),
            entry(3, Sentiment::Negative, now - Duration::days(6)),
            entry(4, Sentiment::Negative, now - Duration::days(8)),
            entry(5, Sentiment::Negative, now - Duration::days(30)),
        ];

        let summary = summarize_week(&entries, now);
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 0);
        assert_eq!(summary.dominant_sentiment, Sentiment::Positive);
        assert_eq!(summary.start_date, "2024-03-08");
        assert_eq!(summary.end_date, "2024-03-15");
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let entries = vec![entry(1, Sentiment::Negative, weekly_window_start(now))];
        assert_eq!(summarize_week(&entries, now).total_entries, 1);
    }

    #[test]
    fn empty_week_is_neutral() {
        let now = Utc::now();
        let summary = summarize_week(&[], now);
        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.dominant_sentiment, Sentiment::Neutral);
    }

    #[test]
    fn ties_resolve_to_neutral() {
        assert_eq!(dominant_sentiment(2, 0, 2), Sentiment::Neutral);
        assert_eq!(dominant_sentiment(2, 2, 1), Sentiment::Neutral);
        assert_eq!(dominant_sentiment(1, 3, 1), Sentiment::Neutral);
        assert_eq!(dominant_sentiment(0, 1, 2), Sentiment::Negative);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let now = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        let value = serde_json::to_value(summarize_week(&[], now)).unwrap();
        assert_eq!(value["totalEntries"], 0);
        assert_eq!(value["dominantSentiment"], "neutral");
        assert_eq!(value["startDate"], "2024-01-01");
    }
}
