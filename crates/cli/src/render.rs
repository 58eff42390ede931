use chrono::{DateTime, Duration, Utc};
use moodlog_core::{weekly_window_start, EntryRecord, Sentiment, Translator, WeeklySummary};

pub fn day_label(created_at: DateTime<Utc>, now: DateTime<Utc>, translator: &Translator) -> String {
    let day = created_at.date_naive();
    let today = now.date_naive();
    if day == today {
        translator.t("history.today").to_string()
    } else if day == (now - Duration::days(1)).date_naive() {
        translator.t("history.yesterday").to_string()
    } else {
        day.format("%d.%m.%Y").to_string()
    }
}

pub fn entries_this_week(entries: &[EntryRecord], now: DateTime<Utc>) -> usize {
    let start = weekly_window_start(now);
    entries
        .iter()
        .filter(|entry| entry.created_at >= start)
        .count()
}

fn sentiment_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "😊",
        Sentiment::Neutral => "😐",
        Sentiment::Negative => "😔",
    }
}

pub fn analysis_block(
    translator: &Translator,
    sentiment: Sentiment,
    summary: &str,
    suggestion: &str,
) -> String {
    format!(
        "{} {}\n{}: {}\n{}: {}",
        sentiment_marker(sentiment),
        translator.sentiment_label(sentiment),
        translator.t("home.summary"),
        summary,
        translator.t("home.suggestion"),
        suggestion,
    )
}

pub fn history(entries: &[EntryRecord], now: DateTime<Utc>, translator: &Translator) -> String {
    if entries.is_empty() {
        return translator.t("history.empty").to_string();
    }

    let mut out = format!("{}\n", translator.t("history.title"));
    for entry in entries {
        out.push_str(&format!(
            "\n#{} {} {}\n{}\n{}\n",
            entry.id,
            day_label(entry.created_at, now, translator),
            entry.created_at.format("%H:%M"),
            entry.content,
            analysis_block(translator, entry.sentiment, &entry.summary, &entry.suggestion),
        ));
    }
    out
}

pub fn weekly(summary: &WeeklySummary, translator: &Translator) -> String {
    let mut out = format!(
        "{} ({} - {})\n",
        translator.t("weekly.title"),
        summary.start_date,
        summary.end_date
    );
    if summary.total_entries == 0 {
        out.push_str(translator.t("weekly.empty"));
        return out;
    }

    out.push_str(&format!(
        "{}: {} {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        translator.t("weekly.total"),
        summary.total_entries,
        translator.t("weekly.entries"),
        translator.t("weekly.positive"),
        summary.positive,
        translator.t("weekly.neutral"),
        summary.neutral,
        translator.t("weekly.negative"),
        summary.negative,
        translator.t("weekly.dominant"),
        translator.sentiment_label(summary.dominant_sentiment),
    ));
    out
}
