use std::cmp::Ordering;

use serde::Serialize;

use crate::lexicon::{Lexicon, LEXICONS};
use crate::models::Sentiment;
use crate::text::TextView;

/// Outcome of the keyword vote, with enough detail to explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordVerdict {
    pub sentiment: Sentiment,
    pub matched_phrase: Option<&'static str>,
    pub positive_hits: usize,
    pub negative_hits: usize,
    pub negation_context: bool,
}

pub fn classify_sentiment_rules(text: &str) -> Sentiment {
    score_sentiment(text).sentiment
}

pub fn score_sentiment(text: &str) -> KeywordVerdict {
    let view = TextView::new(text);

    // Negative phrases outrank everything, positive phrases outrank the tally.
    for lexicon in LEXICONS {
        if let Some(phrase) = first_match(&view, lexicon, lexicon.negative_phrases) {
            return phrase_verdict(Sentiment::Negative, phrase);
        }
    }
    for lexicon in LEXICONS {
        if let Some(phrase) = first_match(&view, lexicon, lexicon.positive_phrases) {
            return phrase_verdict(Sentiment::Positive, phrase);
        }
    }

    let negation_context = LEXICONS
        .iter()
        .any(|lexicon| first_match(&view, lexicon, lexicon.negation_cues).is_some());

    let mut positive_hits = 0_usize;
    let mut negative_hits = 0_usize;
    for lexicon in LEXICONS {
        for &word in lexicon.positive_words {
            if negation_context && lexicon.suppressible_positive.contains(&word) {
                continue;
            }
            if view.contains_term(word, lexicon.mode) {
                positive_hits += 1;
            }
        }
        for &word in lexicon.negative_words {
            if view.contains_term(word, lexicon.mode) {
                negative_hits += 1;
            }
        }
    }

    let sentiment = match positive_hits.cmp(&negative_hits) {
        Ordering::Greater => Sentiment::Positive,
        Ordering::Less => Sentiment::Negative,
        Ordering::Equal => Sentiment::Neutral,
    };

    KeywordVerdict {
        sentiment,
        matched_phrase: None,
        positive_hits,
        negative_hits,
        negation_context,
    }
}

fn first_match(
    view: &TextView,
    lexicon: &Lexicon,
    terms: &'static [&'static str],
) -> Option<&'static str> {
    terms
        .iter()
        .copied()
        .find(|term| view.contains_term(term, lexicon.mode))
}

fn phrase_verdict(sentiment: Sentiment, phrase: &'static str) -> KeywordVerdict {
    KeywordVerdict {
        sentiment,
        matched_phrase: Some(phrase),
        positive_hits: 0,
        negative_hits: 0,
        negation_context: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_phrase_wins_over_positive_words() {
        let verdict = score_sentiment(
            "Sabah harika başladı, neşeli ve mutluydum ama akşam hiç iyi değildim",
        );
        assert_eq!(verdict.sentiment, Sentiment::Negative);
        assert_eq!(verdict.matched_phrase, Some("iyi değil"));

        assert_eq!(
            classify_sentiment_rules("The food was amazing and the weather was great, but I am not happy"),
            Sentiment::Negative
        );
    }

    #[test]
    fn positive_phrase_decides_before_tally() {
        let verdict = score_sentiment("Harika bir gün geçirdim, biraz yorgunum ama olsun");
        assert_eq!(verdict.sentiment, Sentiment::Positive);
        assert_eq!(verdict.matched_phrase, Some("harika bir gün"));
    }

    #[test]
    fn unmatched_text_is_neutral() {
        assert_eq!(
            classify_sentiment_rules("Bugün markete gittim ve ekmek aldım"),
            Sentiment::Neutral
        );
        assert_eq!(
            classify_sentiment_rules("I went to the store and bought bread"),
            Sentiment::Neutral
        );
        assert_eq!(classify_sentiment_rules(""), Sentiment::Neutral);
        assert_eq!(classify_sentiment_rules("🙂 ... !!!"), Sentiment::Neutral);
    }

    #[test]
    fn negation_context_suppresses_positive_words() {
        let english = score_sentiment("I didn't have a good day");
        assert!(english.negation_context);
        assert_eq!(english.positive_hits, 0);
        assert_ne!(english.sentiment, Sentiment::Positive);

        let turkish = score_sentiment("Bugün hiç güzel geçmedi");
        assert!(turkish.negation_context);
        assert_eq!(turkish.positive_hits, 0);
        assert_eq!(turkish.sentiment, Sentiment::Negative);
    }

    #[test]
    fn positive_words_count_without_negation() {
        let verdict = score_sentiment("Today was good and I feel grateful");
        assert!(!verdict.negation_context);
        assert_eq!(verdict.positive_hits, 2);
        assert_eq!(verdict.sentiment, Sentiment::Positive);
    }

    #[test]
    fn ties_default_to_neutral() {
        let verdict = score_sentiment("happy but tired");
        assert_eq!(verdict.positive_hits, verdict.negative_hits);
        assert_eq!(verdict.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn turkish_suffixes_are_recognised() {
        assert_eq!(classify_sentiment_rules("Bugün yorgunum"), Sentiment::Negative);
        assert_eq!(classify_sentiment_rules("Sınavı geçtim, gururluyum"), Sentiment::Positive);
        assert_eq!(classify_sentiment_rules("Kendimi umutsuz hissediyorum"), Sentiment::Negative);
    }

    #[test]
    fn privative_forms_read_as_negative() {
        let verdict = score_sentiment("Memnuniyetsizim");
        assert_eq!(verdict.positive_hits, 0);
        assert_eq!(verdict.sentiment, Sentiment::Negative);

        let verdict = score_sentiment("Çok hoşnutsuzum");
        assert_eq!(verdict.matched_phrase, None);
        assert_eq!(verdict.sentiment, Sentiment::Negative);

        assert_eq!(classify_sentiment_rules("Bugün keyifsizim"), Sentiment::Negative);
        assert_eq!(classify_sentiment_rules("Akşam biraz neşesizdim"), Sentiment::Negative);
    }

    #[test]
    fn not_bad_reads_as_positive() {
        assert_eq!(classify_sentiment_rules("Fena değil aslında"), Sentiment::Positive);
        assert_eq!(classify_sentiment_rules("Honestly, not bad"), Sentiment::Positive);
    }
}
