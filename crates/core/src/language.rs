use crate::models::Language;
use crate::text::TextView;

const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "is", "are", "was", "were", "am", "and", "or", "but", "i", "you", "he", "she", "it",
    "we", "they", "my", "your", "this", "that", "with", "for", "to", "of", "in", "on", "at",
    "feel", "feeling", "today", "very", "not",
];

// Catches Turkish typed without diacritics ("bugun cok yorgunum").
const TURKISH_STOPWORDS: &[&str] = &[
    "ve", "bir", "bu", "da", "de", "ben", "sen", "biz", "cok", "çok", "ama", "icin", "için",
    "gibi", "bugun", "bugün", "degil", "değil", "mi", "ile",
];

const TURKISH_LETTERS: &[char] = &['ç', 'ğ', 'ı', 'ö', 'ş', 'ü'];

/// Best-effort guess of the language a journal entry is written in.
///
/// English stopwords win first; otherwise Turkish letters or stopwords mark
/// Turkish; otherwise any Latin letter means English. Text with no letters at
/// all falls back to Turkish.
pub fn detect_language(text: &str) -> Language {
    let view = TextView::new(text);

    if ENGLISH_STOPWORDS.iter().any(|word| view.has_word(word)) {
        return Language::En;
    }

    let has_turkish_letter = view
        .words()
        .iter()
        .any(|word| word.chars().any(|ch| TURKISH_LETTERS.contains(&ch)));
    if has_turkish_letter || TURKISH_STOPWORDS.iter().any(|word| view.has_word(word)) {
        return Language::Tr;
    }

    if text.chars().any(|ch| ch.is_ascii_alphabetic()) {
        return Language::En;
    }

    Language::Tr
}
