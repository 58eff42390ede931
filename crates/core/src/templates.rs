use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Language, Sentiment};
use crate::lexicon::{ENGLISH, TURKISH};
use crate::text::TextView;

struct TemplateSet {
    positive: &'static [&'static str],
    neutral: &'static [&'static str],
    negative: &'static [&'static str],
}

impl SuggestionOverride {
    /// Triggers match the way the lexicon terms of their language do, so
    /// `unhappy` does not fire `happy`.
    fn fires(&self, view: &TextView) -> bool {
        self.tr_triggers
            .iter()
            .any(|trigger| view.contains_term(trigger, TURKISH.mode))
            || self
                .en_triggers
                .iter()
                .any(|trigger| view.contains_term(trigger, ENGLISH.mode))
    }
}

impl TemplateSet {
    fn for_sentiment(&self, sentiment: Sentiment) -> &'static [&'static str] {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }
}

static SUMMARIES_TR: TemplateSet = TemplateSet {
    positive: &[
        "Bugün genel olarak olumlu bir gün geçirmişsin! 😊",
        "Harika bir ruh halindesin! ✨",
        "Pozitif enerjin çok güzel! 🌟",
    ],
    neutral: &[
        "Bugün dengeli bir gün geçirmişsin.",
        "Duygusal olarak normal bir gündeydin.",
        "Sakin bir gün geçirmişsin.",
    ],
    negative: &[
        "Bugün biraz zorlu bir gün geçirmişsin. 😔",
        "Kendini şu an pek iyi hissetmiyorsun gibi görünüyor.",
        "Biraz zor bir dönemden geçiyor olabilirsin.",
    ],
};

static SUMMARIES_EN: TemplateSet = TemplateSet {
    positive: &[
        "You had a generally positive day today! 😊",
        "You're in a great mood! ✨",
        "Your positive energy is wonderful! 🌟",
    ],
    neutral: &[
        "You had a balanced day today.",
        "You were emotionally normal today.",
        "You had a calm day.",
    ],
    negative: &[
        "You had a bit of a challenging day today. 😔",
        "It seems like you're not feeling very well right now.",
        "You might be going through a difficult period.",
    ],
};

static SUGGESTIONS_TR: TemplateSet = TemplateSet {
    positive: &[
        "🎵 Bu güzel enerjiyi sürdürmek için sevdiğin bir aktivite yapabilirsin!",
        "✍️ Bu pozitif anı bir yere not edebilirsin.",
        "🤝 Sevdiklerinle bu mutluluğunu paylaşabilirsin.",
    ],
    neutral: &[
        "📚 Bugün kendine vakit ayırabilirsin.",
        "🎯 Küçük bir hedef belirleyip üzerine odaklanabilirsin.",
        "🌿 Biraz temiz hava almak iyi olabilir.",
    ],
    negative: &[
        "🚶‍♂️ Kısa bir yürüyüş yapmak iyi gelebilir.",
        "☕ Kendine sıcak bir içecek hazırlayıp 10 dakika mola verebilirsin.",
        "📝 Hissettiklerini yazmak rahatlatıcı olabilir.",
        "🎧 Rahatlatıcı müzik dinleyebilirsin.",
    ],
};

static SUGGESTIONS_EN: TemplateSet = TemplateSet {
    positive: &[
        "🎵 You can do an activity you love to maintain this beautiful energy!",
        "✍️ You can write down this positive moment somewhere.",
        "🤝 You can share this happiness with your loved ones.",
    ],
    neutral: &[
        "📚 You can take some time for yourself today.",
        "🎯 You can set a small goal and focus on it.",
        "🌿 Getting some fresh air might be good.",
    ],
    negative: &[
        "🚶‍♂️ Taking a short walk might help.",
        "☕ You can prepare a hot drink for yourself and take a 10-minute break.",
        "📝 Writing down your feelings can be relaxing.",
        "🎧 You can listen to calming music.",
    ],
};

/// Keyword-triggered suggestions checked in order before the random pick.
struct SuggestionOverride {
    tr_triggers: &'static [&'static str],
    en_triggers: &'static [&'static str],
    skip_when_negative: bool,
    tr: &'static str,
    en: &'static str,
}

static OVERRIDES: &[SuggestionOverride] = &[
    SuggestionOverride {
        tr_triggers: &["yorgun"],
        en_triggers: &["tired"],
        skip_when_negative: false,
        tr: "💤 Kendine 10-15 dakikalık bir mola ver ve biraz dinlen.",
        en: "💤 Take a 10-15 minute break and rest a bit.",
    },
    SuggestionOverride {
        tr_triggers: &["stresli"],
        en_triggers: &["stressed"],
        skip_when_negative: false,
        tr: "🧘‍♀️ Derin nefes egzersizleri veya kısa bir yürüyüş yapabilirsin.",
        en: "🧘‍♀️ You can do deep breathing exercises or take a short walk.",
    },
    // Not for negative entries: "mutlu değilim" contains "mutlu".
    SuggestionOverride {
        tr_triggers: &["mutlu"],
        en_triggers: &["happy"],
        skip_when_negative: true,
        tr: "🎵 Bu güzel enerjiyi sürdürmek için sevdiğin bir şarkı dinleyebilirsin!",
        en: "🎵 You can listen to a song you love to maintain this beautiful energy!",
    },
];

fn summaries(language: Language) -> &'static TemplateSet {
    match language {
        Language::Tr => &SUMMARIES_TR,
        Language::En => &SUMMARIES_EN,
    }
}

fn suggestions(language: Language) -> &'static TemplateSet {
    match language {
        Language::Tr => &SUGGESTIONS_TR,
        Language::En => &SUGGESTIONS_EN,
    }
}

fn pick<R: Rng + ?Sized>(pool: &'static [&'static str], rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn pick_summary<R: Rng + ?Sized>(
    language: Language,
    sentiment: Sentiment,
    rng: &mut R,
) -> &'static str {
    pick(summaries(language).for_sentiment(sentiment), rng)
}

pub fn pick_suggestion<R: Rng + ?Sized>(
    text: &str,
    language: Language,
    sentiment: Sentiment,
    rng: &mut R,
) -> &'static str {
    let view = TextView::new(text);
    let hit = OVERRIDES.iter().find(|rule| {
        !(rule.skip_when_negative && sentiment == Sentiment::Negative) && rule.fires(&view)
    });
    if let Some(rule) = hit {
        return match language {
            Language::Tr => rule.tr,
            Language::En => rule.en,
        };
    }

    pick(suggestions(language).for_sentiment(sentiment), rng)
}
