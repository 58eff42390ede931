//! Keyword tables behind the rule-based sentiment vote.
//!
//! Turkish terms are stems and match with their suffixes; English terms match
//! whole words. Phrase lists are ordered: the first hit decides.

use crate::text::MatchMode;

#[derive(Debug)]
pub struct Lexicon {
    pub mode: MatchMode,
    pub negative_phrases: &'static [&'static str],
    pub positive_phrases: &'static [&'static str],
    pub positive_words: &'static [&'static str],
    pub negative_words: &'static [&'static str],
    /// Any of these in the text puts it in a negation context.
    pub negation_cues: &'static [&'static str],
    /// Positive words that do not count inside a negation context.
    pub suppressible_positive: &'static [&'static str],
}

pub static TURKISH: Lexicon = Lexicon {
    mode: MatchMode::Stem,
    negative_phrases: &[
        "iyi geçmedi",
        "iyi değil",
        "güzel değil",
        "mutlu değil",
        "neşeli değil",
        "keyifli değil",
        "iyi hissetmiyor",
        "iyi hissetmedim",
        "motivasyonum düşük",
        "motivasyon düşük",
        "moralim düşük",
        "moral düşük",
        "moralim bozuk",
        "moral bozuk",
        "kötü geçti",
        "kötüydü",
        "hiçbir şey iyi değil",
        "hiçbir şey güzel değil",
    ],
    positive_phrases: &[
        "çok iyi",
        "pek iyi",
        "çok güzel",
        "harika geçti",
        "mükemmel geçti",
        "çok mutlu",
        "çok neşeli",
        "çok sevinçli",
        "çok başarılı",
        "motivasyonum yüksek",
        "moralim yüksek",
        "moralim çok iyi",
        "çok keyifli",
        "çok zevkli",
        "çok hoş",
        "harika bir gün",
        "mükemmel bir gün",
        "süper bir gün",
        "fena değil",
    ],
    positive_words: &[
        "mutlu",
        "neşe",
        "sevin",
        "coşku",
        "heyecan",
        "gurur",
        "başarı",
        "keyif",
        "zevk",
        "hoş",
        "umut",
        "iyimser",
        "pozitif",
        "iyi",
        "güzel",
        "harika",
        "süper",
        "müthiş",
        "fantastik",
        "muhteşem",
        "olağanüstü",
        "enerjik",
        "dinç",
        "canlı",
        "huzur",
        "rahat",
        "sakin",
        "memnun",
        "mükemmel",
    ],
    negative_words: &[
        "üzgün",
        "üzüntü",
        "mutsuz",
        "keder",
        "hüzün",
        "acılı",
        "acı çek",
        "ağrı",
        "sıkıntı",
        "bunal",
        "depresif",
        "depresyon",
        "umutsuz",
        "çaresiz",
        "yorgun",
        "yorul",
        "yorucu",
        "bitkin",
        "tüken",
        "bıkkın",
        "bıkmış",
        "sinir",
        "öfke",
        "kızgın",
        "kırgın",
        "hayal kırıklığı",
        "kork",
        "endişe",
        "kaygı",
        "panik",
        "stres",
        "gergin",
        "huzursuz",
        "rahatsız",
        "memnuniyetsiz",
        "hoşnutsuz",
        "keyifsiz",
        "neşesiz",
        "zorlu",
        "zorlan",
        "zordu",
        "zorluk",
        "sıkıl",
        "sıkıcı",
        "kötü",
        "yalnız",
        "ağla",
        "değil",
        "yok",
        "hiç",
        "asla",
        "olmuyor",
        "olmadı",
        "olmayacak",
    ],
    negation_cues: &[
        "değil",
        "yok",
        "hiç",
        "asla",
        "geçmedi",
        "olmadı",
        "olmuyor",
        "hissetmiyor",
        "hissetmedim",
    ],
    suppressible_positive: &["iyi", "güzel", "mutlu", "neşe", "keyif", "zevk", "hoş"],
};

pub static ENGLISH: Lexicon = Lexicon {
    mode: MatchMode::WholeWord,
    negative_phrases: &[
        "not good",
        "not well",
        "not happy",
        "not fine",
        "not great",
        "not okay",
        "not very good",
        "not very happy",
        "not a good",
        "not a great",
        "not feeling good",
        "not feeling well",
        "not feeling great",
        "not feeling happy",
        "do not feel good",
        "does not feel good",
        "did not feel good",
        "don't feel good",
        "didn't feel good",
        "feel bad",
        "feeling bad",
        "feels bad",
        "felt bad",
    ],
    positive_phrases: &[
        "very good",
        "very happy",
        "very excited",
        "very successful",
        "great day",
        "wonderful day",
        "amazing day",
        "fantastic day",
        "feeling great",
        "feeling good",
        "feeling happy",
        "feeling amazing",
        "not bad",
    ],
    positive_words: &[
        "happy",
        "joyful",
        "glad",
        "pleased",
        "delighted",
        "cheerful",
        "excited",
        "love",
        "loved",
        "loving",
        "enjoy",
        "enjoying",
        "enjoyed",
        "pleasure",
        "success",
        "successful",
        "proud",
        "pride",
        "hope",
        "hopeful",
        "optimistic",
        "good",
        "great",
        "excellent",
        "amazing",
        "wonderful",
        "fantastic",
        "awesome",
        "positive",
        "nice",
        "fine",
        "okay",
        "well",
        "better",
        "best",
        "perfect",
        "brilliant",
        "energetic",
        "peaceful",
        "calm",
        "relaxed",
        "content",
        "satisfied",
        "grateful",
        "thrilled",
        "ecstatic",
        "euphoric",
        "blissful",
        "jubilant",
        "elated",
        "overjoyed",
    ],
    negative_words: &[
        "sad",
        "unhappy",
        "depressed",
        "upset",
        "disappointed",
        "frustrated",
        "angry",
        "mad",
        "annoyed",
        "irritated",
        "furious",
        "rage",
        "hate",
        "hated",
        "hateful",
        "tired",
        "exhausted",
        "drained",
        "stressed",
        "anxious",
        "worried",
        "fear",
        "afraid",
        "scared",
        "frightened",
        "nervous",
        "panic",
        "pain",
        "hurt",
        "suffering",
        "struggle",
        "difficult",
        "hard",
        "tough",
        "hopeless",
        "helpless",
        "desperate",
        "lonely",
        "alone",
        "isolated",
        "bad",
        "terrible",
        "awful",
        "horrible",
        "worst",
        "worse",
        "poor",
        "tense",
        "uneasy",
        "uncomfortable",
        "distressed",
        "miserable",
        "gloomy",
        "not",
        "no",
        "never",
        "nothing",
        "nobody",
        "nowhere",
        "neither",
        "nor",
    ],
    negation_cues: &[
        "not",
        "no",
        "never",
        "don't",
        "didn't",
        "doesn't",
        "isn't",
        "wasn't",
        "aren't",
        "weren't",
        "can't",
        "couldn't",
        "won't",
        "feel bad",
        "feeling bad",
        "feels bad",
        "felt bad",
    ],
    suppressible_positive: &[
        "good", "well", "fine", "great", "okay", "happy", "joyful", "cheerful",
    ],
};

pub static LEXICONS: [&Lexicon; 2] = [&TURKISH, &ENGLISH];
