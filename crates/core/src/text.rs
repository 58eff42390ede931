use unicode_segmentation::UnicodeSegmentation;

/// How a lexicon term is compared against the words of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The term must equal a whole word.
    WholeWord,
    /// The term may be followed by inflectional suffixes, but not by a
    /// privative one (`umut` matches `umutlu`, not `umutsuz`).
    Stem,
}

const PRIVATIVE_SUFFIXES: [&str; 4] = ["sız", "siz", "suz", "süz"];

/// Lower-cases with the Turkish dotted capital folded to a plain `i` and
/// typographic apostrophes straightened.
pub fn fold_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            'İ' => out.push('i'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

/// Case-folded, word-split view of a text used by every lookup table.
#[derive(Debug, Clone)]
pub struct TextView {
    words: Vec<String>,
    padded: String,
}

impl TextView {
    pub fn new(input: &str) -> Self {
        let folded = fold_case(input);
        let words = folded
            .unicode_words()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        let padded = format!(" {} ", words.join(" "));

        Self { words, padded }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|candidate| candidate == word)
    }

    /// A phrase must start on a word boundary; its last word may carry a
    /// suffix (`iyi değil` matches `iyi değilim`) unless that suffix is
    /// privative (`çok hoş` does not match `çok hoşnutsuz`).
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = format!(" {phrase}");
        self.padded.match_indices(&needle).any(|(start, _)| {
            let tail = &self.padded[start + needle.len()..];
            let rest = tail.split(' ').next().unwrap_or_default();
            !has_privative(rest)
        })
    }

    pub fn contains_term(&self, term: &str, mode: MatchMode) -> bool {
        if term.contains(' ') {
            return match mode {
                MatchMode::WholeWord => self.padded.contains(&format!(" {term} ")),
                MatchMode::Stem => self.contains_phrase(term),
            };
        }

        self.words.iter().any(|word| word_matches(word, term, mode))
    }
}

fn word_matches(word: &str, term: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::WholeWord => word == term,
        MatchMode::Stem => word.strip_prefix(term).is_some_and(|rest| !has_privative(rest)),
    }
}

/// Anywhere in the remainder, so derived stems count too
/// (`memnun` + `iyetsiz`, `hoş` + `nutsuz`).
fn has_privative(rest: &str) -> bool {
    PRIVATIVE_SUFFIXES.iter().any(|suffix| rest.contains(suffix))
}
