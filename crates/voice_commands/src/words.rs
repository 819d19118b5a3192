//! Word splitting and the small vocabularies shared by the sub-grammars.

/// Characters stripped from both ends of a word before matching.
const EDGE_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':', '"', '\'', '(', ')', '-'];

/// One whitespace-delimited word of an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word<'a> {
    /// Exact text as spoken, punctuation included.
    pub raw: &'a str,
    /// Lowercase text with edge punctuation removed. May be empty for bare punctuation.
    pub norm: String,
}

impl Word<'_> {
    /// Whether the normalized word equals `candidate`.
    pub fn is(&self, candidate: &str) -> bool {
        self.norm == candidate
    }

    /// Whether the normalized word is one of `candidates`.
    pub fn is_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|candidate| self.norm == *candidate)
    }
}

/// Splits `text` on whitespace, keeping raw and normalized forms.
pub fn split_words(text: &str) -> Vec<Word<'_>> {
    text.split_whitespace()
        .map(|raw| Word {
            raw,
            norm: normalize_word(raw),
        })
        .collect()
}

fn normalize_word(raw: &str) -> String {
    raw.to_lowercase().trim_matches(EDGE_PUNCTUATION).to_string()
}

/// Joins raw words back into a single-spaced phrase.
pub fn join_raw(words: &[Word<'_>]) -> String {
    words
        .iter()
        .map(|word| word.raw)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Index of the first word equal to any of `candidates` at or after `from`.
pub fn position_of(words: &[Word<'_>], from: usize, candidates: &[&str]) -> Option<usize> {
    words
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, word)| word.is_any(candidates))
        .map(|(index, _)| index)
}

/// Whether any word equals any of `candidates`.
pub fn contains_any(words: &[Word<'_>], candidates: &[&str]) -> bool {
    position_of(words, 0, candidates).is_some()
}

/// Matches a multi-word `phrase` (space separated) starting at `at`, returning the index after it.
pub fn match_phrase(words: &[Word<'_>], at: usize, phrase: &str) -> Option<usize> {
    let mut index = at;
    for part in phrase.split(' ') {
        if !words.get(index)?.is(part) {
            return None;
        }
        index += 1;
    }
    Some(index)
}

/// Tries each phrase in order at `at`, returning the index after the first that matches.
pub fn match_any_phrase(words: &[Word<'_>], at: usize, phrases: &[&str]) -> Option<usize> {
    phrases
        .iter()
        .find_map(|phrase| match_phrase(words, at, phrase))
}

/// Skips an optional single word at `at`.
pub fn skip_optional(words: &[Word<'_>], at: usize, optional: &str) -> usize {
    match words.get(at) {
        Some(word) if word.is(optional) => at + 1,
        _ => at,
    }
}

/// Parses a non-negative decimal (`12`, `3.5`). Signs and exponents are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || fraction.is_some_and(|fraction| !digits(fraction)) {
        return None;
    }
    text.parse().ok()
}

/// Digit string for `zero` through `ten`.
pub fn number_word(word: &str) -> Option<&'static str> {
    Some(match word {
        "zero" => "0",
        "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        "ten" => "10",
        _ => return None,
    })
}

/// Full month names, indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names starting from Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Zero-based month for a full or abbreviated month name.
pub fn parse_month(word: &str) -> Option<u32> {
    Some(match word {
        "january" | "jan" => 0,
        "february" | "feb" => 1,
        "march" | "mar" => 2,
        "april" | "apr" => 3,
        "may" => 4,
        "june" | "jun" => 5,
        "july" | "jul" => 6,
        "august" | "aug" => 7,
        "september" | "sep" | "sept" => 8,
        "october" | "oct" => 9,
        "november" | "nov" => 10,
        "december" | "dec" => 11,
        _ => return None,
    })
}

/// Days since Sunday for a lowercase weekday name.
pub fn parse_weekday(word: &str) -> Option<u32> {
    WEEKDAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(word))
        .map(|index| index as u32)
}

/// Parses a one or two digit day with an optional ordinal suffix (`29th`, `1st`, `3`).
pub fn parse_day(word: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .unwrap_or(word);
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parses an exactly four digit year.
pub fn parse_year(word: &str) -> Option<i32> {
    if word.len() != 4 || !word.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse().ok()
}
