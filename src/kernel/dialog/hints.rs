//! Keyword hints used inside the language and speed sub-dialogs.
//!
//! Looser than the intent triggers: a hint is a word stem matched anywhere in
//! the normalized utterance, so "английский" and "по-английски" both hit "англ".

use crate::kernel::intent::parser::normalize;
use crate::kernel::locale::Locale;
use crate::kernel::speech::RateDirection;

const LANGUAGE_HINTS: &[(Locale, &[&str])] = &[
    (Locale::English, &["english", "англ", "инглиш"]),
    (Locale::Russian, &["russian", "русск", "рашн"]),
];

const FASTER_HINTS: &[&str] = &["fast", "quick", "быстр", "ускор"];
const SLOWER_HINTS: &[&str] = &["slow", "медлен", "замедл"];

/// Target locale named in `text`. Hints for both or neither locale is a miss.
pub fn detect_language(text: &str) -> Option<Locale> {
    let normalized = normalize(text);
    let mut found = LANGUAGE_HINTS
        .iter()
        .filter(|(_, stems)| contains_any(&normalized, stems))
        .map(|(locale, _)| *locale);

    match (found.next(), found.next()) {
        (Some(locale), None) => Some(locale),
        _ => None,
    }
}

/// Requested speed direction. Hints for both directions is a miss.
pub fn detect_speed(text: &str) -> Option<RateDirection> {
    let normalized = normalize(text);
    match (
        contains_any(&normalized, FASTER_HINTS),
        contains_any(&normalized, SLOWER_HINTS),
    ) {
        (true, false) => Some(RateDirection::Faster),
        (false, true) => Some(RateDirection::Slower),
        _ => None,
    }
}

fn contains_any(haystack: &str, stems: &[&str]) -> bool {
    stems.iter().any(|stem| haystack.contains(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_free_text() {
        assert_eq!(detect_language("Давай на английском"), Some(Locale::English));
        assert_eq!(detect_language("по-русски, пожалуйста"), Some(Locale::Russian));
        assert_eq!(detect_language("English please"), Some(Locale::English));
    }

    #[test]
    fn ambiguous_language_is_a_miss() {
        assert_eq!(detect_language("english or russian"), None);
        assert_eq!(detect_language("не знаю"), None);
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn speed_direction() {
        assert_eq!(detect_speed("Побыстрее"), Some(RateDirection::Faster));
        assert_eq!(detect_speed("a bit slower"), Some(RateDirection::Slower));
        assert_eq!(detect_speed("fast or slow"), None);
        assert_eq!(detect_speed("громче"), None);
    }
}
