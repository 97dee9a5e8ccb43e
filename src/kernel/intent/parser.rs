use super::triggers::{TriggerTable, ALL};
use super::types::{Command, ParsedCommand};

/// Classifies recognised speech into a [`ParsedCommand`].
///
/// Stateless: the same text always yields the same command. The recognizer
/// may hand over several ranked alternates joined by `delimiter`; they are
/// tried in order and the first one that matches any rule wins.
#[derive(Clone)]
pub struct IntentParser {
    tables: Vec<&'static TriggerTable>,
    delimiter: String,
}

impl IntentParser {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self::with_tables(delimiter, ALL.to_vec())
    }

    pub fn with_tables(delimiter: impl Into<String>, tables: Vec<&'static TriggerTable>) -> Self {
        Self {
            tables,
            delimiter: delimiter.into(),
        }
    }

    /// Non-blank alternates in recognizer rank order.
    pub fn alternates<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let parts: Vec<&str> = if self.delimiter.is_empty() {
            vec![text]
        } else {
            text.split(self.delimiter.as_str()).collect()
        };
        parts
            .into_iter()
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .collect()
    }

    /// The recognizer's top-ranked alternate, trimmed, even when it is blank.
    pub fn top_alternate<'a>(&self, text: &'a str) -> &'a str {
        let top = if self.delimiter.is_empty() {
            Some(text)
        } else {
            text.split(self.delimiter.as_str()).next()
        };
        top.unwrap_or_default().trim()
    }

    /// Best-ranked alternate, if any is non-blank.
    pub fn first_alternate<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.alternates(text).into_iter().next()
    }

    pub fn parse(&self, text: &str) -> ParsedCommand {
        self.alternates(text)
            .into_iter()
            .find_map(|alt| self.parse_alternate(alt))
            .unwrap_or_else(ParsedCommand::unknown)
    }

    fn parse_alternate(&self, raw: &str) -> Option<ParsedCommand> {
        let text = raw.trim_start_matches(|c: char| !c.is_alphanumeric());
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        // 1. Whole-string language switch, so "english" inside a sentence never fires.
        let stripped = self.strip_fillers(&normalized);
        for table in &self.tables {
            for (phrase, target) in table.language_switch {
                if stripped == *phrase {
                    return Some(ParsedCommand::with_payload(
                        Command::ChangeLanguage,
                        target.tag(),
                    ));
                }
            }
            if table.language_toggle.contains(&stripped.as_str()) {
                return Some(ParsedCommand::new(Command::ChangeLanguage));
            }
        }

        // 2. Payload-bearing prefixes. An empty remainder falls through.
        for table in &self.tables {
            for trigger in table.change_name {
                if let Some(rest) = match_prefix(text, trigger) {
                    let payload = clean_payload(rest);
                    if !payload.is_empty() {
                        return Some(ParsedCommand::with_payload(Command::ChangeName, payload));
                    }
                }
            }
        }

        // 3..6 in strict priority order.
        const ORDERED: [Command; 7] = [
            Command::ChangeSpeechRateFaster,
            Command::ChangeSpeechRateSlower,
            Command::IntentChangeName,
            Command::IntentChangeLanguage,
            Command::IntentChangeSpeed,
            Command::Repeat,
            Command::OpenSettings,
        ];
        ORDERED
            .into_iter()
            .find(|command| self.any_prefix(text, *command))
            .map(ParsedCommand::new)
    }

    fn any_prefix(&self, text: &str, command: Command) -> bool {
        self.tables
            .iter()
            .flat_map(|table| table.triggers_for(command).iter())
            .any(|trigger| match_prefix(text, trigger).is_some())
    }

    fn strip_fillers(&self, normalized: &str) -> String {
        normalized
            .split(' ')
            .filter(|word| {
                !self
                    .tables
                    .iter()
                    .any(|table| table.filler_words.contains(word))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new("|")
    }
}

/// Case folding used for every comparison. Maps one char to one char so byte
/// offsets in the original text stay usable.
pub(crate) fn fold(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    if lower == 'ё' {
        'е'
    } else {
        lower
    }
}

/// Lowercase, fold, turn punctuation into spaces and collapse whitespace.
pub(crate) fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { fold(c) } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matches `trigger` (normalized, single-spaced) at the start of `text`.
///
/// Returns the untouched remainder of `text` when the trigger ends on a word
/// boundary. A space in the trigger matches any run of whitespace.
fn match_prefix<'a>(text: &'a str, trigger: &str) -> Option<&'a str> {
    let mut chars = text.char_indices().peekable();
    let mut consumed = 0;

    for tc in trigger.chars() {
        if tc == ' ' {
            match chars.peek() {
                Some((_, c)) if c.is_whitespace() => {}
                _ => return None,
            }
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                consumed = i + c.len_utf8();
                chars.next();
            }
        } else {
            match chars.next() {
                Some((i, c)) if fold(c) == tc => consumed = i + c.len_utf8(),
                _ => return None,
            }
        }
    }

    let remainder = &text[consumed..];
    match remainder.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(remainder),
    }
}

fn clean_payload(rest: &str) -> String {
    rest.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"' | '«' | '»'))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_requires_word_boundary() {
        assert_eq!(match_prefix("Call me Alex", "call me"), Some(" Alex"));
        assert_eq!(match_prefix("call mexico", "call me"), None);
        assert_eq!(match_prefix("call   me", "call me"), Some(""));
    }

    #[test]
    fn normalize_folds_yo_and_punctuation() {
        assert_eq!(normalize("  Ещё, РАЗ! "), "еще раз");
        assert_eq!(normalize("по-русски"), "по русски");
    }

    #[test]
    fn payload_loses_trailing_punctuation() {
        assert_eq!(clean_payload("  Alex. "), "Alex");
    }
}
