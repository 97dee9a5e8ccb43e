use serde::{Deserialize, Serialize};
use std::fmt;

/// Locales the assistant can listen and speak in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    Russian,
    English,
}

impl Locale {
    /// BCP-47 tag handed to the speech services.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Russian => "ru-RU",
            Locale::English => "en-US",
        }
    }

    /// Accepts any tag whose primary subtag is `ru` or `en`, e.g. `ru`, `en-GB`, `EN_us`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ru" => Some(Locale::Russian),
            "en" => Some(Locale::English),
            _ => None,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Russian
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primary_subtag() {
        assert_eq!(Locale::from_tag("ru"), Some(Locale::Russian));
        assert_eq!(Locale::from_tag("en-GB"), Some(Locale::English));
        assert_eq!(Locale::from_tag(" EN_us "), Some(Locale::English));
        assert_eq!(Locale::from_tag("de-DE"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn tag_round_trips() {
        for locale in [Locale::Russian, Locale::English] {
            assert_eq!(Locale::from_tag(locale.tag()), Some(locale));
        }
    }
}
