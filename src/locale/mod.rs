//! Supported locales

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported site locale
///
/// The set is closed: every piece of content conceptually exists in each of
/// these languages, falling back to the default locale when no translation
/// is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ko,
    Ja,
    Zh,
    Id,
    Fr,
    Es,
    Pt,
    Ar,
}

impl Locale {
    /// All supported locales, in display order
    pub const ALL: [Locale; 9] = [
        Locale::En,
        Locale::Ko,
        Locale::Ja,
        Locale::Zh,
        Locale::Id,
        Locale::Fr,
        Locale::Es,
        Locale::Pt,
        Locale::Ar,
    ];

    /// The canonical locale content falls back to
    pub const DEFAULT: Locale = Locale::En;

    /// Lowercase language code used in URLs and directory names
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ko => "ko",
            Locale::Ja => "ja",
            Locale::Zh => "zh",
            Locale::Id => "id",
            Locale::Fr => "fr",
            Locale::Es => "es",
            Locale::Pt => "pt",
            Locale::Ar => "ar",
        }
    }

    /// Native name of the language
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ko => "한국어",
            Locale::Ja => "日本語",
            Locale::Zh => "中文",
            Locale::Id => "Bahasa",
            Locale::Fr => "Français",
            Locale::Es => "Español",
            Locale::Pt => "Português",
            Locale::Ar => "العربية",
        }
    }

    /// Whether the language is written right-to-left
    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Error returned when a string is not a supported locale code
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown locale: {0}")]
pub struct UnknownLocale(pub String);
