use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use unic_langid::{LanguageIdentifier, langid};

/// Error returned when a string is not one of the supported locale codes.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported locale '{0}', expected one of: az, ru, en")]
pub struct ParseLocaleError(pub String);

/// One of the three display languages.
///
/// The set is closed: there is no runtime registration of new locales.
/// `Az` is the system default.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    /// Azerbaijani.
    #[default]
    Az,
    /// Russian.
    Ru,
    /// English.
    En,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 3] = [Locale::Az, Locale::Ru, Locale::En];

    /// The lowercase code used in storage and URLs (`az`, `ru`, `en`).
    pub const fn code(self) -> &'static str {
        match self {
            Locale::Az => "az",
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }

    /// The capitalized code appended to a field prefix (`titleAz`).
    pub const fn suffix(self) -> &'static str {
        match self {
            Locale::Az => "Az",
            Locale::Ru => "Ru",
            Locale::En => "En",
        }
    }

    /// The language's name written in that language, for locale pickers.
    pub const fn native_name(self) -> &'static str {
        match self {
            Locale::Az => "Azərbaycan",
            Locale::Ru => "Русский",
            Locale::En => "English",
        }
    }

    /// Parses a stored code, falling back to the default locale for anything
    /// that is not exactly one of the supported codes.
    pub fn from_code_lossy(code: &str) -> Locale {
        code.parse().unwrap_or_default()
    }

    /// Maps a BCP-47 tag such as `ru-RU` onto the supported set by its
    /// primary language subtag.
    ///
    /// Returns `None` when the tag is malformed or names another language.
    pub fn from_language_tag(tag: &str) -> Option<Locale> {
        let lang = tag.parse::<LanguageIdentifier>().ok()?;
        lang.language.as_str().parse().ok()
    }

    /// The language identifier for this locale.
    pub fn language_identifier(self) -> LanguageIdentifier {
        match self {
            Locale::Az => langid!("az"),
            Locale::Ru => langid!("ru"),
            Locale::En => langid!("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "az" => Ok(Locale::Az),
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

impl From<Locale> for LanguageIdentifier {
    fn from(locale: Locale) -> Self {
        locale.language_identifier()
    }
}
