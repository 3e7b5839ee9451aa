//! Static UI string tables.
//!
//! A [`TranslationTable`] maps string keys to one text per locale. Lookups
//! never fail: an unknown key, or a key with neither the requested nor the
//! English text, renders as the key itself so gaps stay visible in the UI.

use crate::audit::{AuditReport, audit_table, is_placeholder_name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use trilingo_shared::Locale;

/// The text of one key in every locale. Empty strings count as absent.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TranslationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ru: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl TranslationEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        *self.slot_mut(locale) = Some(text.into());
        self
    }

    /// The populated text for `locale`, if any.
    pub fn get(&self, locale: Locale) -> Option<&str> {
        let slot = match locale {
            Locale::Az => &self.az,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
        };
        slot.as_deref().filter(|text| !text.is_empty())
    }

    /// The text for `locale`, else the English text.
    pub fn resolve(&self, locale: Locale) -> Option<&str> {
        self.get(locale).or_else(|| self.get(Locale::En))
    }

    fn slot_mut(&mut self, locale: Locale) -> &mut Option<String> {
        match locale {
            Locale::Az => &mut self.az,
            Locale::Ru => &mut self.ru,
            Locale::En => &mut self.en,
        }
    }
}

/// A placeholder value: text or a number.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

macro_rules! impl_integer_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_integer_param!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        match i64::try_from(value) {
            Ok(n) => ParamValue::Integer(n),
            Err(_) => ParamValue::Text(value.to_string()),
        }
    }
}

/// Named placeholder values, substituted in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(IndexMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every `{name}` in `text` with its value, one pass per
    /// parameter. Substituted text is not expanded again. Names that are not
    /// valid placeholder names never match.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);
        for (name, value) in self.iter() {
            if !is_placeholder_name(name) {
                tracing::debug!("Ignoring invalid placeholder name '{}'", name);
                continue;
            }
            let token = format!("{{{}}}", name);
            if out.contains(&token) {
                out = Cow::Owned(out.replace(&token, &value.to_string()));
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// An immutable key → per-locale text table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: IndexMap<String, TranslationEntry>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TranslationEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, entry)| (key.into(), entry))
                .collect(),
        }
    }

    /// Builder-style insert, replacing any previous entry for `key`.
    pub fn with_entry(mut self, key: impl Into<String>, entry: TranslationEntry) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    /// Merges `other` into this table; entries from `other` win.
    pub fn merge(mut self, other: TranslationTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TranslationEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves `key` for `locale`, falling back to English. `None` when the
    /// key is unknown or has neither text.
    pub fn resolve_text(&self, key: &str, locale: Locale) -> Option<&str> {
        let Some(entry) = self.entries.get(key) else {
            tracing::debug!("Translation for '{}' not found", key);
            return None;
        };

        let text = entry.resolve(locale);
        if text.is_none() {
            tracing::debug!(
                "Translation for '{}' has neither '{}' nor 'en' text",
                key,
                locale
            );
        }
        text
    }

    /// Resolves `key` for `locale` without substituting placeholders,
    /// returning the key itself when nothing resolves.
    pub fn lookup<'a>(&'a self, key: &'a str, locale: Locale) -> &'a str {
        self.resolve_text(key, locale).unwrap_or(key)
    }

    /// Resolves `key` for `locale` and substitutes `params` into the
    /// resolved text. A key that does not resolve is returned unchanged.
    pub fn translate(&self, key: &str, locale: Locale, params: Option<&Params>) -> String {
        match (self.resolve_text(key, locale), params) {
            (Some(text), Some(params)) => params.apply(text).into_owned(),
            (Some(text), None) => text.to_string(),
            (None, _) => key.to_string(),
        }
    }

    /// Checks every entry for missing locales and inconsistent placeholders.
    pub fn audit(&self) -> AuditReport {
        audit_table(self)
    }
}
