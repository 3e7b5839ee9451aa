use crate::entity::LocalizedEntity;
use crate::fallback::fallback_chain;
use crate::field::{MISSING_PLACEHOLDER, field_key};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use trilingo_shared::Locale;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocalizedTextError {
    /// The default-locale variant must be filled in when a record is created.
    #[error("field '{field}' requires an Azerbaijani value")]
    MissingDefault { field: String },
}

/// Owned text in all three locales, as entered on an authoring form.
///
/// Expands to and from the `<prefix>Az`/`<prefix>Ru`/`<prefix>En` field
/// triple that records store.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub az: String,
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(az: impl Into<String>, ru: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            az: az.into(),
            ru: ru.into(),
            en: en.into(),
        }
    }

    /// Reads the three variants of `field_prefix` from a record. Missing
    /// variants become empty strings.
    pub fn from_entity<E: LocalizedEntity + ?Sized>(entity: &E, field_prefix: &str) -> Self {
        let read = |locale| {
            entity
                .localized_value(&field_key(field_prefix, locale))
                .unwrap_or_default()
                .to_string()
        };
        Self {
            az: read(Locale::Az),
            ru: read(Locale::Ru),
            en: read(Locale::En),
        }
    }

    /// The raw variant for one locale, without fallback.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Az => &self.az,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
        }
    }

    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        let slot = match locale {
            Locale::Az => &mut self.az,
            Locale::Ru => &mut self.ru,
            Locale::En => &mut self.en,
        };
        *slot = value.into();
    }

    /// The best variant for `locale`, following the same chain as
    /// [`resolve_field`](crate::resolve_field).
    pub fn resolve(&self, locale: Locale) -> &str {
        fallback_chain(locale)
            .into_iter()
            .map(|candidate| self.get(candidate))
            .find(|value| !value.is_empty())
            .unwrap_or(MISSING_PLACEHOLDER)
    }

    pub fn is_blank(&self) -> bool {
        Locale::ALL.iter().all(|locale| self.get(*locale).trim().is_empty())
    }

    /// Checks the creation-time invariant that the default locale is filled in.
    pub fn validate(&self, field_prefix: &str) -> Result<(), LocalizedTextError> {
        if self.az.trim().is_empty() {
            return Err(LocalizedTextError::MissingDefault {
                field: field_prefix.to_string(),
            });
        }
        Ok(())
    }

    /// Expands into record fields; empty variants are written as empty
    /// strings so the record shape stays uniform.
    pub fn to_fields(&self, field_prefix: &str) -> Map<String, Value> {
        Locale::ALL
            .into_iter()
            .map(|locale| {
                (
                    field_key(field_prefix, locale),
                    Value::String(self.get(locale).to_string()),
                )
            })
            .collect()
    }
}
