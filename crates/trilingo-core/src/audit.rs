//! Consistency checks over a [`TranslationTable`].

use crate::translation::TranslationTable;
use std::collections::BTreeSet;
use trilingo_shared::Locale;

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Error,
    Warning,
}

/// A single problem found in a translation table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuditIssue {
    /// The key has no English text, so it renders as the raw key whenever
    /// the requested locale is missing too.
    MissingEnglish { key: String },
    /// The key has no text for a non-English locale and will fall back to
    /// English.
    MissingLocale { key: String, locale: Locale },
    /// A locale uses a different set of `{placeholders}` than English.
    PlaceholderMismatch {
        key: String,
        locale: Locale,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl AuditIssue {
    pub fn severity(&self) -> Severity {
        match self {
            AuditIssue::MissingEnglish { .. } => Severity::Error,
            AuditIssue::MissingLocale { .. } | AuditIssue::PlaceholderMismatch { .. } => {
                Severity::Warning
            },
        }
    }

    pub fn key(&self) -> &str {
        match self {
            AuditIssue::MissingEnglish { key }
            | AuditIssue::MissingLocale { key, .. }
            | AuditIssue::PlaceholderMismatch { key, .. } => key,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuditReport {
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }
}

/// Whether `name` can appear as `{name}`: a non-empty run of letters, digits
/// and `_` in any script. [`Params::apply`](crate::Params::apply) only
/// substitutes such names.
pub fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Returns the distinct `{name}` placeholders in `text`, sorted.
///
/// Only brace pairs around a valid [`is_placeholder_name`] count; other
/// brace pairs are literal text.
pub fn placeholders(text: &str) -> BTreeSet<&str> {
    let mut found = BTreeSet::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                if is_placeholder_name(name) {
                    found.insert(name);
                    rest = &after[close + 1..];
                } else {
                    rest = after;
                }
            },
            None => break,
        }
    }

    found
}

pub(crate) fn audit_table(table: &TranslationTable) -> AuditReport {
    let mut issues = Vec::new();

    for (key, entry) in table.iter() {
        let english = entry.get(Locale::En);
        if english.is_none() {
            issues.push(AuditIssue::MissingEnglish {
                key: key.to_string(),
            });
        }

        for locale in [Locale::Az, Locale::Ru] {
            let Some(text) = entry.get(locale) else {
                issues.push(AuditIssue::MissingLocale {
                    key: key.to_string(),
                    locale,
                });
                continue;
            };

            if let Some(english) = english {
                let expected = placeholders(english);
                let found = placeholders(text);
                if expected != found {
                    issues.push(AuditIssue::PlaceholderMismatch {
                        key: key.to_string(),
                        locale,
                        expected: expected.into_iter().map(str::to_string).collect(),
                        found: found.into_iter().map(str::to_string).collect(),
                    });
                }
            }
        }
    }

    AuditReport { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::TranslationEntry;
    use rstest::rstest;

    #[rstest]
    #[case("Hello, {name}!", &["name"])]
    #[case("{done}/{total}, {done}", &["done", "total"])]
    #[case("{} and { spaced } and {a-b}", &[])]
    #[case("unclosed {name", &[])]
    #[case("{{nested}}", &["nested"])]
    #[case("Привет, {имя}! {ad_soyad}", &["ad_soyad", "имя"])]
    #[case("plain", &[])]
    fn extracts_placeholders(#[case] text: &str, #[case] expected: &[&str]) {
        let found: Vec<&str> = placeholders(text).into_iter().collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn complete_table_is_clean() {
        let table = TranslationTable::from_entries([(
            "greeting",
            TranslationEntry::new()
                .with(Locale::Az, "Salam, {name}!")
                .with(Locale::Ru, "Привет, {name}!")
                .with(Locale::En, "Hello, {name}!"),
        )]);
        assert!(table.audit().is_clean());
    }

    #[test]
    fn reports_each_kind_of_issue() {
        let table = TranslationTable::from_entries([
            (
                "no.english",
                TranslationEntry::new()
                    .with(Locale::Az, "Az")
                    .with(Locale::Ru, "Ru"),
            ),
            (
                "no.russian",
                TranslationEntry::new()
                    .with(Locale::Az, "Az")
                    .with(Locale::Ru, "")
                    .with(Locale::En, "En"),
            ),
            (
                "bad.placeholder",
                TranslationEntry::new()
                    .with(Locale::Az, "Salam, {ad}!")
                    .with(Locale::Ru, "Привет, {name}!")
                    .with(Locale::En, "Hello, {name}!"),
            ),
        ]);

        let report = table.audit();
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(
            report.issues,
            vec![
                AuditIssue::MissingEnglish {
                    key: "no.english".to_string()
                },
                AuditIssue::MissingLocale {
                    key: "no.russian".to_string(),
                    locale: Locale::Ru
                },
                AuditIssue::PlaceholderMismatch {
                    key: "bad.placeholder".to_string(),
                    locale: Locale::Az,
                    expected: vec!["name".to_string()],
                    found: vec!["ad".to_string()],
                },
            ]
        );
    }
}
