//! CLI error types rendered as miette diagnostics.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;
use trilingo_store::StorageError;
use trilingo_toml::ConfigError;

/// Error when trilingo.toml is not found.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", .expected_path.display())]
#[diagnostic(
    code(trilingo::config::not_found),
    help(
        "Create a trilingo.toml file, pass --config, or set TRILINGO_CONFIG. A minimal file:\n\n  \
          translations = \"i18n/ui.toml\"\n  \
          storage = \"state/locale.toml\"\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when trilingo.toml names no translation files.
#[derive(Debug, Diagnostic, Error)]
#[error("no translation files configured")]
#[diagnostic(
    code(trilingo::config::no_translations),
    help("Add `translations = \"i18n/ui.toml\"` (or a list of files) to trilingo.toml")
)]
pub struct NoTranslationsError;

/// Error when a configured translation file does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("translation file not found: {}", .path.display())]
#[diagnostic(
    code(trilingo::config::translations_not_found),
    help("Create the file or fix the `translations` entry in trilingo.toml")
)]
pub struct TranslationFileNotFoundError {
    pub path: PathBuf,
}

/// Error when a locale command has nowhere to persist to.
#[derive(Debug, Diagnostic, Error)]
#[error("no locale storage configured")]
#[diagnostic(
    code(trilingo::locale::no_storage),
    help("Set `storage = \"state/locale.toml\"` in trilingo.toml or pass --storage")
)]
pub struct StorageNotConfiguredError;

/// Error when an entity file is not valid JSON.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to read entity from {}", .path.display())]
#[diagnostic(
    code(trilingo::resolve::invalid_entity),
    help("The entity must be a JSON object such as {{\"titleAz\": \"...\", \"titleEn\": \"...\"}}")
)]
pub struct EntityParseError {
    pub path: PathBuf,

    #[source]
    pub source: serde_json::Error,
}

/// A key without English text.
#[derive(Debug, Diagnostic, Error)]
#[error("key '{key}' has no English text")]
#[diagnostic(code(trilingo::check::missing_english), severity(Error))]
pub struct MissingEnglishError {
    /// The translation file defining the key.
    #[source_code]
    pub src: NamedSource<String>,

    #[label("defined here")]
    pub span: Option<SourceSpan>,

    pub key: String,

    #[help]
    pub help: String,
}

/// A key without text for a non-English locale.
#[derive(Debug, Diagnostic, Error)]
#[error("key '{key}' has no '{locale}' text")]
#[diagnostic(code(trilingo::check::missing_locale), severity(Warning))]
pub struct MissingLocaleWarning {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("falls back to English")]
    pub span: Option<SourceSpan>,

    pub key: String,

    pub locale: String,

    #[help]
    pub help: String,
}

/// A locale whose placeholders differ from the English text.
#[derive(Debug, Diagnostic, Error)]
#[error("key '{key}' uses different placeholders in '{locale}'")]
#[diagnostic(code(trilingo::check::placeholder_mismatch), severity(Warning))]
pub struct PlaceholderMismatchWarning {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("placeholders differ from 'en'")]
    pub span: Option<SourceSpan>,

    pub key: String,

    pub locale: String,

    #[help]
    pub help: String,
}

/// Aggregated result of `trilingo check`.
#[derive(Debug, Diagnostic, Error)]
#[error("check found {error_count} error(s) and {warning_count} warning(s)")]
#[diagnostic(code(trilingo::check::report))]
pub struct ValidationReport {
    pub error_count: usize,

    pub warning_count: usize,

    #[related]
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum ValidationIssue {
    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingEnglish(#[from] MissingEnglishError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingLocale(#[from] MissingLocaleWarning),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PlaceholderMismatch(#[from] PlaceholderMismatchWarning),
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoTranslations(#[from] NoTranslationsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TranslationFileNotFound(#[from] TranslationFileNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    StorageNotConfigured(#[from] StorageNotConfiguredError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    EntityParse(#[from] EntityParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationReport),

    #[error("{0}")]
    #[diagnostic(code(trilingo::config::invalid))]
    Config(ConfigError),

    #[error("failed to persist locale: {0}")]
    #[diagnostic(code(trilingo::locale::storage))]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    #[diagnostic(code(trilingo::io))]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => ConfigNotFoundError {
                expected_path: path,
            }
            .into(),
            ConfigError::TranslationsNotFound { path } => {
                TranslationFileNotFoundError { path }.into()
            },
            other => CliError::Config(other),
        }
    }
}

/// Finds the `[key]` table header defining `key` and spans the key inside
/// the brackets.
pub fn find_key_span(source: &str, key: &str) -> Option<SourceSpan> {
    let header = format!("[{key}]");
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(&header) {
            let rest = rest.trim();
            if rest.is_empty() || rest.starts_with('#') {
                let key_start = line_start + (line.len() - trimmed.len()) + 1;
                return Some(SourceSpan::new(key_start.into(), key.len()));
            }
        }
        line_start += line.len();
    }
    None
}
