//! Check command for auditing the configured translation tables.
//!
//! Keys without English text are errors, since they render as the raw key
//! whenever the requested locale is missing too. Missing Azerbaijani or
//! Russian text and placeholder sets that differ from English are warnings.

use crate::commands::common::ConfigArgs;
use crate::core::{
    CliError, MissingEnglishError, MissingLocaleWarning, NoTranslationsError,
    PlaceholderMismatchWarning, TranslationFileNotFoundError, ValidationIssue, ValidationReport,
    find_key_span,
};
use crate::utils::ui;
use clap::Parser;
use miette::{NamedSource, SourceSpan};
use std::path::PathBuf;
use trilingo_core::{AuditIssue, TranslationTable};
use trilingo_toml::parse_translations;

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    pub strict: bool,
}

/// A loaded translation file, kept for diagnostics.
struct TranslationSource {
    path: PathBuf,
    content: String,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let config = args.config.load()?;
    let paths = config.translation_paths();
    if paths.is_empty() {
        return Err(NoTranslationsError.into());
    }

    ui::print_check_header();

    let mut table = TranslationTable::new();
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.exists() {
            return Err(TranslationFileNotFoundError { path }.into());
        }
        let content = fs_err::read_to_string(&path)?;
        let parsed = parse_translations(&content, &path)?;
        ui::print_loaded(&path, parsed.len());

        table = table.merge(parsed);
        sources.push(TranslationSource { path, content });
    }

    let audit = table.audit();
    let error_count = audit.error_count();
    let warning_count = audit.warning_count();

    if audit.is_clean() {
        ui::print_check_success(table.len());
        return Ok(());
    }

    let mut issues: Vec<ValidationIssue> = audit
        .issues
        .into_iter()
        .map(|issue| to_diagnostic(issue, &sources))
        .collect();
    issues.sort_by_key(|issue| issue.sort_key());

    let report = ValidationReport {
        error_count,
        warning_count,
        issues,
    };

    if error_count > 0 || args.strict {
        return Err(report.into());
    }

    eprintln!("{:?}", miette::Report::new(report));
    ui::print_check_warnings(warning_count);
    Ok(())
}

/// The source that wins for `key`: the last file defining it.
fn locate(key: &str, sources: &[TranslationSource]) -> (NamedSource<String>, Option<SourceSpan>) {
    let found = sources
        .iter()
        .rev()
        .find_map(|source| find_key_span(&source.content, key).map(|span| (source, Some(span))));

    match found.or_else(|| sources.last().map(|source| (source, None))) {
        Some((source, span)) => (
            NamedSource::new(source.path.display().to_string(), source.content.clone()),
            span,
        ),
        None => (NamedSource::new("", String::new()), None),
    }
}

fn to_diagnostic(issue: AuditIssue, sources: &[TranslationSource]) -> ValidationIssue {
    let (src, span) = locate(issue.key(), sources);

    match issue {
        AuditIssue::MissingEnglish { key } => MissingEnglishError {
            help: format!("Add `en = \"...\"` under [{key}]"),
            src,
            span,
            key,
        }
        .into(),
        AuditIssue::MissingLocale { key, locale } => MissingLocaleWarning {
            help: format!("Add `{locale} = \"...\"` under [{key}]"),
            src,
            span,
            key,
            locale: locale.to_string(),
        }
        .into(),
        AuditIssue::PlaceholderMismatch {
            key,
            locale,
            expected,
            found,
        } => PlaceholderMismatchWarning {
            help: format!(
                "'en' uses {}, '{}' uses {}",
                placeholder_list(&expected),
                locale,
                placeholder_list(&found)
            ),
            src,
            span,
            key,
            locale: locale.to_string(),
        }
        .into(),
    }
}

fn placeholder_list(names: &[String]) -> String {
    if names.is_empty() {
        return "no placeholders".to_string();
    }
    names
        .iter()
        .map(|name| format!("{{{name}}}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationIssue {
    /// Deterministic ordering: errors first, then by key.
    pub fn sort_key(&self) -> (u8, String, String) {
        match self {
            ValidationIssue::MissingEnglish(e) => (0, e.key.clone(), String::new()),
            ValidationIssue::MissingLocale(e) => (1, e.key.clone(), e.locale.clone()),
            ValidationIssue::PlaceholderMismatch(e) => (2, e.key.clone(), e.locale.clone()),
        }
    }
}
