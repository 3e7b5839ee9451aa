use crate::ConfigError;
use std::path::Path;
use toml::{Table, Value};
use trilingo_core::{TranslationEntry, TranslationTable};
use trilingo_shared::Locale;

/// Reads and parses one translation file.
pub fn load_translation_file<P: AsRef<Path>>(path: P) -> Result<TranslationTable, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::TranslationsNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs_err::read_to_string(path)?;
    let table = parse_translations(&content, path)?;
    tracing::debug!(
        "Loaded {} translation keys from '{}'",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Parses translation file contents. `path` is only used in errors.
pub fn parse_translations(content: &str, path: &Path) -> Result<TranslationTable, ConfigError> {
    let root: Table = toml::from_str(content).map_err(|source| ConfigError::TranslationParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut table = TranslationTable::new();
    for (key, value) in root {
        let Value::Table(section) = value else {
            return Err(invalid(path, &key, "expected a table of locale strings"));
        };
        collect(&mut table, &key, section, path)?;
    }
    Ok(table)
}

fn collect(
    table: &mut TranslationTable,
    key: &str,
    section: Table,
    path: &Path,
) -> Result<(), ConfigError> {
    let mut entry = TranslationEntry::new();
    let mut has_text = false;

    for (field, value) in section {
        match (field.parse::<Locale>(), value) {
            (Ok(locale), Value::String(text)) => {
                entry = entry.with(locale, text);
                has_text = true;
            },
            (Ok(locale), other) => {
                return Err(invalid(
                    path,
                    key,
                    &format!("'{}' must be a string, found {}", locale, other.type_str()),
                ));
            },
            (Err(_), Value::Table(nested)) => {
                collect(table, &format!("{key}.{field}"), nested, path)?;
            },
            (Err(_), _) => {
                return Err(invalid(
                    path,
                    key,
                    &format!("unexpected field '{field}', expected az, ru, en or a nested table"),
                ));
            },
        }
    }

    if has_text {
        *table = std::mem::take(table).with_entry(key, entry);
    }
    Ok(())
}

fn invalid(path: &Path, key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEntry {
        path: path.to_path_buf(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
