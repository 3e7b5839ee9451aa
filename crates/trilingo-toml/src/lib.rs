#![doc = include_str!("../README.md")]

mod translations;

pub use translations::{load_translation_file, parse_translations};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, io};
use thiserror::Error;
use trilingo_core::TranslationTable;
use trilingo_store::{FileStorage, LocaleContext, LocaleStorage, SurfaceKeys};

/// File name looked up in a directory.
pub const CONFIG_FILE_NAME: &str = "trilingo.toml";

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "TRILINGO_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    /// A configured translation file does not exist.
    #[error("translation file not found: {}", .path.display())]
    TranslationsNotFound { path: PathBuf },
    /// Failed to read a configuration or translation file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] io::Error),
    /// Failed to parse the configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Both surfaces were configured with the same storage key.
    #[error("The admin and lms surfaces must use different storage keys, both use '{0}'")]
    DuplicateSurfaceKey(String),
    /// A translation file is not valid TOML.
    #[error("Failed to parse translation file '{}': {source}", .path.display())]
    TranslationParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// A translation file parsed but has an unexpected shape.
    #[error("Invalid translation entry '{key}' in '{}': {reason}", .path.display())]
    InvalidEntry {
        path: PathBuf,
        key: String,
        reason: String,
    },
}

/// Represents the `translations` field, a single path or a list of paths.
///
/// ```toml
/// translations = "i18n/ui.toml"
/// ```
///
/// ```toml
/// translations = ["i18n/common.toml", "i18n/lms.toml"]
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TranslationPaths {
    Single(PathBuf),
    Multiple(Vec<PathBuf>),
}

impl TranslationPaths {
    pub fn as_vec(&self) -> Vec<PathBuf> {
        match self {
            TranslationPaths::Single(path) => vec![path.clone()],
            TranslationPaths::Multiple(paths) => paths.clone(),
        }
    }
}

/// Optional overrides of the persisted storage key per surface.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SurfacesConfig {
    #[serde(default)]
    pub admin: Option<String>,
    #[serde(default)]
    pub lms: Option<String>,
}

/// The contents of `trilingo.toml`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrilingoConfig {
    /// Translation table file(s); later files override keys of earlier ones.
    #[serde(default)]
    pub translations: Option<TranslationPaths>,
    /// Path of the file used to persist locale choices.
    #[serde(default)]
    pub storage: Option<PathBuf>,
    #[serde(default)]
    pub surfaces: SurfacesConfig,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for TrilingoConfig {
    fn default() -> Self {
        Self {
            translations: None,
            storage: None,
            surfaces: SurfacesConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl TrilingoConfig {
    /// Reads the configuration from a path. Relative paths inside it resolve
    /// against the file's directory.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs_err::read_to_string(path)?;
        let mut config: TrilingoConfig = toml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::debug!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    /// Reads `trilingo.toml` from a directory.
    pub fn read_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        Self::read_from_path(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Reads the file named by `TRILINGO_CONFIG`, else `./trilingo.toml`.
    pub fn discover() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::read_from_path(PathBuf::from(path)),
            _ => Self::read_from_dir(env::current_dir()?),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Translation files, resolved against the config directory.
    pub fn translation_paths(&self) -> Vec<PathBuf> {
        self.translations
            .as_ref()
            .map(TranslationPaths::as_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|path| self.base_dir.join(path))
            .collect()
    }

    /// The locale storage file, resolved against the config directory.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage.as_ref().map(|path| self.base_dir.join(path))
    }

    /// The storage key per surface, with defaults filled in.
    pub fn surface_keys(&self) -> Result<SurfaceKeys, ConfigError> {
        let defaults = SurfaceKeys::default();
        let keys = SurfaceKeys {
            admin: self.surfaces.admin.clone().unwrap_or(defaults.admin),
            lms: self.surfaces.lms.clone().unwrap_or(defaults.lms),
        };

        if keys.admin == keys.lms {
            return Err(ConfigError::DuplicateSurfaceKey(keys.admin));
        }
        Ok(keys)
    }

    /// Loads and merges every configured translation file.
    pub fn load_translations(&self) -> Result<TranslationTable, ConfigError> {
        self.translation_paths()
            .iter()
            .try_fold(TranslationTable::new(), |table, path| {
                Ok(table.merge(load_translation_file(path)?))
            })
    }

    /// File-backed storage at the configured path, if one is configured.
    pub fn file_storage(&self) -> Option<FileStorage> {
        self.storage_path().map(FileStorage::new)
    }

    /// Builds the locale context for both surfaces over `storage`.
    pub fn locale_context(
        &self,
        storage: Arc<dyn LocaleStorage>,
    ) -> Result<LocaleContext, ConfigError> {
        let keys = self.surface_keys()?;
        LocaleContext::with_keys(storage, keys)
            .map_err(|duplicate| ConfigError::DuplicateSurfaceKey(duplicate.0))
    }
}
