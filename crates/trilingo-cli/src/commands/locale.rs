use crate::commands::common::ConfigArgs;
use crate::core::{CliError, StorageNotConfiguredError};
use crate::utils::ui;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use trilingo_shared::{Locale, Surface};
use trilingo_store::{FileStorage, LocaleContext};
use trilingo_toml::TrilingoConfig;

/// Arguments for the locale command.
#[derive(Debug, Args)]
pub struct LocaleArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Locale storage file, overriding `storage` in trilingo.toml.
    #[arg(short, long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: LocaleCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocaleCommand {
    /// Print the persisted locale of one surface, or of every surface
    Get {
        #[arg(long)]
        surface: Option<Surface>,
    },

    /// Persist a new locale for a surface
    Set {
        #[arg(long)]
        surface: Surface,

        locale: Locale,
    },
}

/// Run the locale command.
pub fn run_locale(args: LocaleArgs) -> Result<(), CliError> {
    let config = match args.config.load() {
        Ok(config) => config,
        // An explicit storage file makes a discovered config optional.
        Err(CliError::ConfigNotFound(_))
            if args.config.config.is_none() && args.storage.is_some() =>
        {
            TrilingoConfig::default()
        },
        Err(err) => return Err(err),
    };

    let path = args
        .storage
        .or_else(|| config.storage_path())
        .ok_or(StorageNotConfiguredError)?;
    let context = config.locale_context(Arc::new(FileStorage::new(path.clone())))?;

    match args.command {
        LocaleCommand::Get { surface } => {
            let surfaces = match surface {
                Some(surface) => vec![surface],
                None => Surface::ALL.to_vec(),
            };
            for surface in surfaces {
                ui::print_surface_locale(surface, context.store(surface).get_locale());
            }
        },
        LocaleCommand::Set { surface, locale } => {
            persist(&context, surface, locale)?;
            ui::print_locale_set(surface, locale, &path);
        },
    }

    Ok(())
}

fn persist(context: &LocaleContext, surface: Surface, locale: Locale) -> Result<(), CliError> {
    let store = context.store(surface);
    let previous = store.get_locale();
    store.set_locale(locale)?;
    tracing::debug!(
        "Changed {} locale from '{}' to '{}' under key '{}'",
        surface,
        previous,
        locale,
        store.storage_key()
    );
    Ok(())
}
