use crate::core::{CliError, EntityParseError};
use crate::utils::ui;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use trilingo_core::{fallback_chain_for_code, field_key, resolve_field_str};

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// JSON file holding the entity.
    #[arg(short, long)]
    pub entity: PathBuf,

    /// Field prefix, e.g. `title` for titleAz/titleRu/titleEn.
    #[arg(short, long)]
    pub field: String,

    /// Locale code; unrecognized codes resolve like `az`.
    #[arg(short, long, default_value = "az")]
    pub locale: String,
}

/// Prints the best localized variant of a field of a JSON entity.
pub fn run_resolve(args: ResolveArgs) -> Result<(), CliError> {
    let content = fs_err::read_to_string(&args.entity)?;
    let entity: Value = serde_json::from_str(&content).map_err(|source| EntityParseError {
        path: args.entity.clone(),
        source,
    })?;

    tracing::debug!(
        "Resolving '{}' through {:?}",
        args.field,
        fallback_chain_for_code(&args.locale)
            .map(|locale| field_key(&args.field, locale))
    );

    ui::print_value(resolve_field_str(Some(&entity), &args.field, &args.locale));
    Ok(())
}
