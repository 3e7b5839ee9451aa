use crate::commands::common::{ConfigArgs, parse_param};
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use trilingo_core::{ParamValue, Params};
use trilingo_shared::Locale;

/// Arguments for the translate command.
#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// The translation key.
    pub key: String,

    /// Locale to translate into.
    #[arg(short, long, default_value_t = Locale::Az)]
    pub locale: Locale,

    /// Placeholder value as name=value; may be repeated.
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, ParamValue)>,
}

/// Prints the translation of a key, or the key itself when it has none.
pub fn run_translate(args: TranslateArgs) -> Result<(), CliError> {
    let config = args.config.load()?;
    let table = config.load_translations()?;

    let text = if args.params.is_empty() {
        table.translate(&args.key, args.locale, None)
    } else {
        let params: Params = args.params.into_iter().collect();
        table.translate(&args.key, args.locale, Some(&params))
    };

    ui::print_value(&text);
    Ok(())
}
