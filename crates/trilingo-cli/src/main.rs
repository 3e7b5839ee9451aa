use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use trilingo_cli::commands::{
    CheckArgs, LocaleArgs, ResolveArgs, TranslateArgs, run_check, run_locale, run_resolve,
    run_translate,
};

#[derive(Parser)]
#[command(name = "trilingo")]
#[command(about = "Check translation tables, resolve localized fields and manage persisted locales")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the configured translation tables for missing text and placeholders
    Check(CheckArgs),

    /// Translate a key into a locale
    Translate(TranslateArgs),

    /// Resolve a localized field of a JSON entity
    Resolve(ResolveArgs),

    /// Read or change the persisted locale of a surface
    Locale(LocaleArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    trilingo_cli::utils::ui::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Translate(args) => run_translate(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Locale(args) => run_locale(args),
    };

    result.map_err(miette::Report::new)
}
