// CLI output. Results go to stdout with println!, logs go to stderr through tracing.

use colored::Colorize as _;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use trilingo_shared::{Locale, Surface};

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `verbose`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn print_check_header() {
    println!("{}", "Trilingo Translation Checker".dimmed());
}

pub fn print_loaded(path: &Path, key_count: usize) {
    println!(
        "{} {} ({} keys)",
        "Loaded".dimmed(),
        path.display().to_string().green(),
        key_count.to_string().cyan()
    );
}

pub fn print_check_success(key_count: usize) {
    println!(
        "{} {}",
        "No issues found!".green(),
        format!("({} keys)", key_count).dimmed()
    );
}

pub fn print_check_warnings(warning_count: usize) {
    println!(
        "{} {}",
        format!("{} warning(s)", warning_count).yellow(),
        "(pass --strict to fail on warnings)".dimmed()
    );
}

pub fn print_surface_locale(surface: Surface, locale: Locale) {
    println!("{}: {}", surface.to_string().dimmed(), locale.to_string().cyan());
}

pub fn print_locale_set(surface: Surface, locale: Locale, path: &Path) {
    println!(
        "{} {} {} {} {}",
        "Set".green(),
        surface.to_string().white().bold(),
        "locale to".dimmed(),
        locale.to_string().cyan(),
        format!("in {}", path.display()).dimmed()
    );
}

pub fn print_value(value: &str) {
    println!("{value}");
}
