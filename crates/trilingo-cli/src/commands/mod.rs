//! CLI command implementations.

mod check;
mod common;
mod locale;
mod resolve;
mod translate;

pub use check::{CheckArgs, run_check};
pub use common::{ConfigArgs, parse_param};
pub use locale::{LocaleArgs, LocaleCommand, run_locale};
pub use resolve::{ResolveArgs, run_resolve};
pub use translate::{TranslateArgs, run_translate};
