#![doc = include_str!("../README.md")]

pub mod audit;
pub mod entity;
pub mod fallback;
pub mod field;
pub mod text;
pub mod translation;

pub use audit::{AuditIssue, AuditReport, Severity, is_placeholder_name, placeholders};
pub use entity::LocalizedEntity;
pub use fallback::{fallback_chain, fallback_chain_for_code};
pub use field::{MISSING_PLACEHOLDER, field_key, resolve_field, resolve_field_str};
pub use text::{LocalizedText, LocalizedTextError};
pub use translation::{ParamValue, Params, TranslationEntry, TranslationTable};

#[doc(hidden)]
pub use trilingo_shared::Locale;
