use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown surface '{0}', expected 'admin' or 'lms'")]
pub struct ParseSurfaceError(pub String);

/// An independently localized UI context.
///
/// Each surface keeps its own persisted locale; changing the locale on one
/// never affects the other.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Surface {
    /// The admin back-office.
    Admin,
    /// The learning-management dashboards.
    Lms,
}

impl Surface {
    pub const ALL: [Surface; 2] = [Surface::Admin, Surface::Lms];

    /// The persisted storage key used when no override is configured.
    pub const fn default_storage_key(self) -> &'static str {
        match self {
            Surface::Admin => "admin_locale",
            Surface::Lms => "lms_locale",
        }
    }
}

impl FromStr for Surface {
    type Err = ParseSurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Surface::Admin),
            "lms" => Ok(Surface::Lms),
            other => Err(ParseSurfaceError(other.to_string())),
        }
    }
}
