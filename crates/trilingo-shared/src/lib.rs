#![doc = include_str!("../README.md")]

mod locale;
mod surface;

pub use locale::{Locale, ParseLocaleError};
pub use surface::{ParseSurfaceError, Surface};

#[doc(hidden)]
pub use unic_langid;
