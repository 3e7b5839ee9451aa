use trilingo_shared::Locale;

/// Returns the fixed order in which localized variants are tried for the
/// requested locale.
///
/// The requested locale always comes first. Russian readers fall back to
/// English before Azerbaijani; English and Azerbaijani readers fall back to
/// each other before Russian.
pub const fn fallback_chain(requested: Locale) -> [Locale; 3] {
    match requested {
        Locale::Ru => [Locale::Ru, Locale::En, Locale::Az],
        Locale::En => [Locale::En, Locale::Az, Locale::Ru],
        Locale::Az => [Locale::Az, Locale::En, Locale::Ru],
    }
}

/// Like [`fallback_chain`], for a raw locale code.
///
/// Unrecognized codes use the default locale's chain.
pub fn fallback_chain_for_code(code: &str) -> [Locale; 3] {
    fallback_chain(Locale::from_code_lossy(code))
}
