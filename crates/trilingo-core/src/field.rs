use crate::entity::LocalizedEntity;
use crate::fallback::{fallback_chain, fallback_chain_for_code};
use trilingo_shared::Locale;

/// Shown when no localized variant of a field is populated.
pub const MISSING_PLACEHOLDER: &str = "—";

/// Builds the field name for one locale variant, e.g. `titleRu`.
pub fn field_key(field_prefix: &str, locale: Locale) -> String {
    let suffix = locale.suffix();
    let mut key = String::with_capacity(field_prefix.len() + suffix.len());
    key.push_str(field_prefix);
    key.push_str(suffix);
    key
}

/// Returns the best available localized value of `field_prefix` for `locale`.
///
/// Variants are tried in [`fallback_chain`] order and the first non-empty
/// string wins. An absent entity, or one with no populated variant, yields
/// [`MISSING_PLACEHOLDER`]. Missing fields are never an error.
///
/// The result depends only on the arguments; callers must resolve again
/// whenever the locale changes rather than caching per entity.
pub fn resolve_field<'a, E>(entity: Option<&'a E>, field_prefix: &str, locale: Locale) -> &'a str
where
    E: LocalizedEntity + ?Sized,
{
    resolve_with_chain(entity, field_prefix, fallback_chain(locale))
}

/// Like [`resolve_field`], for a raw locale code. Unrecognized codes resolve
/// like the default locale.
pub fn resolve_field_str<'a, E>(entity: Option<&'a E>, field_prefix: &str, locale: &str) -> &'a str
where
    E: LocalizedEntity + ?Sized,
{
    resolve_with_chain(entity, field_prefix, fallback_chain_for_code(locale))
}

fn resolve_with_chain<'a, E>(entity: Option<&'a E>, field_prefix: &str, chain: [Locale; 3]) -> &'a str
where
    E: LocalizedEntity + ?Sized,
{
    let Some(entity) = entity else {
        return MISSING_PLACEHOLDER;
    };

    chain
        .into_iter()
        .find_map(|locale| {
            entity
                .localized_value(&field_key(field_prefix, locale))
                .filter(|value| !value.is_empty())
        })
        .unwrap_or(MISSING_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn only(suffix: &str, value: &str) -> Value {
        let mut entity = json!({ "titleAz": "", "titleRu": "", "titleEn": "" });
        entity[format!("title{suffix}")] = Value::String(value.to_string());
        entity
    }

    #[rstest]
    fn single_populated_variant_wins_for_every_locale(
        #[values("Az", "Ru", "En")] suffix: &str,
        #[values(Locale::Az, Locale::Ru, Locale::En)] locale: Locale,
    ) {
        let entity = only(suffix, "only");
        assert_eq!(resolve_field(Some(&entity), "title", locale), "only");
    }

    #[rstest]
    fn nothing_populated_yields_placeholder(
        #[values(Locale::Az, Locale::Ru, Locale::En)] locale: Locale,
    ) {
        let empty = json!({ "titleAz": "", "titleRu": "", "titleEn": "" });
        let missing = json!({});
        assert_eq!(resolve_field(Some(&empty), "title", locale), MISSING_PLACEHOLDER);
        assert_eq!(resolve_field(Some(&missing), "title", locale), MISSING_PLACEHOLDER);
        assert_eq!(resolve_field::<Value>(None, "title", locale), MISSING_PLACEHOLDER);
    }

    #[test]
    fn russian_skips_empty_variant_and_prefers_english() {
        let entity = json!({ "titleAz": "A", "titleRu": "", "titleEn": "E" });
        assert_eq!(resolve_field(Some(&entity), "title", Locale::Ru), "E");
    }

    #[rstest]
    #[case(Locale::Az, "A")]
    #[case(Locale::Ru, "R")]
    #[case(Locale::En, "E")]
    fn requested_variant_first(#[case] locale: Locale, #[case] expected: &str) {
        let entity = json!({ "titleAz": "A", "titleRu": "R", "titleEn": "E" });
        assert_eq!(resolve_field(Some(&entity), "title", locale), expected);
    }

    #[test]
    fn azerbaijani_falls_to_english_before_russian() {
        let entity = json!({ "titleAz": "", "titleRu": "R", "titleEn": "E" });
        assert_eq!(resolve_field(Some(&entity), "title", Locale::Az), "E");
    }

    #[test]
    fn english_falls_to_azerbaijani_before_russian() {
        let entity = json!({ "titleAz": "A", "titleRu": "R", "titleEn": "" });
        assert_eq!(resolve_field(Some(&entity), "title", Locale::En), "A");
    }

    #[test]
    fn russian_uses_azerbaijani_last() {
        let entity = json!({ "titleAz": "A" });
        assert_eq!(resolve_field(Some(&entity), "title", Locale::Ru), "A");
    }

    #[test]
    fn non_string_values_are_skipped() {
        let entity = json!({ "titleAz": 42, "titleEn": "E" });
        assert_eq!(resolve_field(Some(&entity), "title", Locale::Az), "E");
    }

    #[test]
    fn name_scenario() {
        let person = json!({ "nameAz": "Kamran", "nameRu": "", "nameEn": "Kamran" });
        assert_eq!(resolve_field(Some(&person), "name", Locale::Az), "Kamran");
        assert_eq!(resolve_field(Some(&json!({})), "name", Locale::En), "—");
    }

    #[test]
    fn resolution_is_repeatable() {
        let entity = json!({ "titleAz": "A", "titleRu": "", "titleEn": "E" });
        let first = resolve_field(Some(&entity), "title", Locale::Ru);
        let second = resolve_field(Some(&entity), "title", Locale::Ru);
        assert_eq!(first, second);
        // Same entity, other locale, same process.
        assert_eq!(resolve_field(Some(&entity), "title", Locale::Az), "A");
    }

    #[rstest]
    #[case("ru", "R")]
    #[case("en", "E")]
    #[case("az", "A")]
    #[case("fr", "A")]
    #[case("", "A")]
    fn raw_codes(#[case] code: &str, #[case] expected: &str) {
        let entity = json!({ "titleAz": "A", "titleRu": "R", "titleEn": "E" });
        assert_eq!(resolve_field_str(Some(&entity), "title", code), expected);
    }

    #[test]
    fn field_key_appends_suffix() {
        assert_eq!(field_key("description", Locale::En), "descriptionEn");
    }
}
