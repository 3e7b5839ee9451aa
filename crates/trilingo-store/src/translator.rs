use crate::store::LocaleStore;
use std::sync::Arc;
use trilingo_core::{LocalizedEntity, LocalizedText, Params, TranslationTable, resolve_field};
use trilingo_shared::Locale;

/// Translation helpers for one consumer, always reading the store's current
/// locale at call time.
#[derive(Clone, Debug)]
pub struct Translator {
    store: LocaleStore,
    table: Arc<TranslationTable>,
}

impl Translator {
    pub fn new(store: LocaleStore, table: Arc<TranslationTable>) -> Self {
        Self { store, table }
    }

    pub fn locale(&self) -> Locale {
        self.store.get_locale()
    }

    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Translates a UI string key.
    pub fn t(&self, key: &str) -> String {
        self.table.translate(key, self.locale(), None)
    }

    /// Translates a UI string key and fills its `{placeholders}`.
    pub fn t_with(&self, key: &str, params: &Params) -> String {
        self.table.translate(key, self.locale(), Some(params))
    }

    /// Resolves a localized record field.
    pub fn field<'a, E>(&self, entity: Option<&'a E>, field_prefix: &str) -> &'a str
    where
        E: LocalizedEntity + ?Sized,
    {
        resolve_field(entity, field_prefix, self.locale())
    }

    pub fn text<'a>(&self, text: &'a LocalizedText) -> &'a str {
        text.resolve(self.locale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LocaleContext;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use trilingo_core::TranslationEntry;
    use trilingo_shared::Surface;

    fn table() -> Arc<TranslationTable> {
        Arc::new(TranslationTable::from_entries([
            (
                "welcome",
                TranslationEntry::new()
                    .with(Locale::Az, "Xoş gəldin, {name}")
                    .with(Locale::Ru, "Добро пожаловать, {name}")
                    .with(Locale::En, "Welcome, {name}"),
            ),
            (
                "courses",
                TranslationEntry::new()
                    .with(Locale::Az, "Kurslar")
                    .with(Locale::En, "Courses"),
            ),
        ]))
    }

    #[test]
    fn follows_store_locale_changes() {
        let context = LocaleContext::new(Arc::new(MemoryStorage::new()));
        let translator = context.translator(Surface::Lms, table());
        let course = json!({ "titleAz": "Riyaziyyat", "titleRu": "Математика", "titleEn": "" });

        assert_eq!(translator.t("courses"), "Kurslar");
        assert_eq!(translator.field(Some(&course), "title"), "Riyaziyyat");

        context.lms().set_locale(Locale::Ru).unwrap();

        assert_eq!(translator.t("courses"), "Courses");
        assert_eq!(
            translator.t_with("welcome", &Params::new().with("name", "Aysel")),
            "Добро пожаловать, Aysel"
        );
        assert_eq!(translator.field(Some(&course), "title"), "Математика");

        context.lms().set_locale(Locale::En).unwrap();
        assert_eq!(translator.field(Some(&course), "title"), "Riyaziyyat");
    }

    #[test]
    fn unaffected_by_other_surface() {
        let context = LocaleContext::new(Arc::new(MemoryStorage::new()));
        let admin = context.translator(Surface::Admin, table());

        context.lms().set_locale(Locale::En).unwrap();
        assert_eq!(admin.locale(), Locale::Az);
        assert_eq!(admin.t("missing.key"), "missing.key");
        assert_eq!(admin.text(&LocalizedText::new("", "", "Only English")), "Only English");
    }
}
