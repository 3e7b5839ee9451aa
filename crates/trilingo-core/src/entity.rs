//! Read access to records carrying parallel localized fields.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A record whose string fields can be looked up by name.
///
/// Implementations return `None` for missing keys and for values that are not
/// strings; the resolver treats both the same as an empty variant.
pub trait LocalizedEntity {
    fn localized_value(&self, key: &str) -> Option<&str>;
}

impl LocalizedEntity for Map<String, Value> {
    fn localized_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl LocalizedEntity for Value {
    fn localized_value(&self, key: &str) -> Option<&str> {
        match self {
            Value::Object(map) => map.localized_value(key),
            _ => None,
        }
    }
}

impl<S: BuildHasher> LocalizedEntity for HashMap<String, String, S> {
    fn localized_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> LocalizedEntity for HashMap<&str, &str, S> {
    fn localized_value(&self, key: &str) -> Option<&str> {
        self.get(key).copied()
    }
}

impl LocalizedEntity for BTreeMap<String, String> {
    fn localized_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<S: BuildHasher> LocalizedEntity for IndexMap<String, String, S> {
    fn localized_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: LocalizedEntity + ?Sized> LocalizedEntity for &T {
    fn localized_value(&self, key: &str) -> Option<&str> {
        (**self).localized_value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_exposes_only_strings() {
        let value = json!({ "titleAz": "Kurs", "order": 3, "titleRu": null });
        assert_eq!(value.localized_value("titleAz"), Some("Kurs"));
        assert_eq!(value.localized_value("order"), None);
        assert_eq!(value.localized_value("titleRu"), None);
        assert_eq!(value.localized_value("missing"), None);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        assert_eq!(json!("titleAz").localized_value("titleAz"), None);
        assert_eq!(json!([1, 2]).localized_value("0"), None);
    }

    #[test]
    fn string_maps() {
        let mut owned = HashMap::new();
        owned.insert("nameEn".to_string(), "Kamran".to_string());
        assert_eq!(owned.localized_value("nameEn"), Some("Kamran"));

        let borrowed: HashMap<&str, &str> = [("nameRu", "Камран")].into_iter().collect();
        assert_eq!(borrowed.localized_value("nameRu"), Some("Камран"));

        let sorted: BTreeMap<String, String> =
            [("nameAz".to_string(), "Kamran".to_string())].into_iter().collect();
        assert_eq!((&sorted).localized_value("nameAz"), Some("Kamran"));
    }
}
