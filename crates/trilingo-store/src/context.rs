use crate::storage::LocaleStorage;
use crate::store::LocaleStore;
use crate::translator::Translator;
use std::sync::Arc;
use thiserror::Error;
use trilingo_core::TranslationTable;
use trilingo_shared::Surface;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("the admin and lms surfaces must use different storage keys, both use '{0}'")]
pub struct DuplicateSurfaceKey(pub String);

/// Persisted storage keys for each surface.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SurfaceKeys {
    pub admin: String,
    pub lms: String,
}

impl Default for SurfaceKeys {
    fn default() -> Self {
        Self {
            admin: Surface::Admin.default_storage_key().to_string(),
            lms: Surface::Lms.default_storage_key().to_string(),
        }
    }
}

impl SurfaceKeys {
    pub fn get(&self, surface: Surface) -> &str {
        match surface {
            Surface::Admin => &self.admin,
            Surface::Lms => &self.lms,
        }
    }
}

/// The locale state of an application, created once at the composition root
/// and handed down to each subtree.
///
/// Owns one independent [`LocaleStore`] per surface over a shared storage
/// backend.
#[derive(Clone, Debug)]
pub struct LocaleContext {
    admin: LocaleStore,
    lms: LocaleStore,
}

impl LocaleContext {
    /// Builds both surface stores using their default storage keys.
    pub fn new(storage: Arc<dyn LocaleStorage>) -> Self {
        Self {
            admin: LocaleStore::for_surface(Surface::Admin, Arc::clone(&storage)),
            lms: LocaleStore::for_surface(Surface::Lms, storage),
        }
    }

    /// Builds both surface stores with explicit storage keys.
    pub fn with_keys(
        storage: Arc<dyn LocaleStorage>,
        keys: SurfaceKeys,
    ) -> Result<Self, DuplicateSurfaceKey> {
        if keys.admin == keys.lms {
            return Err(DuplicateSurfaceKey(keys.admin));
        }

        Ok(Self {
            admin: LocaleStore::new(Surface::Admin, keys.admin, Arc::clone(&storage)),
            lms: LocaleStore::new(Surface::Lms, keys.lms, storage),
        })
    }

    pub fn admin(&self) -> &LocaleStore {
        &self.admin
    }

    pub fn lms(&self) -> &LocaleStore {
        &self.lms
    }

    pub fn store(&self, surface: Surface) -> &LocaleStore {
        match surface {
            Surface::Admin => &self.admin,
            Surface::Lms => &self.lms,
        }
    }

    /// A translator bound to `surface`'s current locale.
    pub fn translator(&self, surface: Surface, table: Arc<TranslationTable>) -> Translator {
        Translator::new(self.store(surface).clone(), table)
    }
}
