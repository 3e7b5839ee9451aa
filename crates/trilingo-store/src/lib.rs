#![doc = include_str!("../README.md")]

mod context;
mod storage;
mod store;
mod translator;

pub use context::{DuplicateSurfaceKey, LocaleContext, SurfaceKeys};
pub use storage::{FileStorage, LocaleStorage, MemoryStorage, StorageError};
pub use store::{LocaleStore, SubscriberId, Subscription};
pub use translator::Translator;
