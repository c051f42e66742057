//!
//! A crate for composing locale facilities out of interchangeable backends.
//!
//! # Usage
//!
//! A backend is anything implementing [`LocalizationBackend`]: an ICU based implementation, a POSIX
//! based one, a platform API based one, or a plain standard library fallback. Each backend knows
//! how to install the facets of a [`Category`] (collation, formatting, message translation, ...)
//! onto a [`Locale`].
//!
//! You should register backends in a [`BackendManager`] under unique names. The manager lets you
//! select which backend services which category, holds the options replayed onto every backend,
//! and composes the result into a single locale.
//!
//! ```
//! use locale_backend::{
//!     BackendManager, Category, CategoryMask, CharacterKind, Locale, LocalizationBackend,
//! };
//!
//! #[derive(Clone, Default)]
//! struct Tagging {
//!     tag: &'static str,
//!     locale: String,
//! }
//!
//! impl LocalizationBackend for Tagging {
//!     fn clone_backend(&self) -> Box<dyn LocalizationBackend> {
//!         Box::new(self.clone())
//!     }
//!
//!     fn set_option(&mut self, name: &str, value: &str) {
//!         if name == locale_backend::options::LOCALE {
//!             self.locale = value.to_owned();
//!         }
//!     }
//!
//!     fn clear_options(&mut self) {
//!         self.locale.clear();
//!     }
//!
//!     fn install(&mut self, base: &Locale, category: Category, kind: CharacterKind) -> Locale {
//!         base.with_facet(category, kind, format!("{}:{}", self.tag, self.locale))
//!     }
//! }
//!
//! let mut manager = BackendManager::new();
//! manager.add_backend("icu", Tagging { tag: "icu", ..Default::default() }).unwrap();
//! manager.add_backend("posix", Tagging { tag: "posix", ..Default::default() }).unwrap();
//!
//! // Everything goes to `icu`, except formatting.
//! manager.select("icu", CategoryMask::ALL).unwrap();
//! manager.select("posix", Category::Formatting).unwrap();
//! manager.set_option("locale", "de_DE.UTF-8");
//!
//! let locale = manager.compose().character_kind(CharacterKind::Char).install(&Locale::classic());
//!
//! let formatting = locale.facet_as::<String>(Category::Formatting, CharacterKind::Char);
//! assert_eq!(formatting.map(String::as_str), Some("posix:de_DE.UTF-8"));
//!
//! let collation = locale.facet_as::<String>(Category::Collation, CharacterKind::Char);
//! assert_eq!(collation.map(String::as_str), Some("icu:de_DE.UTF-8"));
//!
//! // Calendar doesn't depend on the character kind.
//! assert!(locale.has_facet(Category::Calendar, CharacterKind::None));
//! ```
//!
//! # Global default
//!
//! A process-wide manager is available through [`BackendManager::global`], and can be exchanged
//! atomically from any thread with [`BackendManager::replace_global`]. Managers are copy-on-write
//! snapshots, so the one you get from `global()` is yours to modify; install it back to publish
//! the change.
//!
//! # Failure model
//!
//! Composition never fails. A selection naming an unregistered backend falls back to the wildcard
//! selection, then to the first registered backend; if nothing is registered, categories are left
//! as they were in the base locale. Only invalid arguments at the API boundary, such as an empty
//! backend name, are reported as [`RegistryError`].
//!
pub mod backend;
pub mod registry;
pub mod shared;

pub use shared::{locale, options};

pub use backend::LocalizationBackend;
pub use locale::{Facet, FacetKey, Locale};
pub use options::{BackendOptions, OptionSet};
pub use registry::{AtomicManager, BackendManager, ComposeTask, ComposedBackend};
pub use shared::{Category, CategoryMask, CharacterKind, RegistryError};

/// Shorthand for an empty [`BackendManager`].
pub fn create_manager() -> BackendManager {
    BackendManager::default()
}
