//! The `manager` module owns named backend prototypes, per-category selections and the option set
//! replayed onto every backend, and composes them into a single [`ComposedBackend`].
//!
//! Key features include:
//! - **Registration**: Store prototypes with `add_backend`, list them with `get_all_backends`.
//! - **Selection**: Pin a backend to one or more categories, or to the wildcard, with `select`.
//! - **Composition**: Build a facade over the selected backends with `get`, or a full locale with
//!   `compose`.
//! - **Global Default**: Read or atomically exchange the process-wide manager with `global` and
//!   `replace_global`.

use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::{
    backend::LocalizationBackend,
    shared::{
        locale::Locale,
        options::{self, OptionSet},
        Category, CategoryMask, CharacterKind, RegistryError,
    },
};

use super::composed::{ComposedBackend, Slot};

pub use atomic::AtomicManager;

/* ---------------------------------------------------------------------------------------------- */
/*                                           MANAGER API                                          */
/* ---------------------------------------------------------------------------------------------- */

/// Holds localization backends and the rules used to combine them.
///
/// `BackendManager` is a cheap handle over copy-on-write state. Cloning it takes a snapshot: the
/// copy never observes mutations made through the original afterwards, and vice versa. This is
/// what makes [`BackendManager::global`] safe to hand out to any thread.
///
/// A single instance is not meant to be mutated from several threads without external locking;
/// use [`AtomicManager`] or the global default to share configuration.
///
/// # Backend resolution
///
/// For every category, the effective backend is resolved in this order:
///
/// 1. The backend explicitly selected for the category, if it is registered.
/// 2. The backend selected for the wildcard ([`CategoryMask::ALL`]), if it is registered.
/// 3. The first registered backend.
///
/// If none of them exist, the category is left untouched during composition.
#[derive(Debug, Default, Clone)]
pub struct BackendManager(Arc<inner::Inner>);

impl BackendManager {
    /// Creates a manager without any backend, selection or option.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` as the prototype for `name`.
    ///
    /// Registering an existing name replaces its prototype, keeping its original position in
    /// [`BackendManager::get_all_backends`].
    pub fn add_backend(
        &mut self,
        name: impl AsRef<str>,
        backend: impl LocalizationBackend,
    ) -> Result<(), RegistryError> {
        self.add_backend_boxed(name, Box::new(backend))
    }

    /// Registers an already type-erased prototype.
    pub fn add_backend_boxed(
        &mut self,
        name: impl AsRef<str>,
        backend: Box<dyn LocalizationBackend>,
    ) -> Result<(), RegistryError> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(RegistryError::EmptyBackendName);
        }

        let prev = self.inner_mut().backends.insert(name.into(), Arc::from(backend));
        tr::debug!(backend = name, replaced = prev.is_some(), "localization backend registered");

        Ok(())
    }

    /// Registers the prototype produced by `factory`.
    pub fn add_backend_with<B: LocalizationBackend>(
        &mut self,
        name: impl AsRef<str>,
        factory: impl FnOnce() -> B,
    ) -> Result<(), RegistryError> {
        self.add_backend(name, factory())
    }

    /// Drops every registered prototype.
    ///
    /// Selections are kept as-is; names that are no longer registered are skipped during
    /// resolution.
    pub fn remove_all_backends(&mut self) {
        let inner = self.inner_mut();
        tr::debug!(count = inner.backends.len(), "removing all localization backends");
        inner.backends.clear();
    }

    /// Names of every registered backend, in registration order.
    pub fn get_all_backends(&self) -> Vec<String> {
        self.0.backends.keys().map(|name| name.to_string()).collect()
    }

    pub fn contains_backend(&self, name: &str) -> bool {
        self.0.backends.contains_key(name)
    }

    /// Selects backend `name` for `categories`.
    ///
    /// [`CategoryMask::ALL`] sets the wildcard fallback; any other mask sets an explicit selection
    /// for each category it contains. Explicit selections always take precedence over the wildcard,
    /// regardless of call order. Within one slot, the latest call wins.
    ///
    /// `name` is not validated here; a name that is not registered at composition time is skipped.
    pub fn select(
        &mut self,
        name: impl AsRef<str>,
        categories: impl Into<CategoryMask>,
    ) -> Result<(), RegistryError> {
        let name = name.as_ref();
        let categories = categories.into();

        if name.is_empty() {
            return Err(RegistryError::EmptyBackendName);
        } else if categories.is_empty() {
            return Err(RegistryError::EmptySelection);
        }

        let inner = self.inner_mut();
        if categories.is_wildcard() {
            inner.wildcard = Some(name.into());
        } else {
            for category in categories.categories() {
                inner.explicit[category.index()] = Some(name.into());
            }
        }

        tr::debug!(backend = name, ?categories, "localization backend selected");
        Ok(())
    }

    /// Name of the backend that would service `category` if composed right now.
    pub fn selected(&self, category: Category) -> Option<&str> {
        self.0.resolve(category).map(|(name, _)| name)
    }

    /// Appends an option, replayed onto every backend clone made by [`BackendManager::get`].
    pub fn set_option(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        let (name, value) = (name.into(), value.into());
        tr::debug!(name = name.as_str(), value = value.as_str(), "localization option set");
        self.inner_mut().options.push(name, value);
    }

    pub fn clear_options(&mut self) {
        self.inner_mut().options.clear();
    }

    pub fn options(&self) -> &OptionSet {
        &self.0.options
    }

    /// Creates a backend facade representing the current configuration.
    ///
    /// Every distinct backend that services at least one category is cloned exactly once, then the
    /// option set is replayed onto the clone in insertion order. The facade is independent of this
    /// manager: later changes to the manager don't affect it.
    pub fn get(&self) -> ComposedBackend {
        let inner = &*self.0;
        let mut slots = SmallVec::<[Slot; 4]>::new();
        let mut routes = [None; Category::COUNT];

        for category in Category::ALL {
            inner.warn_unresolved_selection(category);

            let Some((name, prototype)) = inner.resolve(category) else {
                tr::warn!(%category, "no localization backend services category");
                continue;
            };

            let index = match slots.iter().position(|slot| slot.name == name) {
                Some(index) => index,
                None => {
                    let mut backend = prototype.clone_backend();
                    inner.options.replay_onto(&mut *backend);
                    slots.push(Slot { name: name.into(), backend });
                    slots.len() - 1
                }
            };

            routes[category.index()] = Some(index);
        }

        ComposedBackend::new(slots, routes)
    }

    /// Starts a full composition over the current configuration.
    pub fn compose(&self) -> ComposeTask<'_> {
        ComposeTask::new(self)
    }

    /// Snapshot of the process-wide default manager.
    pub fn global() -> Self {
        atomic::GLOBAL.load()
    }

    /// Installs `manager` as the process-wide default, returning the one it replaced.
    pub fn replace_global(manager: Self) -> Self {
        atomic::GLOBAL.swap(manager)
    }

    fn inner_mut(&mut self) -> &mut inner::Inner {
        Arc::make_mut(&mut self.0)
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                        COMPOSE OPERATION                                       */
/* ---------------------------------------------------------------------------------------------- */

/// Builder for a complete composition, created by [`BackendManager::compose`].
#[derive(derive_setters::Setters)]
pub struct ComposeTask<'a> {
    #[setters(skip)]
    manager: &'a BackendManager,

    /// Character kind used for per-character categories. Other categories always receive
    /// [`CharacterKind::None`].
    ///
    /// Default is [`CharacterKind::None`]
    character_kind: CharacterKind,

    /// Categories to install.
    ///
    /// Default is [`CategoryMask::ALL`]
    categories: CategoryMask,

    /// If set, forwarded as the `locale` option to every backend after the manager's own options.
    #[setters(strip_option, into)]
    locale: Option<CompactString>,
}

impl<'a> ComposeTask<'a> {
    fn new(manager: &'a BackendManager) -> Self {
        Self {
            manager,
            character_kind: CharacterKind::None,
            categories: CategoryMask::ALL,
            locale: None,
        }
    }

    /// Installs every requested category onto `base`, in composition order.
    pub fn install(self, base: &Locale) -> Locale {
        let mut backend = self.manager.get();
        let mut base = base.clone();

        if let Some(locale) = &self.locale {
            backend.set_option(options::LOCALE, locale);
            base = base.renamed(locale.clone());
        }

        backend.install_categories(&base, self.categories, self.character_kind)
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                          GLOBAL DEFAULT                                        */
/* ---------------------------------------------------------------------------------------------- */

pub mod atomic {
    use std::sync::LazyLock;

    use arc_swap::ArcSwap;

    use super::BackendManager;

    /// A manager slot that can be read and replaced from any thread without locking.
    ///
    /// Every operation observes a complete manager; [`AtomicManager::swap`] returns exactly the
    /// value that was current when it took effect.
    #[derive(Debug, Default)]
    pub struct AtomicManager(ArcSwap<super::inner::Inner>);

    impl AtomicManager {
        pub fn new(manager: BackendManager) -> Self {
            Self(ArcSwap::new(manager.0))
        }

        /// Snapshot of the current manager.
        pub fn load(&self) -> BackendManager {
            BackendManager(self.0.load_full())
        }

        pub fn store(&self, manager: BackendManager) {
            self.0.store(manager.0);
        }

        /// Replaces the current manager, returning the previous one.
        pub fn swap(&self, manager: BackendManager) -> BackendManager {
            BackendManager(self.0.swap(manager.0))
        }
    }

    impl From<BackendManager> for AtomicManager {
        fn from(value: BackendManager) -> Self {
            Self::new(value)
        }
    }

    pub(super) static GLOBAL: LazyLock<AtomicManager> = LazyLock::new(AtomicManager::default);
}

/* ---------------------------------------------------------------------------------------------- */
/*                                            INTERNALS                                           */
/* ---------------------------------------------------------------------------------------------- */

mod inner {
    use indexmap::IndexMap;

    use super::*;

    #[derive(cs::Debug, Clone, Default)]
    pub(super) struct Inner {
        /// Registered prototypes, in registration order. Prototypes are never mutated once
        /// registered; composition always works on clones.
        #[debug(with = "fmt_backends")]
        pub backends: IndexMap<CompactString, Arc<dyn LocalizationBackend>>,

        /// Fallback selection for categories without an explicit one.
        pub wildcard: Option<CompactString>,

        /// Explicit selections, indexed by [`Category::index`].
        pub explicit: [Option<CompactString>; Category::COUNT],

        /// Replayed onto every clone, in insertion order.
        pub options: OptionSet,
    }

    fn fmt_backends(
        backends: &IndexMap<CompactString, Arc<dyn LocalizationBackend>>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_list().entries(backends.keys()).finish()
    }

    impl Inner {
        pub fn resolve(
            &self,
            category: Category,
        ) -> Option<(&str, &Arc<dyn LocalizationBackend>)> {
            let explicit = self.explicit[category.index()].as_deref();

            [explicit, self.wildcard.as_deref()]
                .into_iter()
                .flatten()
                .find_map(|name| self.backends.get_key_value(name))
                .or_else(|| self.backends.first())
                .map(|(name, backend)| (name.as_str(), backend))
        }

        /// Reports selections pointing at names that are not registered.
        pub fn warn_unresolved_selection(&self, category: Category) {
            let selections = [self.explicit[category.index()].as_deref(), self.wildcard.as_deref()];

            for name in selections.into_iter().flatten() {
                if self.backends.contains_key(name) {
                    break;
                }

                tr::warn!(
                    %category,
                    backend = name,
                    "selected localization backend is not registered"
                );
            }
        }
    }
}
