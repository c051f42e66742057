//! Backend facade produced by [`BackendManager::get`](super::BackendManager::get).

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::{
    backend::LocalizationBackend,
    shared::{locale::Locale, Category, CategoryMask, CharacterKind},
};

/// One backend clone owned by a [`ComposedBackend`].
#[derive(cs::Debug, Clone)]
pub(crate) struct Slot {
    pub name: CompactString,

    #[debug(skip)]
    pub backend: Box<dyn LocalizationBackend>,
}

/// A backend that dispatches every category to the backend selected for it.
///
/// It owns one private clone per distinct selected backend, so categories routed to the same
/// backend share that clone and its option state. Options set on the facade are forwarded to every
/// clone it holds.
///
/// Categories nobody services are passed through: `install` returns the base locale unchanged.
#[derive(cs::Debug, Clone)]
pub struct ComposedBackend {
    slots: SmallVec<[Slot; 4]>,

    /// Index into `slots` for each category, by [`Category::index`].
    routes: [Option<usize>; Category::COUNT],
}

impl ComposedBackend {
    pub(crate) fn new(
        slots: SmallVec<[Slot; 4]>,
        routes: [Option<usize>; Category::COUNT],
    ) -> Self {
        debug_assert!(routes.iter().flatten().all(|&index| index < slots.len()));
        Self { slots, routes }
    }

    /// Name of the backend servicing `category`, if any.
    pub fn backend_for(&self, category: Category) -> Option<&str> {
        self.routes[category.index()].map(|index| self.slots[index].name.as_str())
    }

    /// Names of the distinct backends held by this facade, in the order they were first needed.
    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Installs every category onto `base`.
    pub fn install_all(&mut self, base: &Locale, kind: CharacterKind) -> Locale {
        self.install_categories(base, CategoryMask::ALL, kind)
    }

    /// Installs each category of `categories` onto the result of the previous one, starting from
    /// `base`. Categories that don't depend on the character kind receive [`CharacterKind::None`].
    pub fn install_categories(
        &mut self,
        base: &Locale,
        categories: CategoryMask,
        kind: CharacterKind,
    ) -> Locale {
        categories.categories().fold(base.clone(), |locale, category| {
            let kind = if category.is_per_character() { kind } else { CharacterKind::None };
            self.install(&locale, category, kind)
        })
    }
}

impl LocalizationBackend for ComposedBackend {
    fn clone_backend(&self) -> Box<dyn LocalizationBackend> {
        Box::new(self.clone())
    }

    fn set_option(&mut self, name: &str, value: &str) {
        for slot in &mut self.slots {
            slot.backend.set_option(name, value);
        }
    }

    fn clear_options(&mut self) {
        for slot in &mut self.slots {
            slot.backend.clear_options();
        }
    }

    fn install(&mut self, base: &Locale, category: Category, kind: CharacterKind) -> Locale {
        let Some(index) = self.routes[category.index()] else {
            tr::trace!(%category, "category not serviced, passing base through");
            return base.clone();
        };

        let slot = &mut self.slots[index];
        tr::trace!(%category, %kind, backend = slot.name.as_str(), "installing facets");
        slot.backend.install(base, category, kind)
    }
}
