//! Immutable, composable bundle of facets.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;

use super::{Category, CharacterKind};

/// A unit of locale-specific behavior. Any `Debug + Send + Sync + 'static` value qualifies.
///
/// Since this trait is implemented for every qualifying type, including `Arc<dyn Facet>` itself,
/// always call [`Facet::as_any`] through a `&dyn Facet` when downcasting.
pub trait Facet: Any + Send + Sync + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

impl<T> Facet for T
where
    T: Any + Send + Sync + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self as &dyn Any
    }
}

/// Slot a facet occupies inside a [`Locale`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FacetKey {
    pub category: Category,
    pub kind: CharacterKind,
}

type FacetMap = BTreeMap<FacetKey, Arc<dyn Facet>>;

/// An immutable set of facets keyed by category and character kind.
///
/// Cloning is cheap; the facet table is shared until one of the copies installs a facet, which
/// produces a new locale and leaves every other copy untouched.
#[derive(Clone)]
pub struct Locale {
    name: CompactString,
    facets: Arc<FacetMap>,
}

impl Default for Locale {
    fn default() -> Self {
        Self::classic()
    }
}

impl Locale {
    /// The facet-less `"C"` locale.
    pub fn classic() -> Self {
        Self::new("C")
    }

    /// Creates an empty locale carrying given identifier, e.g. `en_US.UTF-8`.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self { name: name.into(), facets: Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy with the same facets and a different name.
    pub fn renamed(&self, name: impl Into<CompactString>) -> Self {
        Self { name: name.into(), facets: self.facets.clone() }
    }

    pub fn facet(&self, category: Category, kind: CharacterKind) -> Option<&Arc<dyn Facet>> {
        self.facets.get(&FacetKey { category, kind })
    }

    /// Looks up a facet and downcasts it to its concrete type.
    pub fn facet_as<T: Facet>(&self, category: Category, kind: CharacterKind) -> Option<&T> {
        let facet: &dyn Facet = &**self.facet(category, kind)?;
        facet.as_any().downcast_ref::<T>()
    }

    pub fn has_facet(&self, category: Category, kind: CharacterKind) -> bool {
        self.facets.contains_key(&FacetKey { category, kind })
    }

    /// Returns a new locale equal to this one, except that the facet for `(category, kind)` is
    /// replaced with `facet`.
    pub fn with_facet(&self, category: Category, kind: CharacterKind, facet: impl Facet) -> Self {
        self.with_shared_facet(category, kind, Arc::new(facet))
    }

    /// Same as [`Locale::with_facet`], for facets already shared elsewhere.
    pub fn with_shared_facet(
        &self,
        category: Category,
        kind: CharacterKind,
        facet: Arc<dyn Facet>,
    ) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.facets).insert(FacetKey { category, kind }, facet);
        next
    }

    /// Iterates installed facets ordered by category, then character kind.
    pub fn facets(&self) -> impl Iterator<Item = (FacetKey, &Arc<dyn Facet>)> {
        self.facets.iter().map(|(key, facet)| (*key, facet))
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Whether both locales share the very same facet table, i.e. one was derived from the other
    /// without any facet being installed in between.
    pub fn shares_facets_with(&self, other: &Locale) -> bool {
        Arc::ptr_eq(&self.facets, &other.facets)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locale")
            .field("name", &self.name)
            .field("facets", &self.facets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Upper(&'static str);

    #[derive(Debug)]
    struct Other;

    #[test]
    fn with_facet_leaves_receiver_intact() {
        let base = Locale::new("en_US.UTF-8");
        let next = base.with_facet(Category::Convert, CharacterKind::Char, Upper("icu"));

        assert!(base.is_empty());
        assert!(!base.has_facet(Category::Convert, CharacterKind::Char));
        assert_eq!(next.len(), 1);
        assert_eq!(next.name(), "en_US.UTF-8");
        assert_eq!(
            next.facet_as::<Upper>(Category::Convert, CharacterKind::Char),
            Some(&Upper("icu"))
        );

        // Same category, other character kind is a distinct slot.
        assert!(next.facet(Category::Convert, CharacterKind::WideChar).is_none());
    }

    #[test]
    fn downcast_mismatch_yields_none() {
        let locale = Locale::classic().with_facet(Category::Calendar, CharacterKind::None, Other);
        assert!(locale.facet_as::<Upper>(Category::Calendar, CharacterKind::None).is_none());
        assert!(locale.facet_as::<Other>(Category::Calendar, CharacterKind::None).is_some());
    }

    #[test]
    fn replacement_and_sharing() {
        let base = Locale::classic().with_facet(Category::Message, CharacterKind::Char, Upper("a"));
        let copy = base.clone();
        assert!(copy.shares_facets_with(&base));

        let replaced = base.with_facet(Category::Message, CharacterKind::Char, Upper("b"));
        assert!(!replaced.shares_facets_with(&base));
        assert_eq!(replaced.len(), 1);
        assert_eq!(
            base.facet_as::<Upper>(Category::Message, CharacterKind::Char),
            Some(&Upper("a"))
        );
        assert_eq!(
            replaced.facet_as::<Upper>(Category::Message, CharacterKind::Char),
            Some(&Upper("b"))
        );

        let renamed = replaced.renamed("de_DE.UTF-8");
        assert!(renamed.shares_facets_with(&replaced));
        assert_eq!(renamed.name(), "de_DE.UTF-8");
    }

    #[test]
    fn facets_are_ordered() {
        let locale = Locale::classic()
            .with_facet(Category::Information, CharacterKind::None, Other)
            .with_facet(Category::Convert, CharacterKind::WideChar, Other)
            .with_facet(Category::Convert, CharacterKind::Char, Other);

        let keys: Vec<_> = locale.facets().map(|(key, _)| (key.category, key.kind)).collect();
        assert_eq!(
            keys,
            [
                (Category::Convert, CharacterKind::Char),
                (Category::Convert, CharacterKind::WideChar),
                (Category::Information, CharacterKind::None),
            ]
        );
    }
}
