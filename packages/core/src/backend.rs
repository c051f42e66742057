//! Contract every localization backend implements.

use crate::shared::{locale::Locale, Category, CharacterKind};

///
/// An interchangeable implementation of locale facilities, e.g. an ICU, POSIX or platform API based
/// one.
///
/// Backends are usually registered in a [`BackendManager`](crate::BackendManager), which lets an
/// application switch or mix backends per category without touching any other code.
///
/// None of these methods may fail. A backend that can't honor its configuration still has to
/// return a usable (possibly fallback) locale from [`LocalizationBackend::install`].
///
pub trait LocalizationBackend: Send + Sync + 'static {
    /// Makes an independent copy carrying the same configuration. Mutating the copy must never
    /// affect the original, and vice versa.
    fn clone_backend(&self) -> Box<dyn LocalizationBackend>;

    /// Sets an option, e.g. [`options::LOCALE`](crate::options::LOCALE). Unknown names must be
    /// silently ignored.
    fn set_option(&mut self, name: &str, value: &str);

    /// Resets every option to its default. Idempotent.
    fn clear_options(&mut self);

    /// Returns a copy of `base` whose facets for `category` (specialized for `kind`, if the
    /// category depends on it) are replaced with this backend's implementation.
    ///
    /// Returns `base` unchanged if this backend provides nothing for the category. Pass
    /// [`CharacterKind::None`] for categories that don't depend on the character kind.
    fn install(&mut self, base: &Locale, category: Category, kind: CharacterKind) -> Locale;
}

impl Clone for Box<dyn LocalizationBackend> {
    fn clone(&self) -> Self {
        self.clone_backend()
    }
}
