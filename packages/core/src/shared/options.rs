//! Backend options.
//!
//! Every backend understands at least the following options:
//!
//! - [`LOCALE`]: the target locale in POSIX form, e.g. `en_US.UTF-8`.
//! - [`MESSAGE_PATH`]: a search path for message catalogs. May be given several times.
//! - [`MESSAGE_APPLICATION`]: an application (domain) name scoping catalog lookup. May be given
//!   several times.
//!
//! Any other name is backend specific. Backends must ignore names they don't recognize.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::backend::LocalizationBackend;

pub const LOCALE: &str = "locale";
pub const MESSAGE_PATH: &str = "message_path";
pub const MESSAGE_APPLICATION: &str = "message_application";

/// Insertion-ordered multi-map of option names to values.
///
/// Duplicated names are kept; all of them are replayed in insertion order, so a backend decides
/// whether a later value overrides or accumulates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    entries: Vec<(CompactString, CompactString)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Every value recorded under `name`, oldest first.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().filter(move |(key, _)| key.as_str() == name).map(|(_, value)| value.as_str())
    }

    /// Latest value recorded under `name`.
    pub fn last(&self, name: &str) -> Option<&str> {
        self.entries.iter().rev().find(|(key, _)| key.as_str() == name).map(|(_, value)| value.as_str())
    }

    /// Feeds every entry into the backend, in insertion order.
    pub fn replay_onto(&self, backend: &mut dyn LocalizationBackend) {
        for (name, value) in self.iter() {
            backend.set_option(name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OptionSet
where
    K: Into<CompactString>,
    V: Into<CompactString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<K, V> Extend<(K, V)> for OptionSet
where
    K: Into<CompactString>,
    V: Into<CompactString>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Parsed form of the well-known options, for backend implementors.
///
/// `locale` overrides any previous value; `message_path` and `message_application` accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendOptions {
    pub locale: Option<CompactString>,
    pub message_paths: Vec<CompactString>,
    pub message_applications: Vec<CompactString>,
}

impl BackendOptions {
    /// Records a single option. Returns `false` for names this type does not know, which callers
    /// are free to interpret themselves or ignore.
    pub fn apply(&mut self, name: &str, value: &str) -> bool {
        match name {
            LOCALE => self.locale = Some(value.into()),
            MESSAGE_PATH => self.message_paths.push(value.into()),
            MESSAGE_APPLICATION => self.message_applications.push(value.into()),
            _ => return false,
        }

        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Configured locale, or `"C"` if none was given.
    pub fn locale_or_classic(&self) -> &str {
        self.locale.as_deref().unwrap_or("C")
    }
}

impl From<&OptionSet> for BackendOptions {
    fn from(value: &OptionSet) -> Self {
        let mut this = Self::default();
        for (name, value) in value.iter() {
            this.apply(name, value);
        }
        this
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut set = OptionSet::new();
        set.push(MESSAGE_PATH, "/usr/share/locale");
        set.push(LOCALE, "en_US.UTF-8");
        set.push(MESSAGE_PATH, "/opt/app/locale");
        set.push(LOCALE, "fr_FR.UTF-8");

        assert_eq!(set.len(), 4);
        assert_eq!(
            set.values(MESSAGE_PATH).collect::<Vec<_>>(),
            ["/usr/share/locale", "/opt/app/locale"]
        );
        assert_eq!(set.last(LOCALE), Some("fr_FR.UTF-8"));
        assert_eq!(set.last("encoding"), None);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn well_known_options() {
        let mut opts = BackendOptions::default();
        assert_eq!(opts.locale_or_classic(), "C");

        assert!(opts.apply(LOCALE, "en_US.UTF-8"));
        assert!(opts.apply(LOCALE, "de_DE.UTF-8"));
        assert!(opts.apply(MESSAGE_APPLICATION, "hello"));
        assert!(opts.apply(MESSAGE_APPLICATION, "world"));
        assert!(!opts.apply("use_ansi_encoding", "true"));

        assert_eq!(opts.locale_or_classic(), "de_DE.UTF-8");
        assert_eq!(opts.message_applications, ["hello", "world"]);
        assert!(opts.message_paths.is_empty());

        opts.clear();
        assert_eq!(opts, BackendOptions::default());
    }

    #[test]
    fn parse_from_set() {
        let set: OptionSet =
            [(LOCALE, "ja_JP.UTF-8"), (MESSAGE_PATH, "a"), ("x", "y"), (MESSAGE_PATH, "b")]
                .into_iter()
                .collect();

        let opts = BackendOptions::from(&set);
        assert_eq!(opts.locale.as_deref(), Some("ja_JP.UTF-8"));
        assert_eq!(opts.message_paths, ["a", "b"]);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[["locale","ja_JP.UTF-8"],["message_path","a"],["x","y"],["message_path","b"]]"#
        );
    }
}
