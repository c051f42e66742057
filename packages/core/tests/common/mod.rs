#![allow(dead_code)]

use std::sync::Arc;

use locale_backend::{
    BackendOptions, Category, CategoryMask, CharacterKind, Locale, LocalizationBackend,
};
use parking_lot::Mutex;

/// Facet installed by [`Recording`], describing who installed it and with which options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub backend: &'static str,
    pub locale: String,
    pub message_paths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Clone,
    SetOption(String, String),
    ClearOptions,
    Install(Category, CharacterKind),
}

/// Shared log of every call made on a backend and all of its clones.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<(&'static str, Call)>>>);

impl Journal {
    fn push(&self, backend: &'static str, call: Call) {
        self.0.lock().push((backend, call));
    }

    pub fn take(&self) -> Vec<(&'static str, Call)> {
        std::mem::take(&mut *self.0.lock())
    }

    pub fn calls_of(&self, backend: &'static str) -> Vec<Call> {
        self.0.lock().iter().filter(|(b, _)| *b == backend).map(|(_, c)| c.clone()).collect()
    }

    pub fn clones_of(&self, backend: &'static str) -> usize {
        self.calls_of(backend).into_iter().filter(|c| *c == Call::Clone).count()
    }
}

/// Test backend which stamps every serviced category with its label and current options.
#[derive(Debug, Clone)]
pub struct Recording {
    pub label: &'static str,
    pub options: BackendOptions,
    pub services: CategoryMask,
    pub journal: Journal,
}

impl Recording {
    pub fn new(label: &'static str, journal: &Journal) -> Self {
        Self {
            label,
            options: Default::default(),
            services: CategoryMask::ALL,
            journal: journal.clone(),
        }
    }

    pub fn servicing(mut self, services: CategoryMask) -> Self {
        self.services = services;
        self
    }
}

impl LocalizationBackend for Recording {
    fn clone_backend(&self) -> Box<dyn LocalizationBackend> {
        self.journal.push(self.label, Call::Clone);
        Box::new(self.clone())
    }

    fn set_option(&mut self, name: &str, value: &str) {
        self.journal.push(self.label, Call::SetOption(name.into(), value.into()));
        self.options.apply(name, value);
    }

    fn clear_options(&mut self) {
        self.journal.push(self.label, Call::ClearOptions);
        self.options.clear();
    }

    fn install(&mut self, base: &Locale, category: Category, kind: CharacterKind) -> Locale {
        self.journal.push(self.label, Call::Install(category, kind));

        if !self.services.contains(category.into()) {
            return base.clone();
        }

        let stamp = Stamp {
            backend: self.label,
            locale: self.options.locale_or_classic().to_owned(),
            message_paths: self.options.message_paths.iter().map(|p| p.to_string()).collect(),
        };

        base.with_facet(category, kind, stamp)
    }
}

/// Character kind a category is installed with when composing for `kind`.
pub fn effective_kind(category: Category, kind: CharacterKind) -> CharacterKind {
    if category.is_per_character() {
        kind
    } else {
        CharacterKind::None
    }
}

pub fn stamp(locale: &Locale, category: Category, kind: CharacterKind) -> Option<&Stamp> {
    locale.facet_as::<Stamp>(category, effective_kind(category, kind))
}

/// Label of the backend which installed `category`, composed for narrow characters.
pub fn origin(locale: &Locale, category: Category) -> Option<&'static str> {
    stamp(locale, category, CharacterKind::Char).map(|s| s.backend)
}
