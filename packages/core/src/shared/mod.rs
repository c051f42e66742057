//! Set of commonly used data structures.

pub mod locale;
pub mod options;

use serde::{Deserialize, Serialize};

/// Errors reported at the API boundary of the registry.
///
/// Every variant is an invalid-argument condition. Nothing on the composition path ever
/// returns an error; a missing backend only degrades the composed locale.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Backend name must not be empty")]
    EmptyBackendName,

    #[error("Category selection must contain at least one category")]
    EmptySelection,

    #[error("Unknown category value: {0:#x}")]
    UnknownCategory(u32),

    #[error("Unknown character kind value: {0:#x}")]
    UnknownCharacterKind(u32),
}

/* ---------------------------------------------------------------------------------------------- */
/*                                            CATEGORY                                            */
/* ---------------------------------------------------------------------------------------------- */

/// A functional group of locale facets.
///
/// Each category owns exactly one bit of a [`CategoryMask`]. The declaration order is the order
/// in which categories are installed during composition.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Category {
    /// Case conversion and normalization.
    Convert = 1 << 0,

    /// String comparison and sorting.
    Collation = 1 << 1,

    /// Number, currency and date formatting.
    Formatting = 1 << 2,

    /// Number, currency and date parsing.
    Parsing = 1 << 3,

    /// Message translation.
    Message = 1 << 4,

    /// Character set conversion (codecvt).
    Codepage = 1 << 5,

    /// Text boundary analysis.
    Boundary = 1 << 6,

    /// Calendar computations.
    Calendar = 1 << 16,

    /// General locale information, e.g. language, country and encoding.
    Information = 1 << 17,
}

impl Category {
    /// Number of concrete categories.
    pub const COUNT: usize = 9;

    /// Every concrete category, in composition order.
    pub const ALL: [Category; Self::COUNT] = [
        Category::Convert,
        Category::Collation,
        Category::Formatting,
        Category::Parsing,
        Category::Message,
        Category::Codepage,
        Category::Boundary,
        Category::Calendar,
        Category::Information,
    ];

    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Converts a raw single-bit value into a category. Anything that is not exactly one known
    /// bit is rejected.
    pub fn from_bits(bits: u32) -> Result<Self, RegistryError> {
        Self::ALL
            .into_iter()
            .find(|category| category.bits() == bits)
            .ok_or(RegistryError::UnknownCategory(bits))
    }

    /// Position of this category inside [`Category::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Category::Convert => 0,
            Category::Collation => 1,
            Category::Formatting => 2,
            Category::Parsing => 3,
            Category::Message => 4,
            Category::Codepage => 5,
            Category::Boundary => 6,
            Category::Calendar => 7,
            Category::Information => 8,
        }
    }

    /// Whether facets of this category are specialized per [`CharacterKind`].
    pub const fn is_per_character(self) -> bool {
        self.bits() <= Category::Boundary.bits()
    }
}

bitflags::bitflags! {
    /// A set of categories, used as the target of a backend selection.
    ///
    /// [`CategoryMask::ALL`] is the wildcard: selecting a backend for it sets the fallback used by
    /// every category without an explicit selection of its own.
    #[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryMask: u32 {
        const CONVERT = Category::Convert.bits();
        const COLLATION = Category::Collation.bits();
        const FORMATTING = Category::Formatting.bits();
        const PARSING = Category::Parsing.bits();
        const MESSAGE = Category::Message.bits();
        const CODEPAGE = Category::Codepage.bits();
        const BOUNDARY = Category::Boundary.bits();
        const CALENDAR = Category::Calendar.bits();
        const INFORMATION = Category::Information.bits();

        /// Categories whose facets depend on the character kind.
        const PER_CHARACTER = Self::CONVERT.bits()
            | Self::COLLATION.bits()
            | Self::FORMATTING.bits()
            | Self::PARSING.bits()
            | Self::MESSAGE.bits()
            | Self::CODEPAGE.bits()
            | Self::BOUNDARY.bits();

        /// Categories whose facets ignore the character kind.
        const NON_CHARACTER = Self::CALENDAR.bits() | Self::INFORMATION.bits();

        const ALL = Self::PER_CHARACTER.bits() | Self::NON_CHARACTER.bits();
    }
}

impl CategoryMask {
    /// Converts a raw mask. `u32::MAX` is accepted as an alias of [`CategoryMask::ALL`]; any other
    /// value carrying unknown bits is rejected.
    pub fn from_raw(raw: u32) -> Result<Self, RegistryError> {
        if raw == u32::MAX {
            return Ok(Self::ALL);
        }

        Self::from_bits(raw).ok_or(RegistryError::UnknownCategory(raw))
    }

    /// Whether this mask addresses the wildcard selection rather than concrete categories.
    pub fn is_wildcard(self) -> bool {
        self == Self::ALL
    }

    /// Iterates contained categories in composition order.
    pub fn categories(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |category| self.contains((*category).into()))
    }
}

impl From<Category> for CategoryMask {
    fn from(value: Category) -> Self {
        Self::from_bits_retain(value.bits())
    }
}

/* ---------------------------------------------------------------------------------------------- */
/*                                         CHARACTER KIND                                         */
/* ---------------------------------------------------------------------------------------------- */

/// Character representation a facet is specialized for.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    derive_more::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum CharacterKind {
    /// Not applicable; used for categories that do not depend on the character kind.
    #[default]
    None = 0,

    /// Narrow, byte-sized characters.
    Char = 1 << 0,

    /// Platform wide characters.
    WideChar = 1 << 1,

    /// Fixed-width 16-bit code units.
    Char16 = 1 << 2,

    /// Fixed-width 32-bit code points.
    Char32 = 1 << 3,
}

impl CharacterKind {
    /// Every concrete character kind, excluding [`CharacterKind::None`].
    pub const CHARACTERS: [CharacterKind; 4] = [
        CharacterKind::Char,
        CharacterKind::WideChar,
        CharacterKind::Char16,
        CharacterKind::Char32,
    ];

    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub fn from_bits(bits: u32) -> Result<Self, RegistryError> {
        if bits == 0 {
            return Ok(Self::None);
        }

        Self::CHARACTERS
            .into_iter()
            .find(|kind| kind.bits() == bits)
            .ok_or(RegistryError::UnknownCharacterKind(bits))
    }
}
