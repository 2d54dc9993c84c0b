use serde::{Deserialize, Serialize};

/// Output indentation mode passed through to jq
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indentation {
    #[default]
    TwoSpaces,
    FourSpaces,
    OneTab,
    Minified,
}

impl Indentation {
    pub fn all() -> &'static [Indentation] {
        &[
            Indentation::TwoSpaces,
            Indentation::FourSpaces,
            Indentation::OneTab,
            Indentation::Minified,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Indentation::TwoSpaces => "2 spaces",
            Indentation::FourSpaces => "4 spaces",
            Indentation::OneTab => "1 tab",
            Indentation::Minified => "minified",
        }
    }

    /// Cycle to the next mode, wrapping after `Minified`
    pub fn next(&self) -> Self {
        match self {
            Indentation::TwoSpaces => Indentation::FourSpaces,
            Indentation::FourSpaces => Indentation::OneTab,
            Indentation::OneTab => Indentation::Minified,
            Indentation::Minified => Indentation::TwoSpaces,
        }
    }

    /// Explicit indent width, if this mode uses spaces
    pub fn indent_width(&self) -> Option<u8> {
        match self {
            Indentation::TwoSpaces => Some(2),
            Indentation::FourSpaces => Some(4),
            Indentation::OneTab | Indentation::Minified => None,
        }
    }

    pub fn is_compact(&self) -> bool {
        *self == Indentation::Minified
    }

    pub fn uses_tab(&self) -> bool {
        *self == Indentation::OneTab
    }
}

/// Formatting options captured into every query request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FormattingOptions {
    #[serde(default)]
    pub indentation: Indentation,
    #[serde(default)]
    pub sort_keys: bool,
}

impl FormattingOptions {
    pub fn new(indentation: Indentation, sort_keys: bool) -> Self {
        Self {
            indentation,
            sort_keys,
        }
    }
}
