//! Token (chip) value type
//!
//! A token is one removable chip in the field: a title, an optional caller
//! object, a sticky flag and its appearance. Selection is owned by the
//! [`TokenStore`](crate::store::TokenStore).

use std::fmt;

use crate::theme::{Color, DEFAULT_DARK_RATIO};

/// Equality used to compare caller objects (dedup, already-tokenized checks).
///
/// Objects are opaque to the field; only this function decides whether two
/// of them are "the same underlying object".
pub type ObjectEq<T> = fn(&T, &T) -> bool;

/// `ObjectEq` backed by the type's own `PartialEq`
pub fn partial_eq<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// Stable identifier of a token inside its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenId(pub u64);

/// Presentation attributes of a chip. Carries no invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenAppearance {
    pub text_color: Color,
    pub background_color: Color,
    /// Title color while selected; None = `text_color`
    pub selected_text_color: Option<Color>,
    /// Background while selected; None = `background_color` darkened by `dark_ratio`
    pub selected_background_color: Option<Color>,
    pub dark_ratio: f32,
    /// Chip width cap; longer titles are truncated with an ellipsis
    pub max_width: f32,
}

impl Default for TokenAppearance {
    fn default() -> Self {
        Self {
            text_color: Color::WHITE,
            background_color: Color::rgb(50, 50, 255),
            selected_text_color: None,
            selected_background_color: None,
            dark_ratio: DEFAULT_DARK_RATIO,
            max_width: 200.0,
        }
    }
}

impl TokenAppearance {
    /// Resolve (background, text) colors for the given selection state
    pub fn colors(&self, selected: bool) -> (Color, Color) {
        if !selected {
            return (self.background_color, self.text_color);
        }
        let background = self
            .selected_background_color
            .unwrap_or_else(|| self.background_color.darkened(self.dark_ratio));
        let text = self.selected_text_color.unwrap_or(self.text_color);
        (background, text)
    }
}

/// One chip in the field
#[derive(Debug, Clone)]
pub struct Token<T> {
    pub(crate) id: TokenId,
    pub title: String,
    pub object: Option<T>,
    /// Sticky tokens cannot be removed by any deletion path
    pub sticky: bool,
    pub(crate) selected: bool,
    pub appearance: TokenAppearance,
}

impl<T> Token<T> {
    /// Token created from typed text (no caller object)
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TokenId::default(),
            title: title.into(),
            object: None,
            sticky: false,
            selected: false,
            appearance: TokenAppearance::default(),
        }
    }

    /// Token backed by a caller object
    pub fn with_object(title: impl Into<String>, object: T) -> Self {
        Self {
            object: Some(object),
            ..Self::new(title)
        }
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn with_appearance(mut self, appearance: TokenAppearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Id assigned by the store on insertion
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Current (background, text) colors
    pub fn colors(&self) -> (Color, Color) {
        self.appearance.colors(self.selected)
    }

    /// Whether this token carries `object` under the given equality
    pub fn holds(&self, object: &T, eq: ObjectEq<T>) -> bool {
        self.object.as_ref().is_some_and(|own| eq(own, object))
    }
}

impl<T> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
