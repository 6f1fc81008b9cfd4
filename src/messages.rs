//! Message types for the Elm-style architecture
//!
//! Host events (keys, focus, taps, search completions) become [`FieldMsg`]s
//! and flow through [`update`](crate::update::update).

use crate::layout::Rect;
use crate::sync::TextEdit;
use crate::token::TokenId;

/// Caret movement inside the live text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    Home,
    End,
    /// Absolute char index (from a click)
    To(usize),
}

#[derive(Debug, Clone)]
pub enum FieldMsg<T> {
    // === Text surface ===
    /// Raw edit reported by a text widget
    Edit(TextEdit),
    /// Typed or pasted text at the caret
    InsertText(String),
    /// Backspace at the caret
    DeleteBackward,
    MoveCaret(CaretMove),
    /// Return key
    Commit,
    FocusGained,
    FocusLost,

    // === Search ===
    /// Results of the search started with `generation`
    SearchResults { generation: u64, results: Vec<T> },
    /// A result row was picked
    SelectRow(usize),
    /// Hide the result panel without picking anything
    DismissResults,

    // === Tokens ===
    /// A chip was tapped
    TapToken(TokenId),
    /// Add a token from a title (programmatic)
    AddToken(String),
    DeleteToken(TokenId),
    DeleteAll,

    // === Layout ===
    /// The host moved or resized the field
    SetArea(Rect),
}

impl<T> FieldMsg<T> {
    /// Short variant name for logs
    pub fn name(&self) -> &'static str {
        match self {
            FieldMsg::Edit(_) => "Edit",
            FieldMsg::InsertText(_) => "InsertText",
            FieldMsg::DeleteBackward => "DeleteBackward",
            FieldMsg::MoveCaret(_) => "MoveCaret",
            FieldMsg::Commit => "Commit",
            FieldMsg::FocusGained => "FocusGained",
            FieldMsg::FocusLost => "FocusLost",
            FieldMsg::SearchResults { .. } => "SearchResults",
            FieldMsg::SelectRow(_) => "SelectRow",
            FieldMsg::DismissResults => "DismissResults",
            FieldMsg::TapToken(_) => "TapToken",
            FieldMsg::AddToken(_) => "AddToken",
            FieldMsg::DeleteToken(_) => "DeleteToken",
            FieldMsg::DeleteAll => "DeleteAll",
            FieldMsg::SetArea(_) => "SetArea",
        }
    }
}
