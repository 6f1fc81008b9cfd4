//! Keyboard input handling
//!
//! Maps winit keys to field messages:
//! - Backspace deletes (or selects, then deletes, the last chip)
//! - Cmd/Ctrl+Backspace removes every chip
//! - Return commits the pending text
//! - Escape hides results, then leaves the field
//! - Arrows/Home/End move the caret
//! - Everything else printable is inserted

use winit::keyboard::{Key, ModifiersState, NamedKey};

use chipfield::messages::{CaretMove, FieldMsg};

/// Message for a key press, if the field handles it
pub fn key_to_msg<T>(key: &Key, modifiers: ModifiersState, results_visible: bool) -> Option<FieldMsg<T>> {
    let command = modifiers.control_key() || modifiers.super_key();

    match key {
        Key::Named(NamedKey::Backspace) if command => Some(FieldMsg::DeleteAll),
        Key::Named(NamedKey::Backspace) => Some(FieldMsg::DeleteBackward),
        Key::Named(NamedKey::Enter) => Some(FieldMsg::Commit),
        Key::Named(NamedKey::Escape) if results_visible => Some(FieldMsg::DismissResults),
        Key::Named(NamedKey::Escape) | Key::Named(NamedKey::Tab) => Some(FieldMsg::FocusLost),
        Key::Named(NamedKey::ArrowLeft) => Some(FieldMsg::MoveCaret(CaretMove::Left)),
        Key::Named(NamedKey::ArrowRight) => Some(FieldMsg::MoveCaret(CaretMove::Right)),
        Key::Named(NamedKey::Home) => Some(FieldMsg::MoveCaret(CaretMove::Home)),
        Key::Named(NamedKey::End) => Some(FieldMsg::MoveCaret(CaretMove::End)),
        Key::Named(NamedKey::Space) if !command => Some(FieldMsg::InsertText(" ".to_string())),
        Key::Character(text) if !command => Some(FieldMsg::InsertText(text.to_string())),
        _ => None,
    }
}
