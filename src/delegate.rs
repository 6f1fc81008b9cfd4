//! Host hooks for the token field
//!
//! Every hook except [`TokenFieldDelegate::display_title`] has a default.
//! Predicates default to "allowed" and notifications to no-ops, so a host
//! only implements what it cares about.
//!
//! Hooks receive tokens, never the field or its store, so they cannot
//! re-enter a mutation that is in progress.

use crate::layout::Rect;
use crate::token::Token;

pub trait TokenFieldDelegate<T> {
    // === Display names ===

    /// Row title for a search candidate
    fn display_title(&self, object: &T) -> String;

    /// Row subtitle for a search candidate
    fn display_detail(&self, _object: &T) -> Option<String> {
        None
    }

    /// Chip title for a candidate; also the sort key. None = `display_title`
    fn token_title(&self, _object: &T) -> Option<String> {
        None
    }

    // === Adding ===

    fn should_add(&mut self, _token: &Token<T>) -> bool {
        true
    }

    /// Called right before insertion; the token may still be adjusted
    fn will_add(&mut self, _token: &mut Token<T>) {}

    /// Return a replacement token to insert instead of `token`
    fn change_appearance(&mut self, _token: &Token<T>) -> Option<Token<T>> {
        None
    }

    fn did_add(&mut self, _token: &Token<T>) {}

    fn did_fail_to_add(&mut self, _token: &Token<T>) {}

    // === Deleting ===

    fn should_delete(&mut self, _token: &Token<T>) -> bool {
        true
    }

    fn will_delete(&mut self, _token: &Token<T>) {}

    fn did_delete(&mut self, _token: &Token<T>) {}

    fn did_fail_to_delete(&mut self, _token: &Token<T>) {}

    fn should_delete_all(&mut self) -> bool {
        true
    }

    fn will_delete_all(&mut self) {}

    fn did_delete_all(&mut self) {}

    fn did_fail_to_delete_all(&mut self) {}

    // === Editing and selection ===

    fn did_begin_editing(&mut self) {}

    fn did_end_editing(&mut self) {}

    fn did_select_token(&mut self, _token: &Token<T>) {}

    // === Layout ===

    fn will_change_frame(&mut self, _frame: Rect) {}

    fn did_change_frame(&mut self, _frame: Rect) {}

    // === Search results ===

    fn did_show_results(&mut self) {}

    fn did_hide_results(&mut self) {}

    fn did_select_row(&mut self, _index: usize) {}
}
