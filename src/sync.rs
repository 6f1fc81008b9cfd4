//! Live text and edit classification
//!
//! The field's typed-but-not-yet-tokenized text lives in [`LiveText`]. Every
//! edit the host reports is first classified against the field state
//! ([`TextSyncEngine::classify`]) and only then applied, so structural edits
//! (backspace into the chips, delimiters) never reach the text.

use std::ops::Range;

use tracing::trace;

use crate::config::FieldConfig;

/// An edit reported by the host text surface. Indices are char offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Replace `range` with `text` (insertion when the range is empty)
    Replace { range: Range<usize>, text: String },
    /// Backspace with the caret at `caret`
    DeleteBackward { caret: usize },
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        TextEdit::Replace {
            range: at..at,
            text: text.into(),
        }
    }
}

/// Observable editing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No live text, no selection
    Idle,
    /// Live text present
    Typing,
    /// A token is selected (the next backspace deletes it)
    Selecting,
}

/// What the field should do with an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Backspace into the chips: select the last deletable token
    SelectLastToken,
    /// Backspace while a token is selected: delete it
    DeleteSelectedToken,
    /// Drop the edit
    Reject,
    /// A tokenizing string was typed. `title` is the pending text, or None
    /// when there is nothing (or nothing allowed) to tokenize.
    Tokenize { title: Option<String> },
    /// Apply the edit to the live text
    Apply,
}

/// Untokenized input and its caret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveText {
    text: String,
    caret: usize,
}

impl LiveText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Trimmed text, used as search query and token title
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Replace the whole text, caret at the end
    pub fn set(&mut self, text: &str) {
        self.text = single_line(text);
        self.caret = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Apply an edit. Out-of-range indices are clamped.
    pub fn apply(&mut self, edit: &TextEdit) {
        let len = self.char_len();
        match edit {
            TextEdit::Replace { range, text } => {
                let start = range.start.min(len);
                let end = range.end.clamp(start, len);
                let inserted = single_line(text);
                let (a, b) = (self.byte_offset(start), self.byte_offset(end));
                self.text.replace_range(a..b, &inserted);
                self.caret = start + inserted.chars().count();
            }
            TextEdit::DeleteBackward { caret } => {
                let caret = (*caret).min(len);
                if caret == 0 {
                    return;
                }
                let (a, b) = (self.byte_offset(caret - 1), self.byte_offset(caret));
                self.text.replace_range(a..b, "");
                self.caret = caret - 1;
            }
        }
    }
}

fn single_line(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Live text plus the rules that decide what an edit means
#[derive(Debug, Clone, Default)]
pub struct TextSyncEngine {
    live: LiveText,
}

impl TextSyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> &LiveText {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut LiveText {
        &mut self.live
    }

    pub fn state(&self, has_selection: bool) -> EditState {
        if has_selection {
            EditState::Selecting
        } else if self.live.is_empty() {
            EditState::Idle
        } else {
            EditState::Typing
        }
    }

    /// Decide what `edit` means given the token state
    pub fn classify(
        &self,
        edit: &TextEdit,
        has_tokens: bool,
        has_selection: bool,
        config: &FieldConfig,
    ) -> EditAction {
        let action = match edit {
            TextEdit::DeleteBackward { .. }
                if self.live.is_empty() && has_tokens && config.delete_token_on_backspace =>
            {
                if has_selection {
                    EditAction::DeleteSelectedToken
                } else {
                    EditAction::SelectLastToken
                }
            }
            TextEdit::DeleteBackward { caret: 0 } => EditAction::Reject,
            TextEdit::Replace { text, .. } if config.is_tokenizing(text) => {
                let pending = self.live.trimmed();
                let title = (config.add_token_from_text_input && !pending.is_empty())
                    .then(|| pending.to_string());
                EditAction::Tokenize { title }
            }
            TextEdit::Replace { range, text } if text == "\n" && range.is_empty() => EditAction::Reject,
            _ => EditAction::Apply,
        };
        trace!(target: "sync", ?edit, ?action, "classified edit");
        action
    }

    /// Apply an edit to the live text, returning the new query
    pub fn apply(&mut self, edit: &TextEdit) -> String {
        self.live.apply(edit);
        self.live.trimmed().to_string()
    }
}

/// Split flattened text back into titles: split on `separator`, trim, drop empties
pub fn tokenize(text: &str, separator: &str) -> Vec<String> {
    let trimmed = separator.trim();
    let parts: Vec<&str> = if !trimmed.is_empty() {
        text.split(trimmed).collect()
    } else if !separator.is_empty() {
        text.split_whitespace().collect()
    } else {
        vec![text]
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join titles with `separator`
pub fn untokenize<S: AsRef<str>>(titles: &[S], separator: &str) -> String {
    titles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextSyncEngine {
        let mut engine = TextSyncEngine::new();
        engine.live_mut().set(text);
        engine
    }

    #[test]
    fn test_state() {
        assert_eq!(typed("").state(false), EditState::Idle);
        assert_eq!(typed("a").state(false), EditState::Typing);
        assert_eq!(typed("").state(true), EditState::Selecting);
    }

    #[test]
    fn test_backspace_into_chips_selects_then_deletes() {
        let config = FieldConfig::default();
        let engine = typed("");
        let edit = TextEdit::DeleteBackward { caret: 0 };
        assert_eq!(
            engine.classify(&edit, true, false, &config),
            EditAction::SelectLastToken
        );
        assert_eq!(
            engine.classify(&edit, true, true, &config),
            EditAction::DeleteSelectedToken
        );
    }

    #[test]
    fn test_backspace_at_start_rejected() {
        let mut config = FieldConfig::default();
        let edit = TextEdit::DeleteBackward { caret: 0 };
        assert_eq!(typed("").classify(&edit, false, false, &config), EditAction::Reject);
        assert_eq!(typed("abc").classify(&edit, true, false, &config), EditAction::Reject);

        config.delete_token_on_backspace = false;
        assert_eq!(typed("").classify(&edit, true, false, &config), EditAction::Reject);
    }

    #[test]
    fn test_delimiter_tokenizes_trimmed_text() {
        let config = FieldConfig::default();
        let action = typed("  amy@x.com ").classify(&TextEdit::insert(12, ","), false, false, &config);
        assert_eq!(
            action,
            EditAction::Tokenize {
                title: Some("amy@x.com".to_string())
            }
        );
    }

    #[test]
    fn test_delimiter_with_empty_text() {
        let config = FieldConfig::default();
        let action = typed("   ").classify(&TextEdit::insert(3, "."), false, false, &config);
        assert_eq!(action, EditAction::Tokenize { title: None });
    }

    #[test]
    fn test_delimiter_ignored_without_text_input_tokens() {
        let config = FieldConfig {
            add_token_from_text_input: false,
            ..FieldConfig::default()
        };
        let action = typed("amy").classify(&TextEdit::insert(3, ","), false, false, &config);
        assert_eq!(action, EditAction::Tokenize { title: None });
    }

    #[test]
    fn test_pasted_text_containing_delimiter_is_applied() {
        let config = FieldConfig::default();
        let action = typed("").classify(&TextEdit::insert(0, "a,b"), false, false, &config);
        assert_eq!(action, EditAction::Apply);
    }

    #[test]
    fn test_apply_returns_trimmed_query() {
        let mut engine = typed("am");
        assert_eq!(engine.apply(&TextEdit::insert(2, "y ")), "amy");
        assert_eq!(engine.live().as_str(), "amy ");
        assert_eq!(engine.live().caret(), 4);
    }

    #[test]
    fn test_apply_replace_and_delete_multibyte() {
        let mut engine = typed("héllo");
        engine.apply(&TextEdit::Replace {
            range: 1..2,
            text: "e".to_string(),
        });
        assert_eq!(engine.live().as_str(), "hello");
        engine.apply(&TextEdit::DeleteBackward { caret: 5 });
        assert_eq!(engine.live().as_str(), "hell");
        assert_eq!(engine.live().caret(), 4);
    }

    #[test]
    fn test_apply_strips_newlines() {
        let mut engine = typed("");
        engine.apply(&TextEdit::insert(0, "a\nb"));
        assert_eq!(engine.live().as_str(), "ab");
    }

    #[test]
    fn test_tokenize_round_trip() {
        let titles = tokenize("a@x.com, b@y.com", ", ");
        assert_eq!(titles, vec!["a@x.com", "b@y.com"]);
        assert_eq!(untokenize(&titles, ", "), "a@x.com, b@y.com");
    }

    #[test]
    fn test_tokenize_drops_empties() {
        assert_eq!(tokenize(" , a,,b , ", ", "), vec!["a", "b"]);
        assert!(tokenize("", ", ").is_empty());
    }
}
