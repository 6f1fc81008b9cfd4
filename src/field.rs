//! The token field model
//!
//! [`TokenField`] ties the token store, the live text, the search panel and
//! the host delegate together. Every public operation leaves the field in a
//! consistent state and recomputes layout; a changed field height is
//! reported through `will_change_frame` / `did_change_frame`.
//!
//! Searches are not run here. Operations that start one queue a
//! [`SearchRequest`], which the host collects with
//! [`TokenField::take_search_request`] (the `update` loop does this and turns
//! it into a `Cmd::Search`).

use std::rc::Rc;

use tracing::debug;

use crate::config::FieldConfig;
use crate::delegate::TokenFieldDelegate;
use crate::layout::{FieldLayout, LayoutInput, Rect, ScrollAnchor};
use crate::search::{
    filter_results, token_title_for, FilterOptions, SearchCoordinator, SearchRequest, SearchRow,
};
use crate::store::{AddRejection, RemoveAllOutcome, RemoveOutcome, TokenStore};
use crate::sync::{tokenize, untokenize, EditAction, EditState, LiveText, TextEdit, TextSyncEngine};
use crate::theme::Theme;
use crate::token::{partial_eq, ObjectEq, Token, TokenAppearance, TokenId};
use crate::view::text::{MonospaceMetrics, TextMetrics};

/// What the field currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Presentation {
    /// Chips plus the live text
    #[default]
    Tokens,
    /// Titles joined by the separator (after editing ended)
    Flattened(String),
}

/// What lies under a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Token(TokenId),
    Row(usize),
    /// Anywhere else inside the field
    Field,
}

pub struct TokenField<T, D> {
    config: FieldConfig,
    theme: Theme,
    store: TokenStore<T>,
    sync: TextSyncEngine,
    search: SearchCoordinator<T>,
    delegate: D,
    eq: ObjectEq<T>,
    metrics: Rc<dyn TextMetrics>,
    presentation: Presentation,
    focused: bool,
    anchor: ScrollAnchor,
    area: Rect,
    layout: FieldLayout,
    pending_search: Option<SearchRequest>,
}

impl<T, D> TokenField<T, D>
where
    T: Clone + PartialEq,
    D: TokenFieldDelegate<T>,
{
    /// Field comparing objects with `PartialEq`
    pub fn new(config: FieldConfig, delegate: D) -> Self {
        Self::with_equality(config, delegate, partial_eq::<T>)
    }
}

impl<T, D> TokenField<T, D>
where
    T: Clone,
    D: TokenFieldDelegate<T>,
{
    /// Field comparing objects with a custom equality
    pub fn with_equality(config: FieldConfig, delegate: D, eq: ObjectEq<T>) -> Self {
        let mut field = Self {
            store: TokenStore::new(config.max_tokens),
            config,
            theme: Theme::default(),
            sync: TextSyncEngine::new(),
            search: SearchCoordinator::new(),
            delegate,
            eq,
            metrics: Rc::new(MonospaceMetrics::default()),
            presentation: Presentation::Tokens,
            focused: false,
            anchor: ScrollAnchor::End,
            area: Rect::new(0.0, 0.0, 320.0, 0.0),
            layout: FieldLayout::default(),
            pending_search: None,
        };
        field.layout = field.compute_layout();
        field
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_metrics(mut self, metrics: Rc<dyn TextMetrics>) -> Self {
        self.metrics = metrics;
        self.layout = self.compute_layout();
        self
    }

    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self.layout = self.compute_layout();
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn tokens(&self) -> &[Token<T>] {
        self.store.tokens()
    }

    pub fn store(&self) -> &TokenStore<T> {
        &self.store
    }

    pub fn selected_token(&self) -> Option<&Token<T>> {
        self.store.selected()
    }

    /// Untokenized text
    pub fn text(&self) -> &str {
        self.sync.live().as_str()
    }

    pub fn live_text(&self) -> &LiveText {
        self.sync.live()
    }

    pub fn state(&self) -> EditState {
        self.sync.state(self.store.selected().is_some())
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn results_visible(&self) -> bool {
        self.search.is_visible()
    }

    /// A search is in flight
    pub fn is_busy(&self) -> bool {
        self.search.is_busy()
    }

    pub fn search(&self) -> &SearchCoordinator<T> {
        &self.search
    }

    pub fn rows(&self) -> Vec<SearchRow> {
        self.search.rows(&self.delegate)
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Field plus result panel
    pub fn frame(&self) -> Rect {
        self.layout.frame()
    }

    /// Appearance new tokens start with
    pub fn default_appearance(&self) -> TokenAppearance {
        self.theme.token_appearance(self.config.token_max_width)
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_config(&mut self, config: FieldConfig) {
        self.store.set_max_tokens(config.max_tokens);
        self.config = config;
        self.relayout();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Place the field at `area` (height is ignored; the field sizes itself)
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
    }

    pub fn set_max_tokens(&mut self, max_tokens: Option<usize>) {
        self.config.max_tokens = max_tokens;
        self.store.set_max_tokens(max_tokens);
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Add a prepared token
    pub fn add_token(&mut self, token: Token<T>) -> Result<TokenId, AddRejection> {
        let result = self.store.add(token, &mut self.delegate).map(Token::id);
        self.relayout();
        result
    }

    /// Add a token from a title, styled by the theme
    pub fn add_token_with_title(&mut self, title: &str) -> Result<TokenId, AddRejection> {
        let token = Token::new(title).with_appearance(self.default_appearance());
        self.add_token(token)
    }

    /// Add a token for `object`, titled by the delegate
    pub fn add_token_with_object(&mut self, object: T) -> Result<TokenId, AddRejection> {
        let title = token_title_for(&self.delegate, &object);
        let token = Token::with_object(title, object).with_appearance(self.default_appearance());
        self.add_token(token)
    }

    /// Remove one token. A successful removal on a focused field restarts
    /// the search with "".
    pub fn delete_token(&mut self, id: TokenId) -> RemoveOutcome<T> {
        let outcome = self.store.remove(id, &mut self.delegate);
        if outcome.is_removed() {
            self.store.deselect();
            if self.focused {
                self.request_search("");
            }
        }
        self.relayout();
        outcome
    }

    pub fn delete_token_with_object(&mut self, object: &T) -> RemoveOutcome<T> {
        match self.store.find_by_object(object, self.eq).map(Token::id) {
            Some(id) => self.delete_token(id),
            None => RemoveOutcome::NotFound,
        }
    }

    /// Remove the last non-sticky token
    pub fn delete_last(&mut self) -> RemoveOutcome<T> {
        match self.store.last_deletable().map(Token::id) {
            Some(id) => self.delete_token(id),
            None => RemoveOutcome::NotFound,
        }
    }

    /// Remove the selected token, if any
    pub fn delete_selected(&mut self) -> RemoveOutcome<T> {
        let outcome = match self.store.selected().map(Token::id) {
            Some(id) => self.delete_token(id),
            None => RemoveOutcome::NotFound,
        };
        self.store.deselect();
        outcome
    }

    /// Remove every non-sticky token; a visible result list is refreshed
    pub fn delete_all(&mut self) -> RemoveAllOutcome {
        let outcome = self.store.remove_all(&mut self.delegate);
        if matches!(outcome, RemoveAllOutcome::Removed(_)) && self.search.is_visible() {
            let query = self.search.last_query().unwrap_or_default().to_string();
            self.request_search(&query);
        }
        self.relayout();
        outcome
    }

    /// Select a token (deselecting any other). Unknown ids clear the selection.
    pub fn select_token(&mut self, id: TokenId) -> bool {
        if !self.store.select(id) {
            return false;
        }
        if let Some(token) = self.store.get(id) {
            self.delegate.did_select_token(token);
        }
        true
    }

    pub fn deselect(&mut self) {
        self.store.deselect();
    }

    /// Turn the pending live text into a token.
    ///
    /// On success the live text is cleared and results are hidden; on
    /// rejection the text is kept.
    pub fn tokenize_live_text(&mut self) -> Option<Result<TokenId, AddRejection>> {
        let title = self.sync.live().trimmed();
        if title.is_empty() || !self.config.add_token_from_text_input {
            return None;
        }
        let title = title.to_string();
        let result = self.add_token_with_title(&title);
        if result.is_ok() {
            self.sync.live_mut().clear();
            self.hide_results();
            self.relayout();
        }
        Some(result)
    }

    // =========================================================================
    // Text
    // =========================================================================

    pub fn move_caret(&mut self, caret: usize) {
        self.sync.live_mut().set_caret(caret);
    }

    /// Route a text edit through the classification rules.
    ///
    /// Returns what was done; `Reject` means the edit was dropped.
    pub fn handle_edit(&mut self, edit: TextEdit) -> EditAction {
        if !self.config.editable {
            return EditAction::Reject;
        }
        self.retokenize();

        let action = self.sync.classify(
            &edit,
            !self.store.is_empty(),
            self.store.selected().is_some(),
            &self.config,
        );

        match &action {
            EditAction::SelectLastToken => {
                if let Some(id) = self.store.last_deletable().map(Token::id) {
                    self.select_token(id);
                }
            }
            EditAction::DeleteSelectedToken => {
                self.delete_selected();
            }
            EditAction::Reject | EditAction::Tokenize { title: None } => {}
            EditAction::Tokenize { title: Some(_) } => {
                self.tokenize_live_text();
            }
            EditAction::Apply => {
                let query = self.sync.apply(&edit);
                self.store.deselect();
                if query.chars().count() >= self.config.min_chars_to_search {
                    self.request_search(&query);
                } else {
                    self.hide_results();
                }
            }
        }

        self.relayout();
        self.debug_assert_invariants();
        action
    }

    /// Insert text at the caret
    pub fn insert_text(&mut self, text: &str) -> EditAction {
        let caret = self.sync.live().caret();
        self.handle_edit(TextEdit::insert(caret, text))
    }

    /// Backspace at the caret
    pub fn delete_backward(&mut self) -> EditAction {
        let caret = self.sync.live().caret();
        self.handle_edit(TextEdit::DeleteBackward { caret })
    }

    /// Return key: tokenize pending text, or resign focus when there is none
    pub fn commit(&mut self) {
        match self.tokenize_live_text() {
            Some(_) => {}
            None => self.end_editing(),
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn begin_editing(&mut self) {
        if self.focused || !self.config.editable {
            return;
        }
        self.focused = true;
        self.anchor = ScrollAnchor::End;
        self.delegate.did_begin_editing();
        self.retokenize();
        if self.config.min_chars_to_search == 0 {
            self.request_search("");
        }
        self.relayout();
    }

    pub fn end_editing(&mut self) {
        if !self.focused {
            return;
        }
        self.focused = false;
        self.delegate.did_end_editing();
        self.store.deselect();
        if self.config.untokenize_on_end_editing {
            let titles = self.store.titles();
            self.presentation = Presentation::Flattened(untokenize(&titles, &self.config.separator_text));
        } else {
            self.anchor = ScrollAnchor::Start;
        }
        self.hide_results();
        self.relayout();
    }

    /// Rebuild chips from the flattened text, if it is showing
    pub fn retokenize(&mut self) {
        let Presentation::Flattened(text) = std::mem::take(&mut self.presentation) else {
            return;
        };
        let titles = tokenize(&text, &self.config.separator_text);
        let appearance = self.default_appearance();
        self.store.reconcile(&titles, &mut self.delegate, |title| {
            Token::new(title).with_appearance(appearance.clone())
        });
        debug!(target: "sync", count = self.store.len(), "retokenized flattened text");
        self.relayout();
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Start a search for `query` unless the field is full
    pub fn request_search(&mut self, query: &str) {
        if self.store.limit_reached() {
            debug!(target: "search", "at token limit, not searching");
            self.pending_search = None;
            self.hide_results();
            return;
        }
        let (request, shown) = self.search.begin(query);
        if shown {
            self.delegate.did_show_results();
        }
        self.pending_search = Some(request);
        self.relayout();
    }

    /// The most recent search that still needs running
    pub fn take_search_request(&mut self) -> Option<SearchRequest> {
        self.pending_search.take()
    }

    /// Deliver results of a search. Returns false for stale generations.
    pub fn deliver_results(&mut self, generation: u64, results: Vec<T>) -> bool {
        if !self.search.accepts(generation) {
            return self.search.deliver(generation, Vec::new());
        }
        let options = FilterOptions {
            display_already_tokenized: self.config.display_already_tokenized,
            sort: self.config.sort_results_alphabetically,
        };
        let delegate = &self.delegate;
        let candidates = filter_results(results, self.store.tokens(), self.eq, options, |object| {
            token_title_for(delegate, object)
        });
        self.search.deliver(generation, candidates)
    }

    pub fn show_results(&mut self) {
        if self.search.show() {
            self.delegate.did_show_results();
            self.relayout();
        }
    }

    pub fn hide_results(&mut self) {
        self.pending_search = None;
        if self.search.hide() {
            self.delegate.did_hide_results();
            self.relayout();
        }
    }

    /// Turn result row `index` into a token.
    ///
    /// Returns None when there is no such row.
    pub fn select_row(&mut self, index: usize) -> Option<Result<TokenId, AddRejection>> {
        let object = self.search.candidate(index)?.clone();
        self.delegate.did_select_row(index);

        let result = self.add_token_with_object(object);
        if result.is_ok() {
            self.store.deselect();
            self.sync.live_mut().clear();
            if self.config.hide_results_on_select || self.store.limit_reached() {
                self.hide_results();
            } else if !self.config.display_already_tokenized {
                self.search.remove_row(index);
            }
        }
        self.relayout();
        Some(result)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// What lies at (x, y)
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        let row_count = self.search.candidates().len();
        if let Some(row) = self
            .layout
            .row_at(x, y, self.config.result_row_height, row_count)
        {
            return Some(Hit::Row(row));
        }
        if let Some(id) = self.layout.chip_at(x, y) {
            return Some(Hit::Token(id));
        }
        self.layout.bounds.contains(x, y).then_some(Hit::Field)
    }

    fn compute_layout(&self) -> FieldLayout {
        let flattened = match &self.presentation {
            Presentation::Flattened(text) => Some(text.as_str()),
            Presentation::Tokens => None,
        };
        let input = LayoutInput {
            config: &self.config,
            tokens: self.store.tokens(),
            live_text: self.sync.live().as_str(),
            flattened,
            results_visible: self.search.is_visible(),
            anchor: self.anchor,
        };
        FieldLayout::compute(&input, self.area, self.metrics.as_ref())
    }

    /// Recompute layout, notifying the delegate when the frame height changes
    pub fn relayout(&mut self) {
        self.refresh_flattened();
        let layout = self.compute_layout();
        let old = self.layout.frame();
        let new = layout.frame();
        if old.height != new.height {
            self.delegate.will_change_frame(new);
            self.layout = layout;
            self.delegate.did_change_frame(new);
        } else {
            self.layout = layout;
        }
    }

    /// Flattened text is the store's titles, joined
    fn refresh_flattened(&mut self) {
        if let Presentation::Flattened(text) = &mut self.presentation {
            *text = untokenize(&self.store.titles(), &self.config.separator_text);
        }
    }

    fn debug_assert_invariants(&self) {
        debug_assert!(
            self.store.tokens().iter().filter(|t| t.is_selected()).count() <= 1,
            "more than one token selected"
        );
    }
}
