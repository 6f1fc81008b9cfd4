//! Ordered token collection backing the field
//!
//! Owns the add/remove/limit/selection rules. Invariants:
//! - insertion order is display order
//! - at most one token is selected
//! - sticky tokens survive every removal path
//! - once `max_tokens` is reached, adds are rejected before `should_add` runs

use tracing::debug;

use crate::delegate::TokenFieldDelegate;
use crate::token::{ObjectEq, Token, TokenId};

/// Why an add did not insert anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRejection {
    /// The store already holds `max_tokens` tokens
    LimitReached,
    /// The title was empty after trimming
    EmptyTitle,
    /// `should_add` returned false
    Vetoed,
}

/// Result of a single removal
#[derive(Debug, Clone)]
pub enum RemoveOutcome<T> {
    Removed(Token<T>),
    /// Sticky tokens are never removed
    Sticky,
    /// `should_delete` returned false
    Vetoed,
    NotFound,
}

impl<T> RemoveOutcome<T> {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

/// Result of a bulk removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveAllOutcome {
    /// Number of tokens removed (sticky ones are kept silently)
    Removed(usize),
    /// Nothing to remove, no hooks fired
    Empty,
    /// `should_delete_all` returned false
    Vetoed,
}

#[derive(Debug, Clone)]
pub struct TokenStore<T> {
    tokens: Vec<Token<T>>,
    max_tokens: Option<usize>,
    next_id: u64,
}

impl<T> Default for TokenStore<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> TokenStore<T> {
    pub fn new(max_tokens: Option<usize>) -> Self {
        Self {
            tokens: Vec::new(),
            max_tokens,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token<T>] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token<T>> {
        self.tokens.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.title.as_str()).collect()
    }

    pub fn max_tokens(&self) -> Option<usize> {
        self.max_tokens
    }

    /// Change the limit. Tokens above a lowered limit are kept.
    pub fn set_max_tokens(&mut self, max_tokens: Option<usize>) {
        self.max_tokens = max_tokens;
    }

    /// True when a limit is set and the store holds at least that many tokens
    pub fn limit_reached(&self) -> bool {
        self.max_tokens.is_some_and(|max| self.tokens.len() >= max)
    }

    pub fn index_of(&self, id: TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: TokenId) -> Option<&Token<T>> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn last(&self) -> Option<&Token<T>> {
        self.tokens.last()
    }

    /// Last token that a deletion could remove
    pub fn last_deletable(&self) -> Option<&Token<T>> {
        self.tokens.iter().rev().find(|t| !t.sticky)
    }

    /// Index of the first token holding `object`
    pub fn position_of_object(&self, object: &T, eq: ObjectEq<T>) -> Option<usize> {
        self.tokens.iter().position(|t| t.holds(object, eq))
    }

    /// First token holding `object`
    pub fn find_by_object(&self, object: &T, eq: ObjectEq<T>) -> Option<&Token<T>> {
        self.tokens.iter().find(|t| t.holds(object, eq))
    }

    pub fn contains_object(&self, object: &T, eq: ObjectEq<T>) -> bool {
        self.find_by_object(object, eq).is_some()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selected(&self) -> Option<&Token<T>> {
        self.tokens.iter().find(|t| t.selected)
    }

    /// Select `id`, clearing any previous selection first.
    /// Returns false (and leaves selection cleared) if `id` is unknown.
    pub fn select(&mut self, id: TokenId) -> bool {
        let mut found = false;
        for token in &mut self.tokens {
            token.selected = token.id == id;
            found |= token.selected;
        }
        found
    }

    pub fn deselect(&mut self) {
        for token in &mut self.tokens {
            token.selected = false;
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add a token, running the delegate's add hooks.
    ///
    /// The token `change_appearance` returns (if any) is what gets inserted
    /// and reported to `did_add`.
    pub fn add<D>(
        &mut self,
        mut token: Token<T>,
        delegate: &mut D,
    ) -> Result<&Token<T>, AddRejection>
    where
        D: TokenFieldDelegate<T> + ?Sized,
    {
        if self.limit_reached() {
            debug!(target: "store", title = %token.title, "add rejected: limit reached");
            delegate.did_fail_to_add(&token);
            return Err(AddRejection::LimitReached);
        }

        let trimmed = token.title.trim();
        if trimmed.is_empty() {
            debug!(target: "store", "add ignored: empty title");
            return Err(AddRejection::EmptyTitle);
        }
        if trimmed.len() != token.title.len() {
            token.title = trimmed.to_string();
        }

        if !delegate.should_add(&token) {
            debug!(target: "store", title = %token.title, "add vetoed");
            delegate.did_fail_to_add(&token);
            return Err(AddRejection::Vetoed);
        }

        delegate.will_add(&mut token);
        let mut token = delegate.change_appearance(&token).unwrap_or(token);

        token.id = TokenId(self.next_id);
        token.selected = false;
        self.next_id += 1;
        self.tokens.push(token);

        let index = self.tokens.len() - 1;
        debug!(target: "store", title = %self.tokens[index].title, count = self.tokens.len(), "token added");
        delegate.did_add(&self.tokens[index]);
        Ok(&self.tokens[index])
    }

    /// Remove a single token, running the delegate's delete hooks
    pub fn remove<D>(&mut self, id: TokenId, delegate: &mut D) -> RemoveOutcome<T>
    where
        D: TokenFieldDelegate<T> + ?Sized,
    {
        let Some(index) = self.index_of(id) else {
            return RemoveOutcome::NotFound;
        };

        if self.tokens[index].sticky {
            debug!(target: "store", title = %self.tokens[index].title, "remove skipped: sticky");
            return RemoveOutcome::Sticky;
        }

        if !delegate.should_delete(&self.tokens[index]) {
            debug!(target: "store", title = %self.tokens[index].title, "remove vetoed");
            delegate.did_fail_to_delete(&self.tokens[index]);
            return RemoveOutcome::Vetoed;
        }

        delegate.will_delete(&self.tokens[index]);
        let mut token = self.tokens.remove(index);
        token.selected = false;
        debug!(target: "store", title = %token.title, count = self.tokens.len(), "token removed");
        delegate.did_delete(&token);
        RemoveOutcome::Removed(token)
    }

    /// Remove every non-sticky token.
    ///
    /// Per-token hooks do not fire; the bulk hooks wrap the whole operation.
    pub fn remove_all<D>(&mut self, delegate: &mut D) -> RemoveAllOutcome
    where
        D: TokenFieldDelegate<T> + ?Sized,
    {
        if self.tokens.is_empty() {
            return RemoveAllOutcome::Empty;
        }

        if !delegate.should_delete_all() {
            debug!(target: "store", "remove all vetoed");
            delegate.did_fail_to_delete_all();
            return RemoveAllOutcome::Vetoed;
        }

        delegate.will_delete_all();
        let before = self.tokens.len();
        self.tokens.retain(|t| t.sticky);
        let removed = before - self.tokens.len();
        debug!(target: "store", removed, kept = self.tokens.len(), "tokens removed");
        delegate.did_delete_all();
        RemoveAllOutcome::Removed(removed)
    }

    /// Rebuild the store from a list of titles (re-tokenizing flattened text).
    ///
    /// Existing tokens are reused, in order, when their title matches; other
    /// titles go through [`add`](Self::add). Unmatched non-sticky tokens are
    /// dropped without hooks; unmatched sticky tokens stay in front.
    pub fn reconcile<D, F>(&mut self, titles: &[String], delegate: &mut D, mut make_token: F)
    where
        D: TokenFieldDelegate<T> + ?Sized,
        F: FnMut(&str) -> Token<T>,
    {
        enum Slot<T> {
            Keep(Token<T>),
            New(usize),
        }

        let mut pool: Vec<Option<Token<T>>> =
            std::mem::take(&mut self.tokens).into_iter().map(Some).collect();

        let mut plan = Vec::with_capacity(titles.len());
        for (i, title) in titles.iter().enumerate() {
            let reused = pool
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|t| &t.title == title))
                .and_then(Option::take);
            match reused {
                Some(token) => plan.push(Slot::Keep(token)),
                None => plan.push(Slot::New(i)),
            }
        }

        self.tokens = pool.into_iter().flatten().filter(|t| t.sticky).collect();
        for slot in plan {
            match slot {
                Slot::Keep(mut token) => {
                    token.selected = false;
                    self.tokens.push(token);
                }
                Slot::New(i) => {
                    let _ = self.add(make_token(&titles[i]), delegate);
                }
            }
        }
        self.deselect();
    }
}
