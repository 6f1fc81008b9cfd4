//! Search results: request generations, filtering and row projection
//!
//! Searches are asynchronous. Each [`SearchCoordinator::begin`] bumps a
//! generation number; results carrying an older generation are dropped on
//! delivery, which is how superseded searches get cancelled.

use tracing::debug;

use crate::delegate::TokenFieldDelegate;
use crate::token::{ObjectEq, Token};

/// A search the host (or a worker) should run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// One displayed result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub title: String,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Keep candidates that are already some token's object
    pub display_already_tokenized: bool,
    /// Sort by token title (ordinal, case-sensitive)
    pub sort: bool,
}

/// Raw results → displayed candidates.
///
/// Drops later duplicates within `raw`, then (unless allowed) candidates that
/// some token already holds, then optionally sorts by `title`. The sort is
/// stable, so equal titles keep their original order.
pub fn filter_results<T, F>(
    raw: Vec<T>,
    tokens: &[Token<T>],
    eq: ObjectEq<T>,
    options: FilterOptions,
    title: F,
) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut kept: Vec<T> = Vec::with_capacity(raw.len());
    for candidate in raw {
        if kept.iter().any(|k| eq(k, &candidate)) {
            continue;
        }
        if !options.display_already_tokenized && tokens.iter().any(|t| t.holds(&candidate, eq)) {
            continue;
        }
        kept.push(candidate);
    }

    if options.sort {
        let mut keyed: Vec<(String, T)> = kept.into_iter().map(|c| (title(&c), c)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        kept = keyed.into_iter().map(|(_, c)| c).collect();
    }
    kept
}

/// Title a token built from `object` gets: `token_title`, else `display_title`
pub fn token_title_for<T, D>(delegate: &D, object: &T) -> String
where
    D: TokenFieldDelegate<T> + ?Sized,
{
    delegate
        .token_title(object)
        .unwrap_or_else(|| delegate.display_title(object))
}

/// State of the result panel
#[derive(Debug, Clone)]
pub struct SearchCoordinator<T> {
    candidates: Vec<T>,
    generation: u64,
    busy: bool,
    visible: bool,
    last_query: Option<String>,
}

impl<T> Default for SearchCoordinator<T> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            generation: 0,
            busy: false,
            visible: false,
            last_query: None,
        }
    }
}

impl<T> SearchCoordinator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&T> {
        self.candidates.get(index)
    }

    /// Start a search: clear candidates, show the (empty) panel, mark busy.
    ///
    /// Returns the request and whether the panel just became visible.
    pub fn begin(&mut self, query: &str) -> (SearchRequest, bool) {
        let query = query.trim().to_string();
        self.generation += 1;
        self.candidates.clear();
        self.busy = true;
        self.last_query = Some(query.clone());
        let shown = self.show();
        debug!(target: "search", generation = self.generation, %query, "search requested");
        (
            SearchRequest {
                generation: self.generation,
                query,
            },
            shown,
        )
    }

    /// Accept results for `generation`, already filtered by the caller.
    ///
    /// Returns false (and changes nothing) when the generation is stale or the
    /// panel was hidden since the request.
    pub fn deliver(&mut self, generation: u64, candidates: Vec<T>) -> bool {
        if generation != self.generation || !self.visible {
            debug!(
                target: "search",
                generation,
                current = self.generation,
                "dropping stale search results"
            );
            return false;
        }
        self.busy = false;
        self.candidates = candidates;
        debug!(target: "search", generation, count = self.candidates.len(), "search results delivered");
        true
    }

    /// Whether `generation` would be accepted by [`deliver`](Self::deliver)
    pub fn accepts(&self, generation: u64) -> bool {
        generation == self.generation && self.visible
    }

    /// Returns true on a hidden → visible transition
    pub fn show(&mut self) -> bool {
        let changed = !self.visible;
        self.visible = true;
        changed
    }

    /// Hide the panel and drop any in-flight search.
    ///
    /// Returns true on a visible → hidden transition.
    pub fn hide(&mut self) -> bool {
        let changed = self.visible;
        if self.busy || self.visible {
            self.generation += 1;
        }
        self.visible = false;
        self.busy = false;
        self.candidates.clear();
        changed
    }

    /// Remove one displayed row
    pub fn remove_row(&mut self, index: usize) -> Option<T> {
        (index < self.candidates.len()).then(|| self.candidates.remove(index))
    }

    /// Project candidates into rows using the delegate's display names
    pub fn rows<D>(&self, delegate: &D) -> Vec<SearchRow>
    where
        D: TokenFieldDelegate<T> + ?Sized,
    {
        self.candidates
            .iter()
            .map(|c| SearchRow {
                title: delegate.display_title(c),
                detail: delegate.display_detail(c),
            })
            .collect()
    }
}
