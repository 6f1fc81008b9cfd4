//! Background search execution
//!
//! `update` only ever returns a `Cmd::Search`; something has to run it. The
//! [`SearchDispatcher`] runs each request on its own thread against a
//! [`SearchProvider`] and posts the results back into a single channel. The
//! event loop drains that channel, so results are applied one at a time on
//! the thread that owns the field.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::commands::Cmd;
use crate::delegate::TokenFieldDelegate;
use crate::field::TokenField;
use crate::messages::FieldMsg;
use crate::search::SearchRequest;
use crate::update::update;

/// Source of search candidates. May block; it never runs on the event loop.
pub trait SearchProvider<T>: Send + Sync {
    fn search(&self, query: &str) -> Vec<T>;
}

impl<T, F> SearchProvider<T> for F
where
    F: Fn(&str) -> Vec<T> + Send + Sync,
{
    fn search(&self, query: &str) -> Vec<T> {
        self(query)
    }
}

pub struct SearchDispatcher<T> {
    provider: Arc<dyn SearchProvider<T>>,
    msg_tx: Sender<FieldMsg<T>>,
    msg_rx: Receiver<FieldMsg<T>>,
}

impl<T: Send + 'static> SearchDispatcher<T> {
    pub fn new(provider: Arc<dyn SearchProvider<T>>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            provider,
            msg_tx,
            msg_rx,
        }
    }

    /// Sender for other asynchronous producers that feed the same loop
    pub fn sender(&self) -> Sender<FieldMsg<T>> {
        self.msg_tx.clone()
    }

    /// Run one search in the background
    pub fn dispatch(&self, request: SearchRequest) {
        let tx = self.msg_tx.clone();
        let provider = Arc::clone(&self.provider);
        std::thread::spawn(move || {
            let results = provider.search(&request.query);
            debug!(
                target: "search",
                generation = request.generation,
                count = results.len(),
                "search finished"
            );
            let _ = tx.send(FieldMsg::SearchResults {
                generation: request.generation,
                results,
            });
        });
    }

    /// Run every search in `cmd`
    pub fn process_cmd(&self, cmd: &Cmd) {
        for request in cmd.searches() {
            self.dispatch(request.clone());
        }
    }

    /// Messages that have arrived so far
    pub fn drain(&self) -> Vec<FieldMsg<T>> {
        self.msg_rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next message
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FieldMsg<T>> {
        self.msg_rx.recv_timeout(timeout).ok()
    }

    /// Apply all arrived messages to `field`, dispatching any follow-up
    /// searches. Returns true when a redraw is needed.
    pub fn process_pending<D>(&self, field: &mut TokenField<T, D>) -> bool
    where
        T: Clone,
        D: TokenFieldDelegate<T>,
    {
        let mut needs_redraw = false;
        for msg in self.drain() {
            if let Some(cmd) = update(field, msg) {
                needs_redraw |= cmd.needs_redraw();
                self.process_cmd(&cmd);
            }
        }
        needs_redraw
    }
}
