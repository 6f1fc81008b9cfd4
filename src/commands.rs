//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::search::SearchRequest;

/// Commands returned by update functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a redraw of the field
    Redraw,
    /// Run a search off the event loop; the results come back as
    /// `FieldMsg::SearchResults` carrying the same generation
    Search(SearchRequest),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands, flattening trivial cases
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // The panel shows its busy state right away
            Cmd::Search(_) => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }

    /// All search requests in this command
    pub fn searches(&self) -> Vec<&SearchRequest> {
        match self {
            Cmd::Search(request) => vec![request],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.searches()).collect(),
            Cmd::None | Cmd::Redraw => Vec::new(),
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
