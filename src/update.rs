//! Update function for the Elm-style architecture
//!
//! All field state changes driven by host events flow through [`update`].

use crate::commands::Cmd;
use crate::delegate::TokenFieldDelegate;
use crate::field::TokenField;
use crate::messages::{CaretMove, FieldMsg};

#[cfg(debug_assertions)]
use crate::tracing::FieldSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Apply `msg` to the field and return the side effects to run.
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update<T, D>(field: &mut TokenField<T, D>, msg: FieldMsg<T>) -> Option<Cmd>
where
    T: Clone,
    D: TokenFieldDelegate<T>,
{
    #[cfg(debug_assertions)]
    {
        update_traced(field, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(field, msg)
    }
}

fn update_inner<T, D>(field: &mut TokenField<T, D>, msg: FieldMsg<T>) -> Option<Cmd>
where
    T: Clone,
    D: TokenFieldDelegate<T>,
{
    let redraw = match msg {
        FieldMsg::Edit(edit) => {
            field.handle_edit(edit);
            true
        }
        FieldMsg::InsertText(text) => {
            field.insert_text(&text);
            true
        }
        FieldMsg::DeleteBackward => {
            field.delete_backward();
            true
        }
        FieldMsg::MoveCaret(movement) => {
            let live = field.live_text();
            let caret = match movement {
                CaretMove::Left => live.caret().saturating_sub(1),
                CaretMove::Right => live.caret() + 1,
                CaretMove::Home => 0,
                CaretMove::End => live.char_len(),
                CaretMove::To(index) => index,
            };
            field.move_caret(caret);
            true
        }
        FieldMsg::Commit => {
            field.commit();
            true
        }
        FieldMsg::FocusGained => {
            field.begin_editing();
            true
        }
        FieldMsg::FocusLost => {
            field.end_editing();
            true
        }
        FieldMsg::SearchResults {
            generation,
            results,
        } => field.deliver_results(generation, results),
        FieldMsg::SelectRow(index) => field.select_row(index).is_some(),
        FieldMsg::DismissResults => {
            field.hide_results();
            true
        }
        FieldMsg::TapToken(id) => {
            field.begin_editing();
            field.select_token(id);
            true
        }
        FieldMsg::AddToken(title) => field.add_token_with_title(&title).is_ok(),
        FieldMsg::DeleteToken(id) => field.delete_token(id).is_removed(),
        FieldMsg::DeleteAll => {
            field.delete_all();
            true
        }
        FieldMsg::SetArea(area) => {
            field.set_area(area);
            true
        }
    };

    let search = field.take_search_request().map(Cmd::Search);
    let cmd = Cmd::batch(vec![
        if redraw { Cmd::Redraw } else { Cmd::None },
        search.unwrap_or_default(),
    ]);
    (cmd != Cmd::None).then_some(cmd)
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after field state and logs the diff.
#[cfg(debug_assertions)]
fn update_traced<T, D>(field: &mut TokenField<T, D>, msg: FieldMsg<T>) -> Option<Cmd>
where
    T: Clone,
    D: TokenFieldDelegate<T>,
{
    let msg_name = msg.name();
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    debug!(target: "message", msg = %msg_name, "processing");

    let before = FieldSnapshot::from_field(field);
    let result = update_inner(field, msg);
    let after = FieldSnapshot::from_field(field);

    if let Some(diff) = before.diff(&after) {
        debug!(target: "message", %diff, "state changed");
    }

    result
}
