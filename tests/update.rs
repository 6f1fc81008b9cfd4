//! Message dispatch through `update` and the commands it returns

mod common;

use chipfield::messages::CaretMove;
use chipfield::search::SearchRequest;
use chipfield::{update, Cmd, FieldConfig, FieldMsg};
use common::{field_with_tokens, plain_config, strings, test_field, titles};

#[test]
fn test_typing_returns_redraw_and_search() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let cmd = update(&mut field, FieldMsg::InsertText("a".to_string())).unwrap();

    assert!(cmd.needs_redraw());
    let searches = cmd.searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query, "a");
    assert!(field.take_search_request().is_none());
}

#[test]
fn test_search_results_message_applies_current_generation() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let cmd = update(&mut field, FieldMsg::InsertText("a".to_string())).unwrap();
    let SearchRequest { generation, .. } = cmd.searches()[0].clone();

    let stale = update(
        &mut field,
        FieldMsg::SearchResults {
            generation: generation - 1,
            results: strings(&["Old"]),
        },
    );
    assert_eq!(stale, None);

    let fresh = update(
        &mut field,
        FieldMsg::SearchResults {
            generation,
            results: strings(&["Amy"]),
        },
    );
    assert_eq!(fresh, Some(Cmd::Redraw));
    assert_eq!(field.rows().len(), 1);
}

#[test]
fn test_commit_message_tokenizes() {
    let mut field = field_with_tokens(plain_config(), &[]);
    update(&mut field, FieldMsg::InsertText("amy".to_string()));
    update(&mut field, FieldMsg::Commit);
    assert_eq!(titles(&field), strings(&["amy"]));
}

#[test]
fn test_caret_moves() {
    let mut field = field_with_tokens(plain_config(), &[]);
    update(&mut field, FieldMsg::InsertText("amy".to_string()));

    update(&mut field, FieldMsg::MoveCaret(CaretMove::Home));
    assert_eq!(field.live_text().caret(), 0);
    update(&mut field, FieldMsg::MoveCaret(CaretMove::Left));
    assert_eq!(field.live_text().caret(), 0);
    update(&mut field, FieldMsg::MoveCaret(CaretMove::Right));
    assert_eq!(field.live_text().caret(), 1);
    update(&mut field, FieldMsg::MoveCaret(CaretMove::End));
    assert_eq!(field.live_text().caret(), 3);
    update(&mut field, FieldMsg::MoveCaret(CaretMove::Right));
    assert_eq!(field.live_text().caret(), 3);
}

#[test]
fn test_insert_at_moved_caret() {
    let mut field = field_with_tokens(plain_config(), &[]);
    update(&mut field, FieldMsg::InsertText("amy".to_string()));
    update(&mut field, FieldMsg::MoveCaret(CaretMove::To(1)));
    update(&mut field, FieldMsg::InsertText("n".to_string()));
    assert_eq!(field.text(), "anmy");
}

#[test]
fn test_tap_token_focuses_and_selects() {
    let mut field = test_field(plain_config());
    let id = field.add_token_with_title("amy").unwrap();

    update(&mut field, FieldMsg::TapToken(id));
    assert!(field.is_focused());
    assert_eq!(field.selected_token().map(|t| t.id()), Some(id));
}

#[test]
fn test_focus_messages() {
    let config = FieldConfig {
        min_chars_to_search: 0,
        ..plain_config()
    };
    let mut field = test_field(config);

    let cmd = update(&mut field, FieldMsg::FocusGained).unwrap();
    assert_eq!(cmd.searches().len(), 1);

    let cmd = update(&mut field, FieldMsg::FocusLost).unwrap();
    assert!(cmd.searches().is_empty());
    assert!(!field.is_focused());
    assert!(!field.results_visible());
}

#[test]
fn test_dismiss_results() {
    let mut field = field_with_tokens(plain_config(), &[]);
    update(&mut field, FieldMsg::InsertText("a".to_string()));
    assert!(field.results_visible());

    update(&mut field, FieldMsg::DismissResults);
    assert!(!field.results_visible());
    assert!(field.is_focused());
}

#[test]
fn test_select_row_message() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let cmd = update(&mut field, FieldMsg::InsertText("a".to_string())).unwrap();
    let generation = cmd.searches()[0].generation;
    update(
        &mut field,
        FieldMsg::SearchResults {
            generation,
            results: strings(&["Amy"]),
        },
    );

    assert!(update(&mut field, FieldMsg::SelectRow(0)).is_some());
    assert_eq!(titles(&field), strings(&["Amy"]));
    assert_eq!(update(&mut field, FieldMsg::SelectRow(5)), None);
}

#[test]
fn test_add_and_delete_messages() {
    let mut field = test_field(plain_config());
    assert_eq!(
        update(&mut field, FieldMsg::AddToken("amy".to_string())),
        Some(Cmd::Redraw)
    );
    assert_eq!(update(&mut field, FieldMsg::AddToken("  ".to_string())), None);

    let id = field.tokens()[0].id();
    assert_eq!(update(&mut field, FieldMsg::DeleteToken(id)), Some(Cmd::Redraw));
    assert!(field.tokens().is_empty());

    update(&mut field, FieldMsg::AddToken("rory".to_string()));
    update(&mut field, FieldMsg::DeleteAll);
    assert!(field.tokens().is_empty());
}

#[test]
fn test_backspace_messages() {
    let mut field = field_with_tokens(plain_config(), &["amy"]);
    update(&mut field, FieldMsg::DeleteBackward);
    assert!(field.selected_token().is_some());
    update(&mut field, FieldMsg::DeleteBackward);
    assert!(field.tokens().is_empty());
}

#[test]
fn test_cmd_batch_flattens() {
    assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
    assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::Redraw]), Cmd::Redraw);
    assert!(matches!(
        Cmd::batch(vec![Cmd::Redraw, Cmd::Redraw]),
        Cmd::Batch(cmds) if cmds.len() == 2
    ));
    assert_eq!(Cmd::from(None), Cmd::None);
}
