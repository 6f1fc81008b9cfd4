//! Search results: generations, filtering, row selection

mod common;

use chipfield::search::{filter_results, FilterOptions, SearchCoordinator, SearchRow};
use chipfield::store::AddRejection;
use chipfield::sync::{EditAction, EditState};
use chipfield::token::ObjectEq;
use chipfield::{FieldConfig, Token};
use common::{field_with_tokens, plain_config, strings, titles, TestField};

/// Type `query` and return the generation of the search it started
fn search_for(field: &mut TestField, query: &str) -> u64 {
    field.insert_text(query);
    field.take_search_request().unwrap().generation
}

// ========================================================================
// Delivery
// ========================================================================

#[test]
fn test_results_are_deduplicated_filtered_and_sorted() {
    let mut field = field_with_tokens(plain_config(), &[]);
    field.add_token_with_object("Bob".to_string()).unwrap();
    let generation = search_for(&mut field, "o");

    let delivered = field.deliver_results(generation, strings(&["Rory", "Bob", "Amy", "Rory"]));
    assert!(delivered);
    assert!(!field.is_busy());
    assert_eq!(field.search().candidates(), &strings(&["Amy", "Rory"])[..]);
    assert_eq!(
        field.rows()[0],
        SearchRow {
            title: "Amy".to_string(),
            detail: Some("amy@example.com".to_string()),
        }
    );
}

#[test]
fn test_already_tokenized_objects_can_be_shown() {
    let config = FieldConfig {
        display_already_tokenized: true,
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &[]);
    field.add_token_with_object("Bob".to_string()).unwrap();
    let generation = search_for(&mut field, "o");

    field.deliver_results(generation, strings(&["Rory", "Bob"]));
    assert_eq!(field.search().candidates(), &strings(&["Bob", "Rory"])[..]);
}

#[test]
fn test_unsorted_results_keep_provider_order() {
    let config = FieldConfig {
        sort_results_alphabetically: false,
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &[]);
    let generation = search_for(&mut field, "r");

    field.deliver_results(generation, strings(&["Rory", "River", "Amy"]));
    assert_eq!(field.search().candidates(), &strings(&["Rory", "River", "Amy"])[..]);
}

#[test]
fn test_stale_results_are_dropped() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let first = search_for(&mut field, "a");
    let second = search_for(&mut field, "m");
    assert!(second > first);

    assert!(!field.deliver_results(first, strings(&["Amy"])));
    assert!(field.is_busy());
    assert!(field.search().candidates().is_empty());

    assert!(field.deliver_results(second, strings(&["Amy"])));
    assert_eq!(field.search().candidates().len(), 1);
}

#[test]
fn test_hiding_results_cancels_in_flight_search() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let generation = search_for(&mut field, "a");

    field.hide_results();
    assert!(!field.results_visible());
    assert!(!field.is_busy());
    assert!(!field.deliver_results(generation, strings(&["Amy"])));
    assert!(!field.results_visible());
    assert!(field.delegate().saw("did_hide_results"));
}

#[test]
fn test_show_and_hide_fire_once_per_transition() {
    let mut field = field_with_tokens(plain_config(), &[]);
    search_for(&mut field, "a");
    search_for(&mut field, "m");
    field.hide_results();
    field.hide_results();

    assert_eq!(field.delegate().count("did_show_results"), 1);
    assert_eq!(field.delegate().count("did_hide_results"), 1);
}

#[test]
fn test_no_search_at_token_limit() {
    let config = FieldConfig {
        max_tokens: Some(1),
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &["amy"]);
    field.insert_text("r");

    assert!(field.take_search_request().is_none());
    assert!(!field.results_visible());
}

// ========================================================================
// Picking a row
// ========================================================================

#[test]
fn test_select_row_adds_token_and_removes_row() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let generation = search_for(&mut field, "a");
    field.deliver_results(generation, strings(&["Amy", "Ada"]));

    let added = field.select_row(0);
    assert!(matches!(added, Some(Ok(_))));
    assert_eq!(titles(&field), strings(&["Ada"]));
    assert_eq!(field.tokens()[0].object.as_deref(), Some("Ada"));
    assert_eq!(field.text(), "");
    assert!(field.results_visible());
    assert_eq!(field.search().candidates(), &strings(&["Amy"])[..]);
    assert!(field.delegate().saw("did_select_row:0"));
}

#[test]
fn test_select_row_keeps_row_when_tokenized_objects_are_shown() {
    let config = FieldConfig {
        display_already_tokenized: true,
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &[]);
    let generation = search_for(&mut field, "a");
    field.deliver_results(generation, strings(&["Amy", "Ada"]));

    field.select_row(1);
    assert_eq!(titles(&field), strings(&["Amy"]));
    assert_eq!(field.search().candidates().len(), 2);
}

#[test]
fn test_select_row_can_hide_results() {
    let config = FieldConfig {
        hide_results_on_select: true,
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &[]);
    let generation = search_for(&mut field, "a");
    field.deliver_results(generation, strings(&["Amy"]));

    field.select_row(0);
    assert!(!field.results_visible());
    assert!(field.delegate().saw("did_hide_results"));
}

#[test]
fn test_select_row_reaching_limit_hides_results() {
    let config = FieldConfig {
        max_tokens: Some(1),
        ..plain_config()
    };
    let mut field = field_with_tokens(config, &[]);
    let generation = search_for(&mut field, "a");
    field.deliver_results(generation, strings(&["Amy", "Ada"]));

    field.select_row(1);
    assert_eq!(titles(&field), strings(&["Amy"]));
    assert!(!field.results_visible());
}

#[test]
fn test_select_row_clears_token_selection() {
    let mut field = field_with_tokens(plain_config(), &["amy"]);
    let id = field.tokens()[0].id();
    field.select_token(id);
    field.request_search("a");
    let generation = field.take_search_request().unwrap().generation;
    field.deliver_results(generation, strings(&["Ada"]));

    assert!(matches!(field.select_row(0), Some(Ok(_))));
    assert!(field.selected_token().is_none());
    assert_eq!(field.state(), EditState::Idle);

    assert_eq!(field.delete_backward(), EditAction::SelectLastToken);
    assert_eq!(titles(&field), strings(&["amy", "Ada"]));
    assert_eq!(field.selected_token().map(|t| t.title.as_str()), Some("Ada"));
}

#[test]
fn test_vetoed_row_stays_listed() {
    let mut field = field_with_tokens(plain_config(), &[]);
    let generation = search_for(&mut field, "a");
    field.deliver_results(generation, strings(&["Amy"]));
    field.delegate_mut().veto_add = true;

    assert_eq!(field.select_row(0), Some(Err(AddRejection::Vetoed)));
    assert!(field.tokens().is_empty());
    assert_eq!(field.text(), "a");
    assert_eq!(field.search().candidates().len(), 1);
}

#[test]
fn test_select_missing_row() {
    let mut field = field_with_tokens(plain_config(), &[]);
    assert!(field.select_row(3).is_none());
}

// ========================================================================
// Re-searching after deletes
// ========================================================================

#[test]
fn test_deleting_a_token_restarts_search_with_empty_query() {
    let mut field = field_with_tokens(plain_config(), &["amy", "rory"]);
    let id = field.tokens()[0].id();
    field.delete_token(id);

    let request = field.take_search_request().unwrap();
    assert_eq!(request.query, "");
    assert!(field.results_visible());
}

#[test]
fn test_deleting_while_unfocused_does_not_search() {
    let mut field = field_with_tokens(plain_config(), &["amy", "rory"]);
    field.end_editing();
    let id = field.tokens()[0].id();
    field.delete_token(id);

    assert!(field.take_search_request().is_none());
    assert!(!field.results_visible());
    assert!(!field.delegate().saw("did_show_results"));
}

#[test]
fn test_delete_all_refreshes_visible_results() {
    let mut field = field_with_tokens(plain_config(), &["rory"]);
    let generation = search_for(&mut field, "am");
    field.deliver_results(generation, strings(&["Amy"]));

    field.delete_all();
    let request = field.take_search_request().unwrap();
    assert_eq!(request.query, "am");
    assert!(request.generation > generation);
}

#[test]
fn test_delete_all_without_results_does_not_search() {
    let mut field = field_with_tokens(plain_config(), &["rory"]);
    field.delete_all();
    assert!(field.take_search_request().is_none());
}

// ========================================================================
// Building blocks
// ========================================================================

fn same_ignoring_case(a: &String, b: &String) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[test]
fn test_filter_uses_object_equality() {
    let eq: ObjectEq<String> = same_ignoring_case;
    let tokens = vec![Token::with_object("Bob", "bob".to_string())];
    let options = FilterOptions {
        display_already_tokenized: false,
        sort: false,
    };

    let kept = filter_results(strings(&["amy", "BOB", "AMY", "rory"]), &tokens, eq, options, |s| {
        s.clone()
    });
    assert_eq!(kept, strings(&["amy", "rory"]));
}

#[test]
fn test_filter_sort_is_stable() {
    let eq: ObjectEq<String> = |a, b| a == b;
    let options = FilterOptions {
        display_already_tokenized: true,
        sort: true,
    };

    let kept = filter_results(strings(&["b", "A", "a"]), &[], eq, options, |s| s.to_lowercase());
    assert_eq!(kept, strings(&["A", "a", "b"]));
}

#[test]
fn test_coordinator_reports_first_show_only() {
    let mut search: SearchCoordinator<String> = SearchCoordinator::new();
    let (first, shown) = search.begin(" am ");
    assert!(shown);
    assert_eq!(first.query, "am");

    let (second, shown) = search.begin("amy");
    assert!(!shown);
    assert_eq!(second.generation, first.generation + 1);
}

#[test]
fn test_tokenized_object_dropped_from_unsorted_list() {
    let tokens = vec![Token::with_object("A", "A".to_string())];
    let options = FilterOptions {
        display_already_tokenized: false,
        sort: false,
    };
    let kept = filter_results(
        strings(&["A", "B", "A", "C"]),
        &tokens,
        |a, b| a == b,
        options,
        |s| s.clone(),
    );
    assert_eq!(kept, strings(&["B", "C"]));
}

#[test]
fn test_sorted_by_title() {
    let options = FilterOptions {
        display_already_tokenized: true,
        sort: true,
    };
    let kept = filter_results(
        strings(&["Zoe", "Amy", "Mike"]),
        &[],
        |a, b| a == b,
        options,
        |s| s.clone(),
    );
    assert_eq!(kept, strings(&["Amy", "Mike", "Zoe"]));
}
