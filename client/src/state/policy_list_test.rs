use futures::executor::block_on;
use policies::Timestamp;

use super::*;
use crate::state::fake_api::{FakeApi, policy, rejected};

fn loaded(items: Vec<Policy>) -> PolicyListState {
    let mut state = PolicyListState::default();
    assert!(state.finish_refresh(Ok(items), "t").is_none());
    state
}

fn many(count: usize) -> Vec<Policy> {
    (0..count).map(|i| policy(&format!("id-{i:02}"), &format!("policy-{i:02}"))).collect()
}

#[test]
fn default_state_is_loading_on_first_page() {
    let state = PolicyListState::default();
    assert!(state.loading);
    assert_eq!(state.current_page, 1);
    assert_eq!(state.preferences.page_size, 10);
    assert_eq!(state.empty_state(), None);
}

#[test]
fn default_preferences_hide_creation_date() {
    let prefs = TablePreferences::default();
    assert!(prefs.is_visible(ColumnId::Name));
    assert!(prefs.is_visible(ColumnId::Description));
    assert!(!prefs.is_visible(ColumnId::CreationDate));
    assert!(prefs.is_visible(ColumnId::LastModified));
}

#[test]
fn preferences_keep_name_column_and_valid_page_size() {
    let prefs = TablePreferences { page_size: 50, visible_columns: vec![ColumnId::LastModified] }.normalized();
    assert_eq!(prefs.page_size, 10);
    assert_eq!(prefs.visible_columns, [ColumnId::Name, ColumnId::LastModified]);
}

#[test]
fn counter_shows_total_or_selected_over_total() {
    let mut state = loaded(vec![policy("1", "p1"), policy("2", "p2")]);
    assert_eq!(state.counter_text(), "(2)");
    state.select("2");
    assert_eq!(state.counter_text(), "(1/2)");
}

#[test]
fn select_ignores_unknown_ids_and_keeps_single_selection() {
    let mut state = loaded(vec![policy("1", "p1"), policy("2", "p2")]);
    state.select("1");
    state.select("2");
    state.select("missing");
    assert_eq!(state.selected().map(|p| p.id.as_str()), Some("2"));
}

#[test]
fn filter_matches_case_insensitively_across_fields() {
    let mut state = loaded(vec![policy("1", "ReadOnly"), policy("2", "write-all"), policy("3", "readers")]);
    state.set_filter("READ");
    let names: Vec<_> = state.filtered().iter().map(|p| p.policy_name.as_str()).collect();
    assert_eq!(names, ["ReadOnly", "readers"]);
    assert_eq!(state.match_count_text().as_deref(), Some("2 matches"));

    state.set_filter("write-all description");
    assert_eq!(state.match_count_text().as_deref(), Some("1 match"));

    state.clear_filter();
    assert_eq!(state.match_count_text(), None);
    assert_eq!(state.filtered().len(), 3);
}

#[test]
fn filter_matches_formatted_dates() {
    let mut dated = policy("1", "p1");
    dated.last_modified = Some(Timestamp::from_millis(1_689_948_300_000.0));
    let mut state = loaded(vec![dated, policy("2", "p2")]);
    state.set_filter("july 21");
    assert_eq!(state.filtered().len(), 1);
}

#[test]
fn empty_states_distinguish_no_data_from_no_matches() {
    let mut state = loaded(Vec::new());
    assert_eq!(state.empty_state(), Some(EmptyState::NoPolicies));
    assert_eq!(EmptyState::NoPolicies.action_label(), "Create policy");

    state = loaded(vec![policy("1", "p1")]);
    state.set_filter("zzz");
    assert_eq!(state.empty_state(), Some(EmptyState::NoMatches));
    assert_eq!(state.match_count_text().as_deref(), Some("0 matches"));
    assert_eq!(EmptyState::NoMatches.action_label(), "Clear filter");
}

#[test]
fn pagination_slices_sorted_rows() {
    let mut state = loaded(many(25));
    assert_eq!(state.page_count(), 3);
    assert_eq!(state.visible().len(), 10);

    state.set_page(3);
    assert_eq!(state.visible().len(), 5);
    assert_eq!(state.visible()[0].policy_name, "policy-20");

    state.set_page(9);
    assert_eq!(state.current_page, 3);
}

#[test]
fn changing_page_size_returns_to_first_page() {
    let mut state = loaded(many(25));
    state.set_page(2);
    state.set_preferences(TablePreferences { page_size: 20, ..TablePreferences::default() });
    assert_eq!(state.current_page, 1);
    assert_eq!(state.page_count(), 2);
}

#[test]
fn filter_change_resets_page() {
    let mut state = loaded(many(25));
    state.set_page(3);
    state.set_filter("policy");
    assert_eq!(state.current_page, 1);
}

#[test]
fn sort_toggles_direction_on_same_column() {
    let mut state = loaded(vec![policy("1", "beta"), policy("2", "alpha"), policy("3", "gamma")]);
    state.toggle_sort(ColumnId::Name);
    let names: Vec<_> = state.sorted().iter().map(|p| p.policy_name.as_str()).collect();
    assert_eq!(names, ["alpha", "beta", "gamma"]);

    state.toggle_sort(ColumnId::Name);
    let names: Vec<_> = state.sorted().iter().map(|p| p.policy_name.as_str()).collect();
    assert_eq!(names, ["gamma", "beta", "alpha"]);
}

#[test]
fn sort_by_date_puts_missing_dates_first() {
    let mut old = policy("1", "old");
    old.last_modified = Some(Timestamp::from_millis(1_000.0));
    let mut new = policy("2", "new");
    new.last_modified = Some(Timestamp::from_millis(2_000.0));
    let undated = policy("3", "undated");

    let mut state = loaded(vec![new, undated, old]);
    state.toggle_sort(ColumnId::LastModified);
    let names: Vec<_> = state.sorted().iter().map(|p| p.policy_name.as_str()).collect();
    assert_eq!(names, ["undated", "old", "new"]);
}

#[test]
fn reload_clears_selection_keeps_filter_and_clamps_page() {
    let mut state = loaded(many(25));
    state.set_filter("policy");
    state.set_page(3);
    state.select("id-21");

    state.begin_refresh();
    assert!(state.loading);
    assert!(state.finish_refresh(Ok(many(5)), "t").is_none());

    assert!(!state.loading);
    assert_eq!(state.selected_id, None);
    assert_eq!(state.filter_text, "policy");
    assert_eq!(state.current_page, 1);
}

#[test]
fn failed_reload_keeps_items_and_notifies_only_on_rejection() {
    let mut state = loaded(vec![policy("1", "p1")]);

    state.begin_refresh();
    assert!(state.finish_refresh(Err(ApiError::Transport("offline".to_owned())), "t").is_none());
    assert!(!state.loading);
    assert_eq!(state.items.len(), 1);

    state.begin_refresh();
    let notice = state.finish_refresh(Err(rejected("bad request")), "t").unwrap();
    assert_eq!(notice.header, "Failed to load policies.");
    assert_eq!(state.items.len(), 1);
}

#[test]
fn actions_require_selection() {
    let mut state = loaded(vec![policy("1", "p1")]);
    assert_eq!(state.apply_action(RowAction::Delete), RowActionEffect::Ignored);
    assert!(state.delete_prompt.is_none());
    assert!(!RowAction::Edit.is_enabled(false));
    assert!(!RowAction::Attach.is_enabled(true));
}

#[test]
fn edit_action_navigates_with_policy_name_query() {
    let mut state = loaded(vec![policy("abc", "p1")]);
    state.select("abc");
    let RowActionEffect::Navigate(route) = state.apply_action(RowAction::Edit) else {
        panic!("expected navigation");
    };
    assert_eq!(route.href(), "/edit/abc?policy_name=p1");
}

#[test]
fn delete_action_opens_prompt_and_dismiss_closes_it() {
    let mut state = loaded(vec![policy("abc", "p1")]);
    state.select("abc");
    assert_eq!(state.apply_action(RowAction::Delete), RowActionEffect::ConfirmDelete);
    let prompt = state.delete_prompt.clone().unwrap();
    assert_eq!(prompt.title(), "Delete IAM-X policy");
    assert_eq!(prompt.body(), "Confirm the delete of policy: p1?");

    state.dismiss_delete();
    assert!(state.delete_prompt.is_none());
    assert!(state.confirm_delete().is_none());
}

#[test]
fn delete_then_refetch_shows_empty_state_and_one_success() {
    let api = FakeApi::with_lists(vec![Ok(vec![policy("abc", "p1")]), Ok(Vec::new())]);
    let mut state = PolicyListState::default();

    let first = block_on(api.list());
    assert!(state.finish_refresh(first, "t").is_none());
    assert_eq!(state.counter_text(), "(1)");

    state.select("abc");
    state.apply_action(RowAction::Delete);
    let prompt = state.confirm_delete().unwrap();
    assert!(state.delete_prompt.is_none());
    assert!(state.loading);

    let outcome = block_on(delete_and_refresh(&api, &prompt));
    let notices = state.finish_delete(outcome, "t");

    assert_eq!(api.calls(), ["list", "delete abc p1", "list"]);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].header, "Policy deleted.");
    assert_eq!(notices[0].content, "[t] [INFO] Policy p1 was deleted.");
    assert_eq!(state.counter_text(), "(0)");
    assert_eq!(state.empty_state(), Some(EmptyState::NoPolicies));
}

#[test]
fn failed_delete_skips_refetch() {
    let api = FakeApi::default();
    api.push_ack(Err(rejected("Policy is attached")));
    let mut state = loaded(vec![policy("abc", "p1")]);
    state.select("abc");
    state.apply_action(RowAction::Delete);
    let prompt = state.confirm_delete().unwrap();

    let outcome = block_on(delete_and_refresh(&api, &prompt));
    let notices = state.finish_delete(outcome, "t");

    assert_eq!(api.calls(), ["delete abc p1"]);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].header, "Failed to delete policy.");
    assert!(!state.loading);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn delete_with_failed_refetch_still_reports_success() {
    let api = FakeApi::with_lists(vec![Err(ApiError::Status { status: 502, message: None })]);
    let mut state = loaded(vec![policy("abc", "p1"), policy("def", "p2")]);
    state.select("abc");
    state.apply_action(RowAction::Delete);
    let prompt = state.confirm_delete().unwrap();

    let notices = state.finish_delete(block_on(delete_and_refresh(&api, &prompt)), "t");
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].header, "Policy deleted.");
    assert!(!state.loading);

    assert_eq!(state.selected(), None);
    assert_eq!(state.counter_text(), "(1)");
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "def");
    assert_eq!(state.apply_action(RowAction::Delete), RowActionEffect::Ignored);
}

#[test]
fn sort_labels_describe_current_state() {
    let sort = Some(SortState { column: ColumnId::Name, descending: false });
    assert_eq!(sort_label(ColumnId::Name, sort), "Policy Name, sorted ascending.");
    assert_eq!(sort_label(ColumnId::LastModified, sort), "Last modified, not sorted.");
    let desc = Some(SortState { column: ColumnId::CreationDate, descending: true });
    assert_eq!(sort_label(ColumnId::CreationDate, desc), "Creation date, sorted descending.");
    assert_eq!(page_label(3), "Go to page 3");
}
