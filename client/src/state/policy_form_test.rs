use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::state::fake_api::{FakeApi, ok_ack, policy, rejected};

fn filled_create() -> PolicyFormState {
    let mut form = PolicyFormState::for_create();
    form.draft = PolicyDraft {
        name: "p1".to_owned(),
        description: "read only".to_owned(),
        document: r#"{"Version": "2012-10-17"}"#.to_owned(),
    };
    form
}

fn loaded_edit() -> PolicyFormState {
    let mut form = PolicyFormState::for_existing(FormMode::Edit, PolicyKey::new("abc", "p1"));
    let mut existing = policy("abc", "p1");
    existing.policy_document = Some(json!({"Version": "2012-10-17", "Statement": []}));
    assert!(form.finish_load(Ok(existing), "t").is_none());
    form
}

#[test]
fn existing_form_starts_loading_with_name_from_route() {
    let form = PolicyFormState::for_existing(FormMode::View, PolicyKey::new("abc", "p1"));
    assert!(form.loading);
    assert_eq!(form.draft.name, "p1");
    assert_eq!(form.submit_label(), None);
    assert_eq!(PolicyFormState::for_create().submit_label(), Some("Submit"));
}

#[test]
fn load_prefills_pretty_document_and_empty_description() {
    let mut form = PolicyFormState::for_existing(FormMode::Edit, PolicyKey::new("abc", "p1"));
    let mut existing = policy("abc", "p1");
    existing.policy_description = None;
    existing.policy_document = Some(json!({"Version": "2012-10-17"}));

    assert!(form.finish_load(Ok(existing), "t").is_none());
    assert!(!form.loading);
    assert_eq!(form.draft.description, "");
    assert_eq!(form.draft.document, "{\n    \"Version\": \"2012-10-17\"\n}");
}

#[test]
fn load_rejection_notifies_with_edit_header() {
    let mut form = PolicyFormState::for_existing(FormMode::Edit, PolicyKey::new("abc", "p1"));
    let notice = form.finish_load(Err(rejected("Policy not found")), "t").unwrap();
    assert_eq!(notice.header, "Failed to edit policy.");
    assert_eq!(notice.content, "[t] [ERROR] Policy not found");
    assert!(!form.loading);

    let mut other = PolicyFormState::for_existing(FormMode::Edit, PolicyKey::new("abc", "p1"));
    assert!(other.finish_load(Err(ApiError::Status { status: 500, message: None }), "t").is_none());
}

#[test]
fn document_status_reports_position_of_syntax_errors() {
    let mut draft = PolicyDraft::default();
    assert_eq!(draft.document_status(), DocumentStatus::Empty);

    draft.document = "{}".to_owned();
    assert_eq!(draft.document_status().label(), "Valid JSON");

    draft.document = "{\n  \"a\": ,\n}".to_owned();
    let DocumentStatus::Invalid(err) = draft.document_status() else {
        panic!("expected invalid document");
    };
    assert_eq!(err.line, 2);
    assert!(draft.document_status().label().starts_with("Ln 2, Col "));
}

#[test]
fn create_submit_sends_raw_document_text() {
    let mut form = filled_create();
    let SubmitStart::Send(request) = form.begin_submit("t") else {
        panic!("expected a request");
    };
    assert!(form.submitting);
    assert_eq!(
        request,
        SubmitRequest::Create(CreatePolicy {
            policy_name: "p1".to_owned(),
            policy_description: "read only".to_owned(),
            policy_document: r#"{"Version": "2012-10-17"}"#.to_owned(),
        })
    );
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut form = filled_create();
    assert!(matches!(form.begin_submit("t"), SubmitStart::Send(_)));
    assert_eq!(form.begin_submit("t"), SubmitStart::Ignored);
}

#[test]
fn invalid_document_blocks_submit_with_notification() {
    let mut form = filled_create();
    form.draft.document = "{ not json".to_owned();
    let SubmitStart::Blocked(notice) = form.begin_submit("t") else {
        panic!("expected a local rejection");
    };
    assert_eq!(notice.header, "Failed to create policy.");
    assert!(notice.content.contains("Policy document is not valid JSON"));
    assert!(!form.submitting);
}

#[test]
fn view_mode_never_submits() {
    let mut form = PolicyFormState::for_existing(FormMode::View, PolicyKey::new("abc", "p1"));
    form.loading = false;
    assert_eq!(form.begin_submit("t"), SubmitStart::Ignored);
}

#[test]
fn create_success_returns_to_list() {
    let api = FakeApi::default();
    let mut form = filled_create();
    let SubmitStart::Send(request) = form.begin_submit("t") else {
        panic!("expected a request");
    };
    let outcome = form.finish_submit(block_on(send_submit(&api, &request)), "t");
    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::List));
    assert_eq!(api.calls(), ["create p1"]);
    assert!(!form.submitting);
}

#[test]
fn create_rejection_stays_on_form_with_notification() {
    let api = FakeApi::default();
    api.push_ack(Err(rejected("Policy name already exists")));
    let mut form = filled_create();
    let SubmitStart::Send(request) = form.begin_submit("2023-07-21T14:05:00.000Z") else {
        panic!("expected a request");
    };
    let outcome = form.finish_submit(block_on(send_submit(&api, &request)), "2023-07-21T14:05:00.000Z");
    let SubmitOutcome::Notify(notice) = outcome else {
        panic!("expected a notification");
    };
    assert_eq!(notice.header, "Failed to create policy.");
    assert_eq!(notice.content, "[2023-07-21T14:05:00.000Z] [ERROR] Policy name already exists");
    assert!(!form.submitting);
    assert_eq!(form.draft.name, "p1");
}

#[test]
fn create_transport_failure_is_logged_only() {
    let mut form = filled_create();
    form.begin_submit("t");
    let outcome = form.finish_submit(Err(ApiError::Transport("offline".to_owned())), "t");
    assert_eq!(outcome, SubmitOutcome::Logged(ApiError::Transport("offline".to_owned())));
}

#[test]
fn update_sends_id_from_route() {
    let api = FakeApi::default();
    let mut form = loaded_edit();
    form.draft.description = "changed".to_owned();
    let SubmitStart::Send(request) = form.begin_submit("t") else {
        panic!("expected a request");
    };
    let SubmitRequest::Update(body) = &request else {
        panic!("expected an update");
    };
    assert_eq!(body.id, "abc");
    assert_eq!(body.policy_description, "changed");

    let outcome = form.finish_submit(block_on(send_submit(&api, &request)), "t");
    assert_eq!(outcome, SubmitOutcome::Saved(AppRoute::List));
    assert_eq!(api.calls(), ["update abc p1"]);
}

#[test]
fn update_rejection_is_logged_without_notification() {
    let mut form = loaded_edit();
    form.begin_submit("t");
    let outcome = form.finish_submit(Err(rejected("Invalid document")), "t");
    assert_eq!(outcome, SubmitOutcome::Logged(rejected("Invalid document")));
    assert!(!form.submitting);
}

#[test]
fn ack_payload_is_ignored_on_success() {
    let mut form = loaded_edit();
    form.begin_submit("t");
    assert_eq!(form.finish_submit(Ok(ok_ack()), "t"), SubmitOutcome::Saved(AppRoute::List));
}

#[test]
fn empty_document_blocks_submit() {
    let mut form = PolicyFormState::for_create();
    form.draft.name = "p1".to_owned();
    form.draft.document = "   \n".to_owned();

    let SubmitStart::Blocked(notice) = form.begin_submit("t") else {
        panic!("expected a local rejection");
    };
    assert_eq!(notice.header, "Failed to create policy.");
    assert!(notice.content.contains("Policy document is not valid JSON"));
    assert!(!form.submitting);
}

#[test]
fn failed_load_keeps_edit_form_locked() {
    let mut form = PolicyFormState::for_existing(FormMode::Edit, PolicyKey::new("abc", "p1"));
    assert!(form.finish_load(Err(ApiError::Status { status: 500, message: None }), "t").is_none());

    assert!(!form.loading);
    assert!(form.load_failed);
    assert!(form.is_locked());
    form.draft.document = "{}".to_owned();
    assert_eq!(form.begin_submit("t"), SubmitStart::Ignored);
    assert!(!form.submitting);
}

#[test]
fn loaded_edit_form_is_unlocked() {
    let form = loaded_edit();
    assert!(!form.is_locked());
    assert!(PolicyFormState::for_existing(FormMode::View, PolicyKey::new("abc", "p1")).is_locked());
}
