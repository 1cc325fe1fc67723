use super::*;

fn note(header: &str) -> Notification {
    Notification::error(header, "boom", "2023-07-21T14:05:00.000Z")
}

#[test]
fn push_prepends_newest_first() {
    let mut queue = NotificationQueue::default();
    queue.push(note("first"));
    queue.push(note("second"));
    let headers: Vec<_> = queue.iter().map(|n| n.header.as_str()).collect();
    assert_eq!(headers, ["second", "first"]);
}

#[test]
fn dismiss_removes_exactly_one_and_keeps_order() {
    let mut queue = NotificationQueue::default();
    let a = note("a");
    let b = note("b");
    let c = note("c");
    let b_id = b.id.clone();
    queue.push(a);
    queue.push(b);
    queue.push(c);

    assert!(queue.dismiss(&b_id));
    let headers: Vec<_> = queue.iter().map(|n| n.header.as_str()).collect();
    assert_eq!(headers, ["c", "a"]);
}

#[test]
fn dismiss_unknown_id_is_a_noop() {
    let mut queue = NotificationQueue::default();
    queue.push(note("a"));
    assert!(!queue.dismiss("missing"));
    assert_eq!(queue.len(), 1);
}

#[test]
fn queue_does_not_deduplicate() {
    let mut queue = NotificationQueue::default();
    queue.push(note("same"));
    queue.push(note("same"));
    assert_eq!(queue.len(), 2);
}

#[test]
fn stamped_content_embeds_timestamp_level_and_message() {
    let n = Notification::error("Failed to create policy.", "Missing policy name", "2023-07-21T14:05:00.000Z");
    assert_eq!(n.kind, NotificationKind::Error);
    assert!(n.dismissible);
    assert_eq!(n.content, "[2023-07-21T14:05:00.000Z] [ERROR] Missing policy name");

    let ok = Notification::success("Policy deleted.", "p1", "t");
    assert_eq!(ok.content, "[t] [INFO] p1");
    assert_eq!(ok.kind.class_suffix(), "success");
}

#[test]
fn notification_ids_are_unique() {
    assert_ne!(note("a").id, note("a").id);
}

#[test]
fn notification_for_surfaces_only_rejections() {
    let rejected = ApiError::Rejected { message: "Invalid policy name".to_owned() };
    let n = notification_for(&rejected, "Failed to create policy.", "t").unwrap();
    assert_eq!(n.header, "Failed to create policy.");
    assert_eq!(n.content, "[t] [ERROR] Invalid policy name");

    assert!(notification_for(&ApiError::Status { status: 500, message: None }, "h", "t").is_none());
    assert!(notification_for(&ApiError::Transport("offline".to_owned()), "h", "t").is_none());
    assert!(notification_for(&ApiError::Unavailable, "h", "t").is_none());
}

#[test]
fn notification_for_agrees_with_surfaced_classification() {
    let errors = [
        ApiError::Rejected { message: "m".to_owned() },
        ApiError::Status { status: 502, message: Some("m".to_owned()) },
        ApiError::Transport("offline".to_owned()),
        ApiError::Decode("bad".to_owned()),
        ApiError::Unavailable,
    ];
    for err in errors {
        assert_eq!(notification_for(&err, "h", "t").is_some(), err.is_surfaced(), "{err:?}");
    }
}
