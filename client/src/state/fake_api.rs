//! Scripted [`PolicyApi`] used by state tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use policies::{Ack, ApiError, CreatePolicy, Policy, PolicyApi, PolicyKey, UpdatePolicy};
use serde_json::Value;

#[derive(Default)]
pub struct FakeApi {
    pub lists: RefCell<VecDeque<Result<Vec<Policy>, ApiError>>>,
    pub gets: RefCell<VecDeque<Result<Policy, ApiError>>>,
    pub acks: RefCell<VecDeque<Result<Ack, ApiError>>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_lists(lists: Vec<Result<Vec<Policy>, ApiError>>) -> Self {
        Self { lists: RefCell::new(lists.into()), ..Self::default() }
    }

    pub fn push_ack(&self, ack: Result<Ack, ApiError>) {
        self.acks.borrow_mut().push_back(ack);
    }

    pub fn push_get(&self, policy: Result<Policy, ApiError>) {
        self.gets.borrow_mut().push_back(policy);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn next_ack(&self) -> Result<Ack, ApiError> {
        self.acks.borrow_mut().pop_front().unwrap_or_else(|| Ok(ok_ack()))
    }
}

pub fn ok_ack() -> Ack {
    Ack { message: Value::Null, request_id: Some("req-1".to_owned()) }
}

pub fn rejected(message: &str) -> ApiError {
    ApiError::Rejected { message: message.to_owned() }
}

pub fn policy(id: &str, name: &str) -> Policy {
    Policy {
        id: id.to_owned(),
        policy_name: name.to_owned(),
        policy_description: Some(format!("{name} description")),
        policy_document: None,
        creation_date: None,
        last_modified: None,
    }
}

impl PolicyApi for FakeApi {
    async fn list(&self) -> Result<Vec<Policy>, ApiError> {
        self.calls.borrow_mut().push("list".to_owned());
        self.lists.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get(&self, key: &PolicyKey) -> Result<Policy, ApiError> {
        self.calls.borrow_mut().push(format!("get {} {}", key.id, key.policy_name));
        self.gets.borrow_mut().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }

    async fn create(&self, request: &CreatePolicy) -> Result<Ack, ApiError> {
        self.calls.borrow_mut().push(format!("create {}", request.policy_name));
        self.next_ack()
    }

    async fn update(&self, request: &UpdatePolicy) -> Result<Ack, ApiError> {
        self.calls.borrow_mut().push(format!("update {} {}", request.id, request.policy_name));
        self.next_ack()
    }

    async fn delete(&self, key: &PolicyKey) -> Result<Ack, ApiError> {
        self.calls.borrow_mut().push(format!("delete {} {}", key.id, key.policy_name));
        self.next_ack()
    }
}
