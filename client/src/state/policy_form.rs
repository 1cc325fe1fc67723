//! Create/edit/view form state.
//!
//! DESIGN
//! ======
//! One [`PolicyFormState`] backs all three form routes; [`FormMode`] decides
//! whether it submits a create, an update, or nothing at all. A submit is
//! refused while another one is in flight.
//!
//! ERROR HANDLING
//! ==============
//! Create rejections and load rejections become error notifications. Update
//! failures are logged only and leave the user on the form.

#[cfg(test)]
#[path = "policy_form_test.rs"]
mod policy_form_test;

use policies::{Ack, ApiError, CreatePolicy, DocumentError, Policy, PolicyApi, PolicyKey, UpdatePolicy, check_document};

use crate::state::notifications::{Notification, notification_for};
use crate::util::routes::{AppRoute, FormMode};

/// Editable fields of a policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicyDraft {
    pub name: String,
    pub description: String,
    pub document: String,
}

impl PolicyDraft {
    /// Prefill from a fetched policy; the document is pretty-printed.
    pub fn from_policy(policy: &Policy) -> Self {
        Self {
            name: policy.policy_name.clone(),
            description: policy.description().to_owned(),
            document: policy.document_text(),
        }
    }

    pub fn to_create(&self) -> CreatePolicy {
        CreatePolicy {
            policy_name: self.name.clone(),
            policy_description: self.description.clone(),
            policy_document: self.document.clone(),
        }
    }

    pub fn to_update(&self, id: &str) -> UpdatePolicy {
        UpdatePolicy {
            id: id.to_owned(),
            policy_name: self.name.clone(),
            policy_description: self.description.clone(),
            policy_document: self.document.clone(),
        }
    }

    pub fn document_status(&self) -> DocumentStatus {
        if self.document.trim().is_empty() {
            return DocumentStatus::Empty;
        }
        match check_document(&self.document) {
            Ok(_) => DocumentStatus::Valid,
            Err(err) => DocumentStatus::Invalid(err),
        }
    }
}

/// Syntax state of the document editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentStatus {
    Empty,
    Valid,
    Invalid(DocumentError),
}

impl DocumentStatus {
    /// Status line under the editor.
    pub fn label(&self) -> String {
        match self {
            Self::Empty => "Empty document".to_owned(),
            Self::Valid => "Valid JSON".to_owned(),
            Self::Invalid(err) => format!("Ln {}, Col {}: {}", err.line, err.column, err.reason),
        }
    }
}

/// A request ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(CreatePolicy),
    Update(UpdatePolicy),
}

/// Result of pressing submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitStart {
    Send(SubmitRequest),
    /// Rejected locally; nothing was sent.
    Blocked(Notification),
    /// Read-only, already submitting, or nothing to address.
    Ignored,
}

/// What the page does after a submit returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; return to the list.
    Saved(AppRoute),
    /// Stay on the form and show this.
    Notify(Notification),
    /// Stay on the form; the failure is only logged.
    Logged(ApiError),
}

/// Form page state.
#[derive(Clone, Debug, Default)]
pub struct PolicyFormState {
    pub mode: FormMode,
    /// The policy being edited or viewed.
    pub key: Option<PolicyKey>,
    pub draft: PolicyDraft,
    pub loading: bool,
    /// The policy could not be fetched; the draft is only a placeholder.
    pub load_failed: bool,
    pub submitting: bool,
}

impl PolicyFormState {
    /// Blank create form.
    pub fn for_create() -> Self {
        Self::default()
    }

    /// Edit or view form waiting for its policy to load.
    pub fn for_existing(mode: FormMode, key: PolicyKey) -> Self {
        Self {
            mode,
            draft: PolicyDraft { name: key.policy_name.clone(), ..PolicyDraft::default() },
            key: Some(key),
            loading: true,
            load_failed: false,
            submitting: false,
        }
    }

    /// Inputs and submit are disabled.
    pub fn is_locked(&self) -> bool {
        self.mode.is_read_only() || self.loading || self.load_failed
    }

    /// `None` in view mode, which has no submit button.
    pub fn submit_label(&self) -> Option<&'static str> {
        (!self.mode.is_read_only()).then_some("Submit")
    }

    fn failure_header(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Failed to create policy.",
            FormMode::Edit | FormMode::View => "Failed to edit policy.",
        }
    }

    /// Apply the fetched policy for edit and view.
    pub fn finish_load(&mut self, result: Result<Policy, ApiError>, timestamp: &str) -> Option<Notification> {
        self.loading = false;
        match result {
            Ok(policy) => {
                self.draft = PolicyDraft::from_policy(&policy);
                self.load_failed = false;
                None
            }
            Err(err) => {
                self.load_failed = true;
                notification_for(&err, self.failure_header(), timestamp)
            }
        }
    }

    /// Validate and mark the form as submitting.
    pub fn begin_submit(&mut self, timestamp: &str) -> SubmitStart {
        if self.is_locked() || self.submitting {
            return SubmitStart::Ignored;
        }
        if let Err(err) = check_document(&self.draft.document) {
            return SubmitStart::Blocked(Notification::error(self.failure_header(), &err.to_string(), timestamp));
        }
        let request = match (self.mode, &self.key) {
            (FormMode::Create, _) => SubmitRequest::Create(self.draft.to_create()),
            (FormMode::Edit, Some(key)) => SubmitRequest::Update(self.draft.to_update(&key.id)),
            _ => return SubmitStart::Ignored,
        };
        self.submitting = true;
        SubmitStart::Send(request)
    }

    /// Apply the backend answer to a submit.
    pub fn finish_submit(&mut self, result: Result<Ack, ApiError>, timestamp: &str) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(_) => SubmitOutcome::Saved(AppRoute::List),
            Err(err) if self.mode == FormMode::Create => match notification_for(&err, self.failure_header(), timestamp) {
                Some(notice) => SubmitOutcome::Notify(notice),
                None => SubmitOutcome::Logged(err),
            },
            Err(err) => SubmitOutcome::Logged(err),
        }
    }
}

/// Send a prepared submit.
pub async fn send_submit<A: PolicyApi>(api: &A, request: &SubmitRequest) -> Result<Ack, ApiError> {
    match request {
        SubmitRequest::Create(body) => api.create(body).await,
        SubmitRequest::Update(body) => api.update(body).await,
    }
}
