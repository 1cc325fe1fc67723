//! Policy-list state: filtering, sorting, pagination, selection and the
//! delete confirmation flow.
//!
//! DESIGN
//! ======
//! The list page keeps one [`PolicyListState`] in an `RwSignal`. Every derived
//! view (visible rows, counter, match text, empty state) is computed from the
//! full item set on demand so a reload can never leave stale derived data.
//!
//! A reload replaces the whole item set, clears the selection and keeps the
//! filter. The current page is clamped to the new page count.
//!
//! ERROR HANDLING
//! ==============
//! Only backend rejections (HTTP 400) produce notifications. Every other
//! failure clears the loading flag and keeps whatever items were already
//! shown.

#[cfg(test)]
#[path = "policy_list_test.rs"]
mod policy_list_test;

use std::cmp::Ordering;

use policies::{ApiError, Policy, PolicyApi, PolicyKey, Timestamp, format_timestamp};

use crate::state::notifications::{Notification, notification_for};
use crate::util::routes::AppRoute;

/// Page sizes offered by the preferences dialog.
pub const PAGE_SIZE_OPTIONS: [usize; 2] = [10, 20];

/// Table columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Name,
    Description,
    CreationDate,
    LastModified,
}

impl ColumnId {
    pub const ALL: [Self; 4] = [Self::Name, Self::Description, Self::CreationDate, Self::LastModified];

    pub fn header(self) -> &'static str {
        match self {
            Self::Name => "Policy Name",
            Self::Description => "Description",
            Self::CreationDate => "Creation date",
            Self::LastModified => "Last modified",
        }
    }

    /// The name column identifies the row and cannot be hidden.
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Name)
    }

    /// Cell text for `policy`.
    pub fn cell(self, policy: &Policy) -> String {
        match self {
            Self::Name => policy.policy_name.clone(),
            Self::Description => policy.description().to_owned(),
            Self::CreationDate => format_timestamp(policy.creation_date),
            Self::LastModified => format_timestamp(policy.last_modified),
        }
    }

    fn compare(self, a: &Policy, b: &Policy) -> Ordering {
        match self {
            Self::Name => a.policy_name.cmp(&b.policy_name),
            Self::Description => a.description().cmp(b.description()),
            Self::CreationDate => compare_millis(a.creation_date, b.creation_date),
            Self::LastModified => compare_millis(a.last_modified, b.last_modified),
        }
    }
}

fn compare_millis(a: Option<Timestamp>, b: Option<Timestamp>) -> Ordering {
    let a = a.map(Timestamp::millis);
    let b = b.map(Timestamp::millis);
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

/// Page size and visible columns chosen in the preferences dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TablePreferences {
    pub page_size: usize,
    pub visible_columns: Vec<ColumnId>,
}

impl Default for TablePreferences {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE_OPTIONS[0],
            visible_columns: vec![ColumnId::Name, ColumnId::Description, ColumnId::LastModified],
        }
    }
}

impl TablePreferences {
    /// Normalize user input: unknown page sizes fall back to the default and
    /// the locked name column is always kept, in column order.
    pub fn normalized(mut self) -> Self {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            self.page_size = PAGE_SIZE_OPTIONS[0];
        }
        let chosen = self.visible_columns;
        self.visible_columns = ColumnId::ALL
            .into_iter()
            .filter(|column| column.is_locked() || chosen.contains(column))
            .collect();
        self
    }

    pub fn is_visible(&self, column: ColumnId) -> bool {
        self.visible_columns.contains(&column)
    }
}

/// Active sort column and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnId,
    pub descending: bool,
}

/// Accessible header label, e.g. `Policy Name, sorted ascending.`
pub fn sort_label(column: ColumnId, sort: Option<SortState>) -> String {
    let state = match sort {
        Some(SortState { column: active, descending }) if active == column => {
            if descending { "sorted descending" } else { "sorted ascending" }
        }
        _ => "not sorted",
    };
    format!("{}, {state}.", column.header())
}

/// Accessible label of a numbered pagination button.
pub fn page_label(page: usize) -> String {
    format!("Go to page {page}")
}

/// What to show when the table has no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    /// The backend returned no policies.
    NoPolicies,
    /// Policies exist but none match the filter.
    NoMatches,
}

impl EmptyState {
    pub fn title(self) -> &'static str {
        match self {
            Self::NoPolicies => "No policies",
            Self::NoMatches => "No matches",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::NoPolicies => "No policies to display.",
            Self::NoMatches => "We can't find a match.",
        }
    }

    pub fn action_label(self) -> &'static str {
        match self {
            Self::NoPolicies => "Create policy",
            Self::NoMatches => "Clear filter",
        }
    }
}

/// Actions in the header dropdown that apply to the selected row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Delete,
    Edit,
    /// Shown but never enabled.
    Attach,
}

impl RowAction {
    pub const ALL: [Self; 3] = [Self::Delete, Self::Edit, Self::Attach];

    pub fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Edit => "Edit",
            Self::Attach => "Attach",
        }
    }

    pub fn is_enabled(self, has_selection: bool) -> bool {
        match self {
            Self::Delete | Self::Edit => has_selection,
            Self::Attach => false,
        }
    }
}

/// Result of choosing a [`RowAction`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowActionEffect {
    /// The delete confirmation modal opened.
    ConfirmDelete,
    /// Go to another route.
    Navigate(AppRoute),
    /// Nothing to do.
    Ignored,
}

/// Open delete confirmation for one policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletePrompt {
    pub key: PolicyKey,
}

impl DeletePrompt {
    pub fn title(&self) -> &'static str {
        "Delete IAM-X policy"
    }

    pub fn body(&self) -> String {
        format!("Confirm the delete of policy: {}?", self.key.policy_name)
    }
}

/// Outcome of a delete followed by a refetch.
#[derive(Clone, Debug)]
pub enum DeleteOutcome {
    /// The delete succeeded; `refreshed` is the follow-up list call.
    Deleted { key: PolicyKey, refreshed: Result<Vec<Policy>, ApiError> },
    /// The delete failed and nothing was refetched.
    Failed(ApiError),
}

/// List page state.
#[derive(Clone, Debug)]
pub struct PolicyListState {
    pub items: Vec<Policy>,
    pub loading: bool,
    pub filter_text: String,
    pub selected_id: Option<String>,
    pub sort: Option<SortState>,
    /// 1-based.
    pub current_page: usize,
    pub preferences: TablePreferences,
    pub delete_prompt: Option<DeletePrompt>,
}

impl Default for PolicyListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            filter_text: String::new(),
            selected_id: None,
            sort: None,
            current_page: 1,
            preferences: TablePreferences::default(),
            delete_prompt: None,
        }
    }
}

impl PolicyListState {
    /// Mark a reload as in flight.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Apply the result of a list call.
    ///
    /// Returns a notification when the failure is one the user should see.
    pub fn finish_refresh(&mut self, result: Result<Vec<Policy>, ApiError>, timestamp: &str) -> Option<Notification> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.selected_id = None;
                self.current_page = self.current_page.clamp(1, self.page_count());
                None
            }
            Err(err) => notification_for(&err, "Failed to load policies.", timestamp),
        }
    }

    pub fn set_filter(&mut self, text: &str) {
        text.clone_into(&mut self.filter_text);
        self.current_page = 1;
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    /// Items matching the filter, case-insensitively, across displayed fields.
    pub fn filtered(&self) -> Vec<&Policy> {
        let needle = self.filter_text.trim().to_lowercase();
        self.items
            .iter()
            .filter(|policy| {
                needle.is_empty()
                    || ColumnId::ALL
                        .into_iter()
                        .any(|column| column.cell(policy).to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Filtered items in sort order.
    pub fn sorted(&self) -> Vec<&Policy> {
        let mut rows = self.filtered();
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ord = sort.column.compare(a, b);
                if sort.descending { ord.reverse() } else { ord }
            });
        }
        rows
    }

    /// Rows on the current page.
    pub fn visible(&self) -> Vec<&Policy> {
        let size = self.preferences.page_size.max(1);
        let start = (self.current_page.max(1) - 1) * size;
        self.sorted().into_iter().skip(start).take(size).collect()
    }

    /// Number of pages for the filtered rows; at least 1.
    pub fn page_count(&self) -> usize {
        let size = self.preferences.page_size.max(1);
        self.filtered().len().div_ceil(size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count());
    }

    /// `1 match` or `N matches`; `None` while no filter is applied.
    pub fn match_count_text(&self) -> Option<String> {
        if self.filter_text.trim().is_empty() {
            return None;
        }
        let count = self.filtered().len();
        Some(if count == 1 { "1 match".to_owned() } else { format!("{count} matches") })
    }

    /// Header counter: `(total)` or `(selected/total)`.
    pub fn counter_text(&self) -> String {
        let total = self.items.len();
        if self.selected().is_some() { format!("(1/{total})") } else { format!("({total})") }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.loading || !self.filtered().is_empty() {
            return None;
        }
        Some(if self.items.is_empty() { EmptyState::NoPolicies } else { EmptyState::NoMatches })
    }

    /// Single selection; selecting the selected row again keeps it.
    pub fn select(&mut self, id: &str) {
        if self.items.iter().any(|policy| policy.id == id) {
            self.selected_id = Some(id.to_owned());
        }
    }

    pub fn selected(&self) -> Option<&Policy> {
        let id = self.selected_id.as_deref()?;
        self.items.iter().find(|policy| policy.id == id)
    }

    /// Clicking a column header: ascending first, then toggle direction.
    pub fn toggle_sort(&mut self, column: ColumnId) {
        self.sort = Some(match self.sort {
            Some(sort) if sort.column == column => SortState { column, descending: !sort.descending },
            _ => SortState { column, descending: false },
        });
    }

    pub fn set_preferences(&mut self, preferences: TablePreferences) {
        let preferences = preferences.normalized();
        if preferences.page_size != self.preferences.page_size {
            self.current_page = 1;
        }
        self.preferences = preferences;
    }

    /// Resolve a header action against the current selection.
    pub fn apply_action(&mut self, action: RowAction) -> RowActionEffect {
        let Some(key) = self.selected().map(Policy::key) else {
            return RowActionEffect::Ignored;
        };
        match action {
            RowAction::Delete => {
                self.delete_prompt = Some(DeletePrompt { key });
                RowActionEffect::ConfirmDelete
            }
            RowAction::Edit => RowActionEffect::Navigate(AppRoute::Edit(key)),
            RowAction::Attach => RowActionEffect::Ignored,
        }
    }

    pub fn dismiss_delete(&mut self) {
        self.delete_prompt = None;
    }

    /// Close the modal and hand back the confirmed prompt.
    pub fn confirm_delete(&mut self) -> Option<DeletePrompt> {
        let prompt = self.delete_prompt.take()?;
        self.loading = true;
        Some(prompt)
    }

    /// Apply a finished delete. Returns the notifications to push, in order.
    pub fn finish_delete(&mut self, outcome: DeleteOutcome, timestamp: &str) -> Vec<Notification> {
        match outcome {
            DeleteOutcome::Deleted { key, refreshed } => {
                self.items.retain(|p| p.id != key.id);
                self.selected_id = None;
                self.current_page = self.current_page.clamp(1, self.page_count());
                let mut notices = Vec::with_capacity(2);
                notices.push(Notification::success(
                    "Policy deleted.",
                    &format!("Policy {} was deleted.", key.policy_name),
                    timestamp,
                ));
                notices.extend(self.finish_refresh(refreshed, timestamp));
                notices
            }
            DeleteOutcome::Failed(err) => {
                self.loading = false;
                notification_for(&err, "Failed to delete policy.", timestamp).into_iter().collect()
            }
        }
    }
}

/// Delete one policy and refetch the list on success.
pub async fn delete_and_refresh<A: PolicyApi>(api: &A, prompt: &DeletePrompt) -> DeleteOutcome {
    match api.delete(&prompt.key).await {
        Ok(_) => DeleteOutcome::Deleted { key: prompt.key.clone(), refreshed: api.list().await },
        Err(err) => DeleteOutcome::Failed(err),
    }
}
