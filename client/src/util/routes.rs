//! Typed route table for the console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages navigate by building an [`AppRoute`] instead of formatting paths by
//! hand, so the list links, the edit action and the router agree on the
//! `/edit/{id}?policy_name={name}` shape.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use policies::PolicyKey;

/// Every navigable screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    /// `/`
    List,
    /// `/create`
    Create,
    /// `/edit/{id}?policy_name={name}`
    Edit(PolicyKey),
    /// `/view/{id}?policy_name={name}`
    View(PolicyKey),
}

impl AppRoute {
    /// Path (plus query) for links and `navigate`.
    ///
    /// Ids are backend UUIDs and names are restricted by the backend to
    /// `[a-zA-Z0-9_-]`, so neither needs escaping.
    pub fn href(&self) -> String {
        match self {
            Self::List => "/".to_owned(),
            Self::Create => "/create".to_owned(),
            Self::Edit(key) => format!("/edit/{}?policy_name={}", key.id, key.policy_name),
            Self::View(key) => format!("/view/{}?policy_name={}", key.id, key.policy_name),
        }
    }

    /// Rebuild a route from a path and the `policy_name` query value.
    pub fn parse(path: &str, policy_name: Option<&str>) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => return Some(Self::List),
            "/create" => return Some(Self::Create),
            _ => {}
        }
        let key = |id: &str| PolicyKey::new(id, policy_name.unwrap_or_default());
        if let Some(id) = trimmed.strip_prefix("/edit/").filter(|id| !id.is_empty() && !id.contains('/')) {
            return Some(Self::Edit(key(id)));
        }
        if let Some(id) = trimmed.strip_prefix("/view/").filter(|id| !id.is_empty() && !id.contains('/')) {
            return Some(Self::View(key(id)));
        }
        None
    }
}

/// How a policy form behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
    /// Same screen as edit, with inputs disabled and no submit.
    View,
}

impl FormMode {
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::View)
    }

    /// Description shown under the document editor label.
    pub fn document_hint(self) -> &'static str {
        match self {
            Self::Create => "Create a policy for your S3 Object lambda.",
            Self::Edit => "Update policy for your S3 Object lambda.",
            Self::View => "Policy for your S3 Object lambda.",
        }
    }
}

/// A side-navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub text: &'static str,
    pub href: &'static str,
    pub external: bool,
}

/// Header link of the side navigation.
pub const SIDE_NAV_HEADER: NavLink = NavLink { text: "Custom Policies", href: "/", external: false };

/// Side navigation entries; `None` renders a divider.
pub const SIDE_NAV_ITEMS: &[Option<NavLink>] = &[
    Some(NavLink { text: "Policies", href: "/", external: false }),
    None,
    Some(NavLink { text: "AWS Workshops", href: "https://workshops.aws", external: true }),
];

/// Whether `link` is the active entry for the current `pathname`.
///
/// Form routes belong to the policy list, so "Policies" stays highlighted
/// while creating or editing.
pub fn is_active(link: &NavLink, pathname: &str) -> bool {
    if link.external {
        return false;
    }
    match AppRoute::parse(pathname, None) {
        Some(_) => link.href == "/",
        None => link.href == pathname,
    }
}
