use serde::{Deserialize, Serialize};

/// Identity of the connecting session: which user in which organization.
///
/// Owned by the parent application and passed through unchanged. Both
/// backend endpoints receive it as the `user_id` / `org_id` form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: String,
    pub org_id: String,
}

impl SessionIdentity {
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// Form fields for the backend endpoints.
    pub(crate) fn form_fields(&self) -> [(&'static str, &str); 2] {
        [("user_id", &self.user_id), ("org_id", &self.org_id)]
    }
}
