use serde::{Deserialize, Serialize};

/// The group a user belongs to. The first group of a user is their primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserGroup {
    DataCustodians,
    DataRequestors,
    Administrators,
}

impl UserGroup {
    /// The wire name of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserGroup::DataCustodians => "DataCustodians",
            UserGroup::DataRequestors => "DataRequestors",
            UserGroup::Administrators => "Administrators",
        }
    }
}

/// Identity of the logged-in user as returned by `/auth/whoami`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmI {
    /// The unique identifier for the user.
    pub id: String,
    /// The user's email address.
    pub email: String,
    pub given_name: String,
    pub family_name: String,
    /// The user's groups, primary group first.
    pub groups: Vec<UserGroup>,
    /// The organisation the user belongs to.
    pub organisation_id: String,
}
