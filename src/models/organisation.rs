use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::validation::organisation::is_abn;

/// Represents an organisation registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    /// The unique identifier for the organisation.
    pub id: String,
    /// Whether the organisation is active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// The organisation's Australian Business Number.
    pub abn: String,
    /// The organisation's name.
    pub name: String,
    /// The organisation's contact email address.
    pub email: String,
}

fn default_active() -> bool {
    true
}

/// The request payload for creating an organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrganisationCreate {
    #[garde(length(min = 1, max = 200))]
    pub name: String,
    #[garde(custom(abn_format))]
    pub abn: String,
    #[garde(email)]
    pub email: String,
}

/// The request payload for editing an organisation. Only the email can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct OrganisationUpdate {
    #[garde(email)]
    pub email: String,
}

fn abn_format(value: &String, _context: &()) -> garde::Result {
    if is_abn(value) {
        Ok(())
    } else {
        Err(garde::Error::new("ABN is not in a valid format"))
    }
}
