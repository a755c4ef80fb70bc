use chrono::{DateTime, NaiveDateTime};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::models::organisation::OrganisationCreate;
use crate::models::user::UserGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    New,
    /// The backend reports accepted registrations as `Approved`.
    #[serde(rename = "Approved", alias = "Accepted")]
    Accepted,
    Declined,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::New => "New",
            RegistrationStatus::Accepted => "Approved",
            RegistrationStatus::Declined => "Declined",
        }
    }
}

/// Either the id of an organisation that already exists or the details of a
/// new one to create alongside the registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrationOrganisation {
    Existing(String),
    New(OrganisationCreate),
}

/// A request to join the platform, as reviewed by administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    pub group: UserGroup,
    pub organisation: RegistrationOrganisation,
    #[serde(default)]
    pub agreements: Vec<String>,
    pub status: RegistrationStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub organisation_override: Option<String>,
    #[serde(default)]
    pub actioned_by: Option<String>,
    pub created_at: String,
}

fn default_active() -> bool {
    true
}

impl Registration {
    /// The submission date as `dd/mm/yyyy`, or the raw value when it does
    /// not parse as an ISO timestamp.
    pub fn created_at_display(&self) -> String {
        if let Ok(at) = DateTime::parse_from_rfc3339(&self.created_at) {
            return at.format("%d/%m/%Y").to_string();
        }
        match NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(at) => at.format("%d/%m/%Y").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// The request payload for `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct RegistrationCreate {
    #[garde(email)]
    pub username: String,
    #[garde(length(min = 1))]
    pub given_name: String,
    #[garde(length(min = 1))]
    pub family_name: String,
    #[garde(skip)]
    pub group: UserGroup,
    #[garde(skip)]
    pub organisation: RegistrationOrganisation,
    #[garde(skip)]
    pub agreements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_status_decodes_as_accepted() {
        let status: RegistrationStatus = sonic_rs::from_str(r#""Approved""#).unwrap();
        assert_eq!(status, RegistrationStatus::Accepted);
        let status: RegistrationStatus = sonic_rs::from_str(r#""Accepted""#).unwrap();
        assert_eq!(status, RegistrationStatus::Accepted);
    }

    #[test]
    fn organisation_is_either_an_id_or_new_details() {
        let existing: RegistrationOrganisation = sonic_rs::from_str(r#""org-1""#).unwrap();
        assert_eq!(existing, RegistrationOrganisation::Existing("org-1".into()));

        let created: RegistrationOrganisation = sonic_rs::from_str(
            r#"{"name":"Org","abn":"51824753556","email":"org@example.com"}"#,
        )
        .unwrap();
        assert!(matches!(created, RegistrationOrganisation::New(_)));
    }

    #[test]
    fn created_at_renders_as_australian_date() {
        let registration: Registration = sonic_rs::from_str(
            r#"{"id":"r1","username":"a@b.com","given_name":"A","family_name":"B",
                "group":"DataRequestors","organisation":"org-1","status":"New",
                "created_at":"2023-03-07T04:05:06.123456"}"#,
        )
        .unwrap();
        assert_eq!(registration.created_at_display(), "07/03/2023");
        assert!(registration.active);
    }
}
