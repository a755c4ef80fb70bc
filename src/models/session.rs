use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::models::user::UserGroup;

/// The authenticated user's state, as persisted between reloads.
///
/// Every field defaults to `None`. The JSON shape uses camelCase keys so a
/// persisted session is readable by other tooling built against the same
/// storage key.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    /// ⚠️ Bearer credential. Wiped from memory when the session is cleared.
    pub id_token: Option<String>,
    pub id: Option<String>,
    pub email: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub groups: Option<Vec<UserGroup>>,
    pub organisation_id: Option<String>,
    pub organisation_name: Option<String>,
    #[serde(rename = "organisationABN")]
    pub organisation_abn: Option<String>,
    pub organisation_email: Option<String>,
}

impl Session {
    /// A session is logged in exactly when it holds a non-empty token.
    pub fn is_logged_in(&self) -> bool {
        self.id_token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// The first group of the user, which drives route access.
    pub fn primary_group(&self) -> Option<UserGroup> {
        self.groups.as_ref()?.first().copied()
    }

    /// Overwrites the token bytes in place.
    pub(crate) fn wipe_token(&mut self) {
        if let Some(token) = self.id_token.as_mut() {
            token.zeroize();
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id_token", &self.id_token.as_ref().map(|_| "[redacted]"))
            .field("id", &self.id)
            .field("email", &self.email)
            .field("family_name", &self.family_name)
            .field("given_name", &self.given_name)
            .field("groups", &self.groups)
            .field("organisation_id", &self.organisation_id)
            .field("organisation_name", &self.organisation_name)
            .field("organisation_abn", &self.organisation_abn)
            .field("organisation_email", &self.organisation_email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_not_logged_in() {
        let mut session = Session::default();
        assert!(!session.is_logged_in());
        session.id_token = Some(String::new());
        assert!(!session.is_logged_in());
        session.id_token = Some("eyJ.token".into());
        assert!(session.is_logged_in());
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let session = Session {
            id_token: Some("secret-token".into()),
            ..Session::default()
        };
        let rendered = format!("{:?}", session);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let session = Session {
            organisation_abn: Some("51 824 753 556".into()),
            groups: Some(vec![UserGroup::Administrators]),
            ..Session::default()
        };
        let json = sonic_rs::to_string(&session).unwrap();
        assert!(json.contains(r#""organisationABN":"51 824 753 556""#));
        assert!(json.contains(r#""groups":["Administrators"]"#));
        assert!(json.contains(r#""idToken":null"#));
    }
}
