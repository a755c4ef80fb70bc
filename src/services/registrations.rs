use garde::Validate;

use crate::{
    client::RasdClient,
    error::ApiResult,
    models::{
        pagination::{Page, PageRequest},
        registration::{Registration, RegistrationCreate, RegistrationOrganisation, RegistrationStatus},
    },
    transport::{json_body, strip_null_params},
};

pub const REGISTRATION_FAILED: &str = "There has been a problem sending your registration request.";

impl RasdClient {
    /// Submits a request to join the platform.
    pub async fn register(&mut self, registration: &RegistrationCreate) -> ApiResult<Registration> {
        registration.validate()?;
        if let RegistrationOrganisation::New(organisation) = &registration.organisation {
            organisation.validate()?;
        }

        let request = json_body(self.http.post("/register"), registration)?;
        let created: Registration = self
            .fetch(request)
            .await
            .map_err(|e| e.context(REGISTRATION_FAILED))?;

        tracing::info!("📝 Registration received for {}", created.username);
        Ok(created)
    }

    pub async fn list_registrations(
        &mut self,
        page: &PageRequest,
        status: Option<RegistrationStatus>,
    ) -> ApiResult<Page<Registration>> {
        let mut params = page.params().to_vec();
        params.push(("status", status.map(|s| s.as_str().to_string())));

        let request = self.http.get("/register").query(&strip_null_params(params));
        self.fetch(request).await
    }

    pub async fn get_registration(&mut self, id: &str) -> ApiResult<Registration> {
        let request = self.http.get(&format!("/register/{}", id));
        self.fetch(request).await
    }

    /// Approves a registration, optionally into a different organisation
    /// than the one requested.
    pub async fn approve_registration(
        &mut self,
        id: &str,
        override_organisation_id: Option<&str>,
    ) -> ApiResult<Registration> {
        let params = strip_null_params([("override_organisation_id", override_organisation_id)]);
        let request = self
            .http
            .post(&format!("/register/{}/approve", id))
            .query(&params);

        let registration: Registration = self.fetch(request).await?;
        tracing::info!("✅ Registration approved: {}", registration.id);
        Ok(registration)
    }

    pub async fn decline_registration(&mut self, id: &str, reason: Option<&str>) -> ApiResult<Registration> {
        let params = strip_null_params([("reason", reason)]);
        let request = self
            .http
            .post(&format!("/register/{}/decline", id))
            .query(&params);

        let registration: Registration = self.fetch(request).await?;
        tracing::info!("🚫 Registration declined: {}", registration.id);
        Ok(registration)
    }
}
