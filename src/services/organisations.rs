use garde::Validate;

use crate::{
    client::RasdClient,
    error::ApiResult,
    models::{
        organisation::{Organisation, OrganisationCreate, OrganisationUpdate},
        pagination::{Page, PageRequest},
    },
    transport::{json_body, strip_null_params},
};

pub const CREATE_ORGANISATION_FAILED: &str =
    "There has been a problem adding your organisation. The ABN may be inactive or you may already be registered.";
pub const UPDATE_ORGANISATION_FAILED: &str = "There was a problem updating your organisation.";

impl RasdClient {
    pub async fn create_organisation(&mut self, organisation: &OrganisationCreate) -> ApiResult<Organisation> {
        organisation.validate()?;

        let request = json_body(self.http.post("/organisations"), organisation)?;
        let created: Organisation = self
            .fetch(request)
            .await
            .map_err(|e| e.context(CREATE_ORGANISATION_FAILED))?;

        tracing::info!("✅ Organisation created: {}", created.id);
        Ok(created)
    }

    pub async fn list_organisations(&mut self, page: &PageRequest) -> ApiResult<Page<Organisation>> {
        let request = self
            .http
            .get("/organisations")
            .query(&strip_null_params(page.params()));
        self.fetch(request).await
    }

    pub async fn get_organisation(&mut self, id: &str) -> ApiResult<Organisation> {
        let request = self.http.get(&format!("/organisations/{}", id));
        self.fetch(request).await
    }

    /// Changes the contact email of an organisation, the only editable field.
    pub async fn edit_organisation(&mut self, id: &str, email: &str) -> ApiResult<Organisation> {
        let update = OrganisationUpdate {
            email: email.to_string(),
        };
        update.validate()?;

        let request = json_body(self.http.patch(&format!("/organisations/{}", id)), &update)?;
        let updated: Organisation = self
            .fetch(request)
            .await
            .map_err(|e| e.context(UPDATE_ORGANISATION_FAILED))?;

        // Keep the session in step when the user edits their own organisation.
        if self.session.session().organisation_id.as_deref() == Some(id) {
            self.session.set_user_organisation_details(&updated);
        }
        Ok(updated)
    }
}
