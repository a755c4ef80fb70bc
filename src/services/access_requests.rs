use crate::{
    client::RasdClient,
    error::ApiResult,
    models::{
        access_request::{
            AccessRequestDoiUpdate, AccessRequestRole, AccessRequestVocabulary, CreatedId,
            DataAccessRequest, DataAccessRequestWrite, DatasetAction, DatasetRequest,
            DatasetRequestNotes, PublicDataAccessRequest,
        },
        pagination::{Page, PageRequest},
    },
    transport::{json_body, strip_null_params},
    validation::access_request::validate_doi,
};

pub const UPDATE_ACCESS_REQUEST_FAILED: &str =
    "There was a problem updating your data access request.";

impl RasdClient {
    /// Submits a data access request.
    ///
    /// # Arguments
    ///
    /// * `request` - The filled-in form. Unset fields are left out of the payload.
    ///
    /// # Returns
    ///
    /// The id of the new request. Backend validation failures come back as
    /// `ApiError::Rejected` with their details.
    pub async fn submit_access_request(&mut self, request: &DataAccessRequestWrite) -> ApiResult<String> {
        let submission = request.to_submission()?;

        let builder = json_body(self.http.post("/access-requests"), &submission)?;
        let created: CreatedId = self.fetch(builder).await?;

        tracing::info!("✅ Data access request submitted: {}", created.id);
        Ok(created.id)
    }

    /// Fetches one of the restricted vocabularies used by the request form.
    pub async fn access_request_vocabulary(
        &mut self,
        vocabulary: AccessRequestVocabulary,
    ) -> ApiResult<Vec<String>> {
        let request = self.http.get(vocabulary.path());
        self.fetch(request).await
    }

    /// Lists the requests visible to `role`.
    pub async fn list_access_requests(
        &mut self,
        role: AccessRequestRole,
        page: &PageRequest,
    ) -> ApiResult<Page<DataAccessRequest>> {
        let request = self
            .http
            .get(role.path())
            .query(&strip_null_params(page.params()));
        self.fetch(request).await
    }

    pub async fn get_access_request(&mut self, id: &str) -> ApiResult<DataAccessRequest> {
        let request = self.http.get(&format!("/access-requests/{}", id));
        self.fetch(request).await
    }

    /// The public summary of a request. Needs no session.
    pub async fn get_access_request_summary(&mut self, id: &str) -> ApiResult<PublicDataAccessRequest> {
        let request = self.http.get(&format!("/access-requests/{}/summary", id));
        self.fetch(request).await
    }

    pub async fn get_dataset_request(
        &mut self,
        access_request_id: &str,
        dataset_request_id: &str,
    ) -> ApiResult<DatasetRequest> {
        let request = self.http.get(&format!(
            "/access-requests/{}/dataset-requests/{}",
            access_request_id, dataset_request_id
        ));
        self.fetch(request).await
    }

    /// Moves a dataset request through its workflow.
    pub async fn action_dataset_request(
        &mut self,
        access_request_id: &str,
        dataset_request_id: &str,
        action: DatasetAction,
    ) -> ApiResult<DatasetRequest> {
        let request = self.http.post(&format!(
            "/access-requests/{}/dataset-requests/{}/{}",
            access_request_id,
            dataset_request_id,
            action.as_str()
        ));
        let dataset: DatasetRequest = self.fetch(request).await?;

        tracing::info!(
            "✅ Dataset request {} actioned ({}) now {:?}",
            dataset.id,
            action.as_str(),
            dataset.status
        );
        Ok(dataset)
    }

    /// Replaces the custodian notes of a dataset request. `None` clears them.
    pub async fn edit_dataset_request_notes(
        &mut self,
        access_request_id: &str,
        dataset_request_id: &str,
        notes: Option<&str>,
    ) -> ApiResult<DatasetRequest> {
        let path = format!(
            "/access-requests/{}/dataset-requests/{}",
            access_request_id, dataset_request_id
        );
        let request = json_body(self.http.patch(&path), &DatasetRequestNotes { notes })?;
        self.fetch(request).await
    }

    /// Attaches a DOI to a completed request.
    pub async fn edit_access_request_doi(&mut self, id: &str, doi: &str) -> ApiResult<DataAccessRequest> {
        validate_doi(doi)?;

        let request = json_body(
            self.http.patch(&format!("/access-requests/{}", id)),
            &AccessRequestDoiUpdate { doi },
        )?;
        let updated: DataAccessRequest = self
            .fetch(request)
            .await
            .map_err(|e| e.or_context(UPDATE_ACCESS_REQUEST_FAILED))?;

        tracing::info!("✅ Data access request has been updated. DOI: {}", doi);
        Ok(updated)
    }
}
