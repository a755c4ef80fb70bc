use crate::{
    client::RasdClient,
    error::ApiResult,
    models::{
        metadata::{Metadata, MetadataCreate, MetadataSearch, MetadataSummary, MetadataUpdate, MetadataVocabulary},
        pagination::{Page, PageRequest},
    },
    transport::{json_body, strip_null_params},
};

pub const CREATE_METADATA_FAILED: &str = "There has been a problem creating your metadata.";
pub const UPDATE_METADATA_FAILED: &str = "There has been a problem updating your metadata.";

impl RasdClient {
    /// Creates a metadata record. Blank abstract and data source fields are
    /// sent as `null`.
    pub async fn create_metadata(&mut self, metadata: &MetadataCreate) -> ApiResult<Metadata> {
        let payload = metadata.normalised()?;

        let request = json_body(self.http.post("/metadata"), &payload)?;
        let created: Metadata = self
            .fetch(request)
            .await
            .map_err(|e| e.context(CREATE_METADATA_FAILED))?;

        tracing::info!("✅ Metadata created: {}", created.id);
        Ok(created)
    }

    /// Lists the active metadata records visible to the user.
    pub async fn list_metadata(&mut self, page: &PageRequest) -> ApiResult<Page<Metadata>> {
        let mut params = vec![("active_only", Some("true".to_string()))];
        params.extend(page.params());

        let request = self.http.get("/metadata").query(&strip_null_params(params));
        self.fetch(request).await
    }

    /// Public search over metadata summaries. Empty filters are not sent.
    pub async fn search_metadata(
        &mut self,
        search: &MetadataSearch,
        page: &PageRequest,
    ) -> ApiResult<Page<MetadataSummary>> {
        let mut params = search.params();
        params.extend(page.params());

        let request = self
            .http
            .get("/metadata/search")
            .query(&strip_null_params(params));
        self.fetch(request).await
    }

    pub async fn get_metadata(&mut self, id: &str) -> ApiResult<Metadata> {
        let request = self.http.get(&format!("/metadata/{}", id));
        self.fetch(request).await
    }

    /// Applies a partial update. Omitted fields keep their backend value.
    pub async fn edit_metadata(&mut self, id: &str, update: &MetadataUpdate) -> ApiResult<Metadata> {
        update.check()?;

        let request = json_body(self.http.patch(&format!("/metadata/{}", id)), update)?;
        let updated: Metadata = self
            .fetch(request)
            .await
            .map_err(|e| e.context(UPDATE_METADATA_FAILED))?;

        tracing::info!("✅ Metadata updated: {}", updated.id);
        Ok(updated)
    }

    /// Fetches one of the restricted vocabularies used by metadata forms.
    pub async fn metadata_vocabulary(&mut self, vocabulary: MetadataVocabulary) -> ApiResult<Vec<String>> {
        let request = self.http.get(vocabulary.path());
        self.fetch(request).await
    }
}
