use crate::{
    client::RasdClient,
    error::{ApiError, ApiResult},
    models::abn::AbnLookup,
    validation::organisation::{compact_abn, is_abn},
};

impl RasdClient {
    /// Looks an ABN up in the Australian Business Register.
    pub async fn lookup_abn(&mut self, abn: &str) -> ApiResult<AbnLookup> {
        if !is_abn(abn) {
            return Err(ApiError::Validation("ABN is not in a valid format".to_string()));
        }

        let request = self.http.get(&format!("/abn/lookup/{}", compact_abn(abn)));
        let lookup: AbnLookup = self.fetch(request).await?;

        tracing::debug!("🔎 ABN {} is {}", lookup.abn, lookup.abn_status);
        Ok(lookup)
    }
}
