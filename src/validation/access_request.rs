use crate::error::{ApiError, ApiResult};
use crate::validation::fields::{FieldValidation, is_filled};
use crate::validation::metadata::is_doi;

pub fn data_access_request_doi_validator(doi: &str) -> FieldValidation {
    FieldValidation::new("dataAccessRequestDOIClasses", !doi.is_empty() && is_doi(doi))
}

/// An ORCID is only sent when one was actually entered.
pub fn orcid_validator(orcid: Option<&str>) -> bool {
    orcid.is_some_and(is_filled)
}

/// Validates a DOI before it is attached to a data access request.
pub fn validate_doi(doi: &str) -> ApiResult<()> {
    if !data_access_request_doi_validator(doi).valid {
        return Err(ApiError::Validation(format!("'{}' is not a valid DOI", doi)));
    }
    Ok(())
}
