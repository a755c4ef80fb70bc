use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::patch::FieldUpdate;

/// A dataset description owned by a custodian organisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_: Option<String>,
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub organisation_id: String,
    pub custodian: String,
    pub temporal_coverage_from: NaiveDate,
    pub temporal_coverage_to: NaiveDate,
    pub north_bounding_coordinate: i32,
    pub south_bounding_coordinate: i32,
    pub east_bounding_coordinate: i32,
    pub west_bounding_coordinate: i32,
    pub taxa_covered: String,
    pub collection_methods: Vec<String>,
    #[serde(default)]
    pub data_source_doi: Option<String>,
    #[serde(default)]
    pub data_source_url: Option<String>,
    pub embargoed: bool,
    #[serde(default)]
    pub embargo_release_date: Option<NaiveDate>,
    pub contact_organisation: String,
    pub contact_position: String,
    pub contact_email: String,
    pub stored_format: String,
    #[serde(default)]
    pub available_formats: Option<Vec<String>>,
    pub access_rights: String,
    pub use_restrictions: String,
    pub security_classification: String,
    pub generalisations: String,
}

fn default_active() -> bool {
    true
}

/// The non-sensitive view returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSummary {
    pub id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_: Option<String>,
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub organisation_id: String,
    pub custodian: String,
}

/// The request payload for creating a metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct MetadataCreate {
    #[garde(length(min = 1, max = 200))]
    pub title: String,
    #[serde(rename = "abstract")]
    #[garde(length(max = 500))]
    pub abstract_: Option<String>,
    #[garde(length(min = 1))]
    pub keywords: Vec<String>,
    #[garde(skip)]
    pub temporal_coverage_from: NaiveDate,
    #[garde(skip)]
    pub temporal_coverage_to: NaiveDate,
    #[garde(range(min = -90, max = 90))]
    pub north_bounding_coordinate: i32,
    #[garde(range(min = -90, max = 90))]
    pub south_bounding_coordinate: i32,
    #[garde(range(min = -180, max = 180))]
    pub east_bounding_coordinate: i32,
    #[garde(range(min = -180, max = 180))]
    pub west_bounding_coordinate: i32,
    #[garde(length(min = 1))]
    pub locations: Vec<String>,
    #[garde(length(min = 1, max = 200))]
    pub taxa_covered: String,
    #[garde(length(min = 1))]
    pub collection_methods: Vec<String>,
    #[garde(skip)]
    pub data_source_url: Option<String>,
    #[garde(skip)]
    pub data_source_doi: Option<String>,
    #[garde(skip)]
    pub embargoed: bool,
    #[garde(skip)]
    pub embargo_release_date: Option<NaiveDate>,
    #[garde(length(min = 1, max = 200))]
    pub contact_organisation: String,
    #[garde(length(min = 1, max = 200))]
    pub contact_position: String,
    #[garde(email)]
    pub contact_email: String,
    #[garde(length(min = 1))]
    pub stored_format: String,
    #[garde(skip)]
    pub available_formats: Vec<String>,
    #[garde(length(min = 1))]
    pub access_rights: String,
    #[garde(length(min = 1, max = 500))]
    pub use_restrictions: String,
    #[garde(length(min = 1))]
    pub security_classification: String,
    #[garde(length(min = 1, max = 500))]
    pub generalisations: String,
}

impl MetadataCreate {
    /// Blank optional text becomes `null` and at least one data source must remain.
    pub(crate) fn normalised(&self) -> ApiResult<Self> {
        let mut payload = self.clone();
        payload.abstract_ = non_blank(payload.abstract_);
        payload.data_source_url = non_blank(payload.data_source_url);
        payload.data_source_doi = non_blank(payload.data_source_doi);

        if payload.data_source_url.is_none() && payload.data_source_doi.is_none() {
            return Err(ApiError::Validation(
                "At least one of a data source URL or DOI is required".to_string(),
            ));
        }

        payload.validate()?;
        Ok(payload)
    }
}

/// The request payload for editing a metadata record.
///
/// Every field is omitted unless set, so an edit never nulls a backend value
/// by accident. `embargo_release_date` in particular is only sent when the
/// caller decides to set or clear it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataUpdate {
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub title: FieldUpdate<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "FieldUpdate::is_omitted")]
    pub abstract_: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub keywords: FieldUpdate<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub temporal_coverage_from: FieldUpdate<NaiveDate>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub temporal_coverage_to: FieldUpdate<NaiveDate>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub north_bounding_coordinate: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub south_bounding_coordinate: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub east_bounding_coordinate: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub west_bounding_coordinate: FieldUpdate<i32>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub locations: FieldUpdate<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub taxa_covered: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub collection_methods: FieldUpdate<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub data_source_url: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub data_source_doi: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub embargoed: FieldUpdate<bool>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub embargo_release_date: FieldUpdate<NaiveDate>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub contact_organisation: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub contact_position: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub contact_email: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub stored_format: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub available_formats: FieldUpdate<Vec<String>>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub access_rights: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub use_restrictions: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub security_classification: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_omitted")]
    pub generalisations: FieldUpdate<String>,
}

impl MetadataUpdate {
    /// Range and length checks on the fields being set.
    pub(crate) fn check(&self) -> ApiResult<()> {
        let latitudes = [
            ("north_bounding_coordinate", &self.north_bounding_coordinate),
            ("south_bounding_coordinate", &self.south_bounding_coordinate),
        ];
        let longitudes = [
            ("east_bounding_coordinate", &self.east_bounding_coordinate),
            ("west_bounding_coordinate", &self.west_bounding_coordinate),
        ];

        for (name, value) in latitudes {
            if let Some(v) = value.as_set() {
                if !(-90..=90).contains(v) {
                    return Err(ApiError::Validation(format!("{name} must be between -90 and 90")));
                }
            }
        }
        for (name, value) in longitudes {
            if let Some(v) = value.as_set() {
                if !(-180..=180).contains(v) {
                    return Err(ApiError::Validation(format!("{name} must be between -180 and 180")));
                }
            }
        }

        if let Some(title) = self.title.as_set() {
            if title.trim().is_empty() || title.chars().count() > 200 {
                return Err(ApiError::Validation(
                    "title must be between 1 and 200 characters".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Optional filters for the metadata search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataSearch {
    pub keywords: Vec<String>,
    pub locations: Vec<String>,
    pub title: Option<String>,
    /// Matched against the abstract.
    pub description: Option<String>,
    pub organisation_id: Option<String>,
}

impl MetadataSearch {
    pub(crate) fn params(&self) -> Vec<(&'static str, Option<String>)> {
        let mut params = Vec::new();
        params.extend(self.keywords.iter().map(|k| ("keywords", Some(k.clone()))));
        params.extend(self.locations.iter().map(|l| ("locations", Some(l.clone()))));
        params.push(("title", non_blank(self.title.clone())));
        params.push(("abstract", non_blank(self.description.clone())));
        params.push(("organisation_id", non_blank(self.organisation_id.clone())));
        params
    }
}

/// Restricted vocabularies served under `/metadata/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataVocabulary {
    AccessRights,
    CollectionMethods,
    Formats,
    Keywords,
    Locations,
    SecurityClassifications,
}

impl MetadataVocabulary {
    pub fn path(&self) -> &'static str {
        match self {
            MetadataVocabulary::AccessRights => "/metadata/access-rights",
            MetadataVocabulary::CollectionMethods => "/metadata/collection-methods",
            MetadataVocabulary::Formats => "/metadata/formats",
            MetadataVocabulary::Keywords => "/metadata/keywords",
            MetadataVocabulary::Locations => "/metadata/locations",
            MetadataVocabulary::SecurityClassifications => "/metadata/security-classifications",
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
