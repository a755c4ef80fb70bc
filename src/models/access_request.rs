use chrono::NaiveDate;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::user::UserGroup;
use crate::validation::access_request::orcid_validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "To deliver government services")]
    ToDeliver,
    #[serde(rename = "To inform government policies and programs")]
    ToInformPolicies,
    #[serde(rename = "For Research and development")]
    ForResearch,
    #[serde(rename = "For compliance and / or enforcement activities")]
    ForCompliance,
    #[serde(rename = "For conservation management")]
    ForConservation,
    #[serde(rename = "For planning approval")]
    ForPlanning,
    #[serde(rename = "For a government-funded grant program")]
    ForGovernmentGrant,
    #[serde(rename = "To inform environmental impact assessment")]
    ToInformImpactAssessment,
    #[serde(rename = "For land management")]
    ForLandManagement,
}

/// ANZSRC fields of research.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResearchClassification {
    Education,
    Engineering,
    #[serde(rename = "Environmental Sciences")]
    EnvironmentalSciences,
    #[serde(rename = "Health Sciences")]
    HealthSciences,
    #[serde(rename = "History, Heritage and Archaeology")]
    HistoryHeritage,
    #[serde(rename = "Human Society")]
    HumanSociety,
    #[serde(rename = "Indigenous Studies")]
    IndigenousStudies,
    #[serde(rename = "Information and Computing Sciences")]
    InformationComputingSciences,
    #[serde(rename = "Language, Communications and Culture")]
    LanguageCommunications,
    #[serde(rename = "Law and Legal Studies")]
    Law,
    #[serde(rename = "Mathematical Sciences")]
    MathematicalSciences,
    #[serde(rename = "Philosophy and Religious Studies")]
    Philosophy,
    #[serde(rename = "Physical Sciences")]
    PhysicalSciences,
    Psychology,
}

/// ANZSIC industry divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndustryClassification {
    #[serde(rename = "Agriculture, Forestry and Fishing")]
    Agriculture,
    Mining,
    Manufacturing,
    #[serde(rename = "Electricity, Gas, Water and Waste Services")]
    Electricity,
    Construction,
    #[serde(rename = "Wholesale Trade")]
    Wholesale,
    #[serde(rename = "Retail Trade")]
    Retail,
    #[serde(rename = "Accommodation and Food Services")]
    Accommodation,
    #[serde(rename = "Transport, Postal and Warehousing")]
    Transport,
    #[serde(rename = "Information, Media and Telecommunications")]
    Information,
    #[serde(rename = "Financial and Insurance Services")]
    Financial,
    #[serde(rename = "Rental, Hiring and Real Estate Services")]
    Rental,
    #[serde(rename = "Professional, Scientific and Technical Services")]
    Professional,
    #[serde(rename = "Administrative and Support Services")]
    Administrative,
    #[serde(rename = "Public Administration and Safety")]
    Public,
    #[serde(rename = "Education and Training")]
    Education,
    #[serde(rename = "Health Care and Social Assistance")]
    Health,
    #[serde(rename = "Arts and Recreational Services")]
    Arts,
    #[serde(rename = "Other Services")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Area {
    #[serde(rename = "Whole Dataset")]
    Whole,
    #[serde(rename = "Specific Area")]
    Specific,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "Single once off")]
    Single,
    #[serde(rename = "Defined period")]
    Defined,
    Ongoing,
}

/// Who will have access to the requested data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAccess {
    #[serde(rename = "Just me")]
    JustMe,
    #[serde(rename = "A select group within my organisation / institution")]
    SelectGroup,
    #[serde(rename = "My entire organisation / institution")]
    EntireOrganisation,
    Other,
}

/// A data access request as filled in by a requestor.
///
/// Everything but the dataset ids is optional here; the backend decides which
/// combinations are acceptable and reports the rest as validation details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataAccessRequestWrite {
    pub metadata_ids: Vec<String>,
    pub organisation_address: Option<String>,
    pub is_indigenous_org: Option<bool>,
    pub orcid: Option<String>,
    pub project_title: Option<String>,
    pub purpose: Option<Purpose>,
    pub research_topic: Option<ResearchClassification>,
    pub industry_type: Option<IndustryClassification>,
    pub commercial_purposes: Option<bool>,
    pub public_benefit: Option<String>,
    pub data_requested: Option<String>,
    pub data_relevance: Option<String>,
    pub required_period: Option<String>,
    pub date_required_from: Option<NaiveDate>,
    pub date_required_to: Option<NaiveDate>,
    pub frequency: Option<Frequency>,
    pub required_area: Option<Area>,
    pub bounding_box: Option<String>,
    pub security_controls: Option<String>,
    pub user_access: Option<UserAccess>,
    pub group_access_name: Option<String>,
    pub distributed_to: Option<String>,
    pub will_accept_transformed: Option<bool>,
}

/// The body of `POST /access-requests`. Absent values are left out entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub(crate) struct AccessRequestSubmission {
    #[garde(length(min = 1, max = 10))]
    metadata_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    requestor_organisation_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    requestor_organisation_indigenous_body: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    requestor_orcid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_purpose: Option<Purpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_research: Option<ResearchClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_industry: Option<IndustryClassification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_commercial: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    project_public_benefit_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_requested: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_relevance_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_required_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_required_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_frequency_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_area: Option<Area>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_area_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_security_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_access: Option<UserAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_access_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_distribution_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[garde(skip)]
    data_accept_transformed: Option<bool>,
}

impl DataAccessRequestWrite {
    pub(crate) fn to_submission(&self) -> ApiResult<AccessRequestSubmission> {
        // A defined period needs both ends; any other frequency takes neither.
        let has_dates = self.date_required_from.is_some() || self.date_required_to.is_some();
        match self.frequency {
            Some(Frequency::Defined)
                if self.date_required_from.is_none() || self.date_required_to.is_none() =>
            {
                return Err(ApiError::Validation(
                    "Both required from and required to dates are needed for a defined period"
                        .to_string(),
                ));
            }
            Some(Frequency::Single | Frequency::Ongoing) if has_dates => {
                return Err(ApiError::Validation(
                    "Required dates can only be given for a defined period".to_string(),
                ));
            }
            _ => {}
        }

        let submission = AccessRequestSubmission {
            metadata_ids: self.metadata_ids.clone(),
            requestor_organisation_address: self.organisation_address.clone(),
            requestor_organisation_indigenous_body: self.is_indigenous_org,
            requestor_orcid: self
                .orcid
                .clone()
                .filter(|orcid| orcid_validator(Some(orcid.as_str()))),
            project_title: self.project_title.clone(),
            project_purpose: self.purpose,
            project_research: self.research_topic,
            project_industry: self.industry_type,
            project_commercial: self.commercial_purposes,
            project_public_benefit_explanation: self.public_benefit.clone(),
            data_requested: self.data_requested.clone(),
            data_relevance_explanation: self.data_relevance.clone(),
            data_frequency: self.frequency,
            data_required_from: self.date_required_from,
            data_required_to: self.date_required_to,
            data_frequency_explanation: self.required_period.clone(),
            data_area: self.required_area,
            data_area_explanation: self.bounding_box.clone(),
            data_security_explanation: self.security_controls.clone(),
            data_access: self.user_access,
            data_access_explanation: self.group_access_name.clone(),
            data_distribution_explanation: self.distributed_to.clone(),
            data_accept_transformed: self.will_accept_transformed,
        };
        submission.validate()?;
        Ok(submission)
    }
}

/// Body of `PATCH /access-requests/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AccessRequestDoiUpdate<'a> {
    pub doi: &'a str,
}

/// Body of `PATCH /access-requests/{id}/dataset-requests/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DatasetRequestNotes<'a> {
    pub notes: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedId {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetRequestStatus {
    New,
    Acknowledged,
    Approved,
    Declined,
    #[serde(rename = "Data Agreement Sent")]
    DataAgreementSent,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Created,
    Acknowledged,
    Approved,
    Declined,
    #[serde(rename = "Data Agreement Sent")]
    DataAgreementSent,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub by: String,
    pub at: String,
}

/// The request for one dataset within a data access request, handled by
/// that dataset's custodian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRequest {
    pub id: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub status: DatasetRequestStatus,
    pub metadata_id: String,
    pub metadata_title: String,
    pub custodian_id: String,
    pub custodian_name: String,
    pub custodian_email: String,
    /// Not tracked by the backend yet; always `false` on read.
    #[serde(default, skip_deserializing)]
    pub legal_agreement_signed: bool,
    #[serde(default)]
    pub audit: Vec<AuditEntry>,
    /// Custodian-only working notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requestor {
    pub id: String,
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub organisation_id: String,
    pub organisation_name: String,
    pub organisation_email: String,
    pub organisation_address: String,
    pub organisation_indigenous_body: bool,
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: String,
    pub purpose: String,
    pub research: Option<String>,
    pub industry: Option<String>,
    pub commercial: bool,
    pub public_benefit_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestedData {
    pub requested: String,
    pub relevance_explanation: String,
    pub frequency: String,
    pub required_from: Option<NaiveDate>,
    pub required_to: Option<NaiveDate>,
    pub frequency_explanation: Option<String>,
    pub area: String,
    pub area_explanation: Option<String>,
    pub security_explanation: String,
    pub access: String,
    pub access_explanation: String,
    pub distribution_explanation: String,
    pub accept_transformed: bool,
}

/// A data access request with the backend's flat fields grouped into
/// `requestor`, `project` and `data` sections.
///
/// Serialises back to the flat backend shape; `is_doi_editable` is not
/// carried and reads back as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDataAccessRequest", into = "RawDataAccessRequest")]
pub struct DataAccessRequest {
    pub id: String,
    pub active: bool,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    pub doi: Option<String>,
    /// UI state; the DOI editor starts closed.
    pub is_doi_editable: bool,
    pub dataset_requests: Vec<DatasetRequest>,
    pub custodian_ids: Vec<String>,
    pub requestor: Requestor,
    pub project: Project,
    pub data: RequestedData,
}

#[derive(Serialize, Deserialize)]
struct RawDataAccessRequest {
    id: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    completed_at: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    dataset_requests: Vec<DatasetRequest>,
    #[serde(default, alias = "custodianIds")]
    custodian_ids: Vec<String>,
    requestor_id: String,
    requestor_given_name: String,
    requestor_family_name: String,
    requestor_email: String,
    requestor_organisation_id: String,
    requestor_organisation_name: String,
    requestor_organisation_email: String,
    #[serde(default)]
    requestor_organisation_address: String,
    #[serde(default)]
    requestor_organisation_indigenous_body: bool,
    #[serde(default)]
    requestor_orcid: Option<String>,
    #[serde(default)]
    project_title: String,
    #[serde(default)]
    project_purpose: String,
    #[serde(default)]
    project_research: Option<String>,
    #[serde(default)]
    project_industry: Option<String>,
    #[serde(default)]
    project_commercial: bool,
    #[serde(default)]
    project_public_benefit_explanation: String,
    #[serde(default)]
    data_requested: String,
    #[serde(default)]
    data_relevance_explanation: String,
    #[serde(default)]
    data_frequency: String,
    #[serde(default)]
    data_required_from: Option<NaiveDate>,
    #[serde(default)]
    data_required_to: Option<NaiveDate>,
    #[serde(default)]
    data_frequency_explanation: Option<String>,
    #[serde(default)]
    data_area: String,
    #[serde(default)]
    data_area_explanation: Option<String>,
    #[serde(default)]
    data_security_explanation: String,
    #[serde(default)]
    data_access: String,
    #[serde(default)]
    data_access_explanation: String,
    #[serde(default)]
    data_distribution_explanation: String,
    #[serde(default)]
    data_accept_transformed: bool,
}

impl From<RawDataAccessRequest> for DataAccessRequest {
    fn from(raw: RawDataAccessRequest) -> Self {
        DataAccessRequest {
            id: raw.id,
            active: raw.active,
            created_at: raw.created_at,
            completed_at: raw.completed_at,
            doi: raw.doi,
            is_doi_editable: false,
            dataset_requests: raw.dataset_requests,
            custodian_ids: raw.custodian_ids,
            requestor: Requestor {
                id: raw.requestor_id,
                given_name: raw.requestor_given_name,
                family_name: raw.requestor_family_name,
                email: raw.requestor_email,
                organisation_id: raw.requestor_organisation_id,
                organisation_name: raw.requestor_organisation_name,
                organisation_email: raw.requestor_organisation_email,
                organisation_address: raw.requestor_organisation_address,
                organisation_indigenous_body: raw.requestor_organisation_indigenous_body,
                orcid: raw.requestor_orcid,
            },
            project: Project {
                title: raw.project_title,
                purpose: raw.project_purpose,
                research: raw.project_research,
                industry: raw.project_industry,
                commercial: raw.project_commercial,
                public_benefit_explanation: raw.project_public_benefit_explanation,
            },
            data: RequestedData {
                requested: raw.data_requested,
                relevance_explanation: raw.data_relevance_explanation,
                frequency: raw.data_frequency,
                required_from: raw.data_required_from,
                required_to: raw.data_required_to,
                frequency_explanation: raw.data_frequency_explanation,
                area: raw.data_area,
                area_explanation: raw.data_area_explanation,
                security_explanation: raw.data_security_explanation,
                access: raw.data_access,
                access_explanation: raw.data_access_explanation,
                distribution_explanation: raw.data_distribution_explanation,
                accept_transformed: raw.data_accept_transformed,
            },
        }
    }
}

impl From<DataAccessRequest> for RawDataAccessRequest {
    fn from(request: DataAccessRequest) -> Self {
        let DataAccessRequest {
            requestor,
            project,
            data,
            ..
        } = request;
        RawDataAccessRequest {
            id: request.id,
            active: request.active,
            created_at: request.created_at,
            completed_at: request.completed_at,
            doi: request.doi,
            dataset_requests: request.dataset_requests,
            custodian_ids: request.custodian_ids,
            requestor_id: requestor.id,
            requestor_given_name: requestor.given_name,
            requestor_family_name: requestor.family_name,
            requestor_email: requestor.email,
            requestor_organisation_id: requestor.organisation_id,
            requestor_organisation_name: requestor.organisation_name,
            requestor_organisation_email: requestor.organisation_email,
            requestor_organisation_address: requestor.organisation_address,
            requestor_organisation_indigenous_body: requestor.organisation_indigenous_body,
            requestor_orcid: requestor.orcid,
            project_title: project.title,
            project_purpose: project.purpose,
            project_research: project.research,
            project_industry: project.industry,
            project_commercial: project.commercial,
            project_public_benefit_explanation: project.public_benefit_explanation,
            data_requested: data.requested,
            data_relevance_explanation: data.relevance_explanation,
            data_frequency: data.frequency,
            data_required_from: data.required_from,
            data_required_to: data.required_to,
            data_frequency_explanation: data.frequency_explanation,
            data_area: data.area,
            data_area_explanation: data.area_explanation,
            data_security_explanation: data.security_explanation,
            data_access: data.access,
            data_access_explanation: data.access_explanation,
            data_distribution_explanation: data.distribution_explanation,
            data_accept_transformed: data.accept_transformed,
        }
    }
}

/// A dataset as listed on the public summary of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicDatasetRequest {
    pub id: String,
    pub metadata_title: String,
    pub custodian_name: String,
    #[serde(default, rename = "metadata_data_source_doi")]
    pub data_source_doi: Option<String>,
    #[serde(default, rename = "metadata_data_source_url")]
    pub data_source_url: Option<String>,
}

/// The publicly visible summary of a data access request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicDataAccessRequest {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(rename = "dataset_requests")]
    pub datasets: Vec<PublicDatasetRequest>,
    pub data_requested: String,
    pub data_frequency: String,
    #[serde(default)]
    pub data_required_from: Option<NaiveDate>,
    #[serde(default)]
    pub data_required_to: Option<NaiveDate>,
    #[serde(default)]
    pub data_frequency_explanation: Option<String>,
    pub data_area: String,
    #[serde(default)]
    pub data_area_explanation: Option<String>,
}

/// Actions a custodian or administrator can take on a dataset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetAction {
    Acknowledge,
    Approve,
    Decline,
    AgreementSent,
    Complete,
}

impl DatasetAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetAction::Acknowledge => "acknowledge",
            DatasetAction::Approve => "approve",
            DatasetAction::Decline => "decline",
            DatasetAction::AgreementSent => "agreement-sent",
            DatasetAction::Complete => "complete",
        }
    }
}

/// Restricted vocabularies served under `/access-requests/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequestVocabulary {
    Accesses,
    Areas,
    Frequencies,
    IndustryClassifications,
    Purposes,
    ResearchClassifications,
}

impl AccessRequestVocabulary {
    pub fn path(&self) -> &'static str {
        match self {
            AccessRequestVocabulary::Accesses => "/access-requests/accesses",
            AccessRequestVocabulary::Areas => "/access-requests/areas",
            AccessRequestVocabulary::Frequencies => "/access-requests/frequencies",
            AccessRequestVocabulary::IndustryClassifications => {
                "/access-requests/industry-classifications"
            }
            AccessRequestVocabulary::Purposes => "/access-requests/purposes",
            AccessRequestVocabulary::ResearchClassifications => {
                "/access-requests/research-classifications"
            }
        }
    }
}

/// Whose view of the access requests to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequestRole {
    Custodian,
    Requestor,
    Administrator,
}

impl AccessRequestRole {
    pub fn path(&self) -> &'static str {
        match self {
            AccessRequestRole::Custodian => "/access-requests/custodian",
            AccessRequestRole::Requestor => "/access-requests/requestor",
            AccessRequestRole::Administrator => "/access-requests",
        }
    }
}

impl From<UserGroup> for AccessRequestRole {
    fn from(group: UserGroup) -> Self {
        match group {
            UserGroup::DataCustodians => AccessRequestRole::Custodian,
            UserGroup::DataRequestors => AccessRequestRole::Requestor,
            UserGroup::Administrators => AccessRequestRole::Administrator,
        }
    }
}
