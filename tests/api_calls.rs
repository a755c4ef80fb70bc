mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use rasd_client::{
    ApiError,
    models::{
        access_request::{
            AccessRequestRole, DataAccessRequestWrite, DatasetAction, DatasetRequestStatus,
            Frequency, Purpose, UserAccess,
        },
        metadata::{MetadataCreate, MetadataSearch, MetadataUpdate},
        pagination::PageRequest,
        patch::FieldUpdate,
        registration::RegistrationStatus,
    },
    services::access_requests::UPDATE_ACCESS_REQUEST_FAILED,
    store::{MemoryStorage, SessionStore},
};
use serde_json::{Value, json};

use common::*;

const CUSTODIAN_SESSION: &str = r#"{"idToken":"token-1","id":"user-1","groups":["DataCustodians"],
    "organisationId":"org-1","organisationEmail":"old@science.gov.au"}"#;

fn logged_in(backend: &MockBackend) -> (rasd_client::RasdClient, std::sync::Arc<RecordingHooks>) {
    client_with(
        backend,
        SessionStore::open(MemoryStorage::with_contents(CUSTODIAN_SESSION)),
    )
}

fn registration_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "username": "sam@uni.edu.au",
        "given_name": "Sam",
        "family_name": "Researcher",
        "group": "DataRequestors",
        "organisation": "org-2",
        "agreements": ["Terms of use"],
        "status": status,
        "created_at": "2023-03-14T05:06:07.000Z"
    })
}

fn metadata_create() -> MetadataCreate {
    MetadataCreate {
        title: "Koala sightings".into(),
        abstract_: Some("   ".into()),
        keywords: vec!["koala".into()],
        temporal_coverage_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        temporal_coverage_to: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        north_bounding_coordinate: -26,
        south_bounding_coordinate: -28,
        east_bounding_coordinate: 154,
        west_bounding_coordinate: 152,
        locations: vec!["Brisbane".into()],
        taxa_covered: "Phascolarctos cinereus".into(),
        collection_methods: vec!["Observation".into()],
        data_source_url: Some(String::new()),
        data_source_doi: Some("10.1000/182".into()),
        embargoed: false,
        embargo_release_date: None,
        contact_organisation: "Department of Science".into(),
        contact_position: "Data Officer".into(),
        contact_email: "data@science.gov.au".into(),
        stored_format: "CSV".into(),
        available_formats: vec!["CSV".into()],
        access_rights: "Restricted".into(),
        use_restrictions: "Research only".into(),
        security_classification: "Unclassified".into(),
        generalisations: "None".into(),
    }
}

#[tokio::test]
async fn metadata_list_sends_active_only_and_page_size() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/metadata",
        StatusCode::OK,
        json!({ "cursor": "next-1", "count": 1, "results": [metadata_json("md-1")] }),
    );
    let (mut client, _hooks) = logged_in(&backend);

    let page = client.list_metadata(&PageRequest::first(5)).await.unwrap();

    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].id, "md-1");
    assert_eq!(
        page.results[0].embargo_release_date,
        NaiveDate::from_ymd_opt(2030, 6, 30)
    );
    assert!(!page.is_last());

    let query = backend.last(Method::GET, "/metadata").query_pairs();
    assert!(query.contains(&("active_only".into(), "true".into())));
    assert!(query.contains(&("limit".into(), "5".into())));
    assert!(!query.iter().any(|(key, _)| key == "cursor"));

    let next = PageRequest::first(5).next(&page).unwrap();
    client.list_metadata(&next).await.unwrap();
    let query = backend.last(Method::GET, "/metadata").query_pairs();
    assert!(query.contains(&("cursor".into(), "next-1".into())));
}

#[tokio::test]
async fn search_repeats_list_filters_and_drops_empty_ones() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/metadata/search",
        StatusCode::OK,
        json!({ "count": 0, "results": [] }),
    );
    let (mut client, _hooks) = anonymous_client(&backend);

    let search = MetadataSearch {
        keywords: vec!["koala".into(), "possum".into()],
        locations: vec!["Brisbane".into()],
        title: Some("  ".into()),
        description: None,
        organisation_id: Some("org-1".into()),
    };
    let page = client
        .search_metadata(&search, &PageRequest::default())
        .await
        .unwrap();
    assert!(page.is_last());

    let query = backend.last(Method::GET, "/metadata/search").query_pairs();
    let keywords: Vec<_> = query
        .iter()
        .filter(|(key, _)| key == "keywords")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(keywords, vec!["koala", "possum"]);
    assert!(query.contains(&("locations".into(), "Brisbane".into())));
    assert!(query.contains(&("organisation_id".into(), "org-1".into())));
    assert!(query.contains(&("limit".into(), "20".into())));
    assert!(!query.iter().any(|(key, _)| key == "title" || key == "abstract"));
}

#[tokio::test]
async fn create_metadata_nulls_blank_text() {
    let backend = MockBackend::start().await;
    backend.on(Method::POST, "/metadata", StatusCode::OK, metadata_json("md-9"));
    let (mut client, _hooks) = logged_in(&backend);

    let created = client.create_metadata(&metadata_create()).await.unwrap();
    assert_eq!(created.id, "md-9");

    let body = backend.last(Method::POST, "/metadata").json();
    assert_eq!(body["abstract"], Value::Null);
    assert_eq!(body["data_source_url"], Value::Null);
    assert_eq!(body["data_source_doi"], "10.1000/182");
    assert_eq!(body["temporal_coverage_from"], "2020-01-01");
}

#[tokio::test]
async fn create_metadata_needs_a_data_source() {
    let backend = MockBackend::start().await;
    let (mut client, _hooks) = logged_in(&backend);

    let metadata = MetadataCreate {
        data_source_doi: None,
        data_source_url: Some(" ".into()),
        ..metadata_create()
    };
    let err = client.create_metadata(&metadata).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn edit_metadata_omits_untouched_fields() {
    let backend = MockBackend::start().await;
    backend.on(Method::PATCH, "/metadata/md-1", StatusCode::OK, metadata_json("md-1"));
    let (mut client, _hooks) = logged_in(&backend);

    let update = MetadataUpdate {
        title: FieldUpdate::Set("Koala sightings 2021".into()),
        data_source_url: FieldUpdate::Clear,
        ..MetadataUpdate::default()
    };
    client.edit_metadata("md-1", &update).await.unwrap();

    let body = backend.last(Method::PATCH, "/metadata/md-1").json();
    let fields = body.as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(body["title"], "Koala sightings 2021");
    assert_eq!(body["data_source_url"], Value::Null);
    assert!(!fields.contains_key("embargo_release_date"));
    assert!(!fields.contains_key("embargoed"));
}

#[tokio::test]
async fn access_request_submission_leaves_out_unset_fields() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "/access-requests",
        StatusCode::OK,
        json!({ "id": "dar-1" }),
    );
    let (mut client, _hooks) = logged_in(&backend);

    let request = DataAccessRequestWrite {
        metadata_ids: vec!["md-1".into(), "md-2".into()],
        orcid: Some("   ".into()),
        project_title: Some("Koala corridors".into()),
        purpose: Some(Purpose::ForResearch),
        frequency: Some(Frequency::Defined),
        date_required_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        date_required_to: NaiveDate::from_ymd_opt(2024, 12, 31),
        user_access: Some(UserAccess::JustMe),
        ..DataAccessRequestWrite::default()
    };
    let id = client.submit_access_request(&request).await.unwrap();
    assert_eq!(id, "dar-1");

    let body = backend.last(Method::POST, "/access-requests").json();
    assert_eq!(body["metadata_ids"], json!(["md-1", "md-2"]));
    assert_eq!(body["project_title"], "Koala corridors");
    assert_eq!(body["project_purpose"], "For Research and development");
    assert_eq!(body["data_frequency"], "Defined period");
    assert_eq!(body["data_required_from"], "2024-01-01");
    assert_eq!(body["data_access"], "Just me");

    let fields = body.as_object().unwrap();
    assert!(!fields.contains_key("requestor_orcid"));
    assert!(!fields.contains_key("project_research"));
    assert!(!fields.contains_key("data_area"));
}

#[tokio::test]
async fn defined_period_without_dates_is_not_sent() {
    let backend = MockBackend::start().await;
    let (mut client, _hooks) = logged_in(&backend);

    let request = DataAccessRequestWrite {
        metadata_ids: vec!["md-1".into()],
        frequency: Some(Frequency::Defined),
        date_required_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        ..DataAccessRequestWrite::default()
    };
    let err = client.submit_access_request(&request).await.unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn backend_validation_details_reach_the_caller() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::POST,
        "/access-requests",
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "detail": [
            { "loc": ["body", "metadata_ids", 0], "msg": "unknown metadata", "type": "value_error" }
        ]}),
    );
    let (mut client, hooks) = logged_in(&backend);

    let request = DataAccessRequestWrite {
        metadata_ids: vec!["md-x".into()],
        ..DataAccessRequestWrite::default()
    };
    let err = client.submit_access_request(&request).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    let detail = err.detail();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].location, vec!["body", "metadata_ids", "0"]);
    assert_eq!(detail[0].message, "unknown metadata");

    let descriptor = err.descriptor();
    assert_eq!(descriptor.http_status, Some(422));
    assert_eq!(descriptor.code.as_deref(), Some("ERR_BAD_REQUEST"));
    assert!(hooks.redirects().is_empty());
}

#[tokio::test]
async fn access_request_is_grouped_into_sections() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/access-requests/dar-1",
        StatusCode::OK,
        access_request_json("dar-1"),
    );
    let (mut client, _hooks) = logged_in(&backend);

    let request = client.get_access_request("dar-1").await.unwrap();

    assert_eq!(request.requestor.given_name, "Sam");
    assert_eq!(request.requestor.organisation_name, "University");
    assert_eq!(request.project.title, "Koala corridors");
    assert_eq!(request.project.research.as_deref(), Some("Environmental Sciences"));
    assert_eq!(request.data.frequency, "Single once off");
    assert!(request.data.accept_transformed);
    assert_eq!(request.custodian_ids, vec!["org-1"]);
    assert!(!request.is_doi_editable);

    let dataset = &request.dataset_requests[0];
    assert_eq!(dataset.status, DatasetRequestStatus::New);
    assert!(!dataset.legal_agreement_signed);
    assert_eq!(dataset.audit.len(), 1);
}

#[tokio::test]
async fn access_requests_are_listed_per_role() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/access-requests/custodian",
        StatusCode::OK,
        json!({ "count": 1, "results": [access_request_json("dar-1")] }),
    );
    let (mut client, _hooks) = logged_in(&backend);

    let page = client
        .list_access_requests(AccessRequestRole::Custodian, &PageRequest::first(10))
        .await
        .unwrap();

    assert_eq!(page.results[0].id, "dar-1");
    assert_eq!(
        backend.last(Method::GET, "/access-requests/custodian").authorization.as_deref(),
        Some("Bearer token-1")
    );
}

#[tokio::test]
async fn dataset_actions_post_to_the_action_path() {
    let backend = MockBackend::start().await;
    let mut dataset = access_request_json("dar-1")["dataset_requests"][0].clone();
    dataset["status"] = json!("Data Agreement Sent");
    backend.on(
        Method::POST,
        "/access-requests/dar-1/dataset-requests/dr-1/agreement-sent",
        StatusCode::OK,
        dataset,
    );
    let (mut client, _hooks) = logged_in(&backend);

    let updated = client
        .action_dataset_request("dar-1", "dr-1", DatasetAction::AgreementSent)
        .await
        .unwrap();

    assert_eq!(updated.status, DatasetRequestStatus::DataAgreementSent);
}

#[tokio::test]
async fn doi_edits_prefer_the_backend_message() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::PATCH,
        "/access-requests/dar-1",
        StatusCode::BAD_REQUEST,
        json!({ "detail": "Request is not complete" }),
    );
    backend.on(
        Method::PATCH,
        "/access-requests/dar-2",
        StatusCode::INTERNAL_SERVER_ERROR,
        Value::Null,
    );
    let (mut client, _hooks) = logged_in(&backend);

    let err = client
        .edit_access_request_doi("dar-1", "10.1000/182")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Request is not complete");
    assert_eq!(
        backend.last(Method::PATCH, "/access-requests/dar-1").json(),
        json!({ "doi": "10.1000/182" })
    );

    let err = client
        .edit_access_request_doi("dar-2", "10.1000/182")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), UPDATE_ACCESS_REQUEST_FAILED);

    let err = client
        .edit_access_request_doi("dar-3", "not a doi")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(backend.requests().len(), 2);
}

#[tokio::test]
async fn registrations_are_filtered_and_actioned() {
    let backend = MockBackend::start().await;
    backend
        .on(
            Method::GET,
            "/register",
            StatusCode::OK,
            json!({ "count": 1, "results": [registration_json("reg-1", "New")] }),
        )
        .on(
            Method::POST,
            "/register/reg-1/approve",
            StatusCode::OK,
            registration_json("reg-1", "Approved"),
        )
        .on(
            Method::POST,
            "/register/reg-2/decline",
            StatusCode::OK,
            registration_json("reg-2", "Declined"),
        );
    let (mut client, _hooks) = logged_in(&backend);

    let page = client
        .list_registrations(&PageRequest::default(), Some(RegistrationStatus::New))
        .await
        .unwrap();
    assert_eq!(page.results[0].created_at_display(), "14/03/2023");
    assert!(
        backend
            .last(Method::GET, "/register")
            .query_pairs()
            .contains(&("status".into(), "New".into()))
    );

    let approved = client.approve_registration("reg-1", Some("org-7")).await.unwrap();
    assert_eq!(approved.status, RegistrationStatus::Accepted);
    assert_eq!(
        backend.last(Method::POST, "/register/reg-1/approve").query.as_deref(),
        Some("override_organisation_id=org-7")
    );

    let declined = client.decline_registration("reg-2", None).await.unwrap();
    assert_eq!(declined.status, RegistrationStatus::Declined);
    assert!(backend.last(Method::POST, "/register/reg-2/decline").query.is_none());
}

#[tokio::test]
async fn abn_lookup_uses_the_compact_number() {
    let backend = MockBackend::start().await;
    backend.on(
        Method::GET,
        "/abn/lookup/51824753556",
        StatusCode::OK,
        json!({ "Abn": "51824753556", "AbnStatus": "Active", "EntityName": "Example Pty Ltd" }),
    );
    let (mut client, _hooks) = anonymous_client(&backend);

    let lookup = client.lookup_abn("51 824 753 556").await.unwrap();
    assert!(lookup.is_active());
    assert_eq!(lookup.entity_name, "Example Pty Ltd");

    let err = client.lookup_abn("01 824 753 556").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn editing_the_users_own_organisation_updates_the_session() {
    let backend = MockBackend::start().await;
    let mut organisation = organisation_json("org-1");
    organisation["email"] = json!("new@science.gov.au");
    backend.on(Method::PATCH, "/organisations/org-1", StatusCode::OK, organisation);
    let (mut client, _hooks) = logged_in(&backend);

    client
        .edit_organisation("org-1", "new@science.gov.au")
        .await
        .unwrap();

    assert_eq!(
        backend.last(Method::PATCH, "/organisations/org-1").json(),
        json!({ "email": "new@science.gov.au" })
    );
    assert_eq!(
        client.session().session().organisation_email.as_deref(),
        Some("new@science.gov.au")
    );
}

#[tokio::test]
async fn unknown_resources_map_to_not_found() {
    let backend = MockBackend::start().await;
    let (mut client, hooks) = logged_in(&backend);

    let err = client.get_metadata("missing").await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound));
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(client.session().is_logged_in());
    assert!(hooks.redirects().is_empty());
}

#[tokio::test]
async fn vocabularies_are_fetched_from_their_own_paths() {
    use rasd_client::models::{
        access_request::AccessRequestVocabulary, metadata::MetadataVocabulary,
    };

    let backend = MockBackend::start().await;
    backend
        .on(
            Method::GET,
            "/metadata/security-classifications",
            StatusCode::OK,
            json!(["Unclassified", "Protected"]),
        )
        .on(
            Method::GET,
            "/access-requests/frequencies",
            StatusCode::OK,
            json!(["Single once off", "Defined period", "Ongoing"]),
        );
    let (mut client, _hooks) = anonymous_client(&backend);

    let classifications = client
        .metadata_vocabulary(MetadataVocabulary::SecurityClassifications)
        .await
        .unwrap();
    assert_eq!(classifications, vec!["Unclassified", "Protected"]);

    let frequencies = client
        .access_request_vocabulary(AccessRequestVocabulary::Frequencies)
        .await
        .unwrap();
    assert_eq!(frequencies.len(), 3);
}
