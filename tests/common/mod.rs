#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rasd_client::{Config, RasdClient, UiHooks, store::SessionStore};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Captured {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.to_vec()).unwrap()
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }
}

#[derive(Default)]
struct MockState {
    responses: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
    captured: Mutex<Vec<Captured>>,
}

/// A throwaway backend on a random local port.
///
/// Responses are registered per method and path; anything unregistered gets
/// a 404 with a FastAPI-style `detail`.
pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn on(&self, method: Method, path: &str, status: StatusCode, body: Value) -> &Self {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
        self
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.captured.lock().unwrap().clone()
    }

    /// The latest request to `path`.
    pub fn last(&self, method: Method, path: &str) -> Captured {
        self.requests()
            .into_iter()
            .rev()
            .find(|c| c.method == method && c.path == path)
            .unwrap_or_else(|| panic!("no {} {} was received", method, path))
    }

    pub fn config(&self) -> Config {
        Config::new(self.base_url.clone())
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.captured.lock().unwrap().push(Captured {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    let response = state
        .responses
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned();

    match response {
        Some((status, Value::Null)) => status.into_response(),
        Some((status, body)) => (status, Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))).into_response(),
    }
}

/// Records what the client asked the UI to do.
#[derive(Default)]
pub struct RecordingHooks {
    redirects: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingHooks {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl UiHooks for RecordingHooks {
    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_string());
    }
}

pub fn client_with(backend: &MockBackend, store: SessionStore) -> (RasdClient, Arc<RecordingHooks>) {
    rasd_client::telemetry::init_tracing();
    let hooks = Arc::new(RecordingHooks::default());
    let client = RasdClient::with_store(&backend.config(), store, hooks.clone()).unwrap();
    (client, hooks)
}

pub fn anonymous_client(backend: &MockBackend) -> (RasdClient, Arc<RecordingHooks>) {
    client_with(backend, SessionStore::in_memory())
}

pub fn organisation_json(id: &str) -> Value {
    json!({
        "id": id,
        "active": true,
        "abn": "51824753556",
        "name": "Department of Science",
        "email": "data@science.gov.au"
    })
}

pub fn who_am_i_json(group: &str, organisation_id: &str) -> Value {
    json!({
        "id": "user-1",
        "email": "jane@example.org",
        "given_name": "Jane",
        "family_name": "Citizen",
        "groups": [group],
        "organisation_id": organisation_id
    })
}

pub fn metadata_json(id: &str) -> Value {
    json!({
        "id": id,
        "active": true,
        "title": "Koala sightings",
        "abstract": "Sightings across South East Queensland",
        "keywords": ["koala"],
        "locations": ["Brisbane"],
        "organisation_id": "org-1",
        "custodian": "Department of Science",
        "temporal_coverage_from": "2020-01-01",
        "temporal_coverage_to": "2021-01-01",
        "north_bounding_coordinate": -26,
        "south_bounding_coordinate": -28,
        "east_bounding_coordinate": 154,
        "west_bounding_coordinate": 152,
        "taxa_covered": "Phascolarctos cinereus",
        "collection_methods": ["Observation"],
        "data_source_doi": "10.1000/182",
        "data_source_url": null,
        "embargoed": true,
        "embargo_release_date": "2030-06-30",
        "contact_organisation": "Department of Science",
        "contact_position": "Data Officer",
        "contact_email": "data@science.gov.au",
        "stored_format": "CSV",
        "available_formats": ["CSV"],
        "access_rights": "Restricted",
        "use_restrictions": "Research only",
        "security_classification": "Unclassified",
        "generalisations": "None"
    })
}

pub fn access_request_json(id: &str) -> Value {
    json!({
        "id": id,
        "active": true,
        "created_at": "2023-03-14T05:06:07.000Z",
        "doi": null,
        "dataset_requests": [{
            "id": "dr-1",
            "status": "New",
            "metadata_id": "md-1",
            "metadata_title": "Koala sightings",
            "custodian_id": "org-1",
            "custodian_name": "Department of Science",
            "custodian_email": "data@science.gov.au",
            "audit": [{ "action": "Created", "by": "user-1", "at": "2023-03-14T05:06:07.000Z" }]
        }],
        "custodianIds": ["org-1"],
        "requestor_id": "user-2",
        "requestor_given_name": "Sam",
        "requestor_family_name": "Researcher",
        "requestor_email": "sam@uni.edu.au",
        "requestor_organisation_id": "org-2",
        "requestor_organisation_name": "University",
        "requestor_organisation_email": "research@uni.edu.au",
        "requestor_organisation_address": "1 University Drive",
        "requestor_organisation_indigenous_body": false,
        "project_title": "Koala corridors",
        "project_purpose": "For Research and development",
        "project_research": "Environmental Sciences",
        "project_commercial": false,
        "project_public_benefit_explanation": "Better planning",
        "data_requested": "All sightings",
        "data_relevance_explanation": "Habitat modelling",
        "data_frequency": "Single once off",
        "data_area": "Whole Dataset",
        "data_security_explanation": "Encrypted storage",
        "data_access": "Just me",
        "data_access_explanation": "",
        "data_distribution_explanation": "Not distributed",
        "data_accept_transformed": true
    })
}
