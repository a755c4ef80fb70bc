use http::{Method, StatusCode, header};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use zeroize::Zeroizing;

use crate::error::{ApiError, ApiResult, ValidationDetail};

/// Thin wrapper over `reqwest::Client` bound to the backend base URL.
///
/// Holds the bearer token that every outgoing request carries once a user has
/// logged in. The token is wiped from memory when it is replaced or removed.
pub struct HttpFacade {
    http: Client,
    base_url: String,
    bearer: Option<Zeroizing<String>>,
}

impl HttpFacade {
    /// Creates a facade for the backend at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend root, without a trailing slash.
    ///
    /// # Returns
    ///
    /// The facade, or `ApiError::Network` if the TLS backend cannot start.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("rasd-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            bearer: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attaches `token` to every subsequent request. An empty token removes
    /// the header instead.
    pub fn set_auth_header(&mut self, token: &str) {
        if token.is_empty() {
            self.remove_auth_header();
            return;
        }
        self.bearer = Some(Zeroizing::new(token.to_owned()));
        tracing::debug!("🔑 Authorization header set");
    }

    pub fn remove_auth_header(&mut self) {
        if self.bearer.take().is_some() {
            tracing::debug!("🔑 Authorization header removed");
        }
    }

    pub fn has_auth_header(&self) -> bool {
        self.bearer.is_some()
    }

    /// Starts a request to `path`, relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("➡️ {} {}", method, url);

        let builder = self.http.request(method, url);
        match &self.bearer {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }
}

/// Encodes `body` as the JSON payload of `builder`.
pub(crate) fn json_body<T: Serialize + ?Sized>(
    builder: RequestBuilder,
    body: &T,
) -> ApiResult<RequestBuilder> {
    let bytes = sonic_rs::to_vec(body)
        .map_err(|e| ApiError::Validation(format!("Request body could not be encoded: {}", e)))?;

    Ok(builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(bytes))
}

/// Reads the whole body of a successful response and decodes it.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    sonic_rs::from_slice(&bytes).map_err(|e| {
        tracing::warn!("❌ Unexpected response body: {}", e);
        ApiError::Decode(e.to_string())
    })
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Items(Vec<RawValidationDetail>),
}

#[derive(Deserialize)]
struct RawValidationDetail {
    #[serde(default)]
    loc: Vec<LocationPart>,
    msg: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationPart {
    Key(String),
    Index(i64),
}

impl From<RawValidationDetail> for ValidationDetail {
    fn from(raw: RawValidationDetail) -> Self {
        ValidationDetail {
            location: raw
                .loc
                .into_iter()
                .map(|part| match part {
                    LocationPart::Key(key) => key,
                    LocationPart::Index(index) => index.to_string(),
                })
                .collect(),
            message: raw.msg,
            kind: raw.kind,
        }
    }
}

/// Turns a non-success response into the matching `ApiError`.
///
/// A `detail` string becomes the message; a `detail` list becomes the
/// validation details. Bodies of any other shape are ignored.
pub(crate) async fn rejection(response: Response) -> ApiError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound;
    }

    let (message, detail) = error_body(status, response.bytes().await);

    tracing::warn!("❌ Request failed with {}", status);
    ApiError::Rejected {
        status,
        message,
        detail,
    }
}

/// Extracts the message or validation details from an error body. A body
/// that cannot be read or parsed yields neither.
fn error_body(
    status: StatusCode,
    body: reqwest::Result<impl AsRef<[u8]>>,
) -> (Option<String>, Vec<ValidationDetail>) {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("❌ Body of the {} response could not be read: {}", status, e);
            return (None, Vec::new());
        }
    };

    match sonic_rs::from_slice::<ErrorBody>(body.as_ref()) {
        Ok(ErrorBody {
            detail: Some(ErrorDetail::Message(message)),
        }) => (Some(message), Vec::new()),
        Ok(ErrorBody {
            detail: Some(ErrorDetail::Items(items)),
        }) => (None, items.into_iter().map(ValidationDetail::from).collect()),
        _ => (None, Vec::new()),
    }
}

/// Keeps only the query parameters that carry a value.
pub fn strip_null_params<I, K, V>(params: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    params
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key.into(), value.into())))
        .collect()
}
