//! Client for the research data access platform.
//!
//! [`RasdClient`] owns the persisted session and the HTTP facade. Every
//! backend call goes through the auth interceptor, which clears the session
//! and sends the user to the login page when the backend rejects the token.

pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod router;
pub mod store;
pub mod telemetry;
pub mod transport;

pub mod models {
    pub mod abn;
    pub mod access_request;
    pub mod metadata;
    pub mod organisation;
    pub mod pagination;
    pub mod patch;
    pub mod registration;
    pub mod session;
    pub mod user;
}

pub mod middleware_layer {
    pub mod auth;
    pub mod guard;
}

pub mod validation {
    pub mod access_request;
    pub mod auth;
    pub mod fields;
    pub mod metadata;
    pub mod organisation;
}

pub mod services {
    pub mod abn;
    pub mod access_requests;
    pub mod auth;
    pub mod metadata;
    pub mod organisations;
    pub mod registrations;
}

pub use client::RasdClient;
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use hooks::{TracingHooks, UiHooks};
