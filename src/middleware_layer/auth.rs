use http::StatusCode;

use crate::{error::ApiError, hooks::UiHooks, store::SessionStore, transport::HttpFacade};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. You need to login again.";
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged-in to perform this action.";

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Intercepts authentication failures on every response.
///
/// # Arguments
///
/// * `status` - The response status.
/// * `session` - The session store, cleared if a logged-in user was rejected.
/// * `http` - The facade whose authorization header is dropped with the session.
/// * `hooks` - Receives the redirect and the notification.
///
/// # Returns
///
/// `None` for anything but 401 and 403. Otherwise the tagged failure, after
/// the redirect to the login page and the notification have been issued.
pub fn catch_auth_error(
    status: StatusCode,
    session: &mut SessionStore,
    http: &mut HttpFacade,
    hooks: &dyn UiHooks,
) -> Option<ApiError> {
    if status != StatusCode::UNAUTHORIZED && status != StatusCode::FORBIDDEN {
        return None;
    }

    let session_expired = session.is_logged_in();
    let message = if session_expired {
        tracing::warn!("🔐 {} with an active session, logging out", status);
        session.clear();
        http.remove_auth_header();
        SESSION_EXPIRED_MESSAGE
    } else {
        tracing::warn!("🔐 {} without a session", status);
        LOGIN_REQUIRED_MESSAGE
    };

    hooks.redirect(LOGIN_PATH);
    hooks.notify_error(message);

    Some(ApiError::Unauthenticated {
        status,
        session_expired,
    })
}
