use crate::{
    client::RasdClient,
    middleware_layer::auth::LOGIN_PATH,
    models::{session::Session, user::UserGroup},
    router::{Route, RouteAccess},
};

pub const UNAUTHORISED_MESSAGE: &str = "You are not authorised to access this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    LoginRequired,
    AdministratorRequired,
    DataCustodianRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny(DenyReason),
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed(Route),
    /// The original target is dropped; there is no return-to page.
    Redirected { from: Route, to: Route },
    NotFound(String),
}

/// Decides whether `session` may enter a route with `access`.
///
/// Rules are checked in order: login, then administrator, then data custodian
/// (administrators pass the custodian check too). Only the primary group counts.
pub fn check_access(session: &Session, access: RouteAccess) -> GuardDecision {
    let group = session.primary_group();

    if access.requires_login && !session.is_logged_in() {
        return GuardDecision::Deny(DenyReason::LoginRequired);
    }
    if access.requires_admin && group != Some(UserGroup::Administrators) {
        return GuardDecision::Deny(DenyReason::AdministratorRequired);
    }
    if access.requires_data_custodian
        && !matches!(
            group,
            Some(UserGroup::Administrators | UserGroup::DataCustodians)
        )
    {
        return GuardDecision::Deny(DenyReason::DataCustodianRequired);
    }
    GuardDecision::Allow
}

impl RasdClient {
    /// Runs the route guard for a navigation to `path`.
    ///
    /// On denial the user is notified and redirected to the login page.
    pub fn navigate(&self, path: &str) -> Navigation {
        let Some(route) = Route::parse(path) else {
            tracing::debug!("❓ No route for {}", path);
            return Navigation::NotFound(path.to_string());
        };

        match check_access(self.session.session(), route.access()) {
            GuardDecision::Allow => Navigation::Proceed(route),
            GuardDecision::Deny(reason) => {
                tracing::warn!("🚫 {} denied: {:?}", route.path(), reason);
                self.hooks.notify_error(UNAUTHORISED_MESSAGE);
                self.hooks.redirect(LOGIN_PATH);
                Navigation::Redirected {
                    from: route,
                    to: Route::Login,
                }
            }
        }
    }
}
