use crate::models::user::UserGroup;

/// Access requirements of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteAccess {
    pub requires_login: bool,
    pub requires_admin: bool,
    /// Data custodians and administrators only.
    pub requires_data_custodian: bool,
}

impl RouteAccess {
    const PUBLIC: RouteAccess = RouteAccess {
        requires_login: false,
        requires_admin: false,
        requires_data_custodian: false,
    };
    const LOGIN: RouteAccess = RouteAccess {
        requires_login: true,
        requires_admin: false,
        requires_data_custodian: false,
    };
    const ADMIN: RouteAccess = RouteAccess {
        requires_login: true,
        requires_admin: true,
        requires_data_custodian: false,
    };
    const CUSTODIAN: RouteAccess = RouteAccess {
        requires_login: true,
        requires_admin: false,
        requires_data_custodian: true,
    };
}

/// Every navigable page of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    CreatePassword,
    /// Checks login itself, so it stays public here.
    Tools,
    ForgotPassword,
    ForgotPasswordConfirm,
    Search,
    About,
    AddOrganisation,
    Organisations,
    Organisation(String),
    MetadataList,
    AddMetadata,
    Metadata(String),
    PrivacyNotice,
    TermsOfUse,
    RegisterDataCustodian,
    RegisterDataRequestor,
    RegistrationRequests,
    DataAccessRequest,
    DataAccessRequestView,
    DataAccessRequestEdit,
    DataAccessRequestAdmin,
    DataAccessRequestPublic(String),
}

impl Route {
    /// Resolves a path to its route. Query strings, fragments and a trailing
    /// slash are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let route = match segments.as_slice() {
            [""] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["create-password"] => Route::CreatePassword,
            ["tools"] => Route::Tools,
            ["forgot-password"] => Route::ForgotPassword,
            ["forgot-password", "confirm"] => Route::ForgotPasswordConfirm,
            ["search"] => Route::Search,
            ["about"] => Route::About,
            ["organisations"] => Route::Organisations,
            ["organisations", "add"] => Route::AddOrganisation,
            ["organisations", id] if !id.is_empty() => Route::Organisation(id.to_string()),
            ["metadata"] => Route::MetadataList,
            ["metadata", "add"] => Route::AddMetadata,
            ["metadata", id] if !id.is_empty() => Route::Metadata(id.to_string()),
            ["privacy-notice"] => Route::PrivacyNotice,
            ["terms-of-use"] => Route::TermsOfUse,
            ["register", "data-custodian"] => Route::RegisterDataCustodian,
            ["register", "data-requestor"] => Route::RegisterDataRequestor,
            ["registrations", "registration-requests"] => Route::RegistrationRequests,
            ["data-access-request"] => Route::DataAccessRequest,
            ["data-access-request", "view"] => Route::DataAccessRequestView,
            ["data-access-request", "edit"] => Route::DataAccessRequestEdit,
            ["data-access-request", "admin"] => Route::DataAccessRequestAdmin,
            ["data-access-request", "public", id] if !id.is_empty() => {
                Route::DataAccessRequestPublic(id.to_string())
            }
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Organisation(id) => format!("/organisations/{}", id),
            Route::Metadata(id) => format!("/metadata/{}", id),
            Route::DataAccessRequestPublic(id) => format!("/data-access-request/public/{}", id),
            other => other.static_path().to_string(),
        }
    }

    fn static_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::CreatePassword => "/create-password",
            Route::Tools => "/tools",
            Route::ForgotPassword => "/forgot-password",
            Route::ForgotPasswordConfirm => "/forgot-password/confirm",
            Route::Search => "/search",
            Route::About => "/about",
            Route::AddOrganisation => "/organisations/add",
            Route::Organisations => "/organisations",
            Route::MetadataList => "/metadata",
            Route::AddMetadata => "/metadata/add",
            Route::PrivacyNotice => "/privacy-notice",
            Route::TermsOfUse => "/terms-of-use",
            Route::RegisterDataCustodian => "/register/data-custodian",
            Route::RegisterDataRequestor => "/register/data-requestor",
            Route::RegistrationRequests => "/registrations/registration-requests",
            Route::DataAccessRequest => "/data-access-request",
            Route::DataAccessRequestView => "/data-access-request/view",
            Route::DataAccessRequestEdit => "/data-access-request/edit",
            Route::DataAccessRequestAdmin => "/data-access-request/admin",
            Route::Organisation(_) => "/organisations/:id",
            Route::Metadata(_) => "/metadata/:id",
            Route::DataAccessRequestPublic(_) => "/data-access-request/public/:id",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Login => "login",
            Route::Register => "register",
            Route::CreatePassword => "create-password",
            Route::Tools => "tools",
            Route::ForgotPassword => "forgot-password",
            Route::ForgotPasswordConfirm => "forgot-password/confirm",
            Route::Search => "search",
            Route::About => "about",
            Route::AddOrganisation => "add-organisation",
            Route::Organisations => "organisations",
            Route::Organisation(_) => "organisation",
            Route::MetadataList => "metadata-list",
            Route::AddMetadata => "add-metadata",
            Route::Metadata(_) => "metadata-view",
            Route::PrivacyNotice => "privacy-notice",
            Route::TermsOfUse => "terms-of-use",
            Route::RegisterDataCustodian => "register-data-custodian",
            Route::RegisterDataRequestor => "register-data-requestor",
            Route::RegistrationRequests => "assess-organisation-requests",
            Route::DataAccessRequest => "data-access-request",
            Route::DataAccessRequestView => "data-access-request-view",
            Route::DataAccessRequestEdit => "data-access-request-edit",
            Route::DataAccessRequestAdmin => "data-access-request-admin",
            Route::DataAccessRequestPublic(_) => "data-access-request-public",
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::AddOrganisation
            | Route::Organisations
            | Route::Organisation(_)
            | Route::RegistrationRequests
            | Route::DataAccessRequestAdmin => RouteAccess::ADMIN,
            Route::MetadataList
            | Route::AddMetadata
            | Route::Metadata(_)
            | Route::DataAccessRequestEdit => RouteAccess::CUSTODIAN,
            Route::DataAccessRequest | Route::DataAccessRequestView => RouteAccess::LOGIN,
            _ => RouteAccess::PUBLIC,
        }
    }

    /// The group a page acts on behalf of, for pages shared between roles.
    pub fn role(&self) -> Option<UserGroup> {
        match self {
            Route::RegisterDataCustodian | Route::DataAccessRequestEdit => {
                Some(UserGroup::DataCustodians)
            }
            Route::RegisterDataRequestor | Route::DataAccessRequestView => {
                Some(UserGroup::DataRequestors)
            }
            Route::DataAccessRequestAdmin => Some(UserGroup::Administrators),
            _ => None,
        }
    }
}
