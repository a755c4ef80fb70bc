use serde::Deserialize;
use zeroize::Zeroizing;

use crate::{
    client::RasdClient,
    error::{ApiError, ApiResult},
    models::user::WhoAmI,
    validation::auth::{validate_password, validate_username},
};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email address or password";
pub const USER_DETAILS_MESSAGE: &str = "Unable to retrieve user details.";
pub const ORGANISATION_DETAILS_MESSAGE: &str = "Unable to retrieve user organisation details.";

/// The identity provider's token response, relayed as-is.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResponse {
    #[serde(default)]
    id_token: Option<String>,
}

impl RasdClient {
    /// Logs a user in.
    ///
    /// The login only counts as complete once the user's identity and
    /// organisation have been fetched into the session.
    ///
    /// # Arguments
    ///
    /// * `username` - The user's email address.
    /// * `password` - The user's password.
    ///
    /// # Returns
    ///
    /// `Ok(())` with the session populated, or the failure of whichever step
    /// went wrong.
    pub async fn login(&mut self, username: &str, password: &str) -> ApiResult<()> {
        tracing::info!("🔐 Login attempt for {}", username);
        let password = Zeroizing::new(password.to_owned());

        let request = self
            .http
            .post("/auth/login")
            .form(&[("username", username), ("password", password.as_str())]);

        let response: LoginResponse = self
            .fetch(request)
            .await
            .map_err(|e| e.context(INVALID_CREDENTIALS_MESSAGE))?;

        let token = Zeroizing::new(response.id_token.unwrap_or_default());
        if token.is_empty() {
            tracing::warn!("❌ Login response carried no token for {}", username);
            return Err(ApiError::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        self.http.set_auth_header(&token);
        self.session.set_id_token(token.as_str());

        self.refresh_user_data().await?;
        tracing::info!("✅ User logged in: {}", username);
        Ok(())
    }

    /// Fetches the current user's identity.
    pub async fn who_am_i(&mut self) -> ApiResult<WhoAmI> {
        if !self.session.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }
        let request = self.http.get("/auth/whoami");
        self.fetch(request).await
    }

    /// Reloads the identity and organisation details of the logged-in user
    /// into the session.
    pub async fn refresh_user_data(&mut self) -> ApiResult<()> {
        if !self.session.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }

        let who = self
            .who_am_i()
            .await
            .map_err(|e| e.context(USER_DETAILS_MESSAGE))?;
        self.session.set_from_who_am_i(&who);

        let organisation = self
            .get_organisation(&who.organisation_id)
            .await
            .map_err(|e| e.context(ORGANISATION_DETAILS_MESSAGE))?;
        self.session.set_user_organisation_details(&organisation);

        tracing::debug!("✅ User data refreshed for {}", who.email);
        Ok(())
    }

    /// Sets a permanent password using the temporary one from the invitation email.
    pub async fn create_password(
        &mut self,
        username: &str,
        temp_password: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        validate_username(username)?;
        validate_password(new_password)?;

        let request = self.http.post("/auth/password/set").form(&[
            ("username", username),
            ("temp_password", temp_password),
            ("new_password", new_password),
        ]);
        self.send_unit(request).await?;

        tracing::info!("✅ Password set for {}", username);
        Ok(())
    }

    /// Starts the forgotten password flow. The backend emails a code.
    pub async fn forgot_password(&mut self, username: &str) -> ApiResult<()> {
        validate_username(username)?;

        let request = self
            .http
            .post("/auth/password/forgot")
            .form(&[("username", username)]);
        self.send_unit(request).await?;

        tracing::info!("📧 Password reset code sent to {}", username);
        Ok(())
    }

    pub async fn confirm_forgot_password(
        &mut self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> ApiResult<()> {
        validate_username(username)?;
        validate_password(new_password)?;

        let request = self.http.post("/auth/password/forgot/confirm").form(&[
            ("username", username),
            ("code", code),
            ("password", new_password),
        ]);
        self.send_unit(request).await?;

        tracing::info!("✅ Password reset for {}", username);
        Ok(())
    }

    /// Changes the password of the logged-in user.
    pub async fn change_password(&mut self, old_password: &str, new_password: &str) -> ApiResult<()> {
        if !self.session.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }
        validate_password(new_password)?;

        let request = self.http.post("/auth/password/change").form(&[
            ("old_password", old_password),
            ("new_password", new_password),
        ]);
        self.send_unit(request).await
    }

    /// Clears the session and stops sending the bearer token.
    pub fn logout(&mut self) {
        self.session.clear();
        self.http.remove_auth_header();
        tracing::info!("👋 Logged out");
    }
}
