use crate::api::ApiClient;
use crate::error::{AppError, FieldErrors};
use crate::session::SessionStore;
use hostel_platform_shared::{BusinessRecord, LoginRequest};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

mod tests;

/// Login and business-selection flow over the session store. Tokens are
/// opaque strings minted by the backend; this service only stores and scopes
/// them.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Authenticate and persist the user token. Credentials are validated
    /// locally first; a malformed email never reaches the backend.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        if let Err(errors) = request.validate() {
            return Err(AppError::Validation(flatten(errors)));
        }

        let response = self.api.login(&request).await?;
        self.session.store_login(response.access_token).await?;
        info!("Logged in with role {}", response.role);
        Ok(())
    }

    /// Businesses the user can operate, optionally filtered by name.
    pub async fn businesses(&self, name: Option<&str>) -> Result<Vec<BusinessRecord>, AppError> {
        Ok(self.api.my_businesses(name).await?.items)
    }

    /// Scope the session to one business: exchange the user token for a
    /// business token and remember the selection.
    pub async fn select_business(&self, business: BusinessRecord) -> Result<(), AppError> {
        let response = self.api.switch_profile(business.id).await?;
        self.session
            .store_business(response.access_token, business.clone())
            .await?;
        info!("Operating as business {}", business.name);
        Ok(())
    }

    /// Drop only the business scope, back to the user session.
    pub async fn switch_business(&self) -> Result<(), AppError> {
        self.session.clear_business().await
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear().await?;
        info!("Logged out");
        Ok(())
    }
}

fn flatten(errors: validator::ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        if let Some(first) = errs.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            map.insert(field.to_string(), message);
        }
    }
    map
}
