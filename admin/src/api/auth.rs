use super::{decode, ApiClient};
use crate::error::AppError;
use hostel_platform_shared::{
    AuthResponse, BusinessRecord, LoginRequest, Paginated, SwitchProfileRequest,
};
use uuid::Uuid;

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self.post("/auth/login", &body).await?;
        decode(value)
    }

    /// Businesses the authenticated user can operate; optional name filter.
    pub async fn my_businesses(
        &self,
        name: Option<&str>,
    ) -> Result<Paginated<BusinessRecord>, AppError> {
        let mut query = Vec::new();
        if let Some(name) = name {
            query.push(("name", name.to_string()));
        }
        let value = self.get("/businesses/my", &query).await?;
        decode(value)
    }

    pub async fn switch_profile(&self, business_id: Uuid) -> Result<AuthResponse, AppError> {
        let body = serde_json::to_value(SwitchProfileRequest { business_id })?;
        let value = self.post("/auth/switch-profile", &body).await?;
        decode(value)
    }
}
