use super::{decode, ApiClient};
use crate::error::AppError;
use hostel_platform_shared::{
    ConfigureChargesRequest, Paginated, StudentRecord, UpdateStudentRequest,
};
use uuid::Uuid;

impl ApiClient {
    pub async fn list_students(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<Paginated<StudentRecord>, AppError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let value = self.get("/students", &query).await?;
        decode(value)
    }

    pub async fn update_student(
        &self,
        id: Uuid,
        request: &UpdateStudentRequest,
    ) -> Result<StudentRecord, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self.patch(&format!("/students/{}", id), &body).await?;
        decode(value)
    }

    /// Persist the full charge + guardian + academic payload and flip the
    /// student to configured.
    pub async fn configure_charges(
        &self,
        id: Uuid,
        request: &ConfigureChargesRequest,
    ) -> Result<StudentRecord, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self
            .post(&format!("/students/{}/configure-charges", id), &body)
            .await?;
        decode(value)
    }
}
