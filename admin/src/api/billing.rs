use super::{decode, ApiClient};
use crate::error::AppError;
use hostel_platform_shared::{
    GenerateMonthlyRequest, GenerateMonthlyResponse, InvoiceRecord, MonthlyStatsResponse,
    StudentRecord,
};
use serde_json::json;

impl ApiClient {
    pub async fn monthly_stats(
        &self,
        month: u32,
        year: i32,
    ) -> Result<MonthlyStatsResponse, AppError> {
        let query = [("month", month.to_string()), ("year", year.to_string())];
        let value = self.get("/billing/monthly-stats", &query).await?;
        decode(value)
    }

    pub async fn generate_monthly(
        &self,
        request: &GenerateMonthlyRequest,
    ) -> Result<GenerateMonthlyResponse, AppError> {
        let body = serde_json::to_value(request)?;
        let value = self.post("/billing/generate-monthly", &body).await?;
        decode(value)
    }

    /// Students with completed charge configuration, ready for invoicing.
    pub async fn students_ready(&self) -> Result<Vec<StudentRecord>, AppError> {
        let value = self.get("/billing/students-ready", &[]).await?;
        decode(value)
    }

    pub async fn overdue_invoices(&self) -> Result<Vec<InvoiceRecord>, AppError> {
        let value = self.get("/invoices/overdue/list", &[]).await?;
        decode(value)
    }

    pub async fn send_pending_invoices(&self, month: u32, year: i32) -> Result<(), AppError> {
        let body = json!({ "month": month, "year": year });
        self.post("/invoices/send-pending", &body).await?;
        Ok(())
    }

    pub async fn retry_failed_invoices(
        &self,
        month: u32,
        year: i32,
    ) -> Result<GenerateMonthlyResponse, AppError> {
        let body = json!({ "month": month, "year": year });
        let value = self.post("/billing/retry-failed", &body).await?;
        decode(value)
    }
}
