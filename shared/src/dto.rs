use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Pagination

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages", default)]
    pub total_pages: i64,
}

/// Backend list responses arrive as `{items, pagination}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

// Auth DTOs

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchProfileRequest {
    pub business_id: Uuid,
}

// Booking DTOs

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactPersonPayload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GuestPayload {
    #[validate(length(min = 1))]
    pub bed_id: String,

    #[validate(length(min = 1, max = 255))]
    pub guest_name: String,

    #[validate(range(min = 1, max = 120))]
    pub age: i32,

    pub gender: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_proof_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_proof_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Unified multi-guest submission payload. Single-guest bookings are posted
/// with a one-element guest list; the wrapping `{data: ...}` envelope is
/// applied by the API client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate]
    pub contact_person: ContactPersonPayload,

    #[validate(length(min = 1))]
    pub guests: Vec<GuestPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BookingSource>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBookingRequest {
    pub create_student: bool,
    pub processed_by: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RejectBookingRequest {
    #[validate(length(min = 1))]
    pub reason: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    #[validate(length(min = 1))]
    pub reason: String,
    pub processed_by: String,
}

/// Guest as stored on a booking record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub bed_id: String,
    pub guest_name: String,
    pub age: i32,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub id_proof_type: Option<String>,
    #[serde(default)]
    pub id_proof_number: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: GuestStatus,
}

/// Raw booking record as the backend returns it. Two historical shapes share
/// this DTO: multi-guest records carry a `guests` array, legacy single-guest
/// records carry a bare `bedId` with contact-as-guest. Ingestion into the
/// tagged domain model happens exactly once, in `hostel-admin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: Uuid,
    pub booking_reference: String,

    #[serde(alias = "name", alias = "contactName")]
    pub contact_name: String,
    pub phone: String,
    pub email: String,

    #[serde(default)]
    pub guests: Option<Vec<GuestRecord>>,
    #[serde(default)]
    pub bed_id: Option<String>,

    pub status: BookingStatus,

    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub source: Option<BookingSource>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub processed_by: Option<String>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestAssignmentFailure {
    pub guest_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBookingResponse {
    pub booking: BookingRecord,
    #[serde(default)]
    pub failed_assignments: Vec<GuestAssignmentFailure>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingStatsResponse {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub confirmed: i64,
    pub rejected: i64,
    pub cancelled: i64,
}

// Student DTOs

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub status: StudentStatus,

    #[serde(default)]
    pub is_configured: bool,

    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub bed_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub guardian_phone: Option<String>,
    #[serde(default)]
    pub guardian_relation: Option<String>,

    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,

    #[serde(default)]
    pub total_monthly_fee: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalChargePayload {
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GuardianPayload {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub phone: String,

    #[validate(length(min = 1))]
    pub relation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AcademicPayload {
    #[validate(length(min = 1))]
    pub course: String,

    #[validate(length(min = 1))]
    pub institution: String,
}

/// Full charge-configuration payload persisted on the student record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureChargesRequest {
    pub base_monthly_fee: Decimal,
    pub laundry_fee: Decimal,
    pub food_fee: Decimal,
    pub wifi_fee: Decimal,
    pub maintenance_fee: Decimal,
    pub security_deposit: Decimal,
    pub additional_charges: Vec<AdditionalChargePayload>,
    pub total_monthly_fee: Decimal,
    pub guardian: GuardianPayload,
    pub academic: AcademicPayload,
}

/// Partial student update; only present fields are patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StudentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_relation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

// Billing DTOs

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMonthlyRequest {
    pub month: u32,
    pub year: i32,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    #[serde(default)]
    pub student_name: Option<String>,
    pub amount: Decimal,
    pub month: u32,
    pub year: i32,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMonthlyResponse {
    pub success: bool,
    pub generated: i64,
    pub failed: i64,
    pub total_amount: Decimal,
    #[serde(default)]
    pub invoices: Vec<InvoiceRecord>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStatsResponse {
    pub month: u32,
    pub year: i32,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub pending_invoices: i64,
    pub overdue_invoices: i64,
    pub total_amount: Decimal,
    pub collected_amount: Decimal,
}

// Reporting DTOs

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceSummaryResponse {
    pub date: Option<NaiveDate>,
    pub total_students: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub unmarked: i64,
}
