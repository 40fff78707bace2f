use crate::api::ApiClient;
use crate::error::{AppError, FieldErrors};
use crate::models::booking::BookingKind;
use crate::models::{
    enhance_student, is_pending_configuration, Booking, ChargeConfiguration, EnhancedStudent,
    GuestProfile,
};
use crate::services::notification_service::NotificationCenter;
use crate::utils::validation::{is_blank, is_valid_email};
use hostel_platform_shared::{StudentRecord, UpdateStudentRequest, MAX_PAGE_SIZE};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;


/// Cached students read-view. The booking reconciliation service invalidates
/// it after approvals so student lists rendered afterwards include the newly
/// created records. No version check: the latest write wins.
#[derive(Clone, Default)]
pub struct StudentCache {
    inner: Arc<RwLock<Option<Vec<StudentRecord>>>>,
}

impl StudentCache {
    pub async fn get(&self) -> Option<Vec<StudentRecord>> {
        self.inner.read().await.clone()
    }

    pub async fn put(&self, students: Vec<StudentRecord>) {
        *self.inner.write().await = Some(students);
    }

    pub async fn invalidate(&self) {
        *self.inner.write().await = None;
        debug!("Students read-view invalidated");
    }
}

/// Charge configuration engine and student read/update operations.
#[derive(Clone)]
pub struct StudentService {
    api: ApiClient,
    cache: StudentCache,
    notifications: NotificationCenter,
}

impl StudentService {
    pub fn new(api: ApiClient, cache: StudentCache, notifications: NotificationCenter) -> Self {
        Self {
            api,
            cache,
            notifications,
        }
    }

    /// All students, served from the cached read-view when warm.
    pub async fn list_students(&self, force_refresh: bool) -> Result<Vec<StudentRecord>, AppError> {
        if !force_refresh {
            if let Some(cached) = self.cache.get().await {
                return Ok(cached);
            }
        }

        let mut students = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.api.list_students(page, MAX_PAGE_SIZE).await?;
            students.extend(batch.items);
            if page >= batch.pagination.total_pages || batch.pagination.total_pages == 0 {
                break;
            }
            page += 1;
        }

        self.cache.put(students.clone()).await;
        Ok(students)
    }

    /// Students merged with their matching booking guest data.
    pub async fn list_enhanced(&self) -> Result<Vec<EnhancedStudent>, AppError> {
        let students = self.list_students(false).await?;
        let profiles = self.guest_profiles().await?;

        Ok(students
            .iter()
            .map(|s| enhance_student(s, &profiles))
            .collect())
    }

    /// Students still awaiting charge configuration. Gated on the
    /// `is_configured` flag, never the status enum.
    pub async fn pending_configuration(&self) -> Result<Vec<StudentRecord>, AppError> {
        let students = self.list_students(false).await?;
        Ok(students
            .into_iter()
            .filter(|s| is_pending_configuration(s))
            .collect())
    }

    /// Complete a student's charge configuration. Preconditions are checked
    /// locally; a violation returns the field-keyed error map and performs no
    /// mutation. On success the backend persists the charges, guardian, and
    /// academic blocks and flips `is_configured`.
    pub async fn configure(
        &self,
        student_id: Uuid,
        charges: &ChargeConfiguration,
    ) -> Result<StudentRecord, AppError> {
        let errors = charges.validate();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let request = charges.to_request();
        let student = self.api.configure_charges(student_id, &request).await?;
        self.cache.invalidate().await;

        info!(
            "Configured charges for student {} (total {}/month)",
            student_id, request.total_monthly_fee
        );
        self.notifications
            .success(
                "Student configured",
                &format!(
                    "{} is now active with a monthly fee of {}",
                    student.name, request.total_monthly_fee
                ),
            )
            .await;

        Ok(student)
    }

    /// Partial update independent of charge reconfiguration. Identity fields
    /// are validated only when the patch includes them.
    pub async fn update(
        &self,
        student_id: Uuid,
        patch: &UpdateStudentRequest,
    ) -> Result<StudentRecord, AppError> {
        let errors = validate_patch(patch);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let student = self.api.update_student(student_id, patch).await?;
        self.cache.invalidate().await;
        debug!("Updated student {}", student_id);
        Ok(student)
    }

    /// Collect guest profiles from all bookings for the enhanced merge. The
    /// contact email is trusted as a match key only for single-guest bookings
    /// where the guest was synthesized from the contact person.
    async fn guest_profiles(&self) -> Result<Vec<GuestProfile>, AppError> {
        let mut profiles = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.api.list_bookings(page, MAX_PAGE_SIZE).await?;
            let total_pages = batch.pagination.total_pages;

            for record in batch.items {
                let booking = Booking::from_record(record);
                for guest in &booking.guests {
                    profiles.push(GuestProfile {
                        guest_name: guest.guest_name.clone(),
                        email: match booking.kind {
                            BookingKind::Single => Some(booking.contact.email.clone()),
                            BookingKind::Multi => None,
                        },
                        bed_id: Some(guest.bed_id.clone()).filter(|b| !b.is_empty()),
                        room_number: None,
                        address: None,
                        guardian_name: None,
                        guardian_phone: guest.emergency_contact.clone(),
                        guardian_relation: None,
                        course: None,
                        institution: None,
                    });
                }
            }

            if page >= total_pages || total_pages == 0 {
                break;
            }
            page += 1;
        }
        Ok(profiles)
    }
}

fn validate_patch(patch: &UpdateStudentRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = &patch.name {
        if is_blank(name) {
            errors.insert("name".to_string(), "Name cannot be empty".to_string());
        }
    }
    if let Some(phone) = &patch.phone {
        if is_blank(phone) {
            errors.insert("phone".to_string(), "Phone cannot be empty".to_string());
        }
    }
    if let Some(email) = &patch.email {
        if !is_valid_email(email) {
            errors.insert("email".to_string(), "A valid email is required".to_string());
        }
    }
    errors
}
