use hostel_platform_shared::{StudentRecord, StudentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile data captured on a booking guest, used to enrich the matching
/// student record. Contact fields on guests may be synthesized placeholders,
/// which is why identity never flows from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestProfile {
    pub guest_name: String,
    pub email: Option<String>,
    pub bed_id: Option<String>,
    pub room_number: Option<String>,
    pub address: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relation: Option<String>,
    pub course: Option<String>,
    pub institution: Option<String>,
}

/// Merged read view over a core student record and its matching booking
/// guest.
///
/// Field precedence:
///
/// | field                          | source                         |
/// |--------------------------------|--------------------------------|
/// | id, name, phone, email, status | student record, always         |
/// | is_configured                  | student record, always         |
/// | room/bed, address              | matched guest, else student    |
/// | guardian block                 | matched guest, else student    |
/// | course, institution            | matched guest, else student    |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedStudent {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub status: StudentStatus,
    pub is_configured: bool,

    pub room_number: Option<String>,
    pub bed_id: Option<String>,
    pub address: Option<String>,

    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_relation: Option<String>,

    pub course: Option<String>,
    pub institution: Option<String>,

    pub total_monthly_fee: Option<Decimal>,

    /// Whether a booking guest matched this student.
    pub matched_guest: bool,
}

/// Match a student to a booking guest: by name first (case-insensitive,
/// trimmed), then by email.
fn find_matching_guest<'a>(
    student: &StudentRecord,
    guests: &'a [GuestProfile],
) -> Option<&'a GuestProfile> {
    let name = student.name.trim();
    guests
        .iter()
        .find(|g| g.guest_name.trim().eq_ignore_ascii_case(name))
        .or_else(|| {
            guests.iter().find(|g| {
                g.email
                    .as_deref()
                    .map_or(false, |e| e.eq_ignore_ascii_case(student.email.trim()))
            })
        })
}

/// Build the merged read view. Identity fields (`id`, `name`, `phone`,
/// `email`) come from the student record unconditionally; guest data never
/// overwrites them.
pub fn enhance_student(student: &StudentRecord, guests: &[GuestProfile]) -> EnhancedStudent {
    let guest = find_matching_guest(student, guests);

    let pick = |from_guest: Option<String>, fallback: &Option<String>| {
        from_guest.or_else(|| fallback.clone())
    };

    EnhancedStudent {
        id: student.id,
        name: student.name.clone(),
        phone: student.phone.clone(),
        email: student.email.clone(),
        status: student.status,
        is_configured: student.is_configured,

        room_number: pick(
            guest.and_then(|g| g.room_number.clone()),
            &student.room_number,
        ),
        bed_id: pick(guest.and_then(|g| g.bed_id.clone()), &student.bed_id),
        address: pick(guest.and_then(|g| g.address.clone()), &student.address),

        guardian_name: pick(
            guest.and_then(|g| g.guardian_name.clone()),
            &student.guardian_name,
        ),
        guardian_phone: pick(
            guest.and_then(|g| g.guardian_phone.clone()),
            &student.guardian_phone,
        ),
        guardian_relation: pick(
            guest.and_then(|g| g.guardian_relation.clone()),
            &student.guardian_relation,
        ),

        course: pick(guest.and_then(|g| g.course.clone()), &student.course),
        institution: pick(
            guest.and_then(|g| g.institution.clone()),
            &student.institution,
        ),

        total_monthly_fee: student.total_monthly_fee,
        matched_guest: guest.is_some(),
    }
}

/// The authoritative pending/active gate is the `is_configured` flag. The
/// status enum is not sufficient: an `Active` student without completed
/// charge configuration is still pending.
pub fn is_pending_configuration(student: &StudentRecord) -> bool {
    !student.is_configured
}
