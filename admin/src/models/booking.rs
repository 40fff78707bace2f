use crate::error::FieldErrors;
use crate::utils::validation::{is_blank, is_valid_email};
use chrono::{DateTime, NaiveDate, Utc};
use hostel_platform_shared::{
    BookingRecord, BookingSource, BookingStatus, CreateBookingRequest, GuestStatus, MAX_GUEST_AGE,
    MIN_GUEST_AGE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Which historical wire shape a booking arrived in. Decided exactly once at
/// ingestion; nothing downstream re-sniffs the record for a guests array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    Single,
    Multi,
}

/// The paying/responsible party. Always present, even for single-guest
/// bookings where the contact booked for themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub bed_id: String,
    pub guest_name: String,
    pub age: i32,
    pub gender: Option<String>,
    pub id_proof_type: Option<String>,
    pub id_proof_number: Option<String>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
    pub status: GuestStatus,
}

/// Unified view over single- and multi-guest booking records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub booking_reference: String,
    pub kind: BookingKind,
    pub contact: Contact,
    pub guests: Vec<Guest>,
    pub status: BookingStatus,
    pub check_in_date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub source: Option<BookingSource>,
    pub reason: Option<String>,
    pub processed_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Ingest a raw backend record into the tagged domain shape.
    ///
    /// A record carrying a `guests` array is a multi-guest booking; a legacy
    /// record without one is single-guest, represented as a one-element guest
    /// list with a guest synthesized from the contact person.
    pub fn from_record(record: BookingRecord) -> Self {
        let contact = Contact {
            name: record.contact_name.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
        };

        let (kind, guests) = match record.guests {
            Some(guests) => (
                BookingKind::Multi,
                guests
                    .into_iter()
                    .map(|g| Guest {
                        bed_id: g.bed_id,
                        guest_name: g.guest_name,
                        age: g.age,
                        gender: g.gender,
                        id_proof_type: g.id_proof_type,
                        id_proof_number: g.id_proof_number,
                        emergency_contact: g.emergency_contact,
                        notes: g.notes,
                        status: g.status,
                    })
                    .collect(),
            ),
            None => {
                let synthesized = Guest {
                    bed_id: record.bed_id.clone().unwrap_or_default(),
                    guest_name: record.contact_name.clone(),
                    age: 0,
                    gender: None,
                    id_proof_type: None,
                    id_proof_number: None,
                    emergency_contact: None,
                    notes: None,
                    status: guest_status_for(record.status),
                };
                (BookingKind::Single, vec![synthesized])
            }
        };

        Self {
            id: record.id,
            booking_reference: record.booking_reference,
            kind,
            contact,
            guests,
            status: record.status,
            check_in_date: record.check_in_date,
            duration: record.duration,
            notes: record.notes,
            source: record.source,
            reason: record.reason,
            processed_by: record.processed_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Always the guest-list length, never a stored counter.
    pub fn total_guests(&self) -> usize {
        self.guests.len()
    }

    /// Always recomputed from the guest list.
    pub fn confirmed_guests(&self) -> usize {
        self.guests
            .iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .count()
    }

    /// Aggregate status derived from per-guest confirmation: `Confirmed` iff
    /// every guest is confirmed, `Partially_Confirmed` iff some but not all
    /// are. Otherwise the stored workflow status stands.
    pub fn aggregate_status(&self) -> BookingStatus {
        let total = self.total_guests();
        let confirmed = self.confirmed_guests();

        if total > 0 && confirmed == total {
            BookingStatus::Confirmed
        } else if confirmed > 0 && confirmed < total {
            BookingStatus::PartiallyConfirmed
        } else {
            self.status
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

fn guest_status_for(status: BookingStatus) -> GuestStatus {
    match status {
        BookingStatus::Confirmed | BookingStatus::Approved | BookingStatus::Completed => {
            GuestStatus::Confirmed
        }
        BookingStatus::Rejected | BookingStatus::Cancelled => GuestStatus::Cancelled,
        BookingStatus::Pending | BookingStatus::PartiallyConfirmed => GuestStatus::Pending,
    }
}

/// Validate a booking submission locally. A non-empty result blocks the
/// submission; nothing is sent to the backend.
pub fn validate_submission(request: &CreateBookingRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&request.contact_person.name) {
        errors.insert("name".to_string(), "Contact name is required".to_string());
    }
    if is_blank(&request.contact_person.phone) {
        errors.insert("phone".to_string(), "Contact phone is required".to_string());
    }
    if !is_valid_email(&request.contact_person.email) {
        errors.insert(
            "email".to_string(),
            "A valid contact email is required".to_string(),
        );
    }

    if request.guests.is_empty() {
        errors.insert(
            "guests".to_string(),
            "At least one guest is required".to_string(),
        );
        return errors;
    }

    let mut seen_beds: HashSet<&str> = HashSet::new();
    for (index, guest) in request.guests.iter().enumerate() {
        if is_blank(&guest.guest_name) {
            errors.insert(
                format!("guests[{}].guestName", index),
                "Guest name is required".to_string(),
            );
        }
        if is_blank(&guest.bed_id) {
            errors.insert(
                format!("guests[{}].bedId", index),
                "A bed must be selected for every guest".to_string(),
            );
        } else if !seen_beds.insert(guest.bed_id.as_str()) {
            errors.insert(
                format!("guests[{}].bedId", index),
                format!("Bed {} is assigned to more than one guest", guest.bed_id),
            );
        }
        if guest.age < MIN_GUEST_AGE || guest.age > MAX_GUEST_AGE {
            errors.insert(
                format!("guests[{}].age", index),
                format!(
                    "Age must be between {} and {}",
                    MIN_GUEST_AGE, MAX_GUEST_AGE
                ),
            );
        }
    }

    errors
}
