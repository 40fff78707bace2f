//! Unit tests for the domain models: booking ingestion and aggregate status,
//! submission validation, charge totals, the student merge precedence rules,
//! and billing schedule math.

#[cfg(test)]
mod tests {
    use crate::models::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hostel_platform_shared::{
        BookingRecord, BookingStatus, BillingJobStatus, BillingTrigger, ContactPersonPayload,
        CreateBookingRequest, GenerateMonthlyResponse, GuestPayload, GuestRecord, GuestStatus,
        InvoiceRecord, StudentRecord, StudentStatus,
    };
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn guest_payload(name: &str, bed: &str, age: i32) -> GuestPayload {
        GuestPayload {
            bed_id: bed.to_string(),
            guest_name: name.to_string(),
            age,
            gender: "female".to_string(),
            id_proof_type: None,
            id_proof_number: None,
            emergency_contact: None,
            notes: None,
        }
    }

    fn submission(guests: Vec<GuestPayload>) -> CreateBookingRequest {
        CreateBookingRequest {
            contact_person: ContactPersonPayload {
                name: "Asha Verma".to_string(),
                phone: "9876543210".to_string(),
                email: "asha@example.com".to_string(),
            },
            guests,
            check_in_date: None,
            duration: None,
            notes: None,
            source: None,
        }
    }

    fn guest_record(name: &str, bed: &str, status: GuestStatus) -> GuestRecord {
        GuestRecord {
            bed_id: bed.to_string(),
            guest_name: name.to_string(),
            age: 20,
            gender: None,
            id_proof_type: None,
            id_proof_number: None,
            emergency_contact: None,
            notes: None,
            status,
        }
    }

    fn booking_record(guests: Option<Vec<GuestRecord>>, status: BookingStatus) -> BookingRecord {
        BookingRecord {
            id: Uuid::new_v4(),
            booking_reference: "BK-0001".to_string(),
            contact_name: "Asha Verma".to_string(),
            phone: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
            guests,
            bed_id: Some("B-101".to_string()),
            status,
            check_in_date: None,
            duration: None,
            notes: None,
            source: None,
            reason: None,
            processed_by: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn student_record(name: &str, email: &str) -> StudentRecord {
        StudentRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "9000000000".to_string(),
            email: email.to_string(),
            status: StudentStatus::Active,
            is_configured: false,
            room_number: Some("R-2".to_string()),
            bed_id: None,
            address: None,
            guardian_name: None,
            guardian_phone: None,
            guardian_relation: None,
            course: Some("B.Com".to_string()),
            institution: None,
            total_monthly_fee: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    // Booking submission validation

    #[test]
    fn duplicate_bed_ids_are_rejected() {
        let request = submission(vec![
            guest_payload("Asha Verma", "B-101", 20),
            guest_payload("Meera Nair", "B-101", 22),
        ]);

        let errors = validate_submission(&request);
        assert_eq!(
            errors.get("guests[1].bedId").map(String::as_str),
            Some("Bed B-101 is assigned to more than one guest")
        );
    }

    #[test]
    fn distinct_beds_pass_validation() {
        let request = submission(vec![
            guest_payload("Asha Verma", "B-101", 20),
            guest_payload("Meera Nair", "B-102", 22),
        ]);

        assert!(validate_submission(&request).is_empty());
    }

    #[test]
    fn guest_age_must_be_within_bounds() {
        let request = submission(vec![
            guest_payload("Asha Verma", "B-101", 0),
            guest_payload("Meera Nair", "B-102", 121),
        ]);

        let errors = validate_submission(&request);
        assert!(errors.contains_key("guests[0].age"));
        assert!(errors.contains_key("guests[1].age"));
    }

    #[test]
    fn empty_guest_list_is_rejected() {
        let errors = validate_submission(&submission(vec![]));
        assert!(errors.contains_key("guests"));
    }

    #[test]
    fn blank_guest_name_and_bed_are_rejected() {
        let request = submission(vec![guest_payload("  ", "", 20)]);
        let errors = validate_submission(&request);
        assert!(errors.contains_key("guests[0].guestName"));
        assert!(errors.contains_key("guests[0].bedId"));
    }

    // Booking ingestion and aggregate status

    #[test]
    fn record_with_guests_array_ingests_as_multi() {
        let record = booking_record(
            Some(vec![guest_record("Asha Verma", "B-101", GuestStatus::Pending)]),
            BookingStatus::Pending,
        );
        let booking = Booking::from_record(record);
        assert_eq!(booking.kind, BookingKind::Multi);
    }

    #[test]
    fn legacy_record_ingests_as_single_with_synthesized_guest() {
        let record = booking_record(None, BookingStatus::Pending);
        let booking = Booking::from_record(record);

        assert_eq!(booking.kind, BookingKind::Single);
        assert_eq!(booking.total_guests(), 1);
        assert_eq!(booking.guests[0].guest_name, "Asha Verma");
        assert_eq!(booking.guests[0].bed_id, "B-101");
    }

    #[test]
    fn aggregate_is_confirmed_only_when_every_guest_is() {
        let record = booking_record(
            Some(vec![
                guest_record("A", "B-101", GuestStatus::Confirmed),
                guest_record("B", "B-102", GuestStatus::Confirmed),
            ]),
            BookingStatus::Approved,
        );
        let booking = Booking::from_record(record);

        assert_eq!(booking.confirmed_guests(), booking.total_guests());
        assert_eq!(booking.aggregate_status(), BookingStatus::Confirmed);
    }

    #[test]
    fn aggregate_is_partial_when_some_but_not_all_confirmed() {
        let record = booking_record(
            Some(vec![
                guest_record("A", "B-101", GuestStatus::Confirmed),
                guest_record("B", "B-102", GuestStatus::Pending),
                guest_record("C", "B-103", GuestStatus::Cancelled),
            ]),
            BookingStatus::Approved,
        );
        let booking = Booking::from_record(record);

        assert!(booking.confirmed_guests() <= booking.total_guests());
        assert_eq!(booking.confirmed_guests(), 1);
        assert_eq!(
            booking.aggregate_status(),
            BookingStatus::PartiallyConfirmed
        );
    }

    #[test]
    fn aggregate_falls_back_to_stored_status_with_no_confirmations() {
        let record = booking_record(
            Some(vec![guest_record("A", "B-101", GuestStatus::Pending)]),
            BookingStatus::Pending,
        );
        let booking = Booking::from_record(record);
        assert_eq!(booking.aggregate_status(), BookingStatus::Pending);
    }

    #[test]
    fn processed_bookings_are_terminal() {
        for status in [
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
        ] {
            assert!(Booking::from_record(booking_record(None, status)).is_terminal());
        }
    }

    #[test]
    fn only_pending_and_partially_confirmed_bookings_are_actionable() {
        for status in [BookingStatus::Pending, BookingStatus::PartiallyConfirmed] {
            assert!(!Booking::from_record(booking_record(None, status)).is_terminal());
        }
    }

    // Charge configuration

    fn base_charges() -> ChargeConfiguration {
        ChargeConfiguration {
            base_monthly_fee: Decimal::from(15000),
            laundry_fee: Decimal::from(2000),
            food_fee: Decimal::from(8000),
            wifi_fee: Decimal::from(1000),
            maintenance_fee: Decimal::from(500),
            security_deposit: Decimal::from(10000),
            additional_charges: Vec::new(),
            guardian: Guardian {
                name: "Ravi Verma".to_string(),
                phone: "1234567890".to_string(),
                relation: "Father".to_string(),
            },
            academic: Academic {
                course: "B.Sc".to_string(),
                institution: "City College".to_string(),
            },
        }
    }

    #[test]
    fn total_excludes_security_deposit() {
        let charges = base_charges();
        assert_eq!(charges.total_monthly_fee(), Decimal::from(26500));
    }

    #[test]
    fn invalid_additional_rows_do_not_contribute() {
        let mut charges = base_charges();
        charges.base_monthly_fee = Decimal::from(1000);
        charges.laundry_fee = Decimal::ZERO;
        charges.food_fee = Decimal::ZERO;
        charges.wifi_fee = Decimal::ZERO;
        charges.maintenance_fee = Decimal::ZERO;
        charges.additional_charges = vec![
            AdditionalCharge {
                description: "Parking".to_string(),
                amount: Decimal::from(500),
            },
            AdditionalCharge {
                description: "".to_string(),
                amount: Decimal::from(300),
            },
            AdditionalCharge {
                description: "Gym".to_string(),
                amount: Decimal::ZERO,
            },
        ];

        assert_eq!(charges.total_monthly_fee(), Decimal::from(1500));
        assert_eq!(charges.valid_additional_charges().count(), 1);
    }

    #[test]
    fn total_is_order_independent() {
        let mut charges = base_charges();
        charges.additional_charges = vec![
            AdditionalCharge {
                description: "Parking".to_string(),
                amount: Decimal::from(500),
            },
            AdditionalCharge {
                description: "Gym".to_string(),
                amount: Decimal::from(750),
            },
        ];
        let forward = charges.total_monthly_fee();

        charges.additional_charges.reverse();
        assert_eq!(charges.total_monthly_fee(), forward);
    }

    #[test]
    fn total_rounds_to_currency_precision() {
        let mut charges = base_charges();
        charges.base_monthly_fee = Decimal::new(100005, 3); // 100.005
        charges.laundry_fee = Decimal::ZERO;
        charges.food_fee = Decimal::ZERO;
        charges.wifi_fee = Decimal::ZERO;
        charges.maintenance_fee = Decimal::ZERO;

        assert_eq!(charges.total_monthly_fee(), Decimal::new(10001, 2)); // 100.01

        // Midpoints round up, not to the nearest even digit.
        charges.base_monthly_fee = Decimal::new(100025, 3); // 100.025
        assert_eq!(charges.total_monthly_fee(), Decimal::new(10003, 2)); // 100.03
    }

    #[test]
    fn guardian_phone_must_be_ten_digits() {
        let mut charges = base_charges();
        assert!(!charges.validate().contains_key("guardianPhone"));

        for bad in ["123", "12345678901", "abcdefghij"] {
            charges.guardian.phone = bad.to_string();
            assert!(
                charges.validate().contains_key("guardianPhone"),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn configuration_requires_guardian_and_academic_blocks() {
        let mut charges = base_charges();
        charges.guardian.name = "".to_string();
        charges.academic.course = " ".to_string();
        charges.academic.institution = "".to_string();

        let errors = charges.validate();
        assert!(errors.contains_key("guardianName"));
        assert!(errors.contains_key("course"));
        assert!(errors.contains_key("institution"));
    }

    #[test]
    fn configuration_requires_positive_base_fee() {
        let mut charges = base_charges();
        charges.base_monthly_fee = Decimal::ZERO;
        charges.laundry_fee = Decimal::ZERO;
        charges.food_fee = Decimal::ZERO;
        charges.wifi_fee = Decimal::ZERO;
        charges.maintenance_fee = Decimal::ZERO;

        let errors = charges.validate();
        assert!(errors.contains_key("baseMonthlyFee"));
        assert!(errors.contains_key("totalMonthlyFee"));
    }

    #[test]
    fn request_payload_carries_filtered_charges_and_computed_total() {
        let mut charges = base_charges();
        charges.additional_charges = vec![
            AdditionalCharge {
                description: "Parking".to_string(),
                amount: Decimal::from(500),
            },
            AdditionalCharge {
                description: "".to_string(),
                amount: Decimal::from(300),
            },
        ];

        let request = charges.to_request();
        assert_eq!(request.additional_charges.len(), 1);
        assert_eq!(request.total_monthly_fee, Decimal::from(27000));
    }

    // Student merge

    #[test]
    fn merge_never_overwrites_identity_fields() {
        let student = student_record("Asha Verma", "asha@example.com");
        let guest = GuestProfile {
            guest_name: "asha verma".to_string(),
            email: Some("different@example.com".to_string()),
            bed_id: Some("B-101".to_string()),
            course: Some("M.Sc".to_string()),
            ..GuestProfile::default()
        };

        let enhanced = enhance_student(&student, &[guest]);

        assert!(enhanced.matched_guest);
        assert_eq!(enhanced.name, "Asha Verma");
        assert_eq!(enhanced.phone, "9000000000");
        assert_eq!(enhanced.email, "asha@example.com");
        // Non-identity fields do come from the guest.
        assert_eq!(enhanced.bed_id.as_deref(), Some("B-101"));
        assert_eq!(enhanced.course.as_deref(), Some("M.Sc"));
    }

    #[test]
    fn merge_matches_by_name_case_insensitively_then_email() {
        let student = student_record("Asha Verma", "asha@example.com");

        let by_email = GuestProfile {
            guest_name: "someone else".to_string(),
            email: Some("ASHA@example.com".to_string()),
            room_number: Some("R-9".to_string()),
            ..GuestProfile::default()
        };
        let enhanced = enhance_student(&student, &[by_email]);
        assert!(enhanced.matched_guest);
        assert_eq!(enhanced.room_number.as_deref(), Some("R-9"));
    }

    #[test]
    fn merge_falls_back_to_student_fields_without_a_match() {
        let student = student_record("Asha Verma", "asha@example.com");
        let unrelated = GuestProfile {
            guest_name: "Meera Nair".to_string(),
            email: Some("meera@example.com".to_string()),
            ..GuestProfile::default()
        };

        let enhanced = enhance_student(&student, &[unrelated]);
        assert!(!enhanced.matched_guest);
        assert_eq!(enhanced.room_number.as_deref(), Some("R-2"));
        assert_eq!(enhanced.course.as_deref(), Some("B.Com"));
    }

    #[test]
    fn pending_configuration_uses_the_flag_not_the_status() {
        // Active status alone does not make a student billable.
        let student = student_record("Asha Verma", "asha@example.com");
        assert_eq!(student.status, StudentStatus::Active);
        assert!(is_pending_configuration(&student));

        let mut configured = student_record("Meera Nair", "meera@example.com");
        configured.is_configured = true;
        configured.status = StudentStatus::Inactive;
        assert!(!is_pending_configuration(&configured));
    }

    // Billing schedule math

    #[test]
    fn due_date_is_schedule_day_plus_offset() {
        assert_eq!(
            due_date(2025, 1, 1, 10),
            NaiveDate::from_ymd_opt(2025, 1, 11)
        );
    }

    #[test]
    fn next_runs_cover_six_months_strictly_after_now() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let runs = next_run_times(now, 1);

        assert_eq!(runs.len(), 6);
        assert_eq!((runs[0].month, runs[0].year), (2, 2025));
        assert_eq!((runs[5].month, runs[5].year), (7, 2025));
        assert!(runs.iter().all(|r| r.run_at > now));
    }

    #[test]
    fn current_month_is_included_when_schedule_day_is_ahead() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        let runs = next_run_times(now, 20);

        assert_eq!((runs[0].month, runs[0].year), (1, 2025));
        assert_eq!(runs[0].run_at.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
    }

    #[test]
    fn out_of_range_schedule_day_yields_no_runs() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        for day in [0, 29, 32] {
            assert!(next_run_times(now, day).is_empty());
        }
    }

    #[test]
    fn horizon_wraps_across_year_end() {
        let now = Utc.with_ymd_and_hms(2025, 10, 2, 0, 0, 0).unwrap();
        let runs = next_run_times(now, 1);

        assert_eq!((runs[0].month, runs[0].year), (11, 2025));
        assert_eq!((runs[2].month, runs[2].year), (1, 2026));
    }

    // Billing job transitions

    fn generation_response(generated: i64, failed: i64) -> GenerateMonthlyResponse {
        let student_id = Uuid::new_v4();
        GenerateMonthlyResponse {
            success: failed == 0,
            generated,
            failed,
            total_amount: Decimal::ZERO,
            invoices: (0..generated)
                .map(|_| InvoiceRecord {
                    id: Uuid::new_v4(),
                    student_id,
                    student_name: None,
                    amount: Decimal::from(26500),
                    month: 1,
                    year: 2025,
                    due_date: NaiveDate::from_ymd_opt(2025, 1, 11).unwrap(),
                    status: None,
                })
                .collect(),
            errors: (0..failed).map(|i| format!("student {} skipped", i)).collect(),
        }
    }

    #[test]
    fn per_item_failures_still_complete_the_job() {
        let mut job = BillingJob::new(1, 2025, BillingTrigger::Scheduled);
        job.start();
        job.complete(&generation_response(8, 2));

        assert_eq!(job.status, BillingJobStatus::Completed);
        assert_eq!(job.generated_invoices, 8);
        assert_eq!(job.failed_invoices, 2);
        assert_eq!(job.errors.len(), 2);
        assert_eq!(job.total_amount, Decimal::from(26500 * 8));
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn a_generation_error_fails_the_job() {
        let mut job = BillingJob::new(1, 2025, BillingTrigger::Manual);
        job.start();
        job.fail("connection reset by peer".to_string());

        assert_eq!(job.status, BillingJobStatus::Failed);
        assert_eq!(job.errors, vec!["connection reset by peer".to_string()]);
        assert!(job.status.is_terminal());
    }

    #[test]
    fn automation_config_bounds_the_schedule_day() {
        let mut config = AutomationConfig::default();
        assert!(config.validate().is_empty());

        config.schedule_day = 0;
        assert!(config.validate().contains_key("scheduleDay"));

        config.schedule_day = 29;
        assert!(config.validate().contains_key("scheduleDay"));
    }
}
