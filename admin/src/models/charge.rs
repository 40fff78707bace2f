use crate::error::FieldErrors;
use crate::utils::validation::{is_blank, is_valid_guardian_phone};
use hostel_platform_shared::{
    AcademicPayload, AdditionalChargePayload, ConfigureChargesRequest, GuardianPayload,
    CURRENCY_SCALE,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalCharge {
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guardian {
    pub name: String,
    pub phone: String,
    pub relation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Academic {
    pub course: String,
    pub institution: String,
}

/// A student's recurring fee structure plus the guardian/academic metadata
/// required before a pending enrollee becomes an active billed student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChargeConfiguration {
    pub base_monthly_fee: Decimal,
    pub laundry_fee: Decimal,
    pub food_fee: Decimal,
    pub wifi_fee: Decimal,
    pub maintenance_fee: Decimal,
    /// One-time charge; never part of the recurring total.
    pub security_deposit: Decimal,
    pub additional_charges: Vec<AdditionalCharge>,
    pub guardian: Guardian,
    pub academic: Academic,
}

impl ChargeConfiguration {
    /// An additional-charge row counts only with a non-empty description and
    /// a positive amount.
    pub fn valid_additional_charges(&self) -> impl Iterator<Item = &AdditionalCharge> {
        self.additional_charges
            .iter()
            .filter(|c| !is_blank(&c.description) && c.amount > Decimal::ZERO)
    }

    /// Total recurring monthly obligation: the five base fields plus valid
    /// additional charges, rounded to currency precision with midpoints
    /// going up (100.005 bills as 100.01, not banker's 100.00). The security
    /// deposit is excluded. Pure and recomputed on every call so unsaved
    /// edits are always reflected.
    pub fn total_monthly_fee(&self) -> Decimal {
        let base = self.base_monthly_fee
            + self.laundry_fee
            + self.food_fee
            + self.wifi_fee
            + self.maintenance_fee;
        let additional: Decimal = self.valid_additional_charges().map(|c| c.amount).sum();
        (base + additional)
            .round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Preconditions for configuration completion. A non-empty result blocks
    /// the configure call; no mutation is performed.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if is_blank(&self.guardian.name) {
            errors.insert(
                "guardianName".to_string(),
                "Guardian name is required".to_string(),
            );
        }
        if !is_valid_guardian_phone(&self.guardian.phone) {
            errors.insert(
                "guardianPhone".to_string(),
                "Guardian phone must be a 10-digit number".to_string(),
            );
        }
        if is_blank(&self.guardian.relation) {
            errors.insert(
                "guardianRelation".to_string(),
                "Guardian relation is required".to_string(),
            );
        }
        if is_blank(&self.academic.course) {
            errors.insert("course".to_string(), "Course is required".to_string());
        }
        if is_blank(&self.academic.institution) {
            errors.insert(
                "institution".to_string(),
                "Institution is required".to_string(),
            );
        }

        if self.base_monthly_fee <= Decimal::ZERO {
            errors.insert(
                "baseMonthlyFee".to_string(),
                "Base monthly fee must be greater than zero".to_string(),
            );
        }
        for (field, amount) in [
            ("laundryFee", self.laundry_fee),
            ("foodFee", self.food_fee),
            ("wifiFee", self.wifi_fee),
            ("maintenanceFee", self.maintenance_fee),
            ("securityDeposit", self.security_deposit),
        ] {
            if amount < Decimal::ZERO {
                errors.insert(field.to_string(), "Amount cannot be negative".to_string());
            }
        }

        if self.total_monthly_fee() <= Decimal::ZERO {
            errors.insert(
                "totalMonthlyFee".to_string(),
                "Total monthly fee must be greater than zero".to_string(),
            );
        }

        errors
    }

    /// Build the payload persisted on the student record: filtered additional
    /// charges and the freshly computed total.
    pub fn to_request(&self) -> ConfigureChargesRequest {
        ConfigureChargesRequest {
            base_monthly_fee: self.base_monthly_fee,
            laundry_fee: self.laundry_fee,
            food_fee: self.food_fee,
            wifi_fee: self.wifi_fee,
            maintenance_fee: self.maintenance_fee,
            security_deposit: self.security_deposit,
            additional_charges: self
                .valid_additional_charges()
                .map(|c| AdditionalChargePayload {
                    description: c.description.clone(),
                    amount: c.amount,
                })
                .collect(),
            total_monthly_fee: self.total_monthly_fee(),
            guardian: GuardianPayload {
                name: self.guardian.name.clone(),
                phone: self.guardian.phone.clone(),
                relation: self.guardian.relation.clone(),
            },
            academic: AcademicPayload {
                course: self.academic.course.clone(),
                institution: self.academic.institution.clone(),
            },
        }
    }
}
