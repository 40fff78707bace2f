use hostel_platform_shared::GUARDIAN_PHONE_DIGITS;

/// Strip everything that is not an ASCII digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Guardian phone numbers must be exactly ten digits once separators and
/// country-code punctuation are stripped.
pub fn is_valid_guardian_phone(phone: &str) -> bool {
    digits_only(phone).len() == GUARDIAN_PHONE_DIGITS
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
