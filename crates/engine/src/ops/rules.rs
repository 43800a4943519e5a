//! Shape rules shared by the tier-1 validators.
//!
//! Each rule appends its failures to the aggregate and returns; rules never
//! decide on their own whether the request proceeds.

use uuid::Uuid;

use crate::FieldErrors;
use crate::categories::MAX_CATEGORY_NAME;
use crate::transactions::MAX_DESCRIPTION;

const MAX_EMAIL: usize = 256;
const MAX_NAME: usize = 100;
const MIN_PASSWORD: usize = 8;

pub(super) fn require_id(id: Uuid, field: &'static str, label: &str, errors: &mut FieldErrors) {
    if id.is_nil() {
        errors.push(field, format!("{label} is required."));
    }
}

pub(super) fn check_category_name(name: &str, errors: &mut FieldErrors) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.push("name", "Category name is required.");
    } else if trimmed.chars().count() > MAX_CATEGORY_NAME {
        errors.push(
            "name",
            format!("Category name must not exceed {MAX_CATEGORY_NAME} characters."),
        );
    }
}

pub(super) fn check_amount(amount_minor: i64, errors: &mut FieldErrors) {
    if amount_minor <= 0 {
        errors.push("amount_minor", "Amount must be greater than zero.");
    }
}

pub(super) fn check_description(description: Option<&str>, errors: &mut FieldErrors) {
    if let Some(description) = description
        && description.chars().count() > MAX_DESCRIPTION
    {
        errors.push(
            "description",
            format!("Description must not exceed {MAX_DESCRIPTION} characters."),
        );
    }
}

pub(super) fn check_email(email: &str, errors: &mut FieldErrors) {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        errors.push("email", "Email is required.");
        return;
    }
    if trimmed.chars().count() > MAX_EMAIL {
        errors.push("email", format!("Email must not exceed {MAX_EMAIL} characters."));
    }
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty() && !domain.contains('@'));
    if !valid {
        errors.push("email", "Email must be a valid email address.");
    }
}

pub(super) fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.push("password", "Password is required.");
        return;
    }
    if password.chars().count() < MIN_PASSWORD {
        errors.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD} characters long."),
        );
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("password", "Password must contain at least one uppercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("password", "Password must contain at least one lowercase letter.");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password", "Password must contain at least one digit.");
    }
}

pub(super) fn check_optional_name(
    value: Option<&str>,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) {
    if let Some(value) = value
        && value.chars().count() > MAX_NAME
    {
        errors.push(field, format!("{label} must not exceed {MAX_NAME} characters."));
    }
}

pub(super) fn check_month(month: Option<u32>, errors: &mut FieldErrors) {
    if let Some(month) = month
        && !(1..=12).contains(&month)
    {
        errors.push("month", "Month must be between 1 and 12.");
    }
}

pub(super) fn check_year(year: Option<i32>, errors: &mut FieldErrors) {
    if let Some(year) = year
        && year <= 1900
    {
        errors.push("year", "Year must be greater than 1900.");
    }
}

pub(super) fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rule_accepts_plain_addresses() {
        let mut errors = FieldErrors::default();
        check_email("alice@example.com", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn email_rule_flags_missing_at_and_blank() {
        let mut errors = FieldErrors::default();
        check_email("not-an-email", &mut errors);
        check_email("@nodomain", &mut errors);
        assert_eq!(errors.messages("email").len(), 2);

        let mut errors = FieldErrors::default();
        check_email("   ", &mut errors);
        assert_eq!(errors.messages("email"), ["Email is required."]);
    }

    #[test]
    fn password_rule_reports_every_missing_class() {
        let mut errors = FieldErrors::default();
        check_password("short", &mut errors);
        // too short, no uppercase, no digit
        assert_eq!(errors.messages("password").len(), 3);

        let mut errors = FieldErrors::default();
        check_password("Passw0rd", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn month_and_year_bounds() {
        let mut errors = FieldErrors::default();
        check_month(Some(0), &mut errors);
        check_year(Some(1900), &mut errors);
        assert!(errors.contains("month"));
        assert!(errors.contains("year"));

        let mut errors = FieldErrors::default();
        check_month(Some(12), &mut errors);
        check_year(Some(1901), &mut errors);
        check_month(None, &mut errors);
        check_year(None, &mut errors);
        assert!(errors.is_empty());
    }
}
