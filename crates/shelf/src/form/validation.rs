//! Whole-record validation.
//!
//! Every field is checked on every run; a problem in one field never hides a problem in
//! another. Each field gets at most one error, checked in this order:
//!
//! | Field | Checks |
//! |-------|--------|
//! | `name` | required, at most 30 chars, not a duplicate |
//! | `price` | required, a number greater than 0 |
//! | `supplierEmail` | required, at most 50 chars, `x@y.z` shape |
//! | `entryDate` | required, `YYYY-MM-DD` calendar date |
//!
//! Blankness is judged on trimmed text; lengths on the text as typed.
//!
//! ## Duplicates in Edit Mode
//!
//! Names compare case-insensitively. When editing, the product's own original name is
//! in the existing-names list, so a match only counts when it differs from that
//! original name. Keeping a product's name is fine; renaming it onto another
//! product's name is not.

use super::fields::{Field, FieldError, FieldErrors, FormBuffer};
use super::price::parse_leading_number;
use crate::model::Product;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_NAME_LEN: usize = 30;
pub const MAX_EMAIL_LEN: usize = 50;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn parse_entry_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// Validate a buffer against the existing names and the product being edited, if any.
pub fn validate_buffer(
    buffer: &FormBuffer,
    existing_names: &[String],
    editing: Option<&Product>,
) -> FieldErrors {
    let checks = [
        (Field::Name, check_name(&buffer.name, existing_names, editing)),
        (Field::Price, check_price(&buffer.price)),
        (Field::SupplierEmail, check_email(&buffer.supplier_email)),
        (Field::EntryDate, check_entry_date(&buffer.entry_date)),
    ];

    let mut errors = FieldErrors::default();
    for (field, error) in checks {
        if let Some(error) = error {
            errors.insert(field, error);
        }
    }
    errors
}

fn check_name(name: &str, existing_names: &[String], editing: Option<&Product>) -> Option<FieldError> {
    let current = name.trim().to_lowercase();
    if current.is_empty() {
        return Some(FieldError::Required(Field::Name));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Some(FieldError::TooLong {
            field: Field::Name,
            max: MAX_NAME_LEN,
        });
    }

    let keeps_own_name = editing.is_some_and(|product| product.name.to_lowercase() == current);
    let duplicate = !keeps_own_name
        && existing_names
            .iter()
            .any(|existing| existing.to_lowercase() == current);

    duplicate.then_some(FieldError::DuplicateName)
}

fn check_price(price: &str) -> Option<FieldError> {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return Some(FieldError::Required(Field::Price));
    }

    match parse_leading_number(trimmed) {
        Some(n) if n > 0.0 => None,
        _ => Some(FieldError::PriceOutOfRange),
    }
}

fn check_email(email: &str) -> Option<FieldError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some(FieldError::Required(Field::SupplierEmail));
    }

    if email.chars().count() > MAX_EMAIL_LEN {
        return Some(FieldError::TooLong {
            field: Field::SupplierEmail,
            max: MAX_EMAIL_LEN,
        });
    }

    (!is_valid_email(trimmed)).then_some(FieldError::InvalidEmail)
}

fn check_entry_date(entry_date: &str) -> Option<FieldError> {
    if entry_date.trim().is_empty() {
        return Some(FieldError::Required(Field::EntryDate));
    }

    parse_entry_date(entry_date)
        .is_none()
        .then_some(FieldError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fields::ErrorKind;

    fn buffer(name: &str, price: &str, email: &str, date: &str) -> FormBuffer {
        FormBuffer {
            name: name.to_string(),
            price: price.to_string(),
            supplier_email: email.to_string(),
            entry_date: date.to_string(),
            id: None,
        }
    }

    fn valid() -> FormBuffer {
        buffer("Laptop Gaming", "1200", "gaming@example.com", "2023-11-15")
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn editing(name: &str) -> Product {
        Product::new(
            name,
            10.0,
            "a@example.com",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_valid_buffer_has_no_errors() {
        assert!(validate_buffer(&valid(), &[], None).is_empty());
    }

    #[test]
    fn test_empty_buffer_yields_four_required_errors() {
        let errors = validate_buffer(&FormBuffer::default(), &[], None);

        assert_eq!(errors.len(), 4);
        for field in Field::ALL {
            assert_eq!(errors.get(field), Some(&FieldError::Required(field)));
        }
    }

    #[test]
    fn test_whitespace_only_fields_are_required() {
        let errors = validate_buffer(&buffer("  ", " ", "\t", " "), &[], None);
        assert!(errors.iter().all(|(_, e)| e.kind() == ErrorKind::Required));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_duplicate_name_in_create_mode() {
        let mut b = valid();
        b.name = "laptop".to_string();
        let errors = validate_buffer(&b, &names(&["Laptop"]), None);

        assert_eq!(errors.get(Field::Name), Some(&FieldError::DuplicateName));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_duplicate_ignores_surrounding_whitespace() {
        let mut b = valid();
        b.name = "  LAPTOP ".to_string();
        let errors = validate_buffer(&b, &names(&["Laptop"]), None);
        assert_eq!(errors.get(Field::Name), Some(&FieldError::DuplicateName));
    }

    #[test]
    fn test_keeping_own_name_in_edit_mode() {
        let mut b = valid();
        b.name = "Laptop".to_string();
        let product = editing("Laptop");
        let errors = validate_buffer(&b, &names(&["Laptop", "Mouse"]), Some(&product));

        assert!(errors.is_empty());
    }

    #[test]
    fn test_renaming_onto_another_name_in_edit_mode() {
        let mut b = valid();
        b.name = "mouse".to_string();
        let product = editing("Laptop");
        let errors = validate_buffer(&b, &names(&["Laptop", "Mouse"]), Some(&product));

        assert_eq!(errors.get(Field::Name), Some(&FieldError::DuplicateName));
    }

    #[test]
    fn test_name_too_long() {
        let mut b = valid();
        b.name = "x".repeat(MAX_NAME_LEN + 1);
        let errors = validate_buffer(&b, &[], None);
        assert_eq!(
            errors.get(Field::Name),
            Some(&FieldError::TooLong {
                field: Field::Name,
                max: MAX_NAME_LEN
            })
        );

        b.name = "x".repeat(MAX_NAME_LEN);
        assert!(validate_buffer(&b, &[], None).is_empty());
    }

    #[test]
    fn test_non_positive_price_is_range_error() {
        for price in ["0", "-50", "0.0", "abc", "-"] {
            let mut b = valid();
            b.price = price.to_string();
            let errors = validate_buffer(&b, &[], None);
            assert_eq!(
                errors.get(Field::Price),
                Some(&FieldError::PriceOutOfRange),
                "price {:?}",
                price
            );
        }
    }

    #[test]
    fn test_price_with_trailing_text_is_accepted() {
        let mut b = valid();
        b.price = "12.".to_string();
        assert!(validate_buffer(&b, &[], None).is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("gaming@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("gaming.example.com"));
        assert!(!is_valid_email("gaming@example"));
        assert!(!is_valid_email("@example.com"));

        let mut b = valid();
        b.supplier_email = "not-an-email".to_string();
        let errors = validate_buffer(&b, &[], None);
        assert_eq!(errors.get(Field::SupplierEmail), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn test_email_too_long() {
        let mut b = valid();
        b.supplier_email = format!("{}@example.com", "a".repeat(MAX_EMAIL_LEN));
        let errors = validate_buffer(&b, &[], None);
        assert_eq!(
            errors.get(Field::SupplierEmail).map(FieldError::kind),
            Some(ErrorKind::Range)
        );
    }

    #[test]
    fn test_entry_date_format() {
        assert_eq!(
            parse_entry_date("2023-11-15"),
            NaiveDate::from_ymd_opt(2023, 11, 15)
        );
        assert_eq!(parse_entry_date("15/11/2023"), None);
        assert_eq!(parse_entry_date("2023-02-30"), None);

        let mut b = valid();
        b.entry_date = "yesterday".to_string();
        let errors = validate_buffer(&b, &[], None);
        assert_eq!(errors.get(Field::EntryDate), Some(&FieldError::InvalidDate));
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let b = buffer("", "0", "bad", "");
        let errors = validate_buffer(&b, &[], None);

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Name), Some(&FieldError::Required(Field::Name)));
        assert_eq!(errors.get(Field::Price), Some(&FieldError::PriceOutOfRange));
        assert_eq!(errors.get(Field::SupplierEmail), Some(&FieldError::InvalidEmail));
        assert_eq!(
            errors.get(Field::EntryDate),
            Some(&FieldError::Required(Field::EntryDate))
        );
    }
}
