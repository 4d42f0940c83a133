//! Stateless validation predicates for customer form fields.
//!
//! Each predicate returns `Ok(())` or a human-readable message suitable for
//! inline display next to the offending input. Predicates for optional fields
//! accept blank input; the caller decides which slot is required. A failing
//! rule marks its own field invalid and nothing else.

use crate::domain::contact_field::FieldKind;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PHONE_MIN_DIGITS: usize = 8;
pub const PHONE_MAX_DIGITS: usize = 16;

pub fn validate_name(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("Customer name is required");
    }
    let chars = trimmed.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err("Name must be at least 2 characters");
    }
    if chars > NAME_MAX_CHARS {
        return Err("Name cannot exceed 100 characters");
    }
    Ok(())
}

/// `required` applies to the first email slot only; later slots are
/// pattern-checked when non-blank.
pub fn validate_email(value: &str, required: bool) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return if required {
            Err("Email is required")
        } else {
            Ok(())
        };
    }
    if is_email(trimmed) {
        Ok(())
    } else {
        Err("Please enter a valid email address")
    }
}

pub fn validate_phone(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if is_phone(trimmed) {
        Ok(())
    } else {
        Err("Please enter a valid phone number")
    }
}

pub fn validate_url(value: &str) -> Result<(), &'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if is_url(trimmed) {
        Ok(())
    } else {
        Err("Please enter a valid URL")
    }
}

pub fn validate_description(value: &str) -> Result<(), &'static str> {
    if value.chars().count() > DESCRIPTION_MAX_CHARS {
        Err("Description cannot exceed 500 characters")
    } else {
        Ok(())
    }
}

/// Dispatches to the rule matching a repeated field's kind.
pub fn validate_slot(kind: FieldKind, value: &str, required: bool) -> Result<(), &'static str> {
    match kind {
        FieldKind::Email => validate_email(value, required),
        FieldKind::Phone => validate_phone(value),
        FieldKind::Url => validate_url(value),
        FieldKind::Location => Ok(()),
    }
}

/// Simple `local@domain.tld` shape: no whitespace or extra `@`, and the
/// domain must carry an interior dot.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return false;
    }
    let bytes = domain.as_bytes();
    bytes.len() >= 3 && bytes[1..bytes.len() - 1].contains(&b'.')
}

/// Optional leading `+`, then 8-16 digits once separators are stripped.
fn is_phone(value: &str) -> bool {
    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len())
}

/// Permissive `[scheme://]host.tld[/path]` check. The path, if any, is not
/// inspected.
fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .unwrap_or(value);
    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }
    match host.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty()
                && (2..=6).contains(&tld.len())
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_bounds() {
        assert!(validate_name("Acme").is_ok());
        assert_eq!(validate_name(""), Err("Customer name is required"));
        assert_eq!(validate_name("   "), Err("Customer name is required"));
        assert_eq!(validate_name("A"), Err("Name must be at least 2 characters"));
        assert_eq!(
            validate_name(&"x".repeat(101)),
            Err("Name cannot exceed 100 characters")
        );
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.com", true).is_ok());
        assert!(validate_email("first.last@sub.domain.io", false).is_ok());
        assert_eq!(validate_email("", true), Err("Email is required"));
        assert!(validate_email("", false).is_ok());
        assert_eq!(
            validate_email("plainaddress", false),
            Err("Please enter a valid email address")
        );
        assert_eq!(
            validate_email("a@b", false),
            Err("Please enter a valid email address")
        );
        assert_eq!(
            validate_email("a b@c.com", false),
            Err("Please enter a valid email address")
        );
        assert_eq!(
            validate_email("a@@b.com", false),
            Err("Please enter a valid email address")
        );
    }

    #[test]
    fn phone_strips_separators_before_counting() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("55512345").is_ok());
        assert!(validate_phone("").is_ok());
        assert_eq!(
            validate_phone("1234567"),
            Err("Please enter a valid phone number")
        );
        assert_eq!(
            validate_phone("+123456789012345678"),
            Err("Please enter a valid phone number")
        );
        assert_eq!(
            validate_phone("555-CALL-NOW"),
            Err("Please enter a valid phone number")
        );
    }

    #[test]
    fn url_accepts_missing_scheme() {
        assert!(validate_url("example.com").is_ok());
        assert!(validate_url("https://www.example.com/path/page").is_ok());
        assert!(validate_url("http://sub.example.co").is_ok());
        assert!(validate_url("").is_ok());
        assert_eq!(validate_url("localhost"), Err("Please enter a valid URL"));
        assert_eq!(
            validate_url("not a url"),
            Err("Please enter a valid URL")
        );
        assert_eq!(validate_url(".com"), Err("Please enter a valid URL"));
    }

    #[test]
    fn description_limit() {
        assert!(validate_description(&"d".repeat(500)).is_ok());
        assert_eq!(
            validate_description(&"d".repeat(501)),
            Err("Description cannot exceed 500 characters")
        );
    }

    #[test]
    fn location_slots_are_unvalidated() {
        assert!(validate_slot(FieldKind::Location, "42 Main Street", false).is_ok());
        assert!(validate_slot(FieldKind::Location, "", false).is_ok());
    }
}
