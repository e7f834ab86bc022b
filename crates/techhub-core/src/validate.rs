//! Form field validation.
//!
//! Pure checks shared by the TUI forms and the one-shot CLI commands.
//! Ordering matters: presence first, then email syntax, then password
//! strength (registration only). The first failing check wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::session::{Credentials, RegistrationProfile};

/// Minimum password length accepted at registration.
///
/// Login deliberately imposes no length floor, only non-emptiness:
/// accounts created before the rule existed must still be able to
/// sign in.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Why a submission was rejected before reaching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// One or more required fields is empty after trimming.
    MissingFields,
    /// Email does not match the basic `local@domain.tld` shape.
    InvalidEmail,
    /// Password shorter than [`MIN_PASSWORD_CHARS`] (registration only).
    WeakPassword,
}

/// Returns true if `s` looks like an email address.
///
/// Single `@` split with a dotted domain and no whitespace anywhere.
/// Intentionally loose - the server is the authority, this only stops
/// obvious typos before a round trip.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Returns true if `s` meets the registration strength floor.
pub fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= MIN_PASSWORD_CHARS
}

/// Returns true if every field is non-empty after trimming.
pub fn all_fields_present<'a, I>(fields: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    fields.into_iter().all(|f| !f.trim().is_empty())
}

/// Validates a login submission: presence, then email syntax.
pub fn validate_login(credentials: &Credentials) -> Result<(), FieldError> {
    if !all_fields_present([
        credentials.email.as_str(),
        credentials.password.as_str(),
    ]) {
        return Err(FieldError::MissingFields);
    }
    if !is_valid_email(&credentials.email) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Validates a registration submission: presence across all six fields,
/// then email syntax, then password strength.
pub fn validate_registration(profile: &RegistrationProfile) -> Result<(), FieldError> {
    if !all_fields_present([
        profile.name.as_str(),
        profile.surname.as_str(),
        profile.email.as_str(),
        profile.password.as_str(),
        profile.department.as_str(),
        profile.task.as_str(),
    ]) {
        return Err(FieldError::MissingFields);
    }
    if !is_valid_email(&profile.email) {
        return Err(FieldError::InvalidEmail);
    }
    if !is_valid_password(&profile.password) {
        return Err(FieldError::WeakPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn profile() -> RegistrationProfile {
        RegistrationProfile {
            name: "Ann".to_string(),
            surname: "Smith".to_string(),
            email: "ann@example.com".to_string(),
            password: "hunter2x".to_string(),
            department: "Digitizing".to_string(),
            task: "Machine setup".to_string(),
        }
    }

    #[test]
    fn accepts_minimal_valid_email() {
        assert!(is_valid_email("a@b.co"));
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["foo", "foo@bar", "foo bar@baz.com", "a@b@c.co", "", " @x.co"] {
            assert!(!is_valid_email(bad), "should reject {bad:?}");
        }
    }

    #[test]
    fn password_floor_is_six_chars() {
        assert!(!is_valid_password("12345"));
        assert!(is_valid_password("123456"));
        // Counted in chars, not bytes.
        assert!(is_valid_password("påsswd"));
    }

    #[test]
    fn presence_check_trims_whitespace() {
        assert!(all_fields_present(["a", "b"]));
        assert!(!all_fields_present(["a", "   "]));
        assert!(!all_fields_present(["", "b"]));
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            validate_login(&credentials("", "secret")),
            Err(FieldError::MissingFields)
        );
        assert_eq!(
            validate_login(&credentials("a@b.co", "")),
            Err(FieldError::MissingFields)
        );
    }

    #[test]
    fn login_checks_email_after_presence() {
        assert_eq!(
            validate_login(&credentials("not-an-email", "secret")),
            Err(FieldError::InvalidEmail)
        );
        assert_eq!(validate_login(&credentials("a@b.co", "x")), Ok(()));
    }

    #[test]
    fn login_has_no_password_floor() {
        // A one-char password is fine at login; only registration
        // enforces strength.
        assert_eq!(validate_login(&credentials("a@b.co", "1")), Ok(()));
    }

    #[test]
    fn registration_checks_in_spec_order() {
        let mut p = profile();
        p.department = String::new();
        p.email = "broken".to_string();
        p.password = "123".to_string();
        // Presence wins even though email and password are also bad.
        assert_eq!(validate_registration(&p), Err(FieldError::MissingFields));

        let mut p = profile();
        p.email = "broken".to_string();
        p.password = "123".to_string();
        assert_eq!(validate_registration(&p), Err(FieldError::InvalidEmail));

        let mut p = profile();
        p.password = "123".to_string();
        assert_eq!(validate_registration(&p), Err(FieldError::WeakPassword));

        assert_eq!(validate_registration(&profile()), Ok(()));
    }
}
