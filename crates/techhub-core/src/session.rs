//! Data model for authentication requests and the post-login session.

use serde::{Deserialize, Serialize};

/// Avatar shown for every technician. The service stores no avatar, so
/// the client pins one glyph for all users.
pub const AVATAR_GLYPH: &str = "👨‍🔧";

/// Login form values, created per keystroke and discarded once the
/// screen unmounts or the submission succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration form values. All six fields must be non-empty
/// (post-trim) before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationProfile {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub task: String,
}

impl RegistrationProfile {
    /// Normalizes the profile the way the service expects it: text
    /// fields trimmed, email trimmed and lowercased, password verbatim.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            department: self.department.trim().to_string(),
            task: self.task.trim().to_string(),
        }
    }
}

/// Success body of `POST /api/auth/login`. The server may omit the
/// technician record entirely, or any field within it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub technician: Option<TechnicianRecord>,
}

/// Technician fields as the server sends them; every one is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechnicianRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
}

/// Normalized post-login display record, handed to the home screen as
/// navigation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub name: String,
    pub surname: String,
    pub department: String,
    pub task: String,
    pub avatar_glyph: String,
}

impl From<LoginPayload> for SessionUser {
    /// Field-level fallbacks for anything the server omitted. This is
    /// the only normalization the client performs on server data, and
    /// the literal strings are load-bearing: downstream screens render
    /// them as-is.
    fn from(payload: LoginPayload) -> Self {
        let technician = payload.technician.unwrap_or_default();
        Self {
            name: technician.name.unwrap_or_else(|| "Unknown".to_string()),
            surname: technician.surname.unwrap_or_else(|| "User".to_string()),
            department: technician
                .department
                .unwrap_or_else(|| "Unknown Department".to_string()),
            task: technician
                .task
                .unwrap_or_else(|| "Unknown Task".to_string()),
            avatar_glyph: AVATAR_GLYPH.to_string(),
        }
    }
}

impl SessionUser {
    /// `"Name Surname"` for display headers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_technician_gets_field_level_fallbacks() {
        let payload = LoginPayload {
            technician: Some(TechnicianRecord {
                name: Some("Ann".to_string()),
                ..TechnicianRecord::default()
            }),
        };
        let user = SessionUser::from(payload);
        assert_eq!(user.name, "Ann");
        assert_eq!(user.surname, "User");
        assert_eq!(user.department, "Unknown Department");
        assert_eq!(user.task, "Unknown Task");
        assert_eq!(user.avatar_glyph, AVATAR_GLYPH);
    }

    #[test]
    fn missing_technician_record_falls_back_entirely() {
        let user = SessionUser::from(LoginPayload::default());
        assert_eq!(user.full_name(), "Unknown User");
        assert_eq!(user.department, "Unknown Department");
    }

    #[test]
    fn normalization_trims_and_lowercases_email_only() {
        let profile = RegistrationProfile {
            name: "  Ann ".to_string(),
            surname: " Smith".to_string(),
            email: " Ann@Example.COM ".to_string(),
            password: "  spaced  ".to_string(),
            department: "Digitizing ".to_string(),
            task: " Setup".to_string(),
        };
        let normalized = profile.normalized();
        assert_eq!(normalized.name, "Ann");
        assert_eq!(normalized.surname, "Smith");
        assert_eq!(normalized.email, "ann@example.com");
        // Passwords are sent exactly as typed.
        assert_eq!(normalized.password, "  spaced  ");
        assert_eq!(normalized.department, "Digitizing");
        assert_eq!(normalized.task, "Setup");
    }
}
