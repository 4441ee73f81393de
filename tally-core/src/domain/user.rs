//! User domain model

use serde::{Deserialize, Serialize};

/// Descriptor of an authenticated (or demo) user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

impl UserProfile {
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    /// Local pseudo-user installed by demo-mode login.
    ///
    /// The display name falls back to the email local part.
    pub fn demo(email: &str) -> Self {
        let display_name = email
            .split('@')
            .next()
            .filter(|part| !part.is_empty())
            .unwrap_or("User")
            .to_string();
        Self {
            id: "demo_user".to_string(),
            email: email.to_string(),
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = UserProfile::new("user-123", "test@example.com", "Test");
        assert_eq!(user.id, "user-123");
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn test_demo_user_display_name() {
        assert_eq!(UserProfile::demo("alice@example.com").display_name, "alice");
        assert_eq!(UserProfile::demo("@example.com").display_name, "User");
        assert_eq!(UserProfile::demo("alice@example.com").id, "demo_user");
    }
}
