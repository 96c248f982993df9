use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Details a passenger supplies when buying a ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A registered passenger. `email` is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            created_at: Utc::now(),
        }
    }

    /// Name shown in section listings
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Canonical form of an email used as the registry key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let user = User::new("Ada".to_string(), "Lovelace".to_string(), "ada@example.com".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }
}
