//! Seeded accounts used to drive the checks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role names as the HRMS API spells them on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// A seeded account and the role a successful login must report
#[derive(Debug, Clone)]
pub struct LoginFixture {
    pub credentials: Credentials,
    pub expected_role: Role,
}

impl LoginFixture {
    pub fn admin() -> Self {
        Self {
            credentials: Credentials::new("admin@hrms.com", "Admin@123"),
            expected_role: Role::Admin,
        }
    }

    pub fn manager() -> Self {
        Self {
            credentials: Credentials::new("manager@hrms.com", "Manager@123"),
            expected_role: Role::Manager,
        }
    }

    pub fn employee() -> Self {
        Self {
            credentials: Credentials::new("employee@hrms.com", "Employee@123"),
            expected_role: Role::Employee,
        }
    }
}

/// Known-bad password for the admin account
pub fn invalid_credentials() -> Credentials {
    Credentials::new("admin@hrms.com", "WrongPassword")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Role::Admin, "\"ADMIN\"")]
    #[test_case(Role::Manager, "\"MANAGER\"")]
    #[test_case(Role::Employee, "\"EMPLOYEE\"")]
    fn test_role_wire_spelling(role: Role, json: &str) {
        assert_eq!(serde_json::to_string(&role).unwrap(), json);
        assert_eq!(serde_json::from_str::<Role>(json).unwrap(), role);
        assert_eq!(format!("\"{}\"", role), json);
    }

    #[test]
    fn test_credentials_body() {
        let body = serde_json::to_value(LoginFixture::admin().credentials).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "admin@hrms.com", "password": "Admin@123"})
        );
    }

    #[test]
    fn test_invalid_credentials_target_admin() {
        let invalid = invalid_credentials();
        assert_eq!(invalid.email, LoginFixture::admin().credentials.email);
        assert_ne!(invalid.password, LoginFixture::admin().credentials.password);
    }
}
