//! User model and the reduced shapes used when other records reference a user.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Seller,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Seller => "seller",
            UserRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "seller" => Ok(UserRole::Seller),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Contact details of the user who submitted a product.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
}

/// Name-only reference, used for `addedBy` on shops and engineers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserRef {
    pub name: String,
}

impl UserRef {
    /// Build from a LEFT JOIN column; `None` when the reference is dangling.
    pub fn from_joined(name: Option<String>) -> Option<Self> {
        name.map(|name| Self { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_role_serialization() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
    }

    #[test]
    fn user_role_from_str() {
        assert_eq!("seller".parse::<UserRole>(), Ok(UserRole::Seller));
        assert!("Admin".parse::<UserRole>().is_err());
        assert_eq!(UserRole::Admin.as_str().parse::<UserRole>(), Ok(UserRole::Admin));
    }

    #[test]
    fn user_ref_from_missing_join() {
        assert_eq!(UserRef::from_joined(None), None);
        assert_eq!(
            UserRef::from_joined(Some("Amal".to_string())),
            Some(UserRef {
                name: "Amal".to_string()
            })
        );
    }
}
