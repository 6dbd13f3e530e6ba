//! Requester identity and roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three roles known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Full access: may read and mutate any sale.
    Administrator,
    /// Records sales; may only touch sales they own.
    Seller,
    /// Read access to their own sales and reports.
    Consultant,
}

impl Role {
    /// Stable name used in token claims and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Seller => "Seller",
            Self::Consultant => "Consultant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Self::Administrator),
            "Seller" => Ok(Self::Seller),
            "Consultant" => Ok(Self::Consultant),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// A role name that is not one of the three known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// The authenticated identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// User identifier, taken from the verified token.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Resolved role.
    pub role: Role,
}

impl Requester {
    /// Whether this identity holds the Administrator role.
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        matches!(self.role, Role::Administrator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Administrator, Role::Seller, Role::Consultant] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "Superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("Superuser".to_owned()));
    }

    #[test]
    fn test_is_administrator() {
        let admin = Requester {
            user_id: Uuid::new_v4(),
            name: "Ana".to_owned(),
            role: Role::Administrator,
        };
        let seller = Requester {
            role: Role::Seller,
            ..admin.clone()
        };

        assert!(admin.is_administrator());
        assert!(!seller.is_administrator());
    }
}
