/**
 * Authentication
 *
 * This module handles user authentication: login and registration handlers,
 * JWT token issuance/verification, and user database operations.
 */

pub mod handlers;
pub mod tokens;
pub mod users;

/// Access roles. Stored in the database and carried in tokens as a numeric
/// `role_id`: 1 = Admin, 2 = User.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Numeric identifier used in the database and in token claims.
    pub fn as_id(self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::User => 2,
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = i64;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::Admin),
            2 => Ok(Self::User),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_id_round_trip() {
        assert_eq!(Role::try_from(Role::Admin.as_id()), Ok(Role::Admin));
        assert_eq!(Role::try_from(Role::User.as_id()), Ok(Role::User));
    }

    #[test]
    fn test_unknown_role_id_rejected() {
        assert_eq!(Role::try_from(0), Err(0));
        assert_eq!(Role::try_from(3), Err(3));
        assert_eq!(Role::try_from(-1), Err(-1));
    }
}
