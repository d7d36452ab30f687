//! Well-known account role constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260301000001_create_users.sql`.

use crate::error::CoreError;

/// Books playgrounds.
pub const ROLE_PLAYER: &str = "PLAYER";

/// Lists and manages playgrounds.
pub const ROLE_OWNER: &str = "OWNER";

/// Platform administrator. Never self-registered; seeded at startup.
pub const ROLE_SUPER_ADMIN: &str = "SUPER_ADMIN";

/// Roles a user may pick for themselves at registration.
pub const REGISTERABLE_ROLES: &[&str] = &[ROLE_PLAYER, ROLE_OWNER];

/// Validate a self-selected registration role.
///
/// `SUPER_ADMIN` is deliberately absent from the accepted set.
pub fn validate_registration_role(role: &str) -> Result<(), CoreError> {
    if REGISTERABLE_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            REGISTERABLE_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registerable_roles_accepted() {
        assert!(validate_registration_role(ROLE_PLAYER).is_ok());
        assert!(validate_registration_role(ROLE_OWNER).is_ok());
    }

    #[test]
    fn test_super_admin_not_registerable() {
        assert!(validate_registration_role(ROLE_SUPER_ADMIN).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(validate_registration_role("MANAGER").is_err());
        assert!(validate_registration_role("player").is_err()); // Case-sensitive.
        assert!(validate_registration_role("").is_err());
    }
}
