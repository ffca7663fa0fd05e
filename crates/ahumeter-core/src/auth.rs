//! Admin authorization for reset commands.
//!
//! The check is a pure function returning an explicit result; the
//! "silently do nothing on Denied" policy lives at the call site so the
//! information-hiding behavior (don't reveal the gate exists) stays a
//! caller decision.

/// Result of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The requester is the configured admin.
    Allowed,
    /// The requester is not the admin, or no admin is configured.
    Denied,
}

impl Authorization {
    /// `true` for [`Authorization::Allowed`].
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Check whether `requester` may issue reset commands.
///
/// With no configured admin every request is denied; there is no
/// "open" mode.
pub fn authorize_reset(requester: &str, admin_id: Option<&str>) -> Authorization {
    match admin_id {
        Some(admin) if requester == admin => Authorization::Allowed,
        _ => Authorization::Denied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_allowed() {
        assert_eq!(authorize_reset("42", Some("42")), Authorization::Allowed);
        assert!(authorize_reset("42", Some("42")).is_allowed());
    }

    #[test]
    fn non_admin_is_denied() {
        assert_eq!(authorize_reset("43", Some("42")), Authorization::Denied);
    }

    #[test]
    fn no_configured_admin_denies_everyone() {
        assert_eq!(authorize_reset("42", None), Authorization::Denied);
    }

    #[test]
    fn comparison_is_exact() {
        assert_eq!(authorize_reset("4", Some("42")), Authorization::Denied);
        assert_eq!(authorize_reset("042", Some("42")), Authorization::Denied);
    }
}
