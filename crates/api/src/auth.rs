//! Authenticated principal extraction.
//!
//! Authentication itself lives in the platform's auth subsystem, which
//! fronts this service and forwards the caller's role in the
//! `x-auth-role` header. This module only reads that interface; there
//! is no token verification here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

/// Caller roles known to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Partner,
    Guest,
}

impl Role {
    fn from_header(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "partner" => Some(Role::Partner),
            "guest" => Some(Role::Guest),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Partner => "partner",
            Role::Guest => "guest",
        }
    }
}

/// The authenticated caller, as asserted by the upstream auth layer.
///
/// Requests without a role header are treated as guests (the public
/// booking flow); administrative operations call
/// [`Principal::require_manager`].
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub role: Role,
}

impl Principal {
    /// Fail with 403 unless the caller is an admin or manager.
    pub fn require_manager(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin | Role::Manager => Ok(()),
            other => Err(AppError::Forbidden(format!(
                "role {} may not manage availability",
                other.label()
            ))),
        }
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get("x-auth-role")
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                Role::from_header(value)
                    .ok_or_else(|| AppError::BadRequest(format!("unknown role '{value}'")))
            })
            .transpose()?
            .unwrap_or(Role::Guest);

        Ok(Principal { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing() {
        assert_eq!(Role::from_header("admin"), Some(Role::Admin));
        assert_eq!(Role::from_header("guest"), Some(Role::Guest));
        assert_eq!(Role::from_header("root"), None);
    }

    #[test]
    fn only_admin_and_manager_manage_availability() {
        assert!(Principal { role: Role::Admin }.require_manager().is_ok());
        assert!(Principal { role: Role::Manager }.require_manager().is_ok());
        assert!(Principal { role: Role::Partner }.require_manager().is_err());
        assert!(Principal { role: Role::Guest }.require_manager().is_err());
    }
}
